// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Journal lifecycle and the public logging surface.
//!
//! [`Journal::init`] wires the shared state together and spawns the two
//! background threads; [`Journal::shutdown`] flags the queue and joins the
//! flusher, which drains whatever the device will still accept.

use std::sync::Arc;
use std::thread;

use mdj_core::clock::{Clock, SystemClock};
use mdj_core::event::{Durability, EventInfo, JournalNode};
use mdj_core::state::{DeviceStatus, DropCounter, TxCounter};
use mdj_storage::writer::RawWriter;
use tracing::{info, warn};

use crate::config::JournalConfig;
use crate::queue::EntryQueue;
use crate::{flusher, logger, monitor};

/// State shared between the public handle and the background threads.
pub(crate) struct Shared<C: Clock> {
    pub(crate) config: JournalConfig,
    pub(crate) clock: C,
    pub(crate) queue: EntryQueue,
    pub(crate) writer: RawWriter,
    pub(crate) status: Arc<DeviceStatus>,
    pub(crate) dropped: DropCounter,
    pub(crate) tx_ids: TxCounter,
}

/// A running journal instance.
pub struct Journal<C: Clock = SystemClock> {
    shared: Arc<Shared<C>>,
    flusher: Option<thread::JoinHandle<()>>,
}

impl Journal<SystemClock> {
    /// Bring the journal up: spawn the flusher and the readiness monitor.
    pub fn init(config: JournalConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock + 'static> Journal<C> {
    /// As [`Journal::init`], with an explicit clock.
    pub fn with_clock(config: JournalConfig, clock: C) -> Self {
        let status = Arc::new(DeviceStatus::new());
        let writer = RawWriter::new(config.device_path.clone(), Arc::clone(&status));
        let shared = Arc::new(Shared {
            config,
            clock,
            queue: EntryQueue::new(),
            writer,
            status,
            dropped: DropCounter::default(),
            tx_ids: TxCounter::default(),
        });

        let flusher = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("mdj-flusher".into())
                .spawn(move || flusher::run(shared))
        };
        let flusher = match flusher {
            Ok(handle) => Some(handle),
            Err(e) => {
                // Without a flusher the async path can only leak entries;
                // close the queue so enqueues are refused instead.
                warn!(error = %e, "failed to spawn journal flusher; async logging disabled");
                None
            }
        };
        if flusher.is_none() {
            shared.queue.shutdown();
        }

        {
            let shared = Arc::clone(&shared);
            if let Err(e) = thread::Builder::new()
                .name("mdj-monitor".into())
                .spawn(move || monitor::run(shared))
            {
                warn!(error = %e, "failed to spawn readiness monitor");
            }
        }

        info!(
            device = %shared.config.device_path.display(),
            "journal initialized"
        );
        Journal {
            shared,
            flusher,
        }
    }

    /// Record one metadata mutation.
    ///
    /// Returns `false` when the event was dropped; the drop is already
    /// counted and traced. Filesystem operations are expected to proceed
    /// regardless.
    pub fn log_metadata(
        &self,
        node: &impl JournalNode,
        info: &EventInfo<'_>,
        durability: Durability,
    ) -> bool {
        logger::log_metadata(&self.shared, node, info, durability)
    }

    /// Ask the flusher to drain without waiting out the coalescing
    /// deadline.
    pub fn flush_now(&self) {
        self.shared.queue.request_flush();
    }

    /// Whether the backing device currently passes the readiness probe.
    pub fn is_ready(&self) -> bool {
        self.shared.status.is_ready()
    }

    /// Events refused or lost since init.
    pub fn dropped_events(&self) -> u64 {
        self.shared.dropped.get()
    }

    /// Entries waiting in the queue.
    pub fn pending(&self) -> usize {
        self.shared.queue.len()
    }

    /// Cooperative shutdown: the flusher drains what the device will
    /// accept, then exits. The monitor notices the flag on its next poll.
    ///
    /// Returns the total number of events dropped over the journal's
    /// lifetime, including any the shutdown itself had to abandon.
    pub fn shutdown(mut self) -> u64 {
        info!("journal shutting down");
        self.shared.queue.shutdown();
        if let Some(handle) = self.flusher.take() {
            if handle.join().is_err() {
                warn!("journal flusher panicked during shutdown");
            }
        }
        let dropped = self.shared.dropped.get();
        info!(dropped, "journal shutdown complete");
        dropped
    }
}

impl<C: Clock> Drop for Journal<C> {
    fn drop(&mut self) {
        self.shared.queue.shutdown();
        if let Some(handle) = self.flusher.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;
