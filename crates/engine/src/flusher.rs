// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The background flusher thread.
//!
//! One flusher per journal. It sleeps until the device is ready, collects
//! coalesced batches from the queue, and hands them to the raw writer. A
//! failed batch is dropped as a unit and accounted for; the flusher itself
//! never gives up until shutdown.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use mdj_core::clock::Clock;
use tracing::{debug, info, warn};

use crate::journal::Shared;
use crate::queue::BatchOutcome;

/// Poll cadence while the device is down.
const NOT_READY_PAUSE: Duration = Duration::from_millis(100);

pub(crate) fn run<C: Clock>(shared: Arc<Shared<C>>) {
    info!("journal flusher started");
    loop {
        while !shared.status.is_ready() && !shared.queue.is_shutdown() {
            thread::sleep(NOT_READY_PAUSE);
        }

        match shared.queue.collect_batch(|| shared.status.is_ready()) {
            BatchOutcome::Shutdown { abandoned } => {
                if abandoned > 0 {
                    shared.dropped.add(abandoned as u64);
                    warn!(
                        abandoned,
                        "shutdown with queued entries the device never accepted"
                    );
                }
                break;
            }
            BatchOutcome::NotReady => continue,
            BatchOutcome::Batch(batch) => {
                let len = batch.len();
                match shared.writer.write_batch(&batch) {
                    Ok(()) => debug!(entries = len, "flushed batch"),
                    Err(e) => {
                        shared.dropped.add(len as u64);
                        warn!(
                            entries = len,
                            dropped_total = shared.dropped.get(),
                            error = %e,
                            "batch write failed; entries dropped"
                        );
                    }
                }
            }
        }
    }
    info!("journal flusher stopped");
}
