// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded ring of pending journal entries.
//!
//! Producers enqueue without blocking: a full queue is the drop path, not a
//! backpressure path. The flusher is the only consumer; it waits on the
//! condvar and drains a contiguous prefix under a single lock acquisition,
//! which is what makes the FIFO ordering guarantee hold.

use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::Instant;

use mdj_core::layout::{FLUSH_DEADLINE, QUEUE_CAPACITY};
use mdj_core::payload::{PayloadBytes, PAYLOAD_SIZE};
use thiserror::Error;

/// Reasons an enqueue is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("payload size {got} does not match expected {expected}")]
    WrongSize { got: usize, expected: usize },
    #[error("queue full")]
    Full,
    #[error("queue shutting down")]
    ShuttingDown,
}

/// What the flusher should do after a batch-collection attempt.
pub(crate) enum BatchOutcome {
    /// Entries drained from the queue, in enqueue order.
    Batch(Vec<PayloadBytes>),
    /// The device dropped out mid-wait; nothing was drained.
    NotReady,
    /// Shutdown. Entries that could not be drained into an absent device
    /// are reported back for drop accounting.
    Shutdown { abandoned: usize },
}

/// Fixed-capacity FIFO of encoded payloads.
pub struct EntryQueue {
    state: Mutex<State>,
    cond: Condvar,
}

struct State {
    slots: Vec<PayloadBytes>,
    head: usize,
    tail: usize,
    count: usize,
    shutdown: bool,
    flush_requested: bool,
}

impl EntryQueue {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                slots: vec![[0u8; PAYLOAD_SIZE]; QUEUE_CAPACITY],
                head: 0,
                tail: 0,
                count: 0,
                shutdown: false,
                flush_requested: false,
            }),
            cond: Condvar::new(),
        }
    }

    /// Copy one encoded payload into the queue. Never blocks.
    pub fn enqueue(&self, payload: &[u8]) -> Result<(), QueueError> {
        if payload.len() != PAYLOAD_SIZE {
            return Err(QueueError::WrongSize {
                got: payload.len(),
                expected: PAYLOAD_SIZE,
            });
        }

        let mut state = self.lock();
        if state.shutdown {
            return Err(QueueError::ShuttingDown);
        }
        if state.count == QUEUE_CAPACITY {
            return Err(QueueError::Full);
        }

        let tail = state.tail;
        state.slots[tail].copy_from_slice(payload);
        state.tail = (tail + 1) % QUEUE_CAPACITY;
        state.count += 1;
        self.cond.notify_one();
        Ok(())
    }

    /// Ask the flusher to drain without waiting out the coalescing
    /// deadline.
    pub fn request_flush(&self) {
        let mut state = self.lock();
        state.flush_requested = true;
        self.cond.notify_all();
    }

    /// Flag shutdown and wake the flusher.
    pub fn shutdown(&self) {
        let mut state = self.lock();
        state.shutdown = true;
        self.cond.notify_all();
    }

    pub fn is_shutdown(&self) -> bool {
        self.lock().shutdown
    }

    pub fn len(&self) -> usize {
        self.lock().count
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Wake anyone waiting on the queue condition.
    pub(crate) fn notify(&self) {
        self.cond.notify_all();
    }

    /// Block until a batch is ready, following the flusher protocol: wait
    /// for the first entry, coalesce a burst until the queue fills or the
    /// deadline passes, then drain everything in one go. `device_ready` is
    /// re-checked after the wait so a vanished device is never drained
    /// into.
    pub(crate) fn collect_batch(&self, device_ready: impl Fn() -> bool) -> BatchOutcome {
        let mut state = self.lock();

        while state.count == 0 && !state.shutdown {
            state = self.cond.wait(state).unwrap_or_else(|e| e.into_inner());
        }
        if state.shutdown && state.count == 0 {
            return BatchOutcome::Shutdown { abandoned: 0 };
        }

        let deadline = Instant::now() + FLUSH_DEADLINE;
        while state.count < QUEUE_CAPACITY && !state.shutdown && !state.flush_requested {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let (guard, _) = self
                .cond
                .wait_timeout(state, deadline - now)
                .unwrap_or_else(|e| e.into_inner());
            state = guard;
        }
        state.flush_requested = false;

        if !device_ready() {
            if state.shutdown {
                let abandoned = state.count;
                state.count = 0;
                state.head = state.tail;
                return BatchOutcome::Shutdown { abandoned };
            }
            return BatchOutcome::NotReady;
        }

        let batch_count = state.count;
        let mut batch = Vec::with_capacity(batch_count);
        for _ in 0..batch_count {
            let head = state.head;
            batch.push(state.slots[head]);
            state.head = (head + 1) % QUEUE_CAPACITY;
        }
        state.count = 0;

        BatchOutcome::Batch(batch)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for EntryQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "queue_tests.rs"]
mod tests;
