// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Process-wide journal state shared between components.
//!
//! These are advisory flags and counters, not ordering primitives; relaxed
//! atomics are sufficient.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Whether the backing device currently passes the readiness probe.
#[derive(Debug, Default)]
pub struct DeviceStatus {
    ready: AtomicBool,
}

impl DeviceStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }

    /// Record the probed state; returns the previous state.
    pub fn set_ready(&self, ready: bool) -> bool {
        self.ready.swap(ready, Ordering::Relaxed)
    }
}

/// Count of events the journal refused or failed to persist.
#[derive(Debug, Default)]
pub struct DropCounter {
    dropped: AtomicU64,
}

impl DropCounter {
    pub fn add(&self, n: u64) {
        self.dropped.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

/// Monotonic per-process transaction id generator. The first id issued
/// is 1.
#[derive(Debug, Default)]
pub struct TxCounter {
    last: AtomicU64,
}

impl TxCounter {
    pub fn next(&self) -> u64 {
        self.last.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
