// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-inode view of a replayed event stream.
//!
//! Recovery consumers usually ask "what happened to this inode", so the
//! index groups events by inode with each list in `(timestamp_ms, tx_id)`
//! order.

use mdj_core::payload::Payload;
use std::collections::HashMap;

/// Replayed events grouped by inode.
#[derive(Debug, Default)]
pub struct InodeIndex {
    events: HashMap<u32, Vec<Payload>>,
}

impl InodeIndex {
    pub fn from_events(events: impl IntoIterator<Item = Payload>) -> Self {
        let mut map: HashMap<u32, Vec<Payload>> = HashMap::new();
        for event in events {
            map.entry(event.ino).or_default().push(event);
        }
        for list in map.values_mut() {
            list.sort_by_key(|p| (p.timestamp_ms, p.tx_id));
        }
        Self { events: map }
    }

    /// All events for one inode, oldest first. Empty for unknown inodes.
    pub fn events_for(&self, ino: u32) -> &[Payload] {
        self.events.get(&ino).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn inodes(&self) -> impl Iterator<Item = u32> + '_ {
        self.events.keys().copied()
    }

    /// Number of distinct inodes with events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod tests;
