// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runtime configuration for a journal instance.

use mdj_core::layout::DEFAULT_DEVICE_PATH;
use std::collections::HashSet;
use std::path::PathBuf;

/// Configuration for [`Journal::init`](crate::Journal::init).
///
/// Layout constants are compile-time (`mdj_core::layout`); this carries
/// only the per-instance knobs.
#[derive(Debug, Clone)]
pub struct JournalConfig {
    /// Path of the raw backing device.
    pub device_path: PathBuf,
    /// Inodes whose events are suppressed. Hosts list their internal
    /// bookkeeping nodes here so metadata churn on them never reaches the
    /// log.
    pub ignored_inodes: HashSet<u32>,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            device_path: PathBuf::from(DEFAULT_DEVICE_PATH),
            ignored_inodes: HashSet::new(),
        }
    }
}

impl JournalConfig {
    pub fn with_device_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.device_path = path.into();
        self
    }

    pub fn with_ignored_inodes(mut self, inodes: impl IntoIterator<Item = u32>) -> Self {
        self.ignored_inodes = inodes.into_iter().collect();
        self
    }
}
