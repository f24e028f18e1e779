// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mdj-storage: raw device access for the metadata disk journal
//!
//! The writer owns the device handle and appends entries to the circular
//! log; the replayer scans the log back into an ordered event stream. Both
//! sides speak the `mdj_core` on-device format and nothing else.

pub mod device;
pub mod index;
pub mod replay;
pub mod writer;

pub use index::InodeIndex;
pub use replay::{replay, validate, ReplayError, ValidationReport};
pub use writer::{RawWriter, WriteError};
