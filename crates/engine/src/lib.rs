// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mdj-engine: the runtime half of the metadata disk journal
//!
//! A [`Journal`] owns a bounded queue of pending events, a flusher thread
//! that drains the queue in coalesced batches, and a monitor thread that
//! tracks device readiness. Filesystem callers log events through
//! [`Journal::log_metadata`]; nothing on that path blocks on device I/O
//! unless synchronous durability was requested.

pub mod config;
mod flusher;
pub mod journal;
mod logger;
mod monitor;
pub mod queue;

pub use config::JournalConfig;
pub use journal::Journal;
pub use queue::{EntryQueue, QueueError};

// The caller-facing contract types, re-exported for convenience.
pub use mdj_core::event::{Durability, EventInfo, JournalNode, StatSnapshot};
