// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! mdj-core: on-device format and shared state for the metadata disk journal
//!
//! Everything that defines the bit-exact device layout lives here: the
//! layout constants, the header and entry-slot codecs, and the fixed-size
//! payload record. The codecs are explicit little-endian serializers; the
//! journal never relies on struct layout for its on-device format.

pub mod clock;
pub mod entry;
pub mod event;
pub mod header;
pub mod layout;
pub mod payload;
pub mod state;

pub use clock::{Clock, FakeClock, SystemClock};
pub use entry::EntryError;
pub use event::{Durability, EventInfo, JournalNode, StatSnapshot};
pub use header::{Header, HeaderError};
pub use payload::{Payload, PayloadBytes, PayloadError, PAYLOAD_SIZE};
pub use state::{DeviceStatus, DropCounter, TxCounter};
