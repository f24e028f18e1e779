// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Journal replay and validation.
//!
//! Both entry points run the same scan: read and validate the header, walk
//! the live window slot by slot, validate each entry, and stop hard at the
//! first sign of corruption. `replay` returns the decoded events sorted by
//! `(timestamp_ms, tx_id)`; `validate` returns only the scan report.

use std::io;
use std::os::unix::fs::FileExt;
use std::path::Path;

use crate::device;
use mdj_core::entry::{self, EntryError};
use mdj_core::header::{Header, HeaderError};
use mdj_core::layout::{index_to_offset, ENTRY_SIZE, HEADER_SIZE, NUM_ENTRIES};
use mdj_core::payload::{Payload, PayloadError};
use thiserror::Error;
use tracing::{debug, warn};

/// Largest forward timestamp jump tolerated when tx ids fail to advance in
/// slot order.
const MAX_TIMESTAMP_SKEW_MS: u64 = 10_000;

/// Errors that abort a replay scan.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to open journal device: {0}")]
    Open(#[source] io::Error),
    #[error("failed to read journal header: {0}")]
    HeaderRead(#[source] io::Error),
    #[error("invalid journal header: {0}")]
    Header(#[from] HeaderError),
    #[error("short read at slot {index}")]
    ShortRead { index: u64 },
    #[error("corrupt entry at slot {index}: {source}")]
    Slot {
        index: u64,
        #[source]
        source: EntryError,
    },
    #[error("undecodable payload at slot {index}: {source}")]
    Payload {
        index: u64,
        #[source]
        source: PayloadError,
    },
    #[error("empty action at slot {index} (tx {tx_id})")]
    EmptyAction { index: u64, tx_id: u64 },
    #[error("zero inode at slot {index} (tx {tx_id})")]
    ZeroInode { index: u64, tx_id: u64 },
    #[error("decreasing timestamp at slot {index} ({current} ms after {previous} ms)")]
    DecreasingTimestamp {
        index: u64,
        current: u64,
        previous: u64,
    },
    #[error("timestamp skew too large at slot {index} (tx {tx_id} after tx {previous_tx})")]
    TimestampSkew {
        index: u64,
        tx_id: u64,
        previous_tx: u64,
    },
}

/// Outcome of a successful validation scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationReport {
    /// Valid entries in the live window.
    pub entries: u64,
    /// Non-fatal monotonicity violations observed.
    pub warnings: u64,
}

/// Replay the journal into an ordered event stream.
///
/// Events are sorted by `(timestamp_ms, tx_id)` ascending; the tie-breaker
/// recovers a total order when the synchronous path raced ahead of queued
/// entries.
pub fn replay(path: &Path) -> Result<Vec<Payload>, ReplayError> {
    let (mut events, _) = scan(path)?;
    events.sort_by_key(|p| (p.timestamp_ms, p.tx_id));
    Ok(events)
}

/// Validate the on-device journal without materializing events.
pub fn validate(path: &Path) -> Result<ValidationReport, ReplayError> {
    let (events, warnings) = scan(path)?;
    Ok(ValidationReport {
        entries: events.len() as u64,
        warnings,
    })
}

fn scan(path: &Path) -> Result<(Vec<Payload>, u64), ReplayError> {
    let file = device::open_ro(path).map_err(ReplayError::Open)?;

    let mut header_buf = [0u8; HEADER_SIZE];
    file.read_exact_at(&mut header_buf, 0)
        .map_err(ReplayError::HeaderRead)?;

    // A header region of all zeroes is a device that has never been
    // written: an empty journal, not a corrupt one.
    if Header::is_blank(&header_buf) {
        debug!("blank journal header; device is empty");
        return Ok((Vec::new(), 0));
    }

    let header = Header::decode(&header_buf)?;
    let end = header.end_index;
    let mut index = header.start_index;
    let mut events = Vec::new();
    let mut warnings = 0u64;
    let mut last_tx_id = 0u64;
    let mut last_timestamp = 0u64;
    let mut slot_buf = [0u8; ENTRY_SIZE];

    while index != end {
        if file
            .read_exact_at(&mut slot_buf, index_to_offset(index))
            .is_err()
        {
            return Err(ReplayError::ShortRead { index });
        }

        let payload_bytes =
            entry::validate_slot(&slot_buf).map_err(|source| ReplayError::Slot { index, source })?;
        let payload = Payload::decode(payload_bytes)
            .map_err(|source| ReplayError::Payload { index, source })?;

        if payload.action().is_empty() {
            return Err(ReplayError::EmptyAction {
                index,
                tx_id: payload.tx_id,
            });
        }
        if payload.ino == 0 {
            return Err(ReplayError::ZeroInode {
                index,
                tx_id: payload.tx_id,
            });
        }

        if payload.timestamp_ms < last_timestamp {
            return Err(ReplayError::DecreasingTimestamp {
                index,
                current: payload.timestamp_ms,
                previous: last_timestamp,
            });
        }
        if payload.timestamp_ms > last_timestamp && payload.tx_id <= last_tx_id {
            if payload.timestamp_ms - last_timestamp > MAX_TIMESTAMP_SKEW_MS {
                return Err(ReplayError::TimestampSkew {
                    index,
                    tx_id: payload.tx_id,
                    previous_tx: last_tx_id,
                });
            }
            warn!(
                index,
                tx_id = payload.tx_id,
                previous_tx = last_tx_id,
                "non-monotonic tx id in slot order"
            );
            warnings += 1;
        }

        last_tx_id = payload.tx_id;
        last_timestamp = payload.timestamp_ms;
        debug!(
            index,
            tx_id = payload.tx_id,
            timestamp_ms = payload.timestamp_ms,
            "replayed slot"
        );
        events.push(payload);
        index = (index + 1) % NUM_ENTRIES;
    }

    Ok((events, warnings))
}

#[cfg(test)]
#[path = "replay_tests.rs"]
mod tests;
