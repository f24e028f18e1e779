// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Entry-slot codec.
//!
//! A slot is [`ENTRY_SIZE`] bytes: magic, version, one payload, zero
//! padding, and a trailing CRC computed over the payload bytes only (the
//! magic, version, and padding are not covered).

use crate::layout::{ENTRY_SIZE, MAGIC, VERSION};
use crate::payload::{PayloadBytes, PAYLOAD_SIZE};
use thiserror::Error;

/// Byte offset of the payload within a slot.
pub const PAYLOAD_OFFSET: usize = 8;

const CRC_OFFSET: usize = ENTRY_SIZE - 4;

/// Errors from validating an entry slot.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("bad entry magic {0:#010x}")]
    BadMagic(u32),
    #[error("unsupported entry version {0}")]
    BadVersion(u32),
    #[error("entry checksum mismatch (stored {stored:#010x}, computed {computed:#010x})")]
    Checksum { stored: u32, computed: u32 },
}

/// Build a full slot image around one encoded payload.
pub fn encode_slot(payload: &PayloadBytes) -> [u8; ENTRY_SIZE] {
    let mut buf = [0u8; ENTRY_SIZE];
    buf[0..4].copy_from_slice(&MAGIC.to_le_bytes());
    buf[4..8].copy_from_slice(&VERSION.to_le_bytes());
    buf[PAYLOAD_OFFSET..PAYLOAD_OFFSET + PAYLOAD_SIZE].copy_from_slice(payload);
    let crc = crc32fast::hash(payload);
    buf[CRC_OFFSET..].copy_from_slice(&crc.to_le_bytes());
    buf
}

/// Validate a slot image and borrow its payload bytes.
pub fn validate_slot(buf: &[u8; ENTRY_SIZE]) -> Result<&[u8], EntryError> {
    let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    if magic != MAGIC {
        return Err(EntryError::BadMagic(magic));
    }

    let version = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    if version != VERSION {
        return Err(EntryError::BadVersion(version));
    }

    let payload = &buf[PAYLOAD_OFFSET..PAYLOAD_OFFSET + PAYLOAD_SIZE];
    let stored = u32::from_le_bytes([
        buf[CRC_OFFSET],
        buf[CRC_OFFSET + 1],
        buf[CRC_OFFSET + 2],
        buf[CRC_OFFSET + 3],
    ]);
    let computed = crc32fast::hash(payload);
    if stored != computed {
        return Err(EntryError::Checksum { stored, computed });
    }

    Ok(payload)
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
