// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The fixed-size metadata-event record stored inside each entry slot.
//!
//! A payload is always exactly [`PAYLOAD_SIZE`] bytes on the wire. Text
//! fields occupy [`MAX_FIELD_LEN`] bytes each, NUL-terminated and
//! NUL-padded; numeric fields are little-endian at fixed offsets.

use crate::layout::MAX_FIELD_LEN;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Width of the numeric prefix before the six text fields.
const FIXED_SIZE: usize = 88;

/// Size in bytes of an encoded payload.
pub const PAYLOAD_SIZE: usize = FIXED_SIZE + 6 * MAX_FIELD_LEN;

/// An encoded payload, as held in queue slots and entry slots.
pub type PayloadBytes = [u8; PAYLOAD_SIZE];

/// Errors from decoding a payload.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("payload size {got} does not match expected {expected}")]
    WrongSize { got: usize, expected: usize },
}

/// One metadata-mutation event.
///
/// `tx_id` is assigned per process at logger entry; `timestamp_ms` is wall
/// clock. The `has_*` flags mark which override fields the caller supplied.
/// The text fields are raw NUL-padded buffers; use the `set_*` methods and
/// accessors rather than touching them directly, and note that `encode`
/// forces the terminating NUL either way.
#[derive(Clone, PartialEq, Eq)]
pub struct Payload {
    pub tx_id: u64,
    pub timestamp_ms: u64,
    pub parent_ino: u32,
    pub src_parent_ino: u32,
    pub dst_parent_ino: u32,
    pub ino: u32,
    pub st_mode: u32,
    pub st_size: u64,
    pub st_nlink: u64,
    pub st_blocks: u64,
    pub mtime: i64,
    pub ctime: i64,
    pub uid: u32,
    pub gid: u32,
    pub has_mode: bool,
    pub has_size: bool,
    pub has_uid: bool,
    pub has_gid: bool,
    pub action: [u8; MAX_FIELD_LEN],
    pub name: [u8; MAX_FIELD_LEN],
    pub old_name: [u8; MAX_FIELD_LEN],
    pub new_name: [u8; MAX_FIELD_LEN],
    pub target: [u8; MAX_FIELD_LEN],
    pub extra: [u8; MAX_FIELD_LEN],
}

impl Payload {
    pub fn action(&self) -> Cow<'_, str> {
        field_text(&self.action)
    }

    pub fn name(&self) -> Cow<'_, str> {
        field_text(&self.name)
    }

    pub fn old_name(&self) -> Cow<'_, str> {
        field_text(&self.old_name)
    }

    pub fn new_name(&self) -> Cow<'_, str> {
        field_text(&self.new_name)
    }

    pub fn target(&self) -> Cow<'_, str> {
        field_text(&self.target)
    }

    pub fn extra(&self) -> Cow<'_, str> {
        field_text(&self.extra)
    }

    pub fn set_action(&mut self, value: &str) {
        set_field_text(&mut self.action, value);
    }

    pub fn set_name(&mut self, value: &str) {
        set_field_text(&mut self.name, value);
    }

    pub fn set_old_name(&mut self, value: &str) {
        set_field_text(&mut self.old_name, value);
    }

    pub fn set_new_name(&mut self, value: &str) {
        set_field_text(&mut self.new_name, value);
    }

    pub fn set_target(&mut self, value: &str) {
        set_field_text(&mut self.target, value);
    }

    pub fn set_extra(&mut self, value: &str) {
        set_field_text(&mut self.extra, value);
    }

    /// Serialize to the fixed wire representation.
    pub fn encode(&self) -> PayloadBytes {
        let mut buf = [0u8; PAYLOAD_SIZE];
        buf[0..8].copy_from_slice(&self.tx_id.to_le_bytes());
        buf[8..16].copy_from_slice(&self.timestamp_ms.to_le_bytes());
        buf[16..20].copy_from_slice(&self.parent_ino.to_le_bytes());
        buf[20..24].copy_from_slice(&self.src_parent_ino.to_le_bytes());
        buf[24..28].copy_from_slice(&self.dst_parent_ino.to_le_bytes());
        buf[28..32].copy_from_slice(&self.ino.to_le_bytes());
        buf[32..36].copy_from_slice(&self.st_mode.to_le_bytes());
        buf[36..44].copy_from_slice(&self.st_size.to_le_bytes());
        buf[44..52].copy_from_slice(&self.st_nlink.to_le_bytes());
        buf[52..60].copy_from_slice(&self.st_blocks.to_le_bytes());
        buf[60..68].copy_from_slice(&self.mtime.to_le_bytes());
        buf[68..76].copy_from_slice(&self.ctime.to_le_bytes());
        buf[76..80].copy_from_slice(&self.uid.to_le_bytes());
        buf[80..84].copy_from_slice(&self.gid.to_le_bytes());
        buf[84] = self.has_mode.into();
        buf[85] = self.has_size.into();
        buf[86] = self.has_uid.into();
        buf[87] = self.has_gid.into();
        let mut at = FIXED_SIZE;
        for field in [
            &self.action,
            &self.name,
            &self.old_name,
            &self.new_name,
            &self.target,
            &self.extra,
        ] {
            buf[at..at + MAX_FIELD_LEN].copy_from_slice(field);
            // Termination holds on the wire no matter how the field was
            // filled in.
            buf[at + MAX_FIELD_LEN - 1] = 0;
            at += MAX_FIELD_LEN;
        }
        buf
    }

    /// Deserialize from the wire representation. Exactly [`PAYLOAD_SIZE`]
    /// bytes are accepted.
    pub fn decode(bytes: &[u8]) -> Result<Self, PayloadError> {
        if bytes.len() != PAYLOAD_SIZE {
            return Err(PayloadError::WrongSize {
                got: bytes.len(),
                expected: PAYLOAD_SIZE,
            });
        }

        let mut payload = Payload {
            tx_id: u64::from_le_bytes(slice8(bytes, 0)),
            timestamp_ms: u64::from_le_bytes(slice8(bytes, 8)),
            parent_ino: u32::from_le_bytes(slice4(bytes, 16)),
            src_parent_ino: u32::from_le_bytes(slice4(bytes, 20)),
            dst_parent_ino: u32::from_le_bytes(slice4(bytes, 24)),
            ino: u32::from_le_bytes(slice4(bytes, 28)),
            st_mode: u32::from_le_bytes(slice4(bytes, 32)),
            st_size: u64::from_le_bytes(slice8(bytes, 36)),
            st_nlink: u64::from_le_bytes(slice8(bytes, 44)),
            st_blocks: u64::from_le_bytes(slice8(bytes, 52)),
            mtime: i64::from_le_bytes(slice8(bytes, 60)),
            ctime: i64::from_le_bytes(slice8(bytes, 68)),
            uid: u32::from_le_bytes(slice4(bytes, 76)),
            gid: u32::from_le_bytes(slice4(bytes, 80)),
            has_mode: bytes[84] != 0,
            has_size: bytes[85] != 0,
            has_uid: bytes[86] != 0,
            has_gid: bytes[87] != 0,
            ..Payload::default()
        };

        let mut at = FIXED_SIZE;
        for field in [
            &mut payload.action,
            &mut payload.name,
            &mut payload.old_name,
            &mut payload.new_name,
            &mut payload.target,
            &mut payload.extra,
        ] {
            field.copy_from_slice(&bytes[at..at + MAX_FIELD_LEN]);
            // NUL termination holds even for records written by a foreign
            // producer
            field[MAX_FIELD_LEN - 1] = 0;
            at += MAX_FIELD_LEN;
        }

        Ok(payload)
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self {
            tx_id: 0,
            timestamp_ms: 0,
            parent_ino: 0,
            src_parent_ino: 0,
            dst_parent_ino: 0,
            ino: 0,
            st_mode: 0,
            st_size: 0,
            st_nlink: 0,
            st_blocks: 0,
            mtime: 0,
            ctime: 0,
            uid: 0,
            gid: 0,
            has_mode: false,
            has_size: false,
            has_uid: false,
            has_gid: false,
            action: [0; MAX_FIELD_LEN],
            name: [0; MAX_FIELD_LEN],
            old_name: [0; MAX_FIELD_LEN],
            new_name: [0; MAX_FIELD_LEN],
            target: [0; MAX_FIELD_LEN],
            extra: [0; MAX_FIELD_LEN],
        }
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Payload")
            .field("tx_id", &self.tx_id)
            .field("timestamp_ms", &self.timestamp_ms)
            .field("ino", &self.ino)
            .field("parent_ino", &self.parent_ino)
            .field("action", &self.action())
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Copy `value` into a text field, truncating to `MAX_FIELD_LEN - 1` bytes
/// and NUL-padding the remainder.
fn set_field_text(field: &mut [u8; MAX_FIELD_LEN], value: &str) {
    field.fill(0);
    let len = value.len().min(MAX_FIELD_LEN - 1);
    field[..len].copy_from_slice(&value.as_bytes()[..len]);
}

fn field_text(field: &[u8; MAX_FIELD_LEN]) -> Cow<'_, str> {
    let end = field.iter().position(|&b| b == 0).unwrap_or(MAX_FIELD_LEN);
    String::from_utf8_lossy(&field[..end])
}

fn slice4(bytes: &[u8], at: usize) -> [u8; 4] {
    let mut out = [0u8; 4];
    out.copy_from_slice(&bytes[at..at + 4]);
    out
}

fn slice8(bytes: &[u8], at: usize) -> [u8; 8] {
    let mut out = [0u8; 8];
    out.copy_from_slice(&bytes[at..at + 8]);
    out
}

#[cfg(test)]
#[path = "payload_tests.rs"]
mod tests;
