// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Circular-log writer.
//!
//! The writer owns the single raw device handle; the batched path (used by
//! the flusher) and the synchronous path (used for `Durability::Sync`
//! events) serialize on one mutex, so a sync write can never interleave
//! mid-batch.
//!
//! Header state is re-read and validated on every call, which makes each
//! batch self-correcting: a corrupted header costs the log its history, not
//! its future.

use std::fs::File;
use std::io;
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use mdj_core::entry;
use mdj_core::header::Header;
use mdj_core::layout::{index_to_offset, HEADER_SIZE, NUM_ENTRIES};
use mdj_core::payload::PayloadBytes;
use mdj_core::state::DeviceStatus;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::device;
use crate::replay;

const HEADER_PERSIST_ATTEMPTS: u32 = 3;
const HEADER_RETRY_PAUSE: Duration = Duration::from_millis(1);

/// Errors from the raw writer.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("device not ready")]
    NotReady,
    #[error("failed to open journal device: {0}")]
    Open(#[source] io::Error),
    #[error("failed to read journal header: {0}")]
    HeaderRead(#[source] io::Error),
    #[error("failed to persist journal header")]
    HeaderPersist,
    #[error("slot write failed: {0}")]
    Io(#[from] io::Error),
}

/// Circular-log writer owning the raw device handle.
pub struct RawWriter {
    path: PathBuf,
    status: Arc<DeviceStatus>,
    inner: Mutex<Inner>,
}

struct Inner {
    file: Option<File>,
    /// One-shot latch: the validation scan has run this process. Cleared
    /// again when a call observes an invalid header.
    validated: bool,
}

impl RawWriter {
    pub fn new(path: impl Into<PathBuf>, status: Arc<DeviceStatus>) -> Self {
        Self {
            path: path.into(),
            status,
            inner: Mutex::new(Inner {
                file: None,
                validated: false,
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a batch of payloads and persist the updated header.
    ///
    /// All-or-nothing at batch granularity: any slot failure fails the
    /// whole call and the caller accounts the batch as dropped. A header
    /// persist failure after the slots are written is only logged: the
    /// entries are on the device and the next validation pass reconciles
    /// the lagging pointer.
    pub fn write_batch(&self, batch: &[PayloadBytes]) -> Result<(), WriteError> {
        if batch.is_empty() {
            return Ok(());
        }

        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if !inner.validated {
            inner.validated = true;
            self.report_validation();
        }

        let header_was_reset = {
            let file = inner.ensure_file(&self.path)?;
            let (mut start, mut end, reset) = read_indices(file)?;

            for payload in batch {
                let next = (end + 1) % NUM_ENTRIES;
                if next == start {
                    start = (start + 1) % NUM_ENTRIES;
                }
                let slot = entry::encode_slot(payload);
                file.write_all_at(&slot, index_to_offset(end))?;
                end = next;
            }

            if !persist_header(file, start, end) {
                warn!(
                    entries = batch.len(),
                    "header persist failed after batch; entries remain on device"
                );
            }
            debug!(entries = batch.len(), start, end, "wrote batch to device");
            reset
        };

        if header_was_reset {
            inner.validated = false;
        }
        Ok(())
    }

    /// Write one payload durably: slot, fsync, header, fsync.
    ///
    /// Refused until the readiness monitor has marked the device up.
    pub fn write_sync(&self, payload: &PayloadBytes) -> Result<(), WriteError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if !self.status.is_ready() {
            return Err(WriteError::NotReady);
        }
        if !inner.validated {
            inner.validated = true;
            self.report_validation();
        }

        let header_was_reset = {
            let file = inner.ensure_file(&self.path)?;
            let (mut start, end, reset) = read_indices(file)?;

            let slot = entry::encode_slot(payload);
            file.write_all_at(&slot, index_to_offset(end))?;
            file.sync_all()?;

            let next = (end + 1) % NUM_ENTRIES;
            if next == start {
                start = (start + 1) % NUM_ENTRIES;
            }
            if !persist_header(file, start, next) {
                return Err(WriteError::HeaderPersist);
            }
            reset
        };

        if header_was_reset {
            inner.validated = false;
        }
        Ok(())
    }

    /// Log the outcome of a full validation scan over the device.
    fn report_validation(&self) {
        match replay::validate(&self.path) {
            Ok(report) => info!(
                entries = report.entries,
                warnings = report.warnings,
                "journal validation scan complete"
            ),
            Err(e) => warn!(error = %e, "journal validation scan failed"),
        }
    }
}

impl Inner {
    /// Hand out the cached device handle, reopening it lazily. A handle
    /// that no longer answers fstat is treated as stale and replaced.
    fn ensure_file(&mut self, path: &Path) -> Result<&File, WriteError> {
        let stale = self.file.as_ref().is_some_and(|f| f.metadata().is_err());
        if stale {
            debug!("cached device handle went stale, reopening");
            self.file = None;
        }
        if self.file.is_none() {
            self.file = Some(device::open_rw(path).map_err(WriteError::Open)?);
        }
        match &self.file {
            Some(file) => Ok(file),
            None => Err(WriteError::Open(io::Error::other(
                "device handle unavailable",
            ))),
        }
    }
}

/// Read the live `(start, end)` window from the device header.
///
/// A short read or a header that fails validation resets the window to
/// `(0, 0)`: the log is treated as empty but the device stays usable. Any
/// other read error aborts the caller. The third element reports whether a
/// reset happened.
fn read_indices(file: &File) -> Result<(u64, u64, bool), WriteError> {
    let mut buf = [0u8; HEADER_SIZE];
    match file.read_exact_at(&mut buf, 0) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
            debug!("short header read; starting from empty indices");
            return Ok((0, 0, true));
        }
        Err(e) => return Err(WriteError::HeaderRead(e)),
    }

    match Header::decode(&buf) {
        Ok(header) => Ok((header.start_index, header.end_index, false)),
        Err(e) => {
            if !Header::is_blank(&buf) {
                warn!(error = %e, "journal header failed validation; resetting indices");
            }
            Ok((0, 0, true))
        }
    }
}

/// Persist a fresh header for the given window, retrying a bounded number
/// of times with fsync on success.
fn persist_header(file: &File, start: u64, end: u64) -> bool {
    let buf = Header::new(start, end).encode();
    let mut attempts_left = HEADER_PERSIST_ATTEMPTS;
    while attempts_left > 0 {
        attempts_left -= 1;
        match file.write_all_at(&buf, 0).and_then(|_| file.sync_all()) {
            Ok(()) => return true,
            Err(e) => {
                warn!(attempts_left, error = %e, "journal header write failed, retrying");
                thread::sleep(HEADER_RETRY_PAUSE);
            }
        }
    }
    false
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
