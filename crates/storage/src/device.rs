// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backing-device helpers.
//!
//! The journal's "device" is a regular file of exactly
//! [`DEVICE_SIZE`](mdj_core::layout::DEVICE_SIZE) bytes standing in for a
//! raw block device. Creation and the readiness probe live here; everything
//! that interprets the contents lives in the writer and replayer.

use mdj_core::layout::DEVICE_SIZE;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::unix::fs::FileExt;
use std::path::Path;
use tracing::debug;

/// Create (or recreate) the backing file, zero-filled to `DEVICE_SIZE`.
pub fn create(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.set_len(DEVICE_SIZE)?;
    file.sync_all()?;
    debug!(device = %path.display(), size = DEVICE_SIZE, "created backing device");
    Ok(())
}

/// Open the device for reading and writing.
pub fn open_rw(path: &Path) -> io::Result<File> {
    OpenOptions::new().read(true).write(true).open(path)
}

/// Open the device read-only, as the replayer does.
pub fn open_ro(path: &Path) -> io::Result<File> {
    File::open(path)
}

/// Readiness probe: the device must open read/write, accept an fsync, and
/// yield at least one byte at offset 0.
pub fn probe(path: &Path) -> bool {
    let Ok(file) = open_rw(path) else {
        return false;
    };
    if file.sync_all().is_err() {
        return false;
    }
    let mut byte = [0u8; 1];
    matches!(file.read_at(&mut byte, 0), Ok(1))
}

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
