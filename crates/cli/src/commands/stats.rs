// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mdj stats` - header state and capacity.

use std::fmt;
use std::os::unix::fs::FileExt;
use std::path::Path;

use anyhow::Context;
use mdj_core::header::Header;
use mdj_core::layout::{DEVICE_SIZE, HEADER_SIZE, NUM_ENTRIES};
use serde::Serialize;

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize)]
pub struct StatsView {
    pub start_index: u64,
    pub end_index: u64,
    pub entries: u64,
    /// Usable entry capacity; one slot always stays free as the window
    /// sentinel.
    pub capacity: u64,
    pub device_size: u64,
}

impl fmt::Display for StatsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start {} end {} | {} / {} entries | {} byte device",
            self.start_index, self.end_index, self.entries, self.capacity, self.device_size
        )
    }
}

pub fn handle(device: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let file = std::fs::File::open(device)
        .with_context(|| format!("opening device {}", device.display()))?;

    let mut buf = [0u8; HEADER_SIZE];
    file.read_exact_at(&mut buf, 0)
        .with_context(|| format!("reading header of {}", device.display()))?;

    let header = if Header::is_blank(&buf) {
        Header::empty()
    } else {
        Header::decode(&buf).context("journal header failed validation")?
    };

    output::print(
        &StatsView {
            start_index: header.start_index,
            end_index: header.end_index,
            entries: header.entry_count(),
            capacity: NUM_ENTRIES - 1,
            device_size: DEVICE_SIZE,
        },
        format,
    );
    Ok(())
}
