// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mdj init` - create the backing device file.

use anyhow::{bail, Context};
use mdj_core::layout::{DEVICE_SIZE, NUM_ENTRIES};
use mdj_storage::device;
use std::path::Path;

pub fn handle(device_path: &Path, force: bool) -> anyhow::Result<()> {
    if device_path.exists() && !force {
        bail!(
            "device {} already exists (use --force to recreate it)",
            device_path.display()
        );
    }

    device::create(device_path)
        .with_context(|| format!("creating device {}", device_path.display()))?;

    println!(
        "created {} ({} bytes, {} entry slots)",
        device_path.display(),
        DEVICE_SIZE,
        NUM_ENTRIES
    );
    Ok(())
}
