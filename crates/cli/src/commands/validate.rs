// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mdj validate` - run the validation scan.

use std::fmt;
use std::path::Path;

use anyhow::bail;
use serde::Serialize;

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize)]
pub struct ValidationView {
    pub status: &'static str,
    pub entries: u64,
    pub warnings: u64,
}

impl fmt::Display for ValidationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} entries, {} warnings",
            self.status, self.entries, self.warnings
        )
    }
}

pub fn handle(device: &Path, format: OutputFormat) -> anyhow::Result<()> {
    match mdj_storage::validate(device) {
        Ok(report) => {
            output::print(
                &ValidationView {
                    status: "ok",
                    entries: report.entries,
                    warnings: report.warnings,
                },
                format,
            );
            Ok(())
        }
        Err(e) => bail!("journal invalid: {e}"),
    }
}
