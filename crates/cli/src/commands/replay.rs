// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mdj replay` - print the ordered event stream.

use std::fmt;
use std::path::Path;

use anyhow::Context;
use chrono::DateTime;
use mdj_core::payload::Payload;
use mdj_storage::InodeIndex;
use serde::Serialize;

use crate::output::{self, OutputFormat};

/// A replayed event in display form.
#[derive(Debug, Serialize)]
pub struct EventView {
    pub tx_id: u64,
    pub timestamp_ms: u64,
    pub time: String,
    pub ino: u32,
    pub action: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub old_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub new_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub target: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub extra: String,
    pub parent_ino: u32,
    pub mode: u32,
    pub size: u64,
}

impl From<&Payload> for EventView {
    fn from(payload: &Payload) -> Self {
        Self {
            tx_id: payload.tx_id,
            timestamp_ms: payload.timestamp_ms,
            time: format_ms(payload.timestamp_ms),
            ino: payload.ino,
            action: payload.action().into_owned(),
            name: payload.name().into_owned(),
            old_name: payload.old_name().into_owned(),
            new_name: payload.new_name().into_owned(),
            target: payload.target().into_owned(),
            extra: payload.extra().into_owned(),
            parent_ino: payload.parent_ino,
            mode: payload.st_mode,
            size: payload.st_size,
        }
    }
}

impl fmt::Display for EventView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tx {:<6} {} ino {:<8} {:<10} {}",
            self.tx_id, self.time, self.ino, self.action, self.name
        )?;
        if !self.old_name.is_empty() || !self.new_name.is_empty() {
            write!(f, " ({} -> {})", self.old_name, self.new_name)?;
        }
        if !self.extra.is_empty() {
            write!(f, " [{}]", self.extra)?;
        }
        Ok(())
    }
}

fn format_ms(timestamp_ms: u64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms as i64)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S%.3f").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn handle(device: &Path, ino: Option<u32>, format: OutputFormat) -> anyhow::Result<()> {
    let events = mdj_storage::replay(device)
        .with_context(|| format!("replaying journal {}", device.display()))?;

    let views: Vec<EventView> = match ino {
        Some(ino) => {
            let index = InodeIndex::from_events(events);
            index.events_for(ino).iter().map(EventView::from).collect()
        }
        None => events.iter().map(EventView::from).collect(),
    };

    output::print_list(&views, format);
    Ok(())
}
