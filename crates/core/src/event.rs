// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The caller-facing event contract.
//!
//! Filesystem operations describe a metadata mutation with an [`EventInfo`]
//! and hand over the affected node; the journal extracts a [`StatSnapshot`]
//! through the [`JournalNode`] seam. How a host filesystem stores its nodes
//! is outside the journal's concern.

/// Durability requested for one logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    /// Enqueue; the background flusher persists eventually.
    Async,
    /// Persist and fsync before returning to the caller.
    Sync,
}

/// The stat fields the journal snapshots from a filesystem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatSnapshot {
    pub ino: u32,
    pub mode: u32,
    pub size: u64,
    pub nlink: u64,
    pub blocks: u64,
    /// Seconds since the epoch.
    pub mtime: i64,
    /// Seconds since the epoch.
    pub ctime: i64,
}

/// Anything that can hand the journal a stat snapshot.
pub trait JournalNode {
    fn stat(&self) -> StatSnapshot;
}

impl JournalNode for StatSnapshot {
    fn stat(&self) -> StatSnapshot {
        *self
    }
}

/// Descriptor of one metadata mutation.
///
/// `action` names the operation ("create", "unlink", "rename", ...); the
/// name fields and parent inodes apply per action. The `Option` overrides
/// replace the corresponding stat fields and set the matching validity flag
/// in the payload.
#[derive(Debug, Clone, Default)]
pub struct EventInfo<'a> {
    pub action: &'a str,
    pub name: &'a str,
    pub old_name: &'a str,
    pub new_name: &'a str,
    pub target: &'a str,
    pub extra: &'a str,
    pub parent_ino: u32,
    pub src_parent_ino: u32,
    pub dst_parent_ino: u32,
    pub mode: Option<u32>,
    pub size: Option<u64>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
}
