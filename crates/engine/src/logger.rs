// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Payload construction for `log_metadata`.
//!
//! This is the hot path called from filesystem operations: stamp a tx id
//! and timestamp, snapshot the node's stat fields, apply the caller's
//! overrides, and hand the encoded payload to the sync or async path.
//! Failures never propagate; they are counted, traced, and reported as a
//! plain `false`.

use mdj_core::clock::Clock;
use mdj_core::event::{Durability, EventInfo, JournalNode};
use mdj_core::payload::Payload;
use tracing::{debug, warn};

use crate::journal::Shared;

/// Wall-clock sanity window for node timestamps, in seconds
/// (2000-01-01 .. 2100-01-01). Values outside it are recorded as -1.
const MIN_REASONABLE_SECS: i64 = 946_684_800;
const MAX_REASONABLE_SECS: i64 = 4_102_444_800;

pub(crate) fn log_metadata<C: Clock>(
    shared: &Shared<C>,
    node: &impl JournalNode,
    info: &EventInfo<'_>,
    durability: Durability,
) -> bool {
    let stat = node.stat();
    if shared.config.ignored_inodes.contains(&stat.ino) {
        debug!(ino = stat.ino, "event suppressed by ignore set");
        return true;
    }

    let mut payload = Payload {
        tx_id: shared.tx_ids.next(),
        timestamp_ms: shared.clock.now_ms(),
        parent_ino: info.parent_ino,
        src_parent_ino: info.src_parent_ino,
        dst_parent_ino: info.dst_parent_ino,
        ino: stat.ino,
        st_mode: stat.mode,
        st_size: stat.size,
        st_nlink: stat.nlink,
        st_blocks: stat.blocks,
        mtime: clamp_time(stat.mtime),
        ctime: clamp_time(stat.ctime),
        ..Payload::default()
    };

    if let Some(mode) = info.mode {
        payload.st_mode = mode;
        payload.has_mode = true;
    }
    if let Some(size) = info.size {
        payload.st_size = size;
        payload.has_size = true;
    }
    if let Some(uid) = info.uid {
        payload.uid = uid;
        payload.has_uid = true;
    }
    if let Some(gid) = info.gid {
        payload.gid = gid;
        payload.has_gid = true;
    }

    payload.set_action(info.action);
    payload.set_name(info.name);
    payload.set_old_name(info.old_name);
    payload.set_new_name(info.new_name);
    payload.set_target(info.target);
    payload.set_extra(info.extra);

    let encoded = payload.encode();
    match durability {
        Durability::Sync if shared.status.is_ready() => {
            match shared.writer.write_sync(&encoded) {
                Ok(()) => true,
                Err(e) => {
                    shared.dropped.add(1);
                    warn!(tx_id = payload.tx_id, error = %e, "synchronous journal write failed");
                    false
                }
            }
        }
        _ => match shared.queue.enqueue(&encoded) {
            Ok(()) => true,
            Err(e) => {
                shared.dropped.add(1);
                warn!(tx_id = payload.tx_id, error = %e, "journal enqueue rejected");
                false
            }
        },
    }
}

/// Keep a node timestamp only if it falls in the sanity window.
fn clamp_time(secs: i64) -> i64 {
    if secs > MIN_REASONABLE_SECS && secs < MAX_REASONABLE_SECS {
        secs
    } else {
        -1
    }
}

#[cfg(test)]
#[path = "logger_tests.rs"]
mod tests;
