// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::device;
use crate::writer::RawWriter;
use mdj_core::layout::RESERVED;
use mdj_core::payload::PayloadBytes;
use mdj_core::state::DeviceStatus;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

fn temp_device() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("journal.dev");
    device::create(&path).unwrap();
    (dir, path)
}

fn payload(tx_id: u64, timestamp_ms: u64) -> PayloadBytes {
    let mut p = Payload {
        tx_id,
        timestamp_ms,
        ino: 10,
        ..Payload::default()
    };
    p.set_action("create");
    p.set_name("file");
    p.encode()
}

fn write_batch(path: &Path, batch: &[PayloadBytes]) {
    let writer = RawWriter::new(path, Arc::new(DeviceStatus::new()));
    writer.write_batch(batch).unwrap();
}

#[test]
fn fresh_device_replays_empty() {
    let (_dir, path) = temp_device();
    assert!(replay(&path).unwrap().is_empty());
    assert_eq!(
        validate(&path).unwrap(),
        ValidationReport {
            entries: 0,
            warnings: 0
        }
    );
}

#[test]
fn missing_device_fails_to_open() {
    let dir = TempDir::new().unwrap();
    let result = replay(&dir.path().join("missing.dev"));
    assert!(matches!(result, Err(ReplayError::Open(_))));
}

#[test]
fn zero_length_file_fails_the_header_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.dev");
    std::fs::File::create(&path).unwrap();

    assert!(matches!(replay(&path), Err(ReplayError::HeaderRead(_))));
}

#[test]
fn events_sort_by_timestamp_with_tx_tiebreak() {
    let (_dir, path) = temp_device();
    write_batch(
        &path,
        &[payload(1, 100), payload(2, 200), payload(3, 150)],
    );

    let events = replay(&path).unwrap();
    let order: Vec<_> = events.iter().map(|e| (e.tx_id, e.timestamp_ms)).collect();
    assert_eq!(order, vec![(1, 100), (3, 150), (2, 200)]);
}

#[test]
fn equal_timestamps_order_by_tx_id() {
    let (_dir, path) = temp_device();
    write_batch(&path, &[payload(2, 100), payload(1, 100)]);

    let events = replay(&path).unwrap();
    let tx_ids: Vec<_> = events.iter().map(|e| e.tx_id).collect();
    assert_eq!(tx_ids, vec![1, 2]);
}

#[test]
fn corrupt_payload_in_slot_zero_aborts_the_scan() {
    let (_dir, path) = temp_device();
    write_batch(
        &path,
        &[payload(1, 100), payload(2, 200), payload(3, 300)],
    );

    let file = device::open_rw(&path).unwrap();
    file.write_all_at(&[0xFF], RESERVED + 100).unwrap();

    assert!(matches!(
        replay(&path),
        Err(ReplayError::Slot {
            index: 0,
            source: EntryError::Checksum { .. }
        })
    ));
}

#[test]
fn corruption_later_in_the_window_reports_its_slot() {
    let (_dir, path) = temp_device();
    write_batch(&path, &[payload(1, 100), payload(2, 200)]);

    let file = device::open_rw(&path).unwrap();
    let slot1 = index_to_offset(1);
    file.write_all_at(&[0xFF], slot1 + 100).unwrap();

    assert!(matches!(replay(&path), Err(ReplayError::Slot { index: 1, .. })));
}

#[test]
fn wrong_slot_version_aborts_the_scan() {
    let (_dir, path) = temp_device();
    write_batch(&path, &[payload(1, 100)]);

    let file = device::open_rw(&path).unwrap();
    file.write_all_at(&9u32.to_le_bytes(), RESERVED + 4).unwrap();

    assert!(matches!(
        replay(&path),
        Err(ReplayError::Slot {
            index: 0,
            source: EntryError::BadVersion(9)
        })
    ));
}

#[test]
fn corrupt_header_is_an_error() {
    let (_dir, path) = temp_device();
    write_batch(&path, &[payload(1, 100)]);

    let file = device::open_rw(&path).unwrap();
    file.write_all_at(&[0xFF], 9).unwrap();

    assert!(matches!(
        replay(&path),
        Err(ReplayError::Header(HeaderError::Checksum { .. }))
    ));
}

#[test]
fn empty_action_aborts_the_scan() {
    let (_dir, path) = temp_device();
    let mut p = Payload {
        tx_id: 1,
        timestamp_ms: 100,
        ino: 10,
        ..Payload::default()
    };
    p.set_name("file");
    write_batch(&path, &[p.encode()]);

    assert!(matches!(
        replay(&path),
        Err(ReplayError::EmptyAction { index: 0, tx_id: 1 })
    ));
}

#[test]
fn zero_inode_aborts_the_scan() {
    let (_dir, path) = temp_device();
    let mut p = Payload {
        tx_id: 1,
        timestamp_ms: 100,
        ino: 0,
        ..Payload::default()
    };
    p.set_action("create");
    write_batch(&path, &[p.encode()]);

    assert!(matches!(
        replay(&path),
        Err(ReplayError::ZeroInode { index: 0, tx_id: 1 })
    ));
}

#[test]
fn decreasing_timestamp_is_always_fatal() {
    let (_dir, path) = temp_device();
    write_batch(&path, &[payload(1, 200), payload(2, 100)]);

    assert!(matches!(
        replay(&path),
        Err(ReplayError::DecreasingTimestamp {
            index: 1,
            current: 100,
            previous: 200
        })
    ));
}

#[test]
fn large_skew_with_stale_tx_is_fatal() {
    let (_dir, path) = temp_device();
    write_batch(&path, &[payload(5, 100), payload(3, 20_000)]);

    assert!(matches!(
        replay(&path),
        Err(ReplayError::TimestampSkew {
            index: 1,
            tx_id: 3,
            previous_tx: 5
        })
    ));
}

#[test]
fn small_skew_with_stale_tx_warns_and_continues() {
    let (_dir, path) = temp_device();
    write_batch(&path, &[payload(5, 100), payload(3, 150)]);

    let report = validate(&path).unwrap();
    assert_eq!(report.entries, 2);
    assert_eq!(report.warnings, 1);

    // Replay still succeeds and recovers the timestamp order.
    let tx_ids: Vec<_> = replay(&path).unwrap().iter().map(|e| e.tx_id).collect();
    assert_eq!(tx_ids, vec![5, 3]);
}

#[test]
fn window_past_the_end_of_the_file_is_a_short_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("truncated.dev");

    // A device holding the header region and a single slot, with a header
    // window claiming two entries.
    let file = std::fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .unwrap();
    file.set_len(RESERVED + mdj_core::layout::ENTRY_SIZE as u64)
        .unwrap();
    file.write_all_at(&Header::new(0, 2).encode(), 0).unwrap();
    file.write_all_at(&entry::encode_slot(&payload(1, 100)), RESERVED)
        .unwrap();

    assert!(matches!(replay(&path), Err(ReplayError::ShortRead { index: 1 })));
}
