// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn device_starts_not_ready() {
    assert!(!DeviceStatus::new().is_ready());
}

#[test]
fn set_ready_returns_previous_state() {
    let status = DeviceStatus::new();
    assert!(!status.set_ready(true));
    assert!(status.is_ready());
    assert!(status.set_ready(false));
    assert!(!status.is_ready());
}

#[test]
fn drop_counter_accumulates() {
    let counter = DropCounter::default();
    assert_eq!(counter.get(), 0);
    counter.add(3);
    counter.add(1);
    assert_eq!(counter.get(), 4);
}

#[test]
fn tx_ids_start_at_one_and_increase() {
    let counter = TxCounter::default();
    assert_eq!(counter.next(), 1);
    assert_eq!(counter.next(), 2);
    assert_eq!(counter.next(), 3);
}

#[test]
fn tx_ids_are_unique_across_threads() {
    use std::collections::HashSet;
    use std::sync::Arc;

    let counter = Arc::new(TxCounter::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let counter = Arc::clone(&counter);
            std::thread::spawn(move || (0..250).map(|_| counter.next()).collect::<Vec<_>>())
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(seen.insert(id), "duplicate tx id {id}");
        }
    }
    assert_eq!(seen.len(), 1000);
}
