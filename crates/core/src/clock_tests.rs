// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_reports_recent_time() {
    // 2020-01-01 in epoch milliseconds; anything earlier means the clock is
    // not wall time.
    assert!(SystemClock.now_ms() > 1_577_836_800_000);
}

#[test]
fn fake_clock_starts_where_told() {
    let clock = FakeClock::new(1_000);
    assert_eq!(clock.now_ms(), 1_000);
}

#[test]
fn fake_clock_advances() {
    let clock = FakeClock::new(100);
    clock.advance(50);
    assert_eq!(clock.now_ms(), 150);
}

#[test]
fn fake_clock_set_overrides() {
    let clock = FakeClock::new(100);
    clock.set(42);
    assert_eq!(clock.now_ms(), 42);
}

#[test]
fn fake_clock_clones_share_time() {
    let clock = FakeClock::new(0);
    let other = clock.clone();
    clock.advance(10);
    assert_eq!(other.now_ms(), 10);
}
