// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::layout::{HEADER_SIZE, NUM_ENTRIES};
use yare::parameterized;

#[test]
fn encode_decode_round_trip() {
    let header = Header::new(5, 1200);
    assert_eq!(Header::decode(&header.encode()), Ok(header));
}

#[test]
fn empty_header_round_trips() {
    let header = Header::empty();
    let decoded = Header::decode(&header.encode()).unwrap();
    assert_eq!(decoded.start_index, 0);
    assert_eq!(decoded.end_index, 0);
    assert_eq!(decoded.entry_count(), 0);
}

#[test]
fn blank_buffer_is_detected() {
    assert!(Header::is_blank(&[0u8; HEADER_SIZE]));
    assert!(!Header::is_blank(&Header::empty().encode()));
}

#[test]
fn corrupted_byte_fails_checksum() {
    let mut buf = Header::new(1, 2).encode();
    buf[9] ^= 0xff;
    assert!(matches!(
        Header::decode(&buf),
        Err(HeaderError::Checksum { .. })
    ));
}

#[test]
fn bad_magic_is_rejected() {
    let mut buf = Header::new(1, 2).encode();
    buf[0] = 0;
    assert_eq!(Header::decode(&buf), Err(HeaderError::BadMagic(0x4A4E_4C00)));
}

#[test]
fn bad_version_is_rejected() {
    let mut buf = Header::new(1, 2).encode();
    buf[4] = 9;
    assert_eq!(Header::decode(&buf), Err(HeaderError::BadVersion(9)));
}

#[parameterized(
    start_out_of_range = { NUM_ENTRIES, 0 },
    end_out_of_range = { 0, NUM_ENTRIES },
    both_out_of_range = { u64::MAX, u64::MAX },
)]
fn out_of_range_indices_are_rejected(start: u64, end: u64) {
    let buf = Header::new(start, end).encode();
    assert_eq!(
        Header::decode(&buf),
        Err(HeaderError::IndexOutOfRange { start, end })
    );
}

#[parameterized(
    empty = { 0, 0, 0 },
    simple = { 0, 5, 5 },
    wrapped = { 2040, 3, 10 },
    full_window = { 3, 2, NUM_ENTRIES - 1 },
)]
fn entry_count_handles_wrap(start: u64, end: u64, expected: u64) {
    assert_eq!(Header::new(start, end).entry_count(), expected);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_in_range_header_round_trips(
            start in 0..NUM_ENTRIES,
            end in 0..NUM_ENTRIES,
        ) {
            let header = Header::new(start, end);
            prop_assert_eq!(Header::decode(&header.encode()), Ok(header));
        }

        #[test]
        fn single_bit_flips_never_validate(
            start in 0..NUM_ENTRIES,
            end in 0..NUM_ENTRIES,
            byte in 0..HEADER_SIZE,
            bit in 0u8..8,
        ) {
            let header = Header::new(start, end);
            let mut buf = header.encode();
            buf[byte] ^= 1 << bit;
            prop_assert_ne!(Header::decode(&buf), Ok(header));
        }
    }
}
