// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::layout::ENTRY_SIZE;
use crate::payload::Payload;

fn encoded_payload(tx_id: u64) -> PayloadBytes {
    let mut payload = Payload {
        tx_id,
        timestamp_ms: 1000,
        ino: 7,
        ..Payload::default()
    };
    payload.set_action("create");
    payload.encode()
}

#[test]
fn slot_round_trip_returns_payload_bytes() {
    let payload = encoded_payload(1);
    let slot = encode_slot(&payload);

    assert_eq!(slot.len(), ENTRY_SIZE);
    assert_eq!(validate_slot(&slot).unwrap(), &payload[..]);
}

#[test]
fn padding_between_payload_and_crc_is_zero() {
    let slot = encode_slot(&encoded_payload(1));
    assert!(slot[PAYLOAD_OFFSET + PAYLOAD_SIZE..ENTRY_SIZE - 4]
        .iter()
        .all(|&b| b == 0));
}

#[test]
fn corrupt_payload_byte_fails_checksum() {
    let mut slot = encode_slot(&encoded_payload(1));
    slot[PAYLOAD_OFFSET + 10] ^= 0x01;
    assert!(matches!(
        validate_slot(&slot),
        Err(EntryError::Checksum { .. })
    ));
}

#[test]
fn corrupt_padding_does_not_affect_the_checksum() {
    // The CRC covers the payload only; stray bytes in the padding are
    // invisible to validation.
    let payload = encoded_payload(1);
    let mut slot = encode_slot(&payload);
    slot[ENTRY_SIZE - 8] = 0xAB;
    assert_eq!(validate_slot(&slot).unwrap(), &payload[..]);
}

#[test]
fn bad_magic_is_rejected() {
    let mut slot = encode_slot(&encoded_payload(1));
    slot[0..4].copy_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
    assert_eq!(validate_slot(&slot), Err(EntryError::BadMagic(0xDEAD_BEEF)));
}

#[test]
fn bad_version_is_rejected() {
    let mut slot = encode_slot(&encoded_payload(1));
    slot[4..8].copy_from_slice(&7u32.to_le_bytes());
    assert_eq!(validate_slot(&slot), Err(EntryError::BadVersion(7)));
}

#[test]
fn all_zero_slot_is_rejected_as_bad_magic() {
    let slot = [0u8; ENTRY_SIZE];
    assert_eq!(validate_slot(&slot), Err(EntryError::BadMagic(0)));
}
