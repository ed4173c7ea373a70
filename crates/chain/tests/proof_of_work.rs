//! Proof-of-work checks against the Bitcoin genesis block.

use chain::{Compact, ContainerSource, PowError, check_proof_of_work, header_hash};
use std::io::Read;

const GENESIS_HEADER: &str = "0100000000000000000000000000000000000000000000000000000000000000\
                              000000003ba3edfd7a7b12b27ac72c3e67768f617fc81bc3888a51323a9fb8aa\
                              4b1e5e4a29ab5f49ffff001d1dac2b7c";

const GENESIS_HASH: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";

fn from_hex(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn genesis() -> Vec<u8> {
    let header = from_hex(GENESIS_HEADER);
    assert_eq!(header.len(), 80);
    header
}

fn bits_of(header: &[u8]) -> u32 {
    let mut source = ContainerSource::new(header);
    let mut skip = [0u8; 72];
    source.read_exact(&mut skip).unwrap();
    let mut bits = [0u8; 4];
    source.read_exact(&mut bits).unwrap();
    u32::from_le_bytes(bits)
}

#[test]
fn genesis_hash_matches() {
    let mut hash = header_hash(&genesis());
    hash.reverse();
    assert_eq!(to_hex(&hash), GENESIS_HASH);
}

#[test]
fn genesis_meets_its_target() {
    let header = genesis();
    let bits = bits_of(&header);
    assert_eq!(bits, 0x1d00_ffff);
    assert_eq!(Compact::from_bits(bits).normal(), bits);
    assert_eq!(check_proof_of_work(&header, bits), Ok(()));
}

#[test]
fn tampered_nonce_fails() {
    let mut header = genesis();
    header[79] ^= 0x01;
    assert!(matches!(
        check_proof_of_work(&header, 0x1d00_ffff),
        Err(PowError::AboveTarget { .. })
    ));
}

#[test]
fn unusable_targets_are_rejected() {
    let header = genesis();
    assert!(matches!(
        check_proof_of_work(&header, 0x0492_3456),
        Err(PowError::InvalidTarget(_))
    ));
    assert_eq!(check_proof_of_work(&header, 0), Err(PowError::ZeroTarget));
}
