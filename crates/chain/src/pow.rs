//! Proof-of-work check for block headers.

use sha_simd::{Sha256, double_hash};

use crate::compact::{self, CompactError};
use crate::uint256::Uint256;

/// Reasons a header fails the proof-of-work check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PowError {
    /// The header's target field cannot be decoded.
    #[error("invalid target: {0}")]
    InvalidTarget(#[from] CompactError),

    /// The target decodes to zero, which no hash can meet.
    #[error("target is zero")]
    ZeroTarget,

    /// The header hash is numerically above the target.
    #[error("header hash {hash} exceeds target {target}")]
    AboveTarget {
        /// Header hash as a number.
        hash: Uint256,
        /// Decoded target.
        target: Uint256,
    },
}

/// Double SHA-256 of a serialized header, in digest byte order.
pub fn header_hash(header: &[u8]) -> [u8; 32] {
    double_hash::<Sha256>(header)
}

/// Checks that `header` hashes at or below the target encoded in `bits`.
///
/// The digest is read as a little-endian 256-bit number.
pub fn check_proof_of_work(header: &[u8], bits: u32) -> Result<(), PowError> {
    let target = compact::decode(bits)?;
    if target.is_zero() {
        return Err(PowError::ZeroTarget);
    }
    let hash = Uint256::from_le_bytes(header_hash(header));
    if hash > target {
        return Err(PowError::AboveTarget { hash, target });
    }
    Ok(())
}
