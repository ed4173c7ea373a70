//! Round functions shared by the compression cores.
//!
//! The Σ/σ functions are evaluated as nested rotate-xor chains, which keep one
//! live temporary instead of three. The textbook three-rotation forms are kept
//! alongside and must agree for every input.

use crate::word::LaneWord;

/// Rotation amounts of a compression-round Σ function, in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BigSigma {
    pub r1: u32,
    pub r2: u32,
    pub r3: u32,
}

/// Rotation amounts and final shift of a schedule σ function.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SmallSigma {
    pub r1: u32,
    pub r2: u32,
    pub shift: u32,
}

/// `(x & y) ^ (!x & z)`.
#[inline(always)]
pub fn choice<V: LaneWord>(x: V, y: V, z: V) -> V {
    x.and(y).xor(x.andnot(z))
}

/// `x ^ y ^ z`.
#[inline(always)]
pub fn parity<V: LaneWord>(x: V, y: V, z: V) -> V {
    x.xor(y).xor(z)
}

/// `(x & y) ^ (x & z) ^ (y & z)`, evaluated as `(x & y) | (z & (x | y))`.
#[inline(always)]
pub fn majority<V: LaneWord>(x: V, y: V, z: V) -> V {
    x.and(y).or(z.and(x.or(y)))
}

/// Σ as `rotr(rotr(rotr(x, r3 - r2) ^ x, r2 - r1) ^ x, r1)`.
#[inline(always)]
pub fn big_sigma<V: LaneWord>(x: V, s: BigSigma) -> V {
    x.rotr(s.r3 - s.r2).xor(x).rotr(s.r2 - s.r1).xor(x).rotr(s.r1)
}

/// σ as `rotr(rotr(x, r2 - r1) ^ x, r1) ^ (x >> shift)`.
#[inline(always)]
pub fn small_sigma<V: LaneWord>(x: V, s: SmallSigma) -> V {
    x.rotr(s.r2 - s.r1).xor(x).rotr(s.r1).xor(x.shr(s.shift))
}

/// Σ as the published three-rotation xor.
#[inline]
pub fn big_sigma_textbook<V: LaneWord>(x: V, s: BigSigma) -> V {
    x.rotr(s.r1).xor(x.rotr(s.r2)).xor(x.rotr(s.r3))
}

/// σ as the published two-rotation, one-shift xor.
#[inline]
pub fn small_sigma_textbook<V: LaneWord>(x: V, s: SmallSigma) -> V {
    x.rotr(s.r1).xor(x.rotr(s.r2)).xor(x.shr(s.shift))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::sha2::{
        SHA256_BIG0, SHA256_BIG1, SHA256_SMALL0, SHA256_SMALL1, SHA512_BIG0, SHA512_BIG1,
        SHA512_SMALL0, SHA512_SMALL1,
    };

    #[test]
    fn boolean_functions_match_their_definitions() {
        let samples = [0u32, u32::MAX, 0xdead_beef, 0x0123_4567, 0x8000_0001];
        for &x in &samples {
            for &y in &samples {
                for &z in &samples {
                    assert_eq!(choice(x, y, z), (x & y) ^ (!x & z));
                    assert_eq!(parity(x, y, z), x ^ y ^ z);
                    assert_eq!(majority(x, y, z), (x & y) ^ (x & z) ^ (y & z));
                }
            }
        }
    }

    #[test]
    fn chained_sigmas_match_textbook_at_the_extremes() {
        for x in [0u32, u32::MAX, 1, 1 << 31] {
            for s in [SHA256_BIG0, SHA256_BIG1] {
                assert_eq!(big_sigma(x, s), big_sigma_textbook(x, s));
            }
            for s in [SHA256_SMALL0, SHA256_SMALL1] {
                assert_eq!(small_sigma(x, s), small_sigma_textbook(x, s));
            }
        }
        for x in [0u64, u64::MAX, 1, 1 << 63] {
            for s in [SHA512_BIG0, SHA512_BIG1] {
                assert_eq!(big_sigma(x, s), big_sigma_textbook(x, s));
            }
            for s in [SHA512_SMALL0, SHA512_SMALL1] {
                assert_eq!(small_sigma(x, s), small_sigma_textbook(x, s));
            }
        }
    }

    #[test]
    fn sha256_sigma_zero_of_known_value() {
        // rotr2 ^ rotr13 ^ rotr22 of 0x6a09e667.
        let x = 0x6a09_e667u32;
        let expected = x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22);
        assert_eq!(big_sigma(x, SHA256_BIG0), expected);
    }
}
