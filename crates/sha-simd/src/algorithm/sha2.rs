//! SHA-256 and SHA-512.
//!
//! Both share one round structure and one schedule recurrence; they differ
//! only in word width, round count and rotation amounts.

use super::{Algorithm, Buffer, Chunked, PaddedBlocks};
use crate::constants::{SHA256_H, SHA256_K, SHA512_H, SHA512_K};
use crate::functions::{BigSigma, SmallSigma, big_sigma, choice, majority, small_sigma};
use crate::reference;
use crate::word::LaneWord;

pub const SHA256_BIG0: BigSigma = BigSigma { r1: 2, r2: 13, r3: 22 };
pub const SHA256_BIG1: BigSigma = BigSigma { r1: 6, r2: 11, r3: 25 };
pub const SHA256_SMALL0: SmallSigma = SmallSigma { r1: 7, r2: 18, shift: 3 };
pub const SHA256_SMALL1: SmallSigma = SmallSigma { r1: 17, r2: 19, shift: 10 };

pub const SHA512_BIG0: BigSigma = BigSigma { r1: 28, r2: 34, r3: 39 };
pub const SHA512_BIG1: BigSigma = BigSigma { r1: 14, r2: 18, r3: 41 };
pub const SHA512_SMALL0: SmallSigma = SmallSigma { r1: 1, r2: 8, shift: 7 };
pub const SHA512_SMALL1: SmallSigma = SmallSigma { r1: 19, r2: 61, shift: 6 };

#[inline(always)]
fn expand_word<V: LaneWord>(w: &Buffer<V>, i: usize, s0: SmallSigma, s1: SmallSigma) -> V {
    small_sigma(w[i - 2], s1)
        .add(w[i - 7])
        .add(small_sigma(w[i - 15], s0))
        .add(w[i - 16])
}

#[inline(always)]
fn rounds<V: LaneWord>(
    state: &mut [V; 8],
    buffer: &Buffer<V>,
    count: usize,
    big0: BigSigma,
    big1: BigSigma,
) {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;
    for wk in &buffer[..count] {
        let t1 = h
            .add(big_sigma(e, big1))
            .add(choice(e, f, g))
            .add(*wk);
        let t2 = big_sigma(a, big0).add(majority(a, b, c));
        h = g;
        g = f;
        f = e;
        e = d.add(t1);
        d = c;
        c = b;
        b = a;
        a = t1.add(t2);
    }
    *state = [a, b, c, d, e, f, g, h];
}

/// Half-block pad words: marker, zeros, and the bit length of a digest.
const fn half_pad<W: Copy>(marker: W, zero: W, bits: W) -> [W; 8] {
    [marker, zero, zero, zero, zero, zero, zero, bits]
}

/// SHA-256 marker type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sha256;

/// SHA-512 marker type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sha512;

const SHA256_PAD_HALF: [u32; 8] = half_pad(0x8000_0000, 0, 256);
const SHA512_PAD_HALF: [u64; 8] = half_pad(0x8000_0000_0000_0000, 0, 512);

impl Algorithm for Sha256 {
    type Word = u32;
    type State<V: LaneWord<Scalar = u32>> = [V; 8];
    type Block = [u8; 64];
    type Digest = [u8; 32];

    const NAME: &'static str = "sha256";
    const ROUNDS: usize = 64;
    const STATE_WORDS: usize = 8;
    const BLOCK_BYTES: usize = 64;
    const DIGEST_BYTES: usize = 32;
    const K: &'static [u32] = &SHA256_K;
    const H: &'static [u32] = &SHA256_H;
    const ZERO_BLOCK: [u8; 64] = [0; 64];
    const ZERO_DIGEST: [u8; 32] = [0; 32];
    const PAD_ONE: Buffer<u32> = reference::sha256::pad_schedule(1);

    #[inline(always)]
    fn state_from_fn<V, F>(mut f: F) -> [V; 8]
    where
        V: LaneWord<Scalar = u32>,
        F: FnMut(usize) -> V,
    {
        [f(0), f(1), f(2), f(3), f(4), f(5), f(6), f(7)]
    }

    #[inline(always)]
    fn expand_word<V: LaneWord<Scalar = u32>>(buffer: &Buffer<V>, index: usize) -> V {
        expand_word(buffer, index, SHA256_SMALL0, SHA256_SMALL1)
    }

    #[inline(always)]
    fn rounds<V: LaneWord<Scalar = u32>>(state: &mut [V; 8], buffer: &Buffer<V>) {
        rounds(state, buffer, Self::ROUNDS, SHA256_BIG0, SHA256_BIG1);
    }

    fn reference_hash(data: &[u8]) -> [u8; 32] {
        reference::sha256::hash(data)
    }
}

impl Chunked for Sha256 {
    const PAD_HALF: &'static [u32] = &SHA256_PAD_HALF;
}

impl<const N: usize> PaddedBlocks<N> for Sha256 {
    const PAD_SCHEDULE: Buffer<u32> = reference::sha256::pad_schedule(N as u64);
}

impl Algorithm for Sha512 {
    type Word = u64;
    type State<V: LaneWord<Scalar = u64>> = [V; 8];
    type Block = [u8; 128];
    type Digest = [u8; 64];

    const NAME: &'static str = "sha512";
    const ROUNDS: usize = 80;
    const STATE_WORDS: usize = 8;
    const BLOCK_BYTES: usize = 128;
    const DIGEST_BYTES: usize = 64;
    const K: &'static [u64] = &SHA512_K;
    const H: &'static [u64] = &SHA512_H;
    const ZERO_BLOCK: [u8; 128] = [0; 128];
    const ZERO_DIGEST: [u8; 64] = [0; 64];
    const PAD_ONE: Buffer<u64> = reference::sha512::pad_schedule(1);

    #[inline(always)]
    fn state_from_fn<V, F>(mut f: F) -> [V; 8]
    where
        V: LaneWord<Scalar = u64>,
        F: FnMut(usize) -> V,
    {
        [f(0), f(1), f(2), f(3), f(4), f(5), f(6), f(7)]
    }

    #[inline(always)]
    fn expand_word<V: LaneWord<Scalar = u64>>(buffer: &Buffer<V>, index: usize) -> V {
        expand_word(buffer, index, SHA512_SMALL0, SHA512_SMALL1)
    }

    #[inline(always)]
    fn rounds<V: LaneWord<Scalar = u64>>(state: &mut [V; 8], buffer: &Buffer<V>) {
        rounds(state, buffer, Self::ROUNDS, SHA512_BIG0, SHA512_BIG1);
    }

    fn reference_hash(data: &[u8]) -> [u8; 64] {
        reference::sha512::hash(data)
    }
}

impl Chunked for Sha512 {
    const PAD_HALF: &'static [u64] = &SHA512_PAD_HALF;
}

impl<const N: usize> PaddedBlocks<N> for Sha512 {
    const PAD_SCHEDULE: Buffer<u64> = reference::sha512::pad_schedule(N as u64);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{big_sigma_textbook, small_sigma_textbook};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn sha256_chained_sigmas_match_textbook(x in any::<u32>()) {
            for s in [SHA256_BIG0, SHA256_BIG1] {
                prop_assert_eq!(big_sigma(x, s), big_sigma_textbook(x, s));
            }
            for s in [SHA256_SMALL0, SHA256_SMALL1] {
                prop_assert_eq!(small_sigma(x, s), small_sigma_textbook(x, s));
            }
        }

        #[test]
        fn sha512_chained_sigmas_match_textbook(x in any::<u64>()) {
            for s in [SHA512_BIG0, SHA512_BIG1] {
                prop_assert_eq!(big_sigma(x, s), big_sigma_textbook(x, s));
            }
            for s in [SHA512_SMALL0, SHA512_SMALL1] {
                prop_assert_eq!(small_sigma(x, s), small_sigma_textbook(x, s));
            }
        }
    }

    #[test]
    fn pad_one_is_the_one_block_schedule() {
        assert_eq!(Sha256::PAD_ONE, <Sha256 as PaddedBlocks<1>>::PAD_SCHEDULE);
        assert_eq!(Sha512::PAD_ONE, <Sha512 as PaddedBlocks<1>>::PAD_SCHEDULE);
    }
}
