//! SHA-1.
//!
//! Only the compression primitives and single-message hashing are exposed for
//! SHA-1. Its digest is not half a block, so it does not implement
//! [`Chunked`](super::Chunked).

use super::{Algorithm, Buffer, PaddedBlocks};
use crate::constants::{SHA1_H, SHA1_K};
use crate::functions::{choice, majority, parity};
use crate::reference;
use crate::word::LaneWord;

/// SHA-1 marker type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Sha1;

/// Runs one twenty-round stage with boolean function `$f`.
macro_rules! stage {
    ($f:ident, $range:expr, $buffer:ident, $a:ident, $b:ident, $c:ident, $d:ident, $e:ident) => {
        for wk in &$buffer[$range] {
            let t = $a.rotl(5).add($f($b, $c, $d)).add($e).add(*wk);
            $e = $d;
            $d = $c;
            $c = $b.rotl(30);
            $b = $a;
            $a = t;
        }
    };
}

impl Algorithm for Sha1 {
    type Word = u32;
    type State<V: LaneWord<Scalar = u32>> = [V; 5];
    type Block = [u8; 64];
    type Digest = [u8; 20];

    const NAME: &'static str = "sha1";
    const ROUNDS: usize = 80;
    const STATE_WORDS: usize = 5;
    const BLOCK_BYTES: usize = 64;
    const DIGEST_BYTES: usize = 20;
    const K: &'static [u32] = &SHA1_K;
    const H: &'static [u32] = &SHA1_H;
    const ZERO_BLOCK: [u8; 64] = [0; 64];
    const ZERO_DIGEST: [u8; 20] = [0; 20];
    const PAD_ONE: Buffer<u32> = reference::sha1::pad_schedule(1);

    #[inline(always)]
    fn state_from_fn<V, F>(mut f: F) -> [V; 5]
    where
        V: LaneWord<Scalar = u32>,
        F: FnMut(usize) -> V,
    {
        [f(0), f(1), f(2), f(3), f(4)]
    }

    #[inline(always)]
    fn expand_word<V: LaneWord<Scalar = u32>>(w: &Buffer<V>, i: usize) -> V {
        w[i - 3].xor(w[i - 8]).xor(w[i - 14]).xor(w[i - 16]).rotl(1)
    }

    #[inline(always)]
    fn rounds<V: LaneWord<Scalar = u32>>(state: &mut [V; 5], buffer: &Buffer<V>) {
        let [mut a, mut b, mut c, mut d, mut e] = *state;
        stage!(choice, 0..20, buffer, a, b, c, d, e);
        stage!(parity, 20..40, buffer, a, b, c, d, e);
        stage!(majority, 40..60, buffer, a, b, c, d, e);
        stage!(parity, 60..80, buffer, a, b, c, d, e);
        *state = [a, b, c, d, e];
    }

    fn reference_hash(data: &[u8]) -> [u8; 20] {
        reference::sha1::hash(data)
    }
}

impl<const N: usize> PaddedBlocks<N> for Sha1 {
    const PAD_SCHEDULE: Buffer<u32> = reference::sha1::pad_schedule(N as u64);
}
