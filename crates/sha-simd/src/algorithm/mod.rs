//! Algorithm variants.
//!
//! Each variant fixes four orthogonal parameters: word width, round count,
//! state length and block length. The compression routines are written once
//! against [`Algorithm`] and a [`LaneWord`]; lane width is the fifth parameter
//! and is picked by the backend at runtime.

use std::fmt;
use std::hash::Hash;

use crate::word::{LaneWord, Word};

pub mod sha1;
pub mod sha2;

pub use sha1::Sha1;
pub use sha2::{Sha256, Sha512};

/// Longest round sequence of any variant.
pub const MAX_ROUNDS: usize = 80;

/// Message schedule for one block (or one block per lane).
///
/// Only the first [`Algorithm::ROUNDS`] entries are meaningful.
pub type Buffer<V> = [V; MAX_ROUNDS];

/// A hash variant of the SHA-1/SHA-2 family.
pub trait Algorithm: Copy + Default + fmt::Debug + Send + Sync + 'static {
    /// Native word.
    type Word: Word;

    /// Chaining state made of lane words.
    type State<V: LaneWord<Scalar = Self::Word>>: AsRef<[V]> + AsMut<[V]> + Copy + Send + Sync;

    /// One message block.
    type Block: AsRef<[u8]> + AsMut<[u8]> + Copy + Eq + Hash + fmt::Debug + Send + Sync;

    /// Serialized digest.
    type Digest: AsRef<[u8]> + AsMut<[u8]> + Copy + Eq + Ord + Hash + fmt::Debug + Send + Sync;

    const NAME: &'static str;
    const ROUNDS: usize;
    const STATE_WORDS: usize;
    const BLOCK_BYTES: usize;
    const DIGEST_BYTES: usize;

    /// Round constants, one per round.
    const K: &'static [Self::Word];

    /// Initial chaining value.
    const H: &'static [Self::Word];

    const ZERO_BLOCK: Self::Block;
    const ZERO_DIGEST: Self::Digest;

    /// Prepared schedule of the padding block that follows exactly one
    /// message block.
    const PAD_ONE: Buffer<Self::Word>;

    /// Builds a state from one lane word per position.
    fn state_from_fn<V, F>(f: F) -> Self::State<V>
    where
        V: LaneWord<Scalar = Self::Word>,
        F: FnMut(usize) -> V;

    /// Schedule word `index` (at least 16) from the words before it.
    fn expand_word<V: LaneWord<Scalar = Self::Word>>(buffer: &Buffer<V>, index: usize) -> V;

    /// Runs every round over `state` using a schedule with constants fused in.
    ///
    /// The feed-forward addition is not part of this step.
    fn rounds<V: LaneWord<Scalar = Self::Word>>(state: &mut Self::State<V>, buffer: &Buffer<V>);

    /// Hashes `data` on the portable `const fn` path.
    fn reference_hash(data: &[u8]) -> Self::Digest;
}

/// Variants whose digest is exactly half a block.
///
/// A digest can then be re-hashed as a chunk, and two digests fill one block.
/// Double hashing and Merkle reduction are only defined for these variants.
pub trait Chunked: Algorithm {
    /// Words filling the second half of a block whose first half is a digest:
    /// the `0x80` marker, zeros, and the half-block bit length.
    const PAD_HALF: &'static [Self::Word];
}

/// Padding schedule for a message of exactly `N` whole blocks, evaluated at
/// compile time for each `N` in use.
pub trait PaddedBlocks<const N: usize>: Algorithm {
    const PAD_SCHEDULE: Buffer<Self::Word>;
}

/// Initial chaining value broadcast to every lane.
#[inline(always)]
pub fn initial_state<A: Algorithm, V: LaneWord<Scalar = A::Word>>() -> A::State<V> {
    A::state_from_fn(|i| V::splat(A::H[i]))
}

/// Runs one compression: rounds followed by the feed-forward addition.
#[inline(always)]
pub fn compress<A: Algorithm, V: LaneWord<Scalar = A::Word>>(
    state: &mut A::State<V>,
    buffer: &Buffer<V>,
) {
    let mut work = *state;
    A::rounds(&mut work, buffer);
    for (chain, mixed) in state.as_mut().iter_mut().zip(work.as_ref()) {
        *chain = chain.add(*mixed);
    }
}
