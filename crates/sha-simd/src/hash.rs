//! Hashing entry points for every input shape.
//!
//! Fixed shapes (one block, a half block, a pair of halves, `N` blocks) go
//! straight to the scalar core with their padding schedules precomputed.
//! Arbitrary byte messages go through the global dispatcher, which prepares
//! the schedules of long messages several blocks at a time.
//!
//! Every `double_*` function equals its single-hash twin followed by
//! [`hash_half`] on the digest. The fused forms feed the inner chaining
//! words straight into the second block and skip one serialization.

use crate::algorithm::{Algorithm, Buffer, Chunked, PaddedBlocks, compress, initial_state};
use crate::dispatcher;
use crate::normalize::normalize;
use crate::schedule;
use crate::word::LaneWord;

/// Broadcasts a scalar schedule to every lane.
#[inline(always)]
pub(crate) fn splat_schedule<V: LaneWord>(words: &Buffer<V::Scalar>) -> Buffer<V> {
    words.map(V::splat)
}

/// Chaining state after hashing `block` as a complete one-block message.
#[inline]
pub(crate) fn block_state<A: Algorithm>(block: &A::Block) -> A::State<A::Word> {
    let mut buffer = schedule::load::<A>(block);
    schedule::prepare::<A, A::Word>(&mut buffer);
    let mut state = initial_state::<A, A::Word>();
    compress::<A, A::Word>(&mut state, &buffer);
    compress::<A, A::Word>(&mut state, &A::PAD_ONE);
    state
}

/// Hashes the chaining state `inner` as a half-block message.
///
/// The state words are already the big-endian words of the inner digest, so
/// they become schedule words directly.
#[inline(always)]
pub(crate) fn rehash<A: Chunked, V: LaneWord<Scalar = A::Word>>(inner: &A::State<V>) -> A::State<V> {
    let mut buffer = schedule::empty::<V>();
    buffer[..8].copy_from_slice(inner.as_ref());
    for (slot, word) in buffer[8..16].iter_mut().zip(A::PAD_HALF) {
        *slot = V::splat(*word);
    }
    schedule::prepare::<A, V>(&mut buffer);
    let mut state = initial_state::<A, V>();
    compress::<A, V>(&mut state, &buffer);
    state
}

/// Hashes a message of any length.
pub fn hash<A: Algorithm>(data: &[u8]) -> A::Digest {
    dispatcher::global().digest::<A>(data)
}

/// Hashes one block as a complete message.
pub fn hash_block<A: Algorithm>(block: &A::Block) -> A::Digest {
    normalize::<A>(&block_state::<A>(block))
}

/// Hashes a digest-sized message.
pub fn hash_half<A: Chunked>(half: &A::Digest) -> A::Digest {
    let inner = crate::normalize::denormalize::<A>(half);
    normalize::<A>(&rehash::<A, A::Word>(&inner))
}

/// Hashes the concatenation of two digest-sized halves.
pub fn hash_pair<A: Chunked>(left: &A::Digest, right: &A::Digest) -> A::Digest {
    normalize::<A>(&block_state::<A>(&join::<A>(left, right)))
}

/// Hashes `N` whole blocks as one message, using the padding schedule
/// precomputed for `N`.
pub fn hash_blocks<A, const N: usize>(blocks: &[A::Block; N]) -> A::Digest
where
    A: PaddedBlocks<N>,
{
    normalize::<A>(&blocks_state::<A, N>(blocks))
}

/// Hashes a runtime sequence of whole blocks as one message.
pub fn hash_iter<'a, A, I>(blocks: I) -> A::Digest
where
    A: Algorithm,
    I: IntoIterator<Item = &'a A::Block>,
{
    normalize::<A>(&iter_state::<A, I>(blocks))
}

/// `hash(hash(data))`.
pub fn double_hash<A: Chunked>(data: &[u8]) -> A::Digest {
    let inner = crate::normalize::denormalize::<A>(&hash::<A>(data));
    normalize::<A>(&rehash::<A, A::Word>(&inner))
}

/// `hash(hash(block))` for a one-block message.
pub fn double_hash_block<A: Chunked>(block: &A::Block) -> A::Digest {
    normalize::<A>(&rehash::<A, A::Word>(&block_state::<A>(block)))
}

/// `hash(hash(half))` for a digest-sized message.
pub fn double_hash_half<A: Chunked>(half: &A::Digest) -> A::Digest {
    let inner = crate::normalize::denormalize::<A>(half);
    let once = rehash::<A, A::Word>(&inner);
    normalize::<A>(&rehash::<A, A::Word>(&once))
}

/// `hash(hash(left || right))`, the Merkle node function.
pub fn double_hash_pair<A: Chunked>(left: &A::Digest, right: &A::Digest) -> A::Digest {
    let inner = block_state::<A>(&join::<A>(left, right));
    normalize::<A>(&rehash::<A, A::Word>(&inner))
}

/// `hash(hash(blocks))` for `N` whole blocks.
pub fn double_hash_blocks<A, const N: usize>(blocks: &[A::Block; N]) -> A::Digest
where
    A: Chunked + PaddedBlocks<N>,
{
    normalize::<A>(&rehash::<A, A::Word>(&blocks_state::<A, N>(blocks)))
}

/// `hash(hash(blocks))` for a runtime sequence of whole blocks.
pub fn double_hash_iter<'a, A, I>(blocks: I) -> A::Digest
where
    A: Chunked,
    I: IntoIterator<Item = &'a A::Block>,
{
    normalize::<A>(&rehash::<A, A::Word>(&iter_state::<A, I>(blocks)))
}

pub(crate) fn join<A: Chunked>(left: &A::Digest, right: &A::Digest) -> A::Block {
    let mut block = A::ZERO_BLOCK;
    let (head, tail) = block.as_mut().split_at_mut(A::DIGEST_BYTES);
    head.copy_from_slice(left.as_ref());
    tail.copy_from_slice(right.as_ref());
    block
}

fn blocks_state<A: PaddedBlocks<N>, const N: usize>(blocks: &[A::Block; N]) -> A::State<A::Word> {
    let mut state = initial_state::<A, A::Word>();
    for block in blocks {
        let mut buffer = schedule::load::<A>(block);
        schedule::prepare::<A, A::Word>(&mut buffer);
        compress::<A, A::Word>(&mut state, &buffer);
    }
    compress::<A, A::Word>(&mut state, &<A as PaddedBlocks<N>>::PAD_SCHEDULE);
    state
}

fn iter_state<'a, A, I>(blocks: I) -> A::State<A::Word>
where
    A: Algorithm,
    I: IntoIterator<Item = &'a A::Block>,
{
    let mut state = initial_state::<A, A::Word>();
    let mut count = 0u64;
    for block in blocks {
        let mut buffer = schedule::load::<A>(block);
        schedule::prepare::<A, A::Word>(&mut buffer);
        compress::<A, A::Word>(&mut state, &buffer);
        count += 1;
    }
    compress::<A, A::Word>(&mut state, &schedule::pad_schedule::<A>(count));
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{Sha1, Sha256, Sha512};

    fn pattern<A: Algorithm>(seed: u8) -> A::Block {
        let mut block = A::ZERO_BLOCK;
        for (i, byte) in block.as_mut().iter_mut().enumerate() {
            *byte = seed ^ (i as u8).wrapping_mul(13);
        }
        block
    }

    fn shapes_agree_with_reference<A: Algorithm + PaddedBlocks<3>>() {
        let blocks = [pattern::<A>(1), pattern::<A>(2), pattern::<A>(3)];
        let bytes: Vec<u8> = blocks.iter().flat_map(|b| b.as_ref().to_vec()).collect();

        assert_eq!(hash_block::<A>(&blocks[0]), A::reference_hash(blocks[0].as_ref()));
        assert_eq!(hash_blocks::<A, 3>(&blocks), A::reference_hash(&bytes));
        assert_eq!(hash_iter::<A, _>(&blocks), A::reference_hash(&bytes));
        assert_eq!(hash_iter::<A, _>(std::iter::empty()), A::reference_hash(b""));
        assert_eq!(hash::<A>(&bytes[..77]), A::reference_hash(&bytes[..77]));
    }

    #[test]
    fn every_shape_matches_reference() {
        shapes_agree_with_reference::<Sha1>();
        shapes_agree_with_reference::<Sha256>();
        shapes_agree_with_reference::<Sha512>();
    }

    fn double_equals_composed<A: Chunked + PaddedBlocks<2>>() {
        let blocks = [pattern::<A>(7), pattern::<A>(8)];
        let bytes: Vec<u8> = blocks.iter().flat_map(|b| b.as_ref().to_vec()).collect();
        let twice = |digest: A::Digest| A::reference_hash(digest.as_ref());

        assert_eq!(double_hash::<A>(b"abc"), twice(A::reference_hash(b"abc")));
        assert_eq!(
            double_hash_block::<A>(&blocks[0]),
            hash_half::<A>(&hash_block::<A>(&blocks[0]))
        );
        assert_eq!(double_hash_blocks::<A, 2>(&blocks), twice(A::reference_hash(&bytes)));
        assert_eq!(double_hash_iter::<A, _>(&blocks), twice(A::reference_hash(&bytes)));

        let left = hash_block::<A>(&blocks[0]);
        let right = hash_block::<A>(&blocks[1]);
        let mut joined = left.as_ref().to_vec();
        joined.extend_from_slice(right.as_ref());
        assert_eq!(hash_pair::<A>(&left, &right), A::reference_hash(&joined));
        assert_eq!(double_hash_pair::<A>(&left, &right), twice(A::reference_hash(&joined)));

        assert_eq!(hash_half::<A>(&left), A::reference_hash(left.as_ref()));
        assert_eq!(double_hash_half::<A>(&left), twice(A::reference_hash(left.as_ref())));
    }

    #[test]
    fn fused_double_hash_equals_two_hashes() {
        double_equals_composed::<Sha256>();
        double_equals_composed::<Sha512>();
    }

    #[test]
    fn half_block_length_is_digest_bits() {
        assert_eq!(Sha256::PAD_HALF[7], 256);
        assert_eq!(Sha512::PAD_HALF[7], 512);
    }
}
