//! Message schedule preparation.
//!
//! [`prepare`] expands the sixteen block words to the full round count and
//! adds each round constant as soon as the word it belongs to is final. A
//! word `w[i - 16]` is read for the last time while computing `w[i]`, so the
//! constant is folded in right after that step and the recurrence keeps
//! seeing raw words.

use crate::algorithm::{Algorithm, Buffer, MAX_ROUNDS};
use crate::padding;
use crate::word::{LaneWord, Word};

/// Maximum lanes of any backend.
pub(crate) const MAX_LANES: usize = 16;

/// A buffer with every word zero.
#[inline(always)]
pub fn empty<V: LaneWord>() -> Buffer<V> {
    [V::splat(<V::Scalar as Default>::default()); MAX_ROUNDS]
}

/// Loads the sixteen big-endian words of `block`.
#[inline(always)]
pub fn load<A: Algorithm>(block: &A::Block) -> Buffer<A::Word> {
    let mut buffer = empty::<A::Word>();
    load_words::<A>(block.as_ref(), &mut buffer);
    buffer
}

/// Loads sixteen big-endian words from `bytes` into the front of `buffer`.
#[inline(always)]
pub(crate) fn load_words<A: Algorithm>(bytes: &[u8], buffer: &mut Buffer<A::Word>) {
    let width = <A::Word as Word>::BYTES;
    for (word, chunk) in buffer[..16].iter_mut().zip(bytes.chunks_exact(width)) {
        *word = A::Word::load_be(chunk);
    }
}

/// Packs word `i` of every block into lane word `i`.
///
/// `blocks` holds exactly `V::LANES` blocks of [`Algorithm::BLOCK_BYTES`]
/// bytes each; lane `l` carries `blocks[l]`.
#[inline(always)]
pub fn gather<A, V, B>(blocks: &[B]) -> Buffer<V>
where
    A: Algorithm,
    V: LaneWord<Scalar = A::Word>,
    B: AsRef<[u8]>,
{
    assert_eq!(blocks.len(), V::LANES, "one block per lane");
    let width = <A::Word as Word>::BYTES;
    let mut buffer = empty::<V>();
    let mut lanes = [A::Word::default(); MAX_LANES];
    for (index, slot) in buffer[..16].iter_mut().enumerate() {
        for (lane, block) in lanes.iter_mut().zip(blocks) {
            *lane = A::Word::load_be(&block.as_ref()[index * width..]);
        }
        *slot = V::gather(&lanes[..V::LANES]);
    }
    buffer
}

/// Expands the schedule without adding round constants.
#[inline(always)]
pub fn expand<A: Algorithm, V: LaneWord<Scalar = A::Word>>(buffer: &mut Buffer<V>) {
    for index in 16..A::ROUNDS {
        buffer[index] = A::expand_word(buffer, index);
    }
}

/// Adds the round constants to an expanded schedule.
#[inline(always)]
pub fn add_k<A: Algorithm, V: LaneWord<Scalar = A::Word>>(buffer: &mut Buffer<V>) {
    for (word, k) in buffer[..A::ROUNDS].iter_mut().zip(A::K) {
        *word = word.add(V::splat(*k));
    }
}

/// Expands the schedule with round constants fused in.
#[inline(always)]
pub fn prepare<A: Algorithm, V: LaneWord<Scalar = A::Word>>(buffer: &mut Buffer<V>) {
    let rounds = A::ROUNDS;
    for index in 16..rounds {
        buffer[index] = A::expand_word(buffer, index);
        buffer[index - 16] = buffer[index - 16].add(V::splat(A::K[index - 16]));
    }
    for index in rounds - 16..rounds {
        buffer[index] = buffer[index].add(V::splat(A::K[index]));
    }
}

/// Prepared schedule of the padding block for a message of `blocks` whole
/// blocks, computed at runtime.
///
/// Compile-time block counts should use
/// [`PaddedBlocks::PAD_SCHEDULE`](crate::PaddedBlocks::PAD_SCHEDULE) instead.
pub fn pad_schedule<A: Algorithm>(blocks: u64) -> Buffer<A::Word> {
    if blocks == 1 {
        return A::PAD_ONE;
    }
    let pad = padding::pad_n::<A>(blocks);
    let mut buffer = load::<A>(&pad);
    prepare::<A, A::Word>(&mut buffer);
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::{PaddedBlocks, Sha1, Sha256, Sha512};

    fn sample_block<A: Algorithm>(seed: u8) -> A::Block {
        let mut block = A::ZERO_BLOCK;
        for (i, byte) in block.as_mut().iter_mut().enumerate() {
            *byte = seed.wrapping_add((i as u8).wrapping_mul(7));
        }
        block
    }

    fn fused_equals_separate<A: Algorithm>() {
        let block = sample_block::<A>(11);
        let mut fused = load::<A>(&block);
        prepare::<A, A::Word>(&mut fused);

        let mut separate = load::<A>(&block);
        expand::<A, A::Word>(&mut separate);
        add_k::<A, A::Word>(&mut separate);

        assert_eq!(fused[..A::ROUNDS], separate[..A::ROUNDS], "{}", A::NAME);
    }

    #[test]
    fn fused_constants_do_not_change_the_schedule() {
        fused_equals_separate::<Sha1>();
        fused_equals_separate::<Sha256>();
        fused_equals_separate::<Sha512>();
    }

    #[test]
    fn prepared_schedule_matches_reference() {
        let block = sample_block::<Sha256>(5);
        let mut buffer = load::<Sha256>(&block);
        prepare::<Sha256, u32>(&mut buffer);
        assert_eq!(buffer, crate::reference::sha256::schedule(&block));

        let block = sample_block::<Sha512>(9);
        let mut buffer = load::<Sha512>(&block);
        prepare::<Sha512, u64>(&mut buffer);
        assert_eq!(buffer, crate::reference::sha512::schedule(&block));

        let block = sample_block::<Sha1>(1);
        let mut buffer = load::<Sha1>(&block);
        prepare::<Sha1, u32>(&mut buffer);
        assert_eq!(buffer, crate::reference::sha1::schedule(&block));
    }

    #[test]
    fn runtime_pad_schedule_matches_precomputed() {
        assert_eq!(pad_schedule::<Sha256>(1), Sha256::PAD_ONE);
        assert_eq!(
            pad_schedule::<Sha256>(3),
            <Sha256 as PaddedBlocks<3>>::PAD_SCHEDULE
        );
        assert_eq!(
            pad_schedule::<Sha512>(2),
            <Sha512 as PaddedBlocks<2>>::PAD_SCHEDULE
        );
        assert_eq!(pad_schedule::<Sha1>(0), <Sha1 as PaddedBlocks<0>>::PAD_SCHEDULE);
    }

    #[test]
    fn gathered_lanes_match_per_block_loads() {
        let blocks: Vec<_> = (0..4u8).map(sample_block::<Sha256>).collect();
        let refs: Vec<&[u8; 64]> = blocks.iter().collect();
        // A one-lane vector is the plain word, so gather one block at a time.
        for block in &refs {
            let gathered = gather::<Sha256, u32, _>(std::slice::from_ref(block));
            assert_eq!(gathered, load::<Sha256>(block));
        }
    }
}
