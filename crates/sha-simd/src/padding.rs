//! Canonical message padding.
//!
//! A message is followed by a single `1` bit, zero bits, and the message
//! length in bits as a big-endian field two words wide. Lengths too large for
//! that field saturate at its maximum instead of wrapping.

use crate::algorithm::{Algorithm, Chunked};
use crate::bits::Bits;
use crate::word::Word;

/// Marker byte appended right after the message.
pub const MARKER: u8 = u8::BIT_HI;

/// Message length in bits for a length in bytes, saturating.
#[inline]
pub const fn bit_length(bytes: u128) -> u128 {
    bytes.saturating_mul(8)
}

/// Width of the trailing length field in bytes.
#[inline]
pub fn length_field_bytes<A: Algorithm>() -> usize {
    2 * <A::Word as Word>::BYTES
}

/// Writes `bits` into the length field occupying the tail of `block`.
pub fn write_length<A: Algorithm>(block: &mut [u8], bits: u128) {
    let width = <A::Word as Word>::BYTES;
    let (high, low) = A::Word::length_words(bits);
    let end = block.len();
    high.store_be(&mut block[end - 2 * width..]);
    low.store_be(&mut block[end - width..]);
}

/// Padding block for a message that is exactly one block long.
#[inline]
pub fn pad_one<A: Algorithm>() -> A::Block {
    pad_n::<A>(1)
}

/// Padding block for a message of exactly `blocks` whole blocks.
pub fn pad_n<A: Algorithm>(blocks: u64) -> A::Block {
    let mut block = A::ZERO_BLOCK;
    let bytes = u128::from(blocks).saturating_mul(A::BLOCK_BYTES as u128);
    block.as_mut()[0] = MARKER;
    write_length::<A>(block.as_mut(), bit_length(bytes));
    block
}

/// Second half of a block whose first half is a digest-sized message.
pub fn pad_half<A: Chunked>() -> A::Digest {
    let mut half = A::ZERO_DIGEST;
    half.as_mut()[0] = MARKER;
    write_length::<A>(half.as_mut(), bit_length(A::DIGEST_BYTES as u128));
    half
}

/// Final block(s) of an arbitrary message.
///
/// `tail` is the message remainder after its last whole block (shorter than
/// a block) and `total_bytes` the full message length. The second block is
/// present when the tail leaves no room for the marker and length field.
pub fn pad_tail<A: Algorithm>(tail: &[u8], total_bytes: u128) -> (A::Block, Option<A::Block>) {
    assert!(tail.len() < A::BLOCK_BYTES, "tail must be shorter than a block");
    let bits = bit_length(total_bytes);

    let mut first = A::ZERO_BLOCK;
    first.as_mut()[..tail.len()].copy_from_slice(tail);
    first.as_mut()[tail.len()] = MARKER;

    if tail.len() + 1 + length_field_bytes::<A>() > A::BLOCK_BYTES {
        let mut second = A::ZERO_BLOCK;
        write_length::<A>(second.as_mut(), bits);
        (first, Some(second))
    } else {
        write_length::<A>(first.as_mut(), bits);
        (first, None)
    }
}
