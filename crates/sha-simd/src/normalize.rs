//! Conversion between chaining states and digest bytes.
//!
//! Every state word is written big-endian, in order. A digest produced here
//! has the canonical byte order of the published algorithms; the double-hash
//! paths feed state words straight into the next block and only call
//! [`normalize`] once, at the very end.

use crate::algorithm::Algorithm;
use crate::word::Word;

/// Serializes a scalar chaining state into digest bytes.
#[inline]
pub fn normalize<A: Algorithm>(state: &A::State<A::Word>) -> A::Digest {
    let width = <A::Word as Word>::BYTES;
    let mut digest = A::ZERO_DIGEST;
    for (chunk, word) in digest.as_mut().chunks_exact_mut(width).zip(state.as_ref()) {
        word.store_be(chunk);
    }
    digest
}

/// Reads digest bytes back into a chaining state.
#[inline]
pub fn denormalize<A: Algorithm>(digest: &A::Digest) -> A::State<A::Word> {
    let width = <A::Word as Word>::BYTES;
    let bytes = digest.as_ref();
    A::state_from_fn(|i| A::Word::load_be(&bytes[i * width..]))
}
