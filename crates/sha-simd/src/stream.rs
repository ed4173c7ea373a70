//! Incremental hashing.
//!
//! The block-level API ([`accumulate`], [`finalize`], [`finalize_double`] and
//! [`Accumulator`]) advances a chaining state by whole blocks and lets the
//! caller supply the total block count at the end. [`Engine`] layers byte
//! buffering on top for messages of arbitrary length.
//!
//! A state belongs to one caller for the whole session. Nothing here locks;
//! concurrent writers must be serialized by the caller.

use std::fmt;

use crate::algorithm::{Algorithm, Chunked, compress, initial_state};
use crate::error::MidstateError;
use crate::hash::rehash;
use crate::normalize::{denormalize, normalize};
use crate::padding;
use crate::schedule;

/// Compresses each whole block into `state`.
pub fn accumulate<A: Algorithm>(state: &mut A::State<A::Word>, blocks: &[A::Block]) {
    for block in blocks {
        let mut buffer = schedule::load::<A>(block);
        schedule::prepare::<A, A::Word>(&mut buffer);
        compress::<A, A::Word>(state, &buffer);
    }
}

/// Pads a message of `total_blocks` whole blocks and returns its digest.
pub fn finalize<A: Algorithm>(state: &A::State<A::Word>, total_blocks: u64) -> A::Digest {
    normalize::<A>(&padded::<A>(state, total_blocks))
}

/// Like [`finalize`], then hashes the digest once more as a half block.
pub fn finalize_double<A: Chunked>(state: &A::State<A::Word>, total_blocks: u64) -> A::Digest {
    normalize::<A>(&rehash::<A, A::Word>(&padded::<A>(state, total_blocks)))
}

fn padded<A: Algorithm>(state: &A::State<A::Word>, total_blocks: u64) -> A::State<A::Word> {
    let mut state = *state;
    compress::<A, A::Word>(&mut state, &schedule::pad_schedule::<A>(total_blocks));
    state
}

/// Chaining state plus the number of blocks folded into it.
#[derive(Clone, Copy)]
pub struct Accumulator<A: Algorithm> {
    state: A::State<A::Word>,
    blocks: u64,
}

impl<A: Algorithm> Accumulator<A> {
    pub fn new() -> Self {
        Self {
            state: initial_state::<A, A::Word>(),
            blocks: 0,
        }
    }

    /// Folds whole blocks into the state.
    pub fn accumulate(&mut self, blocks: &[A::Block]) {
        accumulate::<A>(&mut self.state, blocks);
        self.blocks += blocks.len() as u64;
    }

    /// Blocks accumulated so far.
    pub const fn blocks(&self) -> u64 {
        self.blocks
    }

    /// Current chaining state.
    pub const fn state(&self) -> &A::State<A::Word> {
        &self.state
    }

    pub fn finalize(self) -> A::Digest {
        finalize::<A>(&self.state, self.blocks)
    }
}

impl<A: Chunked> Accumulator<A> {
    pub fn finalize_double(self) -> A::Digest {
        finalize_double::<A>(&self.state, self.blocks)
    }
}

impl<A: Algorithm> Default for Accumulator<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Algorithm> fmt::Debug for Accumulator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accumulator")
            .field("algorithm", &A::NAME)
            .field("blocks", &self.blocks)
            .finish_non_exhaustive()
    }
}

/// Serialized chaining state after a whole number of blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Midstate<A: Algorithm> {
    /// State words in digest byte order.
    pub state: A::Digest,
    /// Message bytes folded into `state`.
    pub bytes: u64,
}

/// Byte-oriented incremental hasher.
#[derive(Clone)]
pub struct Engine<A: Algorithm> {
    state: A::State<A::Word>,
    pending: A::Block,
    pending_len: usize,
    compressed: u64,
}

impl<A: Algorithm> Engine<A> {
    pub fn new() -> Self {
        Self {
            state: initial_state::<A, A::Word>(),
            pending: A::ZERO_BLOCK,
            pending_len: 0,
            compressed: 0,
        }
    }

    /// Appends `data` to the message.
    pub fn input(&mut self, mut data: &[u8]) {
        if self.pending_len > 0 {
            let take = (A::BLOCK_BYTES - self.pending_len).min(data.len());
            self.pending.as_mut()[self.pending_len..self.pending_len + take]
                .copy_from_slice(&data[..take]);
            self.pending_len += take;
            data = &data[take..];
            if self.pending_len < A::BLOCK_BYTES {
                return;
            }
            let block = self.pending;
            self.compress_block(&block);
            self.pending_len = 0;
        }

        let mut blocks = data.chunks_exact(A::BLOCK_BYTES);
        for chunk in &mut blocks {
            let mut buffer = schedule::empty::<A::Word>();
            schedule::load_words::<A>(chunk, &mut buffer);
            schedule::prepare::<A, A::Word>(&mut buffer);
            compress::<A, A::Word>(&mut self.state, &buffer);
            self.compressed += A::BLOCK_BYTES as u64;
        }

        let rest = blocks.remainder();
        self.pending.as_mut()[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();
    }

    fn compress_block(&mut self, block: &A::Block) {
        let mut buffer = schedule::load::<A>(block);
        schedule::prepare::<A, A::Word>(&mut buffer);
        compress::<A, A::Word>(&mut self.state, &buffer);
        self.compressed += A::BLOCK_BYTES as u64;
    }

    /// Bytes appended so far.
    pub const fn len(&self) -> u64 {
        self.compressed + self.pending_len as u64
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn final_state(mut self) -> A::State<A::Word> {
        if self.pending_len == 0 {
            let blocks = self.compressed / A::BLOCK_BYTES as u64;
            return padded::<A>(&self.state, blocks);
        }
        let total = u128::from(self.len());
        let (last, spill) = padding::pad_tail::<A>(&self.pending.as_ref()[..self.pending_len], total);
        self.compress_block(&last);
        if let Some(spill) = spill {
            self.compress_block(&spill);
        }
        self.state
    }

    /// Pads the message and returns its digest.
    pub fn finalize(self) -> A::Digest {
        normalize::<A>(&self.final_state())
    }

    /// Chaining state over the whole blocks hashed so far.
    ///
    /// Bytes still buffered in a partial block are not part of it; see
    /// [`Engine::pending`].
    pub fn midstate(&self) -> Midstate<A> {
        Midstate {
            state: normalize::<A>(&self.state),
            bytes: self.compressed,
        }
    }

    /// Bytes buffered after the last whole block.
    pub fn pending(&self) -> &[u8] {
        &self.pending.as_ref()[..self.pending_len]
    }

    /// Resumes hashing from a midstate.
    pub fn from_midstate(midstate: &Midstate<A>) -> Result<Self, MidstateError> {
        if midstate.bytes % A::BLOCK_BYTES as u64 != 0 {
            return Err(MidstateError::UnalignedLength {
                bytes: midstate.bytes,
                block_bytes: A::BLOCK_BYTES,
            });
        }
        Ok(Self {
            state: denormalize::<A>(&midstate.state),
            pending: A::ZERO_BLOCK,
            pending_len: 0,
            compressed: midstate.bytes,
        })
    }
}

impl<A: Chunked> Engine<A> {
    /// Pads the message and returns `hash(hash(message))`.
    pub fn finalize_double(self) -> A::Digest {
        normalize::<A>(&rehash::<A, A::Word>(&self.final_state()))
    }
}

impl<A: Algorithm> Default for Engine<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Algorithm> fmt::Debug for Engine<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("algorithm", &A::NAME)
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}
