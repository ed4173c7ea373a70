//! Lane-parallel batches.
//!
//! Each operation packs one independent message per lane, runs the generic
//! core once over lane words, and unpacks one digest per lane. Items left
//! over after the last full lane group take the scalar path, which runs the
//! very same generic code with a one-lane word.

use std::cmp::{Ordering, Reverse};
use std::marker::PhantomData;

use crate::algorithm::{Algorithm, Buffer, Chunked, compress, initial_state};
use crate::bits::Bits;
use crate::dispatcher::Backend;
use crate::hash::{join, rehash, splat_schedule};
use crate::normalize::normalize;
use crate::padding;
use crate::schedule::{self, MAX_LANES};
use crate::trace;
use crate::word::{LaneKernel, LaneWord, Word};

/// Items handled by full lane groups; the rest go to the scalar path.
#[inline]
const fn vectored_len(items: usize, lanes: usize) -> usize {
    if lanes > 1 { items / lanes * lanes } else { 0 }
}

/// Writes lane `l` of `state` as digest `out[l]`.
#[inline(always)]
fn store_lanes<A, V>(state: &A::State<V>, out: &mut [A::Digest])
where
    A: Algorithm,
    V: LaneWord<Scalar = A::Word>,
{
    let width = <A::Word as Word>::BYTES;
    let mut lanes = [A::Word::default(); MAX_LANES];
    for (index, word) in state.as_ref().iter().enumerate() {
        word.scatter(&mut lanes);
        for (digest, lane) in out.iter_mut().zip(&lanes[..V::LANES]) {
            lane.store_be(&mut digest.as_mut()[index * width..]);
        }
    }
}

/// What happens to the state of a one-block message before it is stored.
trait Finish<A: Algorithm> {
    fn finish<V: LaneWord<Scalar = A::Word>>(state: A::State<V>) -> A::State<V>;
}

/// Store the single hash.
struct Single;

/// Hash the digest once more as a half block.
struct Double;

impl<A: Algorithm> Finish<A> for Single {
    #[inline(always)]
    fn finish<V: LaneWord<Scalar = A::Word>>(state: A::State<V>) -> A::State<V> {
        state
    }
}

impl<A: Chunked> Finish<A> for Double {
    #[inline(always)]
    fn finish<V: LaneWord<Scalar = A::Word>>(state: A::State<V>) -> A::State<V> {
        rehash::<A, V>(&state)
    }
}

/// Hashes `V::LANES` one-block messages produced by `block`.
#[inline(always)]
fn one_block_group<A, V, F>(block: impl Fn(usize) -> A::Block, out: &mut [A::Digest])
where
    A: Algorithm,
    V: LaneWord<Scalar = A::Word>,
    F: Finish<A>,
{
    let mut blocks = [A::ZERO_BLOCK; MAX_LANES];
    for (lane, slot) in blocks[..V::LANES].iter_mut().enumerate() {
        *slot = block(lane);
    }
    let mut buffer = schedule::gather::<A, V, _>(&blocks[..V::LANES]);
    schedule::prepare::<A, V>(&mut buffer);
    let mut state = initial_state::<A, V>();
    compress::<A, V>(&mut state, &buffer);
    compress::<A, V>(&mut state, &splat_schedule::<V>(&A::PAD_ONE));
    store_lanes::<A, V>(&F::finish::<V>(state), out);
}

/// One-block messages, one digest each.
struct OneBlock<'a, A: Algorithm, F, S> {
    op: &'static str,
    source: S,
    out: &'a mut [A::Digest],
    finish: PhantomData<F>,
}

impl<A, F, S> LaneKernel<A::Word> for OneBlock<'_, A, F, S>
where
    A: Algorithm,
    F: Finish<A>,
    S: Fn(usize) -> A::Block,
{
    type Output = ();

    #[inline(always)]
    fn run<V: LaneWord<Scalar = A::Word>>(self) {
        let lanes = V::LANES;
        let vectored = vectored_len(self.out.len(), lanes);
        trace::batch_split(self.op, A::NAME, lanes, vectored, self.out.len() - vectored);

        let source = &self.source;
        let (head, tail) = self.out.split_at_mut(vectored);
        for (group, dst) in head.chunks_exact_mut(lanes).enumerate() {
            one_block_group::<A, V, F>(|lane| source(group * lanes + lane), dst);
        }
        for (offset, dst) in tail.iter_mut().enumerate() {
            one_block_group::<A, A::Word, F>(
                |_| source(vectored + offset),
                std::slice::from_mut(dst),
            );
        }
    }
}

/// Hashes each block as an independent one-block message.
///
/// # Panics
///
/// Panics if `out` and `blocks` differ in length.
pub fn hash_each<A: Algorithm>(backend: Backend, blocks: &[A::Block], out: &mut [A::Digest]) {
    assert_eq!(blocks.len(), out.len(), "one digest slot per block");
    A::Word::dispatch(
        backend,
        OneBlock::<A, Single, _> {
            op: "hash_each",
            source: |index: usize| blocks[index],
            out,
            finish: PhantomData,
        },
    );
}

/// Double-hashes each block as an independent one-block message.
///
/// # Panics
///
/// Panics if `out` and `blocks` differ in length.
pub fn double_hash_each<A: Chunked>(backend: Backend, blocks: &[A::Block], out: &mut [A::Digest]) {
    assert_eq!(blocks.len(), out.len(), "one digest slot per block");
    A::Word::dispatch(
        backend,
        OneBlock::<A, Double, _> {
            op: "double_hash_each",
            source: |index: usize| blocks[index],
            out,
            finish: PhantomData,
        },
    );
}

/// Writes `hash(hash(digests[2i] || digests[2i + 1]))` to `out[i]`.
///
/// # Panics
///
/// Panics unless `digests` holds exactly two entries per slot of `out`.
pub fn double_hash_pairs<A: Chunked>(backend: Backend, digests: &[A::Digest], out: &mut [A::Digest]) {
    assert_eq!(digests.len(), out.len() * 2, "one output slot per digest pair");
    A::Word::dispatch(
        backend,
        OneBlock::<A, Double, _> {
            op: "double_hash_pairs",
            source: |index: usize| join::<A>(&digests[2 * index], &digests[2 * index + 1]),
            out,
            finish: PhantomData,
        },
    );
}

/// A message split into whole blocks plus its one or two padded tail blocks.
struct Message<'a, A: Algorithm> {
    data: &'a [u8],
    full: usize,
    last: A::Block,
    spill: Option<A::Block>,
}

impl<'a, A: Algorithm> Message<'a, A> {
    fn new(data: &'a [u8]) -> Self {
        let full = data.len() / A::BLOCK_BYTES;
        let (last, spill) =
            padding::pad_tail::<A>(&data[full * A::BLOCK_BYTES..], data.len() as u128);
        Self {
            data,
            full,
            last,
            spill,
        }
    }

    /// Blocks compressed for this message, padding included.
    #[inline(always)]
    fn blocks(&self) -> usize {
        self.full + 1 + usize::from(self.spill.is_some())
    }

    #[inline(always)]
    fn block(&self, index: usize) -> A::Block {
        match index.cmp(&self.full) {
            Ordering::Less => {
                let mut block = A::ZERO_BLOCK;
                let at = index * A::BLOCK_BYTES;
                block
                    .as_mut()
                    .copy_from_slice(&self.data[at..at + A::BLOCK_BYTES]);
                block
            }
            Ordering::Equal => self.last,
            Ordering::Greater => self.spill.unwrap_or(A::ZERO_BLOCK),
        }
    }

    /// Scalar chaining state after the padding, using the precomputed pad
    /// schedule for whole-block messages.
    fn state(&self) -> A::State<A::Word> {
        let mut state = initial_state::<A, A::Word>();
        for index in 0..self.full {
            let mut buffer = schedule::load::<A>(&self.block(index));
            schedule::prepare::<A, A::Word>(&mut buffer);
            compress::<A, A::Word>(&mut state, &buffer);
        }
        if self.data.len() == self.full * A::BLOCK_BYTES {
            compress::<A, A::Word>(&mut state, &schedule::pad_schedule::<A>(self.full as u64));
        } else {
            for block in std::iter::once(&self.last).chain(&self.spill) {
                let mut buffer = schedule::load::<A>(block);
                schedule::prepare::<A, A::Word>(&mut buffer);
                compress::<A, A::Word>(&mut state, &buffer);
            }
        }
        state
    }
}

/// Hashes `V::LANES` messages of possibly different lengths together.
///
/// Lanes whose message is exhausted keep their state: each step's result is
/// blended in only where the lane is still active.
#[inline(always)]
fn message_group<A, V, F>(messages: &[Message<'_, A>], group: &[usize], out: &mut [A::Digest])
where
    A: Algorithm,
    V: LaneWord<Scalar = A::Word>,
    F: Finish<A>,
{
    let lanes = V::LANES;
    let steps = group
        .iter()
        .map(|&index| messages[index].blocks())
        .max()
        .unwrap_or(0);

    let mut state = initial_state::<A, V>();
    let mut blocks = [A::ZERO_BLOCK; MAX_LANES];
    let mut mask = [A::Word::default(); MAX_LANES];
    for step in 0..steps {
        let mut all_active = true;
        for (lane, &index) in group.iter().enumerate() {
            let message = &messages[index];
            if step < message.blocks() {
                blocks[lane] = message.block(step);
                mask[lane] = <A::Word as Bits>::BIT_ALL;
            } else {
                blocks[lane] = A::ZERO_BLOCK;
                mask[lane] = <A::Word as Bits>::BIT_NONE;
                all_active = false;
            }
        }

        let mut buffer = schedule::gather::<A, V, _>(&blocks[..lanes]);
        schedule::prepare::<A, V>(&mut buffer);
        let mut next = state;
        compress::<A, V>(&mut next, &buffer);

        state = if all_active {
            next
        } else {
            let active = V::gather(&mask[..lanes]);
            A::state_from_fn(|i| V::select(active, next.as_ref()[i], state.as_ref()[i]))
        };
    }

    let mut digests = [A::ZERO_DIGEST; MAX_LANES];
    store_lanes::<A, V>(&F::finish::<V>(state), &mut digests[..lanes]);
    for (digest, &index) in digests.iter().zip(group) {
        out[index] = *digest;
    }
}

/// Messages of arbitrary length, visited longest first.
struct Messages<'a, A: Algorithm, F> {
    op: &'static str,
    messages: &'a [Message<'a, A>],
    order: &'a [usize],
    out: &'a mut [A::Digest],
    finish: PhantomData<F>,
}

impl<A, F> LaneKernel<A::Word> for Messages<'_, A, F>
where
    A: Algorithm,
    F: Finish<A>,
{
    type Output = ();

    #[inline(always)]
    fn run<V: LaneWord<Scalar = A::Word>>(self) {
        let lanes = V::LANES;
        let vectored = vectored_len(self.order.len(), lanes);
        trace::batch_split(self.op, A::NAME, lanes, vectored, self.order.len() - vectored);

        for group in self.order[..vectored].chunks_exact(lanes) {
            message_group::<A, V, F>(self.messages, group, self.out);
        }
        for &index in &self.order[vectored..] {
            let state = F::finish::<A::Word>(self.messages[index].state());
            self.out[index] = normalize::<A>(&state);
        }
    }
}

/// Hashes independent messages of any length.
///
/// Messages are grouped by padded block count so lanes in one group finish
/// close together; digests come back in input order.
pub fn digest_batch<A: Algorithm, T: AsRef<[u8]>>(backend: Backend, inputs: &[T]) -> Vec<A::Digest> {
    messages_batch::<A, Single, T>(backend, "digest_batch", inputs)
}

/// Like [`digest_batch`], but returns `hash(hash(message))` for each input.
///
/// The inner state of every lane is re-hashed as a half block before it is
/// serialized.
pub fn double_digest_batch<A: Chunked, T: AsRef<[u8]>>(
    backend: Backend,
    inputs: &[T],
) -> Vec<A::Digest> {
    messages_batch::<A, Double, T>(backend, "double_digest_batch", inputs)
}

fn messages_batch<A, F, T>(backend: Backend, op: &'static str, inputs: &[T]) -> Vec<A::Digest>
where
    A: Algorithm,
    F: Finish<A>,
    T: AsRef<[u8]>,
{
    let messages: Vec<Message<'_, A>> = inputs
        .iter()
        .map(|input| Message::new(input.as_ref()))
        .collect();
    let mut order: Vec<usize> = (0..messages.len()).collect();
    order.sort_by_key(|&index| Reverse(messages[index].blocks()));

    let mut out = vec![A::ZERO_DIGEST; messages.len()];
    A::Word::dispatch(
        backend,
        Messages::<A, F> {
            op,
            messages: &messages,
            order: &order,
            out: &mut out,
            finish: PhantomData,
        },
    );
    out
}

/// Schedules of consecutive blocks, prepared several at a time.
struct Schedules<'a, A: Algorithm> {
    blocks: &'a [u8],
    out: &'a mut [Buffer<A::Word>],
}

impl<A: Algorithm> LaneKernel<A::Word> for Schedules<'_, A> {
    type Output = ();

    #[inline(always)]
    fn run<V: LaneWord<Scalar = A::Word>>(self) {
        let lanes = V::LANES;
        let size = A::BLOCK_BYTES;
        let vectored = vectored_len(self.out.len(), lanes);
        let (head, tail) = self.out.split_at_mut(vectored);

        let mut words = [A::Word::default(); MAX_LANES];
        for (group, dst) in head.chunks_exact_mut(lanes).enumerate() {
            let start = group * lanes * size;
            let blocks: [&[u8]; MAX_LANES] = std::array::from_fn(|lane| {
                let at = start + lane.min(lanes - 1) * size;
                &self.blocks[at..at + size]
            });
            let mut buffer = schedule::gather::<A, V, _>(&blocks[..lanes]);
            schedule::prepare::<A, V>(&mut buffer);
            for (index, word) in buffer.iter().enumerate() {
                word.scatter(&mut words);
                for (schedule, lane) in dst.iter_mut().zip(&words[..lanes]) {
                    schedule[index] = *lane;
                }
            }
        }

        for (offset, dst) in tail.iter_mut().enumerate() {
            let at = (vectored + offset) * size;
            *dst = schedule::empty::<A::Word>();
            schedule::load_words::<A>(&self.blocks[at..at + size], dst);
            schedule::prepare::<A, A::Word>(dst);
        }
    }
}

/// Prepares the schedule of each block in `blocks`, lanes at a time.
///
/// The schedules of distinct blocks are independent even within one
/// message, so a long message can expand several of them in parallel and
/// then compress them in order.
///
/// # Panics
///
/// Panics unless `blocks` holds exactly one block per slot of `out`.
pub fn prepare_schedules<A: Algorithm>(backend: Backend, blocks: &[u8], out: &mut [Buffer<A::Word>]) {
    assert_eq!(blocks.len(), out.len() * A::BLOCK_BYTES, "one schedule slot per block");
    A::Word::dispatch(backend, Schedules::<A> { blocks, out });
}

/// Hashes one message of any length.
pub fn digest<A: Algorithm>(backend: Backend, data: &[u8]) -> A::Digest {
    let full = data.len() / A::BLOCK_BYTES;
    let (body, tail) = data.split_at(full * A::BLOCK_BYTES);

    let mut state = initial_state::<A, A::Word>();
    let mut schedules = [schedule::empty::<A::Word>(); MAX_LANES];
    for chunk in body.chunks(MAX_LANES * A::BLOCK_BYTES) {
        let count = chunk.len() / A::BLOCK_BYTES;
        prepare_schedules::<A>(backend, chunk, &mut schedules[..count]);
        for buffer in &schedules[..count] {
            compress::<A, A::Word>(&mut state, buffer);
        }
    }

    if tail.is_empty() {
        compress::<A, A::Word>(&mut state, &schedule::pad_schedule::<A>(full as u64));
    } else {
        let (last, spill) = padding::pad_tail::<A>(tail, data.len() as u128);
        for block in std::iter::once(&last).chain(&spill) {
            let mut buffer = schedule::load::<A>(block);
            schedule::prepare::<A, A::Word>(&mut buffer);
            compress::<A, A::Word>(&mut state, &buffer);
        }
    }
    normalize::<A>(&state)
}
