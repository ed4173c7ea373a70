//! Merkle root reduction.
//!
//! Each round duplicates the last digest of an odd-length level, then
//! replaces every adjacent pair `(d[2i], d[2i + 1])` with
//! `hash(hash(d[2i] || d[2i + 1]))`. Pair order and the duplication rule are
//! consensus-relevant and are the same on the sequential and the
//! lane-parallel path.

use crate::algorithm::Chunked;
use crate::batch;
use crate::dispatcher::{self, Dispatcher};
use crate::hash::double_hash_pair;
use crate::trace;

/// Outcome of one reduction round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Round {
    duplicated: bool,
    vectored: bool,
}

fn reduce<A: Chunked>(dispatcher: &Dispatcher, level: &mut Vec<A::Digest>) -> Round {
    let mut round = Round {
        duplicated: false,
        vectored: false,
    };
    if level.len() < 2 {
        return round;
    }
    if level.len() % 2 == 1 {
        let last = level[level.len() - 1];
        level.push(last);
        round.duplicated = true;
    }

    let pairs = level.len() / 2;
    let lanes = dispatcher.lanes::<A>();
    if lanes > 1 && pairs >= lanes {
        let mut next = vec![A::ZERO_DIGEST; pairs];
        batch::double_hash_pairs::<A>(dispatcher.backend(), level, &mut next);
        *level = next;
        round.vectored = true;
    } else {
        for index in 0..pairs {
            level[index] = double_hash_pair::<A>(&level[2 * index], &level[2 * index + 1]);
        }
        level.truncate(pairs);
    }
    round
}

/// Runs one Merkle round over `level` in place.
///
/// A level of zero or one digests is left unchanged.
pub fn merkle_level<A: Chunked>(dispatcher: &Dispatcher, level: &mut Vec<A::Digest>) {
    reduce::<A>(dispatcher, level);
}

/// Reduces `leaves` to their root with the global dispatcher.
///
/// An empty sequence yields the all-zero digest.
pub fn merkle_root<A: Chunked>(leaves: &[A::Digest]) -> A::Digest {
    merkle_root_with::<A>(dispatcher::global(), leaves.to_vec())
}

/// Reduces `leaves` to their root on `dispatcher`'s backend.
pub fn merkle_root_with<A: Chunked>(dispatcher: &Dispatcher, mut leaves: Vec<A::Digest>) -> A::Digest {
    let mut round = 0;
    while leaves.len() > 1 {
        let width = leaves.len();
        let outcome = reduce::<A>(dispatcher, &mut leaves);
        trace::merkle_round(round, width, outcome.duplicated, outcome.vectored);
        round += 1;
    }
    leaves.first().copied().unwrap_or(A::ZERO_DIGEST)
}
