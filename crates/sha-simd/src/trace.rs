//! Structured debug events for backend selection, batching and Merkle rounds.
//!
//! All tracing is conditionally compiled behind the `tracing` feature flag
//! and produces no-op inline functions when disabled.

use crate::config::ForceBackend;
use crate::dispatcher::Backend;

/// Target for backend selection events.
#[cfg(feature = "tracing")]
const DISPATCH_TARGET: &str = "sha_simd::dispatch";

/// Target for batched hashing events.
#[cfg(feature = "tracing")]
const BATCH_TARGET: &str = "sha_simd::batch";

/// Target for Merkle reduction events.
#[cfg(feature = "tracing")]
const MERKLE_TARGET: &str = "sha_simd::merkle";

/// Traces the backend chosen by [`Dispatcher::detect`](crate::Dispatcher::detect).
///
/// # Arguments
///
/// * `detected` - Widest backend the CPU supports
/// * `effective` - Backend in use after applying the override
/// * `requested` - Override read from the environment
#[cfg(feature = "tracing")]
#[inline]
pub fn backend_selected(detected: Backend, effective: Backend, requested: ForceBackend) {
    let pinned = match requested {
        ForceBackend::Auto => None,
        ForceBackend::Pinned(backend) => Some(backend.name()),
    };
    tracing::debug!(
        target: DISPATCH_TARGET,
        detected = detected.name(),
        effective = effective.name(),
        lanes = effective.lanes(),
        pinned = ?pinned,
        "backend_selected"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn backend_selected(_detected: Backend, _effective: Backend, _requested: ForceBackend) {}

/// Traces one batched call: how many items went through full lane groups and
/// how many took the scalar remainder path.
#[cfg(feature = "tracing")]
#[inline]
pub fn batch_split(op: &'static str, algorithm: &'static str, lanes: usize, vectored: usize, remainder: usize) {
    tracing::trace!(
        target: BATCH_TARGET,
        op,
        algorithm,
        lanes,
        vectored,
        remainder,
        "batch_split"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn batch_split(
    _op: &'static str,
    _algorithm: &'static str,
    _lanes: usize,
    _vectored: usize,
    _remainder: usize,
) {
}

/// Traces one Merkle round.
///
/// # Arguments
///
/// * `round` - Zero-based round number
/// * `width` - Digests entering the round, before odd duplication
/// * `duplicated` - Whether the last digest was duplicated
/// * `vectored` - Whether the round took the lane-parallel path
#[cfg(feature = "tracing")]
#[inline]
pub fn merkle_round(round: usize, width: usize, duplicated: bool, vectored: bool) {
    tracing::debug!(
        target: MERKLE_TARGET,
        round,
        width,
        duplicated,
        vectored,
        "merkle_round"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn merkle_round(_round: usize, _width: usize, _duplicated: bool, _vectored: bool) {}

#[cfg(all(test, feature = "tracing"))]
mod tests {
    use super::*;

    #[test]
    fn events_do_not_panic_without_subscriber() {
        backend_selected(Backend::Scalar, Backend::Scalar, ForceBackend::Auto);
        batch_split("hash_each", "sha256", 8, 16, 3);
        merkle_round(0, 5, true, false);
    }
}
