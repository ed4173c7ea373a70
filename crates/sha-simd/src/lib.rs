//! SHA-1/256/512 compression engine with lane-parallel SIMD batching.
//!
//! One generic core, written against [`Algorithm`] and [`LaneWord`], serves
//! every variant and every vector width. A plain `u32`/`u64` is the one-lane
//! case, so the scalar fallback and the SIMD paths run identical round code.
//!
//! # Example
//!
//! ```
//! use sha_simd::{Sha256, double_hash, hash, merkle_root};
//!
//! // Single hash
//! let digest = hash::<Sha256>(b"abc");
//! assert_eq!(digest[..4], [0xba, 0x78, 0x16, 0xbf]);
//!
//! // hash(hash(m)), as used for block and transaction ids
//! let id = double_hash::<Sha256>(b"abc");
//! assert_eq!(id, hash::<Sha256>(&digest));
//!
//! // Merkle root; odd levels duplicate their last digest
//! let root = merkle_root::<Sha256>(&[digest, id, digest]);
//! assert_ne!(root, [0u8; 32]);
//! ```
//!
//! # Backends
//!
//! The widest vector backend the CPU supports is detected once per process
//! (see [`global`]). `SHA_SIMD_FORCE_BACKEND` narrows the choice, and
//! [`Dispatcher::with_backend`] pins one explicitly after a capability check.
//!
//! # Features
//!
//! - `tracing`: debug events for backend selection, batches and Merkle rounds
//! - `parallel`: rayon helpers in [`rayon_support`]

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod algorithm;
pub mod batch;
pub mod bits;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod error;
pub mod functions;
pub mod hash;
pub mod merkle;
pub mod normalize;
pub mod padding;
pub mod reference;
pub mod schedule;
pub mod stream;
pub mod word;

mod simd;
mod trace;

#[cfg(feature = "parallel")]
#[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
pub mod rayon_support;

pub use algorithm::{Algorithm, Buffer, Chunked, PaddedBlocks, Sha1, Sha256, Sha512};
pub use bits::Bits;
pub use dispatcher::{Backend, Dispatcher, global};
pub use error::{BackendError, MidstateError};
pub use hash::{
    double_hash, double_hash_block, double_hash_blocks, double_hash_half, double_hash_iter,
    double_hash_pair, hash, hash_block, hash_blocks, hash_half, hash_iter, hash_pair,
};
pub use merkle::{merkle_level, merkle_root, merkle_root_with};
pub use normalize::{denormalize, normalize};
pub use stream::{Accumulator, Engine, Midstate, accumulate, finalize, finalize_double};
pub use word::{LaneKernel, LaneWord, Word};

#[cfg(feature = "parallel")]
pub use rayon_support::{ParallelDigest, digest_files};

/// Hashes independent messages of any length on the global dispatcher.
///
/// Returns digests in the same order as `inputs`.
pub fn digest_batch<A: Algorithm, T: AsRef<[u8]>>(inputs: &[T]) -> Vec<A::Digest> {
    global().digest_batch::<A, T>(inputs)
}

/// Double-hashes independent messages of any length on the global dispatcher.
pub fn double_digest_batch<A: Chunked, T: AsRef<[u8]>>(inputs: &[T]) -> Vec<A::Digest> {
    global().double_digest_batch::<A, T>(inputs)
}

/// Get the currently active SIMD backend.
///
/// Useful for logging or diagnostics.
pub fn active_backend() -> Backend {
    global().backend()
}
