//! Runtime CPU detection and backend dispatch.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::algorithm::{Algorithm, Chunked};
use crate::config::{self, BackendConfig};
use crate::error::BackendError;
use crate::word::Word;
use crate::{batch, merkle, trace};

/// Available SIMD backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// AVX-512F with 16 lanes of 32 bits.
    Avx512,
    /// AVX2 with 8 lanes of 32 bits.
    Avx2,
    /// SSE2 with 4 lanes of 32 bits.
    Sse2,
    /// ARM NEON with 4 lanes of 32 bits.
    Neon,
    /// Scalar fallback (1 lane).
    Scalar,
}

impl Backend {
    /// Every backend, widest first.
    pub const ALL: [Self; 5] = [Self::Avx512, Self::Avx2, Self::Sse2, Self::Neon, Self::Scalar];

    /// Number of parallel 32-bit lanes for this backend.
    pub const fn lanes(self) -> usize {
        match self {
            Self::Avx512 => 16,
            Self::Avx2 => 8,
            Self::Sse2 | Self::Neon => 4,
            Self::Scalar => 1,
        }
    }

    /// Number of parallel lanes for words of type `W`.
    pub fn lanes_for<W: Word>(self) -> usize {
        match self {
            Self::Scalar => 1,
            _ => self.lanes() * 4 / W::BYTES,
        }
    }

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Avx512 => "avx512",
            Self::Avx2 => "avx2",
            Self::Sse2 => "sse2",
            Self::Neon => "neon",
            Self::Scalar => "scalar",
        }
    }

    /// Whether the running CPU can execute this backend.
    pub fn is_supported(self) -> bool {
        match self {
            #[cfg(target_arch = "x86_64")]
            Self::Avx512 => is_x86_feature_detected!("avx512f"),
            #[cfg(target_arch = "x86_64")]
            Self::Avx2 => is_x86_feature_detected!("avx2"),
            #[cfg(target_arch = "x86_64")]
            Self::Sse2 => is_x86_feature_detected!("sse2"),
            #[cfg(target_arch = "aarch64")]
            Self::Neon => std::arch::is_aarch64_feature_detected!("neon"),
            Self::Scalar => true,
            #[allow(unreachable_patterns)]
            _ => false,
        }
    }

    /// Widest backend the running CPU supports.
    pub fn best_supported() -> Self {
        Self::ALL
            .into_iter()
            .find(|backend| backend.is_supported())
            .unwrap_or(Self::Scalar)
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Backend {
    type Err = BackendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|backend| backend.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BackendError::UnknownName(s.to_owned()))
    }
}

/// Dispatcher bound to one backend.
///
/// Every batched operation runs full lane groups on the backend and the
/// remainder on the scalar path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatcher {
    backend: Backend,
}

impl Dispatcher {
    /// Detect CPU features and select the best available backend, honouring
    /// the environment override.
    pub fn detect() -> Self {
        let detected = Backend::best_supported();
        let config = BackendConfig::resolve(config::requested_override(), detected);
        trace::backend_selected(detected, config.effective, config.requested);
        Self {
            backend: config.effective,
        }
    }

    /// Dispatcher pinned to `backend`, after checking the CPU supports it.
    pub fn with_backend(backend: Backend) -> Result<Self, BackendError> {
        if backend.is_supported() {
            Ok(Self { backend })
        } else {
            Err(BackendError::Unsupported { backend })
        }
    }

    /// Dispatcher that never leaves the scalar path.
    pub const fn scalar() -> Self {
        Self {
            backend: Backend::Scalar,
        }
    }

    /// Get the selected backend.
    pub const fn backend(&self) -> Backend {
        self.backend
    }

    /// Lanes processed per call for algorithm `A`.
    pub fn lanes<A: Algorithm>(&self) -> usize {
        self.backend.lanes_for::<A::Word>()
    }

    /// Hashes each block as an independent one-block message.
    pub fn hash_each<A: Algorithm>(&self, blocks: &[A::Block]) -> Vec<A::Digest> {
        let mut out = vec![A::ZERO_DIGEST; blocks.len()];
        batch::hash_each::<A>(self.backend, blocks, &mut out);
        out
    }

    /// Double-hashes each block as an independent one-block message.
    pub fn double_hash_each<A: Chunked>(&self, blocks: &[A::Block]) -> Vec<A::Digest> {
        let mut out = vec![A::ZERO_DIGEST; blocks.len()];
        batch::double_hash_each::<A>(self.backend, blocks, &mut out);
        out
    }

    /// Double-hashes the concatenation of each adjacent digest pair.
    ///
    /// `digests` must have even length.
    pub fn double_hash_pairs<A: Chunked>(&self, digests: &[A::Digest]) -> Vec<A::Digest> {
        let mut out = vec![A::ZERO_DIGEST; digests.len() / 2];
        batch::double_hash_pairs::<A>(self.backend, digests, &mut out);
        out
    }

    /// Hashes independent messages of any length.
    pub fn digest_batch<A: Algorithm, T: AsRef<[u8]>>(&self, inputs: &[T]) -> Vec<A::Digest> {
        batch::digest_batch::<A, T>(self.backend, inputs)
    }

    /// Double-hashes independent messages of any length.
    pub fn double_digest_batch<A: Chunked, T: AsRef<[u8]>>(&self, inputs: &[T]) -> Vec<A::Digest> {
        batch::double_digest_batch::<A, T>(self.backend, inputs)
    }

    /// Hashes a single message of any length.
    pub fn digest<A: Algorithm>(&self, input: &[u8]) -> A::Digest {
        batch::digest::<A>(self.backend, input)
    }

    /// Reduces `leaves` to their Merkle root.
    pub fn merkle_root<A: Chunked>(&self, leaves: &[A::Digest]) -> A::Digest {
        merkle::merkle_root_with::<A>(self, leaves.to_vec())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::detect()
    }
}

/// Global dispatcher instance, initialized on first use.
pub fn global() -> &'static Dispatcher {
    static DISPATCHER: OnceLock<Dispatcher> = OnceLock::new();
    DISPATCHER.get_or_init(Dispatcher::detect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatcher_detects_backend() {
        let dispatcher = Dispatcher::detect();
        assert!(dispatcher.backend().is_supported());
    }

    #[test]
    fn global_dispatcher_is_consistent() {
        let d1 = global();
        let d2 = global();
        assert_eq!(d1.backend(), d2.backend());
    }

    #[test]
    fn scalar_is_always_available() {
        assert_eq!(
            Dispatcher::with_backend(Backend::Scalar),
            Ok(Dispatcher::scalar())
        );
    }

    #[test]
    fn unsupported_backend_is_rejected() {
        for backend in Backend::ALL {
            let result = Dispatcher::with_backend(backend);
            if backend.is_supported() {
                assert_eq!(result.map(|d| d.backend()), Ok(backend));
            } else {
                assert_eq!(result, Err(BackendError::Unsupported { backend }));
            }
        }
    }

    #[test]
    fn lane_counts_halve_for_wide_words() {
        assert_eq!(Backend::Avx512.lanes_for::<u32>(), 16);
        assert_eq!(Backend::Avx512.lanes_for::<u64>(), 8);
        assert_eq!(Backend::Sse2.lanes_for::<u64>(), 2);
        assert_eq!(Backend::Neon.lanes_for::<u64>(), 2);
        assert_eq!(Backend::Scalar.lanes_for::<u64>(), 1);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for backend in Backend::ALL {
            assert_eq!(backend.name().parse::<Backend>(), Ok(backend));
            assert_eq!(backend.to_string(), backend.name());
        }
        assert_eq!(
            "AVX2".parse::<Backend>(),
            Ok(Backend::Avx2),
            "names are case-insensitive"
        );
        assert!("mmx".parse::<Backend>().is_err());
    }

    #[test]
    fn best_supported_is_widest_supported() {
        let best = Backend::best_supported();
        assert!(best.is_supported());
        for backend in Backend::ALL {
            if backend.is_supported() {
                assert!(backend.lanes() <= best.lanes());
            }
        }
    }
}
