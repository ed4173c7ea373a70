//! Error types.
//!
//! Hashing itself never fails. Errors only arise when a caller asks for a
//! backend the CPU cannot run, names one that does not exist, or rebuilds a
//! midstate from an impossible byte count.

use crate::dispatcher::Backend;

/// Error raised while selecting a vector backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The requested backend needs CPU features that were not detected.
    #[error("backend {backend} is not supported on this CPU")]
    Unsupported {
        /// Backend that was requested.
        backend: Backend,
    },

    /// The backend name did not match any known backend.
    #[error("unknown backend name: {0:?}")]
    UnknownName(String),
}

/// Error raised when rebuilding a streaming engine from a midstate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MidstateError {
    /// The byte count is not a whole number of blocks.
    #[error("midstate covers {bytes} bytes, which is not a multiple of the {block_bytes}-byte block")]
    UnalignedLength {
        /// Bytes claimed to have been hashed.
        bytes: u64,
        /// Block size of the algorithm.
        block_bytes: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        let err = BackendError::Unsupported {
            backend: Backend::Avx512,
        };
        assert_eq!(err.to_string(), "backend avx512 is not supported on this CPU");

        let err = BackendError::UnknownName("mmx".to_owned());
        assert_eq!(err.to_string(), "unknown backend name: \"mmx\"");

        let err = MidstateError::UnalignedLength {
            bytes: 65,
            block_bytes: 64,
        };
        assert!(err.to_string().contains("65 bytes"));
    }
}
