use std::io;
use std::path::PathBuf;

use sha_simd::BackendError;

use crate::hex::HexError;

/// Errors reported by the command line front end.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// An input could not be read.
    #[error("{}: {source}", path.display())]
    Read {
        /// Path as given on the command line.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A Merkle leaf line was not a valid digest.
    #[error("line {line}: {source}")]
    InvalidLeaf {
        /// One-based line number.
        line: usize,
        /// Decoding failure.
        #[source]
        source: HexError,
    },

    /// The operation needs a digest half the block size.
    #[error("{operation} is not available for {algorithm}")]
    NotChunked {
        /// Requested operation.
        operation: &'static str,
        /// Selected algorithm.
        algorithm: &'static str,
    },

    /// The requested backend cannot run here.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Writing results failed.
    #[error("write failed: {0}")]
    Output(#[from] io::Error),
}
