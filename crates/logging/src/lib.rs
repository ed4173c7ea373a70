#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns the command line's `-v` count into a `tracing`
//! subscriber. Each level widens an [`EnvFilter`](tracing_subscriber::EnvFilter)
//! directive, and the engine's debug targets (`sha_simd::dispatch`,
//! `sha_simd::batch`, `sha_simd::merkle`) switch on at the levels listed in
//! [`EngineTarget::debug_level`].
//!
//! # Invariants
//!
//! - Events go to stderr; stdout stays reserved for command output.
//! - `RUST_LOG` overrides the verbosity mapping when it is set and non-empty.
//! - Installing twice is an error, not a panic.
//!
//! # Examples
//!
//! ```
//! use logging::{VerbosityConfig, build_filter};
//!
//! let filter = build_filter(VerbosityConfig::from_verbose_level(2), None).unwrap();
//! assert!(filter.to_string().contains("sha_simd::dispatch=debug"));
//! ```

mod config;
mod tracing_bridge;

pub use config::{EngineTarget, VerbosityConfig};
pub use tracing_bridge::{LoggingError, build_filter, build_subscriber, init_tracing};
