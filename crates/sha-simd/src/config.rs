//! Runtime backend configuration.
//!
//! `SHA_SIMD_FORCE_BACKEND` pins the vector backend for the process. The
//! value is read once. A forced backend is always clamped to the detected
//! CPU capabilities, so the override can narrow the choice but never select a
//! path the hardware cannot run.

use std::str::FromStr;
use std::sync::OnceLock;

use crate::dispatcher::Backend;

/// Environment variable consulted by [`Dispatcher::detect`](crate::Dispatcher::detect).
pub const FORCE_BACKEND_ENV: &str = "SHA_SIMD_FORCE_BACKEND";

/// Requested backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ForceBackend {
    /// Pick the widest supported backend.
    #[default]
    Auto,
    /// Use this backend if the CPU supports it.
    Pinned(Backend),
}

impl ForceBackend {
    /// Parses an override value. Unrecognised and empty values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if value.eq_ignore_ascii_case("auto") {
            return Some(Self::Auto);
        }
        Backend::from_str(value).ok().map(Self::Pinned)
    }
}

/// Backend selection after applying overrides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    /// Selection requested through the environment.
    pub requested: ForceBackend,
    /// Backend actually used.
    pub effective: Backend,
}

impl BackendConfig {
    /// Clamps `requested` against the `detected` best backend.
    #[must_use]
    pub fn resolve(requested: ForceBackend, detected: Backend) -> Self {
        let effective = match requested {
            ForceBackend::Auto => detected,
            ForceBackend::Pinned(backend) if backend.is_supported() => backend,
            ForceBackend::Pinned(_) => detected,
        };
        Self {
            requested,
            effective,
        }
    }
}

fn read_env_override() -> ForceBackend {
    std::env::var(FORCE_BACKEND_ENV)
        .ok()
        .and_then(|value| ForceBackend::parse(&value))
        .unwrap_or_default()
}

/// Override requested through the environment, read once per process.
pub fn requested_override() -> ForceBackend {
    static OVERRIDE: OnceLock<ForceBackend> = OnceLock::new();
    *OVERRIDE.get_or_init(read_env_override)
}
