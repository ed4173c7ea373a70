//! crates/logging/src/tracing_bridge.rs
//! Installs a stderr `fmt` subscriber filtered by verbosity.
//!
//! `RUST_LOG`, when set, replaces the verbosity-derived directive entirely so
//! engine targets can be tuned without touching the command line.

use std::io::IsTerminal;

use tracing::Subscriber;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use super::config::VerbosityConfig;

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// A filter directive could not be parsed.
    #[error("invalid log filter: {0}")]
    InvalidDirective(#[from] tracing_subscriber::filter::ParseError),

    /// A global subscriber was already installed.
    #[error("logging already initialised: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

/// Builds the event filter.
///
/// A non-empty `env_override` takes precedence over `config`.
pub fn build_filter(
    config: VerbosityConfig,
    env_override: Option<&str>,
) -> Result<EnvFilter, LoggingError> {
    let directive = match env_override.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_owned(),
        _ => config.directive(),
    };
    Ok(EnvFilter::try_new(directive)?)
}

/// Builds a subscriber that formats events to `writer`.
pub fn build_subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(true)
            .without_time(),
    )
}

/// Installs the global subscriber writing to stderr.
///
/// # Example
///
/// ```rust,no_run
/// use logging::{VerbosityConfig, init_tracing};
///
/// init_tracing(VerbosityConfig::from_verbose_level(2)).unwrap();
/// tracing::debug!(target: "sha_simd::dispatch", backend = "avx2", "backend selected");
/// ```
pub fn init_tracing(config: VerbosityConfig) -> Result<(), LoggingError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(config, env.as_deref())?;
    let ansi = std::io::stderr().is_terminal();
    build_subscriber(filter, std::io::stderr, ansi).try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_wins() {
        let filter = build_filter(VerbosityConfig::default(), Some("sha_simd=trace")).unwrap();
        assert_eq!(filter.to_string(), "sha_simd=trace");
    }

    #[test]
    fn blank_override_falls_back_to_verbosity() {
        let filter = build_filter(VerbosityConfig::from_verbose_level(1), Some("  ")).unwrap();
        assert_eq!(filter.to_string(), "info");
    }

    #[test]
    fn invalid_directive_is_reported() {
        let err = build_filter(VerbosityConfig::default(), Some("sha_simd=loud")).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidDirective(_)));
    }
}
