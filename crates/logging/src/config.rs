//! crates/logging/src/config.rs
//! Verbosity configuration and its mapping onto tracing filter directives.

use std::fmt;

/// Engine event targets whose visibility depends on verbosity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineTarget {
    /// Backend detection and overrides (`sha_simd::dispatch`).
    Dispatch,
    /// Lane grouping of batch operations (`sha_simd::batch`).
    Batch,
    /// Merkle reduction rounds (`sha_simd::merkle`).
    Merkle,
}

impl EngineTarget {
    /// Every engine target.
    pub const ALL: [Self; 3] = [Self::Dispatch, Self::Batch, Self::Merkle];

    /// Tracing target string.
    pub const fn target(self) -> &'static str {
        match self {
            Self::Dispatch => "sha_simd::dispatch",
            Self::Batch => "sha_simd::batch",
            Self::Merkle => "sha_simd::merkle",
        }
    }

    /// Lowest verbosity at which debug events for this target are shown.
    pub const fn debug_level(self) -> u8 {
        match self {
            Self::Dispatch => 2,
            Self::Batch | Self::Merkle => 3,
        }
    }

    /// Maps a tracing target back to an engine target.
    pub fn from_target(target: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.target() == target)
    }
}

impl fmt::Display for EngineTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target())
    }
}

/// Verbosity selected on the command line.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Number of `-v` flags.
    pub level: u8,
}

impl VerbosityConfig {
    /// Create a configuration from a verbose level.
    ///
    /// Level 0 shows warnings and errors, 1 adds informational output, 2
    /// adds backend selection, 3 adds every engine debug event and 4 or more
    /// enables trace output.
    pub const fn from_verbose_level(level: u8) -> Self {
        Self { level }
    }

    /// Default level for events outside the engine targets.
    pub const fn base_level(&self) -> &'static str {
        match self.level {
            0 => "warn",
            1..=2 => "info",
            3 => "debug",
            _ => "trace",
        }
    }

    /// True when debug events for `target` pass at this verbosity.
    pub const fn shows_debug(&self, target: EngineTarget) -> bool {
        self.level >= target.debug_level()
    }

    /// Filter directive string understood by `EnvFilter`.
    pub fn directive(&self) -> String {
        let mut directive = self.base_level().to_owned();
        if self.level >= 4 {
            return directive;
        }
        for target in EngineTarget::ALL {
            if self.shows_debug(target) {
                directive.push_str(&format!(",{target}=debug"));
            }
        }
        directive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_level_only_warns() {
        let config = VerbosityConfig::from_verbose_level(0);
        assert_eq!(config.directive(), "warn");
        assert!(EngineTarget::ALL.iter().all(|t| !config.shows_debug(*t)));
    }

    #[test]
    fn level_two_enables_dispatch_debug() {
        let config = VerbosityConfig::from_verbose_level(2);
        assert_eq!(config.directive(), "info,sha_simd::dispatch=debug");
        assert!(!config.shows_debug(EngineTarget::Merkle));
    }

    #[test]
    fn level_three_enables_all_engine_targets() {
        let directive = VerbosityConfig::from_verbose_level(3).directive();
        assert!(directive.starts_with("debug"));
        for target in EngineTarget::ALL {
            assert!(directive.contains(&format!("{target}=debug")));
        }
    }

    #[test]
    fn high_levels_trace_everything() {
        assert_eq!(VerbosityConfig::from_verbose_level(4).directive(), "trace");
        assert_eq!(VerbosityConfig::from_verbose_level(u8::MAX).directive(), "trace");
    }

    #[test]
    fn target_lookup() {
        assert_eq!(
            EngineTarget::from_target("sha_simd::merkle"),
            Some(EngineTarget::Merkle)
        );
        assert_eq!(EngineTarget::from_target("sha_simd"), None);
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn verbosity_config_round_trips_through_json() {
            let config = VerbosityConfig::from_verbose_level(3);
            let json = serde_json::to_string(&config).unwrap();
            let decoded: VerbosityConfig = serde_json::from_str(&json).unwrap();
            assert_eq!(decoded.directive(), config.directive());
        }
    }
}
