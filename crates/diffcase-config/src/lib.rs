//! # diffcase-config
//!
//! **Tier 0 (Pure Settings)**
//!
//! Settings shared by the synthesis driver and the diagnostic runner.
//!
//! ## What belongs here
//! * `HarnessConfig` with Serde derive and defaults
//! * TOML parsing and validation
//! * Environment overrides
//!
//! ## What does NOT belong here
//! * Clap parsing (use the diffcase binary)
//! * Corpus I/O

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum number of cases kept in one corpus.
pub const DEFAULT_CORPUS_CAP: usize = 500;

/// Randomized draws attempted per synthesis run.
pub const DEFAULT_DRAW_BUDGET: usize = 10_000;

/// Absolute float tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Failure records kept in a diagnostic summary.
pub const DEFAULT_MAX_REPORTED_FAILURES: usize = 10;

/// Corpus location relative to the working directory.
pub const DEFAULT_CORPUS_PATH: &str = "test_cases/test_cases.json";

/// Environment variable that replaces `seed` when set.
pub const SEED_ENV: &str = "DIFFCASE_SEED";

/// Errors from loading or validating settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Where the diagnostic runner takes the expected value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ExpectedSource {
    /// Call the reference again on the persisted inputs.
    #[default]
    Rederive,
    /// Trust the `Expected` value stored in the corpus file.
    Persisted,
}

/// Harness settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Maximum corpus size (`N`).
    pub corpus_cap: usize,

    /// Randomized draws per synthesis run (`M`). Seeds and explicit
    /// examples are not counted.
    pub draw_budget: usize,

    /// Seed for the randomized draws.
    pub seed: u64,

    /// Absolute float tolerance used by the oracle.
    pub tolerance: f64,

    /// Corpus file, relative to the working directory.
    pub corpus_path: PathBuf,

    /// Failure records kept in the diagnostic summary.
    pub max_reported_failures: usize,

    /// Reject cases whose inputs were already accepted.
    pub dedupe: bool,

    /// Expected-value source for diagnostics.
    pub expected_source: ExpectedSource,

    /// Extra candidates the driver may evaluate after the corpus is full.
    pub extra_draws_after_full: usize,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            corpus_cap: DEFAULT_CORPUS_CAP,
            draw_budget: DEFAULT_DRAW_BUDGET,
            seed: 0,
            tolerance: DEFAULT_TOLERANCE,
            corpus_path: PathBuf::from(DEFAULT_CORPUS_PATH),
            max_reported_failures: DEFAULT_MAX_REPORTED_FAILURES,
            dedupe: false,
            expected_source: ExpectedSource::Rederive,
            extra_draws_after_full: 0,
        }
    }
}

impl HarnessConfig {
    /// Parse settings from a TOML string and validate them.
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corpus_cap == 0 {
            return Err(ConfigError::Invalid {
                field: "corpus_cap",
                reason: "must be at least 1".into(),
            });
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::Invalid {
                field: "tolerance",
                reason: format!("must be finite and non-negative, got {}", self.tolerance),
            });
        }
        if self.corpus_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid {
                field: "corpus_path",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (used by tests).
    ///
    /// Unparseable values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = lookup(SEED_ENV).and_then(|raw| raw.trim().parse().ok()) {
            self.seed = seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = HarnessConfig::default();
        assert_eq!(config.corpus_cap, 500);
        assert_eq!(config.draw_budget, 10_000);
        assert_eq!(config.tolerance, 1e-6);
        assert_eq!(config.max_reported_failures, 10);
        assert_eq!(config.corpus_path, PathBuf::from("test_cases/test_cases.json"));
        assert_eq!(config.expected_source, ExpectedSource::Rederive);
        assert!(!config.dedupe);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = HarnessConfig::from_toml("corpus_cap = 25\nseed = 7\n").unwrap();
        assert_eq!(config.corpus_cap, 25);
        assert_eq!(config.seed, 7);
        assert_eq!(config.draw_budget, DEFAULT_DRAW_BUDGET);
    }

    #[test]
    fn expected_source_parses_snake_case() {
        let config = HarnessConfig::from_toml("expected_source = \"persisted\"").unwrap();
        assert_eq!(config.expected_source, ExpectedSource::Persisted);
    }

    #[test]
    fn zero_cap_is_rejected() {
        let err = HarnessConfig::from_toml("corpus_cap = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "corpus_cap", .. }));
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let err = HarnessConfig::from_toml("tolerance = -1.0").unwrap_err();
        assert!(err.to_string().contains("tolerance"));
    }

    #[test]
    fn seed_override_replaces_seed() {
        let mut config = HarnessConfig::default();
        config.apply_overrides_from(|key| (key == SEED_ENV).then(|| " 42 ".to_string()));
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn garbage_seed_override_is_ignored() {
        let mut config = HarnessConfig {
            seed: 3,
            ..HarnessConfig::default()
        };
        config.apply_overrides_from(|_| Some("not-a-number".to_string()));
        assert_eq!(config.seed, 3);
    }

    #[test]
    fn unknown_type_is_a_toml_error() {
        let err = HarnessConfig::from_toml("corpus_cap = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
