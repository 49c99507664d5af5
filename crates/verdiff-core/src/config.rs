//! Diff engine configuration
//!
//! Every key has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! algorithm = "myers"
//! max_lines = 20000
//! max_line_tokens = 5000
//! timeout_ms = 250
//!
//! [collapse]
//! enabled = true
//! threshold = 6
//! context_lines = 3
//! ```

use crate::errors::{DiffError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default size cap for either side of a line diff
pub const DEFAULT_MAX_LINES: usize = 20_000;
/// Default size cap for either side of a word diff
pub const DEFAULT_MAX_LINE_TOKENS: usize = 5_000;
/// Default unchanged-run length above which a run is collapsed
pub const DEFAULT_COLLAPSE_THRESHOLD: usize = 6;
/// Default number of unchanged lines kept at each edge of a collapsed run
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Alignment algorithm used by the sequence differ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    /// Myers' O(ND) greedy alignment
    #[default]
    Myers,
    /// Patience diff (anchors on unique lines, then falls back to Myers)
    Patience,
    /// Classic dynamic-programming LCS
    Lcs,
}

impl From<DiffAlgorithm> for similar::Algorithm {
    fn from(algorithm: DiffAlgorithm) -> Self {
        match algorithm {
            DiffAlgorithm::Myers => similar::Algorithm::Myers,
            DiffAlgorithm::Patience => similar::Algorithm::Patience,
            DiffAlgorithm::Lcs => similar::Algorithm::Lcs,
        }
    }
}

/// Context collapsing policy for long unchanged runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollapsePolicy {
    pub enabled: bool,
    /// Runs strictly longer than this are collapsed
    pub threshold: usize,
    /// Unchanged lines kept before and after the separator
    pub context_lines: usize,
}

impl Default for CollapsePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: DEFAULT_COLLAPSE_THRESHOLD,
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    pub algorithm: DiffAlgorithm,
    /// Above this many lines on either side the field is diffed as one coarse replace block
    pub max_lines: usize,
    /// Above this many word tokens on either side a modified pair gets coarse word spans
    pub max_line_tokens: usize,
    /// Optional wall-clock deadline for each sequence alignment
    pub timeout_ms: Option<u64>,
    pub collapse: CollapsePolicy,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            algorithm: DiffAlgorithm::default(),
            max_lines: DEFAULT_MAX_LINES,
            max_line_tokens: DEFAULT_MAX_LINE_TOKENS,
            timeout_ms: None,
            collapse: CollapsePolicy::default(),
        }
    }
}

impl DiffConfig {
    pub fn with_algorithm(mut self, algorithm: DiffAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    pub fn with_max_line_tokens(mut self, max_line_tokens: usize) -> Self {
        self.max_line_tokens = max_line_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_collapse(mut self, collapse: CollapsePolicy) -> Self {
        self.collapse = collapse;
        self
    }

    /// Disable context collapsing; every line is returned
    pub fn without_collapse(mut self) -> Self {
        self.collapse.enabled = false;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Check cross-field constraints
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when a cap or threshold is zero, or when the context
    /// kept around a collapsed run would leave nothing to hide.
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0 {
            return Err(DiffError::invalid_config("`max_lines` must be at least 1"));
        }
        if self.max_line_tokens == 0 {
            return Err(DiffError::invalid_config(
                "`max_line_tokens` must be at least 1",
            ));
        }
        if self.collapse.threshold == 0 {
            return Err(DiffError::invalid_config(
                "`collapse.threshold` must be at least 1",
            ));
        }
        if self.collapse.context_lines.saturating_mul(2) > self.collapse.threshold {
            return Err(DiffError::invalid_config(format!(
                "`collapse.context_lines` ({}) must be at most half of `collapse.threshold` ({})",
                self.collapse.context_lines, self.collapse.threshold
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// `InvalidConfig` on malformed TOML, unknown keys, or failed validation.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: DiffConfig =
            toml::from_str(text).map_err(|e| DiffError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    ///
    /// `Io` when the file cannot be read, otherwise as [`DiffConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| DiffError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = DiffConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_lines, 20_000);
        assert_eq!(config.collapse.threshold, 6);
        assert_eq!(config.collapse.context_lines, 3);
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = DiffConfig::from_toml_str("").unwrap();
        assert_eq!(config, DiffConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = DiffConfig::from_toml_str(
            "algorithm = \"patience\"\ntimeout_ms = 50\n[collapse]\nthreshold = 10\n",
        )
        .unwrap();
        assert_eq!(config.algorithm, DiffAlgorithm::Patience);
        assert_eq!(config.timeout(), Some(Duration::from_millis(50)));
        assert_eq!(config.collapse.threshold, 10);
        assert_eq!(config.collapse.context_lines, DEFAULT_CONTEXT_LINES);
        assert!(config.collapse.enabled);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = DiffConfig::from_toml_str("max_line = 3\n").unwrap_err();
        assert!(matches!(err, DiffError::InvalidConfig { .. }));
    }

    #[test]
    fn test_context_must_fit_threshold() {
        let config = DiffConfig::default().with_collapse(CollapsePolicy {
            enabled: true,
            threshold: 4,
            context_lines: 3,
        });
        assert!(matches!(
            config.validate(),
            Err(DiffError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_zero_caps_rejected() {
        assert!(DiffConfig::default().with_max_lines(0).validate().is_err());
        assert!(DiffConfig::default()
            .with_max_line_tokens(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = DiffConfig::load("/nonexistent/verdiff.toml").unwrap_err();
        assert!(matches!(err, DiffError::Io { .. }));
    }
}
