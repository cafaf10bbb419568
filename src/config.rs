//! Recommender tuning, loadable from YAML.
//!
//! ```yaml
//! quiz:
//!   maxResults: 12
//!   minScore: 0
//! similar:
//!   maxResults: 4
//!   minScore: 0.5
//! historyLimit: 20
//! ```
//!
//! Every top-level key is optional and falls back to its default.

use crate::scoring::ScoringOptions;
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecommenderConfig {
    /// Bounds for quiz-mode point scoring.
    pub quiz: ScoringOptions,
    /// Bounds for normalized scoring against quiz answers.
    pub profile: ScoringOptions,
    /// Bounds for "similar recipes".
    pub similar: ScoringOptions,
    /// Similar recipes pulled per seed when hybrid results run short.
    pub similar_per_seed: usize,
    /// Maximum number of view history entries kept.
    pub history_limit: usize,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        RecommenderConfig {
            quiz: ScoringOptions::quiz(),
            profile: ScoringOptions::profile(),
            similar: ScoringOptions::similar(),
            similar_per_seed: 5,
            history_limit: 50,
        }
    }
}

impl RecommenderConfig {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: RecommenderConfig = serde_yaml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Utf8Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_yaml_str(&fs::read_to_string(path)?)?;
        debug!(%path, "loaded recommender config");
        Ok(config)
    }

    /// Rejects thresholds that are not finite numbers and a zero history
    /// limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, options) in [
            ("quiz", &self.quiz),
            ("profile", &self.profile),
            ("similar", &self.similar),
        ] {
            if !options.min_score.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "{name}.minScore must be a finite number"
                )));
            }
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid(
                "historyLimit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RecommenderConfig::default();
        assert_eq!(config.quiz, ScoringOptions::new(12, 0.0));
        assert_eq!(config.profile, ScoringOptions::new(12, 0.3));
        assert_eq!(config.similar, ScoringOptions::new(6, 0.4));
        assert_eq!(config.similar_per_seed, 5);
        assert_eq!(config.history_limit, 50);

        assert_eq!(RecommenderConfig::from_yaml_str("").unwrap(), config);
    }

    #[test]
    fn test_partial_override() {
        let config = RecommenderConfig::from_yaml_str(indoc! {"
            similar:
              maxResults: 4
              minScore: 0.5
            historyLimit: 20
        "})
        .unwrap();

        assert_eq!(config.similar, ScoringOptions::new(4, 0.5));
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.quiz, ScoringOptions::quiz());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            RecommenderConfig::from_yaml_str("historyLimit: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            RecommenderConfig::from_yaml_str(indoc! {"
                quiz:
                  maxResults: 12
                  minScore: .nan
            "}),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            RecommenderConfig::from_yaml_str("quiz: [1, 2]"),
            Err(ConfigError::YamlError(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("recommender.yaml");
        std::fs::write(&path, "similarPerSeed: 3\n").unwrap();

        let path = camino::Utf8PathBuf::from_path_buf(path).unwrap();
        let config = RecommenderConfig::from_path(&path).unwrap();
        assert_eq!(config.similar_per_seed, 3);

        assert!(matches!(
            RecommenderConfig::from_path(path.with_file_name("missing.yaml")),
            Err(ConfigError::IoError(_))
        ));
    }
}
