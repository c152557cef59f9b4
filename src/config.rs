use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::difficulty::{DepthTable, Difficulty};
use crate::error::ConfigError;
use crate::search::{Searcher, TieBreak};
use crate::MAX_DEPTH;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub ai_vs_ai: AiVsAiConfig,
    pub leaderboard: LeaderboardConfig,
}

/// Search settings for games against a human.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(flatten)]
    pub depths: DepthTable,
    pub tie_break: TieBreak,
    /// Seed for randomized tie breaks, taken from the OS when unset
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depths: DepthTable::default(),
            tie_break: TieBreak::FirstBest,
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Builds a searcher using `tie_break` and this config's seed, if any
    pub fn searcher(&self, tie_break: TieBreak) -> Searcher {
        match self.seed {
            Some(seed) => Searcher::seeded(tie_break, seed),
            None => Searcher::with_tie_break(tie_break),
        }
    }
}

/// Settings for computer-vs-computer matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiVsAiConfig {
    pub difficulty: Difficulty,
    pub tie_break: TieBreak,
    /// Pause between moves when a single match is shown on screen
    pub move_delay_ms: u64,
}

impl Default for AiVsAiConfig {
    fn default() -> Self {
        AiVsAiConfig {
            difficulty: Difficulty::Hard,
            tie_break: TieBreak::RandomAmongBest,
            move_delay_ms: 1200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub path: PathBuf,
    pub match_log_path: PathBuf,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        LeaderboardConfig {
            path: PathBuf::from("leaderboard.txt"),
            match_log_path: PathBuf::from("ai_vs_ai_leaderboard.txt"),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let depths = &self.search.depths;
        for (name, depth) in [
            ("easy_depth", depths.easy_depth),
            ("medium_depth", depths.medium_depth),
            ("hard_depth", depths.hard_depth),
        ] {
            if depth == 0 {
                return Err(ConfigError::Validation(format!(
                    "search.{} must be > 0",
                    name
                )));
            }
            if depth > MAX_DEPTH {
                return Err(ConfigError::Validation(format!(
                    "search.{} must be <= {}",
                    name, MAX_DEPTH
                )));
            }
        }
        if depths.easy_depth > depths.medium_depth || depths.medium_depth > depths.hard_depth {
            return Err(ConfigError::Validation(
                "search depths must not decrease from easy to hard".into(),
            ));
        }
        Ok(())
    }

    /// The search depth for `difficulty`
    pub fn depth(&self, difficulty: Difficulty) -> u32 {
        self.search.depths.depth(difficulty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_difficulty_table() {
        let config = AppConfig::default();
        assert_eq!(config.depth(Difficulty::Easy), 1);
        assert_eq!(config.depth(Difficulty::Medium), 3);
        assert_eq!(config.depth(Difficulty::Hard), 5);
        assert_eq!(config.search.tie_break, TieBreak::FirstBest);
        assert_eq!(config.ai_vs_ai.tie_break, TieBreak::RandomAmongBest);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [search]
            hard_depth = 7
            tie_break = "random_among_best"
            seed = 42

            [ai_vs_ai]
            move_delay_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.depth(Difficulty::Easy), 1);
        assert_eq!(config.depth(Difficulty::Hard), 7);
        assert_eq!(config.search.tie_break, TieBreak::RandomAmongBest);
        assert_eq!(config.search.seed, Some(42));
        assert_eq!(config.ai_vs_ai.move_delay_ms, 0);
        assert_eq!(config.ai_vs_ai.difficulty, Difficulty::Hard);
        assert_eq!(config.leaderboard, LeaderboardConfig::default());
    }

    #[test]
    fn rejects_zero_depth() {
        let err = AppConfig::from_toml("[search]\neasy_depth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_runaway_depth() {
        let err = AppConfig::from_toml("[search]\nhard_depth = 99\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_decreasing_depths() {
        let err = AppConfig::from_toml("[search]\nmedium_depth = 6\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_tie_break() {
        let err = AppConfig::from_toml("[search]\ntie_break = \"coin_flip\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::TomlParse(_)));
    }
}
