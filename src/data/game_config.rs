use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::cube::UnchangingFlip;

pub const DEFAULT_GAME_CONFIG_PATH: &str = "./assets/data/game_config.json";

/// Percent weights for the variant of each freshly generated box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariantWeights {
    pub regular: u32,
    pub unchanging: u32,
    pub fixed: u32,
}

impl Default for VariantWeights {
    fn default() -> Self {
        Self {
            regular: 85,
            unchanging: 10,
            fixed: 5,
        }
    }
}

impl VariantWeights {
    /// Sum of the three weights, `None` if it does not fit in a `u32`.
    pub fn total(&self) -> Option<u32> {
        self.regular
            .checked_add(self.unchanging)?
            .checked_add(self.fixed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub turns: u32,
    pub variant_weights: VariantWeights,
    /// Percent chance that a regular box holds a tool.
    pub regular_tool_chance: u32,
    /// Percent chance that an unchanging box holds a tool.
    pub unchanging_tool_chance: u32,
    pub unchanging_flip: UnchangingFlip,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            turns: 5,
            variant_weights: VariantWeights::default(),
            regular_tool_chance: 75,
            unchanging_tool_chance: 100,
            unchanging_flip: UnchangingFlip::default(),
            seed: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
    #[error("{0}")]
    Validation(String),
}

pub fn load_default_game_config() -> Result<GameConfig, ConfigError> {
    load_game_config(DEFAULT_GAME_CONFIG_PATH)
}

pub fn load_game_config(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_game_config(&raw).map_err(|err| match err {
        ConfigError::Json { source, .. } => ConfigError::Json {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })
}

pub fn parse_game_config(raw: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = serde_json::from_str(raw).map_err(|source| ConfigError::Json {
        path: "<inline>".to_string(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.turns == 0 {
            return Err(ConfigError::Validation(
                "turns must be >= 1".to_string(),
            ));
        }
        match self.variant_weights.total() {
            Some(100) => {}
            Some(total) => {
                return Err(ConfigError::Validation(format!(
                    "variant weights must sum to 100, got {}",
                    total
                )));
            }
            None => {
                return Err(ConfigError::Validation(
                    "variant weights overflow".to_string(),
                ));
            }
        }
        for (name, chance) in [
            ("regular_tool_chance", self.regular_tool_chance),
            ("unchanging_tool_chance", self.unchanging_tool_chance),
        ] {
            if chance > 100 {
                return Err(ConfigError::Validation(format!(
                    "{} must be within 0..=100, got {}",
                    name, chance
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.turns, 5);
        assert_eq!(config.variant_weights.total(), Some(100));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = parse_game_config(r#"{ "seed": 7, "unchanging_flip": "ignored" }"#).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.unchanging_flip, UnchangingFlip::Ignored);
        assert_eq!(config.regular_tool_chance, 75);
        assert_eq!(config.variant_weights, VariantWeights::default());
    }

    #[test]
    fn rejects_weights_not_summing_to_100() {
        let err = parse_game_config(
            r#"{ "variant_weights": { "regular": 50, "unchanging": 10, "fixed": 5 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn overflowing_weights_are_rejected() {
        let err = parse_game_config(
            r#"{ "variant_weights": { "regular": 4294967295, "unchanging": 1, "fixed": 100 } }"#,
        )
        .unwrap_err();
        match err {
            ConfigError::Validation(message) => assert!(message.contains("overflow")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn rejects_zero_turns_and_large_chances() {
        assert!(parse_game_config(r#"{ "turns": 0 }"#).is_err());
        assert!(parse_game_config(r#"{ "regular_tool_chance": 101 }"#).is_err());
    }

    #[test]
    fn shipped_config_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data/game_config.json");
        let config = load_game_config(path).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn default_path_loads_shipped_config() {
        // cargo runs tests from the package root
        assert_eq!(load_default_game_config().unwrap(), GameConfig::default());
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_game_config("./does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
