use std::path::Path;

use crate::ai::{MctsAgent, MinimaxAgent};
use crate::error::ConfigError;
use crate::game::{Board, DEFAULT_COLS, DEFAULT_ROWS};

/// Board dimensions.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

/// Minimax engine settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MinimaxConfig {
    pub difficulty: String,
}

impl Default for MinimaxConfig {
    fn default() -> Self {
        MinimaxConfig {
            difficulty: "medium".to_string(),
        }
    }
}

/// MCTS engine settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MctsConfig {
    pub difficulty: String,
}

impl Default for MctsConfig {
    fn default() -> Self {
        MctsConfig {
            difficulty: "medium".to_string(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
///
/// Difficulty labels are not validated here: the engines accept any label
/// and run unrecognized ones with their medium settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub minimax: MinimaxConfig,
    pub mcts: MctsConfig,
    /// Optional RNG seed for reproducible engine runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            board: BoardConfig::default(),
            minimax: MinimaxConfig::default(),
            mcts: MctsConfig::default(),
            seed: None,
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
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.rows == 0 {
            return Err(ConfigError::Validation("board.rows must be > 0".into()));
        }
        if self.board.cols == 0 {
            return Err(ConfigError::Validation("board.cols must be > 0".into()));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }

    /// Empty board with the configured dimensions.
    pub fn build_board(&self) -> Board {
        Board::new(self.board.rows, self.board.cols)
    }

    /// Minimax engine with the configured difficulty, seeded when a seed is
    /// set.
    pub fn build_minimax(&self) -> MinimaxAgent {
        match self.seed {
            Some(seed) => MinimaxAgent::with_seed(&self.minimax.difficulty, seed),
            None => MinimaxAgent::new(&self.minimax.difficulty),
        }
    }

    /// MCTS engine with the configured difficulty, seeded when a seed is
    /// set.
    pub fn build_mcts(&self) -> MctsAgent {
        match self.seed {
            Some(seed) => MctsAgent::with_seed(&self.mcts.difficulty, seed),
            None => MctsAgent::new(&self.mcts.difficulty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::Agent;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
rows = 8
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.rows, 8);
        // Other fields should be defaults
        assert_eq!(config.board.cols, 7);
        assert_eq!(config.minimax.difficulty, "medium");
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.board.rows, 6);
        assert_eq!(config.board.cols, 7);
        assert_eq!(config.mcts.difficulty, "medium");
    }

    #[test]
    fn test_validation_rejects_zero_rows() {
        let mut config = AppConfig::default();
        config.board.rows = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_cols() {
        let mut config = AppConfig::default();
        config.board.cols = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unrecognized_difficulty_is_accepted() {
        let toml_str = r#"
[minimax]
difficulty = "grandmaster"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        config.validate().unwrap();
        // Unknown labels run with the medium search depth
        assert_eq!(config.build_minimax().max_depth(), 4);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[minimax]
difficulty = "hard"

[mcts]
difficulty = "easy"
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.minimax.difficulty, "hard");
        assert_eq!(config.mcts.difficulty, "easy");
        // Others are defaults
        assert_eq!(config.board.rows, 6);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = AppConfig::load(Path::new("nonexistent_config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.board.rows, 6);
        assert_eq!(config.minimax.difficulty, "medium");
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
    }

    #[test]
    fn test_seed_makes_engines_reproducible() {
        let mut config = AppConfig::default();
        config.minimax.difficulty = "easy".to_string();
        config.seed = Some(17);

        let board = config.build_board();
        let first = config.build_minimax().select_move(&board);
        let second = config.build_minimax().select_move(&board);
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_board_uses_configured_dimensions() {
        let mut config = AppConfig::default();
        config.board.rows = 4;
        config.board.cols = 5;

        let board = config.build_board();
        assert_eq!(board.rows(), 4);
        assert_eq!(board.cols(), 5);
        assert_eq!(board.legal_moves(), vec![0, 1, 2, 3, 4]);
    }
}
