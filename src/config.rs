use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::game::GameConfig;

/// Everything the programs read from the configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub game: GameConfig,
    pub display: DisplayConfig,
}

/// Presentation settings for the LED matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub text_color: Rgb,
    /// Seconds per scrolled column
    pub scroll_speed: f32,
    /// How long the final score stays up before the next game
    #[serde(with = "humantime_serde")]
    pub game_over_pause: Duration,
    pub scanner_color: Rgb,
    pub scanner_row: u8,
    #[serde(with = "humantime_serde")]
    pub scanner_step: Duration,
    #[serde(with = "humantime_serde")]
    pub scanner_bounce_pause: Duration,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            text_color: Rgb::WHITE,
            scroll_speed: 0.1,
            game_over_pause: Duration::from_secs(2),
            scanner_color: Rgb::RED,
            scanner_row: 0,
            scanner_step: Duration::from_millis(50),
            scanner_bounce_pause: Duration::from_millis(100),
        }
    }
}

impl Config {
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let config_str =
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ConfigError::ReadingFile {
                    path: path.to_path_buf(),
                    source,
                })?;

        let config: Self = toml::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the game cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let capacity = self.game.trace_capacity;
        if capacity > GameConfig::MAX_TRACE_CAPACITY {
            return Err(ConfigError::TraceTooLong {
                capacity,
                max: GameConfig::MAX_TRACE_CAPACITY,
            });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file from path '{}'", .path.display())]
    ReadingFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    ParsingConfig(#[from] toml::de::Error),

    #[error("Trace capacity {capacity} would let the snake fill the board, at most {max} is allowed")]
    TraceTooLong { capacity: usize, max: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_load_full_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("snake.toml");
        std::fs::write(
            &path,
            r#"
            [game]
            seed = 7
            reset_hold = "1500ms"
            apple_color = [200, 0, 0]

            [display]
            scroll_speed = 0.05
            game_over_pause = "3s"
            scanner_row = 4
            "#,
        )
        .unwrap();

        let config = Config::load(&path).await.unwrap();

        assert_eq!(config.game.seed, Some(7));
        assert_eq!(config.game.reset_hold, Duration::from_millis(1500));
        assert_eq!(config.game.apple_color, Rgb(200, 0, 0));
        assert_eq!(config.game.trace_capacity, 8);
        assert_eq!(config.display.scroll_speed, 0.05);
        assert_eq!(config.display.game_over_pause, Duration::from_secs(3));
        assert_eq!(config.display.scanner_row, 4);
        assert_eq!(config.display.scanner_step, Duration::from_millis(50));
    }

    #[tokio::test]
    async fn test_empty_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.toml");
        std::fs::write(&path, "").unwrap();

        assert_eq!(Config::load(&path).await.unwrap(), Config::default());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nope.toml");

        let err = Config::load(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::ReadingFile { .. }));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.toml");
        std::fs::write(&path, "[game]\ntrace_capacity = \"long\"\n").unwrap();

        let err = Config::load(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::ParsingConfig(_)));
    }

    #[tokio::test]
    async fn test_trace_filling_the_board_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("long.toml");
        std::fs::write(&path, "[game]\ntrace_capacity = 61\n").unwrap();

        let err = Config::load(&path).await.unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TraceTooLong {
                capacity: 61,
                max: 60
            }
        ));
    }

    #[tokio::test]
    async fn test_longest_allowed_trace_loads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("longest.toml");
        std::fs::write(&path, "[game]\ntrace_capacity = 60\n").unwrap();

        let config = Config::load(&path).await.unwrap();
        assert_eq!(config.game.trace_capacity, 60);
    }

    #[tokio::test]
    async fn test_board_size_is_not_configurable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("board.toml");
        std::fs::write(&path, "[game]\nboard_size = 16\n").unwrap();

        let err = Config::load(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::ParsingConfig(_)));
    }
}
