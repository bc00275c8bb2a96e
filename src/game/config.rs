use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::state::{Apple, Snake, BOARD_SIZE, STARTING_BODY};
use crate::color::Rgb;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// How many dropped tail positions the snake remembers for regrowing
    pub trace_capacity: usize,
    /// How long the centre button has to be held to restart
    #[serde(with = "humantime_serde")]
    pub reset_hold: Duration,
    /// Seed for apple placement, random when unset
    pub seed: Option<u64>,
    pub snake_color: Rgb,
    pub apple_color: Rgb,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            trace_capacity: 8,
            reset_hold: Duration::from_secs(2),
            seed: None,
            snake_color: Snake::COLOR,
            apple_color: Apple::COLOR,
        }
    }
}

impl GameConfig {
    /// Largest trace that still leaves a free cell for the apple at full length
    pub const MAX_TRACE_CAPACITY: usize = BOARD_SIZE * BOARD_SIZE - STARTING_BODY.len() - 1;

    /// Default configuration with a fixed apple seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Longest the snake can grow: the starting body plus one segment per trace slot
    pub fn max_snake_length(&self) -> usize {
        STARTING_BODY.len() + self.trace_capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.trace_capacity, 8);
        assert_eq!(config.reset_hold, Duration::from_secs(2));
        assert_eq!(config.seed, None);
        assert_eq!(config.max_snake_length(), 11);
    }

    #[test]
    fn test_longest_snake_leaves_one_free_cell() {
        let config = GameConfig {
            trace_capacity: GameConfig::MAX_TRACE_CAPACITY,
            ..Default::default()
        };
        assert_eq!(config.max_snake_length(), BOARD_SIZE * BOARD_SIZE - 1);
    }

    #[test]
    fn test_partial_toml() {
        let config: GameConfig = toml::from_str(
            r#"
            reset_hold = "3s"
            seed = 42
            "#,
        )
        .unwrap();
        assert_eq!(config.reset_hold, Duration::from_secs(3));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.trace_capacity, 8);
        assert_eq!(config.snake_color, Rgb::GREEN);
    }
}
