use std::time::{Duration, Instant};

use crate::game::GameOver;

/// Session statistics shown next to the matrix
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub apples_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            apples_eaten: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_apple_eaten(&mut self) {
        self.apples_eaten += 1;
    }

    pub fn on_game_over(&mut self, result: GameOver) {
        self.games_played += 1;
        self.high_score = self.high_score.max(result.score);
    }

    /// Elapsed time of the current game as `MM:SS`
    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
