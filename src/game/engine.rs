use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{
    action::{Direction, InputEvent, StickAction, StickDirection},
    config::GameConfig,
    error::GameError,
    state::{
        Apple, CollisionType, GameState, GameStatus, Movement, Position, Snake, BOARD_SIZE,
    },
};
use crate::color::Rgb;

/// What a single input event did to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed
    Ignored,
    /// The snake advanced one cell
    Moved { ate_apple: bool },
    /// The snake crashed; the game is now over
    GameOver(CollisionType),
    /// The centre button was held long enough to restart
    Reset,
}

/// Final result of a finished game, read before the next reset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub score: u32,
    pub cause: CollisionType,
}

/// Everything a display needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub snake: Vec<Position>,
    pub snake_color: Rgb,
    pub apple: Position,
    pub apple_color: Rgb,
    pub score: u32,
    pub status: GameStatus,
}

/// The game engine that handles all game logic
///
/// Consumes one [`InputEvent`] at a time and never touches a display.
pub struct Game {
    config: GameConfig,
    rng: StdRng,
    state: GameState,
    hold: Hold,
}

/// Progress of the centre button towards a restart
#[derive(Debug, Clone, Copy, PartialEq)]
enum Hold {
    Idle,
    /// Timestamp of the first press or hold
    Since(f64),
    /// This hold already restarted the game; waits for the release
    Spent,
}

impl Game {
    /// Create a new game in the starting position
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let state = Self::fresh_state(&config, &mut rng);

        Self {
            config,
            rng,
            state,
            hold: Hold::Idle,
        }
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) {
        self.state = Self::fresh_state(&self.config, &mut self.rng);
        self.hold = Hold::Idle;
        tracing::info!(apple = %self.state.apple.position(), "New game");
    }

    fn fresh_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
        let snake = Snake::starting(config.trace_capacity).with_color(config.snake_color);
        let apple = Apple::respawn(BOARD_SIZE, snake.body(), rng);
        GameState::new(snake, apple)
    }

    /// Feed one joystick event into the game
    pub fn handle_input(&mut self, event: InputEvent) -> Transition {
        match (event.direction, event.action) {
            (StickDirection::Move(direction), StickAction::Pressed) => self.steer(direction),
            (StickDirection::Middle, action) => self.track_hold(action, event.timestamp),
            _ => Transition::Ignored,
        }
    }

    /// Feed a joystick event given as raw labels; unknown labels are dropped
    pub fn handle_raw_input(&mut self, direction: &str, action: &str, timestamp: f64) -> Transition {
        match InputEvent::parse(direction, action, timestamp) {
            Ok(event) => self.handle_input(event),
            Err(err) => {
                tracing::warn!(%err, "Dropping input event");
                Transition::Ignored
            }
        }
    }

    fn steer(&mut self, direction: Direction) -> Transition {
        if !self.state.is_alive() {
            return Transition::Ignored;
        }

        match self.state.snake.move_snake(direction) {
            Ok(Movement::Reversal) => {
                tracing::debug!(%direction, "Ignoring reversal");
                Transition::Ignored
            }
            Ok(Movement::Moved) => {
                let head = self.state.snake.head();
                if !head.is_on_board(BOARD_SIZE) {
                    return self.end(GameError::OutOfBounds(head));
                }

                let ate_apple = self.state.snake.eat(self.state.apple.position());
                if ate_apple {
                    self.state.score += 1;
                    self.state.apple =
                        Apple::respawn(BOARD_SIZE, self.state.snake.body(), &mut self.rng);
                    tracing::debug!(
                        score = self.state.score,
                        apple = %self.state.apple.position(),
                        "Apple eaten"
                    );
                }
                tracing::trace!(%head, %direction, "Moved");

                Transition::Moved { ate_apple }
            }
            Err(err) if err.is_collision() => self.end(err),
            Err(err) => {
                tracing::warn!(%err, "Move rejected");
                Transition::Ignored
            }
        }
    }

    /// Freeze the game after a collision error
    fn end(&mut self, err: GameError) -> Transition {
        let cause = match err {
            GameError::OutOfBounds(_) => CollisionType::Wall,
            _ => CollisionType::SelfCollision,
        };
        self.state.status = GameStatus::Over(cause);
        tracing::info!(%err, score = self.state.score, "Game over");
        Transition::GameOver(cause)
    }

    fn track_hold(&mut self, action: StickAction, timestamp: f64) -> Transition {
        match action {
            StickAction::Pressed => {
                self.hold = Hold::Since(timestamp);
                Transition::Ignored
            }
            StickAction::Held => match self.hold {
                Hold::Idle => {
                    self.hold = Hold::Since(timestamp);
                    Transition::Ignored
                }
                Hold::Since(start) if self.held_long_enough(start, timestamp) => {
                    let transition = self.reset_by_hold();
                    self.hold = Hold::Spent;
                    transition
                }
                Hold::Since(_) | Hold::Spent => Transition::Ignored,
            },
            StickAction::Released => match std::mem::replace(&mut self.hold, Hold::Idle) {
                Hold::Since(start) if self.held_long_enough(start, timestamp) => {
                    self.reset_by_hold()
                }
                _ => Transition::Ignored,
            },
        }
    }

    fn held_long_enough(&self, start: f64, now: f64) -> bool {
        now - start >= self.config.reset_hold.as_secs_f64()
    }

    fn reset_by_hold(&mut self) -> Transition {
        tracing::info!("Centre button held, restarting");
        self.reset();
        Transition::Reset
    }

    /// Snapshot of what to draw; reading it never changes the game
    pub fn render(&self) -> Scene {
        Scene {
            snake: self.state.snake.body().to_vec(),
            snake_color: self.state.snake.color(),
            apple: self.state.apple.position(),
            apple_color: self.config.apple_color,
            score: self.state.score,
            status: self.state.status,
        }
    }

    /// The final result while the game is over
    ///
    /// Read this before calling [`Game::reset`], which zeroes the score.
    pub fn game_over(&self) -> Option<GameOver> {
        match self.state.status {
            GameStatus::Over(cause) => Some(GameOver {
                score: self.state.score,
                cause,
            }),
            GameStatus::Active => None,
        }
    }

    /// Move the apple to a chosen cell
    pub fn place_apple(&mut self, position: Position) -> Result<(), GameError> {
        self.state.apple = Apple::at(position, self.state.snake.body())?;
        Ok(())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_over(&self) -> bool {
        !self.state.is_alive()
    }

    #[cfg(test)]
    fn with_snake(config: GameConfig, snake: Snake, apple: Position) -> Self {
        let mut game = Self::new(config);
        game.state.apple = Apple::at(apple, snake.body()).unwrap();
        game.state.snake = snake;
        game
    }
}
