use super::state::Position;

/// Everything that can go wrong inside the rule engine
///
/// None of these escape [`Game`](super::Game): collisions become the
/// [`GameStatus::Over`](super::GameStatus::Over) state, unknown labels are
/// dropped and occupied apple positions are retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Position needs exactly two coordinates (x, y), got {0}")]
    MalformedPosition(usize),

    #[error("Unknown direction '{0}'")]
    UnknownDirection(String),

    #[error("Unknown joystick action '{0}'")]
    UnknownAction(String),

    #[error("Snake bit itself at {0}")]
    SelfCollision(Position),

    #[error("Snake left the board at {0}")]
    OutOfBounds(Position),

    #[error("Position {0} is occupied by the snake")]
    OccupiedPosition(Position),
}

impl GameError {
    /// Whether this error ends the current game
    pub fn is_collision(&self) -> bool {
        matches!(self, Self::SelfCollision(_) | Self::OutOfBounds(_))
    }
}
