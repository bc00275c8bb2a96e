use std::fmt;
use std::str::FromStr;

use super::error::GameError;

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        let (dx, dy) = self.delta();
        let (ox, oy) = other.delta();
        dx + ox == 0 && dy + oy == 0
    }

    /// Returns the delta (dx, dy) for moving in this direction
    ///
    /// The y axis grows downwards, like the rows of the LED matrix.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(GameError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of the joystick an event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickDirection {
    Move(Direction),
    /// The centre push button
    Middle,
}

impl FromStr for StickDirection {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("middle") {
            return Ok(StickDirection::Middle);
        }
        s.parse().map(StickDirection::Move)
    }
}

impl From<Direction> for StickDirection {
    fn from(direction: Direction) -> Self {
        StickDirection::Move(direction)
    }
}

/// What happened to the joystick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickAction {
    Pressed,
    /// Repeated while the stick stays pushed
    Held,
    Released,
}

impl FromStr for StickAction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pressed" => Ok(StickAction::Pressed),
            "held" => Ok(StickAction::Held),
            "released" => Ok(StickAction::Released),
            _ => Err(GameError::UnknownAction(s.to_string())),
        }
    }
}

/// A single joystick event, as delivered by the input device
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEvent {
    pub direction: StickDirection,
    pub action: StickAction,
    /// Seconds, on any monotonic clock shared by all events of a session
    pub timestamp: f64,
}

impl InputEvent {
    pub fn new(direction: impl Into<StickDirection>, action: StickAction, timestamp: f64) -> Self {
        Self {
            direction: direction.into(),
            action,
            timestamp,
        }
    }

    pub fn pressed(direction: impl Into<StickDirection>, timestamp: f64) -> Self {
        Self::new(direction, StickAction::Pressed, timestamp)
    }

    /// Build an event from the raw labels a joystick driver reports
    pub fn parse(direction: &str, action: &str, timestamp: f64) -> Result<Self, GameError> {
        Ok(Self {
            direction: direction.parse()?,
            action: action.parse()?,
            timestamp,
        })
    }
}
