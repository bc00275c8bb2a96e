use std::collections::VecDeque;
use std::fmt;

use rand::Rng;

use super::action::Direction;
use super::error::GameError;
use crate::color::Rgb;

/// Width and height of the square board, one cell per LED
pub const BOARD_SIZE: usize = 8;

/// Where a fresh snake starts, head first
pub const STARTING_BODY: [Position; 3] = [
    Position::new(4, 4),
    Position::new(3, 4),
    Position::new(2, 4),
];

/// Heading of a fresh snake
pub const STARTING_DIRECTION: Direction = Direction::Right;

/// A position on the game grid
///
/// Coordinates are signed so a head that walked off the board is still
/// representable; [`Position::is_on_board`] tells the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    pub fn is_on_board(&self, board_size: usize) -> bool {
        let size = board_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

impl TryFrom<&[i32]> for Position {
    type Error = GameError;

    fn try_from(coordinates: &[i32]) -> Result<Self, Self::Error> {
        match coordinates {
            [x, y] => Ok(Self::new(*x, *y)),
            other => Err(GameError::MalformedPosition(other.len())),
        }
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Outcome of a move request that did not end the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// The snake advanced one cell
    Moved,
    /// The request pointed straight back into the neck and was dropped
    Reversal,
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    body: Vec<Position>,
    /// Direction of the last successful move
    direction: Direction,
    /// Most recently dropped tail positions, newest at the back
    trace: VecDeque<Position>,
    trace_capacity: usize,
    max_length: usize,
    color: Rgb,
}

impl Snake {
    pub const COLOR: Rgb = Rgb::GREEN;

    /// Create a snake from an explicit body (head first)
    ///
    /// The snake can regrow at most `trace_capacity` segments beyond this body.
    pub fn new(body: Vec<Position>, direction: Direction, trace_capacity: usize) -> Self {
        let max_length = body.len() + trace_capacity;
        Self {
            body,
            direction,
            trace: VecDeque::with_capacity(trace_capacity),
            trace_capacity,
            max_length,
            color: Self::COLOR,
        }
    }

    /// The snake every game starts with
    pub fn starting(trace_capacity: usize) -> Self {
        Self::new(STARTING_BODY.to_vec(), STARTING_DIRECTION, trace_capacity)
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn body(&self) -> &[Position] {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Dropped tail positions still available for regrowth, oldest first
    pub fn trace(&self) -> impl Iterator<Item = &Position> {
        self.trace.iter()
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Check if position is occupied by any segment, head included
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Advance one cell towards `requested`
    ///
    /// A request opposite to the current heading is ignored. Moving onto any
    /// segment, including the tail that is about to leave, is a
    /// [`GameError::SelfCollision`] and leaves the snake untouched. The new
    /// head is not checked against the board.
    pub fn move_snake(&mut self, requested: Direction) -> Result<Movement, GameError> {
        if self.direction.is_opposite(requested) {
            return Ok(Movement::Reversal);
        }

        let new_head = self.head().moved_in_direction(requested);
        if self.occupies(new_head) {
            return Err(GameError::SelfCollision(new_head));
        }

        self.body.insert(0, new_head);
        if let Some(tail) = self.body.pop() {
            self.push_trace(tail);
        }
        self.direction = requested;

        Ok(Movement::Moved)
    }

    /// Returns true if the head sits on the apple, regrowing one segment
    ///
    /// Growth takes the most recently dropped tail from the trace and stops
    /// once the snake reaches its maximum length or the trace is empty.
    pub fn eat(&mut self, apple: Position) -> bool {
        if apple != self.head() {
            return false;
        }

        if self.body.len() < self.max_length {
            if let Some(tail) = self.trace.pop_back() {
                self.body.push(tail);
            }
        }

        true
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    fn push_trace(&mut self, tail: Position) {
        if self.trace_capacity == 0 {
            return;
        }
        if self.trace.len() >= self.trace_capacity {
            self.trace.pop_front();
        }
        self.trace.push_back(tail);
    }
}

/// The apple the snake is chasing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Apple {
    position: Position,
}

impl Apple {
    pub const COLOR: Rgb = Rgb::RED;

    /// Place an apple, refusing cells covered by the snake
    pub fn at(position: Position, snake_body: &[Position]) -> Result<Self, GameError> {
        if snake_body.contains(&position) {
            return Err(GameError::OccupiedPosition(position));
        }
        Ok(Self { position })
    }

    /// Place an apple on a uniformly random free cell
    ///
    /// Samples until a free cell turns up. The snake never covers the whole
    /// board, its length being capped well below `board_size²`.
    pub fn respawn<R: Rng + ?Sized>(board_size: usize, snake_body: &[Position], rng: &mut R) -> Self {
        debug_assert!(snake_body.len() < board_size * board_size);
        loop {
            let x = rng.gen_range(0..board_size) as i32;
            let y = rng.gen_range(0..board_size) as i32;

            match Self::at(Position::new(x, y), snake_body) {
                Ok(apple) => return apple,
                Err(err) => tracing::trace!(%err, "Apple sample rejected"),
            }
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Whether play is going on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    /// The game ended; the board is frozen until the next reset
    Over(CollisionType),
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub apple: Apple,
    pub score: u32,
    pub status: GameStatus,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, apple: Apple) -> Self {
        Self {
            snake,
            apple,
            score: 0,
            status: GameStatus::Active,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == GameStatus::Active
    }
}
