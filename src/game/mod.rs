//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The joystick feeds [`InputEvent`]s into a [`Game`], and whoever owns the
//! LED matrix draws the [`Scene`] it renders.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, InputEvent, StickAction, StickDirection};
pub use config::GameConfig;
pub use engine::{Game, GameOver, Scene, Transition};
pub use error::GameError;
pub use state::{
    Apple, CollisionType, GameState, GameStatus, Movement, Position, Snake, BOARD_SIZE,
};
