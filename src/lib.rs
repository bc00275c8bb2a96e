//! SenseHAT Snake - demo programs for an 8x8 LED matrix
//!
//! This library provides:
//! - Core game logic (game module), free of any I/O
//! - The LED matrix contract and an in-memory matrix (display module)
//! - Keyboard emulation of the joystick (input module)
//! - TUI rendering of the matrix (render module)
//! - The runnable programs: snake, hello and scanner (modes module)

pub mod color;
pub mod config;
pub mod display;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
