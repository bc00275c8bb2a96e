//! The LED matrix the programs draw on
//!
//! [`LedMatrix`] is the device contract. [`FrameBuffer`] implements it in
//! memory so the terminal renderer can show what the hardware would.

pub mod frame_buffer;
pub mod matrix;

pub use frame_buffer::{FrameBuffer, Message};
pub use matrix::{draw_scene, DisplayError, LedMatrix, MATRIX_SIZE};
