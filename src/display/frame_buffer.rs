use super::matrix::{DisplayError, LedMatrix, MATRIX_SIZE};
use crate::color::Rgb;

/// A text scrolling across the matrix
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    /// Seconds per scrolled column
    pub speed: f32,
    pub color: Rgb,
}

/// In-memory LED matrix
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    pixels: [[Rgb; MATRIX_SIZE]; MATRIX_SIZE],
    message: Option<Message>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: [[Rgb::OFF; MATRIX_SIZE]; MATRIX_SIZE],
            message: None,
        }
    }

    /// Colour at (x, y), `None` off the matrix
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb> {
        self.pixels.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb; MATRIX_SIZE]> {
        self.pixels.iter()
    }

    /// Every LED that is on, as (x, y, colour)
    pub fn lit_pixels(&self) -> impl Iterator<Item = (usize, usize, Rgb)> + '_ {
        self.pixels.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, color)| !color.is_off())
                .map(move |(x, color)| (x, y, *color))
        })
    }

    /// The message currently scrolling, if any
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LedMatrix for FrameBuffer {
    fn clear(&mut self) {
        self.pixels = [[Rgb::OFF; MATRIX_SIZE]; MATRIX_SIZE];
        self.message = None;
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) -> Result<(), DisplayError> {
        let out_of_range = DisplayError::OutOfRange {
            x,
            y,
            size: MATRIX_SIZE,
        };
        let col = usize::try_from(x).map_err(|_| out_of_range.clone())?;
        let row = usize::try_from(y).map_err(|_| out_of_range.clone())?;

        let cell = self
            .pixels
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(out_of_range)?;
        *cell = color;
        Ok(())
    }

    fn show_message(&mut self, text: &str, speed: f32, color: Rgb) {
        self.pixels = [[Rgb::OFF; MATRIX_SIZE]; MATRIX_SIZE];
        self.message = Some(Message {
            text: text.to_string(),
            speed,
            color,
        });
    }
}
