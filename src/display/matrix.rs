use crate::color::Rgb;
use crate::game::{Scene, BOARD_SIZE};

/// Side length of the LED matrix, one LED per board cell
pub const MATRIX_SIZE: usize = BOARD_SIZE;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DisplayError {
    #[error("Pixel ({x}, {y}) is outside the {size}x{size} matrix")]
    OutOfRange { x: i32, y: i32, size: usize },
}

/// What an 8x8 LED matrix can do
pub trait LedMatrix {
    /// Turn every LED off
    fn clear(&mut self);

    /// Light a single LED; coordinates outside the matrix are an error
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb) -> Result<(), DisplayError>;

    /// Scroll a text across the matrix, `speed` seconds per column
    fn show_message(&mut self, text: &str, speed: f32, color: Rgb);
}

/// Draw a game frame, wiping the previous one first
///
/// Cells off the matrix (the head of a snake that ran into the wall) are
/// skipped.
pub fn draw_scene<M: LedMatrix + ?Sized>(matrix: &mut M, scene: &Scene) {
    matrix.clear();

    let pixels = scene
        .snake
        .iter()
        .map(|pos| (pos, scene.snake_color))
        .chain(std::iter::once((&scene.apple, scene.apple_color)));

    for (pos, color) in pixels {
        if let Err(err) = matrix.set_pixel(pos.x, pos.y, color) {
            tracing::warn!(%err, "Skipping pixel");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::FrameBuffer;
    use crate::game::{CollisionType, GameStatus, Position};

    fn scene(snake: &[(i32, i32)], apple: (i32, i32)) -> Scene {
        Scene {
            snake: snake.iter().copied().map(Position::from).collect(),
            snake_color: Rgb::GREEN,
            apple: apple.into(),
            apple_color: Rgb::RED,
            score: 0,
            status: GameStatus::Active,
        }
    }

    #[test]
    fn test_draw_scene() {
        let mut matrix = FrameBuffer::new();
        draw_scene(&mut matrix, &scene(&[(4, 4), (3, 4)], (0, 7)));

        assert_eq!(matrix.pixel(4, 4), Some(Rgb::GREEN));
        assert_eq!(matrix.pixel(3, 4), Some(Rgb::GREEN));
        assert_eq!(matrix.pixel(0, 7), Some(Rgb::RED));
        assert_eq!(matrix.lit_pixels().count(), 3);
    }

    #[test]
    fn test_stale_pixels_are_cleared() {
        let mut matrix = FrameBuffer::new();
        draw_scene(&mut matrix, &scene(&[(4, 4), (3, 4), (2, 4)], (0, 0)));
        draw_scene(&mut matrix, &scene(&[(5, 4), (4, 4), (3, 4)], (0, 0)));

        assert_eq!(matrix.pixel(2, 4), Some(Rgb::OFF));
        assert_eq!(matrix.lit_pixels().count(), 4);
    }

    #[test]
    fn test_off_board_head_is_skipped() {
        let mut matrix = FrameBuffer::new();
        let mut crashed = scene(&[(8, 4), (7, 4), (6, 4)], (0, 0));
        crashed.status = GameStatus::Over(CollisionType::Wall);

        draw_scene(&mut matrix, &crashed);

        assert_eq!(matrix.lit_pixels().count(), 3);
    }
}
