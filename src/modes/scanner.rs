//! A single light sweeping back and forth along one row, like the front
//! scanner of a certain talking car

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{interval, sleep_until, Instant};

use crate::color::Rgb;
use crate::config::DisplayConfig;
use crate::display::{FrameBuffer, LedMatrix, MATRIX_SIZE};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

use super::terminal::{next_event, TerminalSession, Tui};

/// Position and heading of the scanning light
#[derive(Debug, Clone, PartialEq)]
pub struct Scanner {
    x: i32,
    step: i32,
    row: i32,
    color: Rgb,
    step_delay: Duration,
    bounce_pause: Duration,
}

impl Scanner {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            x: 0,
            step: 1,
            row: i32::from(display.scanner_row).min(MATRIX_SIZE as i32 - 1),
            color: display.scanner_color,
            step_delay: display.scanner_step,
            bounce_pause: display.scanner_bounce_pause,
        }
    }

    /// Advance one step and return how long to wait before the next
    ///
    /// Inside the row the light is redrawn; one past either end the
    /// direction flips and the matrix is left as it is for a short pause.
    pub fn tick<M: LedMatrix + ?Sized>(&mut self, matrix: &mut M) -> Duration {
        let delay = if (0..MATRIX_SIZE as i32).contains(&self.x) {
            matrix.clear();
            if let Err(err) = matrix.set_pixel(self.x, self.row, self.color) {
                tracing::warn!(%err, "Scanner pixel rejected");
            }
            self.step_delay
        } else {
            self.step = -self.step;
            self.bounce_pause
        };

        self.x += self.step;
        delay
    }
}

/// Runs the [`Scanner`] until the user quits
pub struct ScannerMode {
    scanner: Scanner,
    matrix: FrameBuffer,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl ScannerMode {
    pub fn new(display: DisplayConfig) -> Self {
        Self {
            scanner: Scanner::new(&display),
            matrix: FrameBuffer::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::start()?;

        let result = self.run_loop(&mut session.terminal).await;

        session.finish()?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut render_timer = interval(Duration::from_millis(16));
        let mut next_step = Instant::now();

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match next_event(maybe_event)? {
                        Some(Event::Key(key)) => {
                            if self.input_handler.handle_key_event(key) == KeyAction::Quit {
                                self.should_quit = true;
                            }
                        }
                        Some(_) => {}
                        None => break,
                    }
                }

                _ = sleep_until(next_step) => {
                    next_step = Instant::now() + self.scanner.tick(&mut self.matrix);
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render_demo(frame, &self.matrix, "Scanner");
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_column(matrix: &FrameBuffer) -> Option<usize> {
        let lit: Vec<_> = matrix.lit_pixels().collect();
        assert!(lit.len() <= 1);
        lit.first().map(|(x, _, _)| *x)
    }

    #[test]
    fn test_sweeps_and_bounces() {
        let display = DisplayConfig::default();
        let mut scanner = Scanner::new(&display);
        let mut matrix = FrameBuffer::new();

        let mut columns = Vec::new();
        let mut pauses = 0;
        for _ in 0..20 {
            let delay = scanner.tick(&mut matrix);
            if delay == display.scanner_bounce_pause {
                pauses += 1;
            } else {
                columns.push(lit_column(&matrix).unwrap());
            }
        }

        assert_eq!(
            columns,
            vec![0, 1, 2, 3, 4, 5, 6, 7, 7, 6, 5, 4, 3, 2, 1, 0, 0, 1]
        );
        assert_eq!(pauses, 2);
    }

    #[test]
    fn test_uses_configured_row_and_color() {
        let display = DisplayConfig {
            scanner_row: 3,
            scanner_color: Rgb(0, 0, 255),
            ..Default::default()
        };
        let mut scanner = Scanner::new(&display);
        let mut matrix = FrameBuffer::new();

        scanner.tick(&mut matrix);

        assert_eq!(matrix.pixel(0, 3), Some(Rgb(0, 0, 255)));
    }

    #[test]
    fn test_row_is_clamped_to_matrix() {
        let display = DisplayConfig {
            scanner_row: 20,
            ..Default::default()
        };
        let mut scanner = Scanner::new(&display);
        let mut matrix = FrameBuffer::new();

        scanner.tick(&mut matrix);

        assert_eq!(matrix.pixel(0, 7), Some(display.scanner_color));
    }
}
