use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

use crate::config::DisplayConfig;
use crate::display::{FrameBuffer, LedMatrix};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

use super::terminal::{next_event, TerminalSession, Tui};

pub const GREETING: &str = "Hello World!";

/// Shows a greeting on the matrix until the user quits
pub struct HelloMode {
    matrix: FrameBuffer,
    renderer: Renderer,
    input_handler: InputHandler,
}

impl HelloMode {
    pub fn new(display: DisplayConfig) -> Self {
        let mut matrix = FrameBuffer::new();
        matrix.show_message(GREETING, display.scroll_speed, display.text_color);

        Self {
            matrix,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
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
        let mut render_timer = interval(Duration::from_millis(100));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match next_event(maybe_event)? {
                        Some(Event::Key(key)) => {
                            if self.input_handler.handle_key_event(key) == KeyAction::Quit {
                                break;
                            }
                        }
                        Some(_) => {}
                        None => break,
                    }
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render_demo(frame, &self.matrix, "Hello");
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => break,
            }
        }

        Ok(())
    }
}
