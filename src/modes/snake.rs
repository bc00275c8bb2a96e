use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::{interval, sleep_until, Instant};

use crate::config::DisplayConfig;
use crate::display::{draw_scene, FrameBuffer, LedMatrix};
use crate::game::{Game, GameConfig, InputEvent, Transition};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

use super::terminal::{next_event, TerminalSession, Tui};

/// Snake on the LED matrix, steered with the joystick
pub struct SnakeMode {
    game: Game,
    matrix: FrameBuffer,
    display: DisplayConfig,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    /// When the game over message is done and the next game starts
    restart_at: Option<Instant>,
}

impl SnakeMode {
    pub fn new(config: GameConfig, display: DisplayConfig) -> Self {
        let game = Game::new(config);
        let mut matrix = FrameBuffer::new();
        draw_scene(&mut matrix, &game.render());

        Self {
            game,
            matrix,
            display,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            restart_at: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut session = TerminalSession::start()?;

        let result = self.run_game_loop(&mut session.terminal).await;

        session.finish()?;

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            let restart_at = self.restart_at.unwrap_or_else(Instant::now);

            tokio::select! {
                // The snake only moves when the joystick does
                maybe_event = event_stream.next() => {
                    match next_event(maybe_event)? {
                        Some(event) => self.handle_event(event),
                        None => break,
                    }
                }

                _ = sleep_until(restart_at), if self.restart_at.is_some() => {
                    self.finish_game_over();
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    let scene = self.game.render();
                    terminal.draw(|frame| {
                        self.renderer.render_game(frame, &self.matrix, &scene, &self.metrics);
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

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match self.input_handler.handle_key_event(key) {
                KeyAction::Joystick(input) => self.apply(input),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// Run one joystick event through the game and update the matrix
    fn apply(&mut self, input: InputEvent) {
        match self.game.handle_input(input) {
            Transition::Moved { ate_apple } => {
                if ate_apple {
                    self.metrics.on_apple_eaten();
                }
                draw_scene(&mut self.matrix, &self.game.render());
            }
            Transition::GameOver(_) => self.show_game_over(),
            Transition::Reset => self.start_new_game(),
            Transition::Ignored => {}
        }
    }

    /// The game is frozen; report the score now, restart after the pause
    fn show_game_over(&mut self) {
        let Some(result) = self.game.game_over() else {
            return;
        };

        self.metrics.on_game_over(result);
        self.matrix.show_message(
            &format!("Game Over! Score: {}", result.score),
            self.display.scroll_speed,
            self.display.text_color,
        );
        self.restart_at = Some(Instant::now() + self.display.game_over_pause);
    }

    fn finish_game_over(&mut self) {
        self.game.reset();
        self.start_new_game();
    }

    /// The game was just reset; show the fresh board
    fn start_new_game(&mut self) {
        self.restart_at = None;
        self.metrics.on_game_start();
        draw_scene(&mut self.matrix, &self.game.render());
    }
}
