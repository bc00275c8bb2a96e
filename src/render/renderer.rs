use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::display::{FrameBuffer, Message};
use crate::game::Scene;
use crate::metrics::GameMetrics;

/// Draws the emulated LED matrix into the terminal
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Matrix plus score header, for the snake game
    pub fn render_game(
        &self,
        frame: &mut Frame,
        matrix: &FrameBuffer,
        scene: &Scene,
        metrics: &GameMetrics,
    ) {
        let chunks = Self::layout(frame.area());

        let stats = self.render_stats(scene, metrics);
        frame.render_widget(stats, chunks[0]);

        self.render_matrix_area(frame, chunks[1], matrix, " Snake ");

        let controls = self.render_controls(&[
            ("↑↓←→", " or "),
            ("WASD", " to steer | "),
            ("hold Enter", " to restart | "),
            ("Q", " to quit"),
        ]);
        frame.render_widget(controls, chunks[2]);
    }

    /// Matrix only, for the demo programs
    pub fn render_demo(&self, frame: &mut Frame, matrix: &FrameBuffer, title: &str) {
        let chunks = Self::layout(frame.area());

        let header = Paragraph::new(Line::from(Span::styled(
            title.to_string(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        self.render_matrix_area(frame, chunks[1], matrix, " LED matrix ");

        let controls = self.render_controls(&[("Q", " to quit")]);
        frame.render_widget(controls, chunks[2]);
    }

    fn layout(area: Rect) -> std::rc::Rc<[Rect]> {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Matrix
                Constraint::Length(3), // Footer
            ])
            .split(area)
    }

    fn render_matrix_area(&self, frame: &mut Frame, area: Rect, matrix: &FrameBuffer, title: &str) {
        // Center the matrix horizontally
        let area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(area)[1];

        let widget = match matrix.message() {
            Some(message) => self.render_message(message),
            None => self.render_grid(matrix),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(title.to_string());

        frame.render_widget(widget.block(block), area);
    }

    fn render_grid(&self, matrix: &FrameBuffer) -> Paragraph<'static> {
        let lines: Vec<Line> = matrix
            .rows()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|led| {
                        if led.is_off() {
                            Span::styled("· ", Style::default().fg(Color::DarkGray))
                        } else {
                            Span::styled("██", Style::default().fg(Color::from(*led)))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        Paragraph::new(lines).alignment(Alignment::Center)
    }

    fn render_message(&self, message: &Message) -> Paragraph<'static> {
        let text = vec![
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                message.text.clone(),
                Style::default()
                    .fg(Color::from(message.color))
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
    }

    fn render_stats(&self, scene: &Scene, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                scene.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(scene.snake.len().to_string(), value),
            Span::raw("    "),
            Span::styled("High score: ", label),
            Span::styled(metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
            Span::raw("    "),
            Span::styled("Apples: ", label),
            Span::styled(metrics.apples_eaten.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, keys: &[(&str, &str)]) -> Paragraph<'static> {
        let spans: Vec<Span> = keys
            .iter()
            .flat_map(|(key, text)| {
                [
                    Span::styled(key.to_string(), Style::default().fg(Color::Cyan)),
                    Span::raw(text.to_string()),
                ]
            })
            .collect();

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
