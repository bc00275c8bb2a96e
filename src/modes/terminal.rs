use std::io::{stderr, Stderr};

use anyhow::{Context, Result};
use crossterm::{
    event::{
        Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub type Tui = Terminal<CrosstermBackend<Stderr>>;

/// The terminal in raw mode on the alternate screen
pub struct TerminalSession {
    pub terminal: Tui,
    /// Whether the terminal reports key repeat and release
    keyboard_enhanced: bool,
}

impl TerminalSession {
    pub fn start() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;

        // Exact hold times for the centre button need release events
        let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            execute!(
                stderr,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )
            .context("Failed to enable key release events")?;
        }
        tracing::debug!(keyboard_enhanced, "Terminal ready");

        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        Ok(Self {
            terminal,
            keyboard_enhanced,
        })
    }

    pub fn finish(mut self) -> Result<()> {
        if self.keyboard_enhanced {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)
                .context("Failed to restore keyboard mode")?;
        }
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Unpack one item of a terminal event stream
///
/// `None` means the stream is finished and the mode should stop.
pub fn next_event(maybe_event: Option<std::io::Result<Event>>) -> Result<Option<Event>> {
    match maybe_event {
        Some(Ok(event)) => Ok(Some(event)),
        Some(Err(err)) => Err(err).context("Failed to read terminal events"),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_event_is_passed_through() {
        let event = Event::FocusGained;
        assert_eq!(next_event(Some(Ok(event.clone()))).unwrap(), Some(event));
    }

    #[test]
    fn test_read_error_is_reported() {
        let err = next_event(Some(Err(io::Error::other("tty gone")))).unwrap_err();
        assert_eq!(err.to_string(), "Failed to read terminal events");
        assert_eq!(err.root_cause().to_string(), "tty gone");
    }

    #[test]
    fn test_finished_stream_stops() {
        assert_eq!(next_event(None).unwrap(), None);
    }
}
