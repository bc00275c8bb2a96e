use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::{Direction, InputEvent, StickAction, StickDirection};

/// Presses of the centre key closer together than this are key repeat,
/// i.e. the key is being held down
const REPEAT_WINDOW_SECS: f64 = 0.75;

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    Joystick(InputEvent),
    Quit,
    None,
}

/// Emulates the joystick on the keyboard
///
/// Arrow keys and WASD steer, Enter and Space are the centre button.
/// Terminals that report key release and repeat give exact hold times; on
/// the others a burst of centre key presses counts as one hold.
pub struct InputHandler {
    started: Instant,
    last_middle_press: Option<f64>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            last_middle_press: None,
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) -> KeyAction {
        let timestamp = self.started.elapsed().as_secs_f64();
        self.handle_key_event_at(key, timestamp)
    }

    /// Like [`InputHandler::handle_key_event`], with an explicit timestamp in seconds
    pub fn handle_key_event_at(&mut self, key: KeyEvent, timestamp: f64) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let stick = match key.code {
            // Movement - Arrow keys
            KeyCode::Up => StickDirection::Move(Direction::Up),
            KeyCode::Down => StickDirection::Move(Direction::Down),
            KeyCode::Left => StickDirection::Move(Direction::Left),
            KeyCode::Right => StickDirection::Move(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => StickDirection::Move(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => StickDirection::Move(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => StickDirection::Move(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => StickDirection::Move(Direction::Right),

            KeyCode::Enter | KeyCode::Char(' ') => StickDirection::Middle,

            // Controls
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,

            _ => return KeyAction::None,
        };

        let action = match key.kind {
            KeyEventKind::Press => self.classify_press(stick, timestamp),
            KeyEventKind::Repeat => StickAction::Held,
            KeyEventKind::Release => {
                if stick == StickDirection::Middle {
                    self.last_middle_press = None;
                }
                StickAction::Released
            }
        };

        KeyAction::Joystick(InputEvent::new(stick, action, timestamp))
    }

    fn classify_press(&mut self, stick: StickDirection, timestamp: f64) -> StickAction {
        if stick != StickDirection::Middle {
            self.last_middle_press = None;
            return StickAction::Pressed;
        }

        let repeated = self
            .last_middle_press
            .is_some_and(|last| timestamp - last <= REPEAT_WINDOW_SECS);
        self.last_middle_press = Some(timestamp);

        if repeated {
            StickAction::Held
        } else {
            StickAction::Pressed
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
