use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Command, Direction, Player};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Command),
    /// Switch to the next background theme
    CycleTheme,
    Quit,
    None,
}

/// Shared-keyboard bindings: player one on WASD, player two on the arrows
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        let steer = |player, direction| KeyAction::Game(Command::Steer(player, direction));

        match key.code {
            // Player one - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => steer(Player::One, Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => steer(Player::One, Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => steer(Player::One, Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => steer(Player::One, Direction::Right),

            // Player two - arrow keys
            KeyCode::Up => steer(Player::Two, Direction::Up),
            KeyCode::Down => steer(Player::Two, Direction::Down),
            KeyCode::Left => steer(Player::Two, Direction::Left),
            KeyCode::Right => steer(Player::Two, Direction::Right),

            // Session controls
            KeyCode::Enter | KeyCode::Char(' ') => KeyAction::Game(Command::Start),
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Game(Command::TogglePause),
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Game(Command::Restart),
            KeyCode::Char('m') | KeyCode::Char('M') => KeyAction::Game(Command::ReturnToIntro),
            KeyCode::Char('h') | KeyCode::Char('H') => {
                KeyAction::Game(Command::ResetHighScores)
            }
            KeyCode::Char('b') | KeyCode::Char('B') => KeyAction::CycleTheme,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
