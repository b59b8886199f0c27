//! Key mapping from terminal events to game commands.
//!
//! Space and Esc are phase-dependent: Space starts from the menu and restarts after a
//! loss, Esc pauses a running round and resumes a paused one.

use crate::types::{Command, Phase};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to a command for the current phase.
pub fn handle_key_event(key: KeyEvent, phase: Phase) -> Option<Command> {
    if should_quit(key) {
        return Some(Command::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Command::MoveDown),

        // Rotation
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Command::Rotate),

        KeyCode::Char(' ') => match phase {
            Phase::Menu => Some(Command::Start),
            Phase::Lost => Some(Command::Restart),
            _ => None,
        },
        KeyCode::Esc => match phase {
            Phase::Running => Some(Command::Pause),
            Phase::Paused => Some(Command::Resume),
            _ => None,
        },

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
