//! Key events → game commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use panzer_core::commands::Command;

/// What a key press means to the application loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Game(Command),
    TogglePause,
    Quit,
}

/// Map a key event to an action, if it is bound to one.
pub fn map_key(key: &KeyEvent) -> Option<InputAction> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(InputAction::Quit);
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(InputAction::Game(Command::MoveUp))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputAction::Game(Command::MoveDown))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputAction::Game(Command::MoveLeft))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputAction::Game(Command::MoveRight))
        }
        KeyCode::Char(' ') => Some(InputAction::Game(Command::Fire)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputAction::TogglePause),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputAction::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        }
    }

    #[test]
    fn test_bindings() {
        assert_eq!(
            map_key(&key(KeyCode::Up)),
            Some(InputAction::Game(Command::MoveUp))
        );
        assert_eq!(
            map_key(&key(KeyCode::Char('d'))),
            Some(InputAction::Game(Command::MoveRight))
        );
        assert_eq!(
            map_key(&key(KeyCode::Char(' '))),
            Some(InputAction::Game(Command::Fire))
        );
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(InputAction::Quit));
        assert_eq!(map_key(&key(KeyCode::Char('p'))), Some(InputAction::TogglePause));
        assert_eq!(map_key(&key(KeyCode::Tab)), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: crossterm::event::KeyEventState::NONE,
        };
        assert_eq!(map_key(&event), Some(InputAction::Quit));
    }
}
