//! Key mapping from terminal events to controls and host commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::mapper::Control;

/// Keys the host handles itself instead of passing to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Quit,
    /// Reset the current game.
    Restart,
    /// Start when stopped, stop when running.
    Toggle,
}

/// Map a key code to a game control.
pub fn control_for_key(code: KeyCode) -> Option<Control> {
    match code {
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h' | 'H') => Some(Control::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l' | 'L') => Some(Control::Right),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j' | 'J') => Some(Control::Down),
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k' | 'K' | 'x' | 'X') => Some(Control::Rotate),
        KeyCode::Char(' ') => Some(Control::Drop),
        _ => None,
    }
}

/// Map a key event to a host command.
pub fn command_for_key(key: KeyEvent) -> Option<HostCommand> {
    if should_quit(key) {
        return Some(HostCommand::Quit);
    }
    match key.code {
        KeyCode::Char('r' | 'R') => Some(HostCommand::Restart),
        KeyCode::Char('p' | 'P') => Some(HostCommand::Toggle),
        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_keys() {
        assert_eq!(control_for_key(KeyCode::Left), Some(Control::Left));
        assert_eq!(control_for_key(KeyCode::Right), Some(Control::Right));
        assert_eq!(control_for_key(KeyCode::Down), Some(Control::Down));
        assert_eq!(control_for_key(KeyCode::Char('H')), Some(Control::Left));
        assert_eq!(control_for_key(KeyCode::Char('d')), Some(Control::Right));
        assert_eq!(control_for_key(KeyCode::Char('J')), Some(Control::Down));
    }

    #[test]
    fn test_rotation_and_drop_keys() {
        assert_eq!(control_for_key(KeyCode::Up), Some(Control::Rotate));
        assert_eq!(control_for_key(KeyCode::Char('x')), Some(Control::Rotate));
        assert_eq!(control_for_key(KeyCode::Char(' ')), Some(Control::Drop));
        assert_eq!(control_for_key(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_host_commands() {
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Char('r'))),
            Some(HostCommand::Restart)
        );
        assert_eq!(
            command_for_key(KeyEvent::from(KeyCode::Char('P'))),
            Some(HostCommand::Toggle)
        );
        assert_eq!(command_for_key(KeyEvent::from(KeyCode::Left)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert_eq!(
            command_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(HostCommand::Quit)
        );
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
