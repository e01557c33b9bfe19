//! Key mapping from terminal events to key identifiers and commands.

use arrayvec::ArrayString;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::Command;

/// Raw key identifier, e.g. `"ArrowLeft"` or `"w"`
pub type KeyName = ArrayString<16>;

/// Name a key the way the session's key table expects.
///
/// Release events and keys the games never look at yield `None`.
pub fn key_name(key: KeyEvent) -> Option<KeyName> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let named = match key.code {
        KeyCode::Up => "ArrowUp",
        KeyCode::Down => "ArrowDown",
        KeyCode::Left => "ArrowLeft",
        KeyCode::Right => "ArrowRight",
        KeyCode::Esc => "Escape",
        KeyCode::Enter => "Enter",
        KeyCode::Char(c) => {
            let mut name = KeyName::new();
            name.push(c);
            return Some(name);
        }
        _ => return None,
    };

    KeyName::from(named).ok()
}

/// Map keyboard input straight to a game command.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    key_name(key).and_then(|name| Command::from_key(&name))
}

/// Check if key should quit the program.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
