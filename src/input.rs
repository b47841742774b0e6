use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::config::KeyBindings;

/// Result of handling a key event in an editing mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    /// Continue in current mode, nothing changed
    Continue,
    /// The edited text changed
    Changed(String),
    /// Return to normal mode, optionally with a final text to apply
    Finish(Option<String>),
}

/// Check for escape key (Esc or Ctrl+[)
pub fn is_escape(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('[') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Actions available in normal mode
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    StartFilter,
    ClearFilter,
    SortColumn,
    ToggleColumn,
    ToggleTheme,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
}

/// Map a normal-mode key to an action using the configured bindings
pub fn normal_action(key: KeyEvent, keys: &KeyBindings) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Left => Some(Action::MoveLeft),
        KeyCode::Right => Some(Action::MoveRight),
        KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Enter => Some(Action::SortColumn),
        KeyCode::Esc => Some(Action::ClearFilter),
        KeyCode::Char(c) => keys.action_for(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(normal_action(key(KeyCode::Char('/')), &keys), Some(Action::StartFilter));
        assert_eq!(normal_action(key(KeyCode::Char('s')), &keys), Some(Action::SortColumn));
        assert_eq!(normal_action(key(KeyCode::Enter), &keys), Some(Action::SortColumn));
        assert_eq!(normal_action(key(KeyCode::Char('c')), &keys), Some(Action::ToggleColumn));
        assert_eq!(normal_action(key(KeyCode::Char('t')), &keys), Some(Action::ToggleTheme));
        assert_eq!(normal_action(key(KeyCode::Left), &keys), Some(Action::MoveLeft));
        assert_eq!(normal_action(key(KeyCode::Char('x')), &keys), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let keys = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(normal_action(ev, &keys), Some(Action::Quit));
    }

    #[test]
    fn test_escape_variants() {
        assert!(is_escape(key(KeyCode::Esc)));
        assert!(is_escape(KeyEvent::new(KeyCode::Char('['), KeyModifiers::CONTROL)));
        assert!(!is_escape(key(KeyCode::Char('['))));
    }
}
