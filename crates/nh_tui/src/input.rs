use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

/// Whether keystrokes steer the views or edit the chat input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Chat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Down,
    Up,
    Select,
    Back,
    Refresh,
    OpenInBrowser,
    ToggleChat,
    ChatChar(char),
    ChatBackspace,
    ChatSend,
    CloseChat,
    None,
}

pub fn poll_action(mode: InputMode) -> nh_core::Result<Action> {
    if !event::poll(Duration::from_millis(50))? {
        return Ok(Action::None);
    }

    match event::read()? {
        Event::Key(KeyEvent { code, modifiers, .. }) => Ok(map_key(mode, code, modifiers)),
        _ => Ok(Action::None),
    }
}

/// Keystroke to action, mode first: while the chat input has focus every
/// printable key is text, so Ctrl-C has to be matched before the char arm.
pub fn map_key(mode: InputMode, code: KeyCode, modifiers: KeyModifiers) -> Action {
    if mode == InputMode::Chat {
        return match (code, modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
            (KeyCode::Esc, _) => Action::CloseChat,
            (KeyCode::Enter, _) => Action::ChatSend,
            (KeyCode::Backspace, _) => Action::ChatBackspace,
            (KeyCode::Char(c), _) => Action::ChatChar(c),
            _ => Action::None,
        };
    }

    match (code, modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('q'), _) => Action::Quit,
        (KeyCode::Char('j'), _) | (KeyCode::Down, _) => Action::Down,
        (KeyCode::Char('k'), _) | (KeyCode::Up, _) => Action::Up,
        (KeyCode::Enter, _) => Action::Select,
        (KeyCode::Esc, _) | (KeyCode::Backspace, _) => Action::Back,
        (KeyCode::Char('r'), _) => Action::Refresh,
        (KeyCode::Char('o'), _) => Action::OpenInBrowser,
        (KeyCode::Char('c'), _) => Action::ToggleChat,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browse_keys_map_to_navigation() {
        assert_eq!(map_key(InputMode::Browse, KeyCode::Char('j'), KeyModifiers::NONE), Action::Down);
        assert_eq!(map_key(InputMode::Browse, KeyCode::Up, KeyModifiers::NONE), Action::Up);
        assert_eq!(map_key(InputMode::Browse, KeyCode::Enter, KeyModifiers::NONE), Action::Select);
        assert_eq!(map_key(InputMode::Browse, KeyCode::Char('c'), KeyModifiers::NONE), Action::ToggleChat);
        assert_eq!(map_key(InputMode::Browse, KeyCode::Char('q'), KeyModifiers::NONE), Action::Quit);
    }

    #[test]
    fn chat_mode_turns_printable_keys_into_text() {
        assert_eq!(map_key(InputMode::Chat, KeyCode::Char('q'), KeyModifiers::NONE), Action::ChatChar('q'));
        assert_eq!(map_key(InputMode::Chat, KeyCode::Char('J'), KeyModifiers::SHIFT), Action::ChatChar('J'));
        assert_eq!(map_key(InputMode::Chat, KeyCode::Enter, KeyModifiers::NONE), Action::ChatSend);
        assert_eq!(map_key(InputMode::Chat, KeyCode::Esc, KeyModifiers::NONE), Action::CloseChat);
    }

    #[test]
    fn ctrl_c_quits_even_while_typing() {
        assert_eq!(map_key(InputMode::Chat, KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
    }
}
