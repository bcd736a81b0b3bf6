//! # Key Events
//!
//! Maps crossterm input onto the session's command tokens and the keys the
//! edit prompt understands.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::command::{Command, Keymap};

/// Keys understood while an edit prompt is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    Char(char),
    Backspace,
    Submit,
    Ignore,
}

/// Translate a key press into a command token.
///
/// Arrow keys, Enter and Esc map onto the keymap's tokens; any other
/// character is passed through so the keymap decides what it means.
pub fn key_to_token(key: &KeyEvent, keymap: &Keymap) -> Option<String> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
    let command = match (key.modifiers, key.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Command::Quit,
        (_, KeyCode::Char(c)) => return Some(c.to_string()),
        (_, KeyCode::Up) => Command::Up,
        (_, KeyCode::Down) => Command::Down,
        (_, KeyCode::Enter) => Command::Select,
        (_, KeyCode::Esc) => Command::Quit,
        _ => return None,
    };
    Some(keymap.token(command).to_string())
}

pub fn prompt_key(key: &KeyEvent) -> PromptKey {
    if key.kind != KeyEventKind::Press {
        return PromptKey::Ignore;
    }
    match key.code {
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => PromptKey::Char(c),
        KeyCode::Backspace => PromptKey::Backspace,
        KeyCode::Enter => PromptKey::Submit,
        _ => PromptKey::Ignore,
    }
}

/// Pasted text as a single line, so one edit cannot split a row in two.
pub fn paste_text(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_map_to_keymap_tokens() {
        let keymap = Keymap::default();
        assert_eq!(key_to_token(&press(KeyCode::Up), &keymap).as_deref(), Some("u"));
        assert_eq!(key_to_token(&press(KeyCode::Down), &keymap).as_deref(), Some("d"));
        assert_eq!(key_to_token(&press(KeyCode::Enter), &keymap).as_deref(), Some("s"));
        assert_eq!(key_to_token(&press(KeyCode::Esc), &keymap).as_deref(), Some("q"));
    }

    #[test]
    fn test_arrows_follow_custom_keymap() {
        let keymap = Keymap {
            up: "k".into(),
            ..Keymap::default()
        };
        assert_eq!(key_to_token(&press(KeyCode::Up), &keymap).as_deref(), Some("k"));
    }

    #[test]
    fn test_characters_pass_through() {
        let keymap = Keymap::default();
        assert_eq!(
            key_to_token(&press(KeyCode::Char('x')), &keymap).as_deref(),
            Some("x")
        );
        assert_eq!(key_to_token(&press(KeyCode::Tab), &keymap), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_token(&key, &Keymap::default()).as_deref(), Some("q"));
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = press(KeyCode::Down);
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_token(&key, &Keymap::default()), None);
        assert_eq!(prompt_key(&key), PromptKey::Ignore);
    }

    #[test]
    fn test_prompt_keys() {
        assert_eq!(prompt_key(&press(KeyCode::Char('a'))), PromptKey::Char('a'));
        assert_eq!(prompt_key(&press(KeyCode::Backspace)), PromptKey::Backspace);
        assert_eq!(prompt_key(&press(KeyCode::Enter)), PromptKey::Submit);
        assert_eq!(prompt_key(&press(KeyCode::Left)), PromptKey::Ignore);
    }

    #[test]
    fn test_paste_folds_line_breaks() {
        assert_eq!(paste_text("first\r\nsecond\nthird"), "first second third");
        assert_eq!(paste_text("single line"), "single line");
        assert_eq!(paste_text("trailing\n"), "trailing");
    }
}
