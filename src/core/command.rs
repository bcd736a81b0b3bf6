//! # Commands
//!
//! Input tokens become a `Command` through the `Keymap`. Anything the keymap
//! does not know is ignored by the session.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Hover the previous entry.
    Up,
    /// Hover the next entry.
    Down,
    /// Trigger the hovered entry.
    Select,
    Quit,
}

/// Tokens bound to each command. Defaults are `u`, `d`, `s` and `q`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keymap {
    pub up: String,
    pub down: String,
    pub select: String,
    pub quit: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            up: "u".to_string(),
            down: "d".to_string(),
            select: "s".to_string(),
            quit: "q".to_string(),
        }
    }
}

impl Keymap {
    pub fn resolve(&self, token: &str) -> Option<Command> {
        match token {
            t if t == self.up => Some(Command::Up),
            t if t == self.down => Some(Command::Down),
            t if t == self.select => Some(Command::Select),
            t if t == self.quit => Some(Command::Quit),
            _ => None,
        }
    }

    /// The token that triggers `command`.
    pub fn token(&self, command: Command) -> &str {
        match command {
            Command::Up => &self.up,
            Command::Down => &self.down,
            Command::Select => &self.select,
            Command::Quit => &self.quit,
        }
    }
}
