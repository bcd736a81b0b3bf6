//! menuform library exports for testing

pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

pub use crate::core::command::{Command, Keymap};
pub use crate::core::entry::{Entry, EntrySnapshot};
pub use crate::core::error::FormError;
pub use crate::core::form::{MenuForm, TriggerOutcome};
pub use crate::core::session::Session;
