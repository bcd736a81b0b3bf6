//! # Entries
//!
//! One row of a form. Every entry has a label and a typed value; what it can
//! do when triggered depends on its [`Editable`] capability:
//!
//! ```text
//! Editable::None          display only; triggering exports the form
//! Editable::Local         edits are stored in the entry
//! Editable::Bound(target) edits are stored in the entry and in target.<field>
//! ```
//!
//! Coercion is kept separate from committing so the form decides when (and
//! whether) a parsed value lands.

use log::debug;
use serde::Serialize;

use crate::core::error::FormError;
use crate::core::surface::InputSource;
use crate::core::target::SharedTarget;
use crate::core::value::{ExpectedType, Value};

pub const HOVER_MARKER: &str = "=>";
pub const BULLET: &str = " -";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverState {
    #[default]
    None,
    #[serde(rename = "hover")]
    Hovered,
}

/// What an entry does when triggered.
#[derive(Debug, Clone, Default)]
pub enum Editable {
    #[default]
    None,
    Local,
    Bound(SharedTarget),
}

/// Capability tag of [`Editable`], without the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    None,
    Local,
    Bound,
}

/// Exported view of one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntrySnapshot {
    #[serde(rename = "fieldname")]
    pub field_name: String,
    #[serde(rename = "displayname")]
    pub display_name: String,
    #[serde(rename = "inputvalue")]
    pub input_value: Option<Value>,
    #[serde(rename = "state")]
    pub hover_state: HoverState,
}

#[derive(Debug)]
pub struct Entry {
    field_name: String,
    display_name: String,
    input_value: Option<Value>,
    expected_type: ExpectedType,
    shortcut: Option<char>,
    hover_state: HoverState,
    value_visible: bool,
    editable: Editable,
}

impl Entry {
    pub fn builder(field_name: impl Into<String>, display_name: impl Into<String>) -> EntryBuilder {
        EntryBuilder::new(field_name, display_name)
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn input_value(&self) -> Option<&Value> {
        self.input_value.as_ref()
    }

    /// Reserved accelerator key. Not dispatched on yet.
    pub fn shortcut(&self) -> Option<char> {
        self.shortcut
    }

    pub fn hover_state(&self) -> HoverState {
        self.hover_state
    }

    pub fn is_hovered(&self) -> bool {
        self.hover_state == HoverState::Hovered
    }

    pub(crate) fn set_hover(&mut self, state: HoverState) {
        self.hover_state = state;
    }

    pub fn edit_mode(&self) -> EditMode {
        match self.editable {
            Editable::None => EditMode::None,
            Editable::Local => EditMode::Local,
            Editable::Bound(_) => EditMode::Bound,
        }
    }

    pub fn is_editable(&self) -> bool {
        self.edit_mode() != EditMode::None
    }

    /// Text of the row: marker or bullet, label, and the value when visible.
    pub fn render(&self) -> String {
        let lead = if self.is_hovered() { HOVER_MARKER } else { BULLET };
        let mut row = format!("{lead} {}", self.display_name);
        if self.value_visible {
            row.push_str(": ");
            if let Some(value) = &self.input_value {
                row.push_str(&value.to_string());
            }
        }
        row
    }

    /// Prompt for a new raw value.
    ///
    /// # Panics
    ///
    /// Panics on a display-only entry; the form never edits those.
    pub fn begin_edit(&self, input: &mut dyn InputSource) -> std::io::Result<String> {
        assert!(
            self.is_editable(),
            "begin_edit called on display-only entry '{}'",
            self.field_name
        );
        input.read_line(&format!("Enter input for\n{}", self.display_name))
    }

    pub fn coerce(&self, raw: &str) -> Result<Value, FormError> {
        self.expected_type.coerce(&self.field_name, raw)
    }

    pub fn commit_local(&mut self, value: Value) {
        debug!("Entry '{}' committed locally: {}", self.field_name, value);
        self.input_value = Some(value);
    }

    /// Write `value` to the bound target, then to the entry.
    ///
    /// The entry keeps its previous value if the target write fails.
    pub fn commit_bound(&mut self, value: Value) -> Result<(), FormError> {
        let Editable::Bound(target) = &self.editable else {
            return Err(FormError::AttributeWrite {
                field: self.field_name.clone(),
                reason: "entry has no bound target".to_string(),
            });
        };

        let write = match target.try_borrow_mut() {
            Ok(mut target) => target.set(&self.field_name, value.clone()),
            Err(_) => Err("target is borrowed elsewhere".to_string()),
        };
        write.map_err(|reason| FormError::AttributeWrite {
            field: self.field_name.clone(),
            reason,
        })?;

        debug!("Entry '{}' committed to target: {}", self.field_name, value);
        self.input_value = Some(value);
        Ok(())
    }

    pub fn snapshot(&self) -> EntrySnapshot {
        EntrySnapshot {
            field_name: self.field_name.clone(),
            display_name: self.display_name.clone(),
            input_value: self.input_value.clone(),
            hover_state: self.hover_state,
        }
    }
}

/// Validating constructor for [`Entry`].
pub struct EntryBuilder {
    field_name: String,
    display_name: String,
    value: Option<Value>,
    expected_type: String,
    shortcut: Option<char>,
    value_visible: bool,
    editable: Editable,
}

impl EntryBuilder {
    fn new(field_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            display_name: display_name.into(),
            value: None,
            expected_type: "str".to_string(),
            shortcut: None,
            value_visible: false,
            editable: Editable::None,
        }
    }

    /// Default value. Ignored for bound entries, which read the target.
    pub fn value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn value_visible(mut self, visible: bool) -> Self {
        self.value_visible = visible;
        self
    }

    pub fn expected_type(mut self, name: impl Into<String>) -> Self {
        self.expected_type = name.into();
        self
    }

    pub fn shortcut(mut self, key: char) -> Self {
        self.shortcut = Some(key);
        self
    }

    pub fn local(mut self) -> Self {
        self.editable = Editable::Local;
        self
    }

    pub fn bound(mut self, target: SharedTarget) -> Self {
        self.editable = Editable::Bound(target);
        self
    }

    pub fn editable(mut self, editable: Editable) -> Self {
        self.editable = editable;
        self
    }

    pub fn build(self) -> Result<Entry, FormError> {
        if self.field_name.trim().is_empty() {
            return Err(FormError::Configuration(
                "entry field name must not be empty".to_string(),
            ));
        }
        if self.display_name.is_empty() {
            return Err(FormError::Configuration(format!(
                "entry '{}' has an empty display name",
                self.field_name
            )));
        }
        let expected_type: ExpectedType = self.expected_type.parse()?;

        let initial = match &self.editable {
            Editable::Bound(target) => {
                let current = target.try_borrow().ok().and_then(|t| t.get(&self.field_name));
                let Some(current) = current else {
                    return Err(FormError::Configuration(format!(
                        "bound target has no readable attribute '{}'",
                        self.field_name
                    )));
                };
                Some(current)
            }
            _ => self.value,
        };

        let input_value = match initial {
            Some(value) => {
                let found = value.type_of();
                Some(expected_type.accept(value).ok_or_else(|| {
                    FormError::Configuration(format!(
                        "entry '{}' expects {expected_type} but its value is {found}",
                        self.field_name
                    ))
                })?)
            }
            None => None,
        };

        Ok(Entry {
            field_name: self.field_name,
            display_name: self.display_name,
            input_value,
            expected_type,
            shortcut: self.shortcut,
            hover_state: HoverState::None,
            value_visible: self.value_visible,
            editable: self.editable,
        })
    }
}
