//! # Menu Form
//!
//! The navigation and editing state machine. Holds the ordered entries and
//! the hover cursor; knows nothing about drawing.
//!
//! ```text
//!            initialize()            quit()
//!   Idle ───────────────▶ Navigating ──────▶ Closed
//!                          │      ▲
//!                trigger() │      │ edit committed or discarded
//!                          ▼      │
//!                          Editing
//! ```
//!
//! `Editing` never outlives a `trigger()` call, so it has no variant in
//! [`FormState`].

use log::{debug, info, warn};
use std::collections::HashSet;

use crate::core::entry::{EditMode, Entry, EntrySnapshot, HoverState};
use crate::core::error::FormError;
use crate::core::surface::InputSource;
use crate::core::value::Value;

pub const DEFAULT_FOOTER: &str = "Press the arrow keys to make a selection.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Nothing hovered yet.
    Idle,
    Navigating,
    /// Quit was requested; no further input is handled.
    Closed,
}

/// Result of triggering the hovered entry.
#[derive(Debug)]
pub enum TriggerOutcome {
    /// A display-only entry exported every entry.
    Exported(Vec<EntrySnapshot>),
    Committed { field_name: String, value: Value },
    /// The edit was discarded. The entry keeps its previous value.
    Rejected(FormError),
    /// Trigger on a closed form.
    Ignored,
}

#[derive(Debug)]
pub struct MenuForm {
    title: String,
    footer: String,
    entries: Vec<Entry>,
    hover_index: Option<usize>,
    state: FormState,
    status: Option<String>,
}

impl MenuForm {
    /// Build a form. Entries must be non-empty with unique field names.
    pub fn new(title: impl Into<String>, entries: Vec<Entry>) -> Result<Self, FormError> {
        if entries.is_empty() {
            return Err(FormError::Configuration(
                "a form needs at least one entry".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.field_name()) {
                return Err(FormError::Configuration(format!(
                    "duplicate field name '{}'",
                    entry.field_name()
                )));
            }
        }

        Ok(Self {
            title: title.into(),
            footer: DEFAULT_FOOTER.to_string(),
            entries,
            hover_index: None,
            state: FormState::Idle,
            status: None,
        })
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, field_name: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.field_name() == field_name)
    }

    pub fn hover_index(&self) -> Option<usize> {
        self.hover_index
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Footer line: the last status message, or the navigation hint.
    pub fn footer(&self) -> &str {
        self.status.as_deref().unwrap_or(&self.footer)
    }

    /// All rows, in order, one per line.
    pub fn body(&self) -> String {
        self.entries
            .iter()
            .map(Entry::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Hover the first entry if nothing is hovered yet.
    pub fn initialize(&mut self) {
        if self.state == FormState::Idle {
            self.set_hover(0);
            self.state = FormState::Navigating;
            debug!("Form '{}' initialized", self.title);
        }
    }

    pub fn hover_next(&mut self) {
        if !self.begin_navigation() {
            return;
        }
        let next = match self.hover_index {
            Some(i) if i + 1 < self.entries.len() => i + 1,
            _ => 0,
        };
        self.set_hover(next);
    }

    pub fn hover_previous(&mut self) {
        if !self.begin_navigation() {
            return;
        }
        let previous = match self.hover_index {
            Some(0) | None => self.entries.len() - 1,
            Some(i) => i - 1,
        };
        self.set_hover(previous);
    }

    /// Run the hovered entry's action to completion.
    ///
    /// Recoverable failures come back as [`TriggerOutcome::Rejected`]; only
    /// input I/O errors are returned as `Err`.
    pub fn trigger(&mut self, input: &mut dyn InputSource) -> Result<TriggerOutcome, FormError> {
        match self.state {
            FormState::Closed => return Ok(TriggerOutcome::Ignored),
            FormState::Idle => self.initialize(),
            FormState::Navigating => {}
        }
        let index = self.hover_index.unwrap_or(0);

        let mode = self.entries[index].edit_mode();
        if mode == EditMode::None {
            let snapshot = self.snapshot();
            info!("Exported {} entries", snapshot.len());
            self.status = Some(format!("Exported {} entries", snapshot.len()));
            return Ok(TriggerOutcome::Exported(snapshot));
        }

        let entry = &mut self.entries[index];
        let raw = entry.begin_edit(input)?;
        let committed = entry.coerce(&raw).and_then(|value| {
            match mode {
                EditMode::Bound => entry.commit_bound(value.clone())?,
                _ => entry.commit_local(value.clone()),
            }
            Ok(value)
        });

        match committed {
            Ok(value) => {
                info!("Committed {} = {}", entry.field_name(), value);
                self.status = Some(format!("Saved {}", entry.display_name()));
                Ok(TriggerOutcome::Committed {
                    field_name: entry.field_name().to_string(),
                    value,
                })
            }
            Err(e) if e.is_recoverable() => {
                warn!("Edit of {} discarded: {}", entry.field_name(), e);
                self.status = Some(e.to_string());
                Ok(TriggerOutcome::Rejected(e))
            }
            Err(e) => Err(e),
        }
    }

    pub fn quit(&mut self) {
        info!("Form '{}' closed", self.title);
        self.state = FormState::Closed;
    }

    pub fn snapshot(&self) -> Vec<EntrySnapshot> {
        self.entries.iter().map(Entry::snapshot).collect()
    }

    fn begin_navigation(&mut self) -> bool {
        match self.state {
            FormState::Closed => {
                warn!("Navigation on closed form '{}' ignored", self.title);
                false
            }
            FormState::Idle => {
                self.initialize();
                true
            }
            FormState::Navigating => true,
        }
    }

    fn set_hover(&mut self, index: usize) {
        for entry in &mut self.entries {
            entry.set_hover(HoverState::None);
        }
        self.entries[index].set_hover(HoverState::Hovered);
        self.hover_index = Some(index);
        self.status = None;
    }
}
