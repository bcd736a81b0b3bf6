//! # Session
//!
//! One interactive run of a form: read a token, dispatch it, redraw.
//!
//! ```text
//! loop {
//!     token = terminal.read_token()      // blocks
//!     match keymap.resolve(token) {
//!         None         => continue       // no redraw
//!         Some(Quit)   => break
//!         Some(cmd)    => dispatch(cmd); render()
//!     }
//! }
//! ```
//!
//! A trigger owns the loop until it finishes, so an edit prompt never
//! competes with the command stream for input.

use log::{debug, info};
use std::io;

use crate::core::command::{Command, Keymap};
use crate::core::entry::EntrySnapshot;
use crate::core::error::FormError;
use crate::core::form::{FormState, MenuForm, TriggerOutcome};
use crate::core::surface::Terminal;

/// What the loop should do after a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<'t, T: Terminal> {
    form: MenuForm,
    terminal: &'t mut T,
    keymap: Keymap,
    exports: Vec<Vec<EntrySnapshot>>,
}

impl<'t, T: Terminal> Session<'t, T> {
    pub fn new(form: MenuForm, terminal: &'t mut T, keymap: Keymap) -> Self {
        Self {
            form,
            terminal,
            keymap,
            exports: Vec::new(),
        }
    }

    pub fn form(&self) -> &MenuForm {
        &self.form
    }

    pub fn into_form(self) -> MenuForm {
        self.form
    }

    /// Every export produced by triggering a display-only entry, oldest first.
    pub fn exports(&self) -> &[Vec<EntrySnapshot>] {
        &self.exports
    }

    pub fn last_export(&self) -> Option<&[EntrySnapshot]> {
        self.exports.last().map(Vec::as_slice)
    }

    /// Run until quit or end of input.
    pub fn run(&mut self) -> Result<(), FormError> {
        info!("Session started for '{}'", self.form.title());
        self.render()?;

        while self.form.state() != FormState::Closed {
            let token = match self.terminal.read_token() {
                Ok(token) => token,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    info!("Input closed, ending session");
                    self.quit();
                    break;
                }
                Err(e) => return Err(e.into()),
            };
            if self.dispatch(&token)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Handle one input token.
    pub fn dispatch(&mut self, token: &str) -> Result<Flow, FormError> {
        let Some(command) = self.keymap.resolve(token) else {
            debug!("Ignoring unrecognized token {:?}", token);
            return Ok(Flow::Continue);
        };
        debug!("Token {:?} -> {:?}", token, command);

        match command {
            Command::Up => self.hover_previous()?,
            Command::Down => self.hover_next()?,
            Command::Select => {
                self.trigger()?;
            }
            Command::Quit => {
                self.quit();
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    pub fn hover_next(&mut self) -> Result<(), FormError> {
        self.form.hover_next();
        self.render()
    }

    pub fn hover_previous(&mut self) -> Result<(), FormError> {
        self.form.hover_previous();
        self.render()
    }

    /// Trigger the hovered entry, keep any export, and redraw.
    pub fn trigger(&mut self) -> Result<TriggerOutcome, FormError> {
        let outcome = self.form.trigger(&mut *self.terminal)?;
        if let TriggerOutcome::Exported(snapshot) = &outcome {
            self.exports.push(snapshot.clone());
        }
        self.render()?;
        Ok(outcome)
    }

    pub fn quit(&mut self) {
        self.form.quit();
    }

    /// Clear, then draw title, rows and footer. Initializes the hover on first use.
    pub fn render(&mut self) -> Result<(), FormError> {
        self.form.initialize();
        self.terminal.clear()?;
        self.terminal
            .draw_panel(self.form.title(), &self.form.body(), self.form.footer())?;
        Ok(())
    }
}
