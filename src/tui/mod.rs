//! # TUI Adapter
//!
//! Terminal surfaces for the core session. Handles terminal I/O, draws the
//! panel, and translates keyboard events into command tokens.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! Two surfaces are available:
//!
//! - [`FullScreen`]: alternate screen via ratatui; arrow keys, Enter and Esc
//!   work alongside the keymap tokens, edits open a prompt box.
//! - [`line::LineTerminal`]: line-oriented stdin/stdout, for plain terminals
//!   and pipes.
//!
//! Neither surface redraws on its own except to repaint after a resize or
//! while the edit prompt changes; every form redraw comes from the session.

pub mod event;
pub mod line;
pub mod panel;

use log::{debug, info};
use std::io::{self, IsTerminal, stdin, stdout};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste, Event, read};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::command::Keymap;
use crate::core::config::{ResolvedConfig, build_form};
use crate::core::entry::EntrySnapshot;
use crate::core::error::FormError;
use crate::core::session::Session;
use crate::core::surface::{InputSource, Renderer};
use crate::tui::event::{PromptKey, key_to_token, paste_text, prompt_key};
use crate::tui::line::LineTerminal;

/// Which surface to run the session on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    FullScreen,
    Line,
}

/// Last frame drawn, kept for repaints.
#[derive(Default)]
struct PanelText {
    title: String,
    body: String,
    footer: String,
}

/// Full-screen ratatui surface.
pub struct FullScreen {
    terminal: DefaultTerminal,
    keymap: Keymap,
    last: PanelText,
}

impl FullScreen {
    pub fn new(terminal: DefaultTerminal, keymap: Keymap) -> Self {
        Self {
            terminal,
            keymap,
            last: PanelText::default(),
        }
    }

    fn repaint(&mut self, prompt: Option<(&str, &str)>) -> io::Result<()> {
        let last = &self.last;
        self.terminal.draw(|f| {
            panel::draw_panel(f, &last.title, &last.body, &last.footer);
            if let Some((prompt, buffer)) = prompt {
                panel::draw_prompt(f, prompt, buffer);
            }
        })?;
        Ok(())
    }
}

impl Renderer for FullScreen {
    fn clear(&mut self) -> io::Result<()> {
        self.terminal.clear()
    }

    fn draw_panel(&mut self, title: &str, body: &str, footer: &str) -> io::Result<()> {
        self.last = PanelText {
            title: title.to_string(),
            body: body.to_string(),
            footer: footer.to_string(),
        };
        self.repaint(None)
    }
}

impl InputSource for FullScreen {
    fn read_token(&mut self) -> io::Result<String> {
        loop {
            match read()? {
                Event::Key(key) => {
                    if let Some(token) = key_to_token(&key, &self.keymap) {
                        return Ok(token);
                    }
                }
                Event::Resize(_, _) => self.repaint(None)?,
                _ => {}
            }
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        let mut buffer = String::new();
        self.repaint(Some((prompt, buffer.as_str())))?;
        loop {
            match read()? {
                Event::Key(key) => match prompt_key(&key) {
                    PromptKey::Char(c) => buffer.push(c),
                    PromptKey::Backspace => {
                        buffer.pop();
                    }
                    PromptKey::Submit => return Ok(buffer),
                    PromptKey::Ignore => continue,
                },
                Event::Paste(text) => buffer.push_str(&paste_text(&text)),
                Event::Resize(_, _) => {}
                _ => continue,
            }
            self.repaint(Some((prompt, buffer.as_str())))?;
        }
    }
}

/// Restores the terminal however the session ends.
struct TerminalModeGuard;

impl TerminalModeGuard {
    /// Enter the alternate screen in raw mode. The guard exists before any
    /// mode is switched on, so a failure part way through still restores.
    fn enter() -> io::Result<(Self, DefaultTerminal)> {
        let guard = Self;
        let terminal = ratatui::try_init()?;
        execute!(stdout(), EnableBracketedPaste, Hide)?;
        info!("Terminal modes enabled (alternate screen, raw mode, bracketed paste, hidden cursor)");
        Ok((guard, terminal))
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Show);
        ratatui::restore();
    }
}

/// Build the configured form and run one session on the chosen surface.
///
/// Returns the last export, if any display-only row was triggered.
pub fn run(config: &ResolvedConfig, mode: Mode) -> Result<Option<Vec<EntrySnapshot>>, FormError> {
    let (form, target) = build_form(config)?;
    info!("Starting {:?} session with {} entries", mode, form.entries().len());

    let export = match mode {
        Mode::FullScreen => {
            let (_guard, terminal) = TerminalModeGuard::enter()?;
            let mut surface = FullScreen::new(terminal, config.keymap.clone());
            let mut session = Session::new(form, &mut surface, config.keymap.clone());
            session.run()?;
            session.last_export().map(<[EntrySnapshot]>::to_vec)
        }
        Mode::Line => {
            let ansi = stdout().is_terminal();
            let mut surface = LineTerminal::new(stdin().lock(), stdout()).with_ansi(ansi);
            let mut session = Session::new(form, &mut surface, config.keymap.clone());
            session.run()?;
            session.last_export().map(<[EntrySnapshot]>::to_vec)
        }
    };

    debug!("Bound target after session: {:?}", target.borrow());
    Ok(export)
}
