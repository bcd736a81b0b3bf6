//! # Line Mode
//!
//! A terminal surface for plain streams: commands are whole lines (`u`, `d`,
//! `s`, `q` by default) and edits are typed after a prompt. The panel is
//! drawn as a box of text, so this mode also works over pipes.

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, BufRead, Write};
use unicode_width::UnicodeWidthStr;

use crate::core::entry::HOVER_MARKER;
use crate::core::surface::{InputSource, Renderer};

pub struct LineTerminal<R, W> {
    input: R,
    output: W,
    /// Emit ANSI clear and color sequences. Off for pipes and files.
    ansi: bool,
}

impl<R: BufRead, W: Write> LineTerminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            ansi: false,
        }
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn next_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            ));
        }
        let trimmed = line.strip_suffix('\n').unwrap_or(&line);
        let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
        Ok(trimmed.to_string())
    }
}

/// Lay out a titled box around `body` with `footer` on the bottom edge.
pub fn boxed(title: &str, body: &str, footer: &str) -> Vec<String> {
    let rows: Vec<&str> = body.lines().collect();
    let inner = rows
        .iter()
        .map(|r| r.width())
        .max()
        .unwrap_or(0)
        .max(title.width() + 3)
        .max(footer.width() + 3);
    let total = inner + 4;

    let edge = |left: &str, label: &str, right: &str| {
        let fill = total - label.width() - 5;
        format!("{left}─ {label} {}{right}", "─".repeat(fill))
    };

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(edge("╭", title, "╮"));
    lines.push(format!("│{}│", " ".repeat(total - 2)));
    for row in rows {
        lines.push(format!("│ {row}{} │", " ".repeat(inner - row.width())));
    }
    lines.push(edge("╰", footer, "╯"));
    lines
}

impl<R: BufRead, W: Write> Renderer for LineTerminal<R, W> {
    fn clear(&mut self) -> io::Result<()> {
        if self.ansi {
            queue!(self.output, Clear(ClearType::All), MoveTo(0, 0))
        } else {
            writeln!(self.output)
        }
    }

    fn draw_panel(&mut self, title: &str, body: &str, footer: &str) -> io::Result<()> {
        for line in boxed(title, body, footer) {
            let hovered = line
                .strip_prefix("│ ")
                .is_some_and(|rest| rest.starts_with(HOVER_MARKER));
            if self.ansi && hovered {
                writeln!(self.output, "{}", line.as_str().green())?;
            } else {
                writeln!(self.output, "{line}")?;
            }
        }
        self.output.flush()
    }
}

impl<R: BufRead, W: Write> InputSource for LineTerminal<R, W> {
    fn read_token(&mut self) -> io::Result<String> {
        Ok(self.next_line()?.trim().to_string())
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;
        self.next_line()
    }
}
