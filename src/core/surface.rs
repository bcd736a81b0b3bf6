//! # Terminal Collaborators
//!
//! The core draws and reads through these traits only. Styling, raw key
//! handling and screen control belong to the adapters in `crate::tui`.

use std::io;

/// Draws the form.
pub trait Renderer {
    /// Reset the viewport before a redraw.
    fn clear(&mut self) -> io::Result<()>;

    /// Draw a titled panel holding `body` with `footer` underneath.
    fn draw_panel(&mut self, title: &str, body: &str, footer: &str) -> io::Result<()>;
}

/// Blocking input.
pub trait InputSource {
    /// Block until one command token arrives.
    ///
    /// `io::ErrorKind::UnexpectedEof` means the input stream is finished.
    fn read_token(&mut self) -> io::Result<String>;

    /// Block on a single-line text prompt and return the raw text.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;
}

/// A terminal that can both draw and read. Sessions drive one of these.
pub trait Terminal: Renderer + InputSource {}

impl<T: Renderer + InputSource + ?Sized> Terminal for T {}
