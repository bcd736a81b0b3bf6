//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use crate::core::entry::Entry;
use crate::core::form::MenuForm;
use crate::core::surface::{InputSource, Renderer};
use crate::core::target::{BoundTarget, share};
use crate::core::value::Value;

/// One `draw_panel` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub title: String,
    pub body: String,
    pub footer: String,
}

/// A terminal that replays canned input and records what was drawn.
///
/// Running out of tokens reports end of input; running out of lines is an error.
#[derive(Default)]
pub struct ScriptedTerminal {
    tokens: VecDeque<String>,
    lines: VecDeque<String>,
    pub frames: Vec<Frame>,
    pub clears: usize,
    pub prompts: Vec<String>,
}

impl ScriptedTerminal {
    pub fn new(tokens: &[&str], lines: &[&str]) -> Self {
        Self {
            tokens: tokens.iter().map(|t| t.to_string()).collect(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn remaining_tokens(&self) -> usize {
        self.tokens.len()
    }
}

impl Renderer for ScriptedTerminal {
    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn draw_panel(&mut self, title: &str, body: &str, footer: &str) -> io::Result<()> {
        self.frames.push(Frame {
            title: title.to_string(),
            body: body.to_string(),
            footer: footer.to_string(),
        });
        Ok(())
    }
}

impl InputSource for ScriptedTerminal {
    fn read_token(&mut self) -> io::Result<String> {
        self.tokens
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more tokens"))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.lines
            .pop_front()
            .ok_or_else(|| io::Error::other("no scripted line left"))
    }
}

/// Minimal host object with a single optional `name` attribute.
///
/// Setting `name` to `None` simulates the attribute disappearing.
#[derive(Debug, Default)]
pub struct Record {
    pub name: Option<String>,
}

impl Record {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
        }
    }
}

impl BoundTarget for Record {
    fn get(&self, attribute: &str) -> Option<Value> {
        match attribute {
            "name" => self.name.clone().map(Value::String),
            _ => None,
        }
    }

    fn set(&mut self, attribute: &str, value: Value) -> Result<(), String> {
        match (attribute, &mut self.name) {
            ("name", Some(name)) => {
                *name = value.to_string();
                Ok(())
            }
            _ => Err(format!("target has no attribute '{attribute}'")),
        }
    }
}

/// The demo menu: two display rows, one local row and one bound row.
pub fn demo_form() -> (MenuForm, Rc<RefCell<Record>>) {
    let record = share(Record::named("Name of Object"));
    let entries = vec![
        Entry::builder("One", "Menu Field One")
            .value("input value 1")
            .value_visible(true)
            .build()
            .unwrap(),
        Entry::builder("Two", "Menu Field Two")
            .value("input value 2")
            .value_visible(true)
            .local()
            .build()
            .unwrap(),
        Entry::builder("Three", "Another Menu Item")
            .value("input value 3")
            .value_visible(true)
            .build()
            .unwrap(),
        Entry::builder("name", "Example Object field")
            .value_visible(true)
            .bound(record.clone())
            .build()
            .unwrap(),
    ];
    (MenuForm::new("Main Menu", entries).unwrap(), record)
}
