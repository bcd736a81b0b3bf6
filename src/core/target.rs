//! # Bound Targets
//!
//! A bound entry mirrors its value into an attribute of a host object. The
//! host opts in by implementing [`BoundTarget`]; the form never inspects the
//! concrete type.
//!
//! Targets are shared between the host and the form through
//! [`SharedTarget`]. Everything runs on one thread, so `Rc<RefCell<_>>` is
//! enough. The host may still change the object between construction and
//! commit, which is why writes can fail.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::core::value::Value;

/// An object exposing named attributes for reading and writing.
pub trait BoundTarget: fmt::Debug {
    /// Current value of `attribute`, or `None` if the object does not expose it.
    fn get(&self, attribute: &str) -> Option<Value>;

    /// Overwrite `attribute`. Returns the reason on failure.
    fn set(&mut self, attribute: &str, value: Value) -> Result<(), String>;
}

pub type SharedTarget = Rc<RefCell<dyn BoundTarget>>;

/// Wrap a target for sharing between the host and a bound entry.
pub fn share<T: BoundTarget + 'static>(target: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(target))
}

/// A plain bag of named attributes.
///
/// Writes only succeed for attributes that already exist, so removing an
/// attribute makes later bound commits fail instead of silently adding it back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeMap {
    attributes: BTreeMap<String, Value>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.attributes.remove(name)
    }
}

impl BoundTarget for AttributeMap {
    fn get(&self, attribute: &str) -> Option<Value> {
        self.attributes.get(attribute).cloned()
    }

    fn set(&mut self, attribute: &str, value: Value) -> Result<(), String> {
        match self.attributes.get_mut(attribute) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(format!("target has no attribute '{attribute}'")),
        }
    }
}
