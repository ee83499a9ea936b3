//! # Field Updates

use serde_json::{Map, Value};

/// Field assignments applied to a single document.
///
/// `set` overwrites or adds fields; `unset` removes them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    pub set: Map<String, Value>,
    pub unset: Vec<String>,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set.insert(field.into(), value.into());
        self
    }

    pub fn unset(mut self, field: impl Into<String>) -> Self {
        self.unset.push(field.into());
        self
    }

    /// Set the field when a value is given, remove it otherwise
    pub fn set_or_unset(self, field: impl Into<String>, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(value) => self.set(field, value),
            None => self.unset(field),
        }
    }

    /// Whether the update touches `field`
    pub fn touches(&self, field: &str) -> bool {
        self.set.contains_key(field) || self.unset.iter().any(|f| f == field)
    }

    /// Apply to a JSON object in place
    pub(crate) fn apply_to(&self, document: &mut Map<String, Value>) {
        for (field, value) in &self.set {
            document.insert(field.clone(), value.clone());
        }
        for field in &self.unset {
            document.remove(field);
        }
    }
}
