use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

/// A user-defined persona: attribute names mapped to free-form values.
///
/// There is no fixed schema. The attributes present are whatever the
/// creation template asked for, or whatever the stored document contained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Character {
    attributes: BTreeMap<String, String>,
}

impl Character {
    /// Create an empty character.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the character has no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Compact single-line JSON, used when the character is handed to the
    /// chat service as context.
    pub fn to_compact_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty JSON with 2-space indentation, the on-disk format.
    pub fn to_pretty_json(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl FromIterator<(String, String)> for Character {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "  (no attributes)");
        }
        let width = self.attributes.keys().map(|k| k.len()).max().unwrap_or(0);
        let mut first = true;
        for (name, value) in self.iter() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "  {name:<width$}  {value}")?;
        }
        Ok(())
    }
}
