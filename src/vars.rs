//! Variable table consumed by the template evaluator.
//!
//! A plain name → value mapping supplied by the caller for a single
//! resolution. Names are case-sensitive; a missing name is "absent", never
//! an error.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{LbmError, Result};

/// Name → string value mapping used during one template expansion.
///
/// Backed by a `BTreeMap` so iteration and serialized output are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableTable {
    entries: BTreeMap<String, String>,
}

impl VariableTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, returning the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build a table from a script-side JSON object.
    ///
    /// Strings bind as-is, numbers and booleans bind as their textual form and
    /// `null` leaves the name unbound. Nested arrays/objects are rejected since
    /// substitution is purely textual.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            LbmError::invalid_argument(format!(
                "variable table must be an object, got {}",
                json_kind(value)
            ))
        })?;

        let mut table = Self::new();
        for (name, value) in object {
            if name.is_empty() {
                return Err(LbmError::invalid_argument("variable name must not be empty"));
            }
            let text = match value {
                Value::Null => continue,
                Value::String(s) => s.clone(),
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(LbmError::invalid_argument(format!(
                        "variable '{}' must be a scalar, got {}",
                        name,
                        json_kind(value)
                    )));
                }
            };
            table.insert(name.clone(), text);
        }
        Ok(table)
    }

    /// Load a table from a JSON object file, with the same rules as [`Self::from_json`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content)?;
        Self::from_json(&value)
    }

    /// Parse a `NAME=VALUE` binding. The value may be empty or contain `=`.
    pub fn parse_assignment(binding: &str) -> Result<(String, String)> {
        let (name, value) = binding.split_once('=').ok_or_else(|| {
            LbmError::invalid_argument(format!("expected NAME=VALUE, got '{}'", binding))
        })?;
        if name.is_empty() {
            return Err(LbmError::invalid_argument(format!(
                "empty variable name in '{}'",
                binding
            )));
        }
        Ok((name.to_string(), value.to_string()))
    }
}

/// Short JSON type name for error messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for VariableTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for VariableTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}
