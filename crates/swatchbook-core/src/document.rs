#![forbid(unsafe_code)]

//! Theme document parsing.
//!
//! The theme document is externally authored JSON: a top-level object whose
//! groups (`brand`, `functional`) nest name segments down to `#`-prefixed
//! color strings. Key order is the document's own, which the flattener
//! relies on for emission order.

use serde_json::{Map, Value};

use crate::error::{Result, ShowcaseError};

/// Top-level groups visited when rendering, in order.
pub const PALETTE_GROUPS: [&str; 2] = ["brand", "functional"];

/// A parsed theme document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeDocument {
    root: Map<String, Value>,
}

impl ThemeDocument {
    /// Parse a document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Parse a document from raw response bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    /// Wrap an already-parsed value; it must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(ShowcaseError::NotAnObject {
                found: value_kind(&other),
            }),
        }
    }

    /// An object-valued top-level group. Missing and non-object groups are `None`.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Map<String, Value>> {
        self.root.get(name).and_then(Value::as_object)
    }

    /// Top-level keys in document order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.root.keys().map(String::as_str)
    }
}

pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
