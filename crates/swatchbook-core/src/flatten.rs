#![forbid(unsafe_code)]

//! Depth-first flattening of nested color groups.
//!
//! # Invariants
//!
//! 1. Exactly one [`FlatEntry`] per string leaf starting with `#`.
//! 2. Emission follows document key order (array elements by index).
//! 3. Numbers, booleans, nulls and non-`#` strings are skipped silently.
//! 4. Paths include the group segment: `brand.colors.primary`.
//!
//! # Failure Modes
//!
//! - Subtrees nested deeper than [`MAX_DEPTH`] are dropped with a warning.
//!   JSON values cannot form cycles, so depth is the only runaway to guard.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::color::HexColor;
use crate::document::ThemeDocument;

/// Deepest nesting level (group object = depth 1) that is still walked.
pub const MAX_DEPTH: usize = 64;

/// One color leaf with its dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub path: String,
    pub color: HexColor,
}

/// Flatten every group in `groups`, in that order. Missing groups are skipped.
#[must_use]
pub fn flatten_document<S: AsRef<str>>(doc: &ThemeDocument, groups: &[S]) -> Vec<FlatEntry> {
    let mut out = Vec::new();
    for group in groups {
        let group = group.as_ref();
        match doc.group(group) {
            Some(map) => walk_object(map, group, 1, &mut out),
            None => debug!(group, "palette group absent, skipping"),
        }
    }
    out
}

/// Flatten a single top-level group.
#[must_use]
pub fn flatten_group(doc: &ThemeDocument, group: &str) -> Vec<FlatEntry> {
    flatten_document(doc, &[group])
}

fn walk_object(map: &Map<String, Value>, prefix: &str, depth: usize, out: &mut Vec<FlatEntry>) {
    for (key, value) in map {
        visit(value, &format!("{prefix}.{key}"), depth, out);
    }
}

fn visit(value: &Value, path: &str, depth: usize, out: &mut Vec<FlatEntry>) {
    match value {
        Value::Object(_) | Value::Array(_) if depth >= MAX_DEPTH => {
            warn!(path, max_depth = MAX_DEPTH, "palette subtree too deep, skipping");
        }
        Value::Object(map) => walk_object(map, path, depth + 1, out),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                visit(item, &format!("{path}.{index}"), depth + 1, out);
            }
        }
        Value::String(raw) => {
            if let Some(color) = HexColor::parse(raw) {
                out.push(FlatEntry {
                    path: path.to_owned(),
                    color,
                });
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}
