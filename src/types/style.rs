//! Typed style values and their JavaScript rendering.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;

/// A single React Native style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Number(f64),
    String(String),
    /// Nested `{ width, height }` value, e.g. `shadowOffset`.
    Pair { width: f64, height: f64 },
}

impl StyleValue {
    pub fn str(value: impl Into<String>) -> Self {
        StyleValue::String(value.into())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            StyleValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StyleValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render as a JavaScript expression.
    pub fn to_js(&self) -> String {
        match self {
            StyleValue::Number(n) => format_number(*n),
            StyleValue::String(s) => js_string_literal(s),
            StyleValue::Pair { width, height } => format!(
                "{{ width: {}, height: {} }}",
                format_number(*width),
                format_number(*height)
            ),
        }
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::String(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::String(value.to_string())
    }
}

/// Ordered property name to value table for one node.
pub type StyleMapping = IndexMap<String, StyleValue>;

/// Format a number the way a person would type it in JS source.
///
/// Integral values drop the fraction, `-0` becomes `0`, and non-finite
/// values (which JS style objects cannot hold) become `0`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

/// Single-quoted JavaScript string literal.
pub fn js_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

/// `{ key: value, ... }` on one line, or `{}` when empty.
pub fn format_mapping_inline(mapping: &StyleMapping) -> String {
    if mapping.is_empty() {
        return "{}".to_string();
    }
    let body = mapping
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value.to_js()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{ {} }}", body)
}

/// Multi-line object literal whose properties sit at `indent + 2` spaces.
pub fn format_mapping_block(mapping: &StyleMapping, indent: usize) -> String {
    if mapping.is_empty() {
        return "{}".to_string();
    }
    let pad = " ".repeat(indent);
    let mut out = String::from("{\n");
    for (key, value) in mapping {
        let _ = writeln!(out, "{pad}  {}: {},", key, value.to_js());
    }
    out.push_str(&pad);
    out.push('}');
    out
}
