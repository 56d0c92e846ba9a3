//! Label selection for records.
//!
//! A record is whatever the caller supplies; a [`LabelSelector`] turns one
//! into the string that is displayed and matched against.

use serde_json::{Number, Value};

/// Placeholder label for records that lack the selected field.
pub const MISSING_LABEL: &str = "undefined";

/// Produces the display label of a record.
pub trait LabelSelector<R> {
    /// Returns the label for `record`. Must not panic for any record.
    fn label(&self, record: &R) -> String;
}

impl<R, F> LabelSelector<R> for F
where
    F: Fn(&R) -> String,
{
    fn label(&self, record: &R) -> String {
        self(record)
    }
}

/// Selects a named field from JSON object records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelector {
    field: String,
}

impl FieldSelector {
    /// Creates a selector for the given field name.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Returns the selected field name.
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl LabelSelector<Value> for FieldSelector {
    fn label(&self, record: &Value) -> String {
        match record.get(&self.field) {
            Some(value) => coerce_to_string(value),
            None => MISSING_LABEL.to_string(),
        }
    }
}

/// Coerces a JSON value to its display string.
///
/// Strings are used verbatim, arrays join their elements with `,`, and
/// objects collapse to `[object Object]`.
pub fn coerce_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(n),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                // Nested nulls render empty inside a joined array
                Value::Null => String::new(),
                other => coerce_to_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Integers print as-is. Floats print in their shortest form without a
/// trailing `.0`, switching to exponent notation (`1e+21`, `1.5e-7`) outside
/// `1e-6 <= |x| < 1e21`.
fn number_to_string(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => float_to_string(f),
        _ => n.to_string(),
    }
}

fn float_to_string(f: f64) -> String {
    if f == 0.0 {
        // Covers -0.0 too
        return "0".to_string();
    }
    let magnitude = f.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return f.to_string();
    }
    let exp = format!("{f:e}");
    if exp.contains("e-") {
        exp
    } else {
        exp.replacen('e', "e+", 1)
    }
}
