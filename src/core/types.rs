//! core::types
//!
//! Labels at loosely typed boundaries.
//!
//! # Types
//!
//! - [`Label`] - An owned sort label extracted from external input
//! - [`LabelError`] - Raised when input cannot supply a string label
//!
//! # Validation
//!
//! Inside Rust a label is any `&str`, so the type system already rules out
//! non-string labels. JSON input is the exception: a label slot may hold a
//! number, `null`, or an object. Extraction rejects those with
//! [`LabelError::InvalidLabelType`] instead of coercing them.
//!
//! # Examples
//!
//! ```
//! use natorder::core::types::{Label, LabelError};
//! use serde_json::json;
//!
//! let label = Label::from_json(0, &json!("a10")).unwrap();
//! assert_eq!(label.as_str(), "a10");
//!
//! let err = Label::from_json(3, &json!(10)).unwrap_err();
//! assert_eq!(err, LabelError::InvalidLabelType { index: 3, found: "number" });
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors from label extraction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LabelError {
    #[error("invalid label type at index {index}: expected string, found {found}")]
    InvalidLabelType { index: usize, found: &'static str },

    #[error("missing label field '{field}' at index {index}")]
    MissingField { index: usize, field: String },
}

/// An owned sort label.
///
/// Any string is a valid label, including the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(String);

impl Label {
    /// Create a label from a string.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Extract the label held directly by a JSON value.
    ///
    /// `index` is the value's position in the caller's input and is only
    /// used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::InvalidLabelType` unless `value` is a string.
    pub fn from_json(index: usize, value: &Value) -> Result<Self, LabelError> {
        match value {
            Value::String(s) => Ok(Self(s.clone())),
            other => Err(LabelError::InvalidLabelType {
                index,
                found: json_type_name(other),
            }),
        }
    }

    /// Extract the label stored under `field` in a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `LabelError::InvalidLabelType` if `value` is not an object or
    /// the field is not a string, and `LabelError::MissingField` if the
    /// object lacks the field.
    pub fn from_json_field(index: usize, value: &Value, field: &str) -> Result<Self, LabelError> {
        let object = value.as_object().ok_or(LabelError::InvalidLabelType {
            index,
            found: json_type_name(value),
        })?;

        let inner = object.get(field).ok_or_else(|| LabelError::MissingField {
            index,
            field: field.to_string(),
        })?;

        Self::from_json(index, inner)
    }

    /// Get the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the label is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of a JSON value's type, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
