use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during payload construction or processing.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OtmError {
    /// A row failed normalization.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A field required by the document mapping is absent or blank.
    ///
    /// `line_index` is 1-based; 0 denotes a header-level field.
    #[error("order {order_id}, line {line_index}: missing required field '{field}'")]
    MissingField {
        order_id: String,
        line_index: usize,
        field: String,
    },

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// The ways a raw field value can fail normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Required field absent or blank.
    Missing,
    /// Field did not parse as the expected integer or decimal.
    NotNumeric,
    /// Timestamp did not match the fixed-width `YYYYMMDDHHMMSS` format.
    BadDateFormat,
    /// Currency was not a 3-letter alphabetic code.
    BadCurrencyCode,
}

impl ViolationKind {
    /// Stable wire token for this violation kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::NotNumeric => "not_numeric",
            Self::BadDateFormat => "bad_date_format",
            Self::BadCurrencyCode => "bad_currency_code",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single normalization error with the offending field and violation kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Input column / form field name (e.g. "qty").
    pub field: String,
    /// What went wrong.
    pub kind: ViolationKind,
    /// Human-readable error description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn new(
        field: impl Into<String>,
        kind: ViolationKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    /// Shorthand for a missing required field.
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        let message = format!("required field '{field}' is missing or blank");
        Self {
            field,
            kind: ViolationKind::Missing,
            message,
        }
    }
}
