//! Result and error types for billform.
//!
//! Evaluating an address never fails: a disabled submit control is an
//! ordinary outcome. These errors cover loading rule tables, addresses and
//! scenarios, and misuse of a form session.

use crate::field::AddressField;
use thiserror::Error;

/// Result type for billform operations
pub type BillformResult<T> = Result<T, BillformError>;

/// Errors that can occur in billform
#[derive(Debug, Error)]
pub enum BillformError {
    /// I/O error while reading a rules, address or scenario file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document could not be parsed
    #[error("Failed to parse {format}: {message}")]
    Parse {
        /// Document format ("YAML" or "JSON")
        format: &'static str,
        /// Parser message
        message: String,
    },

    /// A rule table entry is unusable
    #[error("Invalid rule for {field}: {message}")]
    InvalidRule {
        /// Field the rule applies to
        field: AddressField,
        /// Error message
        message: String,
    },

    /// Field name not recognised
    #[error("Unknown address field '{0}'")]
    UnknownField(String),

    /// Scenario document is structurally invalid
    #[error("Invalid scenario: {message}")]
    InvalidScenario {
        /// Error message
        message: String,
    },

    /// Submit was requested while the form is disabled
    #[error("Submit is disabled; invalid fields: {}", join_fields(.failing))]
    SubmitDisabled {
        /// Fields that failed validation
        failing: Vec<AddressField>,
    },
}

impl BillformError {
    /// Create a YAML parse error
    #[must_use]
    pub fn yaml(message: impl Into<String>) -> Self {
        Self::Parse {
            format: "YAML",
            message: message.into(),
        }
    }

    /// Create a JSON parse error
    #[must_use]
    pub fn json(message: impl Into<String>) -> Self {
        Self::Parse {
            format: "JSON",
            message: message.into(),
        }
    }

    /// Create an invalid rule error
    #[must_use]
    pub fn invalid_rule(field: AddressField, message: impl Into<String>) -> Self {
        Self::InvalidRule {
            field,
            message: message.into(),
        }
    }

    /// Create an invalid scenario error
    #[must_use]
    pub fn invalid_scenario(message: impl Into<String>) -> Self {
        Self::InvalidScenario {
            message: message.into(),
        }
    }
}

fn join_fields(fields: &[AddressField]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}
