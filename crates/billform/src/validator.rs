//! Billing address form validator.
//!
//! A field is valid iff `1 <= chars <= max`. The address may be submitted
//! iff all five fields are valid at once. Evaluation is a pure, total
//! function of the snapshot: a disabled submit control is an ordinary
//! result, never an error.
//!
//! # Example
//! ```
//! use billform::{AddressField, AddressValidator, BillingAddress, SubmitState};
//!
//! let validator = AddressValidator::default();
//! let address = BillingAddress::new()
//!     .with(AddressField::Street, "Test street 98")
//!     .with(AddressField::City, "Vienna")
//!     .with(AddressField::State, "Burgenland")
//!     .with(AddressField::Country, "Austria")
//!     .with(AddressField::PostalCode, "7461");
//!
//! assert_eq!(validator.evaluate(&address), SubmitState::Enabled);
//! ```

use crate::address::BillingAddress;
use crate::field::AddressField;
use crate::rules::FieldRules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of checking a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum FieldVerdict {
    /// Content is within limits
    Valid,
    /// Content is empty
    Missing,
    /// Content exceeds the field maximum
    TooLong {
        /// Measured length in characters
        length: usize,
        /// Field maximum
        max: usize,
    },
}

impl FieldVerdict {
    /// Whether the field passes
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Verdict kind without measurements
    #[must_use]
    pub const fn kind(self) -> VerdictKind {
        match self {
            Self::Valid => VerdictKind::Valid,
            Self::Missing => VerdictKind::Missing,
            Self::TooLong { .. } => VerdictKind::TooLong,
        }
    }

    /// Message shown next to an invalid field; `None` when valid
    #[must_use]
    pub fn message(self, field: AddressField) -> Option<String> {
        match self {
            Self::Valid => None,
            Self::Missing => Some(format!("{} is required", field.label())),
            Self::TooLong { length, max } => Some(format!(
                "{} must be at most {max} characters (got {length})",
                field.label()
            )),
        }
    }
}

/// Verdict category, used where measurements are irrelevant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictKind {
    /// Content is within limits
    Valid,
    /// Content is empty
    Missing,
    /// Content exceeds the field maximum
    TooLong,
}

impl fmt::Display for VerdictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Valid => "valid",
            Self::Missing => "missing",
            Self::TooLong => "too_long",
        })
    }
}

/// Whether the continue/submit control is usable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitState {
    /// All five fields are valid
    Enabled,
    /// At least one field is missing or too long
    Disabled,
}

impl SubmitState {
    /// Whether submission is allowed
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl fmt::Display for SubmitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        })
    }
}

/// Per-field verdicts plus the overall decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    verdicts: [FieldVerdict; 5],
    state: SubmitState,
}

impl Evaluation {
    /// Overall submit decision
    #[must_use]
    pub const fn submit_state(&self) -> SubmitState {
        self.state
    }

    /// Shorthand for `submit_state().is_enabled()`
    #[must_use]
    pub const fn is_submittable(&self) -> bool {
        self.state.is_enabled()
    }

    /// Verdict for `field`
    #[must_use]
    pub const fn verdict(&self, field: AddressField) -> FieldVerdict {
        self.verdicts[field.index()]
    }

    /// All verdicts in canonical field order
    pub fn verdicts(&self) -> impl Iterator<Item = (AddressField, FieldVerdict)> + '_ {
        AddressField::ALL.into_iter().zip(self.verdicts.iter().copied())
    }

    /// Fields that failed, in canonical order
    pub fn failing_fields(&self) -> impl Iterator<Item = AddressField> + '_ {
        self.verdicts()
            .filter(|(_, v)| !v.is_valid())
            .map(|(f, _)| f)
    }

    /// Messages for every failing field
    #[must_use]
    pub fn messages(&self) -> Vec<(AddressField, String)> {
        self.verdicts()
            .filter_map(|(f, v)| v.message(f).map(|m| (f, m)))
            .collect()
    }
}

/// Decides whether a billing address may be submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddressValidator {
    rules: FieldRules,
}

impl AddressValidator {
    /// Create a validator over `rules`
    #[must_use]
    pub const fn new(rules: FieldRules) -> Self {
        Self { rules }
    }

    /// Rule table in use
    #[must_use]
    pub const fn rules(&self) -> &FieldRules {
        &self.rules
    }

    /// Check a single field
    #[must_use]
    pub fn check_field(&self, field: AddressField, content: &str) -> FieldVerdict {
        self.rules.check(field, content)
    }

    /// Submit decision for `address`
    #[must_use]
    pub fn evaluate(&self, address: &BillingAddress) -> SubmitState {
        if address
            .iter()
            .all(|(field, content)| self.check_field(field, content).is_valid())
        {
            SubmitState::Enabled
        } else {
            SubmitState::Disabled
        }
    }

    /// Full per-field report for `address`
    #[must_use]
    pub fn report(&self, address: &BillingAddress) -> Evaluation {
        let verdicts = AddressField::ALL.map(|f| self.check_field(f, address.get(f)));
        let state = if verdicts.iter().all(|v| v.is_valid()) {
            SubmitState::Enabled
        } else {
            SubmitState::Disabled
        };
        tracing::debug!(%state, ?verdicts, "evaluated billing address");
        Evaluation { verdicts, state }
    }
}
