//! Per-field length rules.
//!
//! Every field is required (minimum length 1) and has a maximum length.
//! Lengths count Unicode scalar values, so `"§"` is one character even
//! though it is two bytes, while `"ยง"` is two characters.
//!
//! A rule table can be overridden from a YAML or JSON file naming only the
//! fields that differ from the defaults:
//!
//! ```yaml
//! street: 100
//! postal_code: 12
//! ```

use crate::document::{load_document, DocumentFormat};
use crate::field::AddressField;
use crate::result::{BillformError, BillformResult};
use crate::validator::FieldVerdict;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minimum length shared by every field
pub const MIN_LENGTH: usize = 1;

/// Length of `content` as counted by the rules
#[must_use]
pub fn char_len(content: &str) -> usize {
    content.chars().count()
}

/// Maximum-length table for the five address fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldRules {
    /// Street maximum
    pub street: usize,
    /// City maximum
    pub city: usize,
    /// State maximum
    pub state: usize,
    /// Country maximum
    pub country: usize,
    /// Postal code maximum
    pub postal_code: usize,
}

impl Default for FieldRules {
    fn default() -> Self {
        Self {
            street: AddressField::Street.default_max(),
            city: AddressField::City.default_max(),
            state: AddressField::State.default_max(),
            country: AddressField::Country.default_max(),
            postal_code: AddressField::PostalCode.default_max(),
        }
    }
}

/// Partial override document; absent keys keep the default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleOverrides {
    /// Override for street
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<usize>,
    /// Override for city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<usize>,
    /// Override for state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<usize>,
    /// Override for country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<usize>,
    /// Override for postal code
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "postalCode")]
    pub postal_code: Option<usize>,
}

impl FieldRules {
    /// Create the default table (70/40/40/40/10)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum length for `field`
    #[must_use]
    pub const fn max(&self, field: AddressField) -> usize {
        match field {
            AddressField::Street => self.street,
            AddressField::City => self.city,
            AddressField::State => self.state,
            AddressField::Country => self.country,
            AddressField::PostalCode => self.postal_code,
        }
    }

    /// Set the maximum length for `field`
    #[must_use]
    pub fn with_max(mut self, field: AddressField, max: usize) -> Self {
        *self.slot(field) = max;
        self
    }

    fn slot(&mut self, field: AddressField) -> &mut usize {
        match field {
            AddressField::Street => &mut self.street,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Country => &mut self.country,
            AddressField::PostalCode => &mut self.postal_code,
        }
    }

    /// Apply a partial override on top of this table
    #[must_use]
    pub fn merged(mut self, overrides: &RuleOverrides) -> Self {
        let pairs = [
            (AddressField::Street, overrides.street),
            (AddressField::City, overrides.city),
            (AddressField::State, overrides.state),
            (AddressField::Country, overrides.country),
            (AddressField::PostalCode, overrides.postal_code),
        ];
        for (field, max) in pairs {
            if let Some(max) = max {
                *self.slot(field) = max;
            }
        }
        self
    }

    /// Reject tables where a field could never be valid
    pub fn validate(&self) -> BillformResult<()> {
        for field in AddressField::ALL {
            if self.max(field) < MIN_LENGTH {
                return Err(BillformError::invalid_rule(
                    field,
                    format!("max must be at least {MIN_LENGTH}"),
                ));
            }
        }
        Ok(())
    }

    /// Build a validated table from defaults plus `overrides`
    pub fn from_overrides(overrides: &RuleOverrides) -> BillformResult<Self> {
        let rules = Self::default().merged(overrides);
        rules.validate()?;
        Ok(rules)
    }

    /// Parse an override document
    pub fn parse(text: &str, format: DocumentFormat) -> BillformResult<Self> {
        let overrides: RuleOverrides = format.parse(text)?;
        Self::from_overrides(&overrides)
    }

    /// Load an override file (`.json` or YAML)
    pub fn load(path: &Path) -> BillformResult<Self> {
        let overrides: RuleOverrides = load_document(path)?;
        let rules = Self::from_overrides(&overrides)?;
        tracing::debug!(path = %path.display(), ?rules, "loaded field rules");
        Ok(rules)
    }

    /// Judge one field's content
    #[must_use]
    pub fn check(&self, field: AddressField, content: &str) -> FieldVerdict {
        let length = char_len(content);
        let max = self.max(field);
        if length < MIN_LENGTH {
            FieldVerdict::Missing
        } else if length > max {
            FieldVerdict::TooLong { length, max }
        } else {
            FieldVerdict::Valid
        }
    }
}
