//! Billing address snapshot and the account profile used to prefill it.

use crate::document::{load_document, DocumentFormat};
use crate::field::AddressField;
use crate::result::BillformResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Snapshot of the five billing address fields.
///
/// Content is stored verbatim; an empty string is a missing field.
///
/// # Example
/// ```
/// use billform::{AddressField, BillingAddress};
///
/// let address = BillingAddress::new()
///     .with(AddressField::Street, "Test street 98")
///     .with(AddressField::City, "Vienna");
/// assert_eq!(address.get(AddressField::City), "Vienna");
/// assert_eq!(address.get(AddressField::State), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BillingAddress {
    /// Street address
    #[serde(default)]
    pub street: String,
    /// City
    #[serde(default)]
    pub city: String,
    /// State or province
    #[serde(default)]
    pub state: String,
    /// Country
    #[serde(default)]
    pub country: String,
    /// Postal or ZIP code
    #[serde(default, alias = "postalCode")]
    pub postal_code: String,
}

impl BillingAddress {
    /// Create an address with every field empty
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an address from an account profile; absent values become empty
    #[must_use]
    pub fn from_profile(profile: &AccountProfile) -> Self {
        let mut address = Self::new();
        for field in AddressField::ALL {
            if let Some(value) = profile.get(field) {
                address.set(field, value);
            }
        }
        address
    }

    /// Set a field, builder style
    #[must_use]
    pub fn with(mut self, field: AddressField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Current content of `field`
    #[must_use]
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Country => &self.country,
            AddressField::PostalCode => &self.postal_code,
        }
    }

    /// Overwrite `field`
    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        let slot = match field {
            AddressField::Street => &mut self.street,
            AddressField::City => &mut self.city,
            AddressField::State => &mut self.state,
            AddressField::Country => &mut self.country,
            AddressField::PostalCode => &mut self.postal_code,
        };
        *slot = value.into();
    }

    /// Fields and their content in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (AddressField, &str)> + '_ {
        AddressField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Parse an address document
    pub fn parse(text: &str, format: DocumentFormat) -> BillformResult<Self> {
        format.parse(text)
    }

    /// Load an address file (`.json` or YAML)
    pub fn load(path: &Path) -> BillformResult<Self> {
        load_document(path)
    }
}

/// Address data stored on a customer account.
///
/// Any field may be absent. `None` and `Some("")` prefill the same empty
/// field; prefill grants no exemption from validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Stored street
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Stored city
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Stored state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Stored country
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Stored postal code
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "postalCode")]
    pub postal_code: Option<String>,
}

impl AccountProfile {
    /// Create a profile with nothing stored
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a value, builder style
    #[must_use]
    pub fn with(mut self, field: AddressField, value: impl Into<String>) -> Self {
        let value = Some(value.into());
        match field {
            AddressField::Street => self.street = value,
            AddressField::City => self.city = value,
            AddressField::State => self.state = value,
            AddressField::Country => self.country = value,
            AddressField::PostalCode => self.postal_code = value,
        }
        self
    }

    /// Stored value for `field`, if any
    #[must_use]
    pub fn get(&self, field: AddressField) -> Option<&str> {
        match field {
            AddressField::Street => self.street.as_deref(),
            AddressField::City => self.city.as_deref(),
            AddressField::State => self.state.as_deref(),
            AddressField::Country => self.country.as_deref(),
            AddressField::PostalCode => self.postal_code.as_deref(),
        }
    }

    /// Fields this profile stores a value for
    pub fn stored_fields(&self) -> impl Iterator<Item = AddressField> + '_ {
        AddressField::ALL
            .into_iter()
            .filter(move |f| self.get(*f).is_some())
    }

    /// Load a profile file (`.json` or YAML)
    pub fn load(path: &Path) -> BillformResult<Self> {
        load_document(path)
    }
}
