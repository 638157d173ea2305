//! The five billing address fields.

use crate::result::BillformError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the five billing address fields.
///
/// Variants are declared in canonical form order, which is also the order
/// used in reports and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    /// Street address
    Street,
    /// City
    City,
    /// State or province
    State,
    /// Country
    Country,
    /// Postal or ZIP code
    PostalCode,
}

impl AddressField {
    /// All fields in canonical order
    pub const ALL: [Self; 5] = [
        Self::Street,
        Self::City,
        Self::State,
        Self::Country,
        Self::PostalCode,
    ];

    /// Wire key used in address files and scenarios
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Street => "street",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
            Self::PostalCode => "postal_code",
        }
    }

    /// Human-readable label used in messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Street => "Street",
            Self::City => "City",
            Self::State => "State",
            Self::Country => "Country",
            Self::PostalCode => "Postal code",
        }
    }

    /// Default maximum length in characters
    #[must_use]
    pub const fn default_max(self) -> usize {
        match self {
            Self::Street => 70,
            Self::City | Self::State | Self::Country => 40,
            Self::PostalCode => 10,
        }
    }

    /// Position in canonical order
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AddressField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for AddressField {
    type Err = BillformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "street" => Ok(Self::Street),
            "city" => Ok(Self::City),
            "state" => Ok(Self::State),
            "country" => Ok(Self::Country),
            "postal_code" | "postalCode" | "postal" | "zip" => Ok(Self::PostalCode),
            other => Err(BillformError::UnknownField(other.to_string())),
        }
    }
}
