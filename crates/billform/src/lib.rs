//! billform: Billing Address Form Validation
//!
//! Decides when the billing address step of a checkout may be submitted.
//! Five fields (street, city, state, country, postal code) each carry a
//! maximum length; a field is valid iff `1 <= chars <= max`, and the form is
//! submittable iff all five are valid at once.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   prefill   ┌──────────────┐  report   ┌──────────────┐
//! │ Account      │────────────►│ CheckoutForm │──────────►│ Address      │
//! │ Profile      │             │ (session)    │◄──────────│ Validator    │
//! └──────────────┘             └──────┬───────┘ Evaluation└──────┬───────┘
//!        fill / clear ───────────────►│                           │
//!                                     ▼ FormChange               ▼
//!                              ┌──────────────┐          ┌──────────────┐
//!                              │ Observers    │          │ FieldRules   │
//!                              └──────────────┘          └──────────────┘
//! ```
//!
//! The [`scenario`] module replays scripted checkout flows against the form.

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays))]

mod address;
mod document;
mod field;
mod form;
mod result;
mod rules;
mod validator;

/// Scenario Testing: scripted runs through the billing step
///
/// YAML-defined fill/clear/expect sequences and the built-in acceptance set.
pub mod scenario;

pub use address::{AccountProfile, BillingAddress};
pub use document::{load_document, DocumentFormat};
pub use field::AddressField;
pub use form::{CheckoutForm, FormChange, FormObserver, ObserverId};
pub use result::{BillformError, BillformResult};
pub use rules::{char_len, FieldRules, RuleOverrides, MIN_LENGTH};
pub use validator::{AddressValidator, Evaluation, FieldVerdict, SubmitState, VerdictKind};

/// Evaluate `address` against the default rule table.
///
/// ```
/// use billform::{evaluate, BillingAddress, SubmitState};
///
/// assert_eq!(evaluate(&BillingAddress::new()), SubmitState::Disabled);
/// ```
#[must_use]
pub fn evaluate(address: &BillingAddress) -> SubmitState {
    AddressValidator::default().evaluate(address)
}

/// Prelude for convenient imports
pub mod prelude {
    pub use super::scenario::{Scenario, ScenarioRunResult, ScenarioRunner, Step};
    pub use super::{
        evaluate, AccountProfile, AddressField, AddressValidator, BillformError, BillformResult,
        BillingAddress, CheckoutForm, Evaluation, FieldRules, FieldVerdict, FormChange,
        FormObserver, SubmitState, VerdictKind,
    };
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_default_evaluate_matches_validator() {
        let address = BillingAddress::new()
            .with(AddressField::Street, "Test street 98")
            .with(AddressField::City, "Vienna")
            .with(AddressField::State, "Burgenland")
            .with(AddressField::Country, "Austria")
            .with(AddressField::PostalCode, "7461");
        assert_eq!(evaluate(&address), SubmitState::Enabled);
        assert_eq!(
            evaluate(&address),
            AddressValidator::default().evaluate(&address)
        );
    }

    #[test]
    fn test_prefill_independence() {
        let profile = AccountProfile::new()
            .with(AddressField::Street, "Test street 98")
            .with(AddressField::City, "Vienna")
            .with(AddressField::State, "")
            .with(AddressField::Country, "Austria")
            .with(AddressField::PostalCode, "");
        let mut address = BillingAddress::from_profile(&profile);
        assert_eq!(evaluate(&address), SubmitState::Disabled);

        address.set(AddressField::State, "abc 124 ghi jkl mno pqrs tuv wxyzz AB. D");
        address.set(AddressField::PostalCode, "012345 AB-");
        assert_eq!(evaluate(&address), SubmitState::Enabled);
    }
}
