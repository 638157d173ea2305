//! Live checkout form session.
//!
//! Holds the billing step's current field values, re-evaluates after every
//! change and pushes the result to subscribed observers, the way a hosting
//! UI binds the continue button to the validator.
//!
//! # Example
//! ```
//! use billform::{AccountProfile, AddressField, AddressValidator, CheckoutForm, SubmitState};
//!
//! let profile = AccountProfile::new()
//!     .with(AddressField::Street, "Test street 98")
//!     .with(AddressField::City, "Vienna")
//!     .with(AddressField::Country, "Austria");
//!
//! let mut form = CheckoutForm::prefilled(AddressValidator::default(), &profile);
//! assert_eq!(form.submit_state(), SubmitState::Disabled);
//!
//! form.fill(AddressField::State, "Burgenland");
//! form.fill(AddressField::PostalCode, "7461");
//! assert_eq!(form.submit_state(), SubmitState::Enabled);
//!
//! let address = form.submit().unwrap();
//! assert_eq!(address.city, "Vienna");
//! ```

use crate::address::{AccountProfile, BillingAddress};
use crate::field::AddressField;
use crate::result::{BillformError, BillformResult};
use crate::validator::{AddressValidator, Evaluation, SubmitState};
use std::fmt;

/// Notification sent to observers after a form change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormChange {
    /// Fields written by the change
    pub fields: Vec<AddressField>,
    /// Submit state before the change
    pub previous: SubmitState,
    /// Submit state after the change
    pub state: SubmitState,
}

impl FormChange {
    /// Whether the change toggled the submit control
    #[must_use]
    pub fn flipped(&self) -> bool {
        self.previous != self.state
    }
}

/// Receives form changes.
///
/// Implemented for any `FnMut(&FormChange)` closure.
pub trait FormObserver {
    /// Called synchronously after each change
    fn on_change(&mut self, change: &FormChange);
}

impl<F> FormObserver for F
where
    F: FnMut(&FormChange),
{
    fn on_change(&mut self, change: &FormChange) {
        self(change);
    }
}

/// Handle returned by [`CheckoutForm::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Billing address step of a checkout session
pub struct CheckoutForm {
    validator: AddressValidator,
    address: BillingAddress,
    evaluation: Evaluation,
    observers: Vec<(ObserverId, Box<dyn FormObserver>)>,
    next_observer: u64,
}

impl fmt::Debug for CheckoutForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckoutForm")
            .field("address", &self.address)
            .field("state", &self.evaluation.submit_state())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl CheckoutForm {
    /// Open an empty form
    #[must_use]
    pub fn new(validator: AddressValidator) -> Self {
        Self::with_address(validator, BillingAddress::new())
    }

    /// Open a form seeded from an account profile
    #[must_use]
    pub fn prefilled(validator: AddressValidator, profile: &AccountProfile) -> Self {
        let form = Self::with_address(validator, BillingAddress::from_profile(profile));
        tracing::debug!(
            stored = profile.stored_fields().count(),
            state = %form.submit_state(),
            "opened prefilled billing form"
        );
        form
    }

    /// Open a form with explicit initial values
    #[must_use]
    pub fn with_address(validator: AddressValidator, address: BillingAddress) -> Self {
        let evaluation = validator.report(&address);
        Self {
            validator,
            address,
            evaluation,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// Current snapshot
    #[must_use]
    pub const fn address(&self) -> &BillingAddress {
        &self.address
    }

    /// Current submit decision
    #[must_use]
    pub const fn submit_state(&self) -> SubmitState {
        self.evaluation.submit_state()
    }

    /// Current per-field report
    #[must_use]
    pub const fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    /// Validator in use
    #[must_use]
    pub const fn validator(&self) -> &AddressValidator {
        &self.validator
    }

    /// Overwrite one field and re-evaluate
    pub fn fill(&mut self, field: AddressField, value: impl Into<String>) -> SubmitState {
        self.address.set(field, value);
        self.commit(vec![field])
    }

    /// Blank one field and re-evaluate
    pub fn clear(&mut self, field: AddressField) -> SubmitState {
        self.fill(field, String::new())
    }

    /// Overwrite every field the profile stores a value for, then re-evaluate once
    pub fn apply_profile(&mut self, profile: &AccountProfile) -> SubmitState {
        let fields: Vec<_> = profile.stored_fields().collect();
        for &field in &fields {
            if let Some(value) = profile.get(field) {
                self.address.set(field, value);
            }
        }
        self.commit(fields)
    }

    /// Register an observer; it sees every later change
    pub fn subscribe(&mut self, observer: impl FormObserver + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Finish the step. Fails if the submit control is disabled.
    pub fn submit(self) -> BillformResult<BillingAddress> {
        if !self.evaluation.is_submittable() {
            let failing: Vec<_> = self.evaluation.failing_fields().collect();
            tracing::info!(?failing, "submit rejected");
            return Err(BillformError::SubmitDisabled { failing });
        }
        tracing::info!("billing address submitted");
        Ok(self.address)
    }

    /// Leave the step without submitting
    pub fn abandon(self) {
        tracing::info!(state = %self.submit_state(), "billing form abandoned");
    }

    fn commit(&mut self, fields: Vec<AddressField>) -> SubmitState {
        let previous = self.evaluation.submit_state();
        self.evaluation = self.validator.report(&self.address);
        let change = FormChange {
            fields,
            previous,
            state: self.evaluation.submit_state(),
        };
        if change.flipped() {
            tracing::info!(from = %previous, to = %change.state, fields = ?change.fields, "submit state changed");
        }
        for (_, observer) in &mut self.observers {
            observer.on_change(&change);
        }
        change.state
    }
}
