//! Scenario Testing: scripted runs through the billing step
//!
//! A scenario opens a [`crate::CheckoutForm`] (optionally prefilled from an
//! account), applies fill/clear/prefill steps, and checks the submit state
//! and individual field verdicts along the way.
//!
//! # Example
//!
//! ```yaml
//! version: "1.0"
//! name: "guest missing postal"
//! steps:
//!   - { type: fill, field: street, value: "Test street 98" }
//!   - { type: fill, field: city, value: Vienna }
//!   - { type: fill, field: state, value: Burgenland }
//!   - { type: fill, field: country, value: Austria }
//!   - { type: expect, state: disabled }
//!   - { type: expect_field, field: postal_code, verdict: missing }
//!   - { type: fill, field: postal_code, value: "7461" }
//!   - { type: expect, state: enabled }
//! ```

pub mod builtin;
pub mod runner;
pub mod schema;

pub use builtin::builtin;
pub use runner::{ScenarioRunResult, ScenarioRunner, StepResult};
pub use schema::{Scenario, Step, SCENARIO_VERSION};
