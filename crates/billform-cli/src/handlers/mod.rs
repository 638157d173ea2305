//! Command handlers, kept out of main.rs for testability
//!
//! Each handler module contains:
//! - The execution logic for a CLI command
//! - Pure helper functions
//! - Tests

pub mod check;
pub mod limits;
pub mod scenario;

pub use check::{evaluate_input, execute_check, prefilled_address, read_address};
pub use limits::execute_limits;
pub use scenario::{collect_scenarios, execute_scenario};
