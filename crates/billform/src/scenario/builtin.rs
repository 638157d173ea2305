//! Built-in acceptance scenarios for the storefront billing step.
//!
//! These replay the guest and account checkout flows: per-field character
//! limits, missing fields, full and partial prefill, and overwriting
//! prefilled values.

use super::schema::{Scenario, Step};
use crate::address::AccountProfile;
use crate::field::AddressField;
use crate::validator::{SubmitState, VerdictKind};

/// Postal code at its 10-character limit
pub const CHAR_TEXT_10: &str = "012345 AB-";
/// Postal code one over the limit
pub const CHAR_TEXT_11: &str = "012345 AB-C";
/// City/state/country at the 40-character limit
pub const CHAR_TEXT_40: &str = "abc 124 ghi jkl mno pqrs tuv wxyzz AB. D";
/// City/state/country one over the limit
pub const CHAR_TEXT_41: &str = "abc 124 ghi jkl mno pqrs tuv wxyzz AB. DC";
/// Street at the 70-character limit
pub const CHAR_TEXT_70: &str =
    "abc def ghi jkl mno pqr's tuv wxyz ABC DEF GHI JKL MNO PQRS TUV WXYZ !";
/// Street one over the limit; the last character is two bytes in UTF-8
pub const CHAR_TEXT_71: &str =
    "abc def ghi jkl mno pqr's tuv wxyz ABC DEF GHI JKL MNO PQRS TUV WXYZ !§";

/// Text exactly at the default limit for `field`
#[must_use]
pub const fn at_limit(field: AddressField) -> &'static str {
    match field {
        AddressField::Street => CHAR_TEXT_70,
        AddressField::City | AddressField::State | AddressField::Country => CHAR_TEXT_40,
        AddressField::PostalCode => CHAR_TEXT_10,
    }
}

/// Text one character over the default limit for `field`
#[must_use]
pub const fn over_limit(field: AddressField) -> &'static str {
    match field {
        AddressField::Street => CHAR_TEXT_71,
        AddressField::City | AddressField::State | AddressField::Country => CHAR_TEXT_41,
        AddressField::PostalCode => CHAR_TEXT_11,
    }
}

/// Account with every address field stored
#[must_use]
pub fn full_account() -> AccountProfile {
    AccountProfile::new()
        .with(AddressField::Street, "Test street 98")
        .with(AddressField::City, "Vienna")
        .with(AddressField::State, "Burgenland")
        .with(AddressField::Country, "Austria")
        .with(AddressField::PostalCode, "7461")
}

/// Account missing state and postal code
#[must_use]
pub fn partial_account() -> AccountProfile {
    AccountProfile::new()
        .with(AddressField::Street, "Test street 98")
        .with(AddressField::City, "Vienna")
        .with(AddressField::State, "")
        .with(AddressField::Country, "Austria")
        .with(AddressField::PostalCode, "")
}

fn fill_all_at_limit() -> impl Iterator<Item = Step> {
    AddressField::ALL
        .into_iter()
        .map(|f| Step::fill(f, at_limit(f)))
}

fn character_limits() -> Scenario {
    let mut scenario = Scenario::new("character limits")
        .with_description("A field is only accepted within its character limit")
        .steps(fill_all_at_limit())
        .step(Step::expect(SubmitState::Enabled));

    for field in AddressField::ALL {
        scenario = scenario
            .step(Step::fill(field, over_limit(field)))
            .step(Step::expect_field(field, VerdictKind::TooLong))
            .step(Step::expect(SubmitState::Disabled))
            .step(Step::fill(field, at_limit(field)))
            .step(Step::expect_field(field, VerdictKind::Valid));
    }
    scenario.step(Step::expect(SubmitState::Enabled))
}

fn missing_fields() -> Scenario {
    let mut scenario = Scenario::new("missing fields")
        .with_description("Address cannot be submitted if any field is missing")
        .steps(fill_all_at_limit());

    for field in AddressField::ALL {
        scenario = scenario
            .step(Step::clear(field))
            .step(Step::expect_field(field, VerdictKind::Missing))
            .step(Step::expect(SubmitState::Disabled))
            .step(Step::fill(field, at_limit(field)))
            .step(Step::expect(SubmitState::Enabled));
    }

    scenario
        .steps(AddressField::ALL.into_iter().map(Step::clear))
        .step(Step::expect(SubmitState::Disabled))
        .steps(
            AddressField::ALL
                .into_iter()
                .map(|f| Step::fill(f, over_limit(f))),
        )
        .step(Step::expect(SubmitState::Disabled))
}

fn full_prefill() -> Scenario {
    Scenario::new("full prefill")
        .with_description("Address is accepted when every field comes from the account")
        .with_prefill(full_account())
        .steps(
            AddressField::ALL
                .into_iter()
                .map(|f| Step::expect_field(f, VerdictKind::Valid)),
        )
        .step(Step::expect(SubmitState::Enabled))
}

fn partial_prefill() -> Scenario {
    Scenario::new("partial prefill")
        .with_description("Blank account fields block submission until filled in")
        .with_prefill(partial_account())
        .step(Step::expect_field(AddressField::State, VerdictKind::Missing))
        .step(Step::expect_field(
            AddressField::PostalCode,
            VerdictKind::Missing,
        ))
        .step(Step::expect(SubmitState::Disabled))
        .step(Step::fill(AddressField::State, CHAR_TEXT_40))
        .step(Step::expect(SubmitState::Disabled))
        .step(Step::fill(AddressField::PostalCode, CHAR_TEXT_10))
        .step(Step::expect(SubmitState::Enabled))
}

fn prefill_then_overwrite() -> Scenario {
    Scenario::new("prefill then overwrite")
        .with_description("Overwritten account values are validated like typed ones")
        .with_prefill(full_account())
        .step(Step::expect(SubmitState::Enabled))
        .steps(fill_all_at_limit())
        .step(Step::expect(SubmitState::Enabled))
        .step(Step::fill(AddressField::Street, CHAR_TEXT_71))
        .step(Step::expect(SubmitState::Disabled))
        .step(Step::prefill(full_account()))
        .step(Step::expect(SubmitState::Enabled))
}

/// All built-in scenarios, in run order
#[must_use]
pub fn builtin() -> Vec<Scenario> {
    vec![
        character_limits(),
        missing_fields(),
        full_prefill(),
        partial_prefill(),
        prefill_then_overwrite(),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_text_lengths() {
        for field in AddressField::ALL {
            assert_eq!(at_limit(field).chars().count(), field.default_max());
            assert_eq!(over_limit(field).chars().count(), field.default_max() + 1);
        }
    }

    #[test]
    fn test_street_overflow_is_one_char_over() {
        assert_eq!(CHAR_TEXT_71.chars().count(), 71);
        assert!(CHAR_TEXT_71.starts_with(CHAR_TEXT_70));
        assert!(CHAR_TEXT_71.len() > 71);
    }

    #[test]
    fn test_builtins_are_valid() {
        let scenarios = builtin();
        assert_eq!(scenarios.len(), 5);
        for scenario in &scenarios {
            scenario.validate().unwrap();
            assert!(scenario.expectation_count() > 0, "{}", scenario.name);
        }
    }

    #[test]
    fn test_builtin_names_unique() {
        let scenarios = builtin();
        let mut names: Vec<_> = scenarios.iter().map(|s| s.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), scenarios.len());
    }
}
