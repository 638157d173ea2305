//! Scenario YAML schema.
//!
//! ```yaml
//! version: "1.0"
//! name: partial prefill
//! prefill:
//!   street: Test street 98
//!   city: Vienna
//!   country: Austria
//! steps:
//!   - type: expect
//!     state: disabled
//!   - { type: fill, field: state, value: Burgenland }
//!   - { type: fill, field: postal_code, value: "7461" }
//!   - { type: expect, state: enabled }
//! ```

use crate::address::AccountProfile;
use crate::document::{load_document, DocumentFormat};
use crate::field::AddressField;
use crate::result::{BillformError, BillformResult};
use crate::rules::{FieldRules, RuleOverrides};
use crate::validator::{SubmitState, VerdictKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported schema version
pub const SCENARIO_VERSION: &str = "1.0";

/// A scripted run through the billing step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Schema version (must be "1.0")
    pub version: String,
    /// Scenario name
    #[serde(default)]
    pub name: String,
    /// Scenario description
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Account data the form opens with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefill: Option<AccountProfile>,
    /// Rule overrides layered on the runner's table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<RuleOverrides>,
    /// Steps, executed in order
    pub steps: Vec<Step>,
}

/// One scenario step, tagged by `type`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Step {
    /// Type a value into a field, replacing its content
    Fill {
        /// Target field
        field: AddressField,
        /// New content
        value: String,
    },
    /// Blank a field
    Clear {
        /// Target field
        field: AddressField,
    },
    /// Load account data into the form mid-run
    Prefill {
        /// Stored account data to apply
        profile: AccountProfile,
    },
    /// Assert the submit control state
    Expect {
        /// Expected state
        state: SubmitState,
    },
    /// Assert a single field's verdict
    ExpectField {
        /// Field to check
        field: AddressField,
        /// Expected verdict
        verdict: VerdictKind,
    },
}

impl Step {
    /// Fill step
    #[must_use]
    pub fn fill(field: AddressField, value: impl Into<String>) -> Self {
        Self::Fill {
            field,
            value: value.into(),
        }
    }

    /// Clear step
    #[must_use]
    pub const fn clear(field: AddressField) -> Self {
        Self::Clear { field }
    }

    /// Prefill step
    #[must_use]
    pub fn prefill(profile: AccountProfile) -> Self {
        Self::Prefill { profile }
    }

    /// Submit state expectation
    #[must_use]
    pub const fn expect(state: SubmitState) -> Self {
        Self::Expect { state }
    }

    /// Field verdict expectation
    #[must_use]
    pub const fn expect_field(field: AddressField, verdict: VerdictKind) -> Self {
        Self::ExpectField { field, verdict }
    }

    /// Whether the step asserts something
    #[must_use]
    pub const fn is_expectation(&self) -> bool {
        matches!(self, Self::Expect { .. } | Self::ExpectField { .. })
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fill { field, value } => {
                write!(f, "fill {field} ({} chars)", value.chars().count())
            }
            Self::Clear { field } => write!(f, "clear {field}"),
            Self::Prefill { profile } => {
                write!(f, "prefill {} field(s)", profile.stored_fields().count())
            }
            Self::Expect { state } => write!(f, "expect submit {state}"),
            Self::ExpectField { field, verdict } => write!(f, "expect {field} {verdict}"),
        }
    }
}

impl Scenario {
    /// Create an empty scenario
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: SCENARIO_VERSION.to_string(),
            name: name.into(),
            description: String::new(),
            prefill: None,
            rules: None,
            steps: Vec::new(),
        }
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the opening account data
    #[must_use]
    pub fn with_prefill(mut self, profile: AccountProfile) -> Self {
        self.prefill = Some(profile);
        self
    }

    /// Append a step
    #[must_use]
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append several steps
    #[must_use]
    pub fn steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Parse and validate a scenario
    pub fn from_yaml(yaml: &str) -> BillformResult<Self> {
        let scenario: Self = DocumentFormat::Yaml.parse(yaml)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load and validate a scenario file
    pub fn load(path: &Path) -> BillformResult<Self> {
        let mut scenario: Self = load_document(path)?;
        scenario.validate()?;
        if scenario.name.is_empty() {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                scenario.name = stem.to_string();
            }
        }
        Ok(scenario)
    }

    /// Check structural constraints
    pub fn validate(&self) -> BillformResult<()> {
        if self.version != SCENARIO_VERSION {
            return Err(BillformError::invalid_scenario(format!(
                "version '{}', expected '{SCENARIO_VERSION}'",
                self.version
            )));
        }
        if self.steps.is_empty() {
            return Err(BillformError::invalid_scenario("steps cannot be empty"));
        }
        Ok(())
    }

    /// Rule table for this scenario on top of `base`
    pub fn rules_over(&self, base: FieldRules) -> BillformResult<FieldRules> {
        let rules = match &self.rules {
            Some(overrides) => base.merged(overrides),
            None => base,
        };
        rules.validate()?;
        Ok(rules)
    }

    /// Number of assertion steps
    #[must_use]
    pub fn expectation_count(&self) -> usize {
        self.steps.iter().filter(|s| s.is_expectation()).count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    const PARTIAL_PREFILL: &str = r#"
version: "1.0"
name: partial prefill
prefill:
  street: Test street 98
  city: Vienna
  state: ""
  country: Austria
rules:
  postal_code: 8
steps:
  - type: expect
    state: disabled
  - { type: expect_field, field: state, verdict: missing }
  - { type: fill, field: state, value: Burgenland }
  - { type: fill, field: postal_code, value: "7461" }
  - { type: clear, field: city }
  - type: prefill
    profile:
      city: Graz
  - { type: expect, state: enabled }
"#;

    #[test]
    fn test_parse_all_step_kinds() {
        let scenario = Scenario::from_yaml(PARTIAL_PREFILL).unwrap();
        assert_eq!(scenario.name, "partial prefill");
        assert_eq!(scenario.steps.len(), 7);
        assert_eq!(scenario.steps[0], Step::expect(SubmitState::Disabled));
        assert_eq!(
            scenario.steps[1],
            Step::expect_field(AddressField::State, VerdictKind::Missing)
        );
        assert_eq!(
            scenario.steps[3],
            Step::fill(AddressField::PostalCode, "7461")
        );
        assert_eq!(scenario.steps[4], Step::clear(AddressField::City));
        assert_eq!(
            scenario.steps[5],
            Step::prefill(AccountProfile::new().with(AddressField::City, "Graz"))
        );
        assert_eq!(scenario.expectation_count(), 3);

        let prefill = scenario.prefill.as_ref().unwrap();
        assert_eq!(prefill.get(AddressField::State), Some(""));
        assert_eq!(prefill.get(AddressField::PostalCode), None);
    }

    #[test]
    fn test_rules_over_base() {
        let scenario = Scenario::from_yaml(PARTIAL_PREFILL).unwrap();
        let rules = scenario.rules_over(FieldRules::default()).unwrap();
        assert_eq!(rules.max(AddressField::PostalCode), 8);
        assert_eq!(rules.max(AddressField::Street), 70);
    }

    #[test]
    fn test_bad_version_rejected() {
        let yaml = "version: \"2.0\"\nsteps:\n  - { type: expect, state: enabled }\n";
        let err = Scenario::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, BillformError::InvalidScenario { .. }));
        assert!(err.to_string().contains("2.0"));
    }

    #[test]
    fn test_empty_steps_rejected() {
        let yaml = "version: \"1.0\"\nsteps: []\n";
        let err = Scenario::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("steps cannot be empty"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = "version: \"1.0\"\nsteps:\n  - { type: clear, field: province }\n";
        let err = Scenario::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, BillformError::Parse { .. }));
    }

    #[test]
    fn test_load_names_from_file_stem() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("guest_checkout.yaml");
        std::fs::write(&path, "version: \"1.0\"\nsteps:\n  - { type: expect, state: disabled }\n").unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.name, "guest_checkout");
    }

    #[test]
    fn test_steps_tagged_by_type() {
        let json = serde_json::to_value(Step::expect(SubmitState::Enabled)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "expect", "state": "enabled" }));

        let json = serde_json::to_value(Step::clear(AddressField::PostalCode)).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "clear", "field": "postal_code" }));
    }

    #[test]
    fn test_block_style_steps_parse() {
        let yaml = "version: \"1.0\"\nsteps:\n  - type: fill\n    field: city\n    value: Vienna\n  - type: expect_field\n    field: city\n    verdict: valid\n";
        let scenario = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(scenario.steps[0], Step::fill(AddressField::City, "Vienna"));
        assert_eq!(
            scenario.steps[1],
            Step::expect_field(AddressField::City, VerdictKind::Valid)
        );
    }

    #[test]
    fn test_load_json_scenario() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("guest.json");
        std::fs::write(
            &path,
            r#"{"version": "1.0", "steps": [{"type": "expect", "state": "disabled"}]}"#,
        )
        .unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.name, "guest");
        assert_eq!(scenario.steps, vec![Step::expect(SubmitState::Disabled)]);
    }

    #[test]
    fn test_step_display() {
        assert_eq!(
            Step::fill(AddressField::Street, "ab").to_string(),
            "fill street (2 chars)"
        );
        assert_eq!(
            Step::expect(SubmitState::Enabled).to_string(),
            "expect submit enabled"
        );
        assert_eq!(
            Step::expect_field(AddressField::PostalCode, VerdictKind::TooLong).to_string(),
            "expect postal_code too_long"
        );
    }
}
