//! Scenario runner: replays steps against a live [`CheckoutForm`].

use super::schema::{Scenario, Step};
use crate::form::CheckoutForm;
use crate::result::BillformResult;
use crate::rules::FieldRules;
use crate::validator::{AddressValidator, SubmitState};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Outcome of a scenario run
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRunResult {
    /// Scenario name
    pub name: String,
    /// Individual step results, in execution order
    pub steps: Vec<StepResult>,
    /// Steps not executed because of fail-fast
    pub skipped: usize,
    /// Submit state when the run ended
    pub final_state: SubmitState,
    /// Total execution time
    pub total_time: Duration,
}

impl ScenarioRunResult {
    /// Whether every executed step passed and none were skipped
    #[must_use]
    pub fn passed(&self) -> bool {
        self.skipped == 0 && self.steps.iter().all(|s| s.passed)
    }

    /// Failed steps
    pub fn failures(&self) -> impl Iterator<Item = &StepResult> {
        self.steps.iter().filter(|s| !s.passed)
    }

    /// Number of expectation steps checked
    #[must_use]
    pub fn checked(&self) -> usize {
        self.steps.iter().filter(|s| s.expectation).count()
    }
}

/// Result of one step
#[derive(Debug, Clone, Serialize)]
pub struct StepResult {
    /// Zero-based position in the scenario
    pub index: usize,
    /// Human-readable step description
    pub description: String,
    /// Whether the step asserted something
    pub expectation: bool,
    /// Whether the step passed
    pub passed: bool,
    /// Failure detail
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Runs scenarios with a base rule table.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    rules: FieldRules,
    fail_fast: bool,
}

impl ScenarioRunner {
    /// Create a runner over the default rule table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `rules` as the base table; scenario overrides layer on top
    #[must_use]
    pub fn with_rules(mut self, rules: FieldRules) -> Self {
        self.rules = rules;
        self
    }

    /// Stop at the first failed expectation
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Run one scenario. Errors only if its rule overrides are unusable.
    pub fn run(&self, scenario: &Scenario) -> BillformResult<ScenarioRunResult> {
        let start = Instant::now();
        let validator = AddressValidator::new(scenario.rules_over(self.rules)?);
        let mut form = match &scenario.prefill {
            Some(profile) => CheckoutForm::prefilled(validator, profile),
            None => CheckoutForm::new(validator),
        };

        let span = tracing::info_span!("scenario", name = %scenario.name);
        let _enter = span.enter();

        let mut results = Vec::with_capacity(scenario.steps.len());
        for (index, step) in scenario.steps.iter().enumerate() {
            let result = run_step(&mut form, index, step);
            let failed = !result.passed;
            if failed {
                tracing::warn!(
                    step = index,
                    message = result.message.as_deref().unwrap_or_default(),
                    "scenario step failed"
                );
            }
            results.push(result);
            if failed && self.fail_fast {
                break;
            }
        }

        let skipped = scenario.steps.len() - results.len();
        let final_state = form.submit_state();
        form.abandon();

        let result = ScenarioRunResult {
            name: scenario.name.clone(),
            steps: results,
            skipped,
            final_state,
            total_time: start.elapsed(),
        };
        tracing::info!(
            passed = result.passed(),
            checked = result.checked(),
            skipped,
            "scenario finished"
        );
        Ok(result)
    }

    /// Run several scenarios in order
    pub fn run_all<'a>(
        &self,
        scenarios: impl IntoIterator<Item = &'a Scenario>,
    ) -> BillformResult<Vec<ScenarioRunResult>> {
        scenarios.into_iter().map(|s| self.run(s)).collect()
    }
}

fn run_step(form: &mut CheckoutForm, index: usize, step: &Step) -> StepResult {
    let message = match step {
        Step::Fill { field, value } => {
            form.fill(*field, value.as_str());
            None
        }
        Step::Clear { field } => {
            form.clear(*field);
            None
        }
        Step::Prefill { profile } => {
            form.apply_profile(profile);
            None
        }
        Step::Expect { state: expected } => {
            let actual = form.submit_state();
            (actual != *expected).then(|| {
                let reasons = form
                    .evaluation()
                    .messages()
                    .into_iter()
                    .map(|(_, m)| m)
                    .collect::<Vec<_>>();
                if reasons.is_empty() {
                    format!("expected submit {expected}, got {actual}")
                } else {
                    format!(
                        "expected submit {expected}, got {actual} ({})",
                        reasons.join("; ")
                    )
                }
            })
        }
        Step::ExpectField { field, verdict } => {
            let actual = form.evaluation().verdict(*field);
            (actual.kind() != *verdict)
                .then(|| format!("expected {field} {verdict}, got {}", actual.kind()))
        }
    };

    StepResult {
        index,
        description: step.to_string(),
        expectation: step.is_expectation(),
        passed: message.is_none(),
        message,
    }
}
