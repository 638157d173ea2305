//! Output formatting for evaluations, rule tables and scenario runs

use billform::scenario::ScenarioRunResult;
use billform::{
    char_len, AddressField, BillingAddress, Evaluation, FieldRules, SubmitState, VerdictKind,
};
use clap::ValueEnum;
use console::{style, Term};
use serde::{Deserialize, Serialize};

/// Output format for results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// One row of an evaluation report
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    /// Field key
    pub field: AddressField,
    /// Content length in characters
    pub length: usize,
    /// Field maximum
    pub max: usize,
    /// Verdict
    pub verdict: VerdictKind,
    /// Message for invalid fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Serializable evaluation report
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    /// Input the address came from
    pub input: String,
    /// Submit decision
    pub state: SubmitState,
    /// Per-field rows in canonical order
    pub fields: Vec<FieldReport>,
}

impl EvaluationReport {
    /// Build a report from an evaluation
    #[must_use]
    pub fn new(
        input: impl Into<String>,
        address: &BillingAddress,
        rules: &FieldRules,
        evaluation: &Evaluation,
    ) -> Self {
        let fields = evaluation
            .verdicts()
            .map(|(field, verdict)| FieldReport {
                field,
                length: char_len(address.get(field)),
                max: rules.max(field),
                verdict: verdict.kind(),
                message: verdict.message(field),
            })
            .collect();
        Self {
            input: input.into(),
            state: evaluation.submit_state(),
            fields,
        }
    }
}

/// Serializable rule row
#[derive(Debug, Clone, Serialize)]
pub struct LimitRow {
    /// Field key
    pub field: AddressField,
    /// Minimum length
    pub min: usize,
    /// Maximum length
    pub max: usize,
}

/// Rule table as rows in canonical order
#[must_use]
pub fn limit_rows(rules: &FieldRules) -> Vec<LimitRow> {
    AddressField::ALL
        .into_iter()
        .map(|field| LimitRow {
            field,
            min: billform::MIN_LENGTH,
            max: rules.max(field),
        })
        .collect()
}

fn state_badge(state: SubmitState, color: bool) -> String {
    let text = style(state.to_string().to_uppercase())
        .bold()
        .force_styling(color);
    match state {
        SubmitState::Enabled => text.green().to_string(),
        SubmitState::Disabled => text.red().to_string(),
    }
}

fn mark(passed: bool, color: bool) -> String {
    if !color {
        return if passed { "PASS" } else { "FAIL" }.to_string();
    }
    if passed {
        style("✓").green().bold().force_styling(true).to_string()
    } else {
        style("✗").red().bold().force_styling(true).to_string()
    }
}

/// Render an evaluation report as text
#[must_use]
pub fn render_evaluation(report: &EvaluationReport, color: bool) -> String {
    let mut out = format!(
        "{}: submit {}\n",
        report.input,
        state_badge(report.state, color)
    );
    for row in &report.fields {
        out.push_str(&format!(
            "  {} {:<12} {:>3}/{:<3} {}\n",
            mark(row.verdict == VerdictKind::Valid, color),
            row.field.key(),
            row.length,
            row.max,
            row.verdict
        ));
        if let Some(message) = &row.message {
            out.push_str(&format!("      {message}\n"));
        }
    }
    out
}

/// Render the rule table as text
#[must_use]
pub fn render_limits(rules: &FieldRules) -> String {
    let mut out = format!("{:<12} {:>3} {:>3}\n", "field", "min", "max");
    for row in limit_rows(rules) {
        out.push_str(&format!(
            "{:<12} {:>3} {:>3}\n",
            row.field.key(),
            row.min,
            row.max
        ));
    }
    out
}

/// Render scenario results as text; `verbose` lists every step
#[must_use]
pub fn render_scenarios(results: &[ScenarioRunResult], color: bool, verbose: bool) -> String {
    let mut out = String::new();
    for result in results {
        out.push_str(&format!(
            "{} {} ({} checks, {} steps, final state {})\n",
            mark(result.passed(), color),
            result.name,
            result.checked(),
            result.steps.len(),
            result.final_state
        ));
        if verbose {
            for step in &result.steps {
                out.push_str(&format!(
                    "    {} {:>3} {}\n",
                    mark(step.passed, color),
                    step.index + 1,
                    step.description
                ));
            }
        }
        for failure in result.failures() {
            out.push_str(&format!(
                "    step {}: {}: {}\n",
                failure.index + 1,
                failure.description,
                failure.message.as_deref().unwrap_or("failed")
            ));
        }
        if result.skipped > 0 {
            out.push_str(&format!("    {} step(s) skipped\n", result.skipped));
        }
    }
    let passed = results.iter().filter(|r| r.passed()).count();
    out.push_str(&format!(
        "\n{passed} passed, {} failed\n",
        results.len() - passed
    ));
    out
}

/// Writes rendered output to the terminal
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Reporter {
    /// Create a new reporter on stdout
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Print a block of text unless quiet
    pub fn print(&self, text: &str) -> std::io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_str(text)
    }

    /// Print a value as pretty JSON; JSON is printed even in quiet mode
    pub fn print_json<T: Serialize>(&self, value: &T) -> crate::CliResult<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.term.write_line(&json)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use billform::scenario::{builtin, ScenarioRunner};
    use billform::AddressValidator;

    fn partial() -> BillingAddress {
        BillingAddress::new()
            .with(AddressField::Street, "Test street 98")
            .with(AddressField::City, "Vienna")
            .with(AddressField::Country, "Austria")
            .with(AddressField::PostalCode, "012345 AB-C")
    }

    fn report_for(address: &BillingAddress) -> EvaluationReport {
        let validator = AddressValidator::default();
        EvaluationReport::new(
            "addr.json",
            address,
            validator.rules(),
            &validator.report(address),
        )
    }

    mod evaluation_tests {
        use super::*;

        #[test]
        fn test_report_rows() {
            let report = report_for(&partial());
            assert_eq!(report.state, SubmitState::Disabled);
            assert_eq!(report.fields.len(), 5);
            assert_eq!(report.fields[4].length, 11);
            assert_eq!(report.fields[4].max, 10);
            assert!(report.fields[0].message.is_none());
        }

        #[test]
        fn test_render_text_without_color() {
            let text = render_evaluation(&report_for(&partial()), false);
            assert!(text.starts_with("addr.json: submit DISABLED"));
            assert!(text.contains("FAIL state"));
            assert!(text.contains("State is required"));
            assert!(text.contains("Postal code must be at most 10 characters (got 11)"));
            assert!(text.contains("PASS street"));
        }

        #[test]
        fn test_report_json_shape() {
            let json = serde_json::to_value(report_for(&partial())).unwrap();
            assert_eq!(json["state"], "disabled");
            assert_eq!(json["fields"][3]["field"], "country");
            assert_eq!(json["fields"][3]["verdict"], "valid");
            assert_eq!(json["fields"][4]["verdict"], "too_long");
            assert_eq!(json["fields"][4]["length"], 11);
        }
    }

    mod limits_tests {
        use super::*;

        #[test]
        fn test_render_limits() {
            let text = render_limits(&FieldRules::default());
            assert!(text.contains("street"));
            assert!(text.contains(" 70"));
            assert!(text.contains("postal_code"));
            assert_eq!(text.lines().count(), 6);
        }

        #[test]
        fn test_limit_rows() {
            let rows = limit_rows(&FieldRules::default());
            assert_eq!(rows.len(), 5);
            assert!(rows.iter().all(|r| r.min == 1));
            assert_eq!(rows[4].max, 10);
        }
    }

    mod scenario_tests {
        use super::*;

        #[test]
        fn test_render_builtin_results() {
            let scenarios = builtin();
            let results = ScenarioRunner::new().run_all(&scenarios).unwrap();
            let text = render_scenarios(&results, false, false);
            assert!(text.contains("PASS partial prefill"));
            assert!(!text.contains("expect submit"));
            assert!(text.ends_with("5 passed, 0 failed\n"));
        }

        #[test]
        fn test_verbose_lists_every_step() {
            let scenarios = builtin();
            let results = ScenarioRunner::new().run_all(&scenarios[3..4]).unwrap();
            let text = render_scenarios(&results, false, true);
            assert!(text.contains("PASS   1 expect state missing"));
            assert!(text.contains("expect submit enabled"));
            assert_eq!(
                text.lines().filter(|l| l.starts_with("    PASS")).count(),
                results[0].steps.len()
            );
        }
    }
}
