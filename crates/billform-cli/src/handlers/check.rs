//! `billform check`: evaluate one address file

use crate::commands::CheckArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::{render_evaluation, EvaluationReport, OutputFormat, Reporter};
use billform::{
    load_document, AccountProfile, AddressValidator, BillingAddress, CheckoutForm, DocumentFormat,
};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

/// Read a document from a file, or from stdin when the path is `-`
///
/// Stdin is parsed as YAML, which also accepts JSON input.
fn read_document<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(DocumentFormat::Yaml.parse(&text)?);
    }
    Ok(load_document(path)?)
}

/// Read a complete address; absent keys are empty fields
pub fn read_address(path: &Path) -> CliResult<BillingAddress> {
    read_document(path)
}

/// Open a form prefilled from `stored`, then type in every field `typed` names
#[must_use]
pub fn prefilled_address(
    validator: AddressValidator,
    stored: &AccountProfile,
    typed: &AccountProfile,
) -> BillingAddress {
    let mut form = CheckoutForm::prefilled(validator, stored);
    form.apply_profile(typed);
    let address = form.address().clone();
    form.abandon();
    address
}

/// Evaluate an address with `validator`
#[must_use]
pub fn evaluate_input(
    validator: &AddressValidator,
    input: &str,
    address: &BillingAddress,
) -> EvaluationReport {
    let evaluation = validator.report(address);
    EvaluationReport::new(input, address, validator.rules(), &evaluation)
}

/// Execute the check command
pub fn execute_check(config: &CliConfig, args: &CheckArgs) -> CliResult<()> {
    let input = args.input.display().to_string();
    let validator = AddressValidator::new(config.load_rules()?);
    let address = match &args.prefill {
        None => read_address(&args.input)?,
        Some(profile) => {
            let stored = AccountProfile::load(profile)?;
            let typed: AccountProfile = read_document(&args.input)?;
            prefilled_address(validator, &stored, &typed)
        }
    };
    let report = evaluate_input(&validator, &input, &address);
    tracing::info!(input = %input, state = %report.state, "address checked");

    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    match args.format {
        OutputFormat::Text => reporter.print(&render_evaluation(&report, reporter.use_color))?,
        OutputFormat::Json => reporter.print_json(&report)?,
    }

    if args.require_enabled && !report.state.is_enabled() {
        return Err(CliError::SubmitDisabled { input });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use billform::{AddressField, FieldRules, SubmitState, VerdictKind};
    use std::path::PathBuf;
    use tempfile::TempDir;

    const FULL: &str = "street: Test street 98\ncity: Vienna\nstate: Burgenland\ncountry: Austria\npostal_code: \"7461\"\n";

    fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    fn quiet() -> CliConfig {
        CliConfig::new().with_verbosity(crate::Verbosity::Quiet)
    }

    mod read_tests {
        use super::*;

        #[test]
        fn test_read_yaml_address() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "addr.yaml", FULL);
            let address = read_address(&path).unwrap();
            assert_eq!(address.get(AddressField::City), "Vienna");
            assert_eq!(address.get(AddressField::PostalCode), "7461");
        }

        #[test]
        fn test_read_missing_file_fails() {
            let err = read_address(Path::new("/nonexistent/addr.yaml")).unwrap_err();
            assert!(matches!(err, CliError::Billform(_)));
        }
    }

    mod evaluate_tests {
        use super::*;

        #[test]
        fn test_evaluate_full_address() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "addr.yaml", FULL);
            let address = read_address(&path).unwrap();
            let report = evaluate_input(&AddressValidator::default(), "addr.yaml", &address);
            assert_eq!(report.state, SubmitState::Enabled);
        }

        #[test]
        fn test_evaluate_under_override_rules() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "addr.yaml", FULL);
            let validator =
                AddressValidator::new(FieldRules::new().with_max(AddressField::PostalCode, 3));

            let address = read_address(&path).unwrap();
            let report = evaluate_input(&validator, "addr.yaml", &address);
            assert_eq!(report.state, SubmitState::Disabled);
            assert_eq!(report.fields[4].verdict, VerdictKind::TooLong);
            assert_eq!(report.fields[4].max, 3);
        }

        #[test]
        fn test_require_enabled_rejects_disabled_address() {
            let dir = TempDir::new().unwrap();
            let path = write(&dir, "addr.yaml", "street: Test street 98\n");
            let args = CheckArgs {
                input: path,
                format: OutputFormat::Text,
                require_enabled: true,
                prefill: None,
            };
            let err = execute_check(&quiet(), &args).unwrap_err();
            assert!(matches!(err, CliError::SubmitDisabled { .. }));
        }
    }

    mod prefill_tests {
        use super::*;

        fn partial_account() -> AccountProfile {
            AccountProfile::new()
                .with(AddressField::Street, "Test street 98")
                .with(AddressField::City, "Vienna")
                .with(AddressField::State, "")
                .with(AddressField::Country, "Austria")
        }

        #[test]
        fn test_typed_fields_complete_the_prefill() {
            let typed = AccountProfile::new()
                .with(AddressField::State, "Burgenland")
                .with(AddressField::PostalCode, "7461");
            let address =
                prefilled_address(AddressValidator::default(), &partial_account(), &typed);

            assert_eq!(address.get(AddressField::Street), "Test street 98");
            assert_eq!(address.get(AddressField::State), "Burgenland");
            assert_eq!(
                AddressValidator::default().evaluate(&address),
                SubmitState::Enabled
            );
        }

        #[test]
        fn test_typed_empty_value_clears_prefill() {
            let typed = AccountProfile::new().with(AddressField::City, "");
            let address =
                prefilled_address(AddressValidator::default(), &partial_account(), &typed);
            assert_eq!(address.get(AddressField::City), "");
            assert_eq!(address.get(AddressField::Country), "Austria");
        }

        #[test]
        fn test_execute_with_prefill_file() {
            let dir = TempDir::new().unwrap();
            let profile = write(
                &dir,
                "account.yaml",
                "street: Test street 98\ncity: Vienna\ncountry: Austria\n",
            );
            let input = write(&dir, "typed.yaml", "state: Burgenland\npostal_code: \"7461\"\n");
            let args = CheckArgs {
                input,
                format: OutputFormat::Json,
                require_enabled: true,
                prefill: Some(profile),
            };
            execute_check(&quiet(), &args).unwrap();
        }

        #[test]
        fn test_missing_profile_file_fails() {
            let dir = TempDir::new().unwrap();
            let input = write(&dir, "typed.yaml", FULL);
            let args = CheckArgs {
                input,
                format: OutputFormat::Text,
                require_enabled: false,
                prefill: Some(dir.path().join("absent.yaml")),
            };
            let err = execute_check(&quiet(), &args).unwrap_err();
            assert!(matches!(err, CliError::Billform(_)));
        }
    }
}
