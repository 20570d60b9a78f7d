// pinguard-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;
use test_log::test; // captured `log` output per test

use pinguard_core::config::{self, EvaluatorConfig};
use pinguard_core::{headless_evaluate, PinLength, Reason, Strength};

fn write_config(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_default_config() {
    let config = EvaluatorConfig::load_default().unwrap();
    assert_eq!(config.budget.max_combinations, Some(500_000));
    assert_eq!(config.budget.max_execution_time_ms, Some(3_000));
    assert_eq!(config.corpus.reference_year, Some(2025));
    assert!(config.corpus.operator_identifier.is_none());
}

#[test]
fn test_load_from_file_and_merge() -> Result<()> {
    let file = write_config(
        r#"
budget:
  max_execution_time_ms: 1500
corpus:
  operator_identifier: "desk-8193"
  exclude:
    - "1234"
"#,
    )?;

    let user = EvaluatorConfig::load_from_file(file.path())?;
    assert_eq!(user.budget.max_combinations, None);

    let merged = config::merge_config(EvaluatorConfig::load_default()?, Some(user));
    assert_eq!(merged.budget.max_combinations, Some(500_000));
    assert_eq!(merged.generation_budget().max_execution_time.as_millis(), 1500);

    // The operator identifier makes 8193 common; the exclusion removes 1234.
    let report = headless_evaluate(&merged, PinLength::Four, "8193", None)?;
    assert_eq!(report.strength, Strength::Weak);
    assert!(report.has_reason(Reason::CommonlyUsed));
    let report = headless_evaluate(&merged, PinLength::Four, "1234", None)?;
    assert_eq!(report.strength, Strength::Strong);
    Ok(())
}

#[test]
fn test_resolve_with_explicit_path() -> Result<()> {
    let file = write_config("corpus:\n  reference_year: 2030\n")?;
    let resolved = EvaluatorConfig::resolve(Some(file.path()))?;
    assert_eq!(resolved.corpus_settings().reference_year, 2030);
    assert_eq!(resolved.corpus_settings().year_window, 100);

    let report = headless_evaluate(&resolved, PinLength::Four, "2030", None)?;
    assert_eq!(report.strength, Strength::Weak);
    Ok(())
}

#[test]
fn test_invalid_config_file_is_rejected() -> Result<()> {
    let file = write_config("budget:\n  fragment_prefix: 0\ncorpus:\n  exclude: ['12']\n")?;
    let err = EvaluatorConfig::load_from_file(file.path()).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("fragment_prefix"), "{message}");
    assert!(message.contains("'12'"), "{message}");
    Ok(())
}

#[test]
fn test_unparseable_config_file_reports_path() -> Result<()> {
    let file = write_config("budget: [not, a, map]\n")?;
    let err = EvaluatorConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_missing_config_file_reports_path() {
    let err = EvaluatorConfig::load_from_file("/nonexistent/pinguard/config.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}
