// pinguard/src/commands/check.rs
//! `pinguard check`: classify one PIN and report.

use anyhow::Result;
use log::{debug, info};
use pinguard_core::{headless_evaluate, DemographicSource, EvaluatorConfig, PinLength, RawDemographics, WeaknessReport};
use std::io::Write;

use super::CommandError;
use crate::cli::CheckCommand;
use crate::ui::report::{print_report, report_json};
use crate::ui::theme::ThemeMap;

/// Picks the explicit `--length`, else the PIN's own length when supported.
pub fn resolve_length(cmd: &CheckCommand) -> Result<PinLength, CommandError> {
    if let Some(length) = cmd.length {
        return Ok(length);
    }
    let actual = cmd.pin.chars().count();
    PinLength::from_digits(actual).map_err(|_| CommandError::CannotInferLength(actual))
}

/// Collects the date flags that were given, keyed by source.
pub fn demographics_from_args(cmd: &CheckCommand) -> RawDemographics {
    [
        (DemographicSource::SelfDob, &cmd.dob),
        (DemographicSource::PartnerDob, &cmd.partner_dob),
        (DemographicSource::Anniversary, &cmd.anniversary),
    ]
    .into_iter()
    .filter_map(|(source, value)| value.as_ref().map(|v| (source, v.trim().to_string())))
    .filter(|(_, v)| !v.is_empty())
    .collect()
}

/// Evaluates the PIN named on the command line and writes the report.
pub fn run_check<W: Write>(
    cmd: &CheckCommand,
    config: &EvaluatorConfig,
    out: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<WeaknessReport> {
    let length = resolve_length(cmd)?;
    let demographics = demographics_from_args(cmd);
    info!("Checking a {}-digit PIN with {} date(s).", length, demographics.len());

    let dates = (!demographics.is_empty()).then_some(&demographics);
    let report = headless_evaluate(config, length, &cmd.pin, dates)?;
    debug!("Verdict {} with reasons {:?}.", report.strength, report.reasons);

    if cmd.json {
        writeln!(out, "{}", report_json(&report)?)?;
    } else {
        print_report(out, &report, theme, enable_colors)?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use pinguard_core::{Reason, Strength};
    use test_log::test;

    fn command(pin: &str) -> CheckCommand {
        CheckCommand {
            pin: pin.to_string(),
            length: None,
            dob: None,
            partner_dob: None,
            anniversary: None,
            json: false,
        }
    }

    #[test]
    fn length_is_inferred_from_pin() {
        assert_eq!(resolve_length(&command("123456")).unwrap(), PinLength::Six);
        assert!(matches!(resolve_length(&command("12345")), Err(CommandError::CannotInferLength(5))));
        let mut explicit = command("12345");
        explicit.length = Some(PinLength::Four);
        assert_eq!(resolve_length(&explicit).unwrap(), PinLength::Four);
    }

    #[test]
    fn blank_dates_are_not_forwarded() {
        let mut cmd = command("1234");
        cmd.dob = Some(" 1998-02-01 ".into());
        cmd.anniversary = Some("  ".into());
        let raw = demographics_from_args(&cmd);
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[&DemographicSource::SelfDob], "1998-02-01");
    }

    #[test]
    fn partner_date_is_reported_as_spouse() {
        let mut cmd = command("0201");
        cmd.partner_dob = Some("1998-02-01".into());
        let mut out = Vec::new();
        let theme = ThemeStyle::default_theme_map();
        let report = run_check(&cmd, &EvaluatorConfig::default(), &mut out, &theme, false).unwrap();
        assert_eq!(report.strength, Strength::Weak);
        assert!(report.has_reason(Reason::DemographicDobSpouse));
        assert!(String::from_utf8(out).unwrap().contains("DEMOGRAPHIC_DOB_SPOUSE"));
    }

    #[test]
    fn mismatched_length_is_an_error() {
        let mut cmd = command("1234");
        cmd.length = Some(PinLength::Six);
        let mut out = Vec::new();
        let theme = ThemeStyle::default_theme_map();
        assert!(run_check(&cmd, &EvaluatorConfig::default(), &mut out, &theme, false).is_err());
        assert!(out.is_empty());
    }
}
