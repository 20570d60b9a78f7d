// pinguard/src/ui/report.rs
//! Rendering of a `WeaknessReport` as themed text or JSON.

use anyhow::{Context, Result};
use pinguard_core::{Strength, WeaknessReport};
use std::io::{self, Write};

use super::output_format::{print_banner, print_rule, print_warn_message};
use super::theme::{paint, ThemeEntry, ThemeMap};

const WEAK_RECOMMENDATIONS: [&str; 3] = [
    "Choose a PIN that is not based on personal dates",
    "Avoid sequential or repetitive patterns",
    "Consider using a randomized PIN",
];

const STRONG_RECOMMENDATIONS: [&str; 3] = [
    "Continue using strong PINs",
    "Change your PIN periodically",
    "Never share your PIN with others",
];

pub fn recommendations(strength: Strength) -> &'static [&'static str] {
    match strength {
        Strength::Weak => &WEAK_RECOMMENDATIONS,
        Strength::Strong => &STRONG_RECOMMENDATIONS,
    }
}

/// Writes the human-readable assessment.
pub fn print_report<W: Write>(
    writer: &mut W,
    report: &WeaknessReport,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer)?;
    print_banner(writer, "PIN Security Assessment", theme, enable_colors)?;

    let strength_entry = match report.strength {
        Strength::Weak => ThemeEntry::Weak,
        Strength::Strong => ThemeEntry::Strong,
    };
    writeln!(
        writer,
        "\nPIN Strength: {}",
        paint(&report.strength.to_string(), strength_entry, theme, enable_colors)
    )?;

    let codes: Vec<&str> = report.reasons.iter().map(|r| r.code()).collect();
    if report.reasons.is_empty() {
        writeln!(writer, "\nNo weaknesses detected. Your PIN appears to be secure.")?;
    } else {
        writeln!(writer, "\nWeakness Reasons:")?;
        for reason in &report.reasons {
            let line = format!("• {}", reason.description());
            writeln!(writer, "{}", paint(&line, ThemeEntry::Reason, theme, enable_colors))?;
        }
    }
    writeln!(writer, "\nWeakness Codes:")?;
    writeln!(
        writer,
        "{}",
        paint(&format!("[{}]", codes.join(", ")), ThemeEntry::ReasonCode, theme, enable_colors)
    )?;

    if report.search_truncated {
        writeln!(writer)?;
        print_warn_message(
            writer,
            "the date search hit its time or size limit; some combinations were not tried.",
            theme,
            enable_colors,
        )?;
    }

    writeln!(writer, "\nRecommendations:")?;
    for tip in recommendations(report.strength) {
        let line = format!("• {}", tip);
        writeln!(writer, "{}", paint(&line, ThemeEntry::Recommendation, theme, enable_colors))?;
    }
    writeln!(writer)?;
    print_rule(writer, theme, enable_colors)
}

/// Pretty JSON form of the report.
pub fn report_json(report: &WeaknessReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize the report as JSON")
}
