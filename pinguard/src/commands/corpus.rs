// pinguard/src/commands/corpus.rs
//! `pinguard corpus`: per-category counts, or why one PIN is in the corpus.

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use pinguard_core::{validate_pin_format, CommonPinCorpus, EvaluatorConfig};
use std::io::Write;

use crate::cli::CorpusCommand;
use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

/// Builds the category table for a corpus.
pub fn stats_table(corpus: &CommonPinCorpus) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Category", "PINs"]);
    for (category, count) in corpus.stats() {
        table.add_row(vec![category.label().to_string(), count.to_string()]);
    }
    table.add_row(vec!["Total (distinct)".to_string(), corpus.len().to_string()]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

pub fn run_corpus<W: Write>(
    cmd: &CorpusCommand,
    config: &EvaluatorConfig,
    out: &mut W,
    theme: &ThemeMap,
    enable_colors: bool,
) -> Result<()> {
    config.validate()?;
    let corpus = CommonPinCorpus::shared(cmd.length, &config.corpus_settings());

    let Some(pin) = cmd.explain.as_deref() else {
        writeln!(
            out,
            "{}",
            paint(&format!("{}-digit common-PIN corpus", cmd.length), ThemeEntry::Header, theme, enable_colors)
        )?;
        writeln!(out, "{}", stats_table(&corpus))?;
        return Ok(());
    };

    validate_pin_format(pin, cmd.length)?;
    let categories = corpus.categories(pin);
    if categories.is_empty() {
        writeln!(out, "{} is not in the {}-digit corpus.", pin, cmd.length)?;
    } else {
        writeln!(
            out,
            "{} is {} in the {}-digit corpus:",
            pin,
            paint("common", ThemeEntry::Weak, theme, enable_colors),
            cmd.length
        )?;
        for category in categories {
            writeln!(out, "• {}", category.label())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;
    use pinguard_core::PinLength;

    fn run(length: PinLength, explain: Option<&str>) -> Result<String> {
        let cmd = CorpusCommand { length, explain: explain.map(str::to_string) };
        let mut out = Vec::new();
        run_corpus(&cmd, &EvaluatorConfig::default(), &mut out, &ThemeStyle::default_theme_map(), false)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn stats_table_has_a_row_per_category_plus_total() {
        let corpus = CommonPinCorpus::build(PinLength::Four, &Default::default());
        let table = stats_table(&corpus);
        assert_eq!(table.row_iter().count(), corpus.stats().len() + 1);
        assert!(table.to_string().contains("Total (distinct)"));
    }

    #[test]
    fn explain_lists_categories() {
        let text = run(PinLength::Four, Some("1234")).unwrap();
        assert!(text.contains("1234 is common in the 4-digit corpus:"));
        assert!(text.lines().filter(|l| l.starts_with("• ")).count() >= 1);
    }

    #[test]
    fn explain_unknown_pin() {
        let text = run(PinLength::Six, Some("729438")).unwrap();
        assert_eq!(text.trim(), "729438 is not in the 6-digit corpus.");
    }

    #[test]
    fn explain_rejects_malformed_pin() {
        assert!(run(PinLength::Four, Some("12a4")).is_err());
    }
}
