// pinguard/src/cli.rs
//! This file defines the command-line interface (CLI) for the pinguard application,
//! including all available commands and their arguments.
//! License: MIT OR APACHE 2.0

use clap::{Parser, Subcommand};
use pinguard_core::PinLength;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "pinguard",
    author = "PinGuard Team",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check whether a 4- or 6-digit PIN is weak",
    long_about = "PinGuard classifies a numeric PIN as WEAK or STRONG. A PIN is weak when it is one people commonly choose, or when it can be built from your own birth date, your partner's birth date or your anniversary.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// Path to an evaluator configuration file (YAML).
    #[arg(
        long = "config",
        value_name = "FILE",
        env = "PINGUARD_CONFIG",
        global = true,
        help = "Path to an evaluator configuration file (YAML)."
    )]
    pub config: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `pinguard` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classifies a single PIN and exits (0 = STRONG, 2 = WEAK, 1 = error).
    #[command(about = "Classify a single PIN and exit with 0 (STRONG), 2 (WEAK) or 1 (error).")]
    Check(CheckCommand),

    /// Prompts for demographics once, then for as many PINs as you like.
    #[command(about = "Prompt for dates once, then check PINs one after another.")]
    Interactive {
        /// Echo the PIN while typing.
        #[arg(long = "show-pin", help = "Echo the PIN while typing instead of hiding it.")]
        show_pin: bool,
    },

    /// Inspects the common-PIN corpus.
    #[command(about = "Show what the common-PIN corpus contains.")]
    Corpus(CorpusCommand),
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// The PIN to classify.
    #[arg(long, short = 'p', value_name = "PIN", help = "The PIN to classify.")]
    pub pin: String,

    /// PIN length; defaults to the PIN's own length when that is 4 or 6.
    #[arg(long, short = 'l', value_name = "4|6", value_parser = parse_pin_length, help = "PIN length (4 or 6). Defaults to the length of --pin.")]
    pub length: Option<PinLength>,

    /// Your date of birth.
    #[arg(long, value_name = "YYYY-MM-DD", help = "Your date of birth.")]
    pub dob: Option<String>,

    /// Your partner's date of birth.
    #[arg(long = "partner-dob", visible_alias = "spouse-dob", value_name = "YYYY-MM-DD", help = "Your partner's date of birth.")]
    pub partner_dob: Option<String>,

    /// Your wedding anniversary.
    #[arg(long, value_name = "YYYY-MM-DD", help = "Your wedding anniversary.")]
    pub anniversary: Option<String>,

    /// Print the report as JSON on stdout.
    #[arg(long, help = "Print the report as JSON instead of text.")]
    pub json: bool,
}

/// Arguments for the `corpus` command.
#[derive(Parser, Debug)]
pub struct CorpusCommand {
    /// Which corpus to inspect.
    #[arg(long, short = 'l', value_name = "4|6", value_parser = parse_pin_length, help = "PIN length of the corpus to inspect (4 or 6).")]
    pub length: PinLength,

    /// Show which categories a specific PIN belongs to.
    #[arg(long, value_name = "PIN", help = "Show which corpus categories contain this PIN.")]
    pub explain: Option<String>,
}

/// clap value parser for `4` / `6`.
pub fn parse_pin_length(raw: &str) -> Result<PinLength, String> {
    let digits: usize = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    PinLength::from_digits(digits).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_with_dates() {
        let cli = Cli::try_parse_from([
            "pinguard", "check", "--pin", "0201", "--dob", "1998-02-01", "--spouse-dob", "1990-01-01", "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Check(cmd) => {
                assert_eq!(cmd.pin, "0201");
                assert_eq!(cmd.length, None);
                assert_eq!(cmd.dob.as_deref(), Some("1998-02-01"));
                assert_eq!(cmd.partner_dob.as_deref(), Some("1990-01-01"));
                assert!(cmd.json);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn pin_length_parser_rejects_five() {
        assert_eq!(parse_pin_length("6"), Ok(PinLength::Six));
        assert!(parse_pin_length("5").is_err());
        assert!(parse_pin_length("four").is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pinguard", "corpus", "--length", "4", "-q"]).unwrap();
        assert!(cli.quiet);
    }
}
