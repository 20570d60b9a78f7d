// pinguard/src/main.rs
//! PinGuard entry point.
//!
//! Parses arguments, sets up logging, theme and evaluator configuration, then
//! dispatches. Exit codes: 0 STRONG (or success), 2 WEAK, 1 any error.

use anyhow::{Context, Result};
use clap::Parser;
use is_terminal::IsTerminal;
use log::debug;
use std::io::{self, Write};

use pinguard::cli::{Cli, Commands};
use pinguard::commands::{check, corpus, exit_code_for, interactive, EXIT_ERROR};
use pinguard::logger;
use pinguard::ui::output_format::print_error_message;
use pinguard::ui::theme::{build_theme_map, ThemeStyle};
use pinguard_core::EvaluatorConfig;

fn main() {
    // A missing .env is the normal case.
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap would exit with 2 on usage errors, which means WEAK here.
            let code = if e.use_stderr() { EXIT_ERROR } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    logger::init_logger(logger::level_from_flags(cli.quiet, cli.debug));

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            let theme = ThemeStyle::default_theme_map();
            let enable_colors = io::stderr().is_terminal();
            let _ = print_error_message(&mut io::stderr(), &format!("{:#}", e), &theme, enable_colors);
            EXIT_ERROR
        }
    };
    let _ = io::stdout().flush();
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let theme = build_theme_map(cli.theme.as_ref()).context("Theme error")?;
    let config = EvaluatorConfig::resolve(cli.config.as_deref()).context("Configuration error")?;
    debug!("Resolved configuration: {:?}", config);

    let stdout = io::stdout();
    let enable_colors = stdout.is_terminal();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Check(cmd) => {
            let report = check::run_check(cmd, &config, &mut out, &theme, enable_colors)?;
            Ok(exit_code_for(report.strength))
        }
        Commands::Interactive { show_pin } => {
            drop(out);
            let evaluated = interactive::run_interactive(&config, &theme, *show_pin)?;
            debug!("Interactive session evaluated {} PIN(s).", evaluated);
            Ok(0)
        }
        Commands::Corpus(cmd) => {
            corpus::run_corpus(cmd, &config, &mut out, &theme, enable_colors)?;
            Ok(0)
        }
    }
}
