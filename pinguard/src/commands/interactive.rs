// pinguard/src/commands/interactive.rs
//! `pinguard interactive`: the prompt loop.
//!
//! Dates are asked once per session; then the user picks a length, enters a
//! PIN, reads the report and decides whether to check another. Typing `exit`
//! at any prompt ends the session. Input comes through [`PromptSource`] so the
//! loop can be driven by a script in tests.

use anyhow::Result;
use is_terminal::IsTerminal;
use log::debug;
use pinguard_core::{
    validate_pin_format, CalendarDate, DemographicSource, EvaluatorConfig, PinLength, RawDemographics,
    WeaknessEvaluator,
};
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use thiserror::Error;

use crate::ui::output_format::{print_banner, print_error_message, print_info_message};
use crate::ui::report::print_report;
use crate::ui::theme::{paint, ThemeEntry, ThemeMap};

const EXIT_WORD: &str = "exit";
const FAREWELL: &str = "Exiting application. Thank you for using PinGuard!";

/// Why a prompt produced no answer.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("user asked to exit")]
    Exit,
    #[error("input closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Somewhere answers come from.
pub trait PromptSource {
    /// Reads one visible line, without its trailing newline. `None` on EOF.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Reads one secret line. Defaults to a visible read.
    fn read_secret(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        self.read_line()
    }
}

/// Answers from a buffered reader (stdin, or a byte slice in tests).
pub struct LineSource<R> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        LineSource { reader }
    }
}

impl<R: BufRead> PromptSource for LineSource<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// The real terminal: visible lines from stdin, secrets through `rpassword`.
pub struct TerminalSource {
    stdin: LineSource<io::StdinLock<'static>>,
    hide_secrets: bool,
}

impl TerminalSource {
    /// PIN echo is suppressed only when asked for and stdin is a terminal.
    pub fn new(show_pin: bool) -> Self {
        TerminalSource {
            stdin: LineSource::new(io::stdin().lock()),
            hide_secrets: !show_pin && io::stdin().is_terminal(),
        }
    }
}

impl PromptSource for TerminalSource {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.stdin.read_line()
    }

    fn read_secret(&mut self, _prompt: &str) -> io::Result<Option<String>> {
        if self.hide_secrets {
            // The caller has already written the prompt.
            rpassword::read_password().map(Some)
        } else {
            self.stdin.read_line()
        }
    }
}

/// One interactive session writing to `out`.
pub struct Session<'a, S, W> {
    source: S,
    out: W,
    config: &'a EvaluatorConfig,
    theme: &'a ThemeMap,
    enable_colors: bool,
    evaluators: HashMap<PinLength, WeaknessEvaluator>,
}

impl<'a, S: PromptSource, W: Write> Session<'a, S, W> {
    pub fn new(source: S, out: W, config: &'a EvaluatorConfig, theme: &'a ThemeMap, enable_colors: bool) -> Self {
        Session { source, out, config, theme, enable_colors, evaluators: HashMap::new() }
    }

    /// Runs until the user declines another check, types `exit` or closes input.
    /// Returns how many PINs were evaluated.
    pub fn run(&mut self) -> Result<usize> {
        self.config.validate()?;
        self.welcome()?;
        let mut evaluated = 0;
        match self.run_inner(&mut evaluated) {
            Ok(()) | Err(PromptError::Exit) | Err(PromptError::Closed) => {
                writeln!(self.out, "\n{}", FAREWELL)?;
                Ok(evaluated)
            }
            Err(PromptError::Io(e)) => Err(e.into()),
        }
    }

    fn run_inner(&mut self, evaluated: &mut usize) -> Result<(), PromptError> {
        let demographics = self.collect_demographics()?;
        debug!("Interactive session with {} date(s).", demographics.len());
        let dates = (!demographics.is_empty()).then_some(&demographics);

        loop {
            let length = self.ask_length()?;
            let pin = self.ask_pin(length)?;
            let evaluator = self
                .evaluators
                .entry(length)
                .or_insert_with(|| WeaknessEvaluator::with_config(length, self.config));
            match evaluator.evaluate(&pin, dates) {
                Ok(report) => {
                    *evaluated += 1;
                    print_report(&mut self.out, &report, self.theme, self.enable_colors)?;
                }
                Err(e) => print_error_message(&mut self.out, &e.to_string(), self.theme, self.enable_colors)?,
            }
            if !self.ask_again()? {
                return Ok(());
            }
        }
    }

    fn welcome(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        print_banner(&mut self.out, "PinGuard PIN Validator", self.theme, self.enable_colors)?;
        writeln!(self.out, "\nThis tool evaluates the security of your numeric PIN")?;
        writeln!(self.out, "based on common patterns and personal dates.")?;
        writeln!(self.out, "\nType 'exit' at any prompt to quit the application.")
    }

    fn prompt(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.out, "{}", paint(question, ThemeEntry::Prompt, self.theme, self.enable_colors))?;
        self.out.flush()?;
        let answer = self.source.read_line()?.ok_or(PromptError::Closed)?;
        check_exit(answer)
    }

    fn prompt_secret(&mut self, question: &str) -> Result<String, PromptError> {
        write!(self.out, "{}", paint(question, ThemeEntry::Prompt, self.theme, self.enable_colors))?;
        self.out.flush()?;
        let answer = self.source.read_secret(question)?.ok_or(PromptError::Closed)?;
        check_exit(answer)
    }

    fn error(&mut self, msg: &str) -> io::Result<()> {
        print_error_message(&mut self.out, msg, self.theme, self.enable_colors)
    }

    fn collect_demographics(&mut self) -> Result<RawDemographics, PromptError> {
        writeln!(self.out, "\nDemographic information (optional, press Enter to skip)")?;
        writeln!(self.out, "{}", "-".repeat(50))?;
        let mut raw = RawDemographics::new();
        for source in DemographicSource::ALL {
            if let Some(date) = self.ask_date(date_question(source))? {
                raw.insert(source, date);
            }
        }
        Ok(raw)
    }

    /// Empty input skips; an unparseable date re-prompts.
    fn ask_date(&mut self, question: &str) -> Result<Option<String>, PromptError> {
        loop {
            let answer = self.prompt(question)?;
            let answer = answer.trim();
            if answer.is_empty() {
                return Ok(None);
            }
            if CalendarDate::parse(answer).is_some() {
                return Ok(Some(answer.to_string()));
            }
            self.error("Invalid date format. Please use YYYY-MM-DD format or press Enter to skip.")?;
        }
    }

    fn ask_length(&mut self) -> Result<PinLength, PromptError> {
        loop {
            let answer = self.prompt("\nSelect PIN length (4 or 6 digits): ")?;
            match answer.trim().parse::<usize>() {
                Ok(digits) => match PinLength::from_digits(digits) {
                    Ok(length) => return Ok(length),
                    Err(_) => self.error("PIN length must be either 4 or 6.")?,
                },
                Err(_) => self.error("Please enter a valid number (4 or 6).")?,
            }
        }
    }

    fn ask_pin(&mut self, length: PinLength) -> Result<String, PromptError> {
        loop {
            let answer = self.prompt_secret(&format!("\nEnter your {}-digit PIN: ", length))?;
            let pin = answer.trim().to_string();
            match validate_pin_format(&pin, length) {
                Ok(()) => return Ok(pin),
                Err(e) => self.error(&e.to_string())?,
            }
        }
    }

    fn ask_again(&mut self) -> Result<bool, PromptError> {
        loop {
            let answer = self.prompt("\nValidate another PIN? (y/n): ")?;
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => print_info_message(&mut self.out, "Please enter 'y' or 'n'.", self.theme, self.enable_colors)?,
            }
        }
    }
}

fn check_exit(answer: String) -> Result<String, PromptError> {
    if answer.trim().eq_ignore_ascii_case(EXIT_WORD) {
        Err(PromptError::Exit)
    } else {
        Ok(answer)
    }
}

fn date_question(source: DemographicSource) -> &'static str {
    match source {
        DemographicSource::SelfDob => "Your date of birth (YYYY-MM-DD): ",
        DemographicSource::PartnerDob => "Spouse's date of birth (YYYY-MM-DD): ",
        DemographicSource::Anniversary => "Wedding anniversary (YYYY-MM-DD): ",
    }
}

/// Runs a session on the real terminal.
pub fn run_interactive(config: &EvaluatorConfig, theme: &ThemeMap, show_pin: bool) -> Result<usize> {
    let enable_colors = io::stdout().is_terminal();
    let stdout = io::stdout();
    let mut session = Session::new(TerminalSource::new(show_pin), stdout.lock(), config, theme, enable_colors);
    session.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::ThemeStyle;

    fn drive(script: &str) -> (usize, String) {
        let config = EvaluatorConfig::default();
        let theme = ThemeStyle::default_theme_map();
        let mut out = Vec::new();
        let evaluated = {
            let mut session = Session::new(LineSource::new(script.as_bytes()), &mut out, &config, &theme, false);
            session.run().unwrap()
        };
        (evaluated, String::from_utf8(out).unwrap())
    }

    #[test]
    fn full_session_with_two_pins() {
        let (evaluated, text) = drive("1998-02-01\n\n\n4\n0201\ny\n6\n729438\nn\n");
        assert_eq!(evaluated, 2);
        assert!(text.contains("[DEMOGRAPHIC_DOB_SELF]"));
        assert!(text.contains("PIN Strength: STRONG"));
        assert!(text.ends_with(&format!("{}\n", FAREWELL)));
    }

    #[test]
    fn invalid_inputs_reprompt() {
        let (evaluated, text) = drive("2012-12-34\n\n\n\n5\nfour\n4\n12a4\n1234\nmaybe\nn\n");
        assert_eq!(evaluated, 1);
        assert!(text.contains("Error: Invalid date format."));
        assert!(text.contains("Error: PIN length must be either 4 or 6."));
        assert!(text.contains("Error: Please enter a valid number (4 or 6)."));
        assert!(text.contains("Error: Invalid PIN format."));
        assert!(text.contains("Please enter 'y' or 'n'."));
        assert!(text.contains("[COMMONLY_USED]"));
    }

    #[test]
    fn exit_at_any_prompt() {
        let (evaluated, text) = drive("EXIT\n");
        assert_eq!(evaluated, 0);
        assert!(text.contains(FAREWELL));

        let (evaluated, _) = drive("\n\n\n4\nexit\n");
        assert_eq!(evaluated, 0);
    }

    #[test]
    fn closed_input_ends_quietly() {
        let (evaluated, text) = drive("\n\n\n4\n");
        assert_eq!(evaluated, 0);
        assert!(text.contains(FAREWELL));
    }
}
