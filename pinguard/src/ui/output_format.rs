// pinguard/src/ui/output_format.rs
//! Small themed message printers shared by every command.

use std::io::{self, Write};

use super::theme::{paint, ThemeEntry, ThemeMap};

/// Width of banner rules.
pub const BANNER_WIDTH: usize = 50;

fn print_prefixed<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    enable_colors: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint(&format!("{}{}", prefix, msg), entry, theme, enable_colors))
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "", msg, ThemeEntry::Info, theme, enable_colors)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "Warning: ", msg, ThemeEntry::Warn, theme, enable_colors)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    print_prefixed(writer, "Error: ", msg, ThemeEntry::Error, theme, enable_colors)
}

/// Prints a title centred between `=` rules.
pub fn print_banner<W: Write>(writer: &mut W, title: &str, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    let centred = format!("{:=^width$}", format!("  {}  ", title), width = BANNER_WIDTH);
    writeln!(writer, "{}", paint(&rule, ThemeEntry::Header, theme, enable_colors))?;
    writeln!(writer, "{}", paint(&centred, ThemeEntry::Header, theme, enable_colors))?;
    writeln!(writer, "{}", paint(&rule, ThemeEntry::Header, theme, enable_colors))
}

/// Prints a closing `=` rule.
pub fn print_rule<W: Write>(writer: &mut W, theme: &ThemeMap, enable_colors: bool) -> io::Result<()> {
    writeln!(writer, "{}", paint(&"=".repeat(BANNER_WIDTH), ThemeEntry::Header, theme, enable_colors))
}
