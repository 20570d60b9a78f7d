// pinguard/src/ui/mod.rs
//! Console presentation: theme, message printers and report rendering.

pub mod output_format;
pub mod report;
pub mod theme;
