// pinguard/src/lib.rs
//! # PinGuard CLI Application
//!
//! This crate provides the terminal interface for the `pinguard-core` PIN
//! evaluator: one-shot checks, an interactive prompt loop and corpus
//! inspection, with themed console output.
//!
//! License: MIT OR APACHE 2.0

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
