// pinguard/src/commands/mod.rs
//! Subcommand implementations.

pub mod check;
pub mod corpus;
pub mod interactive;

use pinguard_core::Strength;
use thiserror::Error;

/// Failures raised by the CLI layer itself, as opposed to the core library.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("cannot infer the PIN length from a {0}-character PIN; pass --length 4 or --length 6")]
    CannotInferLength(usize),
}

/// Process exit status for a finished `check`.
pub fn exit_code_for(strength: Strength) -> i32 {
    match strength {
        Strength::Strong => 0,
        Strength::Weak => 2,
    }
}

/// Exit status for any error.
pub const EXIT_ERROR: i32 = 1;
