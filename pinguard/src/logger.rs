// pinguard/src/logger.rs
//! Logger initialisation for the `pinguard` binary.
//!
//! Everything goes to stderr so that stdout (reports, JSON) stays clean for
//! pipes. `RUST_LOG` is honoured unless a level is forced by a CLI flag.
//!
//! License: MIT OR APACHE 2.0

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Sets up `env_logger`.
///
/// `Some(level)` overrides `RUST_LOG` entirely; `None` reads `RUST_LOG` and
/// falls back to `warn`. Calling this twice is harmless.
pub fn init_logger(forced_level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.target(Target::Stderr).format_timestamp(None);
    if let Some(level) = forced_level {
        builder.filter_level(level);
    }
    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = builder.try_init();
}

/// Maps the global `--quiet` / `--debug` flags to a forced level.
/// `--quiet` wins when both are given.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_overrides_debug() {
        assert_eq!(level_from_flags(true, true), Some(LevelFilter::Off));
        assert_eq!(level_from_flags(false, true), Some(LevelFilter::Debug));
        assert_eq!(level_from_flags(false, false), None);
    }
}
