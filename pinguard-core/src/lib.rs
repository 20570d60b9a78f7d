// pinguard-core/src/lib.rs
//! # PinGuard Core Library
//!
//! `pinguard-core` classifies a 4- or 6-digit PIN as WEAK or STRONG and, when
//! weak, says why. A PIN is weak when it belongs to a corpus of commonly chosen
//! PINs, or when it can be derived from up to three personal dates (own birth
//! date, partner's birth date, anniversary) through rearrangement, reversal,
//! repetition and cross-date combination.
//!
//! The library performs no I/O besides optional config loading and keeps no
//! state between calls apart from a process-wide, read-only corpus cache.
//!
//! ## Modules
//!
//! * `pin`: `PinLength` and strict PIN format validation.
//! * `reason`: The closed set of reason codes.
//! * `date`: Calendar dates, demographic sources and profiles.
//! * `components`: Date decomposition, single-date templates and fragments.
//! * `corpus`: The common-PIN corpus and its shared cache.
//! * `generator`: Budgeted combinatorial candidate generation.
//! * `special_cases`: Named literal PIN/date tables.
//! * `evaluator`: The verdict pipeline.
//! * `config`: YAML configuration loading, merging and validation.
//! * `headless`: One-shot evaluation helper.
//!
//! ## Usage Example
//!
//! ```rust
//! use pinguard_core::{raw_demographics_from_tags, PinLength, Reason, WeaknessEvaluator};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let evaluator = WeaknessEvaluator::new(PinLength::Four);
//!
//!     let report = evaluator.evaluate("1234", None)?;
//!     assert!(report.has_reason(Reason::CommonlyUsed));
//!
//!     let demographics = raw_demographics_from_tags([("dob", "1998-02-01")]);
//!     let report = evaluator.evaluate("0201", Some(&demographics))?;
//!     assert_eq!(report.strength.to_string(), "WEAK");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Only a malformed PIN makes [`WeaknessEvaluator::evaluate`] fail, with
//! [`PinGuardError::InvalidPinFormat`]. Invalid dates are dropped and an
//! exhausted search budget only sets [`WeaknessReport::search_truncated`].
//!
//! ---
//! License: MIT OR APACHE 2.0

pub mod components;
pub mod config;
pub mod corpus;
pub mod date;
pub mod errors;
pub mod evaluator;
pub mod generator;
pub mod headless;
pub mod pin;
pub mod reason;
pub mod special_cases;

/// Re-exports the configuration types and functions.
pub use config::{merge_config, user_config_path, BudgetConfig, CorpusConfig, EvaluatorConfig};

/// Re-exports the custom error types.
pub use errors::{PinFormatViolation, PinGuardError};

pub use pin::{validate_pin_format, PinLength};
pub use reason::{Reason, ReasonSet};
pub use date::{raw_demographics_from_tags, CalendarDate, DemographicProfile, DemographicSource, RawDemographics};
pub use components::{extract_patterns, ComponentName, ComponentSet};
pub use corpus::{CommonPinCorpus, CorpusCategory, CorpusSettings};
pub use generator::{BudgetBreach, CandidateGenerator, CartesianProduct, GenerationBudget, GenerationOutcome};
pub use special_cases::{SpecialCaseMatcher, LITERAL_OVERRIDES, SPECIAL_CASES};
pub use evaluator::{Strength, WeaknessEvaluator, WeaknessReport};

/// Re-exports the one-shot helper for non-interactive use.
pub use headless::headless_evaluate;
