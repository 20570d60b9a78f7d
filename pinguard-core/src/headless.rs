// pinguard-core/src/headless.rs
// File: pinguard-core/src/headless.rs

//! `headless.rs`
//! Convenience wrapper for one-shot, non-interactive PIN evaluation.

use anyhow::{Context, Result};

use crate::config::EvaluatorConfig;
use crate::date::RawDemographics;
use crate::evaluator::{WeaknessEvaluator, WeaknessReport};
use crate::pin::PinLength;

/// Evaluates a single PIN with the given configuration.
///
/// # Arguments
///
/// * `config` - The merged `EvaluatorConfig` (defaults + optional user overrides).
/// * `length` - The PIN length the evaluator is built for.
/// * `pin` - The PIN to classify.
/// * `demographics` - Optional raw dates; invalid ones are ignored.
pub fn headless_evaluate(
    config: &EvaluatorConfig,
    length: PinLength,
    pin: &str,
    demographics: Option<&RawDemographics>,
) -> Result<WeaknessReport> {
    config.validate()?;
    let evaluator = WeaknessEvaluator::with_config(length, config);
    let report = evaluator
        .evaluate(pin, demographics)
        .with_context(|| format!("Could not evaluate the {}-digit PIN", length))?;
    Ok(report)
}
