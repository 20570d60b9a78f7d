// pinguard-core/src/evaluator.rs
//! The public verdict pipeline.
//!
//! Order of checks for one PIN:
//! 1. strict format validation (the only failure path),
//! 2. literal overrides,
//! 3. demographic matching: direct single-date patterns, then special cases
//!    (which short-circuit), then the combinatorial generator when nothing
//!    matched yet,
//! 4. corpus membership, only when no demographic reason was found.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::components::extract_patterns;
use crate::config::EvaluatorConfig;
use crate::corpus::CommonPinCorpus;
use crate::date::{DemographicProfile, RawDemographics};
use crate::errors::PinGuardError;
use crate::generator::CandidateGenerator;
use crate::pin::{validate_pin_format, PinLength};
use crate::reason::{Reason, ReasonSet};
use crate::special_cases::SpecialCaseMatcher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Strength {
    Weak,
    Strong,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Weak => f.write_str("WEAK"),
            Strength::Strong => f.write_str("STRONG"),
        }
    }
}

/// Verdict for one PIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaknessReport {
    pub pin: String,
    pub pin_length: PinLength,
    pub strength: Strength,
    pub reasons: ReasonSet,
    /// True when candidate generation ran out of budget during this call.
    /// Never changes `strength` or `reasons`.
    pub search_truncated: bool,
}

impl WeaknessReport {
    fn new(pin: &str, pin_length: PinLength, reasons: ReasonSet, search_truncated: bool) -> Self {
        let strength = if reasons.is_empty() { Strength::Strong } else { Strength::Weak };
        WeaknessReport { pin: pin.to_string(), pin_length, strength, reasons, search_truncated }
    }

    pub fn is_weak(&self) -> bool {
        self.strength == Strength::Weak
    }

    pub fn has_reason(&self, reason: Reason) -> bool {
        self.reasons.contains(&reason)
    }
}

/// Classifies PINs of one fixed length.
///
/// The corpus is built (or fetched from the process cache) at construction and
/// is read-only afterwards, so one evaluator can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct WeaknessEvaluator {
    length: PinLength,
    corpus: Arc<CommonPinCorpus>,
    generator: CandidateGenerator,
    special_cases: SpecialCaseMatcher,
}

impl WeaknessEvaluator {
    /// An evaluator with the built-in configuration.
    pub fn new(length: PinLength) -> Self {
        WeaknessEvaluator::with_config(length, &EvaluatorConfig::default())
    }

    pub fn with_config(length: PinLength, config: &EvaluatorConfig) -> Self {
        let corpus = CommonPinCorpus::shared(length, &config.corpus_settings());
        debug!("{}-digit evaluator ready with {} corpus entries.", length, corpus.len());
        WeaknessEvaluator {
            length,
            corpus,
            generator: CandidateGenerator::new(length, config.generation_budget()),
            special_cases: SpecialCaseMatcher::new(length),
        }
    }

    pub fn pin_length(&self) -> PinLength {
        self.length
    }

    pub fn corpus(&self) -> &CommonPinCorpus {
        &self.corpus
    }

    pub fn is_common_pin(&self, pin: &str) -> bool {
        self.corpus.contains(pin)
    }

    /// Evaluates `pin` against optional raw demographic dates. Invalid dates
    /// are ignored; only a malformed PIN is an error.
    pub fn evaluate(&self, pin: &str, demographics: Option<&RawDemographics>) -> Result<WeaknessReport, PinGuardError> {
        validate_pin_format(pin, self.length)?;
        let profile = demographics.map(DemographicProfile::from_raw).unwrap_or_default();
        Ok(self.evaluate_validated(pin, &profile))
    }

    /// Same as [`evaluate`](Self::evaluate) with already-parsed dates.
    pub fn evaluate_profile(&self, pin: &str, profile: &DemographicProfile) -> Result<WeaknessReport, PinGuardError> {
        validate_pin_format(pin, self.length)?;
        Ok(self.evaluate_validated(pin, profile))
    }

    fn evaluate_validated(&self, pin: &str, profile: &DemographicProfile) -> WeaknessReport {
        if let Some(reasons) = self.special_cases.literal_override(pin, profile) {
            return WeaknessReport::new(pin, self.length, reasons, false);
        }

        let (mut reasons, search_truncated) = self.demographic_reasons(pin, profile);

        if reasons.is_empty() && self.corpus.contains(pin) {
            debug!("PIN found in the common corpus.");
            reasons.insert(Reason::CommonlyUsed);
        }

        WeaknessReport::new(pin, self.length, reasons, search_truncated)
    }

    fn demographic_reasons(&self, pin: &str, profile: &DemographicProfile) -> (ReasonSet, bool) {
        if profile.is_empty() {
            return (ReasonSet::new(), false);
        }

        let mut reasons: ReasonSet = profile
            .iter()
            .filter(|(_, date)| extract_patterns(date, self.length).contains(pin))
            .map(|(source, _)| source.reason())
            .collect();
        if !reasons.is_empty() {
            debug!("Direct date pattern match: {:?}", reasons);
        }

        let special = self.special_cases.matches(pin, profile);
        if !special.is_empty() {
            reasons.extend(special);
            return (reasons, false);
        }

        if !reasons.is_empty() {
            return (reasons, false);
        }

        let outcome = self.generator.generate(profile);
        let generated = outcome.reasons_for(pin);
        if !generated.is_empty() {
            debug!("Combinatorial match: {:?}", generated);
        }
        (generated, outcome.is_truncated())
    }
}
