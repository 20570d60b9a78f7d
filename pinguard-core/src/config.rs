//! Configuration management for `pinguard-core`.
//!
//! This module defines the evaluator settings (generation budget and corpus
//! inputs). It handles YAML deserialization and provides utilities for loading,
//! merging, and validating these configs.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::corpus::{CorpusSettings, DEFAULT_REFERENCE_YEAR, DEFAULT_YEAR_WINDOW};
use crate::errors::PinGuardError;
use crate::generator::{
    GenerationBudget, DEFAULT_FRAGMENT_PREFIX, DEFAULT_MAX_COMBINATIONS, DEFAULT_MAX_EXECUTION_TIME,
    DEFAULT_PRODUCT_CEILING,
};
use crate::pin::PinLength;

/// Budget settings for candidate generation.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
pub struct BudgetConfig {
    /// Maximum combinations per generate call (default: 500000).
    pub max_combinations: Option<u64>,
    /// Deadline per generate call in milliseconds (default: 3000).
    pub max_execution_time_ms: Option<u64>,
    /// Product size above which fragment lists are truncated (default: 5000).
    pub product_ceiling: Option<usize>,
    /// Truncated fragment list length (default: 20).
    pub fragment_prefix: Option<usize>,
}

/// Inputs to corpus construction.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
pub struct CorpusConfig {
    pub reference_year: Option<i32>,
    pub year_window: Option<u32>,
    pub operator_identifier: Option<String>,
    /// PINs removed from the corpus. User entries add to the defaults.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Represents the top-level configuration structure for PinGuard.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash)]
pub struct EvaluatorConfig {
    #[serde(default)]
    pub budget: BudgetConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        EvaluatorConfig {
            budget: BudgetConfig {
                max_combinations: Some(DEFAULT_MAX_COMBINATIONS),
                max_execution_time_ms: Some(DEFAULT_MAX_EXECUTION_TIME.as_millis() as u64),
                product_ceiling: Some(DEFAULT_PRODUCT_CEILING),
                fragment_prefix: Some(DEFAULT_FRAGMENT_PREFIX),
            },
            corpus: CorpusConfig {
                reference_year: Some(DEFAULT_REFERENCE_YEAR),
                year_window: Some(DEFAULT_YEAR_WINDOW),
                operator_identifier: None,
                exclude: Vec::new(),
            },
        }
    }
}

impl EvaluatorConfig {
    /// Loads settings from a YAML file. Missing keys stay `None`; merge with
    /// the defaults before use.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading evaluator config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: EvaluatorConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        info!("Loaded evaluator config from {}.", path.display());
        Ok(config)
    }

    /// Loads the embedded default configuration.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default evaluator config from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: EvaluatorConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default evaluator config")?;
        Ok(config)
    }

    /// Loads `path` if given, otherwise the per-user config file if it exists,
    /// and merges the result over the embedded defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        let defaults = EvaluatorConfig::load_default()?;
        let user_path = match path {
            Some(explicit) => Some(explicit.to_path_buf()),
            None => user_config_path().filter(|candidate| candidate.is_file()),
        };

        let user = match user_path {
            Some(p) => Some(EvaluatorConfig::load_from_file(&p)?),
            None => {
                debug!("No user config found; using built-in defaults.");
                None
            }
        };

        let merged = merge_config(defaults, user);
        merged.validate()?;
        Ok(merged)
    }

    /// Checks every present value. All problems are reported at once.
    pub fn validate(&self) -> Result<(), PinGuardError> {
        let mut errors = Vec::new();
        let budget = &self.budget;

        for (name, value) in [
            ("max_combinations", budget.max_combinations),
            ("max_execution_time_ms", budget.max_execution_time_ms),
            ("product_ceiling", budget.product_ceiling.map(|v| v as u64)),
            ("fragment_prefix", budget.fragment_prefix.map(|v| v as u64)),
        ] {
            if value == Some(0) {
                errors.push(format!("budget.{} must be greater than 0.", name));
            }
        }

        if let (Some(prefix), Some(ceiling)) = (budget.fragment_prefix, budget.product_ceiling) {
            if prefix > ceiling {
                errors.push(format!(
                    "budget.fragment_prefix ({}) must not exceed budget.product_ceiling ({}).",
                    prefix, ceiling
                ));
            }
        }

        if let Some(year) = self.corpus.reference_year {
            if year < 0 {
                errors.push(format!("corpus.reference_year ({}) must not be negative.", year));
            }
        }

        if let Some(window) = self.corpus.year_window {
            if i32::try_from(window).is_err() {
                errors.push(format!("corpus.year_window ({}) must not exceed {}.", window, i32::MAX));
            }
        }

        for pin in &self.corpus.exclude {
            let valid_length = PinLength::from_digits(pin.len()).is_ok();
            if !valid_length || !pin.bytes().all(|b| b.is_ascii_digit()) {
                errors.push(format!("corpus.exclude entry '{}' is not a 4 or 6 digit PIN.", pin));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PinGuardError::InvalidConfig(errors.join(" ")))
        }
    }

    pub fn generation_budget(&self) -> GenerationBudget {
        let defaults = GenerationBudget::default();
        GenerationBudget {
            max_combinations: self.budget.max_combinations.unwrap_or(defaults.max_combinations),
            max_execution_time: self
                .budget
                .max_execution_time_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.max_execution_time),
            product_ceiling: self.budget.product_ceiling.unwrap_or(defaults.product_ceiling),
            fragment_prefix: self.budget.fragment_prefix.unwrap_or(defaults.fragment_prefix),
        }
    }

    pub fn corpus_settings(&self) -> CorpusSettings {
        let defaults = CorpusSettings::default();
        let mut exclude = self.corpus.exclude.clone();
        exclude.sort();
        exclude.dedup();
        CorpusSettings {
            reference_year: self.corpus.reference_year.unwrap_or(defaults.reference_year),
            year_window: self.corpus.year_window.unwrap_or(defaults.year_window),
            operator_identifier: self.corpus.operator_identifier.clone(),
            exclude,
        }
    }
}

/// Per-user config location, e.g. `~/.config/pinguard/config.yaml`.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pinguard").join("config.yaml"))
}

/// Merges user-defined settings with defaults. `Some` user values win;
/// exclusions are combined.
pub fn merge_config(default_config: EvaluatorConfig, user_config: Option<EvaluatorConfig>) -> EvaluatorConfig {
    let mut merged = default_config;
    let Some(user) = user_config else {
        return merged;
    };

    macro_rules! override_field {
        ($section:ident . $field:ident) => {
            if let Some(value) = user.$section.$field {
                debug!("Overriding {}.{} with user value: {:?}", stringify!($section), stringify!($field), value);
                merged.$section.$field = Some(value);
            }
        };
    }

    override_field!(budget.max_combinations);
    override_field!(budget.max_execution_time_ms);
    override_field!(budget.product_ceiling);
    override_field!(budget.fragment_prefix);
    override_field!(corpus.reference_year);
    override_field!(corpus.year_window);

    if let Some(identifier) = user.corpus.operator_identifier {
        debug!("Using operator identifier from user config.");
        merged.corpus.operator_identifier = Some(identifier);
    }

    for pin in user.corpus.exclude {
        if merged.corpus.exclude.contains(&pin) {
            warn!("Corpus exclusion '{}' is listed more than once.", pin);
            continue;
        }
        merged.corpus.exclude.push(pin);
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_match_code_defaults() {
        let loaded = EvaluatorConfig::load_default().unwrap();
        assert_eq!(loaded, EvaluatorConfig::default());
        assert_eq!(loaded.generation_budget(), GenerationBudget::default());
        assert_eq!(loaded.corpus_settings(), CorpusSettings::default());
    }

    #[test]
    fn merge_overrides_only_present_values() {
        let user: EvaluatorConfig = serde_yml::from_str(
            "budget:\n  max_combinations: 1000\ncorpus:\n  operator_identifier: agent-3107\n  exclude: ['1234']\n",
        )
        .unwrap();
        let merged = merge_config(EvaluatorConfig::default(), Some(user));
        assert_eq!(merged.budget.max_combinations, Some(1000));
        assert_eq!(merged.budget.product_ceiling, Some(DEFAULT_PRODUCT_CEILING));
        assert_eq!(merged.corpus.operator_identifier.as_deref(), Some("agent-3107"));
        assert_eq!(merged.corpus.exclude, vec!["1234".to_string()]);
        assert_eq!(merged.generation_budget().max_combinations, 1000);
    }

    #[test]
    fn validation_collects_every_problem() {
        let mut config = EvaluatorConfig::default();
        config.budget.max_combinations = Some(0);
        config.budget.fragment_prefix = Some(6000);
        config.corpus.exclude = vec!["12a4".to_string(), "12345".to_string()];

        let Err(PinGuardError::InvalidConfig(message)) = config.validate() else {
            panic!("expected InvalidConfig");
        };
        assert!(message.contains("max_combinations"));
        assert!(message.contains("fragment_prefix (6000)"));
        assert!(message.contains("'12a4'"));
        assert!(message.contains("'12345'"));
    }

    #[test]
    fn oversized_year_window_is_rejected() {
        let mut config = EvaluatorConfig::default();
        config.corpus.year_window = Some(u32::MAX);
        let Err(PinGuardError::InvalidConfig(message)) = config.validate() else {
            panic!("expected InvalidConfig");
        };
        assert!(message.contains("corpus.year_window (4294967295)"));

        config.corpus.year_window = Some(i32::MAX as u32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: EvaluatorConfig = serde_yml::from_str("corpus:\n  year_window: 50\n").unwrap();
        assert_eq!(config.budget, BudgetConfig::default());
        assert_eq!(config.generation_budget(), GenerationBudget::default());
        assert_eq!(config.corpus_settings().year_window, 50);
    }
}
