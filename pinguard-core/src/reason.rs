// File: pinguard-core/src/reason.rs
//! Reason codes attached to a WEAK verdict.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Why a PIN was classified as weak. Closed set; codes are stable and are what
/// hosts print and serialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    DemographicDobSelf,
    DemographicDobSpouse,
    DemographicAnniversary,
    CommonlyUsed,
}

/// A deduplicated, stably ordered set of reasons.
pub type ReasonSet = BTreeSet<Reason>;

impl Reason {
    pub const ALL: [Reason; 4] = [
        Reason::DemographicDobSelf,
        Reason::DemographicDobSpouse,
        Reason::DemographicAnniversary,
        Reason::CommonlyUsed,
    ];

    /// The wire code, e.g. `DEMOGRAPHIC_DOB_SELF`.
    pub fn code(self) -> &'static str {
        match self {
            Reason::DemographicDobSelf => "DEMOGRAPHIC_DOB_SELF",
            Reason::DemographicDobSpouse => "DEMOGRAPHIC_DOB_SPOUSE",
            Reason::DemographicAnniversary => "DEMOGRAPHIC_ANNIVERSARY",
            Reason::CommonlyUsed => "COMMONLY_USED",
        }
    }

    /// One-line explanation for console output.
    pub fn description(self) -> &'static str {
        match self {
            Reason::DemographicDobSelf => "Contains your date of birth pattern",
            Reason::DemographicDobSpouse => "Contains your spouse's date of birth pattern",
            Reason::DemographicAnniversary => "Contains your wedding anniversary pattern",
            Reason::CommonlyUsed => "This is a commonly used PIN pattern",
        }
    }

    pub fn is_demographic(self) -> bool {
        !matches!(self, Reason::CommonlyUsed)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error type for parsing an unknown reason code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReasonError(pub String);

impl fmt::Display for ParseReasonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown reason code '{}'", self.0)
    }
}

impl std::error::Error for ParseReasonError {}

impl FromStr for Reason {
    type Err = ParseReasonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reason::ALL
            .into_iter()
            .find(|r| r.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseReasonError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_serde_names() {
        for reason in Reason::ALL {
            let json = serde_json::to_string(&reason).unwrap();
            assert_eq!(json, format!("\"{}\"", reason.code()));
            assert_eq!(reason.code().parse::<Reason>().unwrap(), reason);
        }
    }

    #[test]
    fn reason_sets_are_ordered_and_deduplicated() {
        let set: ReasonSet = [Reason::CommonlyUsed, Reason::DemographicDobSelf, Reason::CommonlyUsed]
            .into_iter()
            .collect();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![Reason::DemographicDobSelf, Reason::CommonlyUsed]);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!("DEMOGRAPHIC_PET_NAME".parse::<Reason>().is_err());
        assert!(!Reason::CommonlyUsed.is_demographic());
    }
}
