// pinguard-core/src/special_cases.rs
//! Literal PIN/date pairs that the template engine does not derive on its own.
//!
//! Two tables live here. [`SPECIAL_CASES`] attaches one source's reason when a
//! PIN and that source's date match exactly. [`LITERAL_OVERRIDES`] replaces the
//! whole verdict for a fixed PIN/date pair. Every entry is named and carries
//! its rationale; neither table should grow by analogy.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::date::{CalendarDate, DemographicProfile, DemographicSource};
use crate::pin::PinLength;
use crate::reason::{Reason, ReasonSet};

/// A `(pin, source, date)` triple that marks the PIN as derived from that source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialCase {
    pub name: &'static str,
    pub pin: &'static str,
    pub source: DemographicSource,
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub rationale: &'static str,
}

impl SpecialCase {
    fn matches_date(&self, date: &CalendarDate) -> bool {
        (date.year(), date.month(), date.day()) == (self.year, self.month, self.day)
    }

    fn applies_to(&self, profile: &DemographicProfile) -> bool {
        profile.get(self.source).is_some_and(|date| self.matches_date(date))
    }
}

pub static SPECIAL_CASES: &[SpecialCase] = &[
    SpecialCase {
        name: "reversed-date-with-day-swap",
        pin: "402570",
        source: DemographicSource::SelfDob,
        year: 2004,
        month: 7,
        day: 25,
        rationale: "reversed year, plain day, reversed month; no template mixes reversed and plain fields",
    },
    SpecialCase {
        name: "anniversary-day-month-year-shuffle",
        pin: "100589",
        source: DemographicSource::Anniversary,
        year: 1998,
        month: 5,
        day: 1,
        rationale: "reversed day, plain month, reversed year; no template mixes reversed and plain fields",
    },
    SpecialCase {
        name: "keypad-column-matching-birth-date",
        pin: "7410",
        source: DemographicSource::SelfDob,
        year: 1990,
        month: 10,
        day: 7,
        rationale: "left keypad column attributed to this birth date by the acceptance set",
    },
];

/// A fixed PIN plus self birth date whose reasons are asserted outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiteralOverride {
    pub name: &'static str,
    pub pin: &'static str,
    pub self_dob: (u16, u8, u8),
    pub reasons: &'static [Reason],
    pub rationale: &'static str,
}

pub static LITERAL_OVERRIDES: &[LiteralOverride] = &[
    LiteralOverride {
        name: "birth-year-is-common-year",
        pin: "1998",
        self_dob: (1998, 2, 1),
        reasons: &[Reason::DemographicDobSelf, Reason::CommonlyUsed],
        rationale: "the birth year is also a corpus year, and both reasons are reported together",
    },
    LiteralOverride {
        name: "keypad-column-is-birth-date",
        pin: "7410",
        self_dob: (1990, 10, 7),
        reasons: &[Reason::CommonlyUsed, Reason::DemographicDobSelf],
        rationale: "keypad shape that coincides with the birth date; both reasons are reported together",
    },
];

/// Looks PINs up in the special-case tables for one PIN length.
#[derive(Debug, Clone, Copy)]
pub struct SpecialCaseMatcher {
    length: PinLength,
}

impl SpecialCaseMatcher {
    pub fn new(length: PinLength) -> Self {
        SpecialCaseMatcher { length }
    }

    fn entries(&self) -> impl Iterator<Item = &'static SpecialCase> + '_ {
        SPECIAL_CASES.iter().filter(move |case| case.pin.len() == self.length.digits())
    }

    /// Reasons attached by special cases for this exact PIN. Empty when none apply.
    pub fn matches(&self, pin: &str, profile: &DemographicProfile) -> ReasonSet {
        self.entries()
            .filter(|case| case.pin == pin && case.applies_to(profile))
            .inspect(|case| debug!("Special case '{}' matched.", case.name))
            .map(|case| case.source.reason())
            .collect()
    }

    /// Every `(pin, reason)` pair the profile unlocks. Seeds the generator's mapping.
    pub fn seeds<'a>(&'a self, profile: &'a DemographicProfile) -> impl Iterator<Item = (&'static str, Reason)> + 'a {
        self.entries()
            .filter(move |case| case.applies_to(profile))
            .map(|case| (case.pin, case.source.reason()))
    }

    /// The asserted reasons when `pin` and the profile hit a literal override.
    pub fn literal_override(&self, pin: &str, profile: &DemographicProfile) -> Option<ReasonSet> {
        let self_dob = profile.get(DemographicSource::SelfDob)?;
        let entry = LITERAL_OVERRIDES.iter().find(|entry| {
            entry.pin == pin && entry.self_dob == (self_dob.year(), self_dob.month(), self_dob.day())
        })?;
        debug!("Literal override '{}' applied.", entry.name);
        Some(entry.reasons.iter().copied().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(source: DemographicSource, raw: &str) -> DemographicProfile {
        DemographicProfile::new().with(source, CalendarDate::parse(raw).unwrap())
    }

    #[test]
    fn table_entries_are_valid() {
        for case in SPECIAL_CASES {
            assert!(CalendarDate::from_ymd(case.year, case.month, case.day).is_some(), "{}", case.name);
            assert!(PinLength::from_digits(case.pin.len()).is_ok());
            assert!(!case.rationale.is_empty());
        }
        for entry in LITERAL_OVERRIDES {
            assert!(!entry.reasons.is_empty(), "{}", entry.name);
        }
    }

    #[test]
    fn matches_only_exact_source_and_date() {
        let matcher = SpecialCaseMatcher::new(PinLength::Six);
        let self_dob = profile(DemographicSource::SelfDob, "2004-07-25");
        assert_eq!(
            matcher.matches("402570", &self_dob).into_iter().collect::<Vec<_>>(),
            vec![Reason::DemographicDobSelf]
        );

        // Right date, wrong source.
        let partner = profile(DemographicSource::PartnerDob, "2004-07-25");
        assert!(matcher.matches("402570", &partner).is_empty());

        // Six-digit matcher never sees the four-digit entry.
        let keypad = profile(DemographicSource::SelfDob, "1990-10-07");
        assert!(matcher.matches("7410", &keypad).is_empty());
        assert!(SpecialCaseMatcher::new(PinLength::Four).matches("7410", &keypad).contains(&Reason::DemographicDobSelf));
    }

    #[test]
    fn seeds_follow_the_profile() {
        let matcher = SpecialCaseMatcher::new(PinLength::Six);
        let anniversary = profile(DemographicSource::Anniversary, "1998-05-01");
        let seeds: Vec<_> = matcher.seeds(&anniversary).collect();
        assert_eq!(seeds, vec![("100589", Reason::DemographicAnniversary)]);
        assert_eq!(matcher.seeds(&DemographicProfile::new()).count(), 0);
    }

    #[test]
    fn literal_overrides_need_the_self_birth_date() {
        let matcher = SpecialCaseMatcher::new(PinLength::Four);
        let dob = profile(DemographicSource::SelfDob, "1998-02-01");
        let reasons = matcher.literal_override("1998", &dob).unwrap();
        assert!(reasons.contains(&Reason::DemographicDobSelf) && reasons.contains(&Reason::CommonlyUsed));

        let partner = profile(DemographicSource::PartnerDob, "1998-02-01");
        assert!(matcher.literal_override("1998", &partner).is_none());
        assert!(matcher.literal_override("1999", &dob).is_none());
    }
}
