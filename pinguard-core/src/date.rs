// pinguard-core/src/date.rs
//! Calendar dates and the demographic sources they belong to.
//!
//! Dates arrive as raw `YYYY-MM-DD` strings. Anything that is not a real
//! Gregorian date with a four-digit year is dropped here, so the rest of the
//! crate only ever sees valid [`CalendarDate`] values.
//!
//! License: MIT OR APACHE 2.0

use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::reason::Reason;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A validated calendar date with a four-digit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: u16,
    month: u8,
    day: u8,
}

impl CalendarDate {
    /// Builds a date from its parts, rejecting impossible days (e.g. Feb 30)
    /// and years outside `1000..=9999`.
    pub fn from_ymd(year: u16, month: u8, day: u8) -> Option<Self> {
        if !(1000..=9999).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))?;
        Some(CalendarDate { year, month, day })
    }

    /// Parses an ISO `YYYY-MM-DD` string. Fails closed: any parse error or
    /// out-of-range year yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let parsed = NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT).ok()?;
        let year = u16::try_from(parsed.year()).ok()?;
        // Month and day are bounded by chrono.
        CalendarDate::from_ymd(year, parsed.month() as u8, parsed.day() as u8)
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CalendarDate::parse(&value).ok_or_else(|| format!("'{}' is not a valid YYYY-MM-DD date", value))
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

/// Where a date came from. The declaration order is the iteration order used
/// everywhere candidates are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemographicSource {
    #[serde(alias = "dob")]
    SelfDob,
    #[serde(alias = "spouse_dob")]
    PartnerDob,
    Anniversary,
}

impl DemographicSource {
    pub const ALL: [DemographicSource; 3] = [
        DemographicSource::SelfDob,
        DemographicSource::PartnerDob,
        DemographicSource::Anniversary,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            DemographicSource::SelfDob => "self_dob",
            DemographicSource::PartnerDob => "partner_dob",
            DemographicSource::Anniversary => "anniversary",
        }
    }

    /// Accepts the canonical tags plus the short aliases `dob` and `spouse_dob`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "self_dob" | "dob" => Some(DemographicSource::SelfDob),
            "partner_dob" | "spouse_dob" => Some(DemographicSource::PartnerDob),
            "anniversary" => Some(DemographicSource::Anniversary),
            _ => None,
        }
    }

    /// The reason reported when a PIN is derived from this source.
    pub fn reason(self) -> Reason {
        match self {
            DemographicSource::SelfDob => Reason::DemographicDobSelf,
            DemographicSource::PartnerDob => Reason::DemographicDobSpouse,
            DemographicSource::Anniversary => Reason::DemographicAnniversary,
        }
    }
}

impl fmt::Display for DemographicSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Raw, unvalidated date strings keyed by source.
pub type RawDemographics = BTreeMap<DemographicSource, String>;

/// Builds [`RawDemographics`] from free-form `(tag, date)` pairs. Unknown tags
/// are skipped.
pub fn raw_demographics_from_tags<'a, I>(pairs: I) -> RawDemographics
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut raw = RawDemographics::new();
    for (tag, date) in pairs {
        match DemographicSource::from_tag(tag) {
            Some(source) => {
                raw.insert(source, date.to_string());
            }
            None => debug!("Ignoring unknown demographic tag '{}'", tag),
        }
    }
    raw
}

/// The validated dates for up to three sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DemographicProfile {
    dates: BTreeMap<DemographicSource, CalendarDate>,
}

impl DemographicProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every raw entry, silently dropping empty or invalid dates.
    pub fn from_raw(raw: &RawDemographics) -> Self {
        let mut profile = DemographicProfile::new();
        for (source, value) in raw {
            if value.is_empty() {
                continue;
            }
            match CalendarDate::parse(value) {
                Some(date) => {
                    profile.dates.insert(*source, date);
                }
                None => debug!("Dropping invalid {} date '{}'", source, value),
            }
        }
        profile
    }

    pub fn with(mut self, source: DemographicSource, date: CalendarDate) -> Self {
        self.insert(source, date);
        self
    }

    pub fn insert(&mut self, source: DemographicSource, date: CalendarDate) {
        self.dates.insert(source, date);
    }

    pub fn get(&self, source: DemographicSource) -> Option<&CalendarDate> {
        self.dates.get(&source)
    }

    /// Present sources in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (DemographicSource, &CalendarDate)> {
        self.dates.iter().map(|(source, date)| (*source, date))
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_iso_dates() {
        let date = CalendarDate::parse("2004-07-25").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2004, 7, 25));
        assert_eq!(date.to_string(), "2004-07-25");
        assert!(CalendarDate::parse("2000-02-29").is_some());
    }

    #[test]
    fn invalid_dates_fail_closed() {
        for raw in ["", "2023-02-30", "1999-02-29", "2023-13-01", "25-07-2004", "2004/07/25", "not a date"] {
            assert!(CalendarDate::parse(raw).is_none(), "{raw} should not parse");
        }
        assert!(CalendarDate::from_ymd(999, 1, 1).is_none());
    }

    #[test]
    fn tags_and_aliases_resolve() {
        assert_eq!(DemographicSource::from_tag("dob"), Some(DemographicSource::SelfDob));
        assert_eq!(DemographicSource::from_tag("spouse_dob"), Some(DemographicSource::PartnerDob));
        assert_eq!(DemographicSource::from_tag("Anniversary"), Some(DemographicSource::Anniversary));
        assert_eq!(DemographicSource::from_tag("pet_birthday"), None);
        let parsed: DemographicSource = serde_json::from_str("\"spouse_dob\"").unwrap();
        assert_eq!(parsed, DemographicSource::PartnerDob);
    }

    #[test]
    fn profile_drops_bad_entries() {
        let raw = raw_demographics_from_tags([
            ("dob", "2023-02-30"),
            ("spouse_dob", "1998-05-01"),
            ("anniversary", ""),
            ("nickname", "2001-01-01"),
        ]);
        assert_eq!(raw.len(), 3);

        let profile = DemographicProfile::from_raw(&raw);
        assert_eq!(profile.len(), 1);
        assert!(profile.get(DemographicSource::SelfDob).is_none());
        assert_eq!(profile.get(DemographicSource::PartnerDob).unwrap().to_string(), "1998-05-01");
    }

    #[test]
    fn profile_iterates_in_source_order() {
        let date = CalendarDate::parse("2001-01-01").unwrap();
        let profile = DemographicProfile::new()
            .with(DemographicSource::Anniversary, date)
            .with(DemographicSource::SelfDob, date);
        let order: Vec<_> = profile.iter().map(|(s, _)| s).collect();
        assert_eq!(order, vec![DemographicSource::SelfDob, DemographicSource::Anniversary]);
    }
}
