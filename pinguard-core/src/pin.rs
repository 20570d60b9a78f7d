// pinguard-core/src/pin.rs
//! PIN length selection and strict format validation.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{PinFormatViolation, PinGuardError};

/// The two supported PIN lengths. Fixed for the lifetime of an evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum PinLength {
    Four,
    Six,
}

static FOUR_DIGIT_SPLITS: &[&[usize]] = &[&[2, 2]];
static SIX_DIGIT_SPLITS: &[&[usize]] = &[&[2, 2, 2], &[2, 4], &[4, 2]];

impl PinLength {
    pub const ALL: [PinLength; 2] = [PinLength::Four, PinLength::Six];

    /// Number of digits in a PIN of this length.
    pub fn digits(self) -> usize {
        match self {
            PinLength::Four => 4,
            PinLength::Six => 6,
        }
    }

    pub fn from_digits(digits: usize) -> Result<Self, PinGuardError> {
        match digits {
            4 => Ok(PinLength::Four),
            6 => Ok(PinLength::Six),
            other => Err(PinGuardError::UnsupportedPinLength(other)),
        }
    }

    /// The part-length splits used to assemble multi-part candidates.
    /// Every split sums to [`PinLength::digits`].
    pub fn part_splits(self) -> &'static [&'static [usize]] {
        match self {
            PinLength::Four => FOUR_DIGIT_SPLITS,
            PinLength::Six => SIX_DIGIT_SPLITS,
        }
    }
}

impl TryFrom<usize> for PinLength {
    type Error = PinGuardError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        PinLength::from_digits(value)
    }
}

impl From<PinLength> for usize {
    fn from(length: PinLength) -> Self {
        length.digits()
    }
}

impl fmt::Display for PinLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.digits())
    }
}

/// Checks that `pin` is non-empty, exactly `length` characters long and made
/// only of ASCII digits.
pub fn validate_pin_format(pin: &str, length: PinLength) -> Result<(), PinGuardError> {
    let expected = length.digits();
    let fail = |reason| Err(PinGuardError::InvalidPinFormat { expected, reason });

    if pin.is_empty() {
        return fail(PinFormatViolation::Empty);
    }

    let actual = pin.chars().count();
    if actual != expected {
        return fail(PinFormatViolation::WrongLength { actual });
    }

    if let Some((position, character)) = pin.chars().enumerate().find(|(_, c)| !c.is_ascii_digit()) {
        return fail(PinFormatViolation::NonDigit { position, character });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_sum_to_length() {
        for length in PinLength::ALL {
            for split in length.part_splits() {
                assert_eq!(split.iter().sum::<usize>(), length.digits());
            }
        }
    }

    #[test]
    fn only_four_and_six_are_supported() {
        assert_eq!(PinLength::from_digits(4).unwrap(), PinLength::Four);
        assert_eq!(PinLength::try_from(6).unwrap(), PinLength::Six);
        assert!(matches!(PinLength::from_digits(5), Err(PinGuardError::UnsupportedPinLength(5))));
    }

    #[test]
    fn format_violations_are_reported_precisely() {
        let check = |pin: &str| match validate_pin_format(pin, PinLength::Four) {
            Err(PinGuardError::InvalidPinFormat { reason, .. }) => Some(reason),
            _ => None,
        };
        assert_eq!(check(""), Some(PinFormatViolation::Empty));
        assert_eq!(check("123"), Some(PinFormatViolation::WrongLength { actual: 3 }));
        assert_eq!(check("12345"), Some(PinFormatViolation::WrongLength { actual: 5 }));
        assert_eq!(check("12a4"), Some(PinFormatViolation::NonDigit { position: 2, character: 'a' }));
        assert_eq!(check("12 4"), Some(PinFormatViolation::NonDigit { position: 2, character: ' ' }));
        assert_eq!(check("1234"), None);
    }

    #[test]
    fn unicode_digits_are_rejected() {
        // Arabic-Indic digits are numeric but not ASCII.
        assert!(validate_pin_format("١٢٣٤", PinLength::Four).is_err());
    }

    #[test]
    fn serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&PinLength::Six).unwrap(), "6");
        let parsed: PinLength = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, PinLength::Four);
        assert!(serde_json::from_str::<PinLength>("5").is_err());
    }
}
