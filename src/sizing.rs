//! # Sizing Module
//!
//! Converts two body measurements into a bra size label and validates the
//! measurements users type into the chat.
//!
//! The band comes from the underbust rounded to the nearest multiple of 5 and
//! halved; the cup comes from the bust/underbust difference matched against a
//! fixed table:
//!
//! | difference (cm) | cup |
//! |-----------------|-----|
//! | 10              | A   |
//! | 12              | B   |
//! | 14              | C   |
//! | 16              | D   |
//! | 18              | DD  |

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::MeasurementError;

/// Smallest measurement accepted, in centimetres
pub const MIN_MEASUREMENT_CM: u32 = 40;
/// Largest measurement accepted, in centimetres
pub const MAX_MEASUREMENT_CM: u32 = 200;

// Integer with optional "cm" suffix, e.g. "70", " 70 cm", "70CM"
pub const MEASUREMENT_PATTERN: &str = r"(?i)^\s*(\d{1,6})\s*(?:cm)?\s*$";

lazy_static! {
    pub static ref MEASUREMENT_REGEX: Regex =
        Regex::new(MEASUREMENT_PATTERN).expect("Measurement pattern should be valid");
}

/// Cup letter of a size label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cup {
    A,
    B,
    C,
    D,
    DD,
}

/// Cup lookup table, in ascending difference order.
///
/// Ascending order is load-bearing: ties resolve to the first entry scanned.
pub const CUP_TABLE: [(i64, Cup); 5] = [
    (10, Cup::A),
    (12, Cup::B),
    (14, Cup::C),
    (16, Cup::D),
    (18, Cup::DD),
];

impl Cup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cup::A => "A",
            Cup::B => "B",
            Cup::C => "C",
            Cup::D => "D",
            Cup::DD => "DD",
        }
    }

    /// Nearest cup for a bust/underbust difference, preferring the smaller cup on ties
    pub fn from_difference(diff: i64) -> Cup {
        let mut best = CUP_TABLE[0];
        for entry in CUP_TABLE.iter().skip(1) {
            if (entry.0 - diff).abs() < (best.0 - diff).abs() {
                best = *entry;
            }
        }
        best.1
    }
}

impl fmt::Display for Cup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed size such as `35C`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SizeLabel {
    /// `floor(band / 2)`
    pub band: u32,
    pub cup: Cup,
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.band, self.cup)
    }
}

/// Round the underbust to the nearest multiple of 5 cm.
///
/// Integer input divided by 5 never has a fractional part of exactly .5, so
/// round-half-up and round-half-even agree on every input.
pub fn band_cm(underbust_cm: u32) -> u32 {
    (underbust_cm + 2) / 5 * 5
}

/// Compute the size label for an underbust and bust measurement in cm
///
/// # Examples
///
/// ```rust
/// use perfect_fit::sizing::calculate_size;
///
/// assert_eq!(calculate_size(70, 84).to_string(), "35C");
/// assert_eq!(calculate_size(75, 93).to_string(), "37DD");
/// ```
pub fn calculate_size(underbust_cm: u32, bust_cm: u32) -> SizeLabel {
    let band = band_cm(underbust_cm);
    let diff = i64::from(bust_cm) - i64::from(underbust_cm);

    SizeLabel {
        band: band / 2,
        cup: Cup::from_difference(diff),
    }
}

/// Parse a measurement typed by the user
pub fn parse_measurement(input: &str) -> Result<u32, MeasurementError> {
    let captures = MEASUREMENT_REGEX
        .captures(input)
        .ok_or(MeasurementError::NotANumber)?;

    let value: u32 = captures[1]
        .parse()
        .map_err(|_| MeasurementError::NotANumber)?;

    if value == 0 {
        return Err(MeasurementError::NotPositive);
    }

    if !(MIN_MEASUREMENT_CM..=MAX_MEASUREMENT_CM).contains(&value) {
        return Err(MeasurementError::OutOfRange {
            value,
            min: MIN_MEASUREMENT_CM,
            max: MAX_MEASUREMENT_CM,
        });
    }

    Ok(value)
}

/// Check the bust against the stored underbust
pub fn validate_bust(underbust_cm: u32, bust_cm: u32) -> Result<u32, MeasurementError> {
    if bust_cm <= underbust_cm {
        return Err(MeasurementError::BustNotAboveUnderbust {
            underbust: underbust_cm,
            bust: bust_cm,
        });
    }
    Ok(bust_cm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_sizes() {
        assert_eq!(calculate_size(70, 84).to_string(), "35C");
        assert_eq!(calculate_size(75, 93).to_string(), "37DD");
    }

    #[test]
    fn test_band_rounding() {
        assert_eq!(band_cm(70), 70);
        assert_eq!(band_cm(72), 70);
        assert_eq!(band_cm(73), 75);
        assert_eq!(band_cm(77), 75);
        assert_eq!(band_cm(78), 80);
    }

    #[test]
    fn test_cup_ties_prefer_smaller_cup() {
        assert_eq!(Cup::from_difference(11), Cup::A);
        assert_eq!(Cup::from_difference(13), Cup::B);
        assert_eq!(Cup::from_difference(17), Cup::D);
    }

    #[test]
    fn test_cup_outside_table_clamps() {
        assert_eq!(Cup::from_difference(2), Cup::A);
        assert_eq!(Cup::from_difference(-5), Cup::A);
        assert_eq!(Cup::from_difference(30), Cup::DD);
    }

    #[test]
    fn test_parse_measurement() {
        assert_eq!(parse_measurement("70"), Ok(70));
        assert_eq!(parse_measurement("  84 cm "), Ok(84));
        assert_eq!(parse_measurement("90CM"), Ok(90));
        assert_eq!(parse_measurement("seventy"), Err(MeasurementError::NotANumber));
        assert_eq!(parse_measurement("-70"), Err(MeasurementError::NotANumber));
        assert_eq!(parse_measurement("70.5"), Err(MeasurementError::NotANumber));
        assert_eq!(parse_measurement(""), Err(MeasurementError::NotANumber));
        assert_eq!(parse_measurement("0"), Err(MeasurementError::NotPositive));
        assert!(matches!(
            parse_measurement("7"),
            Err(MeasurementError::OutOfRange { value: 7, .. })
        ));
        assert!(matches!(
            parse_measurement("999999"),
            Err(MeasurementError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_bust() {
        assert_eq!(validate_bust(70, 84), Ok(84));
        assert!(validate_bust(70, 70).is_err());
        assert!(validate_bust(80, 75).is_err());
    }
}
