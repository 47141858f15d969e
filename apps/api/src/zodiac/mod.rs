//! Zodiac classification: maps a birth date to one of the twelve sun signs.
//!
//! Classification only looks at (month, day). The year is validated as part of
//! the calendar date but otherwise ignored.

pub mod traits;

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use thiserror::Error;

pub use traits::{base_prediction, traits, Element, SignTraits};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZodiacError {
    #[error("Invalid date format: {0}. Expected YYYY-MM-DD")]
    InvalidDate(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
    /// Sentinel for labels outside the twelve signs.
    Unknown,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
            ZodiacSign::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ZodiacSign {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// (sign, (start_month, start_day), (end_month, end_day)), both ends inclusive.
/// Capricorn is the only range that wraps the year boundary.
const ZODIAC_RANGES: [(ZodiacSign, (u32, u32), (u32, u32)); 12] = [
    (ZodiacSign::Capricorn, (12, 22), (1, 19)),
    (ZodiacSign::Aquarius, (1, 20), (2, 18)),
    (ZodiacSign::Pisces, (2, 19), (3, 20)),
    (ZodiacSign::Aries, (3, 21), (4, 19)),
    (ZodiacSign::Taurus, (4, 20), (5, 20)),
    (ZodiacSign::Gemini, (5, 21), (6, 20)),
    (ZodiacSign::Cancer, (6, 21), (7, 22)),
    (ZodiacSign::Leo, (7, 23), (8, 22)),
    (ZodiacSign::Virgo, (8, 23), (9, 22)),
    (ZodiacSign::Libra, (9, 23), (10, 22)),
    (ZodiacSign::Scorpio, (10, 23), (11, 21)),
    (ZodiacSign::Sagittarius, (11, 22), (12, 21)),
];

/// Parses a strict `YYYY-MM-DD` calendar date.
///
/// chrono alone accepts single-digit months and days, so the shape is checked
/// first: ten ASCII characters with dashes at positions 4 and 7.
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, ZodiacError> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() });

    if !well_formed {
        return Err(ZodiacError::InvalidDate(raw.to_string()));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ZodiacError::InvalidDate(raw.to_string()))
}

/// Classifies a `YYYY-MM-DD` date string.
pub fn classify(raw: &str) -> Result<ZodiacSign, ZodiacError> {
    let date = parse_birth_date(raw)?;
    Ok(sign_for_date(date))
}

pub fn sign_for_date(date: NaiveDate) -> ZodiacSign {
    sign_for_month_day(date.month(), date.day())
}

fn sign_for_month_day(month: u32, day: u32) -> ZodiacSign {
    for (sign, (start_month, start_day), (end_month, end_day)) in ZODIAC_RANGES {
        let matched = if start_month == 12 {
            (month == 12 && day >= start_day) || (month == 1 && day <= end_day)
        } else {
            (month == start_month && day >= start_day) || (month == end_month && day <= end_day)
        };

        if matched {
            return sign;
        }
    }

    ZodiacSign::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_dates() {
        assert_eq!(classify("1995-08-20").unwrap(), ZodiacSign::Leo);
        assert_eq!(classify("2000-03-21").unwrap(), ZodiacSign::Aries);
        assert_eq!(classify("2000-12-22").unwrap(), ZodiacSign::Capricorn);
        assert_eq!(classify("2000-01-20").unwrap(), ZodiacSign::Aquarius);
        assert_eq!(classify("2000-07-23").unwrap(), ZodiacSign::Leo);
    }

    #[test]
    fn test_capricorn_wraps_the_year() {
        assert_eq!(classify("1990-12-22").unwrap(), ZodiacSign::Capricorn);
        assert_eq!(classify("1990-12-31").unwrap(), ZodiacSign::Capricorn);
        assert_eq!(classify("1991-01-01").unwrap(), ZodiacSign::Capricorn);
        assert_eq!(classify("1991-01-19").unwrap(), ZodiacSign::Capricorn);
        assert_eq!(classify("1991-01-20").unwrap(), ZodiacSign::Aquarius);
        assert_eq!(classify("1990-12-21").unwrap(), ZodiacSign::Sagittarius);
    }

    #[test]
    fn test_every_day_of_a_leap_year_is_a_known_sign() {
        let mut date = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2000, 12, 31).unwrap();
        while date <= end {
            let sign = sign_for_date(date);
            assert!(
                ZodiacSign::ALL.contains(&sign),
                "{date} classified as {sign}"
            );
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_classify_is_deterministic() {
        let first = classify("1987-05-21").unwrap();
        for _ in 0..10 {
            assert_eq!(classify("1987-05-21").unwrap(), first);
        }
        assert_eq!(first, ZodiacSign::Gemini);
    }

    #[test]
    fn test_malformed_dates_are_rejected() {
        for raw in ["invalid-date", "1995/08/20", "08-20-1995", "1995-8-20", "", "2001-02-29", "1995-13-01"] {
            assert_eq!(
                classify(raw),
                Err(ZodiacError::InvalidDate(raw.to_string())),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_sign_serializes_as_label() {
        let json = serde_json::to_string(&ZodiacSign::Sagittarius).unwrap();
        assert_eq!(json, "\"Sagittarius\"");
    }
}
