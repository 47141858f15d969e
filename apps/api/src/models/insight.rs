use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::zodiac::{parse_birth_date, ZodiacSign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = BirthValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Language::En),
            "hi" => Ok(Language::Hi),
            other => Err(BirthValidationError::Language(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BirthValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("birth_date must be in YYYY-MM-DD format")]
    BirthDate,

    #[error("birth_time must be in HH:MM format (24-hour)")]
    BirthTime,

    #[error("language must be either \"en\" or \"hi\" (got \"{0}\")")]
    Language(String),
}

/// Raw birth details as received on the wire (JSON body or query string).
#[derive(Debug, Clone, Deserialize)]
pub struct BirthRequest {
    pub name: String,
    pub birth_date: String,
    pub birth_time: String,
    pub birth_place: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// Birth details that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedBirth {
    pub name: String,
    /// The original `YYYY-MM-DD` string; cache and profile keys are derived from it.
    pub birth_date: String,
    pub date: NaiveDate,
    pub birth_place: String,
    pub language: Language,
}

impl BirthRequest {
    pub fn validate(self) -> Result<ValidatedBirth, BirthValidationError> {
        if self.name.trim().is_empty() {
            return Err(BirthValidationError::EmptyName);
        }

        let date =
            parse_birth_date(&self.birth_date).map_err(|_| BirthValidationError::BirthDate)?;
        parse_birth_time(&self.birth_time)?;
        let language = match self.language.as_deref() {
            None => Language::En,
            Some(raw) => raw.parse()?,
        };

        Ok(ValidatedBirth {
            name: self.name,
            birth_date: self.birth_date,
            date,
            birth_place: self.birth_place,
            language,
        })
    }
}

/// Accepts `HH:MM`, and `HH:MM:SS` for clients that send seconds.
fn parse_birth_time(raw: &str) -> Result<NaiveTime, BirthValidationError> {
    let format = match raw.len() {
        5 => "%H:%M",
        8 => "%H:%M:%S",
        _ => return Err(BirthValidationError::BirthTime),
    };
    if !raw.is_ascii() || raw.as_bytes()[2] != b':' {
        return Err(BirthValidationError::BirthTime);
    }
    NaiveTime::parse_from_str(raw, format).map_err(|_| BirthValidationError::BirthTime)
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightResponse {
    pub zodiac: ZodiacSign,
    pub insight: String,
    pub language: Language,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ZodiacResponse {
    pub birth_date: String,
    pub zodiac: ZodiacSign,
}
