use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format the match center expects in its `date` query parameter.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("No date given. Expected a date like 'MM/DD/YYYY'")]
pub struct DateParseError;

/// A date exactly as the user typed it, minus surrounding whitespace.
///
/// Only blank input is rejected. Anything else is forwarded to the site
/// verbatim; [`MatchDate::is_well_formed`] lets callers warn about it first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDate(String);

impl MatchDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_well_formed(&self) -> bool {
        NaiveDate::parse_from_str(&self.0, DATE_FORMAT).is_ok()
    }
}

impl FromStr for MatchDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DateParseError);
        }
        Ok(MatchDate(s.to_string()))
    }
}

impl Display for MatchDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One finished match as listed on the match center page.
///
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "نوع البطوله")]
    pub tournament: String,
    #[serde(rename = "الفريق الاول")]
    pub team_a: String,
    #[serde(rename = "الفريق التاني")]
    pub team_b: String,
    #[serde(rename = "ميعاد المباراه")]
    pub time: String,
    #[serde(rename = "النتيجه")]
    pub score: String,
}

impl Display for MatchRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} vs {} | {} | {}",
            self.tournament, self.team_a, self.team_b, self.time, self.score
        )
    }
}
