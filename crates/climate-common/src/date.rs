//! Calendar date handling for observation queries.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Fixed wire format for observation dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raised when a date string does not match the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{0}': expected yyyy-mm-dd")]
pub struct DateParseError(pub String);

/// A calendar date in the dataset's `yyyy-mm-dd` wire form.
///
/// Stored dates are hyphen-separated and zero-padded, so their
/// lexicographic order matches chronological order and SQL range filters
/// compare the rendered form directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObservationDate(NaiveDate);

impl ObservationDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parse a `yyyy-mm-dd` string. Out-of-range components are rejected.
    pub fn parse(s: &str) -> Result<Self, DateParseError> {
        NaiveDate::parse_from_str(s, DATE_FORMAT)
            .map(Self)
            .map_err(|_| DateParseError(s.to_string()))
    }

    /// The date `days` days earlier.
    pub fn minus_days(&self, days: i64) -> Self {
        Self(self.0 - Duration::days(days))
    }

    pub fn inner(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for ObservationDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl FromStr for ObservationDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ObservationDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObservationDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}
