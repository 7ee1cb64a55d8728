//! Day-of-year sales bucket key.

use core::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

const DAY_KEY_PREFIX: &str = "Day-";

/// Ordinal time index for a product's sales series.
///
/// Renders as `"Day-<n>"` with `n` the unpadded day of year (1-366). This is
/// the on-disk key format of `historical_sales`, so rendering and parsing
/// must round-trip exactly: no zero padding, no other separators.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(u16);

impl DayKey {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 366;

    pub fn new(day_of_year: u16) -> DomainResult<Self> {
        if !(Self::MIN..=Self::MAX).contains(&day_of_year) {
            return Err(DomainError::invalid_id(format!(
                "DayKey: day of year out of range: {day_of_year}"
            )));
        }
        Ok(Self(day_of_year))
    }

    /// Key of the calendar day the timestamp falls on.
    pub fn from_date(at: DateTime<Utc>) -> Self {
        // chrono ordinals are 1-based and never exceed 366.
        Self(at.ordinal() as u16)
    }

    pub fn day_of_year(&self) -> u16 {
        self.0
    }
}

impl core::fmt::Display for DayKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{DAY_KEY_PREFIX}{}", self.0)
    }
}

impl FromStr for DayKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix(DAY_KEY_PREFIX)
            .ok_or_else(|| DomainError::malformed_series_key(s))?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::malformed_series_key(s));
        }
        // Padded keys are rejected: "Day-07" must not alias "Day-7".
        if digits.len() > 1 && digits.starts_with('0') {
            return Err(DomainError::malformed_series_key(s));
        }
        let day_of_year: u16 = digits
            .parse()
            .map_err(|_| DomainError::malformed_series_key(s))?;
        Self::new(day_of_year).map_err(|_| DomainError::malformed_series_key(s))
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for DayKey {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renders_unpadded() {
        assert_eq!(DayKey::new(7).unwrap().to_string(), "Day-7");
        assert_eq!(DayKey::new(366).unwrap().to_string(), "Day-366");
    }

    #[test]
    fn parses_what_it_renders() {
        for day in [1u16, 9, 10, 99, 100, 365, 366] {
            let key = DayKey::new(day).unwrap();
            let parsed: DayKey = key.to_string().parse().unwrap();
            assert_eq!(parsed, key);
        }
    }

    #[test]
    fn rejects_padded_keys() {
        for s in ["Day-07", "Day-007", "Day-012"] {
            assert!(matches!(
                s.parse::<DayKey>(),
                Err(DomainError::MalformedSeriesKey(_))
            ));
        }
    }

    #[test]
    fn rejects_out_of_range() {
        for s in ["Day-0", "Day-367", "Day-9999"] {
            assert!(matches!(
                s.parse::<DayKey>(),
                Err(DomainError::MalformedSeriesKey(_))
            ));
        }
    }

    #[test]
    fn rejects_other_shapes() {
        for s in ["day-1", "Day 1", "Day-", "Day-1a", "D-1", "1", "Day--1"] {
            assert!(
                matches!(s.parse::<DayKey>(), Err(DomainError::MalformedSeriesKey(_))),
                "expected {s:?} to be rejected"
            );
        }
    }

    #[test]
    fn from_date_uses_the_ordinal_day() {
        let feb_first = Utc.with_ymd_and_hms(2025, 2, 1, 12, 30, 0).unwrap();
        assert_eq!(DayKey::from_date(feb_first).day_of_year(), 32);
        assert_eq!(DayKey::from_date(feb_first).to_string(), "Day-32");
    }
}
