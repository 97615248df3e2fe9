use crate::error::CoreError;
use chrono::{Datelike, NaiveDateTime};
use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar-month bucket key, e.g. `2011-03`.
///
/// Both the revenue trend and the retention series group rows by this key,
/// so the bucketing rule lives in exactly one place. Ordering is by year,
/// then month, which matches the lexicographic order of the `YYYY-MM`
/// string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// The bucket a timestamp falls into.
    pub fn from_date(date: &NaiveDateTime) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoreError::InvalidMonthKey(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        Ok(Self { year, month })
    }
}

// Serialized as the `YYYY-MM` string so JSON consumers can sort and label
// months without knowing the struct layout.
impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn orders_by_year_then_month() {
        let a = MonthKey::new(2010, 12);
        let b = MonthKey::new(2011, 1);
        let c = MonthKey::new(2011, 11);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn displays_zero_padded() {
        assert_eq!(MonthKey::new(2011, 3).to_string(), "2011-03");
    }

    #[test]
    fn parses_display_form() {
        let key: MonthKey = "2011-03".parse().unwrap();
        assert_eq!(key, MonthKey::new(2011, 3));
        assert!("2011".parse::<MonthKey>().is_err());
        assert!("2011-13".parse::<MonthKey>().is_err());
        assert!("201x-03".parse::<MonthKey>().is_err());
    }

    #[test]
    fn buckets_timestamps_by_calendar_month() {
        let date = NaiveDate::from_ymd_opt(2011, 3, 28)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(MonthKey::from_date(&date), MonthKey::new(2011, 3));
    }

    #[test]
    fn serializes_as_string() {
        let json = serde_json::to_string(&MonthKey::new(2011, 3)).unwrap();
        assert_eq!(json, "\"2011-03\"");
        let back: MonthKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MonthKey::new(2011, 3));
    }
}
