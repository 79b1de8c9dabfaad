//! Calendar days without a time-of-day component.
//!
//! All comparisons go through the day ordinal (days since the common era),
//! so month and year rollover, leap days and DST shifts never affect them.

use crate::errors::HabitError;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

pub const DEFAULT_WINDOW_DAYS: usize = 35;

/// Largest calendar window served over HTTP or accepted from configuration.
pub const MAX_WINDOW_DAYS: usize = 3_660;

const DAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

impl Day {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses a strict `YYYY-MM-DD` string.
    pub fn parse(value: &str) -> Result<Self, HabitError> {
        let bytes = value.as_bytes();
        let shaped = bytes.len() == 10
            && bytes.iter().enumerate().all(|(idx, byte)| match idx {
                4 | 7 => *byte == b'-',
                _ => byte.is_ascii_digit(),
            });
        if !shaped {
            return Err(HabitError::InvalidDate(value.to_string()));
        }

        NaiveDate::parse_from_str(value, DAY_FORMAT)
            .map(Self)
            .map_err(|_| HabitError::InvalidDate(value.to_string()))
    }

    /// The calendar day in the local zone of the running process.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    pub fn ordinal(self) -> i32 {
        self.0.num_days_from_ce()
    }

    pub fn pred(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// True when `self` falls exactly one calendar day after `prev`.
    pub fn is_next_after(self, prev: Day) -> bool {
        self.ordinal() - prev.ordinal() == 1
    }

    pub(crate) fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Day {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_FORMAT))
    }
}

impl FromStr for Day {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Day::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// The `n` calendar days ending at and including `as_of`, ascending.
/// Stops early at the first representable date.
pub fn generate_day_window(as_of: Day, n: usize) -> Vec<Day> {
    let mut days: Vec<Day> = std::iter::successors(Some(as_of), |day| day.pred())
        .take(n)
        .collect();
    days.reverse();
    days
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(value: &str) -> Day {
        Day::parse(value).unwrap()
    }

    #[test]
    fn parse_accepts_zero_padded_iso_days() {
        let parsed = day("2024-02-29");
        assert_eq!(parsed, Day::from_ymd(2024, 2, 29).unwrap());
        assert_eq!(parsed.to_string(), "2024-02-29");
    }

    #[test]
    fn parse_rejects_malformed_days() {
        for raw in [
            "",
            "2024-1-05",
            "2024-01-5",
            "24-01-05",
            "2024/01/05",
            "2024-01-05T00:00",
            "2023-02-29",
            "2024-13-01",
            "+024-01-05",
        ] {
            assert!(
                matches!(Day::parse(raw), Err(HabitError::InvalidDate(_))),
                "accepted {raw:?}"
            );
        }
    }

    #[test]
    fn next_day_spans_leap_day_and_month_end() {
        assert!(day("2024-02-29").is_next_after(day("2024-02-28")));
        assert!(day("2023-03-01").is_next_after(day("2023-02-28")));
        assert!(day("2024-01-01").is_next_after(day("2023-12-31")));
        assert!(!day("2024-03-01").is_next_after(day("2024-02-28")));
        assert!(!day("2024-02-28").is_next_after(day("2024-02-28")));
    }

    #[test]
    fn window_crosses_year_boundary() {
        let window = generate_day_window(day("2024-01-05"), 10);
        let rendered: Vec<String> = window.iter().map(ToString::to_string).collect();
        assert_eq!(rendered.len(), 10);
        assert_eq!(rendered.first().map(String::as_str), Some("2023-12-27"));
        assert_eq!(rendered.last().map(String::as_str), Some("2024-01-05"));
        assert!(window.windows(2).all(|pair| pair[1].is_next_after(pair[0])));
    }

    #[test]
    fn window_default_and_empty() {
        assert_eq!(generate_day_window(day("2024-06-15"), DEFAULT_WINDOW_DAYS).len(), 35);
        assert!(generate_day_window(day("2024-06-15"), 0).is_empty());
    }

    #[test]
    fn window_with_huge_count_stops_at_first_date() {
        let near_start = Day::from(NaiveDate::MIN + chrono::Duration::days(2));
        let window = generate_day_window(near_start, usize::MAX);
        assert_eq!(window.len(), 3);
        assert_eq!(window[0], Day::from(NaiveDate::MIN));
        assert_eq!(window.last(), Some(&near_start));

        assert_eq!(generate_day_window(day("2024-01-05"), 100_000).len(), 100_000);
    }

    #[test]
    fn serde_uses_day_string() {
        let json = serde_json::to_string(&day("2024-06-15")).unwrap();
        assert_eq!(json, "\"2024-06-15\"");
        let back: Day = serde_json::from_str(&json).unwrap();
        assert_eq!(back, day("2024-06-15"));
        assert!(serde_json::from_str::<Day>("\"2024-6-15\"").is_err());
    }
}
