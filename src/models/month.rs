//! Calendar months and budget date ranges
//!
//! A budget covers an inclusive run of calendar months. Each month is
//! addressed by a [`MonthKey`], rendered as "January 2024".

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Canonical identifier of one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Create a month key, returning `None` for a month outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month number, 1-based
    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of this month
    pub fn first_day(&self) -> NaiveDate {
        // month is always 1..=12 and day 1 exists in every month
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// The following month
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Full English month name
    pub fn month_name(&self) -> &'static str {
        Month::try_from(self.month as u8)
            .map(|m| m.name())
            .unwrap_or("January")
    }

    /// Short label used in narrow columns, e.g. "Jan 24"
    pub fn short_label(&self) -> String {
        format!("{} {:02}", &self.month_name()[..3], self.year.rem_euclid(100))
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

impl FromStr for MonthKey {
    type Err = PeriodError;

    /// Accepts "January 2024" or "2024-01"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || PeriodError::InvalidFormat(s.to_string());

        if let Some((name, year)) = s.rsplit_once(' ') {
            let month: Month = name.parse().map_err(|_| invalid())?;
            let year: i32 = year.parse().map_err(|_| invalid())?;
            return Ok(Self {
                year,
                month: month.number_from_month(),
            });
        }

        if let Some((year, month)) = s.split_once('-') {
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            return Self::new(year, month).ok_or(PeriodError::InvalidMonth(month));
        }

        Err(invalid())
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive range of months covered by a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetPeriod {
    start_month: NaiveDate,
    end_month: NaiveDate,
}

impl BudgetPeriod {
    /// Create a period; both dates are normalized to the first of their month
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, PeriodError> {
        let start_month = MonthKey::from_date(start).first_day();
        let end_month = MonthKey::from_date(end).first_day();
        if start_month > end_month {
            return Err(PeriodError::Inverted);
        }
        Ok(Self {
            start_month,
            end_month,
        })
    }

    /// Period covering two month keys
    pub fn between(start: MonthKey, end: MonthKey) -> Result<Self, PeriodError> {
        Self::new(start.first_day(), end.first_day())
    }

    /// January through December of `year`
    pub fn calendar_year(year: i32) -> Self {
        let start = MonthKey { year, month: 1 };
        let end = MonthKey { year, month: 12 };
        Self {
            start_month: start.first_day(),
            end_month: end.first_day(),
        }
    }

    pub fn start_month(&self) -> NaiveDate {
        self.start_month
    }

    pub fn end_month(&self) -> NaiveDate {
        self.end_month
    }

    /// Every month in the period, in calendar order
    pub fn months(&self) -> Vec<MonthKey> {
        let last = MonthKey::from_date(self.end_month);
        let mut current = MonthKey::from_date(self.start_month);
        let mut months = Vec::new();
        while current <= last {
            months.push(current);
            current = current.next();
        }
        months
    }

    /// Check if a month falls inside the period
    pub fn contains(&self, month: MonthKey) -> bool {
        month >= MonthKey::from_date(self.start_month) && month <= MonthKey::from_date(self.end_month)
    }
}

impl Default for BudgetPeriod {
    fn default() -> Self {
        Self::calendar_year(2024)
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            MonthKey::from_date(self.start_month),
            MonthKey::from_date(self.end_month)
        )
    }
}

/// Error type for month and period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    InvalidFormat(String),
    InvalidMonth(u32),
    Inverted,
}

impl fmt::Display for PeriodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            Self::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
            Self::Inverted => write!(f, "Start month must not be after end month"),
        }
    }
}

impl std::error::Error for PeriodError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(year: i32, month: u32) -> MonthKey {
        MonthKey::new(year, month).unwrap()
    }

    #[test]
    fn test_month_key_display() {
        assert_eq!(key(2024, 1).to_string(), "January 2024");
        assert_eq!(key(2025, 12).to_string(), "December 2025");
        assert_eq!(key(2024, 3).short_label(), "Mar 24");
    }

    #[test]
    fn test_month_key_parse() {
        assert_eq!("January 2024".parse::<MonthKey>().unwrap(), key(2024, 1));
        assert_eq!("2024-02".parse::<MonthKey>().unwrap(), key(2024, 2));
        assert_eq!(
            "2024-13".parse::<MonthKey>(),
            Err(PeriodError::InvalidMonth(13))
        );
        assert!("Smarch 2024".parse::<MonthKey>().is_err());
    }

    #[test]
    fn test_month_key_ordering_spans_years() {
        assert!(key(2023, 12) < key(2024, 1));
        assert_eq!(key(2023, 12).next(), key(2024, 1));
    }

    #[test]
    fn test_period_normalizes_to_first_of_month() {
        let period = BudgetPeriod::new(
            NaiveDate::from_ymd_opt(2024, 2, 17).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        )
        .unwrap();
        assert_eq!(
            period.start_month(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert_eq!(period.months(), vec![key(2024, 2), key(2024, 3), key(2024, 4)]);
    }

    #[test]
    fn test_period_rejects_inverted_range() {
        let result = BudgetPeriod::between(key(2024, 5), key(2024, 4));
        assert_eq!(result, Err(PeriodError::Inverted));
    }

    #[test]
    fn test_single_month_period() {
        let period = BudgetPeriod::between(key(2024, 7), key(2024, 7)).unwrap();
        assert_eq!(period.months(), vec![key(2024, 7)]);
    }

    #[test]
    fn test_period_across_year_boundary() {
        let period = BudgetPeriod::between(key(2024, 11), key(2025, 2)).unwrap();
        let labels: Vec<String> = period.months().iter().map(|m| m.to_string()).collect();
        assert_eq!(
            labels,
            vec!["November 2024", "December 2024", "January 2025", "February 2025"]
        );
        assert!(period.contains(key(2025, 1)));
        assert!(!period.contains(key(2025, 3)));
    }

    #[test]
    fn test_default_period_is_2024() {
        assert_eq!(BudgetPeriod::default().months().len(), 12);
    }

    #[test]
    fn test_month_key_serializes_as_string() {
        let json = serde_json::to_string(&key(2024, 1)).unwrap();
        assert_eq!(json, "\"January 2024\"");
    }
}
