use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Month, NaiveDate, Utc};

/// A calendar month, parsed from `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, ParseMonthError> {
        if !(1..=12).contains(&month) {
            return Err(ParseMonthError::MonthOutOfRange(month));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: &DateTime<Utc>) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns true if the timestamp falls in this calendar month.
    pub fn contains(&self, date: &DateTime<Utc>) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// English month name, e.g. "March".
    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("Unknown")
    }
}

impl FromStr for YearMonth {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (year_str, month_str) = s
            .split_once('-')
            .ok_or_else(|| ParseMonthError::InvalidFormat(s.to_string()))?;

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year_str.len() != 4
            || month_str.len() != 2
            || !all_digits(year_str)
            || !all_digits(month_str)
        {
            return Err(ParseMonthError::InvalidFormat(s.to_string()));
        }

        let month: u32 = month_str
            .parse()
            .map_err(|_| ParseMonthError::InvalidFormat(s.to_string()))?;
        if !(1..=12).contains(&month) {
            return Err(ParseMonthError::MonthOutOfRange(month));
        }

        let first_day = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map_err(|_| ParseMonthError::InvalidFormat(s.to_string()))?;
        Ok(Self {
            year: first_day.year(),
            month: first_day.month(),
        })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseMonthError {
    InvalidFormat(String),
    MonthOutOfRange(u32),
}

impl fmt::Display for ParseMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseMonthError::InvalidFormat(input) => {
                write!(f, "invalid month '{}', expected YYYY-MM", input)
            }
            ParseMonthError::MonthOutOfRange(month) => {
                write!(f, "month {} is out of range (01-12)", month)
            }
        }
    }
}

impl std::error::Error for ParseMonthError {}
