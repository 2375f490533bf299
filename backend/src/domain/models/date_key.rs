use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::domain::calendar::days_in_month;

/// Identifier of one calendar date inside an owner's calendar.
///
/// The textual form is `"{year}-{month+1}-{day}"` without zero padding, e.g.
/// `2024-1-15`. Ordering follows the calendar, not the string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey {
    year: i32,
    month0: u32,
    day: u32,
    key: String,
}

impl DateKey {
    /// Build a key from a zero-based month
    pub fn new(year: i32, month0: u32, day: u32) -> Self {
        Self {
            year,
            month0,
            day,
            key: format!("{}-{}-{}", year, month0 + 1, day),
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month0(), date.day())
    }

    /// Parse the canonical unpadded form. Rejects padding, out-of-range
    /// months and days that do not exist in the given month.
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, rest) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let mut parts = rest.split('-');
        let year = parse_component(parts.next()?)?;
        let month = parse_component(parts.next()?)?;
        let day = parse_component(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }

        let year = i32::try_from(if negative { -year } else { year }).ok()?;
        if negative && year == 0 {
            return None;
        }
        if !(1..=12).contains(&month) {
            return None;
        }
        let month0 = (month - 1) as u32;
        let day = u32::try_from(day).ok()?;
        if day == 0 || day > days_in_month(year, month0) {
            return None;
        }

        Some(Self::new(year, month0, day))
    }

    /// Calendar date, `None` outside chrono's supported range
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, self.day)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month
    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    pub fn into_string(self) -> String {
        self.key
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Digits only, no leading zeros
fn parse_component(part: &str) -> Option<i64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if part.len() > 1 && part.starts_with('0') {
        return None;
    }
    part.parse().ok()
}
