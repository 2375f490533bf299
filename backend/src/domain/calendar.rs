//! Calendar domain logic for the booking calendar.
//!
//! Grid generation, month navigation and per-day display classification.
//! Everything here is pure: callers pass in the month, the availability map
//! and "today", and get back values to render.
//!
//! Arithmetic is proleptic Gregorian and total over every `i32` year, so
//! month navigation never fails however far it is pushed.

use chrono::{Datelike, NaiveDate};
use log::debug;
use shared::{AvailabilityState, CalendarGrid, DaySlot, DisplayClass, MonthCursor};

use crate::domain::models::{AvailabilityMap, DateKey};

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const WEEKDAY_HEADERS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Number of days in a zero-based month
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// Weekday of the 1st of a zero-based month (0 = Sunday)
pub fn first_weekday(year: i32, month0: u32) -> u32 {
    weekday_of(year, month0 + 1, 1)
}

/// Sakamoto's method with floor division so negative years work
fn weekday_of(year: i32, month: u32, day: u32) -> u32 {
    const OFFSETS: [i64; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let mut y = i64::from(year);
    if month < 3 {
        y -= 1;
    }
    let index = (month.clamp(1, 12) - 1) as usize;
    let total = y + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
        + OFFSETS[index]
        + i64::from(day);
    total.rem_euclid(7) as u32
}

/// Move `delta` months from a zero-based month, carrying into the year.
///
/// `month` itself may be out of range; the result is always normalized.
/// Years saturate at the `i32` bounds.
pub fn shift_month(year: i32, month: i32, delta: i32) -> (i32, u32) {
    let total = i64::from(month) + i64::from(delta);
    let carry = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    let year = (i64::from(year) + carry).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    (year, month0)
}

/// Calendar service that handles grid and navigation logic
#[derive(Clone, Debug, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Ordered day cells for a month: one blank per weekday before the 1st,
    /// then one slot per day of the month.
    pub fn generate_grid(&self, year: i32, month: i32) -> CalendarGrid {
        let (year, month0) = shift_month(year, 0, month);
        let first_weekday = first_weekday(year, month0);
        let day_count = days_in_month(year, month0);

        let mut days = Vec::with_capacity((first_weekday + day_count) as usize);
        days.extend((0..first_weekday).map(|_| DaySlot::blank()));
        days.extend((1..=day_count).map(|day| DaySlot {
            day_number: day,
            date_key: DateKey::new(year, month0, day).into_string(),
        }));

        debug!(
            "Generated grid for {}-{}: {} blanks, {} days",
            year,
            month0 + 1,
            first_weekday,
            day_count
        );

        CalendarGrid {
            year,
            month: month0,
            first_weekday,
            days,
        }
    }

    /// Display class of one cell. An explicit state always beats the
    /// "today" highlight.
    pub fn classify(&self, slot: &DaySlot, map: &AvailabilityMap, today: NaiveDate) -> DisplayClass {
        if slot.is_blank() {
            return DisplayClass::Padding;
        }

        match map.get(&slot.date_key) {
            AvailabilityState::Busy => DisplayClass::Busy,
            AvailabilityState::Available => DisplayClass::Available,
            AvailabilityState::Tentative => DisplayClass::Tentative,
            AvailabilityState::Unset => {
                if slot.date_key == DateKey::from_date(today).as_str() {
                    DisplayClass::Today
                } else {
                    DisplayClass::Default
                }
            }
        }
    }

    /// English name of a zero-based month
    pub fn month_name(&self, month0: u32) -> &'static str {
        MONTH_NAMES
            .get(month0 as usize)
            .copied()
            .unwrap_or("Invalid Month")
    }

    /// Column headers, Sunday first
    pub fn weekday_headers(&self) -> [&'static str; 7] {
        WEEKDAY_HEADERS
    }

    /// Cursor pointing at the month containing `today`
    pub fn current_cursor(&self, today: NaiveDate) -> MonthCursor {
        MonthCursor {
            year: today.year(),
            month: today.month0(),
        }
    }

    pub fn shift_cursor(&self, cursor: MonthCursor, delta: i32) -> MonthCursor {
        let month = i32::try_from(cursor.month).unwrap_or(i32::MAX);
        let (year, month) = shift_month(cursor.year, month, delta);
        MonthCursor { year, month }
    }

    pub fn previous_cursor(&self, cursor: MonthCursor) -> MonthCursor {
        self.shift_cursor(cursor, -1)
    }

    pub fn next_cursor(&self, cursor: MonthCursor) -> MonthCursor {
        self.shift_cursor(cursor, 1)
    }
}
