//! Calendar math used by the grid and the selection reducer.
//!
//! Thin helpers over `chrono` so the rest of the crate speaks in terms of
//! "start of month", "same day", "before/after" instead of raw date arithmetic.

use chrono::{Datelike, Local, Months, NaiveDate, Weekday};

/// Source of the real-world current date
pub trait Clock: Send + std::fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the local system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date (tests, `--date`)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// First day of the month containing `date`
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

pub fn is_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Strictly before
pub fn is_before(date: NaiveDate, other: NaiveDate) -> bool {
    date < other
}

/// Strictly after
pub fn is_after(date: NaiveDate, other: NaiveDate) -> bool {
    date > other
}

pub fn is_today(date: NaiveDate, clock: &dyn Clock) -> bool {
    is_same_day(date, clock.today())
}

/// First column of a Monday-start week row
pub fn is_monday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Mon
}

/// Last column of a Monday-start week row
pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}
