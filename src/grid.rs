//! Calendar grid provider
//!
//! Holds the visible month cursor and the week rows derived from it. The rows
//! are rebuilt wholesale every time the cursor moves; callers must not hold on
//! to `CalendarDay` values across navigation.

use chrono::{Datelike, Days, Months, NaiveDate};
use tracing::{debug, warn};

use crate::calendar::{self, Clock, FixedClock, SystemClock};

/// Number of columns in a week row
pub const DAYS_PER_WEEK: usize = 7;

/// Single-letter column headers, Monday first
pub const WEEKDAY_HEADERS: [&str; DAYS_PER_WEEK] = ["M", "T", "W", "T", "F", "S", "S"];

/// One cell of the calendar grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarDay {
    /// Unique within one render (`YYYY-MM-DD`)
    pub key: String,
    pub date: NaiveDate,
    /// Whether `date` belongs to the month under the cursor
    pub is_current_month: bool,
    pub is_today: bool,
}

impl CalendarDay {
    fn new(date: NaiveDate, cursor: NaiveDate, clock: &dyn Clock) -> Self {
        Self {
            key: date.format("%Y-%m-%d").to_string(),
            date,
            is_current_month: calendar::is_same_month(date, cursor),
            is_today: calendar::is_today(date, clock),
        }
    }
}

/// A Monday..Sunday row of days
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    pub key: String,
    pub days: Vec<CalendarDay>,
}

/// Direction of a one-month cursor move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthStep {
    Previous,
    Next,
}

/// Where the "jump to current month" control points, relative to the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TodayJump {
    /// Cursor is after today's month; the control sits left of the title
    Backward,
    /// Cursor is before today's month; the control sits right of the title
    Forward,
}

#[derive(Debug)]
pub struct CalendarGrid {
    cursor: NaiveDate,
    today: NaiveDate,
    clock: Box<dyn Clock>,
    weeks: Vec<Week>,
}

impl Default for CalendarGrid {
    fn default() -> Self {
        Self::new(Box::new(SystemClock))
    }
}

impl CalendarGrid {
    /// Create a grid positioned on the clock's current month
    pub fn new(clock: Box<dyn Clock>) -> Self {
        let today = clock.today();
        Self::with_cursor(clock, today)
    }

    /// Create a grid positioned on the month containing `cursor`
    pub fn with_cursor(clock: Box<dyn Clock>, cursor: NaiveDate) -> Self {
        let today = clock.today();
        let mut grid = Self {
            cursor,
            today,
            clock,
            weeks: Vec::new(),
        };
        grid.recompute();
        grid
    }

    /// The month currently displayed
    pub fn current_cursor(&self) -> (i32, u32) {
        (self.cursor.year(), self.cursor.month())
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn year(&self) -> i32 {
        self.cursor.year()
    }

    pub fn month(&self) -> u32 {
        self.cursor.month()
    }

    pub fn day(&self) -> u32 {
        self.cursor.day()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn weeks(&self) -> &[Week] {
        &self.weeks
    }

    pub fn weekday_headers(&self) -> [&'static str; DAYS_PER_WEEK] {
        WEEKDAY_HEADERS
    }

    pub fn go_to_previous_month(&mut self) {
        self.step(MonthStep::Previous);
    }

    pub fn go_to_next_month(&mut self) {
        self.step(MonthStep::Next);
    }

    pub fn go_to_today(&mut self) {
        self.cursor = self.clock.today();
        debug!("GRID: Jumped to today's month {}", self.cursor.format("%Y-%m"));
        self.recompute();
    }

    /// Move the cursor by one month, clamping the day to the target month
    pub fn step(&mut self, step: MonthStep) {
        let shifted = match step {
            MonthStep::Previous => self.cursor.checked_sub_months(Months::new(1)),
            MonthStep::Next => self.cursor.checked_add_months(Months::new(1)),
        };

        match shifted {
            Some(cursor) => {
                debug!("GRID: {:?} -> {}", step, cursor.format("%Y-%m"));
                self.cursor = cursor;
                self.recompute();
            }
            None => warn!("GRID: Cannot move {:?} from {}", step, self.cursor),
        }
    }

    /// Position of the "jump to current month" control, `None` when already there
    pub fn today_jump(&self) -> Option<TodayJump> {
        let this_month = calendar::start_of_month(self.today);
        if calendar::is_same_month(this_month, self.cursor) {
            None
        } else if calendar::is_before(this_month, self.cursor) {
            Some(TodayJump::Backward)
        } else {
            Some(TodayJump::Forward)
        }
    }

    /// Rebuild the week rows from the cursor and the clock
    pub fn recompute(&mut self) {
        // One reading of the clock per rebuild
        let snapshot = FixedClock(self.clock.today());
        self.today = snapshot.0;
        self.weeks = build_weeks(self.cursor, &snapshot);
    }
}

fn build_weeks(cursor: NaiveDate, clock: &dyn Clock) -> Vec<Week> {
    let first = calendar::start_of_month(cursor);
    let last = calendar::end_of_month(cursor);

    let leading = u64::from(first.weekday().num_days_from_monday());
    let trailing = u64::from(6 - last.weekday().num_days_from_monday());
    let grid_start = first.checked_sub_days(Days::new(leading)).unwrap_or(first);
    let grid_end = last.checked_add_days(Days::new(trailing)).unwrap_or(last);

    let days: Vec<CalendarDay> = grid_start
        .iter_days()
        .take_while(|date| *date <= grid_end)
        .map(|date| CalendarDay::new(date, cursor, clock))
        .collect();

    days.chunks(DAYS_PER_WEEK)
        .map(|chunk| Week {
            key: format!("week-{}", chunk[0].key),
            days: chunk.to_vec(),
        })
        .collect()
}
