use chrono::NaiveDate;
use std::fmt;

use crate::calendar;
use crate::grid::CalendarDay;

/// Selection state owned by one picker instance
///
/// In single mode only `range_start` is used. In range mode `range_end` is
/// either a committed endpoint (`done == true`) or a hover preview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionContext {
    pub range_start: Option<CalendarDay>,
    pub range_end: Option<CalendarDay>,
    pub done: bool,
}

/// Coarse phase of a range selection, derived from the context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Empty,
    Picking,
    Committed,
}

/// Whether the picker produces one date or a start/end pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Single,
    Range,
}

impl SelectionMode {
    pub fn from_range_flag(range: bool) -> Self {
        if range {
            SelectionMode::Range
        } else {
            SelectionMode::Single
        }
    }
}

impl SelectionContext {
    pub fn state(&self) -> SelectionState {
        match (&self.range_start, &self.range_end, self.done) {
            (None, _, _) => SelectionState::Empty,
            (Some(_), Some(_), true) => SelectionState::Committed,
            (Some(_), _, _) => SelectionState::Picking,
        }
    }

    fn start_date(&self) -> Option<NaiveDate> {
        self.range_start.as_ref().map(|day| day.date)
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.range_end.as_ref().map(|day| day.date)
    }

    pub fn is_range_start(&self, date: NaiveDate) -> bool {
        self.start_date()
            .is_some_and(|start| calendar::is_same_day(date, start))
    }

    pub fn is_range_end(&self, date: NaiveDate) -> bool {
        self.end_date().is_some_and(|end| calendar::is_same_day(date, end))
    }

    pub fn is_range_start_or_end(&self, date: NaiveDate) -> bool {
        self.is_range_start(date) || self.is_range_end(date)
    }

    /// Strictly between both endpoints; false unless both are present
    pub fn is_range_between(&self, date: NaiveDate) -> bool {
        match (self.start_date(), self.end_date()) {
            (Some(start), Some(end)) => {
                calendar::is_after(date, start) && calendar::is_before(date, end)
            }
            _ => false,
        }
    }
}

/// A committed, ordered date interval (`start <= end`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Value handed to the consumer's `on_change`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Single(NaiveDate),
    Range(DateRange),
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Single(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Selection::Range(range) => write!(
                f,
                "{}..{}",
                range.start.format("%Y-%m-%d"),
                range.end.format("%Y-%m-%d")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, day};

    fn committed(start: CalendarDay, end: CalendarDay) -> SelectionContext {
        SelectionContext {
            range_start: Some(start),
            range_end: Some(end),
            done: true,
        }
    }

    #[test]
    fn test_state_is_derived() {
        let mut ctx = SelectionContext::default();
        assert_eq!(ctx.state(), SelectionState::Empty);

        ctx.range_start = Some(day(2024, 1, 10));
        assert_eq!(ctx.state(), SelectionState::Picking);

        // hover preview is still picking
        ctx.range_end = Some(day(2024, 1, 12));
        assert_eq!(ctx.state(), SelectionState::Picking);

        ctx.done = true;
        assert_eq!(ctx.state(), SelectionState::Committed);
    }

    #[test]
    fn test_range_predicates() {
        let ctx = committed(day(2024, 1, 10), day(2024, 1, 15));

        assert!(ctx.is_range_start(date(2024, 1, 10)));
        assert!(ctx.is_range_end(date(2024, 1, 15)));
        assert!(ctx.is_range_start_or_end(date(2024, 1, 15)));
        assert!(!ctx.is_range_start_or_end(date(2024, 1, 12)));

        assert!(ctx.is_range_between(date(2024, 1, 11)));
        assert!(ctx.is_range_between(date(2024, 1, 14)));
        assert!(!ctx.is_range_between(date(2024, 1, 10)));
        assert!(!ctx.is_range_between(date(2024, 1, 15)));
        assert!(!ctx.is_range_between(date(2024, 1, 20)));
    }

    #[test]
    fn test_between_requires_both_endpoints() {
        let ctx = SelectionContext {
            range_start: Some(day(2024, 1, 10)),
            ..Default::default()
        };
        assert!(!ctx.is_range_between(date(2024, 1, 11)));
        assert!(!ctx.is_range_end(date(2024, 1, 10)));
        assert!(!SelectionContext::default().is_range_start(date(2024, 1, 10)));
    }

    #[test]
    fn test_selection_display() {
        assert_eq!(Selection::Single(date(2024, 3, 5)).to_string(), "2024-03-05");
        let range = Selection::Range(DateRange {
            start: date(2024, 3, 5),
            end: date(2024, 3, 9),
        });
        assert_eq!(range.to_string(), "2024-03-05..2024-03-09");
    }

    #[test]
    fn test_mode_from_flag() {
        assert_eq!(SelectionMode::from_range_flag(true), SelectionMode::Range);
        assert_eq!(SelectionMode::from_range_flag(false), SelectionMode::Single);
        assert_eq!(SelectionMode::default(), SelectionMode::Single);
    }
}
