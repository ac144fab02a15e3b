//! Shared test helpers: date/day builders and buffer assertions.

use chrono::NaiveDate;
use ratatui::buffer::Buffer;

use crate::grid::CalendarDay;
use crate::picker::Callback;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}

/// An in-month, not-today cell
pub fn day(y: i32, m: u32, d: u32) -> CalendarDay {
    let date = date(y, m, d);
    CalendarDay {
        key: date.format("%Y-%m-%d").to_string(),
        date,
        is_current_month: true,
        is_today: false,
    }
}

/// A padding cell from an adjacent month
pub fn outside_day(y: i32, m: u32, d: u32) -> CalendarDay {
    CalendarDay {
        is_current_month: false,
        ..day(y, m, d)
    }
}

pub fn noop() -> Callback {
    Box::new(|| {})
}

/// Helper to extract lines from buffer
pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
    let area = buf.area();
    (0..area.height)
        .map(|y| {
            (0..area.width)
                .map(|x| buf[(x, y)].symbol())
                .collect::<String>()
        })
        .collect()
}

/// Helper for buffer assertions, ignoring trailing whitespace
pub fn assert_buffer(buf: &Buffer, expected: &[&str]) {
    let actual = buffer_lines(buf);

    assert_eq!(
        actual.len(),
        expected.len(),
        "Buffer height mismatch: expected {} lines, got {}",
        expected.len(),
        actual.len()
    );
    for (i, expected_line) in expected.iter().enumerate() {
        assert_eq!(
            actual[i].trim_end(),
            expected_line.trim_end(),
            "Line {} mismatch:\nExpected: '{}'\nActual:   '{}'",
            i,
            expected_line,
            actual[i]
        );
    }
}
