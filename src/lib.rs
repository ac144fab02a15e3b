pub mod calendar;
pub mod commands;
pub mod config;
pub mod error;
pub mod grid;
pub mod picker;
pub mod tui;

#[cfg(test)]
mod testing;

pub use error::{PickerError, PickerResult};
pub use grid::{CalendarDay, CalendarGrid, MonthStep, TodayJump, Week};
pub use picker::{DatePicker, DateRange, Event, Selection, SelectionContext, SelectionMode};
