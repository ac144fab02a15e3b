pub mod month;

use chrono::NaiveDate;

use crate::error::{PickerError, PickerResult};

/// Parse a `YYYY-MM-DD` command-line date
pub fn parse_date(date_str: &str) -> PickerResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| PickerError::InvalidDate(date_str.to_string()))
}
