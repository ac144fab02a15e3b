use thiserror::Error;

/// Errors surfaced by the date picker library
#[derive(Error, Debug)]
pub enum PickerError {
    #[error("Invalid date '{0}'. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Result type for picker operations
pub type PickerResult<T> = Result<T, PickerError>;
