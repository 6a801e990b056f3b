use thiserror::Error;

/// Error types for the compute module
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComputeError {
    /// The requested (year, month) pair does not name a calendar month.
    #[error("Invalid period: {year}-{month} is not a calendar month")]
    InvalidPeriod { year: i32, month: u32 },
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
