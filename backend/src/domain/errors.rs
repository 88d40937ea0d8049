use thiserror::Error;

/// Invalid primitive input handed to date/time arithmetic.
///
/// These indicate an integration bug rather than bad user input, so callers
/// are expected to propagate them with `?` instead of rendering them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTimeError {
    #[error("Invalid time {hours}:{minutes:02}: hours must be 0-23 and minutes 0-59")]
    InvalidTime { hours: u32, minutes: u32 },
    #[error("Invalid month: {0}. Must be between 0 and 11")]
    InvalidMonth(u32),
    #[error("Invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
    #[error("Invalid interval: {0} minutes. Must be between 1 and 1440")]
    InvalidInterval(u32),
}
