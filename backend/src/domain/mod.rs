//! # Domain Module
//!
//! Contains all date/time logic behind the range picker.
//!
//! The UI layer only renders what these services compute and forwards user
//! actions back into them; nothing here knows about widgets or styling.
//!
//! ## Module Organization
//!
//! - **clock**: Source of "now", swappable for tests
//! - **time_service**: Time-of-day arithmetic, parsing and formatting
//! - **calendar**: Month grid generation and navigation
//! - **locale** / **formatting**: Locale name tables, date and range strings
//! - **presets**: Quick ranges such as "Last Week" and approximate matching
//! - **date_range**: The range state machine and its validation
//! - **config**: Tunables shared by the services
//!
//! ## Error Conventions
//!
//! - Invalid numeric input (month 12, hour 25) is a programming error and
//!   comes back as `DateTimeError`
//! - Text typed by a user and half-edited ranges are expected to be wrong
//!   and come back as `TimeParseError` / `ValidationErrors` values instead

pub mod calendar;
pub mod clock;
pub mod config;
pub mod date_range;
pub mod errors;
pub mod formatting;
pub mod locale;
pub mod presets;
pub mod time_service;

pub use calendar::*;
pub use clock::*;
pub use config::*;
pub use date_range::*;
pub use errors::*;
pub use formatting::*;
pub use presets::*;
pub use time_service::*;
