//! Time-of-day arithmetic for the picker.
//!
//! All arithmetic works on minutes since midnight. Plain helpers wrap
//! silently across midnight; the `_with_days` variants additionally report
//! how many whole days were crossed so callers can roll a date forward.
//!
//! Two error conventions live here on purpose:
//!
//! - invalid numeric input (an hour of 25 from code) is a `DateTimeError`
//! - user-typed text goes through `parse_time_string`, which returns a
//!   `TimeParseError` describing what was wrong

use chrono::Timelike;
use log::debug;
use shared::{Period, TimeParseError, TimeParseErrorKind, TimeValue, MINUTES_PER_DAY};

use super::clock::SharedClock;
use super::errors::DateTimeError;

const DAY: i64 = MINUTES_PER_DAY as i64;

/// Buffer used by `TimeService::next_available_time_default`
pub const DEFAULT_MIN_MINUTES_FROM_NOW: u32 = 30;
/// Grid used by `TimeService::next_available_time_default`
pub const DEFAULT_AVAILABLE_INTERVAL_MINUTES: u32 = 15;

/// Convert 24-hour clock parts to minutes since midnight
pub fn time_to_minutes(hours: u32, minutes: u32) -> Result<u32, DateTimeError> {
    if hours > 23 || minutes > 59 {
        return Err(DateTimeError::InvalidTime { hours, minutes });
    }
    Ok(hours * 60 + minutes)
}

/// Build a 24-hour time, failing on out-of-range parts
pub fn make_time(hours: u32, minutes: u32) -> Result<TimeValue, DateTimeError> {
    let total = time_to_minutes(hours, minutes)?;
    Ok(minutes_to_time(total as i64))
}

/// Convert minutes to a time of day, wrapping any input into one day
pub fn minutes_to_time(total_minutes: i64) -> TimeValue {
    let wrapped = total_minutes.rem_euclid(DAY) as u32;
    // rem_euclid keeps `wrapped` in [0, MINUTES_PER_DAY)
    TimeValue::from_total_minutes(wrapped).unwrap_or_else(TimeValue::midnight)
}

pub fn add_minutes(time: TimeValue, minutes: i64) -> TimeValue {
    minutes_to_time(time.total_minutes() as i64 + minutes)
}

pub fn subtract_minutes(time: TimeValue, minutes: i64) -> TimeValue {
    add_minutes(time, -minutes)
}

/// Add minutes and report the signed number of midnights crossed
pub fn add_minutes_with_days(time: TimeValue, minutes: i64) -> (TimeValue, i64) {
    let total = time.total_minutes() as i64 + minutes;
    (minutes_to_time(total), total.div_euclid(DAY))
}

/// Negative when `a` is earlier than `b`, zero when equal, positive when later
pub fn compare_times(a: TimeValue, b: TimeValue) -> i32 {
    a.total_minutes() as i32 - b.total_minutes() as i32
}

/// Floor to the half hour at or before `time` (2:35 PM becomes 2:30 PM)
pub fn round_to_lowest_half_hour(time: TimeValue) -> TimeValue {
    let total = time.total_minutes();
    minutes_to_time((total - total % 30) as i64)
}

/// Round up to the next multiple of `interval`, reporting any midnight crossing
pub fn round_up_to_interval(time: TimeValue, interval: u32) -> Result<(TimeValue, i64), DateTimeError> {
    check_interval(interval)?;
    let total = time.total_minutes();
    let rounded = total.div_ceil(interval) * interval;
    Ok(add_minutes_with_days(TimeValue::midnight(), rounded as i64))
}

/// Every `interval` minutes from midnight, as offered by a time dropdown
pub fn time_options(interval: u32) -> Result<Vec<TimeValue>, DateTimeError> {
    check_interval(interval)?;
    Ok((0..MINUTES_PER_DAY)
        .step_by(interval as usize)
        .map(|total| minutes_to_time(total as i64))
        .collect())
}

/// "9:30 AM"
pub fn format_time_12(time: TimeValue) -> String {
    format!("{}:{:02} {}", time.hours_12(), time.minutes(), time.period())
}

/// "09:30"
pub fn format_time_24(time: TimeValue) -> String {
    format!("{:02}:{:02}", time.hours(), time.minutes())
}

/// Parse user-typed text as `"HH:MM"` (24h) or `"H:MM AM"` / `"H:MMpm"` (12h).
pub fn parse_time_string(input: &str) -> Result<TimeValue, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid_format(input));
    }

    let upper = trimmed.to_ascii_uppercase();
    let (clock_part, period) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), Some(Period::Am))
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), Some(Period::Pm))
    } else {
        (upper.as_str(), None)
    };

    let (hour_text, minute_text) = clock_part.split_once(':').ok_or_else(|| invalid_format(input))?;
    if !is_digits(hour_text, 1, 2) || !is_digits(minute_text, 2, 2) {
        return Err(invalid_format(input));
    }
    let hours: u32 = hour_text.parse().map_err(|_| invalid_format(input))?;
    let minutes: u32 = minute_text.parse().map_err(|_| invalid_format(input))?;

    let hours_24 = match period {
        None => hours,
        Some(_) if hours == 0 || hours > 12 => return Err(out_of_range(input)),
        Some(Period::Am) => hours % 12,
        Some(Period::Pm) => hours % 12 + 12,
    };

    make_time(hours_24, minutes).map_err(|_| out_of_range(input))
}

fn is_digits(text: &str, min_len: usize, max_len: usize) -> bool {
    (min_len..=max_len).contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit())
}

fn invalid_format(input: &str) -> TimeParseError {
    TimeParseError {
        kind: TimeParseErrorKind::InvalidFormat,
        message: format!("\"{}\" is not a valid time. Use HH:MM or HH:MM AM/PM", input.trim()),
    }
}

fn out_of_range(input: &str) -> TimeParseError {
    TimeParseError {
        kind: TimeParseErrorKind::OutOfRange,
        message: format!("\"{}\" is out of range", input.trim()),
    }
}

fn check_interval(interval: u32) -> Result<(), DateTimeError> {
    if interval == 0 || interval > MINUTES_PER_DAY {
        return Err(DateTimeError::InvalidInterval(interval));
    }
    Ok(())
}

/// Clock-dependent time helpers
#[derive(Clone)]
pub struct TimeService {
    clock: SharedClock,
}

impl TimeService {
    pub fn new(clock: SharedClock) -> Self {
        Self { clock }
    }

    /// Current wall-clock time, truncated to the minute
    pub fn current_time(&self) -> TimeValue {
        let now = self.clock.now();
        minutes_to_time((now.hour() * 60 + now.minute()) as i64)
    }

    pub fn current_time_rounded(&self) -> TimeValue {
        round_to_lowest_half_hour(self.current_time())
    }

    /// Next available time with a 30 minute buffer on a 15 minute grid
    pub fn next_available_time_default(&self) -> Result<TimeValue, DateTimeError> {
        self.next_available_time(DEFAULT_MIN_MINUTES_FROM_NOW, DEFAULT_AVAILABLE_INTERVAL_MINUTES)
    }

    /// Now plus `min_minutes_from_now`, rounded up to the next `interval` boundary
    pub fn next_available_time(&self, min_minutes_from_now: u32, interval: u32) -> Result<TimeValue, DateTimeError> {
        self.next_available_time_with_days(min_minutes_from_now, interval)
            .map(|(time, _)| time)
    }

    /// Same as `next_available_time`, also reporting whether the result falls on a later day
    pub fn next_available_time_with_days(
        &self,
        min_minutes_from_now: u32,
        interval: u32,
    ) -> Result<(TimeValue, i64), DateTimeError> {
        let (earliest, buffer_days) = add_minutes_with_days(self.current_time(), min_minutes_from_now as i64);
        let (rounded, rounding_days) = round_up_to_interval(earliest, interval)?;
        debug!(
            "⏰ TIME: next available time {} (+{} day(s)) from buffer {}m, interval {}m",
            format_time_24(rounded),
            buffer_days + rounding_days,
            min_minutes_from_now,
            interval
        );
        Ok((rounded, buffer_days + rounding_days))
    }
}
