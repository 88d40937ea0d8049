use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Number of minutes in a day; every `TimeValue` maps into `[0, MINUTES_PER_DAY)`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Half of the day a time falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "AM")]
    Am,
    #[serde(rename = "PM")]
    Pm,
}

impl Period {
    /// Period for a 24-hour clock hour (12..=23 is PM)
    pub fn from_hours(hours: u8) -> Self {
        if hours >= 12 {
            Period::Pm
        } else {
            Period::Am
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Am => "AM",
            Period::Pm => "PM",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A time of day on a 24-hour clock, carrying its AM/PM period for display.
///
/// Fields are private so the period can never drift from the hour: every
/// constructor (including deserialization) derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeValue")]
pub struct TimeValue {
    hours: u8,
    minutes: u8,
    period: Period,
}

impl TimeValue {
    /// Build a time from 24-hour clock parts, `None` when out of range
    pub fn new(hours: u8, minutes: u8) -> Option<Self> {
        if hours > 23 || minutes > 59 {
            return None;
        }
        Some(Self {
            hours,
            minutes,
            period: Period::from_hours(hours),
        })
    }

    /// Build a time from minutes since midnight, `None` when `total >= MINUTES_PER_DAY`
    pub fn from_total_minutes(total: u32) -> Option<Self> {
        if total >= MINUTES_PER_DAY {
            return None;
        }
        Self::new((total / 60) as u8, (total % 60) as u8)
    }

    pub fn midnight() -> Self {
        Self {
            hours: 0,
            minutes: 0,
            period: Period::Am,
        }
    }

    /// Last minute of the day (23:59)
    pub fn end_of_day() -> Self {
        Self {
            hours: 23,
            minutes: 59,
            period: Period::Pm,
        }
    }

    pub fn hours(&self) -> u8 {
        self.hours
    }

    pub fn minutes(&self) -> u8 {
        self.minutes
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Hour on a 12-hour clock face (1..=12)
    pub fn hours_12(&self) -> u8 {
        match self.hours % 12 {
            0 => 12,
            h => h,
        }
    }

    /// Minutes since midnight
    pub fn total_minutes(&self) -> u32 {
        self.hours as u32 * 60 + self.minutes as u32
    }
}

impl Ord for TimeValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.total_minutes().cmp(&other.total_minutes())
    }
}

impl PartialOrd for TimeValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Wire shape of a `TimeValue`; `period` is optional and checked when present
#[derive(Debug, Deserialize)]
struct RawTimeValue {
    hours: u8,
    minutes: u8,
    #[serde(default)]
    period: Option<Period>,
}

impl TryFrom<RawTimeValue> for TimeValue {
    type Error = String;

    fn try_from(raw: RawTimeValue) -> Result<Self, Self::Error> {
        let time = TimeValue::new(raw.hours, raw.minutes)
            .ok_or_else(|| format!("Invalid time: {}:{:02}", raw.hours, raw.minutes))?;
        match raw.period {
            Some(period) if period != time.period => Err(format!(
                "Period {} does not match hour {}",
                period, raw.hours
            )),
            _ => Ok(time),
        }
    }
}

/// Type of calendar day for explicit rendering logic
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Trailing day of the previous month, shown before the 1st
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
    /// Leading day of the next month, shown to complete the last week
    PaddingAfter,
}

/// A single cell in a month grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Day of month (1..=31) of `date`
    pub day: u32,
    pub day_type: CalendarDayType,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// Outside the `[min_date, max_date]` bounds
    pub is_disabled: bool,
    pub is_in_range: bool,
    pub is_range_start: bool,
    pub is_range_end: bool,
}

/// A month laid out as Sunday-first weeks of exactly seven days
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    /// Zero-based month (0 = January)
    pub month: u32,
    pub weeks: Vec<Vec<CalendarDay>>,
}

impl CalendarMonth {
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay> {
        self.weeks.iter().flatten()
    }

    pub fn week_count(&self) -> usize {
        self.weeks.len()
    }
}

/// Range highlight passed into calendar generation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// The picker's working value: two optional dates with optional times
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRangeValue {
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<TimeValue>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<TimeValue>,
}

impl DateRangeValue {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Date-only view used to highlight the range on a calendar
    pub fn as_calendar_range(&self) -> CalendarRange {
        CalendarRange {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// One of the four independently settable slots of a `DateRangeValue`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RangeField {
    StartDate,
    StartTime,
    EndDate,
    EndTime,
}

/// Advisory errors derived from a `DateRangeValue`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationErrors {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub general: Option<String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.general.is_none()
    }

    pub fn has_errors(&self) -> bool {
        !self.is_empty()
    }

    pub fn get(&self, field: RangeField) -> Option<&str> {
        match field {
            RangeField::StartDate => self.start_date.as_deref(),
            RangeField::StartTime => self.start_time.as_deref(),
            RangeField::EndDate => self.end_date.as_deref(),
            RangeField::EndTime => self.end_time.as_deref(),
        }
    }
}

/// Date verbosity levels
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    Short,  // "1/15/2025"
    #[default]
    Medium, // "Jan 15, 2025"
    Long,   // "January 15, 2025"
}

/// A named shortcut that replaces the whole range
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuickDatePreset {
    pub id: String,
    pub label: String,
    pub value: DateRangeValue,
}

/// Why a user-typed time string was rejected
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeParseErrorKind {
    InvalidFormat,
    OutOfRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeParseError {
    pub kind: TimeParseErrorKind,
    pub message: String,
}

impl fmt::Display for TimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TimeParseError {}
