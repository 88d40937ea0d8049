//! Range state machine behind the date/time range picker.
//!
//! The picker's value is a `DateRangeValue` with four independently settable
//! slots. Every user action is a `RangeTransition`; applying one returns a
//! new value together with the advisory `ValidationErrors` for it. A
//! transition never fails: an inconsistent range is returned with errors
//! attached so the UI can show them inline while the user keeps editing.
//!
//! ## Transition rules
//!
//! - **Start date**: replaced. When it lands after the current end date, the
//!   end date is moved up to it and the end time becomes start time plus the
//!   configured increment (rolling the end date once more if that crosses
//!   midnight).
//! - **End date**, **start time**, **end time**: replaced, nothing cascades.
//! - **Preset**: the whole value is replaced by the preset's computed range.

use chrono::{Days, NaiveDate};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use shared::{DateRangeValue, QuickDatePreset, TimeValue, ValidationErrors};

use super::clock::SharedClock;
use super::config::DateRangeConfig;
use super::presets::{DatePresetKind, PresetService};
use super::time_service::{add_minutes_with_days, compare_times, TimeService};

/// One user action against the range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeTransition {
    StartDate(Option<NaiveDate>),
    EndDate(Option<NaiveDate>),
    StartTime(Option<TimeValue>),
    EndTime(Option<TimeValue>),
    Preset(DatePresetKind),
}

/// Result of applying a transition: the new value and its advisory errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeUpdate {
    pub value: DateRangeValue,
    pub errors: ValidationErrors,
}

impl RangeUpdate {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Clone)]
pub struct RangeStateMachine {
    clock: SharedClock,
    time_service: TimeService,
    presets: PresetService,
    config: DateRangeConfig,
}

impl RangeStateMachine {
    pub fn new(clock: SharedClock, config: DateRangeConfig) -> Self {
        Self {
            time_service: TimeService::new(clock.clone()),
            presets: PresetService::new(clock.clone(), config.preset_tolerance_days),
            clock,
            config,
        }
    }

    pub fn config(&self) -> &DateRangeConfig {
        &self.config
    }

    /// Today from the current time rounded down to the half hour, until the next
    /// available slot after the configured buffer.
    pub fn smart_defaults(&self) -> DateRangeValue {
        let today = self.clock.today();
        let start_time = self.time_service.current_time_rounded();

        let (end_time, day_offset) = match self
            .time_service
            .next_available_time_with_days(self.config.min_minutes_from_now, self.config.time_interval_minutes)
        {
            Ok(next) => next,
            Err(e) => {
                let increment = self.config.end_time_increment_minutes;
                warn!("📅 RANGE: {}; defaulting end time to start time + {}m", e, increment);
                add_minutes_with_days(start_time, increment as i64)
            }
        };

        DateRangeValue {
            start_date: Some(today),
            start_time: Some(start_time),
            end_date: Some(shift_days(today, day_offset)),
            end_time: Some(end_time),
        }
    }

    /// Start a session from an externally supplied value, or smart defaults when there is none
    pub fn initialize(&self, external: Option<DateRangeValue>) -> RangeUpdate {
        let value = external.unwrap_or_else(|| {
            let defaults = self.smart_defaults();
            info!("📅 RANGE: No initial value, using smart defaults {:?}", defaults);
            defaults
        });
        self.update(value)
    }

    pub fn apply(&self, current: &DateRangeValue, transition: RangeTransition) -> RangeUpdate {
        let next = match transition {
            RangeTransition::StartDate(date) => self.with_start_date(current, date),
            RangeTransition::EndDate(date) => DateRangeValue { end_date: date, ..*current },
            RangeTransition::StartTime(time) => DateRangeValue { start_time: time, ..*current },
            RangeTransition::EndTime(time) => DateRangeValue { end_time: time, ..*current },
            RangeTransition::Preset(kind) => {
                info!("📅 RANGE: Applying preset '{}'", kind.id());
                self.presets.preset_value(kind)
            }
        };
        let update = self.update(next);
        if update.errors.has_errors() {
            info!("📅 RANGE: {:?} left range with errors {:?}", transition, update.errors);
        }
        update
    }

    pub fn apply_start_date(&self, current: &DateRangeValue, date: Option<NaiveDate>) -> RangeUpdate {
        self.apply(current, RangeTransition::StartDate(date))
    }

    pub fn apply_end_date(&self, current: &DateRangeValue, date: Option<NaiveDate>) -> RangeUpdate {
        self.apply(current, RangeTransition::EndDate(date))
    }

    pub fn apply_start_time(&self, current: &DateRangeValue, time: Option<TimeValue>) -> RangeUpdate {
        self.apply(current, RangeTransition::StartTime(time))
    }

    pub fn apply_end_time(&self, current: &DateRangeValue, time: Option<TimeValue>) -> RangeUpdate {
        self.apply(current, RangeTransition::EndTime(time))
    }

    pub fn apply_preset(&self, current: &DateRangeValue, kind: DatePresetKind) -> RangeUpdate {
        self.apply(current, RangeTransition::Preset(kind))
    }

    fn with_start_date(&self, current: &DateRangeValue, date: Option<NaiveDate>) -> DateRangeValue {
        let mut next = DateRangeValue { start_date: date, ..*current };

        if let (Some(start), Some(end)) = (date, current.end_date) {
            if start > end {
                next.end_date = Some(start);
                if let Some(start_time) = current.start_time {
                    let (end_time, day_offset) =
                        add_minutes_with_days(start_time, self.config.end_time_increment_minutes as i64);
                    next.end_time = Some(end_time);
                    next.end_date = Some(shift_days(start, day_offset));
                }
                info!("📅 RANGE: Start date {} passed end date {}, moved end to {:?}", start, end, next.end_date);
            }
        }
        next
    }

    fn update(&self, value: DateRangeValue) -> RangeUpdate {
        RangeUpdate {
            errors: self.validate(&value),
            value,
        }
    }

    /// Advisory checks; the value itself is never rejected
    pub fn validate(&self, range: &DateRangeValue) -> ValidationErrors {
        let mut errors = ValidationErrors::default();

        if range.start_date.is_none() {
            errors.start_date = Some("Start date is required".to_string());
        }
        if range.end_date.is_none() {
            errors.end_date = Some("End date is required".to_string());
        }

        if let (Some(start), Some(end)) = (range.start_date, range.end_date) {
            if end < start {
                errors.end_date = Some("End date must be on or after start date".to_string());
            } else if end == start {
                if let (Some(start_time), Some(end_time)) = (range.start_time, range.end_time) {
                    if compare_times(start_time, end_time) >= 0 {
                        errors.end_time = Some("End time must be after start time on the same day".to_string());
                    }
                }
            }

            if let Some(max_days) = self.config.max_range_days {
                let span = (end - start).num_days() + 1;
                if span > max_days as i64 {
                    errors.general = Some(format!("Date range cannot exceed {} days", max_days));
                }
            }
        }

        errors
    }

    pub fn quick_date_presets(&self) -> Vec<QuickDatePreset> {
        self.presets.quick_date_presets()
    }

    /// Preset the range approximates, for highlighting in the preset list
    pub fn matching_preset(&self, range: &DateRangeValue) -> Option<QuickDatePreset> {
        self.presets.matching_preset(range)
    }
}

fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}
