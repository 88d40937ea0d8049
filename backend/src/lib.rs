//! # Date Range Backend
//!
//! Date and time logic for a date/time range picker: calendar grids,
//! time-of-day arithmetic, range formatting and the range state machine.
//! UI components call into the services on `Backend` to format and validate
//! values.

pub mod domain;

use anyhow::Result;
use std::path::Path;

use domain::{
    CalendarService, DateRangeConfig, FormattingService, PresetService, RangeStateMachine, SharedClock,
    TimeService,
};

/// Main backend struct that holds all services
#[derive(Clone)]
pub struct Backend {
    pub time_service: TimeService,
    pub calendar_service: CalendarService,
    pub formatting_service: FormattingService,
    pub preset_service: PresetService,
    pub range_state_machine: RangeStateMachine,
}

impl Backend {
    /// Create a backend on the system clock with default configuration
    pub fn new() -> Self {
        Self::with_config(domain::system_clock(), DateRangeConfig::default())
    }

    /// Create a backend on the system clock with configuration read from a YAML file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let config = DateRangeConfig::load(path)?;
        Ok(Self::with_config(domain::system_clock(), config))
    }

    pub fn with_config(clock: SharedClock, config: DateRangeConfig) -> Self {
        log::info!("Setting up date range services (locale {})", config.default_locale);

        Backend {
            time_service: TimeService::new(clock.clone()),
            calendar_service: CalendarService::new(clock.clone()),
            formatting_service: FormattingService::new(&config),
            preset_service: PresetService::new(clock.clone(), config.preset_tolerance_days),
            range_state_machine: RangeStateMachine::new(clock, config),
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use domain::{CalendarOptions, FixedClock};
    use shared::DateFormat;
    use std::sync::Arc;

    fn backend() -> Backend {
        let clock = FixedClock::at(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(), 9, 10).unwrap();
        Backend::with_config(Arc::new(clock), DateRangeConfig::default())
    }

    #[test]
    fn test_picker_session() {
        let backend = backend();
        let machine = &backend.range_state_machine;
        let formatting = &backend.formatting_service;

        let session = machine.initialize(None);
        assert!(session.is_valid());
        assert_eq!(
            formatting.format_date_time_range(&session.value, DateFormat::Medium, "en-US"),
            "Jan 15, 2025 9:00 AM - Jan 15, 2025 10:00 AM"
        );

        let later = NaiveDate::from_ymd_opt(2025, 1, 18).unwrap();
        let session = machine.apply_start_date(&session.value, Some(later));
        assert_eq!(session.value.end_date, Some(later));
        assert_eq!(
            formatting.format_date_time_range_24(&session.value, DateFormat::Short, "en-US"),
            "1/18/2025 09:00 - 1/18/2025 09:30"
        );

        let calendar = backend
            .calendar_service
            .generate_calendar_month(
                2025,
                0,
                &CalendarOptions {
                    range: Some(session.value.as_calendar_range()),
                    ..Default::default()
                },
            )
            .unwrap();
        let cell = calendar.days().find(|d| d.date == later).unwrap();
        assert!(cell.is_range_start && cell.is_range_end && cell.is_in_range);
    }

    #[test]
    fn test_from_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picker.yaml");
        std::fs::write(&path, "placeholder: Choose dates\n").unwrap();

        let backend = Backend::from_config_file(&path).unwrap();
        assert_eq!(
            backend
                .formatting_service
                .format_date_range(&shared::DateRangeValue::empty(), DateFormat::Medium, "en-US"),
            "Choose dates"
        );
    }
}
