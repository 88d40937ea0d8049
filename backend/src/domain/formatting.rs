//! Date and date-range formatting for picker triggers and summaries.
//!
//! A range renders as one of a handful of shapes depending on which of its
//! four slots are set:
//!
//! | start date | end date | output |
//! |---|---|---|
//! | - | - | placeholder |
//! | ✓ | - | `{start date} [{start time}]` |
//! | - | ✓ | `{end date} [{end time}]` |
//! | ✓ | ✓ | `{start date} [{start time}] - {end date} [{end time}]` |
//!
//! A time is only rendered next to its own date.

use chrono::NaiveDate;
use shared::{DateFormat, DateRangeValue, TimeValue};

use super::config::DateRangeConfig;
use super::locale::LocaleCache;
use super::time_service::{format_time_12, format_time_24};

/// Formatting service owning the locale cache
#[derive(Clone)]
pub struct FormattingService {
    locales: LocaleCache,
    placeholder: String,
    default_locale: String,
    default_format: DateFormat,
}

impl FormattingService {
    pub fn new(config: &DateRangeConfig) -> Self {
        Self {
            locales: LocaleCache::new(),
            placeholder: config.placeholder.clone(),
            default_locale: config.default_locale.clone(),
            default_format: config.default_date_format,
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn default_format(&self) -> DateFormat {
        self.default_format
    }

    pub fn locale_cache(&self) -> &LocaleCache {
        &self.locales
    }

    /// Format a date in the given verbosity for `locale`
    pub fn format_date(&self, date: NaiveDate, format: DateFormat, locale: &str) -> String {
        self.locales.get(locale).format_date(date, format)
    }

    /// Format a `YYYY-MM-DD` string (or the date part of an RFC 3339 timestamp).
    ///
    /// Returns an empty string when the input is not a valid date.
    pub fn format_iso_date(&self, date_str: &str, format: DateFormat, locale: &str) -> String {
        let date_part = date_str.trim().split('T').next().unwrap_or_default();
        match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
            Ok(date) => self.format_date(date, format, locale),
            Err(_) => String::new(),
        }
    }

    /// Dates only; any times on the range are ignored
    pub fn format_date_range(&self, range: &DateRangeValue, format: DateFormat, locale: &str) -> String {
        self.format_range_with(range, format, locale, None)
    }

    /// Dates with 12-hour times ("Jan 15, 2025 9:30 AM - Jan 16, 2025 5:30 PM")
    pub fn format_date_time_range(&self, range: &DateRangeValue, format: DateFormat, locale: &str) -> String {
        self.format_range_with(range, format, locale, Some(format_time_12 as fn(TimeValue) -> String))
    }

    /// Dates with 24-hour times ("Jan 15, 2025 09:30 - Jan 16, 2025 17:30")
    pub fn format_date_time_range_24(&self, range: &DateRangeValue, format: DateFormat, locale: &str) -> String {
        self.format_range_with(range, format, locale, Some(format_time_24 as fn(TimeValue) -> String))
    }

    fn format_range_with(
        &self,
        range: &DateRangeValue,
        format: DateFormat,
        locale: &str,
        time_format: Option<fn(TimeValue) -> String>,
    ) -> String {
        let side = |date: Option<NaiveDate>, time: Option<TimeValue>| {
            date.map(|date| {
                let mut text = self.format_date(date, format, locale);
                if let (Some(format_time), Some(time)) = (time_format, time) {
                    text.push(' ');
                    text.push_str(&format_time(time));
                }
                text
            })
        };

        match (side(range.start_date, range.start_time), side(range.end_date, range.end_time)) {
            (None, None) => self.placeholder.clone(),
            (Some(single), None) | (None, Some(single)) => single,
            (Some(start), Some(end)) => format!("{} - {}", start, end),
        }
    }

    /// Short weekday names, Sunday first, for calendar column headers
    pub fn weekday_headers(&self, locale: &str) -> Vec<String> {
        self.locales.get(locale).weekdays_short.clone()
    }

    /// Calendar caption such as "January 2025" (zero-based month)
    pub fn month_title(&self, year: i32, month: u32, locale: &str) -> String {
        match self.locales.get(locale).months.get(month as usize) {
            Some(name) => format!("{} {}", name, year),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time_service::make_time;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn service() -> FormattingService {
        FormattingService::new(&DateRangeConfig::default())
    }

    fn full_range() -> DateRangeValue {
        DateRangeValue {
            start_date: Some(date(2025, 1, 15)),
            start_time: Some(make_time(9, 30).unwrap()),
            end_date: Some(date(2025, 1, 16)),
            end_time: Some(make_time(17, 30).unwrap()),
        }
    }

    #[test]
    fn test_format_date_en_us() {
        let service = service();
        let day = date(2025, 1, 15);
        assert_eq!(service.format_date(day, DateFormat::Short, "en-US"), "1/15/2025");
        assert_eq!(service.format_date(day, DateFormat::Medium, "en-US"), "Jan 15, 2025");
        assert_eq!(service.format_date(day, DateFormat::Long, "en-US"), "January 15, 2025");
    }

    #[test]
    fn test_format_date_other_locales() {
        let service = service();
        let day = date(2025, 3, 5);
        assert_eq!(service.format_date(day, DateFormat::Short, "en-GB"), "05/03/2025");
        assert_eq!(service.format_date(day, DateFormat::Medium, "en-GB"), "5 Mar 2025");
        assert_eq!(service.format_date(day, DateFormat::Long, "de-DE"), "5. März 2025");
        assert_eq!(service.format_date(day, DateFormat::Short, "de-DE"), "05.03.2025");
        assert_eq!(service.format_date(day, DateFormat::Short, "es-ES"), "5/3/2025");
        assert_eq!(service.format_date(day, DateFormat::Long, "fr-FR"), "5 mars 2025");
        assert_eq!(service.format_date(day, DateFormat::Long, "es-ES"), "5 de marzo de 2025");
    }

    #[test]
    fn test_unknown_locale_falls_back_to_en_us() {
        let service = service();
        assert_eq!(service.format_date(date(2025, 1, 15), DateFormat::Medium, "zz"), "Jan 15, 2025");
        assert_eq!(service.format_date(date(2025, 1, 15), DateFormat::Short, "en_us"), "1/15/2025");
        assert_eq!(service.locale_cache().len(), 1);
    }

    #[test]
    fn test_format_iso_date() {
        let service = service();
        assert_eq!(service.format_iso_date("2025-06-13", DateFormat::Long, "en-US"), "June 13, 2025");
        assert_eq!(
            service.format_iso_date("2025-06-13T09:00:00-04:00", DateFormat::Long, "en-US"),
            "June 13, 2025"
        );
        assert_eq!(service.format_iso_date("invalid-date", DateFormat::Long, "en-US"), "");
        assert_eq!(service.format_iso_date("2025-02-30", DateFormat::Long, "en-US"), "");
        assert_eq!(service.format_iso_date("", DateFormat::Long, "en-US"), "");
    }

    #[test]
    fn test_full_range_example() {
        assert_eq!(
            service().format_date_time_range(&full_range(), DateFormat::Medium, "en-US"),
            "Jan 15, 2025 9:30 AM - Jan 16, 2025 5:30 PM"
        );
        assert_eq!(
            service().format_date_time_range_24(&full_range(), DateFormat::Medium, "en-US"),
            "Jan 15, 2025 09:30 - Jan 16, 2025 17:30"
        );
    }

    #[test]
    fn test_range_branch_table() {
        let service = service();
        let fmt = |range: DateRangeValue| service.format_date_time_range(&range, DateFormat::Medium, "en-US");
        let full = full_range();

        assert_eq!(fmt(DateRangeValue::empty()), "Select date range");
        assert_eq!(
            fmt(DateRangeValue { start_date: None, end_date: None, ..full }),
            "Select date range"
        );
        assert_eq!(
            fmt(DateRangeValue { end_date: None, end_time: None, ..full }),
            "Jan 15, 2025 9:30 AM"
        );
        assert_eq!(
            fmt(DateRangeValue { start_time: None, end_date: None, end_time: None, ..full }),
            "Jan 15, 2025"
        );
        assert_eq!(
            fmt(DateRangeValue { start_date: None, start_time: None, ..full }),
            "Jan 16, 2025 5:30 PM"
        );
        assert_eq!(
            fmt(DateRangeValue { start_date: None, start_time: None, end_time: None, ..full }),
            "Jan 16, 2025"
        );
        assert_eq!(
            fmt(DateRangeValue { end_time: None, ..full }),
            "Jan 15, 2025 9:30 AM - Jan 16, 2025"
        );
        assert_eq!(
            fmt(DateRangeValue { start_time: None, ..full }),
            "Jan 15, 2025 - Jan 16, 2025 5:30 PM"
        );
        assert_eq!(
            fmt(DateRangeValue { start_time: None, end_time: None, ..full }),
            "Jan 15, 2025 - Jan 16, 2025"
        );
    }

    #[test]
    fn test_format_date_range_ignores_times() {
        assert_eq!(
            service().format_date_range(&full_range(), DateFormat::Long, "en-US"),
            "January 15, 2025 - January 16, 2025"
        );
    }

    #[test]
    fn test_custom_placeholder() {
        let config = DateRangeConfig {
            placeholder: "Pick dates".to_string(),
            ..Default::default()
        };
        let service = FormattingService::new(&config);
        assert_eq!(
            service.format_date_range(&DateRangeValue::empty(), DateFormat::Short, "en-US"),
            "Pick dates"
        );
    }

    #[test]
    fn test_calendar_captions() {
        let service = service();
        assert_eq!(service.month_title(2025, 0, "en-US"), "January 2025");
        assert_eq!(service.month_title(2025, 11, "fr-FR"), "décembre 2025");
        assert_eq!(service.month_title(2025, 12, "en-US"), "");
        assert_eq!(service.weekday_headers("en-US")[0], "Sun");
        assert_eq!(service.weekday_headers("en-US")[6], "Sat");
    }
}
