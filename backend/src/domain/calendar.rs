//! Calendar month generation for the date pickers.
//!
//! A month is laid out as Sunday-first weeks of exactly seven cells. Days of
//! the adjacent months pad the first and last week, so a grid has 4 to 6
//! weeks depending on how the month falls. Every cell carries independently
//! derived flags (today, selected, disabled, range start/end/in-range) that
//! the UI maps onto styles.
//!
//! Months are zero-based (0 = January) throughout this module.

use chrono::{Datelike, Days, NaiveDate};
use log::debug;
use shared::{CalendarDay, CalendarDayType, CalendarMonth, CalendarRange};

use super::clock::SharedClock;
use super::errors::DateTimeError;

/// Optional inputs that decorate a generated month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarOptions {
    pub selected_date: Option<NaiveDate>,
    pub range: Option<CalendarRange>,
    /// Earliest selectable day (inclusive)
    pub min_date: Option<NaiveDate>,
    /// Latest selectable day (inclusive)
    pub max_date: Option<NaiveDate>,
}

/// Calendar service that handles all calendar-related logic
#[derive(Clone)]
pub struct CalendarService {
    clock: SharedClock,
}

impl CalendarService {
    pub fn new(clock: SharedClock) -> Self {
        Self { clock }
    }

    /// Generate the grid for `year`/`month` (zero-based month)
    pub fn generate_calendar_month(
        &self,
        year: i32,
        month: u32,
        options: &CalendarOptions,
    ) -> Result<CalendarMonth, DateTimeError> {
        let days_in_month = self.days_in_month(year, month)?;
        let first_day = self.first_day_of_month(year, month)?;
        let first = NaiveDate::from_ymd_opt(year, month + 1, 1).ok_or(DateTimeError::InvalidDate {
            year,
            month: month + 1,
            day: 1,
        })?;
        let grid_start = first
            .checked_sub_days(Days::new(first_day as u64))
            .ok_or(DateTimeError::InvalidDate { year, month: month + 1, day: 1 })?;

        let total_cells = (first_day + days_in_month).div_ceil(7) * 7;
        debug!(
            "🗓️ CALENDAR: Generating {}/{}: {} days, first weekday {}, {} cells",
            month + 1,
            year,
            days_in_month,
            first_day,
            total_cells
        );

        let today = self.clock.today();
        let mut days = Vec::with_capacity(total_cells as usize);
        for offset in 0..total_cells {
            let date = grid_start
                .checked_add_days(Days::new(offset as u64))
                .ok_or(DateTimeError::InvalidDate { year, month: month + 1, day: 1 })?;
            let day_type = if offset < first_day {
                CalendarDayType::PaddingBefore
            } else if offset < first_day + days_in_month {
                CalendarDayType::MonthDay
            } else {
                CalendarDayType::PaddingAfter
            };
            days.push(self.build_day(date, day_type, today, options));
        }

        let weeks: Vec<Vec<CalendarDay>> = days.chunks(7).map(|week| week.to_vec()).collect();
        debug!("🗓️ CALENDAR: {}/{} laid out in {} weeks", month + 1, year, weeks.len());

        Ok(CalendarMonth { year, month, weeks })
    }

    fn build_day(
        &self,
        date: NaiveDate,
        day_type: CalendarDayType,
        today: NaiveDate,
        options: &CalendarOptions,
    ) -> CalendarDay {
        let range = options.range.unwrap_or_default();
        let is_in_range = match (range.start, range.end) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => false,
        };
        let before_min = options.min_date.is_some_and(|min| date < min);
        let after_max = options.max_date.is_some_and(|max| date > max);

        CalendarDay {
            date,
            day: date.day(),
            day_type,
            is_current_month: day_type == CalendarDayType::MonthDay,
            is_today: date == today,
            is_selected: options.selected_date == Some(date),
            is_disabled: before_min || after_max,
            is_in_range,
            is_range_start: range.start == Some(date),
            is_range_end: range.end == Some(date),
        }
    }

    /// Get the number of days in a given month (zero-based) and year
    pub fn days_in_month(&self, year: i32, month: u32) -> Result<u32, DateTimeError> {
        match month {
            1 => Ok(if self.is_leap_year(year) { 29 } else { 28 }),
            3 | 5 | 8 | 10 => Ok(30),
            0 | 2 | 4 | 6 | 7 | 9 | 11 => Ok(31),
            _ => Err(DateTimeError::InvalidMonth(month)),
        }
    }

    /// Check if a year is a leap year
    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    /// Weekday of the 1st (0 = Sunday, 1 = Monday, etc.)
    pub fn first_day_of_month(&self, year: i32, month: u32) -> Result<u32, DateTimeError> {
        if month > 11 {
            return Err(DateTimeError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month + 1, 1)
            .map(|date| date.weekday().num_days_from_sunday())
            .ok_or(DateTimeError::InvalidDate { year, month: month + 1, day: 1 })
    }

    /// English month name for a zero-based month
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            0 => "January",
            1 => "February",
            2 => "March",
            3 => "April",
            4 => "May",
            5 => "June",
            6 => "July",
            7 => "August",
            8 => "September",
            9 => "October",
            10 => "November",
            11 => "December",
            _ => "Invalid Month",
        }
    }

    /// Navigate to the previous month, returning `(year, month)`
    pub fn previous_month(&self, year: i32, month: u32) -> (i32, u32) {
        if month == 0 {
            (year - 1, 11)
        } else {
            (year, month - 1)
        }
    }

    /// Navigate to the next month, returning `(year, month)`
    pub fn next_month(&self, year: i32, month: u32) -> (i32, u32) {
        if month >= 11 {
            (year + 1, 0)
        } else {
            (year, month + 1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use std::sync::Arc;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn service() -> CalendarService {
        CalendarService::new(Arc::new(FixedClock::at(date(2025, 1, 15), 9, 0).unwrap()))
    }

    fn find(month: &CalendarMonth, target: NaiveDate) -> &CalendarDay {
        month.days().find(|d| d.date == target).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        let service = service();

        assert_eq!(service.days_in_month(2025, 0), Ok(31)); // January
        assert_eq!(service.days_in_month(2025, 3), Ok(30)); // April
        assert_eq!(service.days_in_month(2025, 1), Ok(28)); // February (non-leap)
        assert_eq!(service.days_in_month(2024, 1), Ok(29)); // February (leap year)
        assert_eq!(service.days_in_month(2025, 12), Err(DateTimeError::InvalidMonth(12)));
    }

    #[test]
    fn test_is_leap_year() {
        let service = service();

        assert!(!service.is_leap_year(2025));
        assert!(service.is_leap_year(2024));
        assert!(!service.is_leap_year(1900));
        assert!(service.is_leap_year(2000));
    }

    #[test]
    fn test_first_day_of_month() {
        let service = service();

        assert_eq!(service.first_day_of_month(2025, 0), Ok(3)); // Wednesday
        assert_eq!(service.first_day_of_month(2015, 1), Ok(0)); // Sunday
        assert_eq!(service.first_day_of_month(2025, 12), Err(DateTimeError::InvalidMonth(12)));
    }

    #[test]
    fn test_navigation() {
        let service = service();

        assert_eq!(service.previous_month(2025, 5), (2025, 4));
        assert_eq!(service.previous_month(2025, 0), (2024, 11));
        assert_eq!(service.next_month(2025, 5), (2025, 6));
        assert_eq!(service.next_month(2025, 11), (2026, 0));
        assert_eq!(service.month_name(0), "January");
        assert_eq!(service.month_name(12), "Invalid Month");
    }

    #[test]
    fn test_rejects_invalid_month() {
        let result = service().generate_calendar_month(2025, 12, &CalendarOptions::default());
        assert_eq!(result, Err(DateTimeError::InvalidMonth(12)));
    }

    #[test]
    fn test_generate_january_2025() {
        let month = service().generate_calendar_month(2025, 0, &CalendarOptions::default()).unwrap();

        assert_eq!(month.year, 2025);
        assert_eq!(month.month, 0);
        assert_eq!(month.week_count(), 5);

        // Jan 1 2025 is a Wednesday: Sun 29, Mon 30, Tue 31 of December pad the front
        let first_week = &month.weeks[0];
        assert_eq!(first_week[0].date, date(2024, 12, 29));
        assert_eq!(first_week[0].day_type, CalendarDayType::PaddingBefore);
        assert!(!first_week[0].is_current_month);
        assert_eq!(first_week[3].date, date(2025, 1, 1));
        assert!(first_week[3].is_current_month);

        let last_week = month.weeks.last().unwrap();
        assert_eq!(last_week[6].date, date(2025, 2, 1));
        assert_eq!(last_week[6].day_type, CalendarDayType::PaddingAfter);

        assert!(find(&month, date(2025, 1, 15)).is_today);
        assert_eq!(month.days().filter(|d| d.is_today).count(), 1);
    }

    #[test]
    fn test_every_week_has_seven_days() {
        let service = service();
        for year in [2015, 2024, 2025, 2026] {
            for m in 0..12 {
                let month = service.generate_calendar_month(year, m, &CalendarOptions::default()).unwrap();
                assert!((4..=6).contains(&month.week_count()));
                assert!(month.weeks.iter().all(|week| week.len() == 7));
                assert_eq!(month.weeks[0][0].date.weekday().num_days_from_sunday(), 0);

                let current = month.days().filter(|d| d.is_current_month).count() as u32;
                assert_eq!(current, service.days_in_month(year, m).unwrap());
            }
        }
    }

    #[test]
    fn test_february_2015_fits_four_weeks() {
        let month = service().generate_calendar_month(2015, 1, &CalendarOptions::default()).unwrap();
        assert_eq!(month.week_count(), 4);
        assert!(month.days().all(|d| d.is_current_month));
    }

    #[test]
    fn test_selected_and_disabled() {
        let options = CalendarOptions {
            selected_date: Some(date(2025, 1, 10)),
            min_date: Some(date(2025, 1, 5)),
            max_date: Some(date(2025, 1, 20)),
            ..Default::default()
        };
        let month = service().generate_calendar_month(2025, 0, &options).unwrap();

        assert!(find(&month, date(2025, 1, 10)).is_selected);
        assert_eq!(month.days().filter(|d| d.is_selected).count(), 1);

        assert!(find(&month, date(2025, 1, 4)).is_disabled);
        assert!(!find(&month, date(2025, 1, 5)).is_disabled);
        assert!(!find(&month, date(2025, 1, 20)).is_disabled);
        assert!(find(&month, date(2025, 1, 21)).is_disabled);
        assert!(find(&month, date(2024, 12, 29)).is_disabled);
    }

    #[test]
    fn test_range_flags() {
        let options = CalendarOptions {
            range: Some(CalendarRange {
                start: Some(date(2025, 1, 10)),
                end: Some(date(2025, 1, 12)),
            }),
            ..Default::default()
        };
        let month = service().generate_calendar_month(2025, 0, &options).unwrap();

        let start = find(&month, date(2025, 1, 10));
        assert!(start.is_range_start && start.is_in_range && !start.is_range_end);
        let middle = find(&month, date(2025, 1, 11));
        assert!(middle.is_in_range && !middle.is_range_start && !middle.is_range_end);
        let end = find(&month, date(2025, 1, 12));
        assert!(end.is_range_end && end.is_in_range && !end.is_range_start);
        assert!(!find(&month, date(2025, 1, 13)).is_in_range);
        assert_eq!(month.days().filter(|d| d.is_in_range).count(), 3);
    }

    #[test]
    fn test_single_day_range() {
        let day = date(2025, 1, 20);
        let options = CalendarOptions {
            range: Some(CalendarRange { start: Some(day), end: Some(day) }),
            ..Default::default()
        };
        let month = service().generate_calendar_month(2025, 0, &options).unwrap();
        let cell = find(&month, day);
        assert!(cell.is_range_start && cell.is_range_end && cell.is_in_range);
    }

    #[test]
    fn test_open_or_inverted_range_has_no_in_range_days() {
        let open = CalendarOptions {
            range: Some(CalendarRange { start: Some(date(2025, 1, 10)), end: None }),
            ..Default::default()
        };
        let month = service().generate_calendar_month(2025, 0, &open).unwrap();
        assert!(find(&month, date(2025, 1, 10)).is_range_start);
        assert_eq!(month.days().filter(|d| d.is_in_range).count(), 0);

        let inverted = CalendarOptions {
            range: Some(CalendarRange {
                start: Some(date(2025, 1, 12)),
                end: Some(date(2025, 1, 10)),
            }),
            ..Default::default()
        };
        let month = service().generate_calendar_month(2025, 0, &inverted).unwrap();
        assert_eq!(month.days().filter(|d| d.is_in_range).count(), 0);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let service = service();
        let options = CalendarOptions {
            selected_date: Some(date(2025, 3, 3)),
            ..Default::default()
        };
        assert_eq!(
            service.generate_calendar_month(2025, 2, &options),
            service.generate_calendar_month(2025, 2, &options)
        );
    }
}
