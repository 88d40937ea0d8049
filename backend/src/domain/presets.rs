//! Quick date presets ("Last Week", "Last Month", ...).
//!
//! A preset starts at midnight `N` days ago. It ends at the current time
//! rounded down to the half hour when it ends today, or at 23:59 when it
//! ends on a past day.

use chrono::{Days, NaiveDate};
use log::debug;
use shared::{DateRangeValue, QuickDatePreset, TimeValue};

use super::clock::SharedClock;
use super::time_service::TimeService;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePresetKind {
    Today,
    Yesterday,
    LastWeek,
    LastTwoWeeks,
    LastMonth,
    LastThreeMonths,
}

impl DatePresetKind {
    pub const ALL: [DatePresetKind; 6] = [
        DatePresetKind::Today,
        DatePresetKind::Yesterday,
        DatePresetKind::LastWeek,
        DatePresetKind::LastTwoWeeks,
        DatePresetKind::LastMonth,
        DatePresetKind::LastThreeMonths,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DatePresetKind::Today => "today",
            DatePresetKind::Yesterday => "yesterday",
            DatePresetKind::LastWeek => "last_week",
            DatePresetKind::LastTwoWeeks => "last_two_weeks",
            DatePresetKind::LastMonth => "last_month",
            DatePresetKind::LastThreeMonths => "last_three_months",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DatePresetKind::Today => "Today",
            DatePresetKind::Yesterday => "Yesterday",
            DatePresetKind::LastWeek => "Last Week",
            DatePresetKind::LastTwoWeeks => "Last 2 Weeks",
            DatePresetKind::LastMonth => "Last Month",
            DatePresetKind::LastThreeMonths => "Last 3 Months",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Days before today of the (start, end) dates
    fn offsets(&self) -> (u64, u64) {
        match self {
            DatePresetKind::Today => (0, 0),
            DatePresetKind::Yesterday => (1, 1),
            DatePresetKind::LastWeek => (7, 0),
            DatePresetKind::LastTwoWeeks => (14, 0),
            DatePresetKind::LastMonth => (30, 0),
            DatePresetKind::LastThreeMonths => (90, 0),
        }
    }
}

#[derive(Clone)]
pub struct PresetService {
    clock: SharedClock,
    time_service: TimeService,
    tolerance_days: u32,
}

impl PresetService {
    pub fn new(clock: SharedClock, tolerance_days: u32) -> Self {
        Self {
            time_service: TimeService::new(clock.clone()),
            clock,
            tolerance_days,
        }
    }

    /// Every preset with its value computed against the current clock
    pub fn quick_date_presets(&self) -> Vec<QuickDatePreset> {
        DatePresetKind::ALL.iter().map(|kind| self.preset(*kind)).collect()
    }

    pub fn preset(&self, kind: DatePresetKind) -> QuickDatePreset {
        QuickDatePreset {
            id: kind.id().to_string(),
            label: kind.label().to_string(),
            value: self.preset_value(kind),
        }
    }

    pub fn preset_value(&self, kind: DatePresetKind) -> DateRangeValue {
        let today = self.clock.today();
        let (start_offset, end_offset) = kind.offsets();
        let start_date = days_before(today, start_offset);
        let end_date = days_before(today, end_offset);
        let end_time = if end_date == today {
            self.time_service.current_time_rounded()
        } else {
            TimeValue::end_of_day()
        };

        DateRangeValue {
            start_date: Some(start_date),
            start_time: Some(TimeValue::midnight()),
            end_date: Some(end_date),
            end_time: Some(end_time),
        }
    }

    /// The preset `range` approximates, within the configured per-side tolerance.
    ///
    /// Only dates are compared. When several presets are within tolerance the
    /// one with the smallest total deviation wins.
    pub fn matching_preset(&self, range: &DateRangeValue) -> Option<QuickDatePreset> {
        let (start, end) = (range.start_date?, range.end_date?);
        let tolerance = self.tolerance_days as i64;

        let best = DatePresetKind::ALL
            .iter()
            .filter_map(|kind| {
                let value = self.preset_value(*kind);
                let start_gap = (start - value.start_date?).num_days().abs();
                let end_gap = (end - value.end_date?).num_days().abs();
                (start_gap <= tolerance && end_gap <= tolerance).then_some((start_gap + end_gap, *kind))
            })
            .min_by_key(|(deviation, _)| *deviation)
            .map(|(_, kind)| kind)?;

        debug!("📋 PRESETS: Range {:?} - {:?} matches preset '{}'", start, end, best.id());
        Some(self.preset(best))
    }
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}
