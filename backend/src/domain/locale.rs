//! Built-in locale formats and the cache that resolves locale tags to them.
//!
//! Month and weekday names come from chrono's locale data; each supported
//! locale only adds its strftime date patterns.

use chrono::{Days, Locale, NaiveDate};
use log::{debug, warn};
use shared::DateFormat;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const DEFAULT_LOCALE: &str = "en-US";

/// chrono locale plus short/medium/long strftime patterns for one tag
#[derive(Debug, PartialEq, Eq)]
pub struct LocaleFormats {
    pub tag: &'static str,
    pub locale: Locale,
    pub short_pattern: &'static str,
    pub medium_pattern: &'static str,
    pub long_pattern: &'static str,
}

static EN_US: LocaleFormats = LocaleFormats {
    tag: "en-US",
    locale: Locale::en_US,
    short_pattern: "%-m/%-d/%Y",
    medium_pattern: "%b %-d, %Y",
    long_pattern: "%B %-d, %Y",
};

static EN_GB: LocaleFormats = LocaleFormats {
    tag: "en-GB",
    locale: Locale::en_GB,
    short_pattern: "%d/%m/%Y",
    medium_pattern: "%-d %b %Y",
    long_pattern: "%-d %B %Y",
};

static DE_DE: LocaleFormats = LocaleFormats {
    tag: "de-DE",
    locale: Locale::de_DE,
    short_pattern: "%d.%m.%Y",
    medium_pattern: "%-d. %b %Y",
    long_pattern: "%-d. %B %Y",
};

static FR_FR: LocaleFormats = LocaleFormats {
    tag: "fr-FR",
    locale: Locale::fr_FR,
    short_pattern: "%d/%m/%Y",
    medium_pattern: "%-d %b %Y",
    long_pattern: "%-d %B %Y",
};

static ES_ES: LocaleFormats = LocaleFormats {
    tag: "es-ES",
    locale: Locale::es_ES,
    short_pattern: "%-d/%-m/%Y",
    medium_pattern: "%-d %b %Y",
    long_pattern: "%-d de %B de %Y",
};

static BUILT_IN: [&LocaleFormats; 5] = [&EN_US, &EN_GB, &DE_DE, &FR_FR, &ES_ES];

impl LocaleFormats {
    pub fn pattern(&self, format: DateFormat) -> &'static str {
        match format {
            DateFormat::Short => self.short_pattern,
            DateFormat::Medium => self.medium_pattern,
            DateFormat::Long => self.long_pattern,
        }
    }
}

/// Normalised form of a tag: trimmed, `_` as `-`, lowercase
fn normalize(locale: &str) -> String {
    locale.trim().replace('_', "-").to_ascii_lowercase()
}

/// Resolve a tag to a built-in locale: exact match, then language match, then `None`
fn resolve(locale: &str) -> Option<&'static LocaleFormats> {
    let normalized = normalize(locale);
    if let Some(formats) = BUILT_IN.iter().find(|formats| formats.tag.eq_ignore_ascii_case(&normalized)) {
        return Some(*formats);
    }
    let language = normalized.split('-').next().unwrap_or_default();
    BUILT_IN
        .iter()
        .find(|formats| {
            formats
                .tag
                .split('-')
                .next()
                .is_some_and(|lang| !language.is_empty() && lang.eq_ignore_ascii_case(language))
        })
        .copied()
}

/// A resolved locale with its calendar names rendered once
#[derive(Debug)]
pub struct LocaleEntry {
    pub formats: &'static LocaleFormats,
    /// January first
    pub months: Vec<String>,
    /// Sunday first
    pub weekdays_short: Vec<String>,
}

impl LocaleEntry {
    fn build(formats: &'static LocaleFormats) -> Self {
        // 2023-01-01 is a Sunday
        let first_sunday = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();
        let months = (1..=12)
            .filter_map(|month| NaiveDate::from_ymd_opt(2023, month, 1))
            .map(|date| date.format_localized("%B", formats.locale).to_string())
            .collect();
        let weekdays_short = (0..7)
            .filter_map(|offset| first_sunday.checked_add_days(Days::new(offset)))
            .map(|date| date.format_localized("%a", formats.locale).to_string())
            .collect();

        Self {
            formats,
            months,
            weekdays_short,
        }
    }

    pub fn tag(&self) -> &'static str {
        self.formats.tag
    }

    pub fn format_date(&self, date: NaiveDate, format: DateFormat) -> String {
        date.format_localized(self.formats.pattern(format), self.formats.locale)
            .to_string()
    }
}

/// Resolved locale tag to entry, populated on first use and never invalidated.
///
/// Unsupported tags share the en-US entry, so the map never holds more
/// entries than there are built-in locales.
#[derive(Clone, Default)]
pub struct LocaleCache {
    entries: Arc<Mutex<HashMap<&'static str, Arc<LocaleEntry>>>>,
}

impl LocaleCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, locale: &str) -> Arc<LocaleEntry> {
        let formats = match resolve(locale) {
            Some(formats) => formats,
            None => {
                warn!("🌐 LOCALE: Unsupported locale '{}', falling back to {}", locale, DEFAULT_LOCALE);
                &EN_US
            }
        };

        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries
            .entry(formats.tag)
            .or_insert_with(|| {
                debug!("🌐 LOCALE: Loaded {} for '{}'", formats.tag, locale);
                Arc::new(LocaleEntry::build(formats))
            })
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
