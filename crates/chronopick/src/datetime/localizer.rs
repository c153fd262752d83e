//! The localizer collaborator.
//!
//! The picker never formats or parses on its own; it asks a [`Localizer`].
//! [`ChronoLocalizer`] is the default implementation and understands
//! `strftime`-style patterns through `chrono`. Culture strings are passed
//! through untouched so a localizer backed by locale data can honor them.

use std::fmt::Write as _;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use super::format::{FormatKind, FormatSpec};
use chronopick_core::logging::targets;

/// Formatting, parsing and comparison of date-time values.
pub trait Localizer: Send + Sync {
    /// Format `value` with `format`. Never panics; an unusable pattern
    /// produces an empty string.
    fn format(&self, value: &NaiveDateTime, format: &FormatSpec, culture: Option<&str>) -> String;

    /// Parse `text` with a single literal `pattern`.
    fn parse(&self, text: &str, pattern: &str, culture: Option<&str>) -> Option<NaiveDateTime>;

    /// The format this localizer uses for `kind`.
    fn get_format(&self, kind: FormatKind) -> FormatSpec;

    /// Equality rule used to suppress redundant change notifications.
    fn eq(&self, a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
        a == b
    }

    /// The day used when a value has no date of its own.
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Patterns handed out by [`ChronoLocalizer::get_format`].
#[derive(Debug, Clone, PartialEq, Eq)]
struct DefaultFormats {
    default: String,
    date: String,
    time: String,
}

impl Default for DefaultFormats {
    fn default() -> Self {
        Self {
            default: "%m/%d/%Y %I:%M %p".to_string(),
            date: "%m/%d/%Y".to_string(),
            time: "%I:%M %p".to_string(),
        }
    }
}

/// A [`Localizer`] built on `chrono`'s `strftime` patterns.
#[derive(Debug, Clone, Default)]
pub struct ChronoLocalizer {
    formats: DefaultFormats,
    /// Fixed reference day; `None` means the local current day.
    today: Option<NaiveDate>,
}

impl ChronoLocalizer {
    /// Create a localizer with US-style default patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default, date and time patterns.
    pub fn with_formats(
        mut self,
        default: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        self.formats = DefaultFormats {
            default: default.into(),
            date: date.into(),
            time: time.into(),
        };
        self
    }

    /// Pin the reference day instead of reading the clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn format_pattern(value: &NaiveDateTime, pattern: &str) -> String {
        let mut out = String::new();
        if write!(out, "{}", value.format(pattern)).is_err() {
            tracing::trace!(target: targets::PARSE, pattern, "unusable format pattern");
            return String::new();
        }
        out
    }
}

impl Localizer for ChronoLocalizer {
    fn format(&self, value: &NaiveDateTime, format: &FormatSpec, culture: Option<&str>) -> String {
        match format {
            FormatSpec::Literal(pattern) => Self::format_pattern(value, pattern),
            FormatSpec::Computed(f) => f(value, culture),
        }
    }

    fn parse(&self, text: &str, pattern: &str, _culture: Option<&str>) -> Option<NaiveDateTime> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        // Full date-time, then date-only at midnight, then time-only on the
        // reference day.
        NaiveDateTime::parse_from_str(text, pattern)
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(text, pattern)
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .or_else(|| {
                NaiveTime::parse_from_str(text, pattern)
                    .ok()
                    .map(|t| self.today().and_time(t))
            })
    }

    fn get_format(&self, kind: FormatKind) -> FormatSpec {
        let pattern = match kind {
            FormatKind::Default => &self.formats.default,
            FormatKind::Date => &self.formats.date,
            FormatKind::Time => &self.formats.time,
        };
        FormatSpec::literal(pattern.clone())
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}
