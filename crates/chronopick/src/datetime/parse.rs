//! Parsing typed text into a date-time value.
//!
//! A [`ParseSpec`] is either a parse function, which is used exclusively, or
//! a list of extra pattern strings. [`ParseCandidates::build`] turns the
//! spec plus the active display and edit formats into the ordered list of
//! patterns that [`parse_with_formats`] tries one by one.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use super::format::FormatSpec;
use super::localizer::Localizer;
use crate::error::{PickerError, Result};
use chronopick_core::logging::targets;

/// A parse function: `(text, culture) -> value`.
pub type ParseFn = Arc<dyn Fn(&str, Option<&str>) -> Option<NaiveDateTime> + Send + Sync>;

/// How typed text is parsed.
#[derive(Clone)]
pub enum ParseSpec {
    /// Extra patterns tried after the display and edit formats.
    Formats(Vec<String>),
    /// A function that replaces pattern-based parsing entirely.
    Function(ParseFn),
}

impl ParseSpec {
    /// Create a function spec from a closure.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> Option<NaiveDateTime> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }

    /// Create a spec from a list of patterns.
    pub fn formats<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Formats(patterns.into_iter().map(Into::into).collect())
    }
}

impl fmt::Debug for ParseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formats(patterns) => f.debug_tuple("Formats").field(patterns).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<&str> for ParseSpec {
    fn from(pattern: &str) -> Self {
        Self::Formats(vec![pattern.to_string()])
    }
}

impl From<String> for ParseSpec {
    fn from(pattern: String) -> Self {
        Self::Formats(vec![pattern])
    }
}

impl From<Vec<String>> for ParseSpec {
    fn from(patterns: Vec<String>) -> Self {
        Self::Formats(patterns)
    }
}

impl From<Vec<&str>> for ParseSpec {
    fn from(patterns: Vec<&str>) -> Self {
        Self::formats(patterns)
    }
}

/// The resolved parse strategy for one attempt.
#[derive(Clone)]
pub enum ParseCandidates {
    /// Delegate to a parse function.
    Function(ParseFn),
    /// Try these patterns in order; the first success wins.
    Formats(Vec<String>),
}

impl ParseCandidates {
    /// Build the candidate list.
    ///
    /// Order: a parse function short-circuits everything. Otherwise the
    /// display format (when literal), then the edit format (when literal and
    /// distinct), then the extra patterns from `parse`. Duplicates are
    /// dropped. An empty list means parsing is structurally impossible.
    pub fn build(
        parse: Option<&ParseSpec>,
        display: &FormatSpec,
        edit: Option<&FormatSpec>,
    ) -> Self {
        let extra: &[String] = match parse {
            Some(ParseSpec::Function(f)) => return Self::Function(Arc::clone(f)),
            Some(ParseSpec::Formats(patterns)) => patterns.as_slice(),
            None => &[],
        };

        let mut formats: Vec<String> = Vec::new();
        let literals = display
            .as_literal()
            .into_iter()
            .chain(edit.and_then(FormatSpec::as_literal))
            .chain(extra.iter().map(String::as_str));
        for pattern in literals {
            if !formats.iter().any(|f| f == pattern) {
                formats.push(pattern.to_string());
            }
        }
        Self::Formats(formats)
    }

    /// The patterns, or an empty slice for a function.
    pub fn formats(&self) -> &[String] {
        match self {
            Self::Formats(formats) => formats,
            Self::Function(_) => &[],
        }
    }

    /// Whether parsing can be attempted at all.
    pub fn is_usable(&self) -> bool {
        match self {
            Self::Function(_) => true,
            Self::Formats(formats) => !formats.is_empty(),
        }
    }
}

impl fmt::Debug for ParseCandidates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Formats(formats) => f.debug_tuple("Formats").field(formats).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// Try each pattern in order and return the first successful parse.
pub fn parse_with_formats(
    localizer: &dyn Localizer,
    text: &str,
    formats: &[String],
    culture: Option<&str>,
) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|pattern| localizer.parse(text, pattern, culture))
}

/// Parse `text` using `candidates`.
///
/// Unparsable or empty text yields `Ok(None)`. The only error is a
/// configuration with nothing to parse with, which is reported on every
/// attempt.
pub fn parse_text(
    localizer: &dyn Localizer,
    text: &str,
    candidates: &ParseCandidates,
    culture: Option<&str>,
) -> Result<Option<NaiveDateTime>> {
    let result = match candidates {
        ParseCandidates::Function(f) => f(text, culture),
        ParseCandidates::Formats(formats) if formats.is_empty() => {
            let err = PickerError::no_parse_format(text);
            tracing::error!(target: targets::PARSE, error = %err, "parse configuration error");
            return Err(err);
        }
        ParseCandidates::Formats(formats) => {
            if text.trim().is_empty() {
                return Ok(None);
            }
            parse_with_formats(localizer, text, formats, culture)
        }
    };

    if result.is_none() {
        tracing::trace!(target: targets::PARSE, text, "text did not parse");
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::localizer::ChronoLocalizer;
    use chrono::NaiveDate;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn test_candidates_order_and_dedup() {
        let display = FormatSpec::literal("%m/%d/%Y");
        let edit = FormatSpec::literal("%Y-%m-%d");
        let parse = ParseSpec::formats(["%d.%m.%Y", "%Y-%m-%d"]);

        let candidates = ParseCandidates::build(Some(&parse), &display, Some(&edit));
        assert_eq!(candidates.formats(), ["%m/%d/%Y", "%Y-%m-%d", "%d.%m.%Y"]);
    }

    #[test]
    fn test_computed_display_falls_back_to_edit_and_list() {
        let display = FormatSpec::computed(|_, _| String::new());
        let edit = FormatSpec::literal("%Y-%m-%d");

        let candidates = ParseCandidates::build(None, &display, Some(&edit));
        assert_eq!(candidates.formats(), ["%Y-%m-%d"]);
        assert!(candidates.is_usable());
    }

    #[test]
    fn test_structurally_impossible_configuration() {
        let localizer = ChronoLocalizer::new();
        let display = FormatSpec::computed(|_, _| String::new());
        let candidates = ParseCandidates::build(None, &display, None);
        assert!(!candidates.is_usable());

        let err = parse_text(&localizer, "2024-01-01", &candidates, None).unwrap_err();
        assert!(err.is_configuration());
        assert_eq!(err, PickerError::no_parse_format("2024-01-01"));

        // Reported on every attempt, including empty text.
        assert!(parse_text(&localizer, "", &candidates, None).is_err());
    }

    #[test]
    fn test_parse_function_short_circuits() {
        let localizer = ChronoLocalizer::new();
        let fixed = dt(2001, 2, 3, 4, 5);
        let parse = ParseSpec::function(move |text, culture| {
            (text == "magic" && culture == Some("en-GB")).then_some(fixed)
        });
        let display = FormatSpec::literal("%Y");

        let candidates = ParseCandidates::build(Some(&parse), &display, None);
        assert!(candidates.formats().is_empty());
        assert_eq!(
            parse_text(&localizer, "magic", &candidates, Some("en-GB")).unwrap(),
            Some(fixed)
        );
        assert_eq!(parse_text(&localizer, "2024", &candidates, None).unwrap(), None);
    }

    #[test]
    fn test_first_matching_format_wins() {
        let localizer = ChronoLocalizer::new();
        let candidates = ParseCandidates::Formats(vec![
            "%Y-%m-%d %H:%M".to_string(),
            "%Y-%m-%d".to_string(),
        ]);

        assert_eq!(
            parse_text(&localizer, "2024-03-05 14:30", &candidates, None).unwrap(),
            Some(dt(2024, 3, 5, 14, 30))
        );
        assert_eq!(
            parse_text(&localizer, "2024-03-05", &candidates, None).unwrap(),
            Some(dt(2024, 3, 5, 0, 0))
        );
    }

    #[test]
    fn test_unparsable_and_empty_text_is_none() {
        let localizer = ChronoLocalizer::new();
        let candidates = ParseCandidates::Formats(vec!["%Y-%m-%d".to_string()]);

        assert_eq!(parse_text(&localizer, "", &candidates, None).unwrap(), None);
        assert_eq!(parse_text(&localizer, "  ", &candidates, None).unwrap(), None);
        assert_eq!(parse_text(&localizer, "soon", &candidates, None).unwrap(), None);
    }

    #[test]
    fn test_spec_conversions() {
        assert!(matches!(ParseSpec::from("%Y"), ParseSpec::Formats(ref v) if v == &["%Y"]));
        assert!(matches!(
            ParseSpec::from(vec!["%Y", "%m"]),
            ParseSpec::Formats(ref v) if v.len() == 2
        ));
    }
}
