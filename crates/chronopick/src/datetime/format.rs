//! Format specs and the format resolver.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use super::localizer::Localizer;

/// A formatting function: `(value, culture) -> text`.
pub type FormatFn = Arc<dyn Fn(&NaiveDateTime, Option<&str>) -> String + Send + Sync>;

/// The formats a localizer can hand out on request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    /// Combined date and time.
    Default,
    /// Date only.
    Date,
    /// Time only.
    Time,
}

/// A display or edit format: a literal pattern or a computed function.
#[derive(Clone)]
pub enum FormatSpec {
    /// A `strftime`-style pattern understood by the localizer.
    Literal(String),
    /// A function producing the text directly.
    Computed(FormatFn),
}

impl FormatSpec {
    /// Create a literal pattern.
    pub fn literal(pattern: impl Into<String>) -> Self {
        Self::Literal(pattern.into())
    }

    /// Create a computed format from a closure.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&NaiveDateTime, Option<&str>) -> String + Send + Sync + 'static,
    {
        Self::Computed(Arc::new(f))
    }

    /// The pattern, if this is a literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(pattern) => Some(pattern),
            Self::Computed(_) => None,
        }
    }

    /// Whether this is a computed format.
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }
}

impl fmt::Debug for FormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(pattern) => f.debug_tuple("Literal").field(pattern).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for FormatSpec {
    fn from(pattern: &str) -> Self {
        Self::literal(pattern)
    }
}

impl From<String> for FormatSpec {
    fn from(pattern: String) -> Self {
        Self::Literal(pattern)
    }
}

/// Decide the active format.
///
/// An explicit format wins verbatim. Otherwise both-or-neither parts enabled
/// selects the combined default, and a single enabled part selects its own
/// format. Callers resolve on every use; nothing here is cached.
pub fn resolve_format(
    date_enabled: bool,
    time_enabled: bool,
    explicit: Option<&FormatSpec>,
    localizer: &dyn Localizer,
) -> FormatSpec {
    if let Some(format) = explicit {
        return format.clone();
    }

    let kind = match (date_enabled, time_enabled) {
        (true, false) => FormatKind::Date,
        (false, true) => FormatKind::Time,
        _ => FormatKind::Default,
    };
    localizer.get_format(kind)
}

/// Format an optional value; absent values format as the empty string.
pub fn format_value(
    localizer: &dyn Localizer,
    value: Option<&NaiveDateTime>,
    format: &FormatSpec,
    culture: Option<&str>,
) -> String {
    match value {
        Some(value) => localizer.format(value, format, culture),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datetime::localizer::ChronoLocalizer;
    use chrono::NaiveDate;

    #[test]
    fn test_explicit_format_wins() {
        let localizer = ChronoLocalizer::new();
        let explicit = FormatSpec::literal("%d.%m.%Y");
        let resolved = resolve_format(false, true, Some(&explicit), &localizer);
        assert_eq!(resolved.as_literal(), Some("%d.%m.%Y"));
    }

    #[test]
    fn test_resolve_from_enabled_parts() {
        let localizer = ChronoLocalizer::new().with_formats("D T", "D", "T");

        let both = resolve_format(true, true, None, &localizer);
        let neither = resolve_format(false, false, None, &localizer);
        let date = resolve_format(true, false, None, &localizer);
        let time = resolve_format(false, true, None, &localizer);

        assert_eq!(both.as_literal(), Some("D T"));
        assert_eq!(neither.as_literal(), Some("D T"));
        assert_eq!(date.as_literal(), Some("D"));
        assert_eq!(time.as_literal(), Some("T"));
    }

    #[test]
    fn test_computed_format_passes_through() {
        let localizer = ChronoLocalizer::new();
        let explicit = FormatSpec::computed(|value, _| value.format("%Y").to_string());
        let resolved = resolve_format(true, true, Some(&explicit), &localizer);
        assert!(resolved.is_computed());

        let value = NaiveDate::from_ymd_opt(2031, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(format_value(&localizer, Some(&value), &resolved, None), "2031");
    }

    #[test]
    fn test_absent_value_formats_empty() {
        let localizer = ChronoLocalizer::new();
        let format = FormatSpec::literal("%Y");
        assert_eq!(format_value(&localizer, None, &format, None), "");
    }
}
