//! Date and time helpers used by the picker.
//!
//! - [`dates`]: merging date-only and time-only parts, range clamping
//! - [`format`]: format specs and the format resolver
//! - [`parse`]: candidate-format parsing of typed text
//! - [`localizer`]: the formatting/parsing collaborator and its chrono default

pub mod dates;
pub mod format;
pub mod localizer;
pub mod parse;

pub use dates::{DateRange, clamp, merge};
pub use format::{FormatFn, FormatKind, FormatSpec, format_value, resolve_format};
pub use localizer::{ChronoLocalizer, Localizer};
pub use parse::{ParseCandidates, ParseFn, ParseSpec, parse_text, parse_with_formats};
