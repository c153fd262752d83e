//! Error types for the picker.

use chrono::NaiveDateTime;

/// Result type alias for picker operations.
pub type Result<T> = std::result::Result<T, PickerError>;

/// Errors that can escape the picker.
///
/// Unparsable text is not an error: it resolves to "no value". Only
/// configuration problems surface here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PickerError {
    /// No parse function exists, the display format is computed, and no
    /// string formats are available to fall back on.
    #[error(
        "unable to parse `{text}`: no parse formats are configured and the display format is \
         computed; provide a parse function or a literal format string"
    )]
    NoParseFormat { text: String },

    /// A range whose lower bound lies after its upper bound.
    #[error("invalid range: min {min} is after max {max}")]
    InvalidRange {
        min: NaiveDateTime,
        max: NaiveDateTime,
    },

    /// A configuration document that could not be read.
    #[error("invalid picker configuration: {0}")]
    Config(String),
}

impl PickerError {
    /// Create a parse-configuration error.
    pub fn no_parse_format(text: impl Into<String>) -> Self {
        Self::NoParseFormat { text: text.into() }
    }

    /// Returns true if this is the structural parse-configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::NoParseFormat { .. } | Self::Config(_))
    }
}

impl From<toml::de::Error> for PickerError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
