//! Declarative picker configuration.
//!
//! Everything a picker needs that can be written down as plain data lives in
//! [`PickerConfig`]. Parse functions, computed formats, custom localizers and
//! controlled ownership are supplied through the
//! [`DateTimePicker`](crate::widget::widgets::DateTimePicker) builder instead.
//!
//! ```
//! use chronopick::config::PickerConfig;
//!
//! let config = PickerConfig::from_toml_str(r#"
//!     time = false
//!     format = "%Y-%m-%d"
//!     min = "2000-01-01T00:00:00"
//!
//!     [messages]
//!     date_button = "Pick a day"
//! "#).unwrap();
//!
//! assert!(config.date);
//! assert!(!config.time);
//! assert_eq!(config.messages.date_button, "Pick a day");
//! assert_eq!(config.messages.time_button, "Select Time");
//! ```

use std::time::Duration;

use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::datetime::DateRange;
use crate::datetime::dates::{default_max, default_min};
use crate::error::Result;
use chronopick_core::logging::targets;

/// Default minutes between time-list entries.
pub const DEFAULT_STEP: u32 = 30;

/// Default popup animation duration in milliseconds.
pub const DEFAULT_DURATION_MS: u64 = 250;

/// Button label text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Label of the button that toggles the calendar.
    pub date_button: String,
    /// Label of the button that toggles the time list.
    pub time_button: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            date_button: "Select Date".to_string(),
            time_button: "Select Time".to_string(),
        }
    }
}

/// Plain-data picker settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Whether the date part (calendar) is enabled.
    pub date: bool,
    /// Whether the time part (time list) is enabled.
    pub time: bool,
    /// Minutes between time-list entries.
    pub step: u32,
    /// Lower bound of the selectable window.
    pub min: NaiveDateTime,
    /// Upper bound of the selectable window.
    pub max: NaiveDateTime,
    /// Display format pattern. Derived from `date`/`time` when unset.
    pub format: Option<String>,
    /// Pattern shown while the text field has focus.
    pub edit_format: Option<String>,
    /// Pattern for time-list labels.
    pub time_format: Option<String>,
    /// Extra patterns tried when parsing typed text.
    pub parse: Vec<String>,
    /// Culture passed through to the localizer.
    pub culture: Option<String>,
    /// Placeholder text for the empty field.
    pub placeholder: Option<String>,
    /// Form field name.
    pub name: Option<String>,
    /// Whether the widget is disabled.
    pub disabled: bool,
    /// Whether the widget is read-only.
    pub read_only: bool,
    /// Whether popups open above the field.
    pub drop_up: bool,
    /// Popup animation duration in milliseconds.
    pub duration_ms: u64,
    /// Button labels.
    pub messages: Messages,
    /// Id of the element labelling the field.
    pub labelled_by: Option<String>,
    /// Id of the element describing the field.
    pub described_by: Option<String>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            date: true,
            time: true,
            step: DEFAULT_STEP,
            min: default_min(),
            max: default_max(),
            format: None,
            edit_format: None,
            time_format: None,
            parse: Vec::new(),
            culture: None,
            placeholder: None,
            name: None,
            disabled: false,
            read_only: false,
            drop_up: false,
            duration_ms: DEFAULT_DURATION_MS,
            messages: Messages::default(),
            labelled_by: None,
            described_by: None,
        }
    }
}

impl PickerConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    ///
    /// Fails on malformed TOML or on `min > max`.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|err| {
            tracing::error!(target: targets::PICKER, error = %err, "invalid picker configuration");
            err
        })?;
        config.range()?;
        Ok(config)
    }

    /// The configured window, validated.
    pub fn range(&self) -> Result<DateRange> {
        DateRange::new(self.min, self.max)
    }

    /// Popup animation duration.
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Minutes between time-list entries, never zero.
    pub fn step_minutes(&self) -> u32 {
        self.step.max(1)
    }
}
