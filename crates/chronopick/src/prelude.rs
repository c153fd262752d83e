//! Prelude module for chronopick.
//!
//! ```
//! use chronopick::prelude::*;
//! ```
//!
//! This provides access to:
//! - The picker (`DateTimePicker`) and its configuration (`PickerConfig`)
//! - Open state and parts (`OpenState`, `View`, `CompositePart`)
//! - Events (`KeyPressEvent`, `Key`, `FocusInEvent`, `FocusOutEvent`)
//! - Formatting and parsing (`Localizer`, `ChronoLocalizer`, `FormatSpec`, `ParseSpec`)

// ============================================================================
// Core
// ============================================================================

pub use chronopick_core::{Controllable, Signal};

// ============================================================================
// Picker
// ============================================================================

pub use crate::config::{Messages, PickerConfig};
pub use crate::error::{PickerError, Result};
pub use crate::widget::widgets::{DateTimePicker, TimeEntry};

// ============================================================================
// State and Events
// ============================================================================

pub use crate::widget::events::{
    CompositePart, FocusInEvent, FocusOutEvent, FocusReason, Key, KeyPressEvent,
    KeyboardModifiers,
};
pub use crate::widget::view::{OpenState, View};
pub use crate::widget::accessibility::PickerView;

// ============================================================================
// Formatting and Parsing
// ============================================================================

pub use crate::datetime::{ChronoLocalizer, DateRange, FormatSpec, Localizer, ParseSpec};
