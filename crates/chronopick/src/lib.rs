//! chronopick - a headless combined date and time picker.
//!
//! [`DateTimePicker`](widget::widgets::DateTimePicker) pairs a text field
//! with a calendar popup and a time-list popup and reconciles typed text,
//! calendar picks and time picks into a single optional
//! [`NaiveDateTime`](chrono::NaiveDateTime).
//!
//! - Value, open state and current date can each be owned by the widget or
//!   by the caller ([`Controllable`](chronopick_core::Controllable)).
//! - Typed text is parsed through a list of candidate formats or a parse
//!   function; committed values are clamped to `[min, max]`.
//! - Formatting and parsing go through a [`Localizer`](datetime::Localizer).
//! - Rendering is left to the host; [`render`](widget::widgets::DateTimePicker::render)
//!   returns an accessible description of what to draw.
//!
//! # Example
//!
//! ```
//! use chronopick::prelude::*;
//!
//! let mut picker = DateTimePicker::new();
//! picker.toggled.connect(|state| println!("popup: {state}"));
//!
//! let mut event = KeyPressEvent::with_modifiers(Key::ArrowDown, KeyboardModifiers::ALT);
//! picker.handle_key_down(&mut event).unwrap();
//! assert_eq!(picker.open_state(), OpenState::DateOpen);
//! ```
//!
//! # Logging
//!
//! The crate logs through `tracing` under the targets in
//! [`chronopick_core::logging::targets`].

pub mod config;
pub mod datetime;
pub mod error;
pub mod prelude;
pub mod widget;

pub use config::PickerConfig;
pub use error::{PickerError, Result};
pub use widget::widgets::DateTimePicker;
