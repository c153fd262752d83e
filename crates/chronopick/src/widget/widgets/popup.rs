//! Popup state for a picker surface.
//!
//! A [`Popup`] only tracks whether its surface is shown, in which direction
//! it drops and how long its animation runs. Positioning and animation are
//! the host's business.
//!
//! ```
//! use std::time::Duration;
//! use chronopick::widget::widgets::Popup;
//!
//! let mut popup = Popup::new(Duration::from_millis(250), false);
//! popup.opening.connect(|()| println!("opening"));
//!
//! assert!(popup.set_open(true));
//! assert!(!popup.set_open(true));
//! assert!(popup.is_open());
//! ```

use std::time::Duration;

use chronopick_core::Signal;

use crate::config::DEFAULT_DURATION_MS;

/// Show/hide state of one popup.
///
/// # Signals
///
/// - `opening()`: Emitted when the popup starts to open
/// - `closed()`: Emitted when the popup closes
pub struct Popup {
    open: bool,
    drop_up: bool,
    duration: Duration,

    /// Signal emitted when the popup starts to open.
    pub opening: Signal<()>,
    /// Signal emitted when the popup closes.
    pub closed: Signal<()>,
}

impl Popup {
    /// Create a closed popup.
    pub fn new(duration: Duration, drop_up: bool) -> Self {
        Self {
            open: false,
            drop_up,
            duration,
            opening: Signal::new(),
            closed: Signal::new(),
        }
    }

    /// Check if the popup is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Show or hide the popup.
    ///
    /// Returns `true` when this call started opening it.
    pub fn set_open(&mut self, open: bool) -> bool {
        if self.open == open {
            return false;
        }
        self.open = open;
        if open {
            self.opening.emit(());
        } else {
            self.closed.emit(());
        }
        open
    }

    /// Whether the popup opens above its anchor.
    pub fn drop_up(&self) -> bool {
        self.drop_up
    }

    /// Set whether the popup opens above its anchor.
    pub fn set_drop_up(&mut self, drop_up: bool) {
        self.drop_up = drop_up;
    }

    /// Animation duration.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Set the animation duration.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }
}

impl Default for Popup {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DURATION_MS), false)
    }
}

static_assertions::assert_impl_all!(Popup: Send, Sync);
