//! The open/view state machine.
//!
//! These functions never change state. Each one looks at the current
//! [`OpenState`] and returns the state the widget *intends* to move to, or
//! `None` when the request is a no-op. The controller emits the intent as a
//! toggle notification and lets its open-state owner decide what to store.

use std::fmt;

/// A popup surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// The calendar.
    Date,
    /// The time list.
    Time,
}

impl View {
    /// The other view.
    pub fn other(self) -> Self {
        match self {
            Self::Date => Self::Time,
            Self::Time => Self::Date,
        }
    }
}

/// Which popup, if any, is open. At most one is open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OpenState {
    /// No popup is open.
    #[default]
    Closed,
    /// The calendar popup is open.
    DateOpen,
    /// The time-list popup is open.
    TimeOpen,
}

impl OpenState {
    /// Whether any popup is open.
    pub fn is_open(self) -> bool {
        self != Self::Closed
    }

    /// The open view, if any.
    pub fn view(self) -> Option<View> {
        match self {
            Self::Closed => None,
            Self::DateOpen => Some(View::Date),
            Self::TimeOpen => Some(View::Time),
        }
    }
}

impl From<View> for OpenState {
    fn from(view: View) -> Self {
        match view {
            View::Date => Self::DateOpen,
            View::Time => Self::TimeOpen,
        }
    }
}

impl From<Option<View>> for OpenState {
    fn from(view: Option<View>) -> Self {
        view.map_or(Self::Closed, Self::from)
    }
}

impl fmt::Display for OpenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Closed => "closed",
            Self::DateOpen => "date",
            Self::TimeOpen => "time",
        })
    }
}

/// Which parts of the picker are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnabledViews {
    /// The date part (calendar).
    pub date: bool,
    /// The time part (time list).
    pub time: bool,
}

impl EnabledViews {
    /// Both parts enabled.
    pub const BOTH: Self = Self {
        date: true,
        time: true,
    };

    /// Create from flags.
    pub fn new(date: bool, time: bool) -> Self {
        Self { date, time }
    }

    /// Whether `view` may be opened.
    pub fn allows(self, view: View) -> bool {
        match view {
            View::Date => self.date,
            View::Time => self.time,
        }
    }

    /// Whether no part is enabled.
    pub fn is_empty(self) -> bool {
        !self.date && !self.time
    }
}

impl Default for EnabledViews {
    fn default() -> Self {
        Self::BOTH
    }
}

/// The view a non-specific open request resolves to.
///
/// A single enabled part always wins. With both enabled the view cycles away
/// from the open one, starting at the calendar. With neither enabled there is
/// nothing to open.
pub fn next_view(current: OpenState, enabled: EnabledViews) -> Option<View> {
    match (enabled.date, enabled.time) {
        (true, false) => Some(View::Date),
        (false, true) => Some(View::Time),
        (true, true) => Some(current.view().map_or(View::Date, View::other)),
        (false, false) => None,
    }
}

/// Intent of an open request, optionally for a specific view.
///
/// Returns `None` when the resolved view is already open, when it is
/// disabled, or when nothing can be opened.
pub fn open(current: OpenState, view: Option<View>, enabled: EnabledViews) -> Option<OpenState> {
    let view = match view {
        Some(view) => view,
        None => next_view(current, enabled)?,
    };
    if !enabled.allows(view) {
        return None;
    }

    let next = OpenState::from(view);
    (next != current).then_some(next)
}

/// Intent of a close request. `None` when already closed.
pub fn close(current: OpenState) -> Option<OpenState> {
    current.is_open().then_some(OpenState::Closed)
}

/// Intent of a toggle for `view`.
///
/// Opens `view` when closed or when a different view is open; closes when
/// `view` itself is open.
pub fn toggle(current: OpenState, view: View, enabled: EnabledViews) -> Option<OpenState> {
    if current.view() == Some(view) {
        close(current)
    } else {
        open(current, Some(view), enabled)
    }
}
