//! Popup surface contracts.
//!
//! The picker talks to its calendar and time list only through
//! [`DateSurface`] and [`TimeSurface`]. Key dispatch goes through
//! [`ActiveSurface`], a tagged borrow of whichever surface is open.

use chrono::{NaiveDate, NaiveDateTime};

use crate::datetime::FormatSpec;
use crate::widget::events::KeyPressEvent;

/// What a surface did with a key event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceOutcome<T> {
    /// The key is not one the surface handles.
    Ignored,
    /// The key moved internal state (focused item, type-ahead).
    Handled,
    /// The visible date changed.
    Navigated(NaiveDate),
    /// An item was chosen.
    Selected(T),
}

impl<T> SurfaceOutcome<T> {
    /// Whether the surface consumed the event.
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Inputs for a calendar surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarProps {
    /// The picker's value.
    pub value: Option<NaiveDateTime>,
    /// Earliest selectable instant.
    pub min: NaiveDateTime,
    /// Latest selectable instant.
    pub max: NaiveDateTime,
    /// The date the calendar shows and its cursor starts on.
    pub current_date: NaiveDate,
    /// Id given to the active cell.
    pub active_id: String,
}

/// One choosable time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    /// The instant this entry stands for.
    pub date: NaiveDateTime,
    /// Display text.
    pub label: String,
}

/// Inputs for a time-list surface.
#[derive(Debug, Clone)]
pub struct TimeListProps {
    /// Earliest selectable instant.
    pub min: NaiveDateTime,
    /// Latest selectable instant.
    pub max: NaiveDateTime,
    /// Minutes between entries.
    pub step: u32,
    /// The picker's current (calendar) date.
    pub current_date: Option<NaiveDate>,
    /// The picker's value.
    pub value: Option<NaiveDateTime>,
    /// Id given to the active option.
    pub active_id: String,
    /// Build entries on the value's day rather than the reference day.
    pub preserve_date: bool,
    /// Label format.
    pub format: FormatSpec,
    /// Culture passed to the localizer.
    pub culture: Option<String>,
}

/// A date-choosing popup surface.
pub trait DateSurface: Send + Sync {
    /// Replace the surface inputs.
    fn sync(&mut self, props: CalendarProps);

    /// Handle a key forwarded while the calendar is open.
    fn handle_key_down(&mut self, event: &mut KeyPressEvent) -> SurfaceOutcome<NaiveDate>;

    /// The date under the cursor.
    fn focused_date(&self) -> NaiveDate;

    /// Id of the active cell.
    fn active_id(&self) -> &str;
}

/// A time-choosing popup surface.
pub trait TimeSurface: Send + Sync {
    /// Replace the surface inputs.
    fn sync(&mut self, props: TimeListProps);

    /// Re-measure: rebuild entries and focus the one matching the value.
    fn refresh(&mut self);

    /// Handle a key forwarded while the time list is open.
    fn handle_key_down(&mut self, event: &mut KeyPressEvent) -> SurfaceOutcome<TimeEntry>;

    /// Handle a character key press (type-ahead).
    fn handle_key_press(&mut self, event: &mut KeyPressEvent) -> SurfaceOutcome<TimeEntry>;

    /// The entry under the cursor.
    fn focused_entry(&self) -> Option<&TimeEntry>;

    /// Id of the active option.
    fn active_id(&self) -> &str;
}

/// The surface keyboard input goes to, tagged by which popup is open.
pub enum ActiveSurface<'a> {
    /// No popup is open.
    Closed,
    /// The calendar is open.
    Date(&'a mut dyn DateSurface),
    /// The time list is open.
    Time(&'a mut dyn TimeSurface),
}

/// The result of forwarding a key to the active surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    /// Nothing was open.
    Nothing,
    /// The calendar's answer.
    Date(SurfaceOutcome<NaiveDate>),
    /// The time list's answer.
    Time(SurfaceOutcome<TimeEntry>),
}

impl ActiveSurface<'_> {
    /// Forward a key down to the open surface.
    pub fn key_down(self, event: &mut KeyPressEvent) -> Dispatched {
        match self {
            Self::Closed => Dispatched::Nothing,
            Self::Date(surface) => Dispatched::Date(surface.handle_key_down(event)),
            Self::Time(surface) => Dispatched::Time(surface.handle_key_down(event)),
        }
    }

    /// Forward a character key press. Only the time list takes these.
    pub fn key_press(self, event: &mut KeyPressEvent) -> Dispatched {
        match self {
            Self::Time(surface) => Dispatched::Time(surface.handle_key_press(event)),
            Self::Closed | Self::Date(_) => Dispatched::Nothing,
        }
    }
}
