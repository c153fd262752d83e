//! Widget layer of chronopick.
//!
//! - [`events`]: key and focus events delivered by the host
//! - [`view`]: the open-state machine
//! - [`focus`]: composite focus tracking with deferred blur
//! - [`accessibility`]: the render model and element ids
//! - [`widgets`]: [`DateTimePicker`] and its calendar and time-list surfaces
//!
//! The picker is headless. A host forwards input events to it, connects to
//! its signals, and draws whatever [`DateTimePicker::render`] describes.

pub mod accessibility;
pub mod events;
pub mod focus;
pub mod view;
pub mod widgets;

pub use accessibility::{
    AccessibleRole, ButtonView, InputView, InstanceIds, PickerView, SurfaceView,
};
pub use events::{
    CompositePart, EventBase, FocusInEvent, FocusOutEvent, FocusReason, Key, KeyPressEvent,
    KeyboardModifiers,
};
pub use focus::{FocusChange, FocusCoordinator};
pub use view::{EnabledViews, OpenState, View};
pub use widgets::{
    CalendarWidget, DateSurface, DateTimePicker, Popup, SurfaceOutcome, TimeEntry, TimeList,
    TimeSurface,
};
