//! The picker and its popup surfaces.

mod calendar;
mod date_time_picker;
mod popup;
mod surface;
mod time_list;

pub use calendar::CalendarWidget;
pub use date_time_picker::{DateSurfaceFactory, DateTimePicker, KeyHook, TimeSurfaceFactory};
pub use popup::Popup;
pub use surface::{
    ActiveSurface, CalendarProps, DateSurface, Dispatched, SurfaceOutcome, TimeEntry,
    TimeListProps, TimeSurface,
};
pub use time_list::TimeList;
