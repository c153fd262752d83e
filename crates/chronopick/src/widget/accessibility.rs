//! Accessible render model of the picker.
//!
//! [`DateTimePicker::render`](crate::widget::widgets::DateTimePicker::render)
//! returns a [`PickerView`]: plain data describing the text field, the
//! buttons and every mounted surface, including the ARIA relationships
//! between them. A host maps it onto its own widgets.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::widget::view::{OpenState, View};

/// Global counter for instance id prefixes.
static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Element ids of one picker instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceIds {
    prefix: String,
}

impl InstanceIds {
    /// Allocate ids with a fresh unique prefix.
    pub fn next() -> Self {
        let n = NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed);
        Self::with_prefix(format!("rw_{n}"))
    }

    /// Use an explicit prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The shared prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn id(&self, suffix: &str) -> String {
        format!("{}{}", self.prefix, suffix)
    }

    /// The text field.
    pub fn input(&self) -> String {
        self.id("_input")
    }

    /// The calendar surface.
    pub fn date(&self) -> String {
        self.id("_date")
    }

    /// The time-list surface.
    pub fn listbox(&self) -> String {
        self.id("_listbox")
    }

    /// The calendar's active cell.
    pub fn calendar_active_cell(&self) -> String {
        self.id("_calendar_active_cell")
    }

    /// The time list's active option.
    pub fn listbox_active_option(&self) -> String {
        self.id("_listbox_active_option")
    }

    /// Id of the active item for `state`, if a popup is open.
    pub fn active_descendant(&self, state: OpenState) -> Option<String> {
        state.view().map(|view| match view {
            View::Date => self.calendar_active_cell(),
            View::Time => self.listbox_active_option(),
        })
    }

    /// The `aria-owns` list: the calendar and/or time list ids.
    pub fn owns(&self, date: bool, time: bool) -> String {
        let mut owns = String::new();
        if date {
            owns.push_str(&self.date());
        }
        if time {
            owns.push(' ');
            owns.push_str(&self.listbox());
        }
        owns.trim().to_string()
    }
}

/// Semantic role of a rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibleRole {
    /// The text field.
    ComboBox,
    /// A popup toggle button.
    Button,
    /// The calendar grid.
    Grid,
    /// The time list.
    ListBox,
}

impl AccessibleRole {
    /// The ARIA role name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ComboBox => "combobox",
            Self::Button => "button",
            Self::Grid => "grid",
            Self::ListBox => "listbox",
        }
    }
}

/// The text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputView {
    pub id: String,
    pub role: AccessibleRole,
    /// Text currently shown in the field.
    pub text: String,
    /// Whether the edit format is in use.
    pub editing: bool,
    pub placeholder: Option<String>,
    pub name: Option<String>,
    pub disabled: bool,
    pub read_only: bool,
    /// `aria-haspopup`.
    pub has_popup: bool,
    /// `aria-expanded`.
    pub expanded: bool,
    /// `aria-activedescendant`.
    pub active_descendant: Option<String>,
    /// `aria-owns`.
    pub owns: String,
    /// `aria-labelledby`.
    pub labelled_by: Option<String>,
    /// `aria-describedby`.
    pub described_by: Option<String>,
}

/// A popup toggle button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonView {
    pub role: AccessibleRole,
    /// The popup this button toggles.
    pub view: View,
    pub label: String,
    pub disabled: bool,
}

/// A mounted popup surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceView {
    pub id: String,
    pub role: AccessibleRole,
    pub view: View,
    /// Whether the popup is shown.
    pub open: bool,
    /// `aria-hidden`.
    pub hidden: bool,
    /// `aria-live`.
    pub live: Option<&'static str>,
    /// `aria-labelledby`, always the text field.
    pub labelled_by: String,
    /// Id of the active item.
    pub active_id: String,
    pub drop_up: bool,
    pub duration: Duration,
}

/// Everything a host needs to draw the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerView {
    pub input: InputView,
    /// Toggle buttons for the enabled parts, calendar first.
    pub buttons: Vec<ButtonView>,
    /// The calendar, once mounted.
    pub calendar: Option<SurfaceView>,
    /// The time list, once mounted.
    pub time_list: Option<SurfaceView>,
    pub open: OpenState,
    pub focused: bool,
    pub disabled: bool,
    pub read_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_share_prefix() {
        let ids = InstanceIds::with_prefix("rw_7");
        assert_eq!(ids.input(), "rw_7_input");
        assert_eq!(ids.date(), "rw_7_date");
        assert_eq!(ids.listbox(), "rw_7_listbox");
        assert_eq!(ids.calendar_active_cell(), "rw_7_calendar_active_cell");
        assert_eq!(ids.listbox_active_option(), "rw_7_listbox_active_option");
    }

    #[test]
    fn test_instances_are_unique() {
        assert_ne!(InstanceIds::next(), InstanceIds::next());
    }

    #[test]
    fn test_owns_is_trimmed() {
        let ids = InstanceIds::with_prefix("p");
        assert_eq!(ids.owns(true, true), "p_date p_listbox");
        assert_eq!(ids.owns(true, false), "p_date");
        assert_eq!(ids.owns(false, true), "p_listbox");
        assert_eq!(ids.owns(false, false), "");
    }

    #[test]
    fn test_active_descendant_follows_open_view() {
        let ids = InstanceIds::with_prefix("p");
        assert_eq!(ids.active_descendant(OpenState::Closed), None);
        assert_eq!(
            ids.active_descendant(OpenState::DateOpen).as_deref(),
            Some("p_calendar_active_cell")
        );
        assert_eq!(
            ids.active_descendant(OpenState::TimeOpen).as_deref(),
            Some("p_listbox_active_option")
        );
    }

    #[test]
    fn test_role_names() {
        assert_eq!(AccessibleRole::ComboBox.as_str(), "combobox");
        assert_eq!(AccessibleRole::ListBox.as_str(), "listbox");
    }
}
