//! DateTimePicker widget: a text field with calendar and time-list popups.
//!
//! The picker reconciles three input sources (typed text, calendar picks and
//! time-list picks) into one optional [`NaiveDateTime`]. It never owns its
//! value or open state outright: every change is emitted as a signal and then
//! offered to a [`Controllable`], which stores it (uncontrolled) or leaves
//! it to the owner to reflect back (controlled).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use chronopick::prelude::*;
//! use parking_lot::Mutex;
//!
//! let localizer = ChronoLocalizer::new()
//!     .with_formats("%Y-%m-%d %H:%M", "%Y-%m-%d", "%H:%M")
//!     .with_today(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
//! let mut picker = DateTimePicker::new().with_localizer(Arc::new(localizer));
//!
//! let changes = Arc::new(Mutex::new(Vec::new()));
//! let sink = changes.clone();
//! picker.changed.connect(move |(value, text)| sink.lock().push((*value, text.clone())));
//!
//! picker.set_input_text("2024-03-05 14:30").unwrap();
//! picker.commit_input().unwrap();
//!
//! assert_eq!(picker.text(), "2024-03-05 14:30");
//! assert_eq!(changes.lock().len(), 1);
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use chronopick_core::logging::targets;
use chronopick_core::{Controllable, Signal};

use super::calendar::CalendarWidget;
use super::popup::Popup;
use super::surface::{
    ActiveSurface, CalendarProps, DateSurface, Dispatched, SurfaceOutcome, TimeEntry,
    TimeListProps, TimeSurface,
};
use super::time_list::TimeList;
use crate::config::{Messages, PickerConfig};
use crate::datetime::{
    ChronoLocalizer, DateRange, FormatKind, FormatSpec, Localizer, ParseCandidates, ParseSpec,
    format_value, merge, parse_text, resolve_format,
};
use crate::error::Result;
use crate::widget::accessibility::{
    AccessibleRole, ButtonView, InputView, InstanceIds, PickerView, SurfaceView,
};
use crate::widget::events::{CompositePart, FocusInEvent, FocusOutEvent, Key, KeyPressEvent};
use crate::widget::focus::{FocusChange, FocusCoordinator};
use crate::widget::view::{self, EnabledViews, OpenState, View};

/// A hook that sees key events before the picker does.
///
/// Accepting the event (`event.base.accept()`) skips the picker's handling.
pub type KeyHook = Box<dyn Fn(&mut KeyPressEvent) + Send + Sync>;

/// Builds the calendar surface on first mount.
pub type DateSurfaceFactory = Box<dyn FnOnce() -> Box<dyn DateSurface> + Send + Sync>;

/// Builds the time-list surface on first mount.
pub type TimeSurfaceFactory =
    Box<dyn FnOnce(Arc<dyn Localizer>) -> Box<dyn TimeSurface> + Send + Sync>;

/// State of the text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct InputState {
    /// Raw text shown instead of the formatted value.
    text: Option<String>,
    /// Typed since the last commit.
    dirty: bool,
    /// The value the raw text stands for. The raw text survives value
    /// changes that land on this value.
    origin: Option<Option<NaiveDateTime>>,
}

/// A combined date and time picker.
///
/// # Signals
///
/// - `changed((Option<NaiveDateTime>, String))`: Emitted when the value should change
/// - `selected((Option<NaiveDateTime>, String))`: Emitted when a popup pick is made, before `changed`
/// - `toggled(OpenState)`: Emitted when the open state should change
/// - `current_date_changed(NaiveDate)`: Emitted when calendar navigation moves the current date
/// - `focus_changed(bool)`: Emitted when the widget as a whole gains or loses focus
/// - `focus_requested()`: Emitted when the text field should take keyboard focus
pub struct DateTimePicker {
    ids: InstanceIds,
    localizer: Arc<dyn Localizer>,

    /// Enabled parts.
    enabled: EnabledViews,
    /// Selectable window.
    range: DateRange,
    /// Minutes between time-list entries.
    step: u32,
    /// Explicit display format.
    format: Option<FormatSpec>,
    /// Format used while focused.
    edit_format: Option<FormatSpec>,
    /// Time-list label format.
    time_format: Option<FormatSpec>,
    parse: Option<ParseSpec>,
    culture: Option<String>,
    placeholder: Option<String>,
    name: Option<String>,
    labelled_by: Option<String>,
    described_by: Option<String>,
    disabled: bool,
    read_only: bool,
    messages: Messages,

    value: Controllable<Option<NaiveDateTime>>,
    open: Controllable<OpenState>,
    current_date: Controllable<Option<NaiveDate>>,

    focus: FocusCoordinator,
    input: InputState,

    /// Set on first focus or first open; surfaces persist afterwards.
    mounted: bool,
    date_factory: Option<DateSurfaceFactory>,
    time_factory: Option<TimeSurfaceFactory>,
    date_surface: Option<Box<dyn DateSurface>>,
    time_surface: Option<Box<dyn TimeSurface>>,
    calendar_popup: Popup,
    time_popup: Popup,

    key_down_hook: Option<KeyHook>,
    key_press_hook: Option<KeyHook>,

    /// Signal emitted when the value should change.
    pub changed: Signal<(Option<NaiveDateTime>, String)>,
    /// Signal emitted when a popup pick is made.
    pub selected: Signal<(Option<NaiveDateTime>, String)>,
    /// Signal emitted when the open state should change.
    pub toggled: Signal<OpenState>,
    /// Signal emitted when the calendar's current date should change.
    pub current_date_changed: Signal<NaiveDate>,
    /// Signal emitted when the logical focused state changes.
    pub focus_changed: Signal<bool>,
    /// Signal emitted when the text field should take keyboard focus.
    pub focus_requested: Signal<()>,
}

impl DateTimePicker {
    /// Create a picker with default settings and no value.
    pub fn new() -> Self {
        Self::build(&PickerConfig::default(), DateRange::default())
    }

    /// Create a picker from a configuration.
    pub fn from_config(config: &PickerConfig) -> Result<Self> {
        let range = config.range()?;
        Ok(Self::build(config, range))
    }

    fn build(config: &PickerConfig, range: DateRange) -> Self {
        Self {
            ids: InstanceIds::next(),
            localizer: Arc::new(ChronoLocalizer::new()),
            enabled: EnabledViews::new(config.date, config.time),
            range,
            step: config.step_minutes(),
            format: config.format.clone().map(FormatSpec::Literal),
            edit_format: config.edit_format.clone().map(FormatSpec::Literal),
            time_format: config.time_format.clone().map(FormatSpec::Literal),
            parse: (!config.parse.is_empty()).then(|| ParseSpec::Formats(config.parse.clone())),
            culture: config.culture.clone(),
            placeholder: config.placeholder.clone(),
            name: config.name.clone(),
            labelled_by: config.labelled_by.clone(),
            described_by: config.described_by.clone(),
            disabled: config.disabled,
            read_only: config.read_only,
            messages: config.messages.clone(),
            value: Controllable::uncontrolled(None),
            open: Controllable::uncontrolled(OpenState::Closed),
            current_date: Controllable::uncontrolled(None),
            focus: FocusCoordinator::new(),
            input: InputState::default(),
            mounted: false,
            date_factory: None,
            time_factory: None,
            date_surface: None,
            time_surface: None,
            calendar_popup: Popup::new(config.duration(), config.drop_up),
            time_popup: Popup::new(config.duration(), config.drop_up),
            key_down_hook: None,
            key_press_hook: None,
            changed: Signal::new(),
            selected: Signal::new(),
            toggled: Signal::new(),
            current_date_changed: Signal::new(),
            focus_changed: Signal::new(),
            focus_requested: Signal::new(),
        }
    }

    // =========================================================================
    // Builder
    // =========================================================================

    /// Use a different localizer.
    pub fn with_localizer(mut self, localizer: Arc<dyn Localizer>) -> Self {
        self.localizer = localizer;
        self
    }

    /// Use explicit element ids.
    pub fn with_ids(mut self, ids: InstanceIds) -> Self {
        self.ids = ids;
        self
    }

    /// Start uncontrolled with `value`.
    pub fn with_value(mut self, value: Option<NaiveDateTime>) -> Self {
        self.value = Controllable::uncontrolled(value);
        self
    }

    /// Hand the value to an external owner, starting at `value`.
    pub fn controlled_value(mut self, value: Option<NaiveDateTime>) -> Self {
        self.value = Controllable::controlled(value);
        self
    }

    /// Start uncontrolled with the given open state.
    pub fn with_open(mut self, state: OpenState) -> Self {
        self.open = Controllable::uncontrolled(state);
        self.sync_popups();
        self
    }

    /// Hand the open state to an external owner, starting at `state`.
    pub fn controlled_open(mut self, state: OpenState) -> Self {
        self.open = Controllable::controlled(state);
        self.sync_popups();
        self
    }

    /// Start uncontrolled with a current (calendar) date.
    pub fn with_current_date(mut self, date: NaiveDate) -> Self {
        self.current_date = Controllable::uncontrolled(Some(date));
        self
    }

    /// Hand the current date to an external owner.
    pub fn controlled_current_date(mut self, date: Option<NaiveDate>) -> Self {
        self.current_date = Controllable::controlled(date);
        self
    }

    /// Enable or disable the date part using builder pattern.
    pub fn with_date_enabled(mut self, enabled: bool) -> Self {
        self.enabled.date = enabled;
        self
    }

    /// Enable or disable the time part using builder pattern.
    pub fn with_time_enabled(mut self, enabled: bool) -> Self {
        self.enabled.time = enabled;
        self
    }

    /// Set the selectable window using builder pattern.
    pub fn with_range(mut self, min: NaiveDateTime, max: NaiveDateTime) -> Result<Self> {
        self.range = DateRange::new(min, max)?;
        Ok(self)
    }

    /// Set the time-list step in minutes using builder pattern.
    pub fn with_step(mut self, minutes: u32) -> Self {
        self.step = minutes.max(1);
        self
    }

    /// Set the display format using builder pattern.
    pub fn with_format(mut self, format: impl Into<FormatSpec>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Set the edit format using builder pattern.
    pub fn with_edit_format(mut self, format: impl Into<FormatSpec>) -> Self {
        self.edit_format = Some(format.into());
        self
    }

    /// Set the time-list label format using builder pattern.
    pub fn with_time_format(mut self, format: impl Into<FormatSpec>) -> Self {
        self.time_format = Some(format.into());
        self
    }

    /// Set how typed text is parsed using builder pattern.
    pub fn with_parse(mut self, parse: impl Into<ParseSpec>) -> Self {
        self.parse = Some(parse.into());
        self
    }

    /// Set the culture using builder pattern.
    pub fn with_culture(mut self, culture: impl Into<String>) -> Self {
        self.culture = Some(culture.into());
        self
    }

    /// Set the disabled state using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the read-only state using builder pattern.
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set the placeholder using builder pattern.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the form field name using builder pattern.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set button labels using builder pattern.
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Install a key-down hook that runs before the picker's own handling.
    pub fn with_key_down_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut KeyPressEvent) + Send + Sync + 'static,
    {
        self.key_down_hook = Some(Box::new(hook));
        self
    }

    /// Install a key-press hook that runs before type-ahead forwarding.
    pub fn with_key_press_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut KeyPressEvent) + Send + Sync + 'static,
    {
        self.key_press_hook = Some(Box::new(hook));
        self
    }

    /// Supply the calendar surface built on first mount.
    pub fn with_date_surface<F>(mut self, factory: F) -> Self
    where
        F: FnOnce() -> Box<dyn DateSurface> + Send + Sync + 'static,
    {
        self.date_factory = Some(Box::new(factory));
        self
    }

    /// Supply the time-list surface built on first mount.
    pub fn with_time_surface<F>(mut self, factory: F) -> Self
    where
        F: FnOnce(Arc<dyn Localizer>) -> Box<dyn TimeSurface> + Send + Sync + 'static,
    {
        self.time_factory = Some(Box::new(factory));
        self
    }

    // =========================================================================
    // State Access
    // =========================================================================

    /// Element ids of this instance.
    pub fn ids(&self) -> &InstanceIds {
        &self.ids
    }

    /// The localizer in use.
    pub fn localizer(&self) -> &Arc<dyn Localizer> {
        &self.localizer
    }

    /// The current value.
    pub fn value(&self) -> Option<NaiveDateTime> {
        self.value.get()
    }

    /// The current open state.
    pub fn open_state(&self) -> OpenState {
        self.open.get()
    }

    /// The date the calendar shows: the current date, else the value's
    /// date, else the localizer's today.
    pub fn current_date(&self) -> NaiveDate {
        self.current_date
            .get()
            .or_else(|| self.value.get().map(|v| v.date()))
            .unwrap_or_else(|| self.localizer.today())
    }

    /// Whether the widget as a whole has focus.
    pub fn is_focused(&self) -> bool {
        self.focus.is_focused()
    }

    /// Whether the value is owned externally.
    pub fn is_value_controlled(&self) -> bool {
        self.value.is_controlled()
    }

    /// Which parts are enabled.
    pub fn enabled_views(&self) -> EnabledViews {
        self.enabled
    }

    /// The selectable window.
    pub fn range(&self) -> DateRange {
        self.range
    }

    /// Whether handlers react to input.
    pub fn is_editable(&self) -> bool {
        !self.disabled && !self.read_only
    }

    /// Whether the popup surfaces have been mounted.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// The active display format, resolved now.
    pub fn display_format(&self) -> FormatSpec {
        resolve_format(
            self.enabled.date,
            self.enabled.time,
            self.format.as_ref(),
            self.localizer.as_ref(),
        )
    }

    /// Text the field shows: raw typed text, else the value in the edit
    /// format while focused, else in the display format.
    pub fn text(&self) -> String {
        if let Some(text) = &self.input.text {
            return text.clone();
        }
        let format = match &self.edit_format {
            Some(edit) if self.focus.is_focused() => edit.clone(),
            _ => self.display_format(),
        };
        format_value(
            self.localizer.as_ref(),
            self.value.get().as_ref(),
            &format,
            self.culture.as_deref(),
        )
    }

    /// Parse `text` with the configured candidates.
    pub fn parse(&self, text: &str) -> Result<Option<NaiveDateTime>> {
        let display = self.display_format();
        let candidates =
            ParseCandidates::build(self.parse.as_ref(), &display, self.edit_format.as_ref());
        parse_text(
            self.localizer.as_ref(),
            text,
            &candidates,
            self.culture.as_deref(),
        )
    }

    /// The mounted calendar surface.
    pub fn date_surface(&self) -> Option<&dyn DateSurface> {
        self.date_surface.as_deref()
    }

    /// The mounted time-list surface.
    pub fn time_surface(&self) -> Option<&dyn TimeSurface> {
        self.time_surface.as_deref()
    }

    // =========================================================================
    // Reflected State
    // =========================================================================

    /// Supply the value (controlled owner, or a host reset).
    pub fn set_value(&mut self, value: Option<NaiveDateTime>) {
        if self.value.reflect(value) {
            self.after_value_change();
        }
    }

    /// Supply the open state.
    pub fn set_open(&mut self, state: OpenState) {
        if self.open.reflect(state) {
            self.sync_popups();
        }
    }

    /// Supply the current (calendar) date.
    pub fn set_current_date(&mut self, date: Option<NaiveDate>) {
        if self.current_date.reflect(date) {
            self.sync_surfaces();
        }
    }

    // =========================================================================
    // Settings
    // =========================================================================

    /// Enable or disable the date part.
    pub fn set_date_enabled(&mut self, enabled: bool) {
        if self.enabled.date != enabled {
            self.enabled.date = enabled;
            self.after_settings_change();
        }
    }

    /// Enable or disable the time part.
    pub fn set_time_enabled(&mut self, enabled: bool) {
        if self.enabled.time != enabled {
            self.enabled.time = enabled;
            self.after_settings_change();
        }
    }

    /// Set the selectable window.
    pub fn set_range(&mut self, min: NaiveDateTime, max: NaiveDateTime) -> Result<()> {
        self.range = DateRange::new(min, max)?;
        self.sync_surfaces();
        Ok(())
    }

    /// Set the time-list step in minutes.
    pub fn set_step(&mut self, minutes: u32) {
        self.step = minutes.max(1);
        self.sync_surfaces();
    }

    /// Set or clear the display format.
    pub fn set_format(&mut self, format: Option<FormatSpec>) {
        self.format = format;
    }

    /// Set or clear the edit format.
    pub fn set_edit_format(&mut self, format: Option<FormatSpec>) {
        self.edit_format = format;
    }

    /// Set or clear the time-list label format.
    pub fn set_time_format(&mut self, format: Option<FormatSpec>) {
        self.time_format = format;
        self.sync_surfaces();
    }

    /// Set or clear the parse spec.
    pub fn set_parse(&mut self, parse: Option<ParseSpec>) {
        self.parse = parse;
    }

    /// Set or clear the culture.
    pub fn set_culture(&mut self, culture: Option<String>) {
        self.culture = culture;
        self.sync_surfaces();
    }

    /// Set the disabled state.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// Set the read-only state.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Set or clear the placeholder.
    pub fn set_placeholder(&mut self, placeholder: Option<String>) {
        self.placeholder = placeholder;
    }

    /// Set or clear the form field name.
    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Set the labelling and describing element ids.
    pub fn set_aria_refs(&mut self, labelled_by: Option<String>, described_by: Option<String>) {
        self.labelled_by = labelled_by;
        self.described_by = described_by;
    }

    /// Set button labels.
    pub fn set_messages(&mut self, messages: Messages) {
        self.messages = messages;
    }

    /// Set whether popups open above the field.
    pub fn set_drop_up(&mut self, drop_up: bool) {
        self.calendar_popup.set_drop_up(drop_up);
        self.time_popup.set_drop_up(drop_up);
    }

    /// Set the popup animation duration.
    pub fn set_duration(&mut self, duration: Duration) {
        self.calendar_popup.set_duration(duration);
        self.time_popup.set_duration(duration);
    }

    // =========================================================================
    // Open State Machine
    // =========================================================================

    /// Toggle `view`: open it, switch to it, or close it if it is open.
    pub fn toggle(&mut self, view: View) {
        self.request(view::toggle(self.open.get(), view, self.enabled));
    }

    /// Open `view`, or the next view when `None`.
    pub fn open(&mut self, view: Option<View>) {
        self.request(view::open(self.open.get(), view, self.enabled));
    }

    /// Close whichever popup is open.
    pub fn close(&mut self) {
        self.request(view::close(self.open.get()));
    }

    fn request(&mut self, next: Option<OpenState>) {
        let Some(next) = next else {
            return;
        };
        tracing::debug!(
            target: targets::VIEW,
            from = %self.open.get(),
            to = %next,
            "open state transition"
        );
        self.toggled.emit(next);
        if self.open.propose(next) {
            self.sync_popups();
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Ask the host to focus the text field, unless it already has focus.
    pub fn focus(&mut self) {
        if self.focus.focused_part() != Some(CompositePart::Input) {
            self.focus_requested.emit(());
        }
    }

    /// Focus entered a part of the composite.
    pub fn focus_in(&mut self, event: &FocusInEvent) {
        if self.focus.focus_in(event.part) == Some(FocusChange::Gained) {
            self.ensure_mounted();
            self.focus_changed.emit(true);
        }
    }

    /// Focus left a part of the composite.
    ///
    /// Leaving the text field commits typed text. Whether the widget as a
    /// whole lost focus is decided in [`process_deferred`](Self::process_deferred).
    pub fn focus_out(&mut self, event: &FocusOutEvent) -> Result<()> {
        self.focus.focus_out(event.part);
        if event.part == CompositePart::Input {
            self.commit_input()?;
        }
        Ok(())
    }

    /// Run deferred work. Call once the current event dispatch is over.
    pub fn process_deferred(&mut self) {
        if self.focus.process_deferred() == Some(FocusChange::Lost) {
            self.focus_changed.emit(false);
            self.close();
        }
    }

    /// Whether deferred work is waiting.
    pub fn has_pending_tasks(&self) -> bool {
        self.focus.has_pending_check()
    }

    // =========================================================================
    // Keyboard
    // =========================================================================

    /// Handle a key down on the composite.
    ///
    /// Escape closes, Alt+ArrowDown opens (or closes when open), Alt+ArrowUp
    /// closes. Enter with the popups closed commits typed text. Other keys go
    /// to the open surface.
    pub fn handle_key_down(&mut self, event: &mut KeyPressEvent) -> Result<()> {
        if !self.check_editable("key_down") {
            return Ok(());
        }
        if let Some(hook) = &self.key_down_hook {
            hook(event);
        }
        if event.is_default_prevented() {
            return Ok(());
        }

        let state = self.open.get();
        match event.key {
            Key::Escape if state.is_open() => {
                event.base.accept();
                self.close();
            }
            Key::ArrowDown if event.modifiers.alt => {
                event.base.accept();
                if state.is_open() {
                    self.close();
                } else {
                    self.open(None);
                }
            }
            Key::ArrowUp if event.modifiers.alt => {
                event.base.accept();
                self.close();
            }
            _ if event.modifiers.alt => {}
            Key::Enter if !state.is_open() => {
                if self.input.dirty {
                    event.base.accept();
                }
                self.commit_input()?;
            }
            _ if state.is_open() => {
                let dispatched = self.active_surface().key_down(event);
                self.apply(dispatched);
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle a character key press on the composite.
    pub fn handle_key_press(&mut self, event: &mut KeyPressEvent) {
        if !self.check_editable("key_press") {
            return;
        }
        if let Some(hook) = &self.key_press_hook {
            hook(event);
        }
        if event.is_default_prevented() {
            return;
        }

        let dispatched = self.active_surface().key_press(event);
        self.apply(dispatched);
    }

    fn active_surface(&mut self) -> ActiveSurface<'_> {
        match self.open.get() {
            OpenState::DateOpen if self.enabled.date => match self.date_surface.as_mut() {
                Some(surface) => ActiveSurface::Date(surface.as_mut()),
                None => ActiveSurface::Closed,
            },
            OpenState::TimeOpen if self.enabled.time => match self.time_surface.as_mut() {
                Some(surface) => ActiveSurface::Time(surface.as_mut()),
                None => ActiveSurface::Closed,
            },
            _ => ActiveSurface::Closed,
        }
    }

    fn apply(&mut self, dispatched: Dispatched) {
        match dispatched {
            Dispatched::Date(SurfaceOutcome::Selected(date)) => self.select_date(date),
            Dispatched::Date(SurfaceOutcome::Navigated(date)) => self.navigate(date),
            Dispatched::Time(SurfaceOutcome::Selected(entry)) => self.select_time(entry),
            Dispatched::Nothing | Dispatched::Date(_) | Dispatched::Time(_) => {}
        }
    }

    fn navigate(&mut self, date: NaiveDate) {
        self.current_date_changed.emit(date);
        if self.current_date.propose(Some(date)) {
            self.sync_surfaces();
        }
        self.focus();
    }

    // =========================================================================
    // Buttons and Selection
    // =========================================================================

    /// The calendar button was clicked.
    pub fn click_date_button(&mut self) {
        if !self.check_editable("date_button") {
            return;
        }
        self.focus();
        self.toggle(View::Date);
    }

    /// The time button was clicked.
    pub fn click_time_button(&mut self) {
        if !self.check_editable("time_button") {
            return;
        }
        self.focus();
        self.toggle(View::Time);
    }

    /// A date was picked on the calendar. Its time comes from the value.
    pub fn select_date(&mut self, date: NaiveDate) {
        if !self.check_editable("select_date") {
            return;
        }
        let picked = date.and_time(NaiveTime::MIN);
        let merged = merge(Some(picked), self.value.get(), Some(self.reference()));
        self.commit_selection(merged);
    }

    /// A time entry was picked. Its date comes from the value.
    pub fn select_time(&mut self, entry: TimeEntry) {
        if !self.check_editable("select_time") {
            return;
        }
        let merged = merge(self.value.get(), Some(entry.date), Some(self.reference()));
        self.commit_selection(merged);
    }

    /// Close, notify `selected`, then `changed` with the clamped value, then
    /// reclaim focus.
    fn commit_selection(&mut self, value: Option<NaiveDateTime>) {
        let text = self.format_display(value.as_ref());
        self.close();
        self.selected.emit((value, text));

        let clamped = self.range.clamp(value);
        let text = self.format_display(clamped.as_ref());
        self.input = InputState::default();
        self.handle_change(clamped, text);
        self.focus();
    }

    /// Missing parts of a picked value are taken from this.
    fn reference(&self) -> NaiveDateTime {
        self.current_date
            .get()
            .unwrap_or_else(|| self.localizer.today())
            .and_time(NaiveTime::MIN)
    }

    // =========================================================================
    // Text Field
    // =========================================================================

    /// The user edited the text field.
    ///
    /// The raw text is kept. If it parses, an unclamped change is emitted.
    pub fn set_input_text(&mut self, text: impl Into<String>) -> Result<()> {
        if !self.check_editable("input") {
            return Ok(());
        }
        let text = text.into();
        self.input.text = Some(text.clone());
        self.input.dirty = true;

        let parsed = self.parse(&text)?;
        self.input.origin = Some(parsed.or(self.value.get()));
        if parsed.is_some() {
            self.handle_change(parsed, text);
        }
        Ok(())
    }

    /// Commit typed text: parse, clamp and emit.
    ///
    /// Unparsable text emits a change to `None` and stays in the field.
    pub fn commit_input(&mut self) -> Result<()> {
        if !self.check_editable("commit") || !self.input.dirty {
            return Ok(());
        }
        let text = self.input.text.clone().unwrap_or_default();
        let parsed = self.parse(&text)?;
        self.input.dirty = false;

        match parsed {
            Some(value) => {
                let clamped = self.range.clamp(Some(value));
                let formatted = self.format_display(clamped.as_ref());
                self.input = InputState::default();
                self.handle_change(clamped, formatted);
            }
            None => {
                tracing::debug!(target: targets::PARSE, text = %text, "committed unparsable text");
                self.input.origin = Some(None);
                self.handle_change(None, text);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Render
    // =========================================================================

    /// Describe the widget for the host.
    pub fn render(&self) -> PickerView {
        let state = self.open.get();
        let read_only = self.read_only;
        let disabled = self.disabled;

        let input = InputView {
            id: self.ids.input(),
            role: AccessibleRole::ComboBox,
            text: self.text(),
            editing: self.focus.is_focused(),
            placeholder: self.placeholder.clone(),
            name: self.name.clone(),
            disabled,
            read_only,
            has_popup: true,
            expanded: state.is_open(),
            active_descendant: self.ids.active_descendant(state),
            owns: self.ids.owns(self.enabled.date, self.enabled.time),
            labelled_by: self.labelled_by.clone(),
            described_by: self.described_by.clone(),
        };

        let mut buttons = Vec::new();
        if self.enabled.date {
            buttons.push(ButtonView {
                role: AccessibleRole::Button,
                view: View::Date,
                label: self.messages.date_button.clone(),
                disabled: disabled || read_only,
            });
        }
        if self.enabled.time {
            buttons.push(ButtonView {
                role: AccessibleRole::Button,
                view: View::Time,
                label: self.messages.time_button.clone(),
                disabled: disabled || read_only,
            });
        }

        let calendar = (self.enabled.date && self.date_surface.is_some()).then(|| SurfaceView {
            id: self.ids.date(),
            role: AccessibleRole::Grid,
            view: View::Date,
            open: self.calendar_popup.is_open(),
            hidden: !self.calendar_popup.is_open(),
            live: Some("polite"),
            labelled_by: self.ids.input(),
            active_id: self.ids.calendar_active_cell(),
            drop_up: self.calendar_popup.drop_up(),
            duration: self.calendar_popup.duration(),
        });

        let time_list = (self.enabled.time && self.time_surface.is_some()).then(|| SurfaceView {
            id: self.ids.listbox(),
            role: AccessibleRole::ListBox,
            view: View::Time,
            open: self.time_popup.is_open(),
            hidden: !self.time_popup.is_open(),
            live: self.time_popup.is_open().then_some("polite"),
            labelled_by: self.ids.input(),
            active_id: self.ids.listbox_active_option(),
            drop_up: self.time_popup.drop_up(),
            duration: self.time_popup.duration(),
        });

        PickerView {
            input,
            buttons,
            calendar,
            time_list,
            open: state,
            focused: self.focus.is_focused(),
            disabled,
            read_only,
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn check_editable(&self, handler: &'static str) -> bool {
        if self.is_editable() {
            return true;
        }
        tracing::trace!(target: targets::PICKER, handler, "widget not editable, ignoring");
        false
    }

    fn format_display(&self, value: Option<&NaiveDateTime>) -> String {
        format_value(
            self.localizer.as_ref(),
            value,
            &self.display_format(),
            self.culture.as_deref(),
        )
    }

    /// Emit a change unless `value` equals the current value.
    fn handle_change(&mut self, value: Option<NaiveDateTime>, text: String) {
        let unchanged = match (value, self.value.get()) {
            (None, None) => true,
            (Some(next), Some(current)) => self.localizer.eq(&next, &current),
            _ => false,
        };
        if unchanged {
            tracing::trace!(target: targets::PICKER, "value unchanged, no notification");
            return;
        }

        tracing::debug!(target: targets::PICKER, ?value, text = %text, "value changed");
        self.changed.emit((value, text));
        if self.value.propose(value) {
            self.after_value_change();
        }
    }

    fn after_value_change(&mut self) {
        let value = self.value.get();
        if self.input.text.is_some() && self.input.origin != Some(value) {
            self.input = InputState::default();
        }
        self.sync_surfaces();
    }

    fn after_settings_change(&mut self) {
        if let Some(view) = self.open.get().view() {
            if !self.enabled.allows(view) {
                tracing::debug!(target: targets::VIEW, ?view, "open view was disabled, closing");
                self.close();
            }
        }
        if self.mounted {
            self.ensure_mounted();
        }
        self.sync_surfaces();
    }

    /// Build the surfaces for enabled parts that do not have one yet.
    fn ensure_mounted(&mut self) {
        if !self.mounted {
            tracing::debug!(target: targets::PICKER, id = self.ids.prefix(), "mounting popup surfaces");
            self.mounted = true;
        }

        let mut created = false;
        if self.enabled.date && self.date_surface.is_none() {
            let surface: Box<dyn DateSurface> = match self.date_factory.take() {
                Some(factory) => factory(),
                None => Box::new(CalendarWidget::new()),
            };
            self.date_surface = Some(surface);
            created = true;
        }
        if self.enabled.time && self.time_surface.is_none() {
            let localizer = Arc::clone(&self.localizer);
            let surface: Box<dyn TimeSurface> = match self.time_factory.take() {
                Some(factory) => factory(localizer),
                None => Box::new(TimeList::new(localizer)),
            };
            self.time_surface = Some(surface);
            created = true;
        }
        if created {
            self.sync_surfaces();
        }
    }

    fn sync_surfaces(&mut self) {
        if !self.mounted {
            return;
        }
        if self.date_surface.is_some() {
            let props = self.calendar_props();
            if let Some(surface) = self.date_surface.as_mut() {
                surface.sync(props);
            }
        }
        if self.time_surface.is_some() {
            let props = self.time_list_props();
            if let Some(surface) = self.time_surface.as_mut() {
                surface.sync(props);
            }
        }
    }

    fn sync_popups(&mut self) {
        let state = self.open.get();
        if state.is_open() {
            self.ensure_mounted();
        }
        self.calendar_popup.set_open(state == OpenState::DateOpen);
        if self.time_popup.set_open(state == OpenState::TimeOpen) {
            if let Some(surface) = self.time_surface.as_mut() {
                surface.refresh();
            }
        }
    }

    fn calendar_props(&self) -> CalendarProps {
        CalendarProps {
            value: self.value.get(),
            min: self.range.min(),
            max: self.range.max(),
            current_date: self.current_date(),
            active_id: self.ids.calendar_active_cell(),
        }
    }

    fn time_list_props(&self) -> TimeListProps {
        TimeListProps {
            min: self.range.min(),
            max: self.range.max(),
            step: self.step,
            current_date: self.current_date.get(),
            value: self.value.get(),
            active_id: self.ids.listbox_active_option(),
            preserve_date: self.enabled.date,
            format: self
                .time_format
                .clone()
                .unwrap_or_else(|| self.localizer.get_format(FormatKind::Time)),
            culture: self.culture.clone(),
        }
    }
}

impl Default for DateTimePicker {
    fn default() -> Self {
        Self::new()
    }
}

static_assertions::assert_impl_all!(DateTimePicker: Send, Sync);
