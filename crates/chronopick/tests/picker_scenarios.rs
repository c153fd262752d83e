//! End-to-end scenarios for the DateTimePicker.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{NaiveDate, NaiveDateTime};
use chronopick::prelude::*;
use chronopick::widget::widgets::{CalendarWidget, DateSurface};
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, mi, 0)
        .unwrap()
}

fn localizer() -> Arc<dyn Localizer> {
    Arc::new(
        ChronoLocalizer::new()
            .with_formats("%Y-%m-%d %H:%M", "%Y-%m-%d", "%H:%M")
            .with_today(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
    )
}

fn picker() -> DateTimePicker {
    setup();
    DateTimePicker::new()
        .with_localizer(localizer())
        .with_parse(vec!["%Y-%m-%d"])
}

#[derive(Debug, Clone, PartialEq)]
enum Note {
    Toggled(OpenState),
    Selected(Option<NaiveDateTime>),
    Changed(Option<NaiveDateTime>),
    CurrentDate(NaiveDate),
    FocusRequested,
    Focused(bool),
}

/// Records every notification the picker sends, in order.
fn record(picker: &DateTimePicker) -> Arc<Mutex<Vec<Note>>> {
    let notes = Arc::new(Mutex::new(Vec::new()));

    let sink = notes.clone();
    picker.toggled.connect(move |state| sink.lock().push(Note::Toggled(*state)));
    let sink = notes.clone();
    picker
        .selected
        .connect(move |(value, _)| sink.lock().push(Note::Selected(*value)));
    let sink = notes.clone();
    picker
        .changed
        .connect(move |(value, _)| sink.lock().push(Note::Changed(*value)));
    let sink = notes.clone();
    picker
        .current_date_changed
        .connect(move |date| sink.lock().push(Note::CurrentDate(*date)));
    let sink = notes.clone();
    picker
        .focus_requested
        .connect(move |()| sink.lock().push(Note::FocusRequested));
    let sink = notes.clone();
    picker
        .focus_changed
        .connect(move |focused| sink.lock().push(Note::Focused(*focused)));

    notes
}

fn alt(key: Key) -> KeyPressEvent {
    KeyPressEvent::with_modifiers(key, KeyboardModifiers::ALT)
}

#[test]
fn alt_down_opens_calendar_then_closes() {
    let mut picker = picker();
    let notes = record(&picker);

    picker.handle_key_down(&mut alt(Key::ArrowDown)).unwrap();
    assert_eq!(picker.open_state(), OpenState::DateOpen);

    picker.handle_key_down(&mut alt(Key::ArrowDown)).unwrap();
    assert_eq!(picker.open_state(), OpenState::Closed);

    assert_eq!(
        *notes.lock(),
        vec![
            Note::Toggled(OpenState::DateOpen),
            Note::Toggled(OpenState::Closed)
        ]
    );
}

#[test]
fn calendar_pick_keeps_time_of_day() {
    let mut picker = picker().with_value(Some(dt(2024, 1, 1, 14, 30)));
    picker.open(Some(View::Date));
    let notes = record(&picker);

    picker.select_date(NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());

    let expected = Some(dt(2024, 3, 5, 14, 30));
    assert_eq!(
        *notes.lock(),
        vec![
            Note::Toggled(OpenState::Closed),
            Note::Selected(expected),
            Note::Changed(expected),
            Note::FocusRequested,
        ]
    );
    assert_eq!(picker.value(), expected);
    assert_eq!(picker.open_state(), OpenState::Closed);
    assert_eq!(picker.text(), "2024-03-05 14:30");
}

#[test]
fn keyboard_pick_closes_before_notifying() {
    let mut picker = picker().with_value(Some(dt(2024, 1, 1, 14, 30)));
    let notes = record(&picker);

    picker.handle_key_down(&mut alt(Key::ArrowDown)).unwrap();
    picker
        .handle_key_down(&mut KeyPressEvent::key(Key::ArrowRight))
        .unwrap();
    notes.lock().clear();

    let mut enter = KeyPressEvent::key(Key::Enter);
    picker.handle_key_down(&mut enter).unwrap();
    assert!(enter.is_default_prevented());

    let expected = Some(dt(2024, 1, 2, 14, 30));
    assert_eq!(
        *notes.lock(),
        vec![
            Note::Toggled(OpenState::Closed),
            Note::Selected(expected),
            Note::Changed(expected),
            Note::FocusRequested,
        ]
    );
}

#[test]
fn calendar_navigation_reports_current_date() {
    let mut picker = picker().with_current_date(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    picker.open(Some(View::Date));
    let notes = record(&picker);

    picker
        .handle_key_down(&mut KeyPressEvent::key(Key::PageDown))
        .unwrap();

    let feb = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    assert_eq!(
        *notes.lock(),
        vec![Note::CurrentDate(feb), Note::FocusRequested]
    );
    assert_eq!(picker.current_date(), feb);
    assert_eq!(picker.value(), None);
}

#[test]
fn typed_value_is_clamped_on_commit() {
    let mut picker = picker()
        .with_range(dt(2000, 1, 1, 0, 0), dt(2020, 1, 1, 0, 0))
        .unwrap();
    let notes = record(&picker);

    picker.set_input_text("2025-06-01").unwrap();
    picker.commit_input().unwrap();

    assert_eq!(
        *notes.lock(),
        vec![
            Note::Changed(Some(dt(2025, 6, 1, 0, 0))),
            Note::Changed(Some(dt(2020, 1, 1, 0, 0))),
        ]
    );
    assert_eq!(picker.value(), Some(dt(2020, 1, 1, 0, 0)));
    assert_eq!(picker.text(), "2020-01-01 00:00");
}

#[test]
fn leaving_the_field_commits_typed_text() {
    let mut picker = picker();
    let notes = record(&picker);

    picker.focus_in(&FocusInEvent::new(CompositePart::Input, FocusReason::Tab));
    picker.set_input_text("2024-03-05").unwrap();
    picker
        .focus_out(&FocusOutEvent::new(CompositePart::Input, FocusReason::Tab))
        .unwrap();
    picker.process_deferred();

    assert_eq!(
        *notes.lock(),
        vec![
            Note::Focused(true),
            Note::Changed(Some(dt(2024, 3, 5, 0, 0))),
            Note::Focused(false),
        ]
    );
    assert_eq!(picker.text(), "2024-03-05 00:00");
}

#[test]
fn time_only_picker_opens_time_list() {
    let mut picker = picker().with_date_enabled(false);

    picker.open(None);
    assert_eq!(picker.open_state(), OpenState::TimeOpen);

    let view = picker.render();
    assert_eq!(view.buttons.len(), 1);
    assert_eq!(view.buttons[0].view, View::Time);
    assert!(view.calendar.is_none());
    let list = view.time_list.expect("time list is mounted when open");
    assert!(list.open);
    assert_eq!(list.live, Some("polite"));
    assert_eq!(view.input.owns, picker.ids().listbox());
}

#[test]
fn nothing_opens_with_both_parts_disabled() {
    let mut picker = picker().with_date_enabled(false).with_time_enabled(false);
    let notes = record(&picker);

    picker.open(None);
    picker.handle_key_down(&mut alt(Key::ArrowDown)).unwrap();
    picker.click_date_button();

    assert_eq!(picker.open_state(), OpenState::Closed);
    assert!(
        notes
            .lock()
            .iter()
            .all(|note| !matches!(note, Note::Toggled(_)))
    );
}

#[test]
fn time_pick_keeps_date() {
    let mut picker = picker().with_value(Some(dt(2024, 3, 5, 9, 0)));
    picker.open(Some(View::Time));

    picker
        .handle_key_down(&mut KeyPressEvent::key(Key::ArrowDown))
        .unwrap();
    picker
        .handle_key_down(&mut KeyPressEvent::key(Key::Enter))
        .unwrap();

    assert_eq!(picker.value(), Some(dt(2024, 3, 5, 9, 30)));
    assert_eq!(picker.open_state(), OpenState::Closed);
}

#[test]
fn controlled_value_waits_for_owner() {
    let mut picker = picker().controlled_value(Some(dt(2024, 1, 1, 8, 0)));
    let notes = record(&picker);

    picker.select_date(NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
    assert!(notes
        .lock()
        .contains(&Note::Changed(Some(dt(2024, 2, 2, 8, 0)))));
    assert_eq!(picker.value(), Some(dt(2024, 1, 1, 8, 0)));

    picker.set_value(Some(dt(2024, 2, 2, 8, 0)));
    assert_eq!(picker.text(), "2024-02-02 08:00");
}

#[test]
fn focus_moving_between_parts_is_not_a_blur() {
    let mut picker = picker();
    let notes = record(&picker);

    picker.focus_in(&FocusInEvent::new(CompositePart::Input, FocusReason::Tab));
    picker.open(Some(View::Date));
    picker
        .focus_out(&FocusOutEvent::new(CompositePart::Input, FocusReason::Tab))
        .unwrap();
    picker.focus_in(&FocusInEvent::new(CompositePart::DateButton, FocusReason::Tab));
    picker.process_deferred();

    assert!(picker.is_focused());
    assert_eq!(picker.open_state(), OpenState::DateOpen);

    picker
        .focus_out(&FocusOutEvent::new(CompositePart::DateButton, FocusReason::Tab))
        .unwrap();
    assert!(picker.has_pending_tasks());
    picker.process_deferred();

    assert!(!picker.is_focused());
    assert_eq!(picker.open_state(), OpenState::Closed);
    assert_eq!(
        *notes.lock(),
        vec![
            Note::Focused(true),
            Note::Toggled(OpenState::DateOpen),
            Note::Focused(false),
            Note::Toggled(OpenState::Closed),
        ]
    );
}

#[test]
fn missing_parse_format_is_a_configuration_error() {
    setup();
    let mut picker = DateTimePicker::new()
        .with_localizer(localizer())
        .with_format(FormatSpec::computed(|value, _| value.to_string()));

    let err = picker.set_input_text("2024-03-05").unwrap_err();
    assert!(err.is_configuration());
    assert!(matches!(err, PickerError::NoParseFormat { .. }));
}

#[test]
fn configuration_file_drives_the_picker() {
    setup();
    let config = PickerConfig::from_toml_str(
        r#"
        date = true
        time = false
        min = "2000-01-01T00:00:00"
        max = "2020-01-01T00:00:00"
        parse = ["%Y-%m-%d"]
        placeholder = "Birthday"

        [messages]
        date_button = "Open calendar"
        "#,
    )
    .unwrap();

    let mut picker = DateTimePicker::from_config(&config)
        .unwrap()
        .with_localizer(localizer());
    picker.set_input_text("1990-05-05").unwrap();
    picker.commit_input().unwrap();
    assert_eq!(picker.value(), Some(dt(2000, 1, 1, 0, 0)));

    let view = picker.render();
    assert_eq!(view.buttons[0].label, "Open calendar");
    assert_eq!(view.input.placeholder.as_deref(), Some("Birthday"));

    let inverted = PickerConfig::from_toml_str(
        r#"
        min = "2020-01-01T00:00:00"
        max = "2000-01-01T00:00:00"
        "#,
    );
    assert!(matches!(inverted, Err(PickerError::InvalidRange { .. })));
}

#[test]
fn disabled_picker_ignores_everything() {
    let mut picker = picker().with_disabled(true);
    let notes = record(&picker);

    picker.handle_key_down(&mut alt(Key::ArrowDown)).unwrap();
    picker.set_input_text("2024-03-05").unwrap();
    picker.click_time_button();

    assert!(notes.lock().is_empty());
    let view = picker.render();
    assert!(view.input.disabled);
    assert!(view.buttons.iter().all(|button| button.disabled));
}

#[test]
fn surfaces_persist_across_toggling() {
    let builds = Arc::new(AtomicUsize::new(0));
    let builds_clone = builds.clone();
    let mut picker = picker()
        .with_current_date(NaiveDate::from_ymd_opt(2024, 5, 10).unwrap())
        .with_date_surface(move || {
            builds_clone.fetch_add(1, Ordering::SeqCst);
            Box::new(CalendarWidget::new()) as Box<dyn DateSurface>
        });
    assert!(picker.render().calendar.is_none());

    picker.open(Some(View::Date));
    picker
        .handle_key_down(&mut KeyPressEvent::key(Key::ArrowDown))
        .unwrap();
    let moved = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();

    picker.close();
    let closed = picker.render().calendar.expect("calendar stays mounted");
    assert!(closed.hidden);
    assert!(!closed.open);

    picker.open(Some(View::Date));
    picker.close();
    picker.open(Some(View::Date));

    let reopened = picker.render().calendar.expect("calendar stays mounted");
    assert!(reopened.open);
    assert!(!reopened.hidden);
    assert_eq!(picker.date_surface().unwrap().focused_date(), moved);
    assert_eq!(builds.load(Ordering::SeqCst), 1);
}

#[test]
fn active_descendant_follows_open_popup() {
    let mut picker = picker();
    let ids = picker.ids().clone();

    let view = picker.render();
    assert!(!view.input.expanded);
    assert_eq!(view.input.active_descendant, None);

    picker.open(Some(View::Date));
    let view = picker.render();
    assert!(view.input.expanded);
    assert_eq!(
        view.input.active_descendant,
        Some(ids.calendar_active_cell())
    );

    picker.open(Some(View::Time));
    let view = picker.render();
    assert_eq!(
        view.input.active_descendant,
        Some(ids.listbox_active_option())
    );
    assert_eq!(
        view.input.owns,
        format!("{} {}", ids.date(), ids.listbox())
    );

    picker.close();
    let view = picker.render();
    assert!(!view.input.expanded);
    assert_eq!(view.input.active_descendant, None);
}
