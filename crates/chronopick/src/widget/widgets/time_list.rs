//! Headless time-list surface.
//!
//! [`TimeList`] offers one entry every `step` minutes across a single day.
//! On the day of the minimum or maximum the list starts or stops at that
//! bound. Keyboard:
//!
//! - Arrow Up/Down: previous/next entry
//! - Home/End: first/last entry
//! - Enter: select the focused entry
//! - Character keys: type-ahead over the entry labels

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use super::surface::{SurfaceOutcome, TimeEntry, TimeListProps, TimeSurface};
use crate::config::DEFAULT_STEP;
use crate::datetime::dates::{default_max, default_min};
use crate::datetime::{FormatKind, Localizer};
use crate::widget::events::{Key, KeyPressEvent};

/// A keyboard-driven list of times.
pub struct TimeList {
    localizer: Arc<dyn Localizer>,
    props: TimeListProps,
    entries: Vec<TimeEntry>,
    focused: usize,
    /// Props changed since the entries were built.
    stale: bool,
    /// Accumulated type-ahead text.
    search: String,
}

impl TimeList {
    /// Create an empty list labelled by `localizer`.
    pub fn new(localizer: Arc<dyn Localizer>) -> Self {
        let props = TimeListProps {
            min: default_min(),
            max: default_max(),
            step: DEFAULT_STEP,
            current_date: None,
            value: None,
            active_id: String::new(),
            preserve_date: true,
            format: localizer.get_format(FormatKind::Time),
            culture: None,
        };
        Self {
            localizer,
            props,
            entries: Vec::new(),
            focused: 0,
            stale: true,
            search: String::new(),
        }
    }

    /// The entries, rebuilt first if the inputs changed.
    pub fn entries(&mut self) -> &[TimeEntry] {
        self.ensure_entries();
        &self.entries
    }

    /// Index of the focused entry.
    pub fn focused_index(&self) -> usize {
        self.focused
    }

    /// The day the entries are generated on.
    fn day(&self) -> NaiveDate {
        let reference = self
            .props
            .current_date
            .unwrap_or_else(|| self.localizer.today());
        match self.props.value {
            Some(value) if self.props.preserve_date => value.date(),
            _ => reference,
        }
    }

    fn build_entries(&self) -> Vec<TimeEntry> {
        let day = self.day();
        let step = chrono::Duration::minutes(i64::from(self.props.step.max(1)));

        let mut start = day.and_time(NaiveTime::MIN);
        if day == self.props.min.date() {
            start = start.max(self.props.min);
        }
        // Exclusive bound.
        let mut end = day
            .succ_opt()
            .map_or(NaiveDateTime::MAX, |next| next.and_time(NaiveTime::MIN));
        if day == self.props.max.date() {
            let max = self.props.max;
            end = end.min(max.checked_add_signed(chrono::Duration::seconds(1)).unwrap_or(max));
        }

        let mut entries = Vec::new();
        let mut at = start;
        while at < end {
            entries.push(TimeEntry {
                date: at,
                label: self
                    .localizer
                    .format(&at, &self.props.format, self.props.culture.as_deref()),
            });
            match at.checked_add_signed(step) {
                Some(next) => at = next,
                None => break,
            }
        }
        entries
    }

    /// Index of the entry matching `value`'s time of day.
    fn index_for(&self, value: Option<NaiveDateTime>) -> usize {
        let Some(value) = value else {
            return 0;
        };
        let time = value.time();
        self.entries
            .iter()
            .position(|entry| entry.date.time() >= time)
            .unwrap_or(self.entries.len().saturating_sub(1))
    }

    fn ensure_entries(&mut self) {
        if self.stale {
            self.rebuild();
        }
    }

    fn rebuild(&mut self) {
        self.entries = self.build_entries();
        self.focused = self.index_for(self.props.value);
        self.stale = false;
        self.search.clear();
    }

    fn find_prefix(&self, query: &str) -> Option<usize> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .position(|entry| entry.label.to_lowercase().starts_with(&query))
    }
}

impl TimeSurface for TimeList {
    fn sync(&mut self, props: TimeListProps) {
        self.props = props;
        self.stale = true;
    }

    fn refresh(&mut self) {
        self.rebuild();
    }

    fn handle_key_down(&mut self, event: &mut KeyPressEvent) -> SurfaceOutcome<TimeEntry> {
        self.ensure_entries();
        if self.entries.is_empty() {
            return SurfaceOutcome::Ignored;
        }
        let last = self.entries.len() - 1;

        let next = match event.key {
            Key::ArrowDown => (self.focused + 1).min(last),
            Key::ArrowUp => self.focused.saturating_sub(1),
            Key::Home => 0,
            Key::End => last,
            Key::Enter => {
                event.base.accept();
                return SurfaceOutcome::Selected(self.entries[self.focused.min(last)].clone());
            }
            _ => return SurfaceOutcome::Ignored,
        };

        event.base.accept();
        self.search.clear();
        self.focused = next;
        SurfaceOutcome::Handled
    }

    fn handle_key_press(&mut self, event: &mut KeyPressEvent) -> SurfaceOutcome<TimeEntry> {
        if event.text.is_empty() {
            return SurfaceOutcome::Ignored;
        }
        self.ensure_entries();

        let extended = format!("{}{}", self.search, event.text);
        let (query, found) = match self.find_prefix(&extended) {
            Some(index) => (extended, Some(index)),
            None => (event.text.clone(), self.find_prefix(&event.text)),
        };

        match found {
            Some(index) => {
                event.base.accept();
                self.search = query;
                self.focused = index;
                SurfaceOutcome::Handled
            }
            None => {
                self.search.clear();
                SurfaceOutcome::Ignored
            }
        }
    }

    fn focused_entry(&self) -> Option<&TimeEntry> {
        self.entries.get(self.focused)
    }

    fn active_id(&self) -> &str {
        &self.props.active_id
    }
}

static_assertions::assert_impl_all!(TimeList: Send, Sync);
