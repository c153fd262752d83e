//! Headless calendar surface.
//!
//! [`CalendarWidget`] keeps a cursor date inside the selectable window and
//! moves it with the keyboard:
//!
//! - Arrow Left/Right: previous/next day
//! - Arrow Up/Down: previous/next week
//! - Page Up/Down: previous/next month (with Shift: year)
//! - Home/End: first/last day of the cursor's month
//! - Enter: select the cursor date
//!
//! Grid rendering is left to the host; [`CalendarWidget::month_grid`] gives
//! the dates of the visible month.

use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime, Weekday};

use super::surface::{CalendarProps, DateSurface, SurfaceOutcome};
use crate::datetime::dates::{default_max, default_min};
use crate::widget::events::{Key, KeyPressEvent};

/// A keyboard-driven month calendar.
///
/// Choices and cursor moves are reported through the returned
/// [`SurfaceOutcome`].
pub struct CalendarWidget {
    /// The picker's value.
    value: Option<NaiveDateTime>,
    /// Earliest selectable date.
    minimum_date: NaiveDate,
    /// Latest selectable date.
    maximum_date: NaiveDate,
    /// The cursor.
    cursor: NaiveDate,
    /// Id of the active cell.
    active_id: String,
    /// First column of the grid.
    first_day_of_week: Weekday,
}

impl CalendarWidget {
    /// Create a calendar on today's date with the default window.
    pub fn new() -> Self {
        Self {
            value: None,
            minimum_date: default_min().date(),
            maximum_date: default_max().date(),
            cursor: Local::now().date_naive(),
            active_id: String::new(),
            first_day_of_week: Weekday::Sun,
        }
    }

    /// Set the first day of the week using builder pattern.
    pub fn with_first_day_of_week(mut self, day: Weekday) -> Self {
        self.first_day_of_week = day;
        self
    }

    /// The selected date, if the picker holds a value.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.value.map(|v| v.date())
    }

    /// Whether `date` lies in the selectable window.
    pub fn is_date_valid(&self, date: NaiveDate) -> bool {
        self.minimum_date <= date && date <= self.maximum_date
    }

    /// The visible month as rows of seven dates, padded with days of the
    /// neighbouring months.
    pub fn month_grid(&self) -> Vec<[NaiveDate; 7]> {
        let first = self.cursor.with_day(1).unwrap_or(self.cursor);
        let offset = (7 + first.weekday().num_days_from_monday()
            - self.first_day_of_week.num_days_from_monday())
            % 7;
        let start = first - chrono::Duration::days(i64::from(offset));

        let mut rows = Vec::with_capacity(6);
        let mut day = start;
        while rows.is_empty() || day.month() == self.cursor.month() {
            let mut row = [day; 7];
            for cell in row.iter_mut() {
                *cell = day;
                day = day.succ_opt().unwrap_or(day);
            }
            rows.push(row);
        }
        rows
    }

    fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.minimum_date, self.maximum_date)
    }

    fn month_end(date: NaiveDate) -> NaiveDate {
        date.with_day(1)
            .and_then(|first| first.checked_add_months(Months::new(1)))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date)
    }

    fn target(&self, event: &KeyPressEvent) -> Option<NaiveDate> {
        let cursor = self.cursor;
        let months = if event.modifiers.shift { 12 } else { 1 };
        let target = match event.key {
            Key::ArrowLeft => cursor.pred_opt(),
            Key::ArrowRight => cursor.succ_opt(),
            Key::ArrowUp => cursor.checked_sub_signed(chrono::Duration::days(7)),
            Key::ArrowDown => cursor.checked_add_signed(chrono::Duration::days(7)),
            Key::PageUp => cursor.checked_sub_months(Months::new(months)),
            Key::PageDown => cursor.checked_add_months(Months::new(months)),
            Key::Home => cursor.with_day(1),
            Key::End => Some(Self::month_end(cursor)),
            _ => return None,
        };
        Some(target.map_or(cursor, |date| self.clamp(date)))
    }
}

impl Default for CalendarWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl DateSurface for CalendarWidget {
    fn sync(&mut self, props: CalendarProps) {
        self.value = props.value;
        self.minimum_date = props.min.date();
        self.maximum_date = props.max.date();
        self.active_id = props.active_id;
        self.cursor = self.clamp(props.current_date);
    }

    fn handle_key_down(&mut self, event: &mut KeyPressEvent) -> SurfaceOutcome<NaiveDate> {
        if event.key == Key::Enter {
            event.base.accept();
            if !self.is_date_valid(self.cursor) {
                return SurfaceOutcome::Handled;
            }
            return SurfaceOutcome::Selected(self.cursor);
        }

        let Some(target) = self.target(event) else {
            return SurfaceOutcome::Ignored;
        };
        event.base.accept();
        if target == self.cursor {
            return SurfaceOutcome::Handled;
        }

        self.cursor = target;
        SurfaceOutcome::Navigated(target)
    }

    fn focused_date(&self) -> NaiveDate {
        self.cursor
    }

    fn active_id(&self) -> &str {
        &self.active_id
    }
}

static_assertions::assert_impl_all!(CalendarWidget: Send, Sync);
