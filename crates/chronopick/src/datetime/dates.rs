//! Merging and clamping of date-time values.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{PickerError, Result};

/// Build a midnight value from constant parts.
fn ymd(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_default()
        .and_time(NaiveTime::default())
}

/// Lower bound used when no minimum is configured.
pub fn default_min() -> NaiveDateTime {
    ymd(1900, 1, 1)
}

/// Upper bound used when no maximum is configured.
pub fn default_max() -> NaiveDateTime {
    ymd(2099, 12, 31)
}

/// Combine the date part of `date` with the time part of `time`.
///
/// Whichever part is missing is taken from `reference`, or from the epoch
/// date / midnight when there is no reference. Returns `None` only when both
/// parts are missing.
pub fn merge(
    date: Option<NaiveDateTime>,
    time: Option<NaiveDateTime>,
    reference: Option<NaiveDateTime>,
) -> Option<NaiveDateTime> {
    if date.is_none() && time.is_none() {
        return None;
    }

    let day = date
        .or(reference)
        .map(|d| d.date())
        .unwrap_or_default();
    let clock = time
        .or(reference)
        .map(|t| t.time())
        .unwrap_or_default();

    Some(day.and_time(clock))
}

/// Constrain `value` to the inclusive window `[min, max]`.
///
/// `None` passes through unchanged.
pub fn clamp(
    value: Option<NaiveDateTime>,
    min: NaiveDateTime,
    max: NaiveDateTime,
) -> Option<NaiveDateTime> {
    value.map(|v| v.min(max).max(min))
}

/// An inclusive `[min, max]` window. `min <= max` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    min: NaiveDateTime,
    max: NaiveDateTime,
}

impl DateRange {
    /// Create a range, rejecting `min > max`.
    pub fn new(min: NaiveDateTime, max: NaiveDateTime) -> Result<Self> {
        if min > max {
            return Err(PickerError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// The lower bound.
    pub fn min(&self) -> NaiveDateTime {
        self.min
    }

    /// The upper bound.
    pub fn max(&self) -> NaiveDateTime {
        self.max
    }

    /// Whether `value` lies inside the window.
    pub fn contains(&self, value: NaiveDateTime) -> bool {
        self.min <= value && value <= self.max
    }

    /// Clamp `value` into this window.
    pub fn clamp(&self, value: Option<NaiveDateTime>) -> Option<NaiveDateTime> {
        clamp(value, self.min, self.max)
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn test_merge_both_absent() {
        assert_eq!(merge(None, None, None), None);
        assert_eq!(merge(None, None, Some(dt(2024, 1, 1, 9, 0, 0))), None);
    }

    #[test]
    fn test_merge_keeps_time_of_other_part() {
        let selected_date = dt(2024, 3, 5, 0, 0, 0);
        let current = dt(2024, 1, 1, 14, 30, 0);
        assert_eq!(
            merge(Some(selected_date), Some(current), None),
            Some(dt(2024, 3, 5, 14, 30, 0))
        );
    }

    #[test]
    fn test_merge_date_only_uses_reference_time() {
        let date = dt(2024, 3, 5, 8, 0, 0);
        let reference = dt(2020, 6, 1, 17, 45, 10);
        let merged = merge(Some(date), None, Some(reference)).unwrap();
        assert_eq!(merged.date(), date.date());
        assert_eq!(merged.time(), reference.time());
    }

    #[test]
    fn test_merge_date_only_without_reference_is_midnight() {
        let date = dt(2024, 3, 5, 8, 0, 0);
        let merged = merge(Some(date), None, None).unwrap();
        assert_eq!(merged, dt(2024, 3, 5, 0, 0, 0));
    }

    #[test]
    fn test_merge_time_only_uses_reference_date_or_epoch() {
        let time = dt(1999, 9, 9, 10, 15, 0);
        let reference = dt(2024, 2, 29, 0, 0, 0);
        assert_eq!(
            merge(None, Some(time), Some(reference)),
            Some(dt(2024, 2, 29, 10, 15, 0))
        );
        assert_eq!(merge(None, Some(time), None), Some(dt(1970, 1, 1, 10, 15, 0)));
    }

    #[test]
    fn test_clamp_bounds() {
        let min = dt(2000, 1, 1, 0, 0, 0);
        let max = dt(2020, 1, 1, 0, 0, 0);

        assert_eq!(clamp(None, min, max), None);
        assert_eq!(clamp(Some(dt(2025, 6, 1, 0, 0, 0)), min, max), Some(max));
        assert_eq!(clamp(Some(dt(1990, 6, 1, 0, 0, 0)), min, max), Some(min));
        let inside = dt(2010, 6, 1, 12, 0, 0);
        assert_eq!(clamp(Some(inside), min, max), Some(inside));
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let min = dt(2000, 1, 1, 0, 0, 0);
        let max = dt(2020, 1, 1, 0, 0, 0);
        let samples = [
            dt(1800, 1, 1, 0, 0, 0),
            dt(2000, 1, 1, 0, 0, 0),
            dt(2012, 7, 4, 18, 0, 0),
            dt(2020, 1, 1, 0, 0, 0),
            dt(2300, 12, 31, 23, 59, 59),
        ];
        for sample in samples {
            let once = clamp(Some(sample), min, max);
            assert_eq!(clamp(once, min, max), once);
        }
    }

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let early = dt(2000, 1, 1, 0, 0, 0);
        let late = dt(2020, 1, 1, 0, 0, 0);
        assert!(DateRange::new(early, late).is_ok());
        assert_eq!(
            DateRange::new(late, early),
            Err(PickerError::InvalidRange {
                min: late,
                max: early
            })
        );
    }

    #[test]
    fn test_default_range_is_wide() {
        let range = DateRange::default();
        assert_eq!(range.min(), dt(1900, 1, 1, 0, 0, 0));
        assert_eq!(range.max(), dt(2099, 12, 31, 0, 0, 0));
        assert!(range.contains(dt(2024, 5, 5, 5, 5, 5)));
    }
}
