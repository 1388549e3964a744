use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::time_utils::{days_between, format_date};

/// What a date widget hands back: one day, or a start/end pair.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSelection {
    Single(NaiveDate),
    Range(NaiveDate, NaiveDate),
}

impl DateSelection {
    /// Canonical `(start, end)` form. A single day becomes a one-day range.
    pub fn normalize(self) -> DateRange {
        match self {
            DateSelection::Single(day) => DateRange::new(day, day),
            DateSelection::Range(start, end) => DateRange::new(start, end),
        }
    }
}

impl From<DateRange> for DateSelection {
    fn from(range: DateRange) -> Self {
        DateSelection::Range(range.start, range.end)
    }
}

/// Inclusive calendar-date range. `start > end` is allowed and selects nothing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Calendar days covered (inclusive); 0 for an inverted range.
    pub fn day_count(&self) -> u64 {
        if self.is_inverted() {
            0
        } else {
            days_between(self.start, self.end) as u64 + 1
        }
    }

    /// Pulls both ends inside `(min, max)`. An inverted range stays inverted.
    pub fn clamp_to(&self, bounds: (NaiveDate, NaiveDate)) -> Self {
        let (min, max) = bounds;
        Self {
            start: self.start.clamp(min, max),
            end: self.end.clamp(min, max),
        }
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} → {}", format_date(self.start), format_date(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_date_becomes_one_day_range() {
        let range = DateSelection::Single(date(2021, 1, 2)).normalize();
        assert_eq!(range, DateRange::new(date(2021, 1, 2), date(2021, 1, 2)));
        assert_eq!(range.day_count(), 1);
    }

    #[test]
    fn test_range_selection_keeps_order() {
        let range = DateSelection::Range(date(2021, 1, 5), date(2021, 1, 1)).normalize();
        assert_eq!(range.start, date(2021, 1, 5));
        assert!(range.is_inverted());
        assert_eq!(range.day_count(), 0);
        assert!(!range.contains(date(2021, 1, 3)));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::new(date(2021, 1, 1), date(2021, 1, 3));
        assert!(range.contains(date(2021, 1, 1)));
        assert!(range.contains(date(2021, 1, 3)));
        assert!(!range.contains(date(2021, 1, 4)));
        assert_eq!(range.day_count(), 3);
    }

    #[test]
    fn test_clamp_to_bounds() {
        let bounds = (date(2021, 1, 1), date(2021, 1, 31));
        let clamped = DateRange::new(date(2020, 12, 1), date(2021, 3, 1)).clamp_to(bounds);
        assert_eq!(clamped, DateRange::new(date(2021, 1, 1), date(2021, 1, 31)));
    }

    #[test]
    fn test_display() {
        let range = DateRange::new(date(2021, 1, 1), date(2021, 1, 3));
        assert_eq!(range.to_string(), "2021-01-01 → 2021-01-03");
    }
}
