//! Closure calendar.
//!
//! Decides which days of the planning horizon are closed (plant shutdown)
//! and how days group into weeks.
//!
//! # Day Model
//! Days are indexed `0..days` from the start of the horizon. Day 0 is
//! weekday 0 (Monday); the weekday of day `d` is `d % 7`. Weeks are
//! consecutive blocks of seven days: the week of day `d` is `d / 7`, and a
//! trailing partial week still counts as a week.
//!
//! # Precedence
//! A day is closed iff `close_on_off_days` is set AND its weekday is listed
//! in `off_days`. Listing off days without the flag has no effect.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Number of days in a week bucket.
pub const DAYS_PER_WEEK: usize = 7;

/// Closed-day calendar for a planning horizon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClosureCalendar {
    /// Weekday indices (0..7) that are plant off days.
    pub off_days: BTreeSet<u8>,
    /// Whether off days are enforced as closures.
    pub close_on_off_days: bool,
}

impl ClosureCalendar {
    /// Creates a calendar with no closures.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a calendar that closes the given weekdays.
    ///
    /// Weekday indices outside `0..7` are ignored.
    pub fn closing(off_days: impl IntoIterator<Item = u8>) -> Self {
        Self {
            off_days: off_days
                .into_iter()
                .filter(|&d| (d as usize) < DAYS_PER_WEEK)
                .collect(),
            close_on_off_days: true,
        }
    }

    /// Weekday index (0..7) of a horizon day.
    #[inline]
    pub fn weekday(day: usize) -> u8 {
        (day % DAYS_PER_WEEK) as u8
    }

    /// Week bucket of a horizon day.
    #[inline]
    pub fn week_index(day: usize) -> usize {
        day / DAYS_PER_WEEK
    }

    /// Number of week buckets covering `days` days.
    #[inline]
    pub fn week_count(days: usize) -> usize {
        days.div_ceil(DAYS_PER_WEEK)
    }

    /// Whether no assignments are permitted on `day`.
    #[inline]
    pub fn is_closed(&self, day: usize) -> bool {
        self.close_on_off_days && self.off_days.contains(&Self::weekday(day))
    }

    /// Whether any day of the week can ever be closed.
    pub fn has_closures(&self) -> bool {
        self.close_on_off_days && !self.off_days.is_empty()
    }

    /// Open days within `0..days`, in order.
    pub fn open_days(&self, days: usize) -> impl Iterator<Item = usize> + '_ {
        (0..days).filter(move |&d| !self.is_closed(d))
    }

    /// Closed days within `0..days`, in order.
    pub fn closed_days(&self, days: usize) -> impl Iterator<Item = usize> + '_ {
        (0..days).filter(move |&d| self.is_closed(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_gates_closures() {
        let mut cal = ClosureCalendar::closing([5, 6]);
        assert!(cal.is_closed(5));
        assert!(cal.is_closed(13));
        assert!(!cal.is_closed(4));

        cal.close_on_off_days = false;
        assert!(!cal.is_closed(5));
        assert!(!cal.has_closures());
    }

    #[test]
    fn test_out_of_range_weekdays_ignored() {
        let cal = ClosureCalendar::closing([0, 7, 12]);
        assert_eq!(cal.off_days.len(), 1);
        assert!(cal.is_closed(0));
        assert!(cal.is_closed(7));
    }

    #[test]
    fn test_week_buckets() {
        assert_eq!(ClosureCalendar::week_index(0), 0);
        assert_eq!(ClosureCalendar::week_index(6), 0);
        assert_eq!(ClosureCalendar::week_index(7), 1);
        assert_eq!(ClosureCalendar::week_count(7), 1);
        assert_eq!(ClosureCalendar::week_count(8), 2);
        assert_eq!(ClosureCalendar::week_count(0), 0);
    }

    #[test]
    fn test_open_and_closed_days() {
        let cal = ClosureCalendar::closing([5, 6]);
        let open: Vec<usize> = cal.open_days(9).collect();
        assert_eq!(open, vec![0, 1, 2, 3, 4, 7, 8]);
        let closed: Vec<usize> = cal.closed_days(9).collect();
        assert_eq!(closed, vec![5, 6]);
    }
}
