//! Month navigation and per-month statistics.
//!
//! Navigation works on raw `(year, month)` pairs so it can be used by any
//! caller holding plain integers; `MonthKey::previous`/`next` wrap these.

use super::models::{HabitStore, MonthKey};

/// Steps back one month, wrapping January to December of the prior year.
///
/// At the lowest representable year January stays put.
///
/// # Examples
///
/// ```
/// use habitrack::domain::previous_month;
///
/// assert_eq!(previous_month(2025, 1), (2024, 12));
/// assert_eq!(previous_month(2025, 6), (2025, 5));
/// ```
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        match year.checked_sub(1) {
            Some(prior) => (prior, 12),
            None => (year, month),
        }
    } else {
        (year, month - 1)
    }
}

/// Steps forward one month, wrapping December to January of the next year.
///
/// At the highest representable year December stays put.
///
/// # Examples
///
/// ```
/// use habitrack::domain::next_month;
///
/// assert_eq!(next_month(2025, 12), (2026, 1));
/// assert_eq!(next_month(2025, 6), (2025, 7));
/// ```
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        match year.checked_add(1) {
            Some(following) => (following, 1),
            None => (year, month),
        }
    } else {
        (year, month + 1)
    }
}

/// Completion counts for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonthSummary {
    pub total: usize,
    pub done: usize,
}

impl MonthSummary {
    pub fn pending(&self) -> usize {
        self.total.saturating_sub(self.done)
    }

    /// Whole-number percentage of done records; 0 for an empty month.
    pub fn completion_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.done * 100 / self.total) as u32
    }
}

impl HabitStore {
    pub fn summarize(&self, key: MonthKey) -> MonthSummary {
        let habits = self.list_habits(key);
        MonthSummary {
            total: habits.len(),
            done: habits.iter().filter(|h| h.done).count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_month_wraps_january() {
        assert_eq!(previous_month(2025, 1), (2024, 12));
        assert_eq!(previous_month(2025, 12), (2025, 11));
    }

    #[test]
    fn test_next_month_wraps_december() {
        assert_eq!(next_month(2025, 12), (2026, 1));
        assert_eq!(next_month(2025, 1), (2025, 2));
    }

    #[test]
    fn test_navigation_stops_at_year_range_ends() {
        assert_eq!(next_month(i32::MAX, 12), (i32::MAX, 12));
        assert_eq!(previous_month(i32::MIN, 1), (i32::MIN, 1));
        assert_eq!(next_month(i32::MAX, 11), (i32::MAX, 12));

        let last = MonthKey::new(i32::MAX, 12).unwrap();
        assert_eq!(last.next(), last);
        let first = MonthKey::new(i32::MIN, 1).unwrap();
        assert_eq!(first.previous(), first);
    }

    #[test]
    fn test_pending_never_underflows() {
        let summary = MonthSummary { total: 0, done: 1 };
        assert_eq!(summary.pending(), 0);
    }

    #[test]
    fn test_full_year_cycle_returns_to_start() {
        let mut current = (2025, 3);
        for _ in 0..12 {
            current = next_month(current.0, current.1);
        }
        assert_eq!(current, (2026, 3));
        for _ in 0..12 {
            current = previous_month(current.0, current.1);
        }
        assert_eq!(current, (2025, 3));
    }

    #[test]
    fn test_summarize_counts_done() {
        let mut store = HabitStore::default();
        let may = MonthKey::new(2025, 5).unwrap();
        store.add_habit(may, "Exercise");
        store.add_habit(may, "Read");
        store.add_habit(may, "Sleep early");
        store.mark_done(may, 1);

        let summary = store.summarize(may);
        assert_eq!(summary, MonthSummary { total: 3, done: 1 });
        assert_eq!(summary.pending(), 2);
        assert_eq!(summary.completion_percent(), 33);
    }

    #[test]
    fn test_summarize_empty_month() {
        let store = HabitStore::default();
        let summary = store.summarize(MonthKey::new(2025, 5).unwrap());
        assert_eq!(summary, MonthSummary::default());
        assert_eq!(summary.completion_percent(), 0);
    }
}
