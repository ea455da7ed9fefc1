//! Run-scoped counter for transactions sharing a date and an amount.

use std::collections::HashMap;

use crate::notification::IsoDate;

/// Keeps track of occurrences for each unique (date, amount) pair.
///
/// Create one per batch and drop it afterwards; counts are never persisted.
#[derive(Debug, Default)]
pub struct OccurrenceTracker {
    counts: HashMap<(IsoDate, i64), u32>,
}

impl OccurrenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more occurrence of the pair and return its 1-based count.
    pub fn track(&mut self, date: &IsoDate, amount: i64) -> u32 {
        let count = self.counts.entry((date.clone(), amount)).or_insert(0);
        *count += 1;
        *count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_pair_counts_up() {
        let mut tracker = OccurrenceTracker::new();
        let date = IsoDate::new("2024-03-15");
        assert_eq!(tracker.track(&date, -50_000), 1);
        assert_eq!(tracker.track(&date, -50_000), 2);
        assert_eq!(tracker.track(&date, -50_000), 3);
    }

    #[test]
    fn test_pairs_are_independent() {
        let mut tracker = OccurrenceTracker::new();
        let date = IsoDate::new("2024-03-15");
        tracker.track(&date, -50_000);
        tracker.track(&date, -50_000);

        assert_eq!(tracker.track(&date, -10_000), 1);
        assert_eq!(tracker.track(&IsoDate::new("2024-03-16"), -50_000), 1);
        assert_eq!(tracker.track(&date, -50_000), 3);
    }

    #[test]
    fn test_new_tracker_starts_over() {
        let date = IsoDate::new("2024-03-15");
        let mut first = OccurrenceTracker::new();
        first.track(&date, -50_000);

        let mut second = OccurrenceTracker::new();
        assert_eq!(second.track(&date, -50_000), 1);
    }
}
