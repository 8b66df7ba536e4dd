//! Index of where each meal sits in a calendar.
//!
//! The scorer asks, for every candidate on every day, how far the nearest
//! occurrence of that meal is. Keeping the occurrence dates per meal id avoids
//! rescanning the whole calendar for each question.

use chrono::NaiveDate;
use rustc_hash::FxHashMap;

use crate::models::Assignment;

/// How close a meal already sits to a given day.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Recency {
    /// Whether the meal appears anywhere in the history.
    pub contains: bool,
    /// Smallest absolute day gap to an occurrence, or 0 when absent.
    pub distance: f64,
}

impl Recency {
    pub const ABSENT: Recency = Recency {
        contains: false,
        distance: 0.0,
    };
}

/// Occurrence dates per meal id over an assignment sequence.
#[derive(Clone, Debug, Default)]
pub struct MealHistory {
    occurrences: FxHashMap<String, Vec<NaiveDate>>,
    len: usize,
}

impl MealHistory {
    pub fn from_assignments(assignments: &[Assignment]) -> Self {
        let mut history = Self::default();
        for entry in assignments {
            history.record(&entry.meal_id, entry.date);
        }
        history
    }

    /// Note that `meal_id` is served on `date`.
    pub fn record(&mut self, meal_id: &str, date: NaiveDate) {
        self.occurrences
            .entry(meal_id.to_string())
            .or_default()
            .push(date);
        self.len += 1;
    }

    /// Drop one occurrence of `meal_id` on `date`, if present.
    pub fn forget(&mut self, meal_id: &str, date: NaiveDate) {
        let Some(dates) = self.occurrences.get_mut(meal_id) else {
            return;
        };
        if let Some(pos) = dates.iter().position(|d| *d == date) {
            dates.swap_remove(pos);
            self.len -= 1;
        }
        if dates.is_empty() {
            self.occurrences.remove(meal_id);
        }
    }

    /// Number of entries (calendar days) in the history.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distance from `day` to the nearest occurrence of `meal_id`.
    pub fn recency(&self, meal_id: &str, day: NaiveDate) -> Recency {
        let nearest = self
            .occurrences
            .get(meal_id)
            .and_then(|dates| dates.iter().map(|d| (day - *d).num_days().abs()).min());

        match nearest {
            Some(days) => Recency {
                contains: true,
                distance: days as f64,
            },
            None => Recency::ABSENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn entry(meal_id: &str, date: NaiveDate) -> Assignment {
        Assignment {
            user_id: "u1".to_string(),
            date,
            meal_id: meal_id.to_string(),
            name: meal_id.to_uppercase(),
        }
    }

    #[test]
    fn test_absent_meal() {
        let history = MealHistory::from_assignments(&[entry("a", d(2025, 1, 1))]);
        assert_eq!(history.recency("b", d(2025, 1, 2)), Recency::ABSENT);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_nearest_occurrence_wins() {
        let history = MealHistory::from_assignments(&[
            entry("a", d(2025, 1, 1)),
            entry("b", d(2025, 1, 2)),
            entry("a", d(2025, 1, 6)),
        ]);
        let recency = history.recency("a", d(2025, 1, 10));
        assert!(recency.contains);
        assert!((recency.distance - 4.0).abs() < 1e-9);

        // Later occurrences count as well when regenerating in the middle
        let recency = history.recency("a", d(2025, 1, 5));
        assert!((recency.distance - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_day_is_zero_but_contained() {
        let history = MealHistory::from_assignments(&[entry("a", d(2025, 1, 1))]);
        let recency = history.recency("a", d(2025, 1, 1));
        assert!(recency.contains);
        assert_eq!(recency.distance, 0.0);
    }

    #[test]
    fn test_forget() {
        let mut history = MealHistory::from_assignments(&[
            entry("a", d(2025, 1, 1)),
            entry("a", d(2025, 1, 3)),
        ]);
        history.forget("a", d(2025, 1, 3));
        assert_eq!(history.len(), 1);
        assert!((history.recency("a", d(2025, 1, 4)).distance - 3.0).abs() < 1e-9);

        history.forget("a", d(2025, 1, 1));
        assert!(history.is_empty());
        assert_eq!(history.recency("a", d(2025, 1, 4)), Recency::ABSENT);

        // Unknown meal or date is a no-op
        history.forget("zzz", d(2025, 1, 1));
        assert!(history.is_empty());
    }
}
