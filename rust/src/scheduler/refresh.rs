//! Rolling a stored calendar forward to today's horizon.

use crate::horizon::{horizon_end, trim_window};
use crate::models::{Assignment, Meal};
use crate::sources::{Clock, RandomSource};
use crate::{log_changes, log_debug};

use super::core::{MealScheduler, SchedulerError};

/// What a refresh did to the calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshAction {
    /// Already reaches the horizon end.
    Unchanged,
    /// Extended by this many days, then trimmed to the window.
    Extended(usize),
    /// Too stale to extend; rebuilt from today.
    Regenerated,
}

impl RefreshAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshAction::Unchanged => "unchanged",
            RefreshAction::Extended(_) => "extended",
            RefreshAction::Regenerated => "regenerated",
        }
    }
}

/// Calendar after a refresh, with the action taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub assignments: Vec<Assignment>,
    pub action: RefreshAction,
}

impl RefreshOutcome {
    /// Whether the caller needs to persist the calendar again.
    pub fn changed(&self) -> bool {
        self.action != RefreshAction::Unchanged
    }
}

impl<C: Clock, R: RandomSource> MealScheduler<C, R> {
    /// Bring a stored calendar up to the current horizon.
    ///
    /// A calendar ending before the horizon end is extended by the missing
    /// days and trimmed to the most recent `window_days` entries. If more
    /// than a full window is missing, none of the stored days are still
    /// useful and the calendar is generated anew.
    pub fn refresh(
        &mut self,
        user_id: &str,
        existing: &[Assignment],
        candidates: &[Meal],
    ) -> Result<RefreshOutcome, SchedulerError> {
        let last = existing.last().ok_or(SchedulerError::EmptyCalendar)?;
        let today = self.clock.today();
        let target = horizon_end(today, &self.config)?;
        let gap = (target - last.date).num_days();
        log_debug!(
            self.config.verbosity,
            "Refresh: last day {}, horizon end {}, gap {}",
            last.date,
            target,
            gap
        );

        if gap <= 0 {
            return Ok(RefreshOutcome {
                assignments: existing.to_vec(),
                action: RefreshAction::Unchanged,
            });
        }
        if candidates.is_empty() {
            return Err(SchedulerError::NoCandidates);
        }

        let window = self.config.window_days;
        let gap = gap as usize;
        let (calendar, action) = if gap > window {
            log_changes!(
                self.config.verbosity,
                "Calendar for {} is {} days stale, regenerating",
                user_id,
                gap
            );
            (self.generate(user_id, candidates)?, RefreshAction::Regenerated)
        } else {
            log_changes!(
                self.config.verbosity,
                "Extending calendar for {} by {} days",
                user_id,
                gap
            );
            (
                self.extend(user_id, existing, candidates, gap)?,
                RefreshAction::Extended(gap),
            )
        };

        Ok(RefreshOutcome {
            assignments: trim_window(calendar, window),
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CalendarConfig, ScoringConfig};
    use crate::models::MealType;
    use crate::sources::{FixedClock, SeededRandom};
    use chrono::{Duration, NaiveDate};

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn catalog() -> Vec<Meal> {
        ["a", "b", "c", "d", "e"]
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let meal_type = match i {
                    1 => MealType::Weekly,
                    3 => MealType::Occasional,
                    _ => MealType::Standard,
                };
                Meal::new(*id, id.to_uppercase(), meal_type)
            })
            .collect()
    }

    fn scheduler_on(today: NaiveDate) -> MealScheduler<FixedClock, SeededRandom> {
        MealScheduler::with_sources(
            ScoringConfig::default(),
            CalendarConfig::default(),
            FixedClock(today),
            SeededRandom::from_seed(7),
        )
    }

    #[test]
    fn test_refresh_up_to_date_is_unchanged() {
        let today = d(2025, 1, 7);
        let mut scheduler = scheduler_on(today);
        let calendar = scheduler.generate("u1", &catalog()).unwrap();

        let outcome = scheduler.refresh("u1", &calendar, &catalog()).unwrap();
        assert_eq!(outcome.action, RefreshAction::Unchanged);
        assert!(!outcome.changed());
        assert_eq!(outcome.assignments, calendar);

        // No candidates needed when nothing has to be filled
        let outcome = scheduler.refresh("u1", &calendar, &[]).unwrap();
        assert_eq!(outcome.action, RefreshAction::Unchanged);
    }

    #[test]
    fn test_refresh_extends_and_trims() {
        // Generated on Monday 2025-01-06: 28 days through Sunday 2025-02-02
        let calendar = scheduler_on(d(2025, 1, 6))
            .generate("u1", &catalog())
            .unwrap();
        assert_eq!(calendar.len(), 28);

        // A week later the horizon ends on 2025-02-09
        let mut scheduler = scheduler_on(d(2025, 1, 13));
        let outcome = scheduler.refresh("u1", &calendar, &catalog()).unwrap();

        assert_eq!(outcome.action, RefreshAction::Extended(7));
        assert!(outcome.changed());
        assert_eq!(outcome.assignments.len(), 28);
        assert_eq!(outcome.assignments[0].date, d(2025, 1, 13));
        assert_eq!(outcome.assignments.last().unwrap().date, d(2025, 2, 9));
        assert_eq!(&outcome.assignments[..21], &calendar[7..]);
    }

    #[test]
    fn test_refresh_short_calendar_trims_to_window() {
        // Generated on Sunday: 22 days through 2025-01-26
        let calendar = scheduler_on(d(2025, 1, 5))
            .generate("u1", &catalog())
            .unwrap();
        assert_eq!(calendar.len(), 22);

        // Monday: horizon end jumps to 2025-02-02, 7 days missing
        let outcome = scheduler_on(d(2025, 1, 6))
            .refresh("u1", &calendar, &catalog())
            .unwrap();
        assert_eq!(outcome.action, RefreshAction::Extended(7));
        assert_eq!(outcome.assignments.len(), 28);
        assert_eq!(outcome.assignments[0].date, d(2025, 1, 6));
        for (i, entry) in outcome.assignments.iter().enumerate() {
            assert_eq!(entry.date, d(2025, 1, 6) + Duration::days(i as i64));
        }
    }

    #[test]
    fn test_refresh_stale_calendar_regenerates() {
        let calendar = scheduler_on(d(2025, 1, 6))
            .generate("u1", &catalog())
            .unwrap();

        let today = d(2025, 4, 1);
        let outcome = scheduler_on(today)
            .refresh("u1", &calendar, &catalog())
            .unwrap();
        assert_eq!(outcome.action, RefreshAction::Regenerated);
        assert_eq!(outcome.assignments[0].date, today);
        assert!(outcome.assignments.len() <= 28);
    }

    #[test]
    fn test_refresh_preconditions() {
        let mut scheduler = scheduler_on(d(2025, 1, 13));
        assert_eq!(
            scheduler.refresh("u1", &[], &catalog()),
            Err(SchedulerError::EmptyCalendar)
        );

        let calendar = scheduler_on(d(2025, 1, 6))
            .generate("u1", &catalog())
            .unwrap();
        assert_eq!(
            scheduler.refresh("u1", &calendar, &[]),
            Err(SchedulerError::NoCandidates)
        );
    }
}
