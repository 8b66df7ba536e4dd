//! Meal scheduler: fills, extends and regenerates calendars.

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::config::{CalendarConfig, ScoringConfig};
use crate::history::MealHistory;
use crate::horizon::horizon_dates;
use crate::models::{Assignment, Meal, UpdateRange};
use crate::scoring::Scorer;
use crate::sources::{Clock, RandomSource, SeededRandom, SystemClock};
use crate::{log_changes, log_debug};

/// Errors that can occur during scheduling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("No candidate meals to schedule")]
    NoCandidates,
    #[error("Date not found in calendar: {0}")]
    RangeNotFound(NaiveDate),
    #[error("Invalid date: {0:?}")]
    InvalidDate(String),
    #[error("Calendar is empty")]
    EmptyCalendar,
    #[error("Invalid calendar config: {0}")]
    InvalidConfig(String),
}

/// Assigns meals to calendar days.
///
/// Every operation takes the calendar by reference and returns a new one;
/// on error nothing is returned, so the caller's calendar is never left
/// half-updated.
pub struct MealScheduler<C: Clock = SystemClock, R: RandomSource = SeededRandom> {
    scorer: Scorer,
    pub(crate) config: CalendarConfig,
    pub(crate) clock: C,
    random: R,
}

impl MealScheduler {
    /// Scheduler on the system clock with entropy-seeded draws.
    pub fn new(scoring: ScoringConfig, config: CalendarConfig) -> Self {
        Self::with_sources(scoring, config, SystemClock, SeededRandom::from_entropy())
    }
}

impl<C: Clock, R: RandomSource> MealScheduler<C, R> {
    pub fn with_sources(scoring: ScoringConfig, config: CalendarConfig, clock: C, random: R) -> Self {
        Self {
            scorer: Scorer::new(scoring),
            config,
            clock,
            random,
        }
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Build a fresh calendar from today through the horizon end.
    pub fn generate(
        &mut self,
        user_id: &str,
        candidates: &[Meal],
    ) -> Result<Vec<Assignment>, SchedulerError> {
        if candidates.is_empty() {
            return Err(SchedulerError::NoCandidates);
        }

        let today = self.clock.today();
        let dates = horizon_dates(today, &self.config)?;
        log_debug!(
            self.config.verbosity,
            "Generating {} days from {} for user {}",
            dates.len(),
            today,
            user_id
        );

        let mut calendar = Vec::with_capacity(dates.len());
        let mut history = MealHistory::default();
        for date in dates {
            let entry = self.assign_next(user_id, candidates, &history, date)?;
            history.record(&entry.meal_id, date);
            calendar.push(entry);
        }
        Ok(calendar)
    }

    /// Append `extra_days` new days after the last day of `existing`.
    ///
    /// A calendar already at the window size first sheds its oldest
    /// `extra_days` entries. The result is not trimmed to the window.
    pub fn extend(
        &mut self,
        user_id: &str,
        existing: &[Assignment],
        candidates: &[Meal],
        extra_days: usize,
    ) -> Result<Vec<Assignment>, SchedulerError> {
        let last = existing.last().ok_or(SchedulerError::EmptyCalendar)?;
        if candidates.is_empty() {
            return Err(SchedulerError::NoCandidates);
        }
        let anchor = last.date;
        if anchor.checked_add_days(Days::new(extra_days as u64)).is_none() {
            return Err(SchedulerError::InvalidDate(format!(
                "{} + {} days",
                anchor, extra_days
            )));
        }

        let kept = if existing.len() >= self.config.window_days {
            &existing[extra_days.min(existing.len())..]
        } else {
            existing
        };
        log_debug!(
            self.config.verbosity,
            "Extending by {} days after {} (dropped {} old entries)",
            extra_days,
            anchor,
            existing.len() - kept.len()
        );

        let mut calendar = kept.to_vec();
        let mut history = MealHistory::from_assignments(&calendar);
        for i in 1..=extra_days {
            let date = anchor + Days::new(i as u64);
            let entry = self.assign_next(user_id, candidates, &history, date)?;
            history.record(&entry.meal_id, date);
            calendar.push(entry);
        }
        Ok(calendar)
    }

    /// Re-pick the meals of every day from `range.from` through `range.to`.
    ///
    /// Each day is scored against the whole calendar as it stands at that
    /// point: days already re-picked show their new meal, later days still
    /// show their old one. Dates and days outside the range are untouched.
    pub fn regenerate_range(
        &mut self,
        user_id: &str,
        assignments: &[Assignment],
        candidates: &[Meal],
        range: &UpdateRange,
    ) -> Result<Vec<Assignment>, SchedulerError> {
        let (from, to) = range.resolve(&self.config.date_format)?;
        if assignments.is_empty() {
            return Err(SchedulerError::EmptyCalendar);
        }
        let start = position_of(assignments, from)?;
        let end = position_of(assignments, to)?;
        if candidates.is_empty() {
            return Err(SchedulerError::NoCandidates);
        }

        let mut calendar = assignments.to_vec();
        if start > end {
            // Inverted range selects no days
            log_debug!(self.config.verbosity, "Empty range {} .. {}", from, to);
            return Ok(calendar);
        }

        let mut history = MealHistory::from_assignments(&calendar);
        for i in start..=end {
            let date = calendar[i].date;
            let entry = self.assign_next(user_id, candidates, &history, date)?;
            history.forget(&calendar[i].meal_id, date);
            history.record(&entry.meal_id, date);
            calendar[i] = entry;
        }
        Ok(calendar)
    }

    /// Score all candidates for `date` and build the winning entry.
    fn assign_next(
        &mut self,
        user_id: &str,
        candidates: &[Meal],
        history: &MealHistory,
        date: NaiveDate,
    ) -> Result<Assignment, SchedulerError> {
        let verbosity = self.config.verbosity;
        let meal = self
            .scorer
            .choose(candidates, history, date, &mut self.random, verbosity)?;
        log_changes!(verbosity, "{}: {} ({})", date, meal.name, meal.id);
        Ok(Assignment::for_meal(user_id, date, meal))
    }
}

/// Put `meal` on `date`, keeping every other day as it is.
pub fn assign_day(
    assignments: &[Assignment],
    date: NaiveDate,
    meal: &Meal,
) -> Result<Vec<Assignment>, SchedulerError> {
    let index = position_of(assignments, date)?;
    let mut calendar = assignments.to_vec();
    let entry = &mut calendar[index];
    entry.meal_id = meal.id.clone();
    entry.name = meal.name.clone();
    Ok(calendar)
}

fn position_of(assignments: &[Assignment], date: NaiveDate) -> Result<usize, SchedulerError> {
    assignments
        .iter()
        .position(|entry| entry.date == date)
        .ok_or(SchedulerError::RangeNotFound(date))
}
