//! Scoring of candidate meals for a calendar day.
//!
//! A score is the sum of independent terms:
//! - `base`: uniform random draw in `[0, random_max)`, the source of variety
//! - `recency`: repeat penalty / freshness bonus from the meal's history
//! - `weekday`: occasional meals pushed toward weekends
//! - `weekly_spacing`: weekly meals pulled toward a 7+ day gap
//!
//! The highest total wins; on ties the first candidate in catalog order wins.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::config::ScoringConfig;
use crate::history::{MealHistory, Recency};
use crate::log_checks;
use crate::models::{Meal, MealType};
use crate::scheduler::SchedulerError;
use crate::sources::RandomSource;

/// Per-term contributions to a candidate's score.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub base: f64,
    pub recency: f64,
    pub weekday: f64,
    pub weekly_spacing: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.base + self.recency + self.weekday + self.weekly_spacing
    }
}

/// Random base value, `|draw|` over `[0, random_max)`.
pub fn base_term<R: RandomSource + ?Sized>(random: &mut R, config: &ScoringConfig) -> f64 {
    random.draw(config.random_max).abs()
}

/// Repeat penalty or freshness bonus.
///
/// Rules are exclusive and checked in order:
/// 1. served the day before or after: `-consecutive_penalty`
/// 2. already on this very day: `-same_day_penalty`
/// 3. served further away: `-repeat_penalty + (distance / history_len) / recency_divisor`
/// 4. never served: `+fresh_bonus`
pub fn recency_term(recency: Recency, history_len: usize, config: &ScoringConfig) -> f64 {
    if recency.distance == 1.0 {
        -config.consecutive_penalty
    } else if recency.contains && recency.distance == 0.0 {
        -config.same_day_penalty
    } else if recency.distance > 0.0 {
        let len = history_len.max(1) as f64;
        -config.repeat_penalty + (recency.distance / len) / config.recency_divisor
    } else {
        config.fresh_bonus
    }
}

/// Weekend skew for occasional meals. Zero for every other type.
pub fn weekday_term(meal_type: MealType, day: NaiveDate, config: &ScoringConfig) -> f64 {
    if meal_type != MealType::Occasional {
        return 0.0;
    }
    match day.weekday() {
        Weekday::Sat | Weekday::Sun => config.occasional_weekend_bonus,
        _ => -config.occasional_weekday_penalty,
    }
}

/// Spacing bonus for weekly meals.
///
/// Applies only when the meal was never served or its nearest occurrence is
/// at least `weekly_min_gap_days` away; closer repeats get nothing here.
pub fn weekly_spacing_term(meal_type: MealType, recency: Recency, config: &ScoringConfig) -> f64 {
    if meal_type != MealType::Weekly {
        return 0.0;
    }
    if !recency.contains {
        config.weekly_fresh_bonus
    } else if recency.distance >= config.weekly_min_gap_days {
        config.weekly_spacing_base - (1.0 / recency.distance) * config.weekly_spacing_scale
    } else {
        0.0
    }
}

/// Index of the highest score. Strict comparison keeps the first maximum.
pub fn pick_best(scores: &[f64]) -> Option<usize> {
    let (&first, rest) = scores.split_first()?;
    let mut best = 0;
    let mut highest = first;
    for (i, &score) in rest.iter().enumerate() {
        if score > highest {
            highest = score;
            best = i + 1;
        }
    }
    Some(best)
}

/// Scores candidate meals against a calendar history.
#[derive(Clone, Debug, Default)]
pub struct Scorer {
    config: ScoringConfig,
}

impl Scorer {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one candidate for `day`.
    pub fn score<R: RandomSource + ?Sized>(
        &self,
        meal: &Meal,
        history: &MealHistory,
        day: NaiveDate,
        random: &mut R,
    ) -> ScoreBreakdown {
        let recency = history.recency(&meal.id, day);
        ScoreBreakdown {
            base: base_term(random, &self.config),
            recency: recency_term(recency, history.len(), &self.config),
            weekday: weekday_term(meal.meal_type, day, &self.config),
            weekly_spacing: weekly_spacing_term(meal.meal_type, recency, &self.config),
        }
    }

    /// Score every candidate for `day` and return the winner.
    ///
    /// Draws exactly one random value per candidate, in catalog order.
    pub fn choose<'m, R: RandomSource + ?Sized>(
        &self,
        candidates: &'m [Meal],
        history: &MealHistory,
        day: NaiveDate,
        random: &mut R,
        verbosity: u8,
    ) -> Result<&'m Meal, SchedulerError> {
        let scores: Vec<f64> = candidates
            .iter()
            .map(|meal| {
                let breakdown = self.score(meal, history, day, random);
                log_checks!(
                    verbosity,
                    "  {} {:<20} base={:.2} recency={:.2} weekday={:.2} weekly={:.2} => {:.2}",
                    day,
                    meal.id,
                    breakdown.base,
                    breakdown.recency,
                    breakdown.weekday,
                    breakdown.weekly_spacing,
                    breakdown.total()
                );
                breakdown.total()
            })
            .collect();

        let best = pick_best(&scores).ok_or(SchedulerError::NoCandidates)?;
        Ok(&candidates[best])
    }
}
