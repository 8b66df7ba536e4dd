//! Configuration types for meal scoring and calendar maintenance.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::scheduler::SchedulerError;

/// Weights of the individual scoring terms.
///
/// The defaults are the canonical values of the meal-picking heuristic;
/// changing them changes which meal wins.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct ScoringConfig {
    /// Upper bound (exclusive) of the random base draw
    #[pyo3(get, set)]
    pub random_max: f64,
    /// Penalty for a meal served the previous (or next) day
    #[pyo3(get, set)]
    pub consecutive_penalty: f64,
    /// Penalty for a meal already sitting on the day being filled
    #[pyo3(get, set)]
    pub same_day_penalty: f64,
    /// Flat penalty for any meal already present in the history
    #[pyo3(get, set)]
    pub repeat_penalty: f64,
    /// Divisor of the distance/history-length recovery bonus
    #[pyo3(get, set)]
    pub recency_divisor: f64,
    /// Bonus for a meal absent from the history
    #[pyo3(get, set)]
    pub fresh_bonus: f64,
    /// Bonus for an occasional meal on Saturday or Sunday
    #[pyo3(get, set)]
    pub occasional_weekend_bonus: f64,
    /// Penalty for an occasional meal Monday to Friday
    #[pyo3(get, set)]
    pub occasional_weekday_penalty: f64,
    /// Minimum gap in days before a weekly meal earns the spacing bonus again
    #[pyo3(get, set)]
    pub weekly_min_gap_days: f64,
    /// Bonus for a weekly meal absent from the history
    #[pyo3(get, set)]
    pub weekly_fresh_bonus: f64,
    /// Asymptote of the weekly spacing bonus
    #[pyo3(get, set)]
    pub weekly_spacing_base: f64,
    /// Scale of the 1/distance shrink applied to the weekly spacing bonus
    #[pyo3(get, set)]
    pub weekly_spacing_scale: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            random_max: 3.0,
            consecutive_penalty: 20.0,
            same_day_penalty: 20.0,
            repeat_penalty: 1.9,
            recency_divisor: 4.0,
            fresh_bonus: 0.8,
            occasional_weekend_bonus: 2.10,
            occasional_weekday_penalty: 2.9,
            weekly_min_gap_days: 7.0,
            weekly_fresh_bonus: 1.2,
            weekly_spacing_base: 1.6,
            weekly_spacing_scale: 2.3,
        }
    }
}

#[pymethods]
impl ScoringConfig {
    #[new]
    #[pyo3(signature = (
        random_max=None,
        consecutive_penalty=None,
        same_day_penalty=None,
        repeat_penalty=None,
        recency_divisor=None,
        fresh_bonus=None,
        occasional_weekend_bonus=None,
        occasional_weekday_penalty=None,
        weekly_min_gap_days=None,
        weekly_fresh_bonus=None,
        weekly_spacing_base=None,
        weekly_spacing_scale=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        random_max: Option<f64>,
        consecutive_penalty: Option<f64>,
        same_day_penalty: Option<f64>,
        repeat_penalty: Option<f64>,
        recency_divisor: Option<f64>,
        fresh_bonus: Option<f64>,
        occasional_weekend_bonus: Option<f64>,
        occasional_weekday_penalty: Option<f64>,
        weekly_min_gap_days: Option<f64>,
        weekly_fresh_bonus: Option<f64>,
        weekly_spacing_base: Option<f64>,
        weekly_spacing_scale: Option<f64>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            random_max: random_max.unwrap_or(defaults.random_max),
            consecutive_penalty: consecutive_penalty.unwrap_or(defaults.consecutive_penalty),
            same_day_penalty: same_day_penalty.unwrap_or(defaults.same_day_penalty),
            repeat_penalty: repeat_penalty.unwrap_or(defaults.repeat_penalty),
            recency_divisor: recency_divisor.unwrap_or(defaults.recency_divisor),
            fresh_bonus: fresh_bonus.unwrap_or(defaults.fresh_bonus),
            occasional_weekend_bonus: occasional_weekend_bonus
                .unwrap_or(defaults.occasional_weekend_bonus),
            occasional_weekday_penalty: occasional_weekday_penalty
                .unwrap_or(defaults.occasional_weekday_penalty),
            weekly_min_gap_days: weekly_min_gap_days.unwrap_or(defaults.weekly_min_gap_days),
            weekly_fresh_bonus: weekly_fresh_bonus.unwrap_or(defaults.weekly_fresh_bonus),
            weekly_spacing_base: weekly_spacing_base.unwrap_or(defaults.weekly_spacing_base),
            weekly_spacing_scale: weekly_spacing_scale.unwrap_or(defaults.weekly_spacing_scale),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScoringConfig(random_max={}, fresh_bonus={}, repeat_penalty={})",
            self.random_max, self.fresh_bonus, self.repeat_penalty
        )
    }
}

/// Parameters of the rolling calendar window.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarConfig {
    /// Maximum number of active days kept in a calendar
    #[pyo3(get, set)]
    pub window_days: usize,
    /// Days ahead of a Sunday that the horizon reaches
    #[pyo3(get, set)]
    pub base_horizon_days: i64,
    /// chrono format of calendar date strings
    #[pyo3(get, set)]
    pub date_format: String,
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            window_days: 28,
            base_horizon_days: 21,
            date_format: "%Y/%m/%d".to_string(),
            verbosity: 0,
        }
    }
}

impl CalendarConfig {
    /// Reject settings the horizon arithmetic cannot work with.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.base_horizon_days < 0 {
            return Err(SchedulerError::InvalidConfig(format!(
                "base_horizon_days must not be negative, got {}",
                self.base_horizon_days
            )));
        }
        Ok(())
    }
}

#[pymethods]
impl CalendarConfig {
    #[new]
    #[pyo3(signature = (
        window_days=None,
        base_horizon_days=None,
        date_format=None,
        verbosity=None
    ))]
    fn new(
        window_days: Option<usize>,
        base_horizon_days: Option<i64>,
        date_format: Option<String>,
        verbosity: Option<u8>,
    ) -> PyResult<Self> {
        let defaults = Self::default();
        let config = Self {
            window_days: window_days.unwrap_or(defaults.window_days),
            base_horizon_days: base_horizon_days.unwrap_or(defaults.base_horizon_days),
            date_format: date_format.unwrap_or(defaults.date_format),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        };
        config
            .validate()
            .map_err(|err| PyValueError::new_err(err.to_string()))?;
        Ok(config)
    }

    fn __repr__(&self) -> String {
        format!(
            "CalendarConfig(window_days={}, base_horizon_days={}, date_format={:?})",
            self.window_days, self.base_horizon_days, self.date_format
        )
    }
}
