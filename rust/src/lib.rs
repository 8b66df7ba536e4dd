//! Rust implementation of the meal calendar scheduler.
//!
//! Assigns meals to calendar days over a rolling multi-week horizon, scoring
//! every candidate per day for variety and meal-type constraints.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;

mod config;
pub mod history;
pub mod horizon;
pub mod logging;
mod models;
pub mod scheduler;
pub mod scoring;
pub mod season;
pub mod sources;

pub use config::{CalendarConfig, ScoringConfig};
pub use horizon::{front_view, horizon_end, parse_date, trim_window};
pub use models::{Assignment, Meal, MealType, UpdateRange, NO_MEAL};
pub use scheduler::{assign_day, MealScheduler, RefreshAction, RefreshOutcome, SchedulerError};
pub use scoring::{ScoreBreakdown, Scorer};
pub use season::{seasonal_candidates, Season};
pub use sources::{Clock, FixedClock, RandomSource, SeededRandom, SystemClock};

fn to_py_err(err: SchedulerError) -> PyErr {
    pyo3::exceptions::PyValueError::new_err(err.to_string())
}

/// Scheduler for one Python call: pinned to `today` (or the system date)
/// and seeded from `seed` (or entropy).
fn build_scheduler(
    scoring: Option<ScoringConfig>,
    config: Option<CalendarConfig>,
    today: Option<NaiveDate>,
    seed: Option<u64>,
) -> MealScheduler<FixedClock, SeededRandom> {
    MealScheduler::with_sources(
        scoring.unwrap_or_default(),
        config.unwrap_or_default(),
        FixedClock(today.unwrap_or_else(|| SystemClock.today())),
        SeededRandom::from_optional_seed(seed),
    )
}

/// Outcome of `refresh_calendar` (PyO3 wrapper).
#[pyclass(name = "RefreshResult")]
#[derive(Clone, Debug)]
pub struct PyRefreshResult {
    #[pyo3(get)]
    pub assignments: Vec<Assignment>,
    pub refresh_action: RefreshAction,
    #[pyo3(get)]
    pub days_added: usize,
}

impl From<RefreshOutcome> for PyRefreshResult {
    fn from(outcome: RefreshOutcome) -> Self {
        let days_added = match outcome.action {
            RefreshAction::Extended(days) => days,
            RefreshAction::Regenerated => outcome.assignments.len(),
            RefreshAction::Unchanged => 0,
        };
        Self {
            assignments: outcome.assignments,
            refresh_action: outcome.action,
            days_added,
        }
    }
}

#[pymethods]
impl PyRefreshResult {
    /// "unchanged", "extended" or "regenerated"
    #[getter]
    fn action(&self) -> &'static str {
        self.refresh_action.as_str()
    }

    /// Whether the calendar must be stored again.
    #[getter]
    fn changed(&self) -> bool {
        self.refresh_action != RefreshAction::Unchanged
    }

    fn __repr__(&self) -> String {
        format!(
            "RefreshResult(action={:?}, days_added={}, assignments={})",
            self.action(),
            self.days_added,
            self.assignments.len()
        )
    }
}

/// Generate a fresh calendar from today through the end of the week after next.
///
/// # Raises
/// * ValueError if `candidates` is empty
#[pyfunction]
#[pyo3(signature = (user_id, candidates, scoring=None, config=None, today=None, seed=None))]
fn generate_calendar(
    user_id: &str,
    candidates: Vec<Meal>,
    scoring: Option<ScoringConfig>,
    config: Option<CalendarConfig>,
    today: Option<NaiveDate>,
    seed: Option<u64>,
) -> PyResult<Vec<Assignment>> {
    build_scheduler(scoring, config, today, seed)
        .generate(user_id, &candidates)
        .map_err(to_py_err)
}

/// Append `extra_days` days after the last day of `existing`.
///
/// The result is not trimmed to the window; see `refresh_calendar`.
///
/// # Raises
/// * ValueError if `existing` or `candidates` is empty
#[pyfunction]
#[pyo3(signature = (user_id, existing, candidates, extra_days, scoring=None, config=None, seed=None))]
#[allow(clippy::too_many_arguments)]
fn extend_calendar(
    user_id: &str,
    existing: Vec<Assignment>,
    candidates: Vec<Meal>,
    extra_days: usize,
    scoring: Option<ScoringConfig>,
    config: Option<CalendarConfig>,
    seed: Option<u64>,
) -> PyResult<Vec<Assignment>> {
    build_scheduler(scoring, config, None, seed)
        .extend(user_id, &existing, &candidates, extra_days)
        .map_err(to_py_err)
}

/// Re-pick the meals of every day in `range` (inclusive).
///
/// # Raises
/// * ValueError if a date is malformed or absent from the calendar, or if
///   the calendar or `candidates` is empty
#[pyfunction]
#[pyo3(name = "regenerate_range", signature = (user_id, assignments, candidates, range, scoring=None, config=None, seed=None))]
#[allow(clippy::too_many_arguments)]
fn py_regenerate_range(
    user_id: &str,
    assignments: Vec<Assignment>,
    candidates: Vec<Meal>,
    range: UpdateRange,
    scoring: Option<ScoringConfig>,
    config: Option<CalendarConfig>,
    seed: Option<u64>,
) -> PyResult<Vec<Assignment>> {
    build_scheduler(scoring, config, None, seed)
        .regenerate_range(user_id, &assignments, &candidates, &range)
        .map_err(to_py_err)
}

/// Roll a stored calendar forward to today's horizon and trim it to the window.
///
/// # Raises
/// * ValueError if `existing` is empty, or if days must be filled and
///   `candidates` is empty
#[pyfunction]
#[pyo3(signature = (user_id, existing, candidates, scoring=None, config=None, today=None, seed=None))]
#[allow(clippy::too_many_arguments)]
fn refresh_calendar(
    user_id: &str,
    existing: Vec<Assignment>,
    candidates: Vec<Meal>,
    scoring: Option<ScoringConfig>,
    config: Option<CalendarConfig>,
    today: Option<NaiveDate>,
    seed: Option<u64>,
) -> PyResult<PyRefreshResult> {
    build_scheduler(scoring, config, today, seed)
        .refresh(user_id, &existing, &candidates)
        .map(PyRefreshResult::from)
        .map_err(to_py_err)
}

/// Put `meal` on the day `date` (a calendar date string).
///
/// # Raises
/// * ValueError if `date` is malformed or absent from the calendar
#[pyfunction]
#[pyo3(name = "assign_day", signature = (assignments, date, meal, date_format="%Y/%m/%d"))]
fn py_assign_day(
    assignments: Vec<Assignment>,
    date: &str,
    meal: Meal,
    date_format: &str,
) -> PyResult<Vec<Assignment>> {
    let date = parse_date(date, date_format).map_err(to_py_err)?;
    assign_day(&assignments, date, &meal).map_err(to_py_err)
}

/// Pad a calendar at the front with `NO MEAL` days up to `window_days` entries.
///
/// # Raises
/// * ValueError if `assignments` is empty
#[pyfunction]
#[pyo3(signature = (assignments, window_days=28))]
fn front_calendar(assignments: Vec<Assignment>, window_days: usize) -> PyResult<Vec<Assignment>> {
    front_view(&assignments, window_days).map_err(to_py_err)
}

/// Season label ("winter", "spring", "summer", "autumn") of a date.
#[pyfunction]
fn season_for_date(date: NaiveDate) -> &'static str {
    Season::for_date(date).as_str()
}

/// Meals valid in the season of `date`, order preserved.
#[pyfunction]
fn filter_seasonal(meals: Vec<Meal>, date: NaiveDate) -> Vec<Meal> {
    seasonal_candidates(&meals, date)
}

/// The meal_calendar.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<Meal>()?;
    m.add_class::<Assignment>()?;
    m.add_class::<UpdateRange>()?;
    m.add_class::<PyRefreshResult>()?;

    // Config types
    m.add_class::<ScoringConfig>()?;
    m.add_class::<CalendarConfig>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(generate_calendar, m)?)?;
    m.add_function(wrap_pyfunction!(extend_calendar, m)?)?;
    m.add_function(wrap_pyfunction!(py_regenerate_range, m)?)?;
    m.add_function(wrap_pyfunction!(refresh_calendar, m)?)?;
    m.add_function(wrap_pyfunction!(py_assign_day, m)?)?;
    m.add_function(wrap_pyfunction!(front_calendar, m)?)?;
    m.add_function(wrap_pyfunction!(season_for_date, m)?)?;
    m.add_function(wrap_pyfunction!(filter_seasonal, m)?)?;

    Ok(())
}
