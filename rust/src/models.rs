//! Core data types for the meal calendar.

use chrono::NaiveDate;
use pyo3::prelude::*;

use crate::horizon::parse_date;
use crate::scheduler::SchedulerError;

/// Placeholder name for padded days that carry no meal.
pub const NO_MEAL: &str = "NO MEAL";

/// How often a meal is meant to appear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum MealType {
    /// No type-based adjustment.
    #[default]
    Standard,
    /// Spaced at least a week apart.
    Weekly,
    /// Skewed toward weekends.
    Occasional,
}

impl MealType {
    /// Parse a catalog type label, case-insensitively.
    ///
    /// Accepts the catalog's legacy labels (`normal`, `semanal`, `ocasional`).
    /// Anything unrecognised is treated as standard.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "weekly" | "semanal" => MealType::Weekly,
            "occasional" | "ocasional" => MealType::Occasional,
            _ => MealType::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Standard => "standard",
            MealType::Weekly => "weekly",
            MealType::Occasional => "occasional",
        }
    }
}

/// A candidate meal supplied by the meal catalog.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct Meal {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    pub name: String,
    pub meal_type: MealType,
    /// Season labels the meal is valid in (empty = all year)
    #[pyo3(get, set)]
    pub seasons: Vec<String>,
}

impl Meal {
    pub fn new(id: impl Into<String>, name: impl Into<String>, meal_type: MealType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            meal_type,
            seasons: Vec::new(),
        }
    }

    pub fn with_seasons(mut self, seasons: &[&str]) -> Self {
        self.seasons = seasons.iter().map(|s| s.to_string()).collect();
        self
    }
}

#[pymethods]
impl Meal {
    #[new]
    #[pyo3(signature = (id, name, meal_type="standard", seasons=None))]
    fn py_new(id: String, name: String, meal_type: &str, seasons: Option<Vec<String>>) -> Self {
        Self {
            id,
            name,
            meal_type: MealType::from_label(meal_type),
            seasons: seasons.unwrap_or_default(),
        }
    }

    #[getter(meal_type)]
    fn get_meal_type(&self) -> &'static str {
        self.meal_type.as_str()
    }

    #[setter(meal_type)]
    fn set_meal_type(&mut self, label: &str) {
        self.meal_type = MealType::from_label(label);
    }

    fn __repr__(&self) -> String {
        format!(
            "Meal(id={:?}, name={:?}, meal_type={:?})",
            self.id,
            self.name,
            self.meal_type.as_str()
        )
    }
}

/// One calendar entry: the meal a user eats on a given day.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    #[pyo3(get, set)]
    pub user_id: String,
    #[pyo3(get, set)]
    pub date: NaiveDate,
    #[pyo3(get, set)]
    pub meal_id: String,
    #[pyo3(get, set)]
    pub name: String,
}

impl Assignment {
    pub fn for_meal(user_id: &str, date: NaiveDate, meal: &Meal) -> Self {
        Self {
            user_id: user_id.to_string(),
            date,
            meal_id: meal.id.clone(),
            name: meal.name.clone(),
        }
    }

    /// A padding entry with no meal behind it.
    pub fn placeholder(date: NaiveDate) -> Self {
        Self {
            user_id: String::new(),
            date,
            meal_id: String::new(),
            name: NO_MEAL.to_string(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.meal_id.is_empty()
    }
}

#[pymethods]
impl Assignment {
    #[new]
    fn py_new(user_id: String, date: NaiveDate, meal_id: String, name: String) -> Self {
        Self {
            user_id,
            date,
            meal_id,
            name,
        }
    }

    /// Date rendered in the given chrono format.
    #[pyo3(signature = (format="%Y/%m/%d"))]
    fn date_string(&self, format: &str) -> String {
        self.date.format(format).to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "Assignment(date={}, meal_id={:?}, name={:?})",
            self.date, self.meal_id, self.name
        )
    }
}

/// An inclusive range of calendar days to regenerate, as date strings.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateRange {
    // `from` is a Python keyword
    #[pyo3(get, set, name = "from_date")]
    pub from: String,
    #[pyo3(get, set, name = "to_date")]
    pub to: String,
}

impl UpdateRange {
    /// Parse both endpoints with the calendar date format.
    pub fn resolve(&self, format: &str) -> Result<(NaiveDate, NaiveDate), SchedulerError> {
        Ok((parse_date(&self.from, format)?, parse_date(&self.to, format)?))
    }
}

#[pymethods]
impl UpdateRange {
    #[new]
    pub fn new(from_date: String, to_date: String) -> Self {
        Self {
            from: from_date,
            to: to_date,
        }
    }

    fn __repr__(&self) -> String {
        format!("UpdateRange(from={:?}, to={:?})", self.from, self.to)
    }
}
