//! Seasonal filtering of candidate meals.

use chrono::{Datelike, NaiveDate};

use crate::models::Meal;

/// Quarter-of-year season, as tagged on catalog meals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
    /// Valid all year.
    General,
}

impl Season {
    /// Season of a date by calendar quarter (January to March is winter).
    pub fn for_date(date: NaiveDate) -> Self {
        match date.month() {
            1..=3 => Season::Winter,
            4..=6 => Season::Spring,
            7..=9 => Season::Summer,
            _ => Season::Autumn,
        }
    }

    /// Parse a catalog season label, accepting the catalog's Spanish labels.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "winter" | "invierno" => Some(Season::Winter),
            "spring" | "primavera" => Some(Season::Spring),
            "summer" | "verano" => Some(Season::Summer),
            "autumn" | "fall" | "otoño" | "otono" => Some(Season::Autumn),
            "general" => Some(Season::General),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
            Season::General => "general",
        }
    }
}

impl Meal {
    /// Whether the meal may be served in `season`.
    ///
    /// Untagged meals and meals tagged `general` are valid all year.
    /// Unrecognised labels are ignored.
    pub fn in_season(&self, season: Season) -> bool {
        if self.seasons.is_empty() {
            return true;
        }
        self.seasons
            .iter()
            .filter_map(|label| Season::from_label(label))
            .any(|s| s == Season::General || s == season)
    }
}

/// Candidates valid in the season of `date`, catalog order preserved.
pub fn seasonal_candidates(meals: &[Meal], date: NaiveDate) -> Vec<Meal> {
    let season = Season::for_date(date);
    meals
        .iter()
        .filter(|meal| meal.in_season(season))
        .cloned()
        .collect()
}
