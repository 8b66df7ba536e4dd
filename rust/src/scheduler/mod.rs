//! Meal scheduler: builds a calendar day by day from scored candidates.
//!
//! `core` holds the generate / extend / regenerate operations, `refresh`
//! the roll-forward applied whenever a stored calendar is read.

mod core;
mod refresh;

pub use self::core::{assign_day, MealScheduler, SchedulerError};
pub use refresh::{RefreshAction, RefreshOutcome};
