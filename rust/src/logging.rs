//! Verbosity-gated diagnostics for the meal scheduler.
//!
//! Nothing is printed at the default verbosity (0), so the scheduling core
//! stays silent unless a caller opts in. Levels:
//! - 0: SILENT
//! - 1: CHANGES (one line per day assigned, refresh decisions)
//! - 2: CHECKS (per-candidate score breakdowns)
//! - 3: DEBUG (horizon arithmetic, extension anchors, refresh gaps)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
///
/// One line per assigned day, plus refresh decisions (extend or regenerate).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Per-candidate score breakdowns (base, recency, weekday, weekly spacing).
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
///
/// Horizon arithmetic: days generated, extension anchors and dropped
/// entries, refresh gaps, empty regeneration ranges.
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}
