//! Calendar date arithmetic: horizon length, window trimming and padding.

use chrono::{Datelike, Days, Duration, NaiveDate};

use crate::config::CalendarConfig;
use crate::models::Assignment;
use crate::scheduler::SchedulerError;

/// Days from `today` to the last day of the horizon.
///
/// On a Sunday the horizon reaches `base_horizon_days` ahead; on any other
/// day it reaches the Sunday after that, so the horizon always ends on the
/// last day of the week after next.
pub fn days_to_horizon_end(today: NaiveDate, base_horizon_days: i64) -> i64 {
    let weekday = today.weekday().num_days_from_sunday() as i64;
    if weekday == 0 {
        base_horizon_days
    } else {
        base_horizon_days.saturating_add(7 - weekday)
    }
}

/// Last day of the horizon anchored at `today`.
///
/// Fails on a config with a negative base horizon, or when the end falls
/// past the last date chrono can represent.
pub fn horizon_end(
    today: NaiveDate,
    config: &CalendarConfig,
) -> Result<NaiveDate, SchedulerError> {
    config.validate()?;
    let days = days_to_horizon_end(today, config.base_horizon_days);
    today
        .checked_add_days(Days::new(days as u64))
        .ok_or_else(|| SchedulerError::InvalidDate(format!("{} + {} days", today, days)))
}

/// Every date from `today` through the horizon end, inclusive.
pub fn horizon_dates(
    today: NaiveDate,
    config: &CalendarConfig,
) -> Result<Vec<NaiveDate>, SchedulerError> {
    let end = horizon_end(today, config)?;
    let days = (end - today).num_days();
    Ok((0..=days).map(|i| today + Duration::days(i)).collect())
}

/// Keep the most recent `window` entries, dropping from the oldest end.
pub fn trim_window(mut assignments: Vec<Assignment>, window: usize) -> Vec<Assignment> {
    if assignments.len() > window {
        assignments.drain(..assignments.len() - window);
    }
    assignments
}

/// Pad a calendar at the front so it spans exactly `window` entries.
///
/// Padding days carry no meal and run consecutively up to the first real
/// entry. Calendars already at or above `window` are returned as is.
pub fn front_view(
    assignments: &[Assignment],
    window: usize,
) -> Result<Vec<Assignment>, SchedulerError> {
    let first = assignments.first().ok_or(SchedulerError::EmptyCalendar)?;
    let missing = window.saturating_sub(assignments.len());

    let mut view = Vec::with_capacity(assignments.len() + missing);
    for i in 0..missing {
        let offset = (missing - i) as i64;
        view.push(Assignment::placeholder(first.date - Duration::days(offset)));
    }
    view.extend_from_slice(assignments);
    Ok(view)
}

/// Parse a calendar date string.
pub fn parse_date(text: &str, format: &str) -> Result<NaiveDate, SchedulerError> {
    NaiveDate::parse_from_str(text, format)
        .map_err(|_| SchedulerError::InvalidDate(text.to_string()))
}

pub fn format_date(date: NaiveDate, format: &str) -> String {
    date.format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn entries(start: NaiveDate, count: usize) -> Vec<Assignment> {
        (0..count)
            .map(|i| Assignment {
                user_id: "u1".to_string(),
                date: start + Duration::days(i as i64),
                meal_id: format!("m{}", i),
                name: format!("Meal {}", i),
            })
            .collect()
    }

    #[test]
    fn test_days_to_horizon_end() {
        // 2025-01-05 is a Sunday
        assert_eq!(days_to_horizon_end(d(2025, 1, 5), 21), 21);
        assert_eq!(days_to_horizon_end(d(2025, 1, 6), 21), 27); // Monday
        assert_eq!(days_to_horizon_end(d(2025, 1, 7), 21), 26); // Tuesday
        assert_eq!(days_to_horizon_end(d(2025, 1, 11), 21), 22); // Saturday
    }

    #[test]
    fn test_horizon_always_ends_on_sunday() {
        let config = CalendarConfig::default();
        for offset in 0..14 {
            let today = d(2025, 1, 1) + Duration::days(offset);
            let end = horizon_end(today, &config).unwrap();
            assert_eq!(end.weekday(), chrono::Weekday::Sun, "today={}", today);
            assert!((end - today).num_days() >= 21);
        }
    }

    #[test]
    fn test_horizon_dates_inclusive() {
        let config = CalendarConfig::default();
        let dates = horizon_dates(d(2025, 1, 6), &config).unwrap();
        assert_eq!(dates.len(), 28);
        assert_eq!(dates[0], d(2025, 1, 6));
        assert_eq!(*dates.last().unwrap(), d(2025, 2, 2));

        let sunday = horizon_dates(d(2025, 1, 5), &config).unwrap();
        assert_eq!(sunday.len(), 22);
    }

    #[test]
    fn test_horizon_rejects_unusable_config() {
        let negative = CalendarConfig {
            base_horizon_days: -5,
            ..CalendarConfig::default()
        };
        assert!(matches!(
            horizon_dates(d(2025, 1, 5), &negative),
            Err(SchedulerError::InvalidConfig(_))
        ));

        let huge = CalendarConfig {
            base_horizon_days: i64::MAX,
            ..CalendarConfig::default()
        };
        assert!(matches!(
            horizon_end(d(2025, 1, 6), &huge),
            Err(SchedulerError::InvalidDate(_))
        ));
        // Past the last representable date, not just a large offset
        let far = CalendarConfig {
            base_horizon_days: 200_000_000,
            ..CalendarConfig::default()
        };
        assert!(matches!(
            horizon_dates(d(2025, 1, 5), &far),
            Err(SchedulerError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_trim_window_keeps_tail() {
        let calendar = entries(d(2025, 1, 1), 31);
        let trimmed = trim_window(calendar.clone(), 28);
        assert_eq!(trimmed.len(), 28);
        assert_eq!(trimmed[0], calendar[3]);
        assert_eq!(trimmed.last(), calendar.last());

        let short = trim_window(entries(d(2025, 1, 1), 5), 28);
        assert_eq!(short.len(), 5);
    }

    #[test]
    fn test_front_view_pads_consecutive_days() {
        let calendar = entries(d(2025, 1, 10), 25);
        let view = front_view(&calendar, 28).unwrap();
        assert_eq!(view.len(), 28);
        assert_eq!(view[0].date, d(2025, 1, 7));
        assert_eq!(view[2].date, d(2025, 1, 9));
        assert!(view[..3].iter().all(|e| e.is_placeholder()));
        assert_eq!(&view[3..], &calendar[..]);
    }

    #[test]
    fn test_front_view_full_and_empty() {
        let calendar = entries(d(2025, 1, 10), 28);
        assert_eq!(front_view(&calendar, 28).unwrap(), calendar);
        assert_eq!(front_view(&[], 28), Err(SchedulerError::EmptyCalendar));
    }

    #[test]
    fn test_parse_and_format() {
        assert_eq!(parse_date("2025/02/28", "%Y/%m/%d"), Ok(d(2025, 2, 28)));
        assert_eq!(
            parse_date("2025/02/30", "%Y/%m/%d"),
            Err(SchedulerError::InvalidDate("2025/02/30".to_string()))
        );
        assert_eq!(format_date(d(2025, 3, 1), "%Y/%m/%d"), "2025/03/01");
    }
}
