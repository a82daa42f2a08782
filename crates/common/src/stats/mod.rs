//! Time-bucketed statistics helpers
//!
//! Bucket boundaries are calendar boundaries in the server's local
//! timezone, converted to UTC instants for querying. Counting happens
//! in SQL; everything here is pure date arithmetic so it can be tested
//! without a database.

use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One point of a time series, keyed by the bucket's start date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub start: NaiveDate,
    pub count: u64,
}

/// Percentage change between two counts, rounded to one decimal.
///
/// The degenerate cases follow the dashboard convention: a current
/// count of zero always reads 0 (a dead period shows no change, not
/// -100), and traffic appearing from a zero prior reads 100. Callers
/// displaying the figure rely on this discontinuity.
pub fn percent_change(prior: u64, current: u64) -> f64 {
    if current == 0 {
        return 0.0;
    }
    if prior == 0 {
        return 100.0;
    }
    let delta = current as f64 - prior as f64;
    (delta / prior as f64 * 1000.0).round() / 10.0
}

/// Today's date in the server's local timezone
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Midnight of a local calendar date as a UTC instant
pub fn local_midnight_utc(date: NaiveDate) -> chrono::DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Midnight skipped by a DST transition; fall back to UTC midnight
        None => Utc.from_utc_datetime(&naive),
    }
}

/// UTC bounds [start, end) of a local calendar day
pub fn day_bounds_utc(date: NaiveDate) -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    let next = date + Days::new(1);
    (local_midnight_utc(date), local_midnight_utc(next))
}

/// Monday of the week containing the given date
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.weekday().num_days_from_monday() as u64)
}

/// First day of the month containing the given date
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the year containing the given date
pub fn year_start(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date)
}

/// UTC bounds [start, end) of the local week starting at `monday`
pub fn week_bounds_utc(monday: NaiveDate) -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    (
        local_midnight_utc(monday),
        local_midnight_utc(monday + Days::new(7)),
    )
}

/// UTC bounds [start, end) of the local month starting at `first`
pub fn month_bounds_utc(first: NaiveDate) -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    (
        local_midnight_utc(first),
        local_midnight_utc(first + Months::new(1)),
    )
}

/// UTC bounds [start, end) of the local year starting at `first`
pub fn year_bounds_utc(first: NaiveDate) -> (chrono::DateTime<Utc>, chrono::DateTime<Utc>) {
    (
        local_midnight_utc(first),
        local_midnight_utc(first + Months::new(12)),
    )
}

/// The last `n` calendar days ending today, ascending
pub fn last_n_days(today: NaiveDate, n: u64) -> Vec<NaiveDate> {
    (0..n)
        .rev()
        .map(|offset| today - Days::new(offset))
        .collect()
}

/// Monday starts of the last `n` weeks ending with the current week,
/// ascending
pub fn last_n_weeks(today: NaiveDate, n: u64) -> Vec<NaiveDate> {
    let current = week_start(today);
    (0..n)
        .rev()
        .map(|offset| current - Days::new(offset * 7))
        .collect()
}

/// First days of the last `n` months ending with the current month,
/// ascending
pub fn last_n_months(today: NaiveDate, n: u32) -> Vec<NaiveDate> {
    let current = month_start(today);
    (0..n)
        .rev()
        .map(|offset| current - Months::new(offset))
        .collect()
}

/// First days of the last `n` years ending with the current year,
/// ascending
pub fn last_n_years(today: NaiveDate, n: u32) -> Vec<NaiveDate> {
    let current = year_start(today);
    (0..n)
        .rev()
        .map(|offset| current - Months::new(offset * 12))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_percent_change_both_zero() {
        assert_eq!(percent_change(0, 0), 0.0);
    }

    #[test]
    fn test_percent_change_from_zero() {
        assert_eq!(percent_change(0, 1), 100.0);
        assert_eq!(percent_change(0, 500), 100.0);
    }

    #[test]
    fn test_percent_change_zero_current() {
        // A dead period reads 0 on the dashboard, not -100
        assert_eq!(percent_change(5, 0), 0.0);
        assert_eq!(percent_change(200, 0), 0.0);
    }

    #[test]
    fn test_percent_change_exact() {
        assert_eq!(percent_change(100, 150), 50.0);
        assert_eq!(percent_change(200, 100), -50.0);
        assert_eq!(percent_change(100, 100), 0.0);
        assert_eq!(percent_change(3, 4), 33.3);
    }

    #[test]
    fn test_week_start_is_monday() {
        // 2026-08-29 is a Saturday
        assert_eq!(week_start(d(2026, 8, 29)), d(2026, 8, 24));
        // A Monday is its own week start
        assert_eq!(week_start(d(2026, 8, 24)), d(2026, 8, 24));
        // Sunday belongs to the preceding Monday
        assert_eq!(week_start(d(2026, 8, 30)), d(2026, 8, 24));
    }

    #[test]
    fn test_month_and_year_start() {
        assert_eq!(month_start(d(2026, 8, 29)), d(2026, 8, 1));
        assert_eq!(year_start(d(2026, 8, 29)), d(2026, 1, 1));
    }

    #[test]
    fn test_last_n_days_ascending() {
        let days = last_n_days(d(2026, 3, 2), 3);
        assert_eq!(days, vec![d(2026, 2, 28), d(2026, 3, 1), d(2026, 3, 2)]);
    }

    #[test]
    fn test_last_n_weeks_monday_aligned() {
        let weeks = last_n_weeks(d(2026, 8, 29), 3);
        assert_eq!(weeks, vec![d(2026, 8, 10), d(2026, 8, 17), d(2026, 8, 24)]);
        assert!(weeks
            .iter()
            .all(|w| w.weekday() == chrono::Weekday::Mon));
    }

    #[test]
    fn test_last_n_months_crosses_year() {
        let months = last_n_months(d(2026, 2, 15), 4);
        assert_eq!(
            months,
            vec![d(2025, 11, 1), d(2025, 12, 1), d(2026, 1, 1), d(2026, 2, 1)]
        );
    }

    #[test]
    fn test_last_n_years() {
        let years = last_n_years(d(2026, 8, 29), 5);
        assert_eq!(years.first(), Some(&d(2022, 1, 1)));
        assert_eq!(years.last(), Some(&d(2026, 1, 1)));
    }

    #[test]
    fn test_day_bounds_cover_24h_usually() {
        let (start, end) = day_bounds_utc(d(2026, 8, 15));
        let span = end - start;
        // DST transitions may shift this by an hour
        assert!(span >= chrono::Duration::hours(23));
        assert!(span <= chrono::Duration::hours(25));
    }

    #[test]
    fn test_month_bounds_cover_month() {
        let (start, end) = month_bounds_utc(d(2026, 2, 1));
        let span = end - start;
        assert!(span >= chrono::Duration::days(27));
        assert!(span <= chrono::Duration::days(29));
    }
}
