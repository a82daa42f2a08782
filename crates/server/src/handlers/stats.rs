//! Staff statistics dashboard

use axum::{extract::State, Json};
use serde::Serialize;

use chrono::NaiveDate;

use crate::extract::StaffUser;
use crate::handlers::PageMeta;
use crate::AppState;
use vitrine_common::{
    db::{CountryCount, PathCount, Repository},
    errors::Result,
    stats::{
        day_bounds_utc, last_n_days, last_n_months, last_n_weeks, last_n_years,
        local_midnight_utc, local_today, month_bounds_utc, month_start, percent_change,
        week_bounds_utc, week_start, year_bounds_utc, year_start, SeriesPoint,
    },
};

#[derive(Serialize)]
pub struct Totals {
    pub total_views: u64,
    pub today: u64,
    pub last_7_days: u64,
    pub last_30_days: u64,
    pub last_365_days: u64,
}

/// Percent change of each trailing window against the preceding window
/// of the same length
#[derive(Serialize)]
pub struct Variations {
    pub today: f64,
    pub week: f64,
    pub month: f64,
}

#[derive(Serialize)]
pub struct StatisticsResponse {
    pub meta: PageMeta,
    pub totals: Totals,
    pub variations: Variations,
    pub daily: Vec<SeriesPoint>,
    pub weekly: Vec<SeriesPoint>,
    pub monthly: Vec<SeriesPoint>,
    pub yearly: Vec<SeriesPoint>,
    pub top_countries: Vec<CountryCount>,
    pub top_paths: Vec<PathCount>,
}

/// Statistics dashboard payload. Staff only; anonymous requests are
/// redirected to the login page by the extractor.
pub async fn statistics(
    StaffUser(claims): StaffUser,
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>> {
    let repo = Repository::new(state.db.clone());
    let today = local_today();
    let tomorrow = today + chrono::Days::new(1);

    let total_views = repo.total_page_views().await?;

    // Headline counts use trailing windows ending tonight; each is
    // compared against the preceding window of the same length
    let (start, end) = day_bounds_utc(today);
    let today_count = repo.count_views_between(start, end).await?;
    let (start, end) = day_bounds_utc(today - chrono::Days::new(1));
    let yesterday_count = repo.count_views_between(start, end).await?;

    let week_count = repo
        .count_views_between(
            local_midnight_utc(today - chrono::Days::new(6)),
            local_midnight_utc(tomorrow),
        )
        .await?;
    let prior_week_count = repo
        .count_views_between(
            local_midnight_utc(today - chrono::Days::new(13)),
            local_midnight_utc(today - chrono::Days::new(6)),
        )
        .await?;

    let month_count = repo
        .count_views_between(
            local_midnight_utc(today - chrono::Days::new(29)),
            local_midnight_utc(tomorrow),
        )
        .await?;
    let prior_month_count = repo
        .count_views_between(
            local_midnight_utc(today - chrono::Days::new(59)),
            local_midnight_utc(today - chrono::Days::new(29)),
        )
        .await?;

    let year_count = repo
        .count_views_between(
            local_midnight_utc(today - chrono::Days::new(364)),
            local_midnight_utc(tomorrow),
        )
        .await?;

    // Time series, oldest bucket first. Consecutive buckets share
    // boundaries, so each series is one grouped query
    let days = last_n_days(today, 30);
    let mut bounds: Vec<_> = days.iter().map(|d| local_midnight_utc(*d)).collect();
    bounds.push(day_bounds_utc(today).1);
    let daily = zip_series(&days, repo.views_per_bucket(&bounds).await?);

    let mondays = last_n_weeks(today, 12);
    let mut bounds: Vec<_> = mondays.iter().map(|m| local_midnight_utc(*m)).collect();
    bounds.push(week_bounds_utc(week_start(today)).1);
    let weekly = zip_series(&mondays, repo.views_per_bucket(&bounds).await?);

    let firsts = last_n_months(today, 12);
    let mut bounds: Vec<_> = firsts.iter().map(|f| local_midnight_utc(*f)).collect();
    bounds.push(month_bounds_utc(month_start(today)).1);
    let monthly = zip_series(&firsts, repo.views_per_bucket(&bounds).await?);

    let firsts = last_n_years(today, 5);
    let mut bounds: Vec<_> = firsts.iter().map(|f| local_midnight_utc(*f)).collect();
    bounds.push(year_bounds_utc(year_start(today)).1);
    let yearly = zip_series(&firsts, repo.views_per_bucket(&bounds).await?);

    let top_countries = repo.top_countries(20).await?;
    let top_paths = repo.top_paths(10).await?;

    tracing::debug!(staff = %claims.sub, "Statistics dashboard served");

    Ok(Json(StatisticsResponse {
        meta: PageMeta::new(
            &format!("Statistiques - {}", state.config.site.name),
            "Tableau de bord des visites du site.",
        ),
        totals: Totals {
            total_views,
            today: today_count,
            last_7_days: week_count,
            last_30_days: month_count,
            last_365_days: year_count,
        },
        variations: Variations {
            today: percent_change(yesterday_count, today_count),
            week: percent_change(prior_week_count, week_count),
            month: percent_change(prior_month_count, month_count),
        },
        daily,
        weekly,
        monthly,
        yearly,
        top_countries,
        top_paths,
    }))
}

/// Pair bucket start dates with their counts
fn zip_series(starts: &[NaiveDate], counts: Vec<u64>) -> Vec<SeriesPoint> {
    starts
        .iter()
        .zip(counts)
        .map(|(start, count)| SeriesPoint {
            start: *start,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zip_series_pairs_counts() {
        let days = last_n_days(NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(), 3);
        let series = zip_series(&days, vec![4, 0, 7]);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].start, days[0]);
        assert_eq!(series[1].count, 0);
        assert_eq!(series[2].count, 7);
    }
}
