//! Page-view tracking middleware
//!
//! Logs one row per qualifying request. Persistence happens on a
//! spawned task so the response is never delayed, and every failure
//! in the pipeline (cache, geo, database) is absorbed: tracking must
//! not break page delivery.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::net::SocketAddr;
use vitrine_common::{
    cache::keys,
    db::{NewPageView, Repository},
    geo::GeoInfo,
    metrics::{record_cache, record_page_view, TrackingOutcome},
    tracking::{should_track_path, truncate_field},
};

use crate::AppState;

/// Resolved geo data changes rarely; one lookup per IP per day
const GEO_CACHE_TTL_SECS: u64 = 86_400;

/// Middleware entry point
pub async fn track_page_view(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.tracking.enabled {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();

    if !should_track_path(&path) {
        record_page_view(TrackingOutcome::Skipped, false);
        return next.run(request).await;
    }

    // AJAX calls are page fragments, not page views
    let is_ajax = request
        .headers()
        .get("x-requested-with")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("XMLHttpRequest"));
    if is_ajax {
        record_page_view(TrackingOutcome::Skipped, false);
        return next.run(request).await;
    }

    let user_agent = header_value(&request, "user-agent");

    // Bot traffic is classified and skipped outright
    if state.bots.is_bot(&user_agent) {
        record_page_view(TrackingOutcome::Skipped, true);
        return next.run(request).await;
    }

    let ip = client_ip(&request, addr);
    let referer = header_value(&request, "referer");

    // Persist off the request path
    tokio::spawn(record_view(state, path, ip, user_agent, referer));

    next.run(request).await
}

/// Client IP: first entry of X-Forwarded-For when present, otherwise
/// the peer address
fn client_ip(request: &Request, addr: SocketAddr) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}

fn header_value(request: &Request, name: &str) -> String {
    request
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// The persistence half of the middleware. Never propagates errors.
async fn record_view(
    state: AppState,
    path: String,
    ip: String,
    user_agent: String,
    referer: String,
) {
    // Dedup window: one row per (path, ip) per window. A cache failure
    // degrades to tracking without dedup rather than losing the view.
    let dedup_key = keys::page_view_dedup(&path, &ip);
    match state
        .cache
        .set_marker_nx(&dedup_key, state.config.tracking.dedup_ttl_secs)
        .await
    {
        Ok(true) => {}
        Ok(false) => {
            record_page_view(TrackingOutcome::Deduplicated, false);
            return;
        }
        Err(e) => {
            tracing::debug!(error = %e, "Dedup check failed, recording anyway");
        }
    }

    // Classification is recomputed here so the stored flag reflects
    // the same rules the filter applied
    let is_bot = state.bots.is_bot(&user_agent);

    // Geo lookup is best-effort
    let geo = lookup_geo(&state, &ip).await.unwrap_or_default();

    let repo = Repository::new(state.db.clone());
    let view = NewPageView {
        path: truncate_field(&path),
        ip_address: ip,
        country: geo.country,
        country_code: geo.country_code,
        city: geo.city,
        user_agent: truncate_field(&user_agent),
        referer: truncate_field(&referer),
        is_bot,
    };

    match repo.insert_page_view(view).await {
        Ok(_) => record_page_view(TrackingOutcome::Recorded, is_bot),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to record page view");
        }
    }
}

/// Geo resolution with a per-IP Redis cache in front of the provider.
/// Only positive answers are cached; every failure degrades to empty
/// geo fields.
async fn lookup_geo(state: &AppState, ip: &str) -> Option<GeoInfo> {
    let key = keys::geo(ip);
    if let Ok(Some(cached)) = state.cache.get::<GeoInfo>(&key).await {
        record_cache(true, "geo");
        return Some(cached);
    }
    record_cache(false, "geo");

    match state.geo.lookup(ip).await {
        Ok(Some(info)) => {
            if let Err(e) = state.cache.set_with_ttl(&key, &info, GEO_CACHE_TTL_SECS).await {
                tracing::debug!(error = %e, "Failed to cache geo result");
            }
            Some(info)
        }
        Ok(None) => None,
        Err(e) => {
            tracing::debug!(error = %e, ip = %ip, "Geo lookup failed");
            None
        }
    }
}
