//! Metrics and observability utilities
//!
//! Provides Prometheus metrics with standardized naming conventions
//! for the site's traffic, tracking and contact pipelines.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use std::time::Instant;

/// Metrics prefix for all Vitrine metrics
pub const METRICS_PREFIX: &str = "vitrine";

/// Histogram buckets for request latency (in seconds)
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001, // 1ms
    0.005, // 5ms
    0.010, // 10ms
    0.025, // 25ms
    0.050, // 50ms
    0.100, // 100ms
    0.250, // 250ms
    0.500, // 500ms
    1.000, // 1s
    2.500, // 2.5s
    5.000, // 5s
];

/// Register all metric descriptions
pub fn register_metrics() {
    // Request metrics
    describe_counter!(
        format!("{}_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total number of HTTP requests"
    );

    describe_histogram!(
        format!("{}_request_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "HTTP request latency in seconds"
    );

    // Tracking metrics
    describe_counter!(
        format!("{}_page_views_recorded_total", METRICS_PREFIX),
        Unit::Count,
        "Page views persisted to the log"
    );

    describe_counter!(
        format!("{}_page_views_deduplicated_total", METRICS_PREFIX),
        Unit::Count,
        "Page views suppressed by the dedup window"
    );

    describe_counter!(
        format!("{}_page_views_skipped_total", METRICS_PREFIX),
        Unit::Count,
        "Requests excluded from tracking"
    );

    // Contact metrics
    describe_counter!(
        format!("{}_contact_messages_total", METRICS_PREFIX),
        Unit::Count,
        "Contact messages accepted"
    );

    describe_counter!(
        format!("{}_contact_mail_sent_total", METRICS_PREFIX),
        Unit::Count,
        "Contact notification mails delivered"
    );

    describe_counter!(
        format!("{}_contact_mail_failed_total", METRICS_PREFIX),
        Unit::Count,
        "Contact notification mails that failed to send"
    );

    // Cache metrics
    describe_counter!(
        format!("{}_cache_hits_total", METRICS_PREFIX),
        Unit::Count,
        "Total cache hits"
    );

    describe_counter!(
        format!("{}_cache_misses_total", METRICS_PREFIX),
        Unit::Count,
        "Total cache misses"
    );

    tracing::info!("Metrics registered");
}

/// Helper to record request metrics
pub struct RequestMetrics {
    start: Instant,
    endpoint: String,
    method: String,
}

impl RequestMetrics {
    /// Start tracking a request
    pub fn start(method: &str, endpoint: &str) -> Self {
        Self {
            start: Instant::now(),
            endpoint: endpoint.to_string(),
            method: method.to_string(),
        }
    }

    /// Record request completion
    pub fn finish(self, status: u16) {
        let duration = self.start.elapsed().as_secs_f64();

        counter!(
            format!("{}_requests_total", METRICS_PREFIX),
            "method" => self.method.clone(),
            "endpoint" => self.endpoint.clone(),
            "status" => status.to_string()
        )
        .increment(1);

        histogram!(
            format!("{}_request_duration_seconds", METRICS_PREFIX),
            "method" => self.method,
            "endpoint" => self.endpoint
        )
        .record(duration);
    }
}

/// Outcome of processing one request through the tracking middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingOutcome {
    Recorded,
    Deduplicated,
    Skipped,
}

/// Helper to record a tracking outcome
pub fn record_page_view(outcome: TrackingOutcome, is_bot: bool) {
    let kind = if is_bot { "bot" } else { "human" };
    let name = match outcome {
        TrackingOutcome::Recorded => format!("{}_page_views_recorded_total", METRICS_PREFIX),
        TrackingOutcome::Deduplicated => {
            format!("{}_page_views_deduplicated_total", METRICS_PREFIX)
        }
        TrackingOutcome::Skipped => format!("{}_page_views_skipped_total", METRICS_PREFIX),
    };
    counter!(name, "kind" => kind.to_string()).increment(1);
}

/// Helper to record a contact-form acceptance
pub fn record_contact_message() {
    counter!(format!("{}_contact_messages_total", METRICS_PREFIX)).increment(1);
}

/// Helper to record contact notification mail outcomes
pub fn record_contact_mail(success: bool) {
    if success {
        counter!(format!("{}_contact_mail_sent_total", METRICS_PREFIX)).increment(1);
    } else {
        counter!(format!("{}_contact_mail_failed_total", METRICS_PREFIX)).increment(1);
    }
}

/// Helper to record cache metrics
pub fn record_cache(hit: bool, cache_name: &str) {
    if hit {
        counter!(
            format!("{}_cache_hits_total", METRICS_PREFIX),
            "cache" => cache_name.to_string()
        )
        .increment(1);
    } else {
        counter!(
            format!("{}_cache_misses_total", METRICS_PREFIX),
            "cache" => cache_name.to_string()
        )
        .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latency_buckets_sorted() {
        let mut prev = 0.0;
        for &bucket in LATENCY_BUCKETS {
            assert!(bucket > prev);
            prev = bucket;
        }
    }

    #[test]
    fn test_request_metrics() {
        let metrics = RequestMetrics::start("GET", "/services/");
        std::thread::sleep(std::time::Duration::from_millis(10));
        metrics.finish(200);
        // Just verify it runs without panic
    }

    #[test]
    fn test_record_page_view_outcomes() {
        record_page_view(TrackingOutcome::Recorded, false);
        record_page_view(TrackingOutcome::Deduplicated, false);
        record_page_view(TrackingOutcome::Skipped, true);
    }
}
