//! Request metrics middleware

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use vitrine_common::metrics::RequestMetrics;

/// Records a request counter increment and a latency sample per
/// request. Labelled by the matched route pattern, not the raw path,
/// to keep label cardinality bounded.
pub async fn record_request(request: Request, next: Next) -> Response {
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let recorder = RequestMetrics::start(request.method().as_str(), &endpoint);

    let response = next.run(request).await;
    recorder.finish(response.status().as_u16());
    response
}
