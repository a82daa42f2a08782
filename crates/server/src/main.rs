//! Vitrine web server
//!
//! The public face of the agency site. Handles:
//! - Public page payloads (home, services, agency, blog, legal)
//! - Contact form intake with notification mail
//! - Page-view tracking with bot filtering and dedup
//! - Staff-only statistics dashboard
//! - Observability (logging, metrics, tracing)

mod extract;
mod handlers;
mod middleware;

use axum::{
    middleware as axum_middleware,
    routing::get,
    Router,
};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::EnvFilter;
use vitrine_common::{
    auth::JwtManager,
    cache::Cache,
    config::AppConfig,
    db::DbPool,
    geo::{self, GeoLookup},
    mail::Mailer,
    metrics,
    tracking::BotDetector,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub cache: Arc<Cache>,
    pub bots: Arc<BotDetector>,
    pub geo: Arc<dyn GeoLookup>,
    pub mailer: Arc<Mailer>,
    pub jwt: Option<Arc<JwtManager>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.observability.log_level.clone()));
    if config.observability.json_logging {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }

    info!("Starting Vitrine server v{}", vitrine_common::VERSION);

    let config = Arc::new(config);

    // Initialize metrics
    metrics::register_metrics();
    if config.observability.metrics_port > 0 {
        PrometheusBuilder::new()
            .with_http_listener(SocketAddr::from((
                [0, 0, 0, 0],
                config.observability.metrics_port,
            )))
            .set_buckets_for_metric(
                Matcher::Suffix("duration_seconds".to_string()),
                metrics::LATENCY_BUCKETS,
            )?
            .install()?;
        info!(port = config.observability.metrics_port, "Metrics exporter started");
    }

    // Initialize database connection
    info!("Connecting to database...");
    let db = DbPool::new(&config.database).await?;

    // Initialize Redis
    info!("Connecting to Redis...");
    let cache = Arc::new(Cache::new(config.redis.clone()).await?);

    // Tracking, geo and mail
    let bots = Arc::new(BotDetector::new(&config.tracking));
    let geo = geo::from_config(&config.geo)?;
    let mailer = Arc::new(Mailer::new(config.mail.clone())?);
    if !mailer.is_enabled() {
        info!("Outbound mail is not configured, notifications disabled");
    }

    // Staff tokens
    let jwt = config
        .auth
        .jwt_secret
        .as_deref()
        .map(|secret| Arc::new(JwtManager::new(secret, config.auth.jwt_expiration_secs)));
    if jwt.is_none() {
        info!("No JWT secret configured, staff area disabled");
    }

    // Create app state
    let state = AppState {
        config: config.clone(),
        db,
        cache,
        bots,
        geo,
        mailer,
        jwt,
    };

    // Build the router
    let app = create_router(state);

    // Start the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Create the main application router
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // Contact form rate limiting
    let mut contact_routes = Router::new().route(
        "/contact/",
        get(handlers::contact::contact_page).post(handlers::contact::submit_contact),
    );
    if state.config.rate_limit.enabled {
        let limiter = middleware::rate_limit::create_rate_limiter(
            state.config.rate_limit.requests_per_second,
            state.config.rate_limit.burst,
        );
        contact_routes = contact_routes.layer(axum_middleware::from_fn(
            move |request: axum::extract::Request, next: axum_middleware::Next| {
                let limiter = limiter.clone();
                async move {
                    middleware::rate_limit::rate_limit_middleware(request, next, limiter).await
                }
            },
        ));
    }

    Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Main pages
        .route("/", get(handlers::home::home))
        .route("/services/", get(handlers::services::services_list))
        .route("/services/{slug}/", get(handlers::services::service_detail))
        .route("/agence/", get(handlers::agency::about))
        .route("/agence/equipe/", get(handlers::agency::team))
        .merge(contact_routes)
        // Blog
        .route("/blog/", get(handlers::blog::blog_list))
        .route("/blog/{slug}/", get(handlers::blog::blog_detail))
        .route("/blog/categorie/{slug}/", get(handlers::blog::blog_category))
        .route("/blog/tag/{slug}/", get(handlers::blog::blog_tag))
        // Local SEO pages
        .route("/seo-ouagadougou/", get(handlers::pages::seo_ouagadougou))
        .route("/seo-bobo-dioulasso/", get(handlers::pages::seo_bobo))
        // Legal pages
        .route("/mentions-legales/", get(handlers::pages::legal))
        .route(
            "/politique-de-confidentialite/",
            get(handlers::pages::privacy),
        )
        // Statistics (staff only)
        .route("/statistiques/", get(handlers::stats::statistics))
        // Robots.txt
        .route("/robots.txt", get(handlers::pages::robots_txt))
        // Page-view tracking runs for every route; it excludes admin,
        // static and infrastructure paths itself
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::track::track_page_view,
        ))
        .layer(axum_middleware::from_fn(middleware::metrics::record_request))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, starting shutdown..."),
        _ = terminate => info!("Received SIGTERM, starting shutdown..."),
    }
}
