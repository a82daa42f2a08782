//! Configuration management for the Vitrine services
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Redis configuration
    pub redis: RedisConfig,

    /// Outbound mail configuration
    pub mail: MailConfig,

    /// Geo-IP lookup configuration
    pub geo: GeoConfig,

    /// Staff authentication configuration
    pub auth: AuthConfig,

    /// Page-view tracking configuration
    pub tracking: TrackingConfig,

    /// Observability configuration
    pub observability: ObservabilityConfig,

    /// Rate limiting configuration
    pub rate_limit: RateLimitConfig,

    /// Site identity configuration
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Shutdown timeout in seconds
    #[serde(default = "default_shutdown_timeout")]
    pub shutdown_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Primary database URL (for writes)
    pub url: String,

    /// Read replica URL (optional, falls back to primary)
    pub read_url: Option<String>,

    /// Maximum number of connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Idle timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RedisConfig {
    /// Redis URL
    pub url: String,

    /// Key prefix for namespacing
    #[serde(default = "default_redis_prefix")]
    pub key_prefix: String,

    /// Default TTL in seconds
    #[serde(default = "default_redis_ttl")]
    pub default_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// HTTP mail API endpoint; when unset, notification mail is disabled
    pub api_url: Option<String>,

    /// API key for the mail provider
    pub api_key: Option<String>,

    /// Sender address
    #[serde(default = "default_mail_from")]
    pub from_address: String,

    /// Recipient of contact-form notifications
    #[serde(default = "default_mail_to")]
    pub notify_address: String,

    /// Request timeout in seconds
    #[serde(default = "default_mail_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeoConfig {
    /// Geo lookup provider: none, ipapi
    #[serde(default = "default_geo_provider")]
    pub provider: String,

    /// Base URL for HTTP providers
    pub api_base: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_geo_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT secret for staff token signing
    pub jwt_secret: Option<String>,

    /// JWT expiration in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration_secs: u64,

    /// Where non-staff requests to the statistics page are redirected
    #[serde(default = "default_login_url")]
    pub login_url: String,

    /// Cookie name carrying the staff token
    #[serde(default = "default_staff_cookie")]
    pub staff_cookie: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackingConfig {
    /// Enable page-view tracking
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Dedup window TTL in seconds
    #[serde(default = "default_dedup_ttl")]
    pub dedup_ttl_secs: u64,

    /// Extra bot signature patterns merged with the built-in list
    #[serde(default)]
    pub extra_bot_patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Metrics port (0 to disable)
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    /// Requests per second on the contact form
    #[serde(default = "default_rate_limit")]
    pub requests_per_second: u32,

    /// Burst capacity
    #[serde(default = "default_burst")]
    pub burst: u32,

    /// Enable rate limiting
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SiteConfig {
    /// Canonical site domain, used by robots.txt (e.g. https://www.example.com)
    #[serde(default = "default_site_domain")]
    pub domain: String,

    /// Public site name used in meta titles
    #[serde(default = "default_site_name")]
    pub name: String,
}

// Default value functions
fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8080 }
fn default_request_timeout() -> u64 { 30 }
fn default_shutdown_timeout() -> u64 { 30 }
fn default_max_connections() -> u32 { 50 }
fn default_min_connections() -> u32 { 5 }
fn default_connect_timeout() -> u64 { 10 }
fn default_idle_timeout() -> u64 { 300 }
fn default_redis_prefix() -> String { "vitrine".to_string() }
fn default_redis_ttl() -> u64 { 300 }
fn default_mail_from() -> String { "contact@example.com".to_string() }
fn default_mail_to() -> String { "contact@example.com".to_string() }
fn default_mail_timeout() -> u64 { 10 }
fn default_geo_provider() -> String { "none".to_string() }
fn default_geo_timeout() -> u64 { 3 }
fn default_jwt_expiration() -> u64 { 86400 }
fn default_login_url() -> String { "/admin/login/".to_string() }
fn default_staff_cookie() -> String { "staff_token".to_string() }
fn default_dedup_ttl() -> u64 { crate::DEDUP_WINDOW_SECS }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_metrics_port() -> u16 { 9090 }
fn default_service_name() -> String { "vitrine".to_string() }
fn default_rate_limit() -> u32 { 5 }
fn default_burst() -> u32 { 10 }
fn default_enabled() -> bool { true }
fn default_site_domain() -> String { "https://www.example.com".to_string() }
fn default_site_name() -> String { "Vitrine".to_string() }

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            api_key: None,
            from_address: default_mail_from(),
            notify_address: default_mail_to(),
            timeout_secs: default_mail_timeout(),
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            provider: default_geo_provider(),
            api_base: None,
            timeout_secs: default_geo_timeout(),
        }
    }
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            dedup_ttl_secs: default_dedup_ttl(),
            extra_bot_patterns: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?

            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__SERVER__PORT=8081
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout_secs)
    }

    /// Get the read database URL (falls back to primary)
    pub fn read_database_url(&self) -> &str {
        self.database.read_url.as_deref().unwrap_or(&self.database.url)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: default_host(),
                port: default_port(),
                request_timeout_secs: default_request_timeout(),
                shutdown_timeout_secs: default_shutdown_timeout(),
            },
            database: DatabaseConfig {
                url: "postgres://localhost/vitrine".to_string(),
                read_url: None,
                max_connections: default_max_connections(),
                min_connections: default_min_connections(),
                connect_timeout_secs: default_connect_timeout(),
                idle_timeout_secs: default_idle_timeout(),
            },
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                key_prefix: default_redis_prefix(),
                default_ttl_secs: default_redis_ttl(),
            },
            mail: MailConfig::default(),
            geo: GeoConfig::default(),
            auth: AuthConfig {
                jwt_secret: None,
                jwt_expiration_secs: default_jwt_expiration(),
                login_url: default_login_url(),
                staff_cookie: default_staff_cookie(),
            },
            tracking: TrackingConfig::default(),
            observability: ObservabilityConfig {
                log_level: default_log_level(),
                json_logging: default_json_logging(),
                metrics_port: default_metrics_port(),
                service_name: default_service_name(),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: default_rate_limit(),
                burst: default_burst(),
                enabled: default_enabled(),
            },
            site: SiteConfig {
                domain: default_site_domain(),
                name: default_site_name(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.tracking.dedup_ttl_secs, 60);
        assert_eq!(config.geo.provider, "none");
        assert_eq!(config.auth.login_url, "/admin/login/");
    }

    #[test]
    fn test_read_database_fallback() {
        let config = AppConfig::default();
        assert_eq!(config.read_database_url(), "postgres://localhost/vitrine");
    }

    #[test]
    fn test_mail_disabled_by_default() {
        let config = AppConfig::default();
        assert!(config.mail.api_url.is_none());
    }
}
