//! IP geolocation providers
//!
//! Page-view rows carry country/city fields that stay empty unless a
//! provider is configured. Lookups are best-effort: a failed or slow
//! lookup must never delay or fail request handling, so callers absorb
//! errors and fall back to empty fields.

use crate::config::GeoConfig;
use crate::errors::{AppError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Resolved geolocation for an IP address
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeoInfo {
    pub country: String,
    pub country_code: String,
    pub city: String,
}

/// Geolocation provider interface
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Resolve an IP address. Returns None when the provider has no
    /// answer for this address.
    async fn lookup(&self, ip: &str) -> Result<Option<GeoInfo>>;
}

/// Provider that never resolves anything (the default)
pub struct NoopGeo;

#[async_trait]
impl GeoLookup for NoopGeo {
    async fn lookup(&self, _ip: &str) -> Result<Option<GeoInfo>> {
        Ok(None)
    }
}

/// Provider backed by the ip-api.com JSON endpoint
pub struct IpApiGeo {
    client: reqwest::Client,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    country: String,
    #[serde(default, rename = "countryCode")]
    country_code: String,
    #[serde(default)]
    city: String,
}

impl IpApiGeo {
    pub fn new(api_base: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration {
                message: format!("Failed to build geo HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl GeoLookup for IpApiGeo {
    async fn lookup(&self, ip: &str) -> Result<Option<GeoInfo>> {
        let url = format!("{}/{}", self.api_base, ip);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::GeoError {
                message: format!("Geo request failed: {}", e),
            })?;

        if !response.status().is_success() {
            return Err(AppError::GeoError {
                message: format!("Geo provider returned {}", response.status()),
            });
        }

        let body: IpApiResponse = response.json().await.map_err(|e| AppError::GeoError {
            message: format!("Invalid geo response: {}", e),
        })?;

        if body.status != "success" {
            debug!(ip = %ip, "Geo provider has no answer");
            return Ok(None);
        }

        Ok(Some(GeoInfo {
            country: body.country,
            country_code: body.country_code,
            city: body.city,
        }))
    }
}

/// Build the provider named in configuration. Unknown provider names
/// fall back to the no-op provider.
pub fn from_config(config: &GeoConfig) -> Result<Arc<dyn GeoLookup>> {
    match config.provider.as_str() {
        "ipapi" => {
            let api_base = config
                .api_base
                .as_deref()
                .unwrap_or("http://ip-api.com/json");
            Ok(Arc::new(IpApiGeo::new(api_base, config.timeout_secs)?))
        }
        "none" => Ok(Arc::new(NoopGeo)),
        other => {
            tracing::warn!(provider = %other, "Unknown geo provider, lookups disabled");
            Ok(Arc::new(NoopGeo))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_returns_none() {
        let geo = NoopGeo;
        let result = geo.lookup("203.0.113.7").await.unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_from_config_default_is_noop() {
        let config = GeoConfig::default();
        assert_eq!(config.provider, "none");
        assert!(from_config(&config).is_ok());
    }

    #[test]
    fn test_ip_api_response_parsing() {
        let json = r#"{"status":"success","country":"France","countryCode":"FR","city":"Paris"}"#;
        let parsed: IpApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "success");
        assert_eq!(parsed.country_code, "FR");
        assert_eq!(parsed.city, "Paris");
    }

    #[test]
    fn test_ip_api_failure_status() {
        let json = r#"{"status":"fail","message":"private range"}"#;
        let parsed: IpApiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, "fail");
        assert!(parsed.country.is_empty());
    }
}
