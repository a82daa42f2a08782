//! Redis cache integration
//!
//! Provides:
//! - Connection management
//! - Generic get/set operations with TTL (page payloads, geo results)
//! - Page-view dedup markers

use crate::config::RedisConfig;
use crate::errors::{AppError, Result};
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::debug;

/// Redis cache client
pub struct Cache {
    connection: RwLock<MultiplexedConnection>,
    config: RedisConfig,
}

impl Cache {
    /// Create a new cache client
    pub async fn new(config: RedisConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str()).map_err(|e| AppError::CacheError {
            message: format!("Failed to create Redis client: {}", e),
        })?;

        let connection = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::CacheError {
                message: format!("Failed to connect to Redis: {}", e),
            })?;

        Ok(Self {
            connection: RwLock::new(connection),
            config,
        })
    }

    /// Build a prefixed key
    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.config.key_prefix, key)
    }

    /// Get a value from cache
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let full_key = self.key(key);
        let mut conn = self.connection.write().await;

        let value: Option<String> =
            conn.get(&full_key)
                .await
                .map_err(|e| AppError::CacheError {
                    message: format!("Failed to get key '{}': {}", full_key, e),
                })?;

        match value {
            Some(json) => {
                let parsed = serde_json::from_str(&json).map_err(|e| AppError::CacheError {
                    message: format!("Failed to parse cached value: {}", e),
                })?;
                debug!(key = %full_key, "Cache hit");
                Ok(Some(parsed))
            }
            None => {
                debug!(key = %full_key, "Cache miss");
                Ok(None)
            }
        }
    }

    /// Set a value in cache with a TTL
    pub async fn set_with_ttl<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl_secs: u64,
    ) -> Result<()> {
        let full_key = self.key(key);
        let json = serde_json::to_string(value).map_err(|e| AppError::CacheError {
            message: format!("Failed to serialize value: {}", e),
        })?;

        let mut conn = self.connection.write().await;
        let _: () = conn
            .set_ex(&full_key, &json, ttl_secs)
            .await
            .map_err(|e| AppError::CacheError {
                message: format!("Failed to set key '{}': {}", full_key, e),
            })?;

        debug!(key = %full_key, ttl_secs, "Cache set");
        Ok(())
    }

    /// Set a marker key only if it does not already exist (SET NX EX).
    /// Returns true when the marker was created, false when the key was
    /// already present.
    pub async fn set_marker_nx(&self, key: &str, ttl_secs: u64) -> Result<bool> {
        let full_key = self.key(key);
        let mut conn = self.connection.write().await;

        let created: bool = redis::cmd("SET")
            .arg(&full_key)
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(ttl_secs)
            .query_async::<Option<String>>(&mut *conn)
            .await
            .map_err(|e| AppError::CacheError {
                message: format!("Failed to set marker '{}': {}", full_key, e),
            })?
            .is_some();

        debug!(key = %full_key, created, ttl_secs, "Cache marker");
        Ok(created)
    }

    /// Ping Redis to check connectivity
    pub async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.write().await;
        redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
            .map_err(|e| AppError::CacheError {
                message: format!("Redis ping failed: {}", e),
            })?;
        Ok(())
    }
}

/// Cache key builder helpers
pub mod keys {
    /// Build a page-view dedup marker key. One marker per (path, ip)
    /// pair suppresses duplicate rows for the dedup window.
    pub fn page_view_dedup(path: &str, ip: &str) -> String {
        format!("pageview:{}:{}", path, ip)
    }

    /// Build a cache key for the rendered home page payload
    pub fn home_payload() -> String {
        "payload:home".to_string()
    }

    /// Build a cache key for a service detail payload
    pub fn service_payload(slug: &str) -> String {
        format!("payload:service:{}", slug)
    }

    /// Build a geo lookup cache key
    pub fn geo(ip: &str) -> String {
        format!("geo:{}", ip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_builders() {
        assert_eq!(
            keys::page_view_dedup("/services/", "203.0.113.7"),
            "pageview:/services/:203.0.113.7"
        );
        assert_eq!(keys::home_payload(), "payload:home");
        assert!(keys::service_payload("creation-de-site-vitrine").contains("payload:service:"));
        assert!(keys::geo("198.51.100.1").starts_with("geo:"));
    }
}
