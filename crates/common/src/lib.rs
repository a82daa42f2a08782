//! Vitrine Common Library
//!
//! Shared code for the Vitrine services including:
//! - Database models and repository patterns
//! - Error types and handling
//! - Configuration management
//! - Page-view tracking rules (bot detection, dedup keys)
//! - Geo-IP lookup abstraction
//! - Outbound mail client
//! - Statistics bucketing and variation math
//! - Staff authentication utilities
//! - Metrics and observability

pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod errors;
pub mod geo;
pub mod mail;
pub mod metrics;
pub mod slug;
pub mod stats;
pub mod tracking;

// Re-export commonly used types
pub use config::AppConfig;
pub use db::Repository;
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum stored length for page-view path/user-agent/referer fields
pub const TRACKED_FIELD_MAX_LEN: usize = 500;

/// TTL of the page-view dedup window, in seconds
pub const DEDUP_WINDOW_SECS: u64 = 60;
