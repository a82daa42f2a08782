//! Page-view tracking rules
//!
//! Classification logic shared by the tracking middleware:
//! - Bot detection from the User-Agent string
//! - Path exclusions for admin, static and infrastructure routes
//! - Field truncation for log rows

use crate::config::TrackingConfig;
use crate::TRACKED_FIELD_MAX_LEN;
use regex_lite::Regex;
use tracing::warn;

/// User-Agent fragments that mark a request as automated traffic.
/// Matching is case-insensitive.
const BOT_PATTERNS: &[&str] = &[
    "bot",
    "crawler",
    "spider",
    "scraper",
    "facebookexternalhit",
    "twitterbot",
    "linkedinbot",
    "whatsapp",
    "telegram",
    "skype",
    "googlebot",
    "bingbot",
    "yandex",
    "baiduspider",
    "duckduckbot",
];

/// Path prefixes that are never tracked
const IGNORE_PREFIXES: &[&str] = &[
    "/admin/",
    "/static/",
    "/media/",
    "/favicon.ico",
    "/robots.txt",
];

/// Compiled bot detector
pub struct BotDetector {
    patterns: Vec<Regex>,
}

impl BotDetector {
    /// Build a detector from the built-in patterns plus any extras
    /// from configuration. Invalid extra patterns are skipped with a
    /// warning rather than failing startup.
    pub fn new(config: &TrackingConfig) -> Self {
        let mut patterns = Vec::with_capacity(BOT_PATTERNS.len() + config.extra_bot_patterns.len());

        for pattern in BOT_PATTERNS {
            // Built-in patterns are plain fragments and always compile
            if let Ok(re) = Regex::new(&format!("(?i){}", regex_escape(pattern))) {
                patterns.push(re);
            }
        }

        for pattern in &config.extra_bot_patterns {
            match Regex::new(&format!("(?i){}", pattern)) {
                Ok(re) => patterns.push(re),
                Err(e) => warn!(pattern = %pattern, error = %e, "Skipping invalid bot pattern"),
            }
        }

        Self { patterns }
    }

    /// Classify a User-Agent string. An empty User-Agent is not treated
    /// as a bot.
    pub fn is_bot(&self, user_agent: &str) -> bool {
        if user_agent.trim().is_empty() {
            return false;
        }
        self.patterns.iter().any(|re| re.is_match(user_agent))
    }
}

impl Default for BotDetector {
    fn default() -> Self {
        Self::new(&TrackingConfig::default())
    }
}

/// Whether a request path is eligible for tracking
pub fn should_track_path(path: &str) -> bool {
    !IGNORE_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Truncate a logged field to the storage limit, respecting char
/// boundaries.
pub fn truncate_field(value: &str) -> String {
    if value.chars().count() <= TRACKED_FIELD_MAX_LEN {
        return value.to_string();
    }
    value.chars().take(TRACKED_FIELD_MAX_LEN).collect()
}

fn regex_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if "\\.+*?()|[]{}^$".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_googlebot_detected() {
        let detector = BotDetector::default();
        assert!(detector.is_bot(
            "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)"
        ));
    }

    #[test]
    fn test_regular_browser_not_bot() {
        let detector = BotDetector::default();
        assert!(!detector.is_bot(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
        ));
    }

    #[test]
    fn test_empty_user_agent_is_not_bot() {
        let detector = BotDetector::default();
        assert!(!detector.is_bot(""));
        assert!(!detector.is_bot("   "));
    }

    #[test]
    fn test_case_insensitive_matching() {
        let detector = BotDetector::default();
        assert!(detector.is_bot("FACEBOOKEXTERNALHIT/1.1"));
        assert!(detector.is_bot("YandexBot/3.0"));
    }

    #[test]
    fn test_extra_patterns_from_config() {
        let config = TrackingConfig {
            extra_bot_patterns: vec!["moncrawlerperso".to_string()],
            ..Default::default()
        };
        let detector = BotDetector::new(&config);
        assert!(detector.is_bot("MonCrawlerPerso/0.1"));
    }

    #[test]
    fn test_invalid_extra_pattern_skipped() {
        let config = TrackingConfig {
            extra_bot_patterns: vec!["(((".to_string()],
            ..Default::default()
        };
        let detector = BotDetector::new(&config);
        assert!(!detector.is_bot("Mozilla/5.0 ordinary browser"));
    }

    #[test]
    fn test_ignored_paths() {
        assert!(!should_track_path("/admin/"));
        assert!(!should_track_path("/admin/core/article/"));
        assert!(!should_track_path("/static/css/main.css"));
        assert!(!should_track_path("/media/uploads/logo.png"));
        assert!(!should_track_path("/favicon.ico"));
        assert!(!should_track_path("/robots.txt"));
    }

    #[test]
    fn test_tracked_paths() {
        assert!(should_track_path("/"));
        assert!(should_track_path("/services/"));
        assert!(should_track_path("/blog/mon-article/"));
        assert!(should_track_path("/statistiques/"));
    }

    #[test]
    fn test_truncate_field() {
        let short = "/services/";
        assert_eq!(truncate_field(short), short);

        let long = "x".repeat(900);
        assert_eq!(truncate_field(&long).chars().count(), 500);
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let accented = "é".repeat(600);
        let truncated = truncate_field(&accented);
        assert_eq!(truncated.chars().count(), 500);
        assert!(truncated.chars().all(|c| c == 'é'));
    }
}
