//! Authentication utilities for the staff-only area
//!
//! Provides:
//! - Staff JWT generation and validation
//! - Token extraction from the Authorization header or a cookie
//!
//! Anonymous visitors never authenticate; only the statistics
//! dashboard and other staff surfaces require a token.

use crate::errors::{AppError, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (staff account identifier)
    pub sub: String,

    /// Staff flag; only staff tokens pass the dashboard check
    #[serde(default)]
    pub staff: bool,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// JWT token manager
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager with the given secret
    pub fn new(secret: &str, expiration_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_secs: expiration_secs as i64,
        }
    }

    /// Generate a staff token for the given subject
    pub fn generate_staff_token(&self, subject: &str) -> Result<String> {
        self.generate_token(subject, self.expiration_secs)
    }

    /// Generate a staff token with an explicit lifetime
    pub fn generate_token(&self, subject: &str, ttl_secs: i64) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(ttl_secs);

        let claims = JwtClaims {
            sub: subject.to_string(),
            staff: true,
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| AppError::Internal {
            message: format!("Failed to generate token: {}", e),
        })
    }

    /// Validate and decode a JWT token
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims> {
        decode::<JwtClaims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::ExpiredToken,
                _ => AppError::InvalidToken,
            })
    }

    /// Validate a token and require the staff claim
    pub fn validate_staff_token(&self, token: &str) -> Result<JwtClaims> {
        let claims = self.validate_token(token)?;
        if !claims.staff {
            return Err(AppError::StaffOnly);
        }
        Ok(claims)
    }
}

/// Extract a bearer token from an Authorization header value
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header.strip_prefix("Bearer ")
}

/// Extract a named cookie from a Cookie header value
pub fn extract_cookie<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(value)
        } else {
            None
        }
    })
}

/// Generate a random secret suitable for signing staff tokens
pub fn generate_secret() -> String {
    let random_bytes: [u8; 32] = rand::random();
    hex::encode(random_bytes)
}

/// Short stable fingerprint of a token, safe to log
pub fn token_fingerprint(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test_secret", 3600);

        let token = manager.generate_staff_token("admin").unwrap();
        let claims = manager.validate_staff_token(&token).unwrap();

        assert_eq!(claims.sub, "admin");
        assert!(claims.staff);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = JwtManager::new("secret_a", 3600);
        let other = JwtManager::new("secret_b", 3600);

        let token = manager.generate_staff_token("admin").unwrap();
        assert!(matches!(
            other.validate_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("abc.def.ghi"), None);
        assert_eq!(extract_bearer_token("Basic abc"), None);
    }

    #[test]
    fn test_extract_cookie() {
        let header = "sessionid=xyz; staff_token=abc.def.ghi; theme=dark";
        assert_eq!(extract_cookie(header, "staff_token"), Some("abc.def.ghi"));
        assert_eq!(extract_cookie(header, "theme"), Some("dark"));
        assert_eq!(extract_cookie(header, "missing"), None);
    }

    #[test]
    fn test_generate_secret() {
        let secret = generate_secret();
        assert_eq!(secret.len(), 64);
        assert_ne!(secret, generate_secret());
    }

    #[test]
    fn test_token_fingerprint_stable() {
        let fp1 = token_fingerprint("abc.def.ghi");
        let fp2 = token_fingerprint("abc.def.ghi");
        assert_eq!(fp1, fp2);
        assert_eq!(fp1.len(), 12);
    }
}
