//! Custom extractors

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use vitrine_common::auth::{extract_bearer_token, extract_cookie, token_fingerprint, JwtClaims};

use crate::AppState;

/// Extractor that requires a valid staff token.
///
/// The token is read from the Authorization header (Bearer) or from
/// the configured staff cookie. Requests without a valid staff token
/// are redirected to the login page rather than answered with an
/// error body, matching how the admin area behaves.
pub struct StaffUser(pub JwtClaims);

impl FromRequestParts<AppState> for StaffUser {
    type Rejection = Redirect;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let redirect = Redirect::to(&state.config.auth.login_url);

        let Some(jwt) = state.jwt.as_ref() else {
            return Err(redirect);
        };

        let bearer = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(extract_bearer_token);

        let cookie = parts
            .headers
            .get("cookie")
            .and_then(|v| v.to_str().ok())
            .and_then(|header| extract_cookie(header, &state.config.auth.staff_cookie));

        let Some(token) = bearer.or(cookie) else {
            return Err(redirect);
        };

        match jwt.validate_staff_token(token) {
            Ok(claims) => Ok(StaffUser(claims)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    token = %token_fingerprint(token),
                    "Rejected staff token"
                );
                Err(redirect)
            }
        }
    }
}
