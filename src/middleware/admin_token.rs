//! Shared-secret gate for the admin-record endpoints.
//!
//! The endpoints that can enumerate or overwrite administrator credentials
//! are protected by a static operational secret, distinct from the admin's
//! login password. The middleware intercepts every protected request to:
//!
//! 1. Fail closed if no secret is configured server-side
//! 2. Extract the token from the `x-admin-token` header
//! 3. Compare it by exact match against the configured secret
//! 4. Reject mismatches with HTTP 401
//!
//! The gate is stateless and re-evaluated on every call; there is no
//! expiry or rotation.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Request header carrying the shared admin secret.
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Exact-match token check, shared with the seed endpoint (which carries
/// the token in the request body instead of a header).
///
/// # Errors
///
/// - `Configuration` if no secret is configured; the feature is unusable
///   until configured, never silently open
/// - `Unauthorized` if the presented token is missing or does not match
pub fn authorize_token(
    configured: Option<&str>,
    presented: Option<&str>,
) -> Result<(), AppError> {
    let secret = configured
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Configuration("ADMIN_TOKEN is not set".to_string()))?;

    match presented {
        Some(token) if token == secret => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// Middleware enforcing [`authorize_token`] on the admin-record routes.
pub async fn require_admin_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok());

    authorize_token(state.config.admin_token.as_deref(), presented)?;

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_secret_fails_closed() {
        assert!(matches!(
            authorize_token(None, Some("anything")),
            Err(AppError::Configuration(_))
        ));
        assert!(matches!(
            authorize_token(Some(""), Some("anything")),
            Err(AppError::Configuration(_))
        ));
    }

    #[test]
    fn missing_or_wrong_token_is_unauthorized() {
        assert!(matches!(
            authorize_token(Some("secret"), None),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            authorize_token(Some("secret"), Some("")),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            authorize_token(Some("secret"), Some("Secret")),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn exact_match_is_allowed() {
        assert!(authorize_token(Some("secret"), Some("secret")).is_ok());
    }
}
