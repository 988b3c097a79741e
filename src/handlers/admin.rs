//! Administrator HTTP handlers.
//!
//! This module implements the admin API endpoints:
//! - POST /api/admin/login - Verify the shared admin password
//! - GET /api/admin/records - List credential records (token gated)
//! - POST /api/admin/records - Upsert a credential by email (token gated)
//! - POST /api/admin/seed - Upsert with the token carried in the body
//!
//! The records routes are protected by the `x-admin-token` middleware; the
//! seed route performs the same check itself against its body field.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Serialize;

use crate::{
    error::AppError,
    middleware::admin_token::authorize_token,
    models::admin::{
        AdminIdentity, AdminRecord, LoginRequest, SeedAdminRequest, UpsertAdminRequest,
    },
    services::admin_service,
    state::AppState,
};

/// Response body for a successful login or seed.
#[derive(Debug, Serialize)]
pub struct AdminIdentityResponse {
    pub success: bool,
    pub admin: AdminIdentity,
}

/// Response body for the credential listing.
#[derive(Debug, Serialize)]
pub struct AdminListResponse {
    pub success: bool,
    pub admins: Vec<AdminRecord>,
}

/// Response body for a successful upsert.
#[derive(Debug, Serialize)]
pub struct AdminUpsertResponse {
    pub success: bool,
    pub admin: AdminRecord,
}

/// Verify the admin password.
///
/// # Endpoint
///
/// `POST /api/admin/login`
///
/// No authentication; the credential itself is the secret. Issues no
/// server-side session; on success the client mints its own local session
/// artifact (see the `session` module).
///
/// # Responses
///
/// - **200**: `{"success":true,"admin":{"name","email"}}`
/// - **400**: password missing or empty
/// - **401**: password mismatch
/// - **500**: admin credential not configured
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AdminIdentityResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedRequest(e.body_text()))?;

    let admin =
        admin_service::login(&state.pool, &state.config, request.password.as_deref()).await?;

    Ok(Json(AdminIdentityResponse {
        success: true,
        admin,
    }))
}

/// List all credential records, sanitized.
///
/// # Endpoint
///
/// `GET /api/admin/records`
///
/// Protected by the `x-admin-token` middleware.
pub async fn list_records(
    State(state): State<AppState>,
) -> Result<Json<AdminListResponse>, AppError> {
    let admins = admin_service::list_all(&state.pool).await?;

    Ok(Json(AdminListResponse {
        success: true,
        admins,
    }))
}

/// Update-or-insert a credential keyed by email.
///
/// # Endpoint
///
/// `POST /api/admin/records`
///
/// Protected by the `x-admin-token` middleware. All three fields are
/// required and must be non-blank.
pub async fn upsert_record(
    State(state): State<AppState>,
    payload: Result<Json<UpsertAdminRequest>, JsonRejection>,
) -> Result<Json<AdminUpsertResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedRequest(e.body_text()))?;

    let (name, email, password) =
        require_credential_fields(request.name, request.email, request.password)?;
    let admin = admin_service::upsert_by_email(&state.pool, &name, &email, &password).await?;

    Ok(Json(AdminUpsertResponse {
        success: true,
        admin,
    }))
}

/// One-time seeding/upsert with the shared secret carried in the body.
///
/// # Endpoint
///
/// `POST /api/admin/seed`
///
/// The `token` body field is compared against the same configured secret
/// as the records endpoints. Responds with the public identity only.
pub async fn seed(
    State(state): State<AppState>,
    payload: Result<Json<SeedAdminRequest>, JsonRejection>,
) -> Result<Json<AdminIdentityResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedRequest(e.body_text()))?;

    // Token check first: an unauthorized caller learns nothing about the
    // body's validity
    authorize_token(state.config.admin_token.as_deref(), request.token.as_deref())?;

    let (name, email, password) =
        require_credential_fields(request.name, request.email, request.password)?;
    let admin = admin_service::upsert_by_email(&state.pool, &name, &email, &password).await?;

    Ok(Json(AdminIdentityResponse {
        success: true,
        admin: AdminIdentity {
            name: admin.name,
            email: admin.email,
        },
    }))
}

/// Require name/email/password to be present and non-blank, trimmed.
fn require_credential_fields(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String, String), AppError> {
    let mut missing = Vec::new();

    let name = trimmed(name);
    if name.is_none() {
        missing.push("name");
    }
    let email = trimmed(email);
    if email.is_none() {
        missing.push("email");
    }
    let password = trimmed(password);
    if password.is_none() {
        missing.push("password");
    }

    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Missing required field(s): {}",
            missing.join(", ")
        )));
    }

    Ok((
        name.unwrap_or_default(),
        email.unwrap_or_default(),
        password.unwrap_or_default(),
    ))
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let t = v.trim();
        if t.is_empty() { None } else { Some(t.to_string()) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_fields_all_required() {
        let err = require_credential_fields(Some("Admin".to_string()), None, Some(" ".to_string()))
            .expect_err("should be rejected");
        match err {
            AppError::Validation(msg) => {
                assert!(msg.contains("email"));
                assert!(msg.contains("password"));
                assert!(!msg.contains("name"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn credential_fields_are_trimmed() {
        let (name, email, password) = require_credential_fields(
            Some("  Admin  ".to_string()),
            Some(" Foo@Bar.com ".to_string()),
            Some("pw".to_string()),
        )
        .expect("valid");
        assert_eq!(name, "Admin");
        assert_eq!(email, "Foo@Bar.com");
        assert_eq!(password, "pw");
    }
}
