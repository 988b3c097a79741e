//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// This enum represents all possible errors that can occur in the application.
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Database Errors**: Any sqlx::Error from document-store operations
/// - **Caller Errors**: Malformed or incomplete request input
/// - **Auth Errors**: Wrong admin password, missing/mismatched admin token
/// - **Configuration Errors**: Required server-side configuration absent
/// - **Mail Errors**: Outbound transport unavailable or the operator notice failed
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Request body could not be parsed at all (not JSON, wrong shape).
    ///
    /// Returns HTTP 400 Bad Request.
    #[error("Malformed request body")]
    MalformedRequest(String),

    /// Request was parseable but required fields are missing or blank.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String names the missing/invalid field(s).
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Submitted admin password did not match the stored credential.
    ///
    /// Returns HTTP 401 Unauthorized. Deliberately low-detail: with a single
    /// account there is nothing to distinguish beyond "invalid password".
    #[error("Invalid password")]
    Authentication,

    /// Admin token missing or not equal to the configured shared secret.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Unauthorized")]
    Unauthorized,

    /// Required server-side configuration is absent (admin secret unset,
    /// admin credential unset). Never treated as "allow".
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Server misconfiguration: {0}")]
    Configuration(String),

    /// The mail transport was never initialized (missing SMTP credentials
    /// at startup). Every enquiry fails identically until restart.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Mail transport unavailable")]
    TransportUnavailable,

    /// The mandatory operator notice could not be sent. The enquiry is
    /// considered not received.
    ///
    /// Returns HTTP 500 Internal Server Error.
    #[error("Failed to send enquiry notification")]
    NotificationFailed(String),
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "error": {
///     "code": "error_type",
///     "message": "Human-readable error message"
///   }
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `MalformedRequest`, `Validation` → 400 Bad Request
/// - `Authentication`, `Unauthorized` → 401 Unauthorized
/// - `Configuration`, `TransportUnavailable`, `NotificationFailed`,
///   `Database` → 500 Internal Server Error (details logged, never echoed)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map each error variant to (HTTP status, error code, message)
        let (status, code, message) = match self {
            AppError::MalformedRequest(ref detail) => {
                tracing::debug!(detail = %detail, "Rejected malformed request body");
                (
                    StatusCode::BAD_REQUEST,
                    "malformed_request",
                    self.to_string(),
                )
            }
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::Authentication => (
                StatusCode::UNAUTHORIZED,
                "invalid_password",
                self.to_string(),
            ),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "unauthorized", self.to_string())
            }
            AppError::Configuration(ref detail) => {
                // The detail names the missing setting; log it, return a
                // generic message to the client.
                tracing::error!(detail = %detail, "Server misconfiguration");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "not_configured",
                    "Server is not configured for this operation".to_string(),
                )
            }
            AppError::TransportUnavailable => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "transport_unavailable",
                self.to_string(),
            ),
            AppError::NotificationFailed(ref detail) => {
                tracing::error!(detail = %detail, "Operator notification failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "notification_failed",
                    "Failed to send enquiry notification".to_string(),
                )
            }
            AppError::Database(ref err) => {
                tracing::error!(error = %err, "Database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // Build JSON response body
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        // Return the response with status code and JSON body
        (status, body).into_response()
    }
}
