//! Enquiry HTTP handlers.
//!
//! - POST /api/enquiry - Validate a lead and dispatch both notifications
//! - GET /api/enquiry - Diagnostic view of the mail pipeline (no secrets)

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Serialize;

use crate::{
    error::AppError, models::enquiry::EnquiryRequest, services::enquiry_service,
    state::AppState,
};

/// Response body for a dispatched enquiry.
#[derive(Debug, Serialize)]
pub struct EnquiryResponse {
    pub message: String,
}

/// Diagnostic response for the enquiry pipeline.
///
/// Reachability and presence flags plus the public sender identity;
/// credentials and operator addresses are never included.
#[derive(Debug, Serialize)]
pub struct EnquiryStatusResponse {
    /// The SMTP transport was built at startup and currently answers
    pub transport_ready: bool,

    /// SMTP host and credentials were all present at startup
    pub smtp_configured: bool,

    /// An explicit operator recipient override is configured
    pub to_override_configured: bool,

    /// Sender identity used on outgoing mail
    pub from_address: String,
}

/// Accept and dispatch a prospective traveler's enquiry.
///
/// # Endpoint
///
/// `POST /api/enquiry`
///
/// # Responses
///
/// - **200**: `{"message":"Enquiry sent"}`; the operator was notified.
///   The customer acknowledgement is best-effort and does not affect the
///   response.
/// - **400**: unparseable body, or required fields missing/blank
/// - **500**: transport unavailable, or the operator notice failed
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<EnquiryRequest>, JsonRejection>,
) -> Result<Json<EnquiryResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::MalformedRequest(e.body_text()))?;

    // Both dispatch outcomes are success here; an acknowledgement failure
    // is already logged and swallowed by the service
    enquiry_service::submit_enquiry(state.mailer.as_ref(), &state.config, request).await?;

    Ok(Json(EnquiryResponse {
        message: "Enquiry sent".to_string(),
    }))
}

/// Report mail-pipeline health for operational checks.
///
/// # Endpoint
///
/// `GET /api/enquiry`
pub async fn status(State(state): State<AppState>) -> Json<EnquiryStatusResponse> {
    let transport_ready = match &state.mailer {
        Some(mailer) => mailer.verify().await,
        None => false,
    };

    Json(EnquiryStatusResponse {
        transport_ready,
        smtp_configured: state.config.smtp_configured(),
        to_override_configured: state.config.enquiry_to.is_some(),
        from_address: state.config.mail_from_address.clone(),
    })
}
