//! Enquiry intake and dual-notification dispatch.
//!
//! The pipeline validates a lead submission, then sends two emails:
//!
//! 1. **Operator notice** (mandatory): failure fails the whole request,
//!    because an un-notified lead is a lost lead.
//! 2. **Customer acknowledgement** (best-effort): failure is logged and
//!    swallowed; the courtesy email must never sink a received lead.
//!
//! Nothing is persisted. The operator email is the system of record.

use crate::config::Config;
use crate::error::AppError;
use crate::models::enquiry::{Enquiry, EnquiryRequest};
use crate::services::mailer::{MailTransport, OutboundEmail};

/// Last-resort operator recipient when neither an explicit address nor the
/// transport's own address is available.
pub const FALLBACK_ENQUIRY_TO: &str = "enquiries@wanderwisetravels.com";

/// Outcome of a successful submission.
///
/// Both variants are success from the caller's point of view; the split
/// lets callers and tests observe "primary succeeded, secondary failed"
/// explicitly instead of inferring it from logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnquiryDispatch {
    /// Operator notice and customer acknowledgement both sent.
    Delivered,

    /// Operator notice sent; acknowledgement failed and was swallowed.
    AckFailed,
}

/// Validate an enquiry and dispatch both notifications.
///
/// # Process
///
/// 1. Validate required fields; reject before any send is attempted.
/// 2. Fail with `TransportUnavailable` if the mailer never initialized.
/// 3. Compute and de-duplicate the operator recipient set.
/// 4. Send the operator notice synchronously; failure propagates.
/// 5. Send the customer acknowledgement best-effort.
///
/// # Errors
///
/// - `Validation`: a required field is missing or blank
/// - `TransportUnavailable`: mail transport not configured at startup
/// - `NotificationFailed`: the operator notice could not be sent
pub async fn submit_enquiry<M: MailTransport>(
    mailer: Option<&M>,
    config: &Config,
    request: EnquiryRequest,
) -> Result<EnquiryDispatch, AppError> {
    // Step 1: validate before touching the transport
    let enquiry = request.validate().map_err(|missing| {
        AppError::Validation(format!(
            "Missing required field(s): {}",
            missing.join(", ")
        ))
    })?;

    // Step 2: a mailer that failed to initialize at startup stays None for
    // the process lifetime, so every call fails here identically
    let mailer = mailer.ok_or(AppError::TransportUnavailable)?;

    // Step 3: operator recipients
    let recipients = operator_recipients(
        config.enquiry_to.as_deref(),
        mailer.authenticated_address(),
    );

    // Step 4: mandatory operator notice
    let notice = OutboundEmail {
        to: recipients,
        reply_to: Some(enquiry.email.clone()),
        subject: operator_subject(&enquiry),
        body: operator_body(&enquiry),
    };
    mailer
        .send(&notice)
        .await
        .map_err(|e| AppError::NotificationFailed(e.to_string()))?;

    tracing::info!(from = %enquiry.email, source = ?enquiry.source, "Enquiry received and operator notified");

    // Step 5: best-effort acknowledgement to the enquirer
    let acknowledgement = OutboundEmail {
        to: vec![enquiry.email.clone()],
        reply_to: None,
        subject: "We received your enquiry".to_string(),
        body: acknowledgement_body(&enquiry),
    };
    if let Err(e) = mailer.send(&acknowledgement).await {
        tracing::warn!(to = %enquiry.email, error = %e, "Acknowledgement email failed; continuing");
        return Ok(EnquiryDispatch::AckFailed);
    }

    Ok(EnquiryDispatch::Delivered)
}

/// Compute the de-duplicated operator recipient set.
///
/// The explicitly configured address and the transport's authenticated
/// address are both included when present; if neither exists the hard-coded
/// fallback is used. Duplicates are collapsed case-insensitively, first
/// occurrence wins.
pub fn operator_recipients(configured: Option<&str>, authenticated: Option<&str>) -> Vec<String> {
    let mut recipients: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for candidate in [configured, authenticated].into_iter().flatten() {
        let candidate = candidate.trim();
        if candidate.is_empty() {
            continue;
        }
        let key = candidate.to_lowercase();
        if !seen.contains(&key) {
            seen.push(key);
            recipients.push(candidate.to_string());
        }
    }

    if recipients.is_empty() {
        recipients.push(FALLBACK_ENQUIRY_TO.to_string());
    }
    recipients
}

fn operator_subject(enquiry: &Enquiry) -> String {
    match &enquiry.selected_package {
        Some(package) => format!("New enquiry from {} ({})", enquiry.name, package),
        None => format!("New enquiry from {}", enquiry.name),
    }
}

fn operator_body(enquiry: &Enquiry) -> String {
    let mut lines = vec![
        "A new enquiry was submitted on the website.".to_string(),
        String::new(),
        format!("Name: {}", enquiry.name),
        format!("Email: {}", enquiry.email),
    ];
    if let Some(phone) = &enquiry.phone {
        lines.push(format!("Phone: {phone}"));
    }
    if let Some(package) = &enquiry.selected_package {
        lines.push(format!("Package: {package}"));
    }
    if let Some(source) = &enquiry.source {
        lines.push(format!("Source: {source}"));
    }
    lines.push(String::new());
    lines.push("Message:".to_string());
    lines.push(enquiry.message.clone());
    lines.join("\n")
}

fn acknowledgement_body(enquiry: &Enquiry) -> String {
    format!(
        "Hi {},\n\n\
         Thank you for getting in touch with Wanderwise Travels. We have \
         received your enquiry and one of our travel consultants will get \
         back to you shortly.\n\n\
         Your message:\n{}\n\n\
         Warm regards,\n\
         The Wanderwise Travels team",
        enquiry.name, enquiry.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::mailer::MailError;
    use std::sync::Mutex;

    /// Recording fake transport. Every send attempt is recorded, including
    /// ones configured to fail.
    struct FakeTransport {
        authenticated: Option<String>,
        sent: Mutex<Vec<OutboundEmail>>,
        /// Fail any send whose recipient list contains this address.
        fail_to: Option<String>,
    }

    impl FakeTransport {
        fn new() -> Self {
            Self {
                authenticated: Some("mailer@wanderwisetravels.com".to_string()),
                sent: Mutex::new(Vec::new()),
                fail_to: None,
            }
        }

        fn attempts(&self) -> Vec<OutboundEmail> {
            self.sent.lock().expect("lock").clone()
        }
    }

    impl MailTransport for FakeTransport {
        fn authenticated_address(&self) -> Option<&str> {
            self.authenticated.as_deref()
        }

        async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
            self.sent.lock().expect("lock").push(email.clone());
            if let Some(fail_to) = &self.fail_to {
                if email.to.iter().any(|to| to == fail_to) {
                    return Err(MailError::Build("simulated transport failure".to_string()));
                }
            }
            Ok(())
        }
    }

    fn test_config() -> Config {
        // Deserialize from an empty map so serde defaults apply, then set
        // what each test needs.
        let mut config: Config = envy::from_iter(vec![(
            "DATABASE_URL".to_string(),
            "postgres://localhost/test".to_string(),
        )])
        .expect("config from defaults");
        config.enquiry_to = Some("bookings@wanderwisetravels.com".to_string());
        config
    }

    fn full_request() -> EnquiryRequest {
        EnquiryRequest {
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            message: Some("Plan a 5-day trip".to_string()),
            phone: None,
            selected_package: None,
            source: Some("homepage-form".to_string()),
        }
    }

    #[tokio::test]
    async fn invalid_payload_is_rejected_before_any_send() {
        let transport = FakeTransport::new();
        let mut request = full_request();
        request.message = Some("  ".to_string());

        let err = submit_enquiry(Some(&transport), &test_config(), request)
            .await
            .expect_err("should be rejected");
        assert!(matches!(err, AppError::Validation(_)));
        assert!(transport.attempts().is_empty());
    }

    #[tokio::test]
    async fn missing_transport_fails_every_call() {
        let err = submit_enquiry::<FakeTransport>(None, &test_config(), full_request())
            .await
            .expect_err("should fail");
        assert!(matches!(err, AppError::TransportUnavailable));
    }

    #[tokio::test]
    async fn full_payload_sends_operator_notice_and_acknowledgement() {
        let transport = FakeTransport::new();
        let outcome = submit_enquiry(Some(&transport), &test_config(), full_request())
            .await
            .expect("should succeed");
        assert_eq!(outcome, EnquiryDispatch::Delivered);

        let attempts = transport.attempts();
        assert_eq!(attempts.len(), 2);

        // Operator notice first, addressed to the configured recipient and
        // the transport's own address, reply-to the enquirer
        let notice = &attempts[0];
        assert!(notice.to.contains(&"bookings@wanderwisetravels.com".to_string()));
        assert!(notice.to.contains(&"mailer@wanderwisetravels.com".to_string()));
        assert_eq!(notice.reply_to.as_deref(), Some("asha@example.com"));
        assert!(notice.body.contains("Plan a 5-day trip"));
        assert!(notice.body.contains("Source: homepage-form"));

        // Acknowledgement to the enquirer
        let ack = &attempts[1];
        assert_eq!(ack.to, vec!["asha@example.com".to_string()]);
    }

    #[tokio::test]
    async fn operator_failure_fails_request_and_skips_acknowledgement() {
        let mut transport = FakeTransport::new();
        transport.fail_to = Some("bookings@wanderwisetravels.com".to_string());

        let err = submit_enquiry(Some(&transport), &test_config(), full_request())
            .await
            .expect_err("should fail");
        assert!(matches!(err, AppError::NotificationFailed(_)));

        // Only the failed operator attempt; the acknowledgement was never tried
        assert_eq!(transport.attempts().len(), 1);
    }

    #[tokio::test]
    async fn acknowledgement_failure_is_swallowed() {
        let mut transport = FakeTransport::new();
        transport.fail_to = Some("asha@example.com".to_string());

        let outcome = submit_enquiry(Some(&transport), &test_config(), full_request())
            .await
            .expect("primary succeeded, so the request succeeds");
        assert_eq!(outcome, EnquiryDispatch::AckFailed);
        assert_eq!(transport.attempts().len(), 2);
    }

    #[test]
    fn recipients_prefer_configured_then_authenticated() {
        let recipients = operator_recipients(
            Some("bookings@wanderwisetravels.com"),
            Some("mailer@wanderwisetravels.com"),
        );
        assert_eq!(
            recipients,
            vec![
                "bookings@wanderwisetravels.com".to_string(),
                "mailer@wanderwisetravels.com".to_string(),
            ]
        );
    }

    #[test]
    fn recipients_deduplicate_case_insensitively() {
        let recipients = operator_recipients(
            Some("Bookings@wanderwisetravels.com"),
            Some("bookings@wanderwisetravels.com"),
        );
        assert_eq!(recipients, vec!["Bookings@wanderwisetravels.com".to_string()]);
    }

    #[test]
    fn recipients_fall_back_to_hardcoded_address() {
        assert_eq!(operator_recipients(None, None), vec![FALLBACK_ENQUIRY_TO.to_string()]);
        assert_eq!(operator_recipients(Some("  "), None), vec![FALLBACK_ENQUIRY_TO.to_string()]);
    }
}
