//! Enquiry request model and validation.
//!
//! An enquiry is ephemeral: constructed from a single request, validated,
//! used to render two notification emails, then discarded. Nothing is ever
//! written to the database; the operator email is the system of record.

use serde::Deserialize;

/// Request body for `POST /api/enquiry`.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Asha",
///   "email": "asha@example.com",
///   "message": "Plan a 5-day trip",
///   "phone": "+44 7700 900123",
///   "selected_package": "Kerala Backwaters",
///   "source": "homepage-form"
/// }
/// ```
///
/// # Validation
///
/// - `name`, `email`, `message`: required, non-empty after trimming
/// - `phone`, `selected_package`, `source`: optional free text
///
/// All fields are optional at the parse level so that missing required
/// fields produce a 400 validation error naming the fields, not a
/// deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct EnquiryRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    /// Accepts the camelCase `selectedPackage` the site's forms have
    /// always sent, alongside the snake_case name.
    #[serde(default, alias = "selectedPackage")]
    pub selected_package: Option<String>,

    /// Free-text origin tag for analytics (e.g. which form submitted it)
    #[serde(default)]
    pub source: Option<String>,
}

/// A validated enquiry: required fields proven present and trimmed.
#[derive(Debug, Clone)]
pub struct Enquiry {
    pub name: String,
    pub email: String,
    pub message: String,
    pub phone: Option<String>,
    pub selected_package: Option<String>,
    pub source: Option<String>,
}

impl EnquiryRequest {
    /// Validate the request into an [`Enquiry`], or return the list of
    /// missing/blank required field names.
    ///
    /// Trims every field; optional fields that are blank after trimming are
    /// normalized to `None`.
    pub fn validate(self) -> Result<Enquiry, Vec<&'static str>> {
        let mut missing = Vec::new();

        let name = non_blank(self.name);
        if name.is_none() {
            missing.push("name");
        }
        let email = non_blank(self.email);
        if email.is_none() {
            missing.push("email");
        }
        let message = non_blank(self.message);
        if message.is_none() {
            missing.push("message");
        }

        if !missing.is_empty() {
            return Err(missing);
        }

        // The unwraps above are guarded by the missing-field check
        Ok(Enquiry {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            message: message.unwrap_or_default(),
            phone: non_blank(self.phone),
            selected_package: non_blank(self.selected_package),
            source: non_blank(self.source),
        })
    }
}

/// Trim an optional field, mapping absent or whitespace-only to `None`.
fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> EnquiryRequest {
        EnquiryRequest {
            name: Some("Asha".to_string()),
            email: Some("asha@example.com".to_string()),
            message: Some("Plan a 5-day trip".to_string()),
            phone: Some("+44 7700 900123".to_string()),
            selected_package: Some("Kerala Backwaters".to_string()),
            source: Some("homepage-form".to_string()),
        }
    }

    #[test]
    fn full_request_validates() {
        let enquiry = full_request().validate().expect("valid enquiry");
        assert_eq!(enquiry.name, "Asha");
        assert_eq!(enquiry.email, "asha@example.com");
        assert_eq!(enquiry.source.as_deref(), Some("homepage-form"));
    }

    #[test]
    fn missing_message_is_rejected() {
        let mut request = full_request();
        request.message = None;
        let missing = request.validate().expect_err("should be rejected");
        assert_eq!(missing, vec!["message"]);
    }

    #[test]
    fn whitespace_only_message_is_rejected() {
        let mut request = full_request();
        request.message = Some("  ".to_string());
        let missing = request.validate().expect_err("should be rejected");
        assert_eq!(missing, vec!["message"]);
    }

    #[test]
    fn all_required_fields_reported_together() {
        let request = EnquiryRequest {
            name: None,
            email: Some("".to_string()),
            message: None,
            phone: None,
            selected_package: None,
            source: None,
        };
        let missing = request.validate().expect_err("should be rejected");
        assert_eq!(missing, vec!["name", "email", "message"]);
    }

    #[test]
    fn camel_case_selected_package_is_accepted() {
        let request: EnquiryRequest = serde_json::from_str(
            r#"{
                "name": "Asha",
                "email": "asha@example.com",
                "message": "Plan a 5-day trip",
                "selectedPackage": "Kerala Backwaters"
            }"#,
        )
        .expect("parses");
        let enquiry = request.validate().expect("valid enquiry");
        assert_eq!(enquiry.selected_package.as_deref(), Some("Kerala Backwaters"));
    }

    #[test]
    fn fields_are_trimmed_and_blank_optionals_dropped() {
        let request = EnquiryRequest {
            name: Some("  Asha  ".to_string()),
            email: Some(" asha@example.com ".to_string()),
            message: Some(" hello ".to_string()),
            phone: Some("   ".to_string()),
            selected_package: None,
            source: None,
        };
        let enquiry = request.validate().expect("valid enquiry");
        assert_eq!(enquiry.name, "Asha");
        assert_eq!(enquiry.email, "asha@example.com");
        assert_eq!(enquiry.message, "hello");
        assert_eq!(enquiry.phone, None);
    }
}
