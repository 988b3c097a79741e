//! Business logic services.

pub mod admin_service;
pub mod enquiry_service;
pub mod mailer;
