//! Data models and API request/response types.

pub mod admin;
pub mod enquiry;
