//! HTTP request handlers.

pub mod admin;
pub mod enquiry;
pub mod health;
