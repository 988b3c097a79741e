//! HTTP middleware.

pub mod admin_token;
