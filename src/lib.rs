//! Backend library for the Wanderwise Travels marketing site.
//!
//! Two collaborating subsystems form the core:
//!
//! - **Enquiry intake pipeline** ([`services::enquiry_service`]): validates
//!   a lead submission and dispatches two notification emails: a mandatory
//!   operator notice and a best-effort customer acknowledgement. Enquiries
//!   are never persisted; the operator email is the system of record.
//! - **Admin access control** ([`services::admin_service`],
//!   [`middleware::admin_token`], [`session`]): a single shared credential
//!   stored in PostgreSQL, a plaintext-equality login, a static bearer
//!   token over the credential-record endpoints, and a client-held expiring
//!   session artifact.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod state;
