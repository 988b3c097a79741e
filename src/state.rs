//! Shared application state.

use std::sync::Arc;

use crate::config::Config;
use crate::db::DbPool;
use crate::services::mailer::SmtpMailer;

/// Process-wide dependencies, wired once at startup and cloned into every
/// handler via Axum's `State` extractor.
///
/// `mailer` is `None` when SMTP was not configured (or failed to build) at
/// startup; it stays `None` for the process lifetime, so every enquiry
/// dispatch fails identically until restart.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub mailer: Option<SmtpMailer>,
    pub config: Arc<Config>,
}
