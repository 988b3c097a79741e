//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string. Absence is a
///   fatal startup error; the server refuses to start without its store.
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `SMTP_HOST` / `SMTP_PORT` / `SMTP_SECURE` / `SMTP_USER` / `SMTP_PASSWORD`
///   (optional): outbound mail transport. Host, user and password must all be
///   present for the transport to be enabled; otherwise enquiry dispatch is
///   disabled for the process lifetime (the server still starts).
/// - `MAIL_FROM_ADDRESS` / `MAIL_FROM_NAME` (optional): sender identity for
///   outgoing mail, with agency defaults.
/// - `ENQUIRY_TO` (optional): explicit operator recipient for enquiry notices.
/// - `ADMIN_TOKEN` (optional): shared secret gating the admin-record and seed
///   endpoints. When unset those endpoints fail closed.
/// - `DEFAULT_ADMIN_NAME` / `DEFAULT_ADMIN_EMAIL` / `DEFAULT_ADMIN_PASSWORD`
///   (optional): identity inserted by the one-time credential seeding.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    // Outbound mail transport
    pub smtp_host: Option<String>,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_secure: bool,

    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,

    #[serde(default = "default_from_address")]
    pub mail_from_address: String,

    #[serde(default = "default_from_name")]
    pub mail_from_name: String,

    /// Explicit operator recipient for enquiry notices.
    pub enquiry_to: Option<String>,

    /// Shared secret for the admin-record and seed endpoints.
    pub admin_token: Option<String>,

    // Default administrator identity used by credential seeding
    #[serde(default = "default_admin_name")]
    pub default_admin_name: String,

    #[serde(default = "default_admin_email")]
    pub default_admin_email: String,

    #[serde(default = "default_admin_password")]
    pub default_admin_password: String,
}

/// Default port if SERVER_PORT environment variable is not set.
fn default_port() -> u16 {
    3000
}

/// Default SMTP submission port (STARTTLS).
fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "no-reply@wanderwisetravels.com".to_string()
}

fn default_from_name() -> String {
    "Wanderwise Travels".to_string()
}

fn default_admin_name() -> String {
    "Administrator".to_string()
}

fn default_admin_email() -> String {
    "admin@wanderwisetravels.com".to_string()
}

fn default_admin_password() -> String {
    "changeme".to_string()
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required environment variables are missing (e.g., DATABASE_URL)
    /// - Environment variable values cannot be parsed into expected types
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Parse environment variables into Config struct
        // Field names are automatically converted: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }

    /// Whether enough SMTP settings are present to build the mail transport.
    ///
    /// Host, user and password must all be set; the remaining fields have
    /// workable defaults.
    pub fn smtp_configured(&self) -> bool {
        self.smtp_host.is_some() && self.smtp_user.is_some() && self.smtp_password.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> Config {
        Config {
            database_url: "postgres://localhost/wanderwise".to_string(),
            server_port: default_port(),
            smtp_host: None,
            smtp_port: default_smtp_port(),
            smtp_secure: false,
            smtp_user: None,
            smtp_password: None,
            mail_from_address: default_from_address(),
            mail_from_name: default_from_name(),
            enquiry_to: None,
            admin_token: None,
            default_admin_name: default_admin_name(),
            default_admin_email: default_admin_email(),
            default_admin_password: default_admin_password(),
        }
    }

    #[test]
    fn smtp_not_configured_without_credentials() {
        let mut config = base_config();
        assert!(!config.smtp_configured());

        // Host alone is not enough
        config.smtp_host = Some("smtp.example.com".to_string());
        assert!(!config.smtp_configured());
    }

    #[test]
    fn smtp_configured_with_host_and_credentials() {
        let mut config = base_config();
        config.smtp_host = Some("smtp.example.com".to_string());
        config.smtp_user = Some("mailer@example.com".to_string());
        config.smtp_password = Some("secret".to_string());
        assert!(config.smtp_configured());
    }
}
