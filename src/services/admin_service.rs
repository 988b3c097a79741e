//! Administrator credential store and login.
//!
//! The `admins` table is the single source of truth for the shared admin
//! login, reached through the [`CredentialStore`] seam so tests can run the
//! full credential path against an in-memory fake. The service keeps three
//! contracts:
//!
//! - **Idempotent seeding**: [`ensure_default`] inserts the configured
//!   default identity only when the store is empty; re-running it is a
//!   no-op read.
//! - **Upsert by normalized email**: [`upsert_by_email`] lower-cases the
//!   email, overwrites name/password on conflict, bumps `updated_at` and
//!   preserves `created_at`. Concurrent upserts resolve last-writer-wins
//!   through the database's atomic upsert.
//! - **Sanitization**: the password never leaves this module except inside
//!   the [`Admin`] entity consumed by [`login`] itself.
//!
//! Passwords are stored and compared as plaintext. That is the system's
//! long-standing contract (see the login notes below) and a documented
//! security smell, not an invitation to harden silently.

use crate::config::Config;
use crate::db::DbPool;
use crate::error::AppError;
use crate::models::admin::{Admin, AdminIdentity, AdminRecord};

/// The seam between the credential service and the backing document store.
///
/// Implementations are dumb single-record primitives; normalization and
/// the seeding/login protocols live in the service functions below. The
/// production implementation is the Postgres pool; tests use an in-memory
/// fake.
pub trait CredentialStore {
    /// The first credential record by creation order, if any.
    fn fetch_primary(&self) -> impl Future<Output = Result<Option<Admin>, AppError>> + Send;

    /// Insert a record keyed by email only if that email is not already
    /// present. Racing inserts must not create duplicates.
    fn insert_if_absent(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Atomic update-or-insert keyed by email. On update, `name` and
    /// `password` are overwritten and `updated_at` refreshed; `created_at`
    /// is set only on insert.
    fn upsert(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Admin, AppError>> + Send;

    /// All credential records in creation order.
    fn list(&self) -> impl Future<Output = Result<Vec<Admin>, AppError>> + Send;
}

impl CredentialStore for DbPool {
    async fn fetch_primary(&self) -> Result<Option<Admin>, AppError> {
        let admin = sqlx::query_as::<_, Admin>(
            "SELECT id, name, email, password, created_at, updated_at
             FROM admins
             ORDER BY created_at ASC
             LIMIT 1",
        )
        .fetch_optional(self)
        .await?;

        Ok(admin)
    }

    async fn insert_if_absent(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO admins (name, email, password)
             VALUES ($1, $2, $3)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(name)
        .bind(email)
        .bind(password)
        .execute(self)
        .await?;

        Ok(())
    }

    async fn upsert(&self, name: &str, email: &str, password: &str) -> Result<Admin, AppError> {
        let admin = sqlx::query_as::<_, Admin>(
            "INSERT INTO admins (name, email, password)
             VALUES ($1, $2, $3)
             ON CONFLICT (email) DO UPDATE
             SET name = EXCLUDED.name,
                 password = EXCLUDED.password,
                 updated_at = NOW()
             RETURNING id, name, email, password, created_at, updated_at",
        )
        .bind(name)
        .bind(email)
        .bind(password)
        .fetch_one(self)
        .await?;

        Ok(admin)
    }

    async fn list(&self) -> Result<Vec<Admin>, AppError> {
        let admins = sqlx::query_as::<_, Admin>(
            "SELECT id, name, email, password, created_at, updated_at
             FROM admins
             ORDER BY created_at ASC",
        )
        .fetch_all(self)
        .await?;

        Ok(admins)
    }
}

/// Return the existing credential, or seed the configured default identity
/// into an empty store.
///
/// Idempotent: at most one insert, only when no record exists. The insert
/// goes through [`CredentialStore::insert_if_absent`] so two racing
/// bootstraps cannot create duplicates; both end up reading the same row.
pub async fn ensure_default<S: CredentialStore>(
    store: &S,
    config: &Config,
) -> Result<Admin, AppError> {
    if let Some(existing) = store.fetch_primary().await? {
        return Ok(existing);
    }

    store
        .insert_if_absent(
            &config.default_admin_name,
            &normalize_email(&config.default_admin_email),
            &config.default_admin_password,
        )
        .await?;

    tracing::info!(email = %config.default_admin_email, "Seeded default admin credential");

    store.fetch_primary().await?.ok_or_else(|| {
        AppError::Configuration("admin credential could not be seeded".to_string())
    })
}

/// Update-or-insert a credential keyed by normalized email.
///
/// Always refreshes `updated_at`; `created_at` is set only on insert.
/// Returns the sanitized record.
pub async fn upsert_by_email<S: CredentialStore>(
    store: &S,
    name: &str,
    email: &str,
    password: &str,
) -> Result<AdminRecord, AppError> {
    let admin = store
        .upsert(name, &normalize_email(email), password)
        .await?;

    Ok(admin.into())
}

/// List all credential records in creation order, sanitized.
pub async fn list_all<S: CredentialStore>(store: &S) -> Result<Vec<AdminRecord>, AppError> {
    let admins = store.list().await?;

    Ok(admins.into_iter().map(Into::into).collect())
}

/// Verify a submitted password against the stored admin credential.
///
/// # Process
///
/// 1. Missing/empty password → `Validation`, store untouched.
/// 2. Fetch the primary credential; seed the default if the store is empty.
/// 3. Still absent, or stored password blank → `Configuration` (server
///    misconfiguration, not a user error).
/// 4. Exact string comparison. There is effectively one account, so a
///    mismatch reports only "invalid password" with no further detail.
/// 5. On match, return public fields only; the password is never echoed.
pub async fn login<S: CredentialStore>(
    store: &S,
    config: &Config,
    password: Option<&str>,
) -> Result<AdminIdentity, AppError> {
    let password = require_password(password)?;

    let admin = match store.fetch_primary().await? {
        Some(admin) => admin,
        None => ensure_default(store, config).await?,
    };

    if admin.password.is_empty() {
        return Err(AppError::Configuration(
            "admin credential has no password set".to_string(),
        ));
    }

    // Plaintext exact-match comparison, preserved as the store's contract
    if admin.password != password {
        return Err(AppError::Authentication);
    }

    Ok(admin.into())
}

/// Reject a missing or empty password before any store access.
fn require_password(password: Option<&str>) -> Result<&str, AppError> {
    match password {
        Some(p) if !p.is_empty() => Ok(p),
        _ => Err(AppError::Validation("Missing required field: password".to_string())),
    }
}

/// Lower-case and trim an email for use as the identity key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
