//! Administrator credential models and API request/response types.
//!
//! This module defines:
//! - `Admin`: Database entity holding the stored credential
//! - `AdminRecord`: Sanitized record returned by the list/upsert endpoints
//! - `AdminIdentity`: Public name/email pair returned on login
//! - Request bodies for login, upsert and seed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An administrator credential record from the database.
///
/// # Database Table
///
/// Maps to the `admins` table. Email is the identity key and is stored
/// lower-cased; the unique constraint therefore holds case-insensitively.
///
/// # Password Storage
///
/// The password is stored and compared as plaintext. This mirrors the
/// store's long-standing behavior and is a documented security smell;
/// hashing it would break the exact-match login contract. Callers must
/// never let this struct cross the API boundary; use [`AdminRecord`] or
/// [`AdminIdentity`] instead.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Admin {
    /// Unique identifier for this credential
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Normalized (lower-cased) email, the identity key
    pub email: String,

    /// Plaintext password, compared by exact string equality
    pub password: String,

    /// Timestamp when the record was first inserted
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last upsert; bumped on every overwrite
    pub updated_at: DateTime<Utc>,
}

/// Sanitized credential record: everything except the password.
///
/// This is the only full-record shape that leaves the service layer.
#[derive(Debug, Clone, Serialize)]
pub struct AdminRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Strip the password from a stored credential.
impl From<Admin> for AdminRecord {
    fn from(admin: Admin) -> Self {
        Self {
            id: admin.id,
            name: admin.name,
            email: admin.email,
            created_at: admin.created_at,
            updated_at: admin.updated_at,
        }
    }
}

/// Public identity returned on successful login, display fields only.
#[derive(Debug, Clone, Serialize)]
pub struct AdminIdentity {
    pub name: String,
    pub email: String,
}

impl From<Admin> for AdminIdentity {
    fn from(admin: Admin) -> Self {
        Self {
            name: admin.name,
            email: admin.email,
        }
    }
}

/// Request body for `POST /api/admin/login`.
///
/// The password field is optional at the parse level so that an absent
/// field surfaces as a 400 validation error rather than a deserialization
/// failure.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// Request body for `POST /api/admin/records` (authenticated upsert).
#[derive(Debug, Deserialize)]
pub struct UpsertAdminRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

/// Request body for `POST /api/admin/seed`.
///
/// Same fields as the upsert, plus the shared secret carried in the body
/// instead of a header.
#[derive(Debug, Deserialize)]
pub struct SeedAdminRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub token: Option<String>,
}
