//! Client-held admin session gate.
//!
//! A successful login does not create any server-side session. Instead the
//! client persists a small artifact (an absolute expiry plus display-only
//! name/email) under a fixed key, and every restricted view checks it
//! locally before rendering. This module is that artifact and check,
//! expressed over an injectable [`SessionStorage`] so the backing store can
//! be browser local storage in the real client and an in-memory map in
//! tests.
//!
//! The artifact carries no signature or server verification: anyone with
//! access to the storage can fabricate an "active" session. That is the
//! documented trust model of this tool (a convenience gate for a single
//! operator), preserved here rather than silently hardened.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed storage key for the session artifact.
pub const SESSION_KEY: &str = "wanderwise_admin_session";

/// Session lifetime: 5 days from login, no refresh or sliding expiry.
pub const SESSION_TTL_DAYS: i64 = 5;

/// The persisted session artifact.
///
/// `admin_name`/`admin_email` are display-only and never re-verified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub expires_at: DateTime<Utc>,
    pub admin_name: Option<String>,
    pub admin_email: Option<String>,
}

/// Key-value storage the session gate reads and writes.
///
/// The production client backs this with browser local storage; tests use
/// [`MemoryStorage`].
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn remove(&self, key: &str);
}

/// In-memory [`SessionStorage`] backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|map| map.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut map) = self.entries.lock() {
            map.insert(key.to_string(), value);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.entries.lock() {
            map.remove(key);
        }
    }
}

/// The session gate: persist on login, check on every restricted view,
/// clear on logout.
///
/// State machine: `LoggedOut → (login) → Active(expires_at) → (expiry or
/// clear) → LoggedOut`. Each gate instance reads storage independently;
/// logout through one instance is observed by others on their next check.
pub struct SessionGate<S> {
    storage: S,
}

impl<S: SessionStorage> SessionGate<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Persist a fresh session for the given admin, expiring a fixed TTL
    /// from now.
    pub fn persist(&self, admin_name: Option<&str>, admin_email: Option<&str>) {
        self.persist_at(admin_name, admin_email, Utc::now());
    }

    /// Clock-injected variant of [`persist`](Self::persist).
    pub fn persist_at(
        &self,
        admin_name: Option<&str>,
        admin_email: Option<&str>,
        now: DateTime<Utc>,
    ) {
        let record = SessionRecord {
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
            admin_name: admin_name.map(str::to_string),
            admin_email: admin_email.map(str::to_string),
        };
        // Serialization of this struct cannot fail; guard anyway and leave
        // storage untouched rather than writing garbage.
        if let Ok(json) = serde_json::to_string(&record) {
            self.storage.set(SESSION_KEY, json);
        }
    }

    /// Whether an unexpired session is present.
    ///
    /// Fail-closed: absence, unparseable JSON, or an expired timestamp all
    /// read as inactive.
    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    /// Clock-injected variant of [`is_active`](Self::is_active).
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.current_at(now).is_some()
    }

    /// The current session record, if present and unexpired.
    pub fn current_at(&self, now: DateTime<Utc>) -> Option<SessionRecord> {
        let raw = self.storage.get(SESSION_KEY)?;
        let record: SessionRecord = serde_json::from_str(&raw).ok()?;
        if record.expires_at > now {
            Some(record)
        } else {
            None
        }
    }

    /// Remove the session artifact (logout).
    pub fn clear(&self) {
        self.storage.remove(SESSION_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> SessionGate<MemoryStorage> {
        SessionGate::new(MemoryStorage::new())
    }

    #[test]
    fn fresh_session_is_active() {
        let gate = gate();
        let now = Utc::now();
        gate.persist_at(Some("Administrator"), Some("admin@example.com"), now);
        assert!(gate.is_active_at(now));

        let record = gate.current_at(now).expect("record present");
        assert_eq!(record.admin_name.as_deref(), Some("Administrator"));
        assert_eq!(record.expires_at, now + Duration::days(SESSION_TTL_DAYS));
    }

    #[test]
    fn session_expires_after_ttl() {
        let gate = gate();
        let now = Utc::now();
        gate.persist_at(None, None, now);

        // Just inside the window
        assert!(gate.is_active_at(now + Duration::days(SESSION_TTL_DAYS) - Duration::seconds(1)));
        // At and beyond the boundary
        assert!(!gate.is_active_at(now + Duration::days(SESSION_TTL_DAYS)));
        assert!(!gate.is_active_at(now + Duration::days(30)));
    }

    #[test]
    fn clear_deactivates_immediately() {
        let gate = gate();
        let now = Utc::now();
        gate.persist_at(Some("Administrator"), None, now);
        assert!(gate.is_active_at(now));

        gate.clear();
        assert!(!gate.is_active_at(now));
    }

    #[test]
    fn absent_session_is_inactive() {
        assert!(!gate().is_active_at(Utc::now()));
    }

    #[test]
    fn garbage_in_storage_reads_as_inactive() {
        let storage = MemoryStorage::new();
        storage.set(SESSION_KEY, "not json at all".to_string());
        let gate = SessionGate::new(storage);
        assert!(!gate.is_active_at(Utc::now()));
    }

    #[test]
    fn two_gates_share_storage_state() {
        // Two "tabs" over the same storage: logout in one is seen by the
        // other on its next check.
        let storage = std::sync::Arc::new(MemoryStorage::new());

        struct Shared(std::sync::Arc<MemoryStorage>);
        impl SessionStorage for Shared {
            fn get(&self, key: &str) -> Option<String> {
                self.0.get(key)
            }
            fn set(&self, key: &str, value: String) {
                self.0.set(key, value);
            }
            fn remove(&self, key: &str) {
                self.0.remove(key);
            }
        }

        let tab_a = SessionGate::new(Shared(storage.clone()));
        let tab_b = SessionGate::new(Shared(storage));

        let now = Utc::now();
        tab_a.persist_at(None, None, now);
        assert!(tab_b.is_active_at(now));

        tab_b.clear();
        assert!(!tab_a.is_active_at(now));
    }
}
