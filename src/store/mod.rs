//!
//! vitrine record store
//! --------------------
//! Durable mapping of user records keyed by email, persisted as a single
//! JSON array under the `users` key of a [`StorageBackend`]. The collection
//! is small by contract (capacity-bounded upstream), so every operation
//! reads or rewrites the whole array; there is no indexing and no partial
//! update. A corrupt persisted payload degrades to an empty collection and
//! is only logged, matching the recovery behavior of the storefront it
//! backs.
//!
//! The companion `currentUser` key holds the session copy and is owned by
//! `crate::session`, not by this store.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

mod backend;
pub use backend::{FileBackend, MemoryBackend, StorageBackend};

/// Persisted key holding the registration-ordered user array.
pub const USERS_KEY: &str = "users";
/// Persisted key holding the current session user; absent when anonymous.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// A registered user. Serde names follow the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub first_name: String,
    pub last_name: String,
    /// Unique key, stored trimmed and lowercased.
    pub email: String,
    pub mobile: String,
    /// Obfuscated via [`crate::codec::encode`]; never plaintext.
    pub password: String,
}

/// Handle over the persisted user collection. Cheap to clone; all clones
/// share the backend.
#[derive(Clone)]
pub struct UserStore {
    backend: Arc<dyn StorageBackend>,
}

impl UserStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// All records in insertion (registration) order. Missing key or corrupt
    /// JSON yields an empty collection; corruption is logged, never raised.
    pub fn list(&self) -> Vec<UserRecord> {
        let Some(raw) = self.backend.load(USERS_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<UserRecord>>(&raw) {
            Ok(users) => users,
            Err(e) => {
                warn!("corrupt user collection, degrading to empty: {}", e);
                Vec::new()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }

    /// Append a record. Capacity and uniqueness were already checked by the
    /// caller; this does not re-validate.
    pub fn append(&self, record: UserRecord) -> anyhow::Result<()> {
        let mut users = self.list();
        users.push(record);
        self.persist(&users)
    }

    /// Overwrite the record whose email matches `old_email_key`
    /// case-insensitively. Returns `false` without writing when no record
    /// matches.
    pub fn replace(&self, old_email_key: &str, record: UserRecord) -> anyhow::Result<bool> {
        let mut users = self.list();
        let Some(slot) = users
            .iter_mut()
            .find(|u| u.email.eq_ignore_ascii_case(old_email_key))
        else {
            return Ok(false);
        };
        *slot = record;
        self.persist(&users)?;
        Ok(true)
    }

    // Whole-collection rewrite; the array is the unit of persistence.
    fn persist(&self, users: &[UserRecord]) -> anyhow::Result<()> {
        let raw = serde_json::to_string(users)?;
        self.backend.save(USERS_KEY, &raw)?;
        debug!("store.persist users={}", users.len());
        Ok(())
    }
}
