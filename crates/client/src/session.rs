//! Durable session persistence plus the time-boxed profile cache.
//!
//! The store persists exactly one record: the access token and the
//! profile it belongs to. A [`SessionStorage`] implementation decides
//! where that record lives (a JSON file for the CLI, memory for tests);
//! [`SessionStore`] layers the 5-minute profile cache and the clearing
//! semantics on top.
//!
//! Reads are deliberately forgiving: a missing or corrupt record means
//! "not signed in", never an error. Writes surface their failures.

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use scholarbase_core::{Account, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// How long a fetched profile stays fresh, in seconds.
pub const PROFILE_CACHE_TTL_SECS: i64 = 300;

/// The one record that persists across restarts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub user: Account,
}

/// Where the session record lives.
pub trait SessionStorage: Send + Sync {
    fn write(&self, session: &StoredSession) -> Result<(), SessionError>;
    fn read(&self) -> Result<Option<StoredSession>, SessionError>;
    fn remove(&self) -> Result<(), SessionError>;
}

/* --------------------------------------------------------------------------
Storage implementations
-------------------------------------------------------------------------- */

/// In-process storage for tests and ephemeral runs.
#[derive(Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<StoredSession>>,
}

impl SessionStorage for MemorySessionStorage {
    fn write(&self, session: &StoredSession) -> Result<(), SessionError> {
        *self.slot.lock().expect("session slot lock poisoned") = Some(session.clone());
        Ok(())
    }

    fn read(&self) -> Result<Option<StoredSession>, SessionError> {
        Ok(self.slot.lock().expect("session slot lock poisoned").clone())
    }

    fn remove(&self) -> Result<(), SessionError> {
        *self.slot.lock().expect("session slot lock poisoned") = None;
        Ok(())
    }
}

/// Single-file JSON storage, the durable analog of the browser's
/// localStorage keys.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStorage for FileSessionStorage {
    fn write(&self, session: &StoredSession) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    fn read(&self) -> Result<Option<StoredSession>, SessionError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                // A half-written or stale-format file reads as signed out.
                tracing::warn!(path = %self.path.display(), error = %e, "Discarding unreadable session file");
                Ok(None)
            }
        }
    }

    fn remove(&self) -> Result<(), SessionError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/* --------------------------------------------------------------------------
Session store
-------------------------------------------------------------------------- */

struct CachedProfile {
    user: Account,
    fetched_at: Timestamp,
}

/// Persistence façade the auth layer talks to.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    profile_cache: Mutex<Option<CachedProfile>>,
}

impl SessionStore {
    pub fn new(storage: Box<dyn SessionStorage>) -> Self {
        Self {
            storage,
            profile_cache: Mutex::new(None),
        }
    }

    /// Memory-backed store.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemorySessionStorage::default()))
    }

    /// File-backed store at `path`.
    pub fn on_disk(path: PathBuf) -> Self {
        Self::new(Box::new(FileSessionStorage::new(path)))
    }

    /// Persist a fresh session (token and profile together).
    pub fn save(&self, access_token: &str, user: &Account) -> Result<(), SessionError> {
        self.storage.write(&StoredSession {
            access_token: access_token.to_string(),
            user: user.clone(),
        })
    }

    /// Read the persisted session. Read failures log and count as
    /// signed out rather than propagating.
    pub fn load(&self) -> Option<StoredSession> {
        match self.storage.read() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Session read failed; treating as signed out");
                None
            }
        }
    }

    pub fn token(&self) -> Option<String> {
        self.load().map(|s| s.access_token)
    }

    pub fn user(&self) -> Option<Account> {
        self.load().map(|s| s.user)
    }

    /// True iff a token is persisted. No validation happens here.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Drop the persisted session and the profile cache. Clearing an
    /// already-empty store succeeds.
    pub fn clear(&self) -> Result<(), SessionError> {
        *self.profile_cache.lock().expect("profile cache lock poisoned") = None;
        self.storage.remove()
    }

    /* ---- profile cache ---- */

    /// The cached profile, if fetched less than the TTL ago.
    pub fn cached_profile(&self) -> Option<Account> {
        self.cached_profile_at(Utc::now())
    }

    pub fn cached_profile_at(&self, now: Timestamp) -> Option<Account> {
        let cache = self.profile_cache.lock().expect("profile cache lock poisoned");
        cache.as_ref().and_then(|entry| {
            let age = now.signed_duration_since(entry.fetched_at);
            (age.num_seconds() < PROFILE_CACHE_TTL_SECS).then(|| entry.user.clone())
        })
    }

    /// Record a freshly fetched profile: cache it and overwrite the
    /// persisted profile (the token, if any, stays as it was).
    pub fn store_profile(&self, user: &Account) -> Result<(), SessionError> {
        self.store_profile_at(user, Utc::now())
    }

    pub fn store_profile_at(&self, user: &Account, now: Timestamp) -> Result<(), SessionError> {
        *self.profile_cache.lock().expect("profile cache lock poisoned") = Some(CachedProfile {
            user: user.clone(),
            fetched_at: now,
        });
        if let Some(session) = self.load() {
            self.storage.write(&StoredSession {
                access_token: session.access_token,
                user: user.clone(),
            })?;
        }
        Ok(())
    }
}
