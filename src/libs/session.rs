//! Session Store: the client-held evidence of an authenticated identity.
//!
//! The store keeps at most one [`Session`] under the `currentUser` key of a
//! [`KeyValueStore`]. Entries carry an expiry instant; an expired entry reads
//! as absent and is dropped on access. Holding a session means the client
//! *believes* it is signed in. Only a successful identity check against the
//! remote authority confirms it.
//!
//! Two backends are provided:
//!
//! - [`FileStore`]: encrypted files in the application data directory
//! - [`MemoryStore`]: process-local map, nothing survives a restart

use super::data_storage::DataStorage;
use super::secret::Cipher;
use crate::api::{ApiResponse, SyncError};
use anyhow::Result;
use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::time::Duration;
use tracing::{debug, warn};

/// Key under which the session is persisted.
pub const SESSION_KEY: &str = "currentUser";

/// Session lifetime when the configuration does not say otherwise.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Identity payload returned by login or signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque identity as returned by the remote authority.
    pub identity: Value,
    /// Credential attached to every subsequent request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

impl Session {
    pub fn new(identity: Value, credential: Option<String>) -> Self {
        Self { identity, credential }
    }

    /// Builds a session from a successful login or signup response.
    ///
    /// The credential is the `Set-Cookie` pair when the server sent one,
    /// otherwise a top-level `token` string in the payload. An empty body
    /// yields a `null` identity.
    pub fn from_response(response: &ApiResponse) -> Result<Self, SyncError> {
        let identity = if response.body.trim().is_empty() {
            Value::Null
        } else {
            response.json::<Value>()?
        };
        let credential = response
            .set_cookie
            .clone()
            .or_else(|| identity.get("token").and_then(Value::as_str).map(str::to_string));

        Ok(Self { identity, credential })
    }

    /// The account email, when the identity payload exposes one.
    pub fn email(&self) -> Option<&str> {
        self.identity.get("email").and_then(Value::as_str)
    }
}

/// A string key/value store whose entries expire.
pub trait KeyValueStore: Send + Sync {
    /// Stores `value` under `key` for `ttl`, replacing any previous value.
    fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Reads `key`; `None` if absent or expired.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Entry {
    value: String,
    expires_at: DateTime<Utc>,
}

impl Entry {
    fn new(value: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self {
            value: value.to_string(),
            expires_at,
        }
    }

    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries.lock().insert(key.to_string(), Entry::new(value, ttl));
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some(entry) if entry.is_expired() => {
                entries.remove(key);
                Ok(None)
            }
            Some(entry) => Ok(Some(entry.value.clone())),
            None => Ok(None),
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// Encrypted one-file-per-key store in the application data directory.
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    storage: DataStorage,
    cipher: Cipher,
}

impl FileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_storage(storage: DataStorage) -> Self {
        Self {
            storage,
            cipher: Cipher::default(),
        }
    }

    fn file_name(key: &str) -> String {
        format!(".{}", key)
    }

    fn read_entry(&self, contents: &str) -> Result<Entry> {
        let json = self.cipher.decrypt(contents)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl KeyValueStore for FileStore {
    fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let path = self.storage.get_path(&Self::file_name(key))?;
        let json = serde_json::to_string(&Entry::new(value, ttl))?;
        fs::write(path, self.cipher.encrypt(&json)?)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.storage.get_path(&Self::file_name(key))?;
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        match self.read_entry(&contents) {
            Ok(entry) if !entry.is_expired() => Ok(Some(entry.value)),
            Ok(_) => {
                debug!(key, "stored value expired");
                fs::remove_file(&path)?;
                Ok(None)
            }
            Err(err) => {
                warn!(key, error = %err, "discarding unreadable stored value");
                fs::remove_file(&path)?;
                Ok(None)
            }
        }
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.storage.get_path(&Self::file_name(key))?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

pub struct SessionStore {
    store: Box<dyn KeyValueStore>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(store: impl KeyValueStore + 'static, ttl: Duration) -> Self {
        Self {
            store: Box::new(store),
            ttl,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), DEFAULT_SESSION_TTL)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Persists `session`, overwriting any existing one.
    pub fn set_session(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.store.put(SESSION_KEY, &json, self.ttl)
    }

    /// Reads the current session.
    ///
    /// Storage or decoding problems are logged and reported as "no session";
    /// an unreadable session is as good as none.
    pub fn get_session(&self) -> Option<Session> {
        let json = match self.store.get(SESSION_KEY) {
            Ok(json) => json?,
            Err(err) => {
                warn!(error = %err, "failed to read session");
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, "stored session is malformed");
                None
            }
        }
    }

    /// Removes the session. Idempotent.
    pub fn clear_session(&self) -> Result<()> {
        self.store.remove(SESSION_KEY)
    }

    pub fn has_session(&self) -> bool {
        self.get_session().is_some()
    }
}
