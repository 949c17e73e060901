use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

pub const EVENTS_KEY: &str = "cache_events";
pub const EVENT_DETAILS_PREFIX: &str = "cache_event_";
pub const SETTINGS_KEY: &str = "cache_settings";
pub const USER_RESERVATIONS_PREFIX: &str = "cache_user_reservations_";

struct CacheEntry {
    data: Value,
    expires_at: DateTime<Utc>,
}

/// Process-wide key-value cache with per-entry expiry. Entries are
/// disposable: a miss just triggers a refetch, so every failure path
/// (poisoned lock, serialization error) is logged and degrades to a miss
/// instead of surfacing an error.
pub struct CacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the payload only while the entry is unexpired. Stale entries
    /// are ignored, not eagerly deleted.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let guard = match self.entries.read() {
            Ok(guard) => guard,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                return None;
            }
        };

        let entry = guard.get(key)?;
        if Utc::now() >= entry.expires_at {
            return None;
        }

        match serde_json::from_value(entry.data.clone()) {
            Ok(data) => Some(data),
            Err(e) => {
                warn!("Cache entry {} failed to deserialize: {}", key, e);
                None
            }
        }
    }

    pub fn set<T: Serialize>(&self, key: &str, data: &T, ttl_minutes: i64) {
        self.set_until(key, data, Utc::now() + Duration::minutes(ttl_minutes));
    }

    pub fn set_until<T: Serialize>(&self, key: &str, data: &T, expires_at: DateTime<Utc>) {
        let value = match serde_json::to_value(data) {
            Ok(value) => value,
            Err(e) => {
                warn!("Cache entry {} failed to serialize: {}", key, e);
                return;
            }
        };

        match self.entries.write() {
            Ok(mut guard) => {
                guard.insert(key.to_string(), CacheEntry { data: value, expires_at });
            }
            Err(e) => warn!("Cache write failed for {}: {}", key, e),
        }
    }

    pub fn remove(&self, key: &str) {
        match self.entries.write() {
            Ok(mut guard) => {
                guard.remove(key);
            }
            Err(e) => warn!("Cache remove failed for {}: {}", key, e),
        }
    }

    /// Deletes every entry whose key starts with `prefix`; used for
    /// per-resource key families such as one entry per event id.
    pub fn invalidate_by_prefix(&self, prefix: &str) {
        match self.entries.write() {
            Ok(mut guard) => {
                guard.retain(|key, _| !key.starts_with(prefix));
            }
            Err(e) => warn!("Cache prefix invalidation failed for {}: {}", prefix, e),
        }
    }

    pub fn clear_all(&self) {
        match self.entries.write() {
            Ok(mut guard) => guard.clear(),
            Err(e) => warn!("Cache clear failed: {}", e),
        }
    }
}
