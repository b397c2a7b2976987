//! Key-value store contract with sliding and absolute expiry.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::FreightResult;

/// Default sliding expiry: an entry idle this long is dropped.
pub const DEFAULT_SLIDING_EXPIRY: Duration = Duration::from_secs(60);

/// Default absolute expiry: an entry this old is dropped regardless of use.
pub const DEFAULT_ABSOLUTE_EXPIRY: Duration = Duration::from_secs(3600);

/// Expiry policy attached to a cache write.
///
/// An entry expires when either deadline passes. Reads refresh the sliding
/// deadline, never the absolute one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheExpiry {
    /// Maximum idle time between reads.
    pub sliding: Option<Duration>,
    /// Maximum lifetime from the write.
    pub absolute: Option<Duration>,
}

impl CacheExpiry {
    /// An entry that never expires.
    pub const NEVER: CacheExpiry = CacheExpiry {
        sliding: None,
        absolute: None,
    };

    /// Both deadlines in whole seconds; `0` disables a deadline.
    pub fn from_secs(sliding_secs: u64, absolute_secs: u64) -> Self {
        let non_zero = |secs: u64| (secs > 0).then(|| Duration::from_secs(secs));
        Self {
            sliding: non_zero(sliding_secs),
            absolute: non_zero(absolute_secs),
        }
    }
}

impl Default for CacheExpiry {
    fn default() -> Self {
        Self {
            sliding: Some(DEFAULT_SLIDING_EXPIRY),
            absolute: Some(DEFAULT_ABSOLUTE_EXPIRY),
        }
    }
}

/// A string-valued store with per-entry expiry.
///
/// Implementations must be shareable across threads; the engine holds one
/// behind an `Arc` and never assumes a particular backend.
pub trait KeyValueStore: Send + Sync {
    /// Returns the live value under `key`, refreshing its sliding deadline.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous entry.
    fn set(&self, key: &str, value: String, expiry: CacheExpiry);

    /// Removes `key`; returns `true` if a live entry was removed.
    fn remove(&self, key: &str) -> bool;

    /// Replaces the value under `key` with what `f` computes from the live
    /// one, as a single step: no other write to `key` lands between the read
    /// and the write. `f` is called exactly once; if it fails, the entry is
    /// left untouched.
    fn update(
        &self,
        key: &str,
        expiry: CacheExpiry,
        f: &mut dyn FnMut(Option<&str>) -> FreightResult<String>,
    ) -> FreightResult<()>;

    /// Returns `true` if a live entry exists under `key`. Counts as a read.
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Reads and deserializes the JSON value under `key`.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> FreightResult<Option<T>> {
    match store.get(key) {
        Some(json) => {
            debug!(key, "cache hit");
            Ok(Some(serde_json::from_str(&json)?))
        }
        None => {
            debug!(key, "cache miss");
            Ok(None)
        }
    }
}

/// Serializes `value` as JSON and stores it under `key`.
pub fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
    expiry: CacheExpiry,
) -> FreightResult<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, json, expiry);
    Ok(())
}

/// Atomically applies `f` to the JSON value under `key`, starting from
/// `T::default()` when the key is absent.
pub fn update_json<T, F>(
    store: &dyn KeyValueStore,
    key: &str,
    expiry: CacheExpiry,
    f: F,
) -> FreightResult<()>
where
    T: Serialize + DeserializeOwned + Default,
    F: FnOnce(&mut T),
{
    let mut f = Some(f);
    store.update(key, expiry, &mut |current| {
        let mut value: T = match current {
            Some(json) => serde_json::from_str(json)?,
            None => T::default(),
        };
        if let Some(f) = f.take() {
            f(&mut value);
        }
        Ok(serde_json::to_string(&value)?)
    })?;
    debug!(key, "cache entry updated");
    Ok(())
}
