//! In-process key-value store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use super::{CacheExpiry, KeyValueStore};
use crate::error::FreightResult;

#[derive(Debug)]
struct Entry {
    value: String,
    sliding: Option<Duration>,
    absolute_deadline: Option<Instant>,
    last_access: Instant,
}

impl Entry {
    fn new(value: String, expiry: CacheExpiry, now: Instant) -> Self {
        Self {
            value,
            sliding: expiry.sliding,
            absolute_deadline: expiry.absolute.and_then(|a| now.checked_add(a)),
            last_access: now,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        let past_absolute = self.absolute_deadline.is_some_and(|d| now >= d);
        let idle_too_long = self
            .sliding
            .is_some_and(|s| now.duration_since(self.last_access) >= s);
        past_absolute || idle_too_long
    }
}

/// A [`KeyValueStore`] kept in a mutex-guarded map.
///
/// Expired entries are dropped lazily on access or by
/// [`purge_expired`](Self::purge_expired).
///
/// # Examples
///
/// ```
/// use u_freight::cache::{CacheExpiry, KeyValueStore, MemoryStore};
///
/// let store = MemoryStore::new();
/// store.set("cities", "[\"A\"]".to_string(), CacheExpiry::default());
/// assert_eq!(store.get("cities").as_deref(), Some("[\"A\"]"));
/// assert!(store.remove("cities"));
/// assert!(store.get("cities").is_none());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// [`KeyValueStore::get`] evaluated at `now`.
    pub fn get_at(&self, key: &str, now: Instant) -> Option<String> {
        let mut entries = self.entries.lock();
        let expired = entries.get(key)?.is_expired(now);
        if expired {
            entries.remove(key);
            return None;
        }
        let entry = entries.get_mut(key)?;
        entry.last_access = now;
        Some(entry.value.clone())
    }

    /// [`KeyValueStore::set`] evaluated at `now`.
    pub fn set_at(&self, key: &str, value: String, expiry: CacheExpiry, now: Instant) {
        self.entries
            .lock()
            .insert(key.to_string(), Entry::new(value, expiry, now));
    }

    /// [`KeyValueStore::update`] evaluated at `now`.
    ///
    /// The map stays locked while `f` runs.
    pub fn update_at(
        &self,
        key: &str,
        expiry: CacheExpiry,
        now: Instant,
        f: &mut dyn FnMut(Option<&str>) -> FreightResult<String>,
    ) -> FreightResult<()> {
        let mut entries = self.entries.lock();
        let current = entries
            .get(key)
            .filter(|e| !e.is_expired(now))
            .map(|e| e.value.as_str());
        let value = f(current)?;
        entries.insert(key.to_string(), Entry::new(value, expiry, now));
        Ok(())
    }

    /// Drops every entry expired at `now`; returns how many were dropped.
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, e| !e.is_expired(now));
        before - entries.len()
    }

    /// Drops every entry expired now.
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.get_at(key, Instant::now())
    }

    fn set(&self, key: &str, value: String, expiry: CacheExpiry) {
        self.set_at(key, value, expiry, Instant::now());
    }

    fn update(
        &self,
        key: &str,
        expiry: CacheExpiry,
        f: &mut dyn FnMut(Option<&str>) -> FreightResult<String>,
    ) -> FreightResult<()> {
        self.update_at(key, expiry, Instant::now(), f)
    }

    fn contains_key(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        let expired = match entries.get(key) {
            Some(entry) => entry.is_expired(now),
            None => return false,
        };
        if expired {
            entries.remove(key);
            return false;
        }
        if let Some(entry) = entries.get_mut(key) {
            entry.last_access = now;
        }
        true
    }

    fn remove(&self, key: &str) -> bool {
        let now = Instant::now();
        match self.entries.lock().remove(key) {
            Some(entry) => !entry.is_expired(now),
            None => false,
        }
    }
}
