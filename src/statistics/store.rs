//! Append-only transport history.

use std::sync::Arc;

use tracing::debug;

use super::StatisticsView;
use crate::cache::{get_json, update_json, CacheExpiry, KeyValueStore, MemoryStore};
use crate::error::FreightResult;
use crate::models::TransportRecord;

/// Cache key the history is stored under by default.
pub const HISTORY_KEY: &str = "transport_history";

/// Insertion-ordered history of transport records, kept in a
/// [`KeyValueStore`].
///
/// Appends go through [`KeyValueStore::update`], so every store sharing a
/// backend and key, in this service or another, sees one serialized
/// history. Records live as long as the backing entry's expiry allows.
///
/// # Examples
///
/// ```
/// use u_freight::models::{ShipmentLeg, TransportRecord, TruckAssignment};
/// use u_freight::statistics::StatisticsStore;
///
/// let store = StatisticsStore::in_memory();
/// assert!(store.list_with_route_breakdown().unwrap().is_empty());
///
/// let legs = vec![ShipmentLeg::new("A", "B", 10, 1, 1.0)];
/// store.append(TransportRecord::new(legs, 48.7, TruckAssignment::new(), 4.87)).unwrap();
/// let views = store.list_with_route_breakdown().unwrap();
/// assert_eq!(views.len(), 1);
/// assert_eq!(views[0].routes[0].cost, 48.7);
/// ```
pub struct StatisticsStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    expiry: CacheExpiry,
}

impl StatisticsStore {
    /// Creates a store writing under [`HISTORY_KEY`] with `expiry`.
    pub fn new(backend: Arc<dyn KeyValueStore>, expiry: CacheExpiry) -> Self {
        Self {
            backend,
            key: HISTORY_KEY.to_string(),
            expiry,
        }
    }

    /// A store over a private [`MemoryStore`] whose history never expires.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()), CacheExpiry::NEVER)
    }

    /// Uses `key` instead of [`HISTORY_KEY`].
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Appends `record` after every previously stored one.
    pub fn append(&self, record: TransportRecord) -> FreightResult<()> {
        update_json(
            self.backend.as_ref(),
            &self.key,
            self.expiry,
            |history: &mut Vec<TransportRecord>| history.push(record),
        )?;
        debug!(key = %self.key, "transport record appended");
        Ok(())
    }

    /// Every stored record, oldest first.
    pub fn records(&self) -> FreightResult<Vec<TransportRecord>> {
        self.load()
    }

    /// Number of stored records.
    pub fn len(&self) -> FreightResult<usize> {
        Ok(self.records()?.len())
    }

    /// Returns `true` if no record is stored.
    pub fn is_empty(&self) -> FreightResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Forgets every record; returns `true` if there was a history.
    pub fn clear(&self) -> bool {
        self.backend.remove(&self.key)
    }

    /// One [`StatisticsView`] per stored record, oldest first.
    pub fn list_with_route_breakdown(&self) -> FreightResult<Vec<StatisticsView>> {
        Ok(self
            .records()?
            .iter()
            .map(StatisticsView::from_record)
            .collect())
    }

    fn load(&self) -> FreightResult<Vec<TransportRecord>> {
        Ok(get_json(self.backend.as_ref(), &self.key)?.unwrap_or_default())
    }
}

impl std::fmt::Debug for StatisticsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticsStore")
            .field("key", &self.key)
            .field("expiry", &self.expiry)
            .finish_non_exhaustive()
    }
}
