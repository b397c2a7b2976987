//! Freight service façade.
//!
//! Wires the distance source, cache, pricing, catalog and statistics
//! together behind the operations a transport API exposes.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::aggregation::TransportAggregator;
use crate::allocation::TruckAllocator;
use crate::cache::{get_json, set_json, CacheExpiry, KeyValueStore, MemoryStore};
use crate::catalog::ProductCatalog;
use crate::config::EngineConfig;
use crate::distance::DistanceMatrix;
use crate::error::{FreightError, FreightResult};
use crate::models::{Product, Stop, TruckAssignment};
use crate::pricing::{round_currency, PricingTable};
use crate::source::{CsvFileSource, DistanceSource};
use crate::statistics::{StatisticsStore, StatisticsView};

/// Cache key the parsed distance matrix is stored under.
pub const DISTANCE_TABLE_KEY: &str = "distance_table";

/// A point-to-point quote request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub first_city: String,
    pub last_city: String,
    /// Truck category label; an unknown label prices at zero.
    pub truck_type: String,
}

/// Distance and cost of one truck driving a point-to-point route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteQuote {
    pub quantity_km: u32,
    pub total_cost: f64,
}

/// What a caller gets back from costing a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportSummary {
    pub total_distance: u64,
    pub total_cost: f64,
    pub trucks: TruckAssignment,
}

/// Entry point for every freight operation.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_freight::cache::MemoryStore;
/// use u_freight::config::EngineConfig;
/// use u_freight::distance::DistanceMatrix;
/// use u_freight::models::{ProductLine, Stop};
/// use u_freight::service::{FreightService, RouteRequest};
///
/// let table = DistanceMatrix::from_table_str("A;B\n0;120\n120;0").unwrap();
/// let service = FreightService::new(
///     Arc::new(table),
///     Arc::new(MemoryStore::new()),
///     &EngineConfig::default(),
/// );
///
/// let quote = service.quote_route(&RouteRequest {
///     first_city: "A".into(),
///     last_city: "B".into(),
///     truck_type: "small".into(),
/// }).unwrap();
/// assert_eq!(quote.quantity_km, 120);
/// assert_eq!(quote.total_cost, 584.4);
///
/// let summary = service.calc_transport_values(&[
///     Stop::new("A"),
///     Stop::new("B").with_product(ProductLine::new(2, "Geladeira", 10, 60.0)),
/// ]).unwrap();
/// assert_eq!(summary.trucks.labels(), vec!["small"]);
/// assert_eq!(service.statistics().unwrap().len(), 1);
/// ```
pub struct FreightService {
    source: Arc<dyn DistanceSource>,
    cache: Arc<dyn KeyValueStore>,
    expiry: CacheExpiry,
    matrix: RwLock<Option<Arc<DistanceMatrix>>>,
    allocator: TruckAllocator,
    catalog: ProductCatalog,
    statistics: StatisticsStore,
}

impl FreightService {
    /// Creates a service reading distances from `source` and keeping the
    /// table, catalog and history in `cache`.
    pub fn new(
        source: Arc<dyn DistanceSource>,
        cache: Arc<dyn KeyValueStore>,
        config: &EngineConfig,
    ) -> Self {
        let expiry = config.cache.expiry();
        Self {
            source,
            catalog: ProductCatalog::new(Arc::clone(&cache), expiry),
            statistics: StatisticsStore::new(Arc::clone(&cache), expiry),
            cache,
            expiry,
            matrix: RwLock::new(None),
            allocator: TruckAllocator::new(config.pricing),
        }
    }

    /// Creates a service over the configured distance file and a fresh
    /// [`MemoryStore`].
    pub fn from_config(config: &EngineConfig) -> FreightResult<Self> {
        let path = config
            .distance_table
            .as_ref()
            .ok_or(FreightError::MissingSetting("distance_table"))?;
        Ok(Self::new(
            Arc::new(CsvFileSource::new(path)),
            Arc::new(MemoryStore::new()),
            config,
        ))
    }

    /// The distance matrix.
    ///
    /// Parsed once and shared while its cache entry lives. Once the entry
    /// expires or is removed, the next call takes the table from the cache
    /// again, or from the source if the cache has none.
    pub fn distance_matrix(&self) -> FreightResult<Arc<DistanceMatrix>> {
        if self.cache.contains_key(DISTANCE_TABLE_KEY) {
            if let Some(matrix) = self.matrix.read().as_ref() {
                return Ok(Arc::clone(matrix));
            }
        }

        let mut memo = self.matrix.write();
        let matrix = match get_json::<DistanceMatrix>(self.cache.as_ref(), DISTANCE_TABLE_KEY)? {
            Some(matrix) => {
                debug!("distance table taken from cache");
                matrix
            }
            None => {
                let matrix = self.source.load()?;
                set_json(self.cache.as_ref(), DISTANCE_TABLE_KEY, &matrix, self.expiry)?;
                info!(cities = matrix.size(), "distance table cached");
                matrix
            }
        };
        let matrix = Arc::new(matrix);
        *memo = Some(Arc::clone(&matrix));
        Ok(matrix)
    }

    /// City names in table order.
    pub fn cities(&self) -> FreightResult<Vec<String>> {
        Ok(self.distance_matrix()?.cities().to_vec())
    }

    /// The product catalog.
    pub fn products(&self) -> FreightResult<Vec<Product>> {
        self.catalog.products()
    }

    /// Distance and cost of one truck of `request.truck_type` between two
    /// cities.
    pub fn quote_route(&self, request: &RouteRequest) -> FreightResult<RouteQuote> {
        let matrix = self.distance_matrix()?;
        let quantity_km = matrix.distance_between(&request.first_city, &request.last_city)?;
        let price = self.pricing().price_per_km_for_label(&request.truck_type);
        Ok(RouteQuote {
            quantity_km,
            total_cost: round_currency(f64::from(quantity_km) * price),
        })
    }

    /// Costs a multi-stop shipment and records it in the statistics.
    pub fn calc_transport_values(&self, stops: &[Stop]) -> FreightResult<TransportSummary> {
        let matrix = self.distance_matrix()?;
        let aggregator = TransportAggregator::new(matrix.as_ref(), &self.allocator);
        let record = aggregator.compute_transport(stops, &self.statistics)?;
        Ok(TransportSummary {
            total_distance: record.total_km(),
            total_cost: record.total_cost(),
            trucks: record.trucks().clone(),
        })
    }

    /// Every recorded transport with its per-route cost breakdown.
    pub fn statistics(&self) -> FreightResult<Vec<StatisticsView>> {
        self.statistics.list_with_route_breakdown()
    }

    /// The underlying transport history.
    pub fn statistics_store(&self) -> &StatisticsStore {
        &self.statistics
    }

    /// Prices used by this service.
    pub fn pricing(&self) -> &PricingTable {
        self.allocator.pricing()
    }
}
