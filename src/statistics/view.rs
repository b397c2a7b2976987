//! Read-side projection of transport records.

use serde::{Deserialize, Serialize};

use crate::models::TransportRecord;
use crate::pricing::round_currency;

/// Cost attributed to one leg of a stored transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCost {
    /// Leg origin.
    pub first_city: String,
    /// Leg destination.
    pub last_city: String,
    /// `distance_km × total_truck_price_sum` of the owning record.
    pub cost: f64,
}

/// Summary of one stored transport with its per-leg cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsView {
    /// Allocation cost of the whole transport.
    pub total_cost: f64,
    /// Sum of leg distances.
    pub total_km: u64,
    /// Trucks assigned.
    pub truck_count: usize,
    /// Units delivered over all legs.
    pub total_product_count: u64,
    /// Kilograms delivered over all legs.
    pub total_weight_kg: f64,
    /// `None` when the transport covered 0 km.
    pub average_cost_per_km: Option<f64>,
    /// One entry per leg, in route order.
    pub routes: Vec<RouteCost>,
}

impl StatisticsView {
    /// Projects a record.
    ///
    /// Each leg is charged its distance times the sum of the per-km prices
    /// of *all* trucks in the shipment, not a proportional share.
    pub fn from_record(record: &TransportRecord) -> Self {
        let price_sum = record.total_truck_price_sum();
        let routes = record
            .legs()
            .iter()
            .map(|leg| RouteCost {
                first_city: leg.origin_city().to_string(),
                last_city: leg.destination_city().to_string(),
                cost: round_currency(f64::from(leg.distance_km()) * price_sum),
            })
            .collect();

        Self {
            total_cost: record.total_cost(),
            total_km: record.total_km(),
            truck_count: record.truck_count(),
            total_product_count: record.total_product_count(),
            total_weight_kg: record.total_weight_kg(),
            average_cost_per_km: record.average_cost_per_km().ok(),
            routes,
        }
    }
}

impl From<&TransportRecord> for StatisticsView {
    fn from(record: &TransportRecord) -> Self {
        Self::from_record(record)
    }
}
