//! Finalized transport record.

use serde::{Deserialize, Serialize};

use super::{ShipmentLeg, TruckAssignment};
use crate::error::{FreightError, FreightResult};

/// The immutable result of costing one shipment.
///
/// Totals are derived from the legs and trucks at construction, so
/// `total_km`, `total_product_count`, `total_weight_kg` and `truck_count`
/// always agree with them.
///
/// # Examples
///
/// ```
/// use u_freight::models::{ShipmentLeg, TransportRecord, TruckAssignment, TruckCategory};
///
/// let legs = vec![
///     ShipmentLeg::new("A", "B", 100, 1, 500.0),
///     ShipmentLeg::new("B", "C", 150, 3, 3000.0),
/// ];
/// let trucks = TruckAssignment::from(vec![TruckCategory::Medium]);
/// let record = TransportRecord::new(legs, 2980.0, trucks, 11.92);
/// assert_eq!(record.total_km(), 250);
/// assert_eq!(record.truck_count(), 1);
/// assert!((record.average_cost_per_km().unwrap() - 11.92).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportRecord {
    total_cost: f64,
    total_km: u64,
    truck_count: usize,
    total_product_count: u64,
    total_weight_kg: f64,
    average_cost_per_km: Option<f64>,
    total_truck_price_sum: f64,
    legs: Vec<ShipmentLeg>,
    trucks: TruckAssignment,
}

impl TransportRecord {
    /// Builds a record from its legs and allocation outcome.
    pub fn new(
        legs: Vec<ShipmentLeg>,
        total_cost: f64,
        trucks: TruckAssignment,
        total_truck_price_sum: f64,
    ) -> Self {
        let total_km: u64 = legs.iter().map(|l| u64::from(l.distance_km())).sum();
        let total_product_count: u64 = legs.iter().map(ShipmentLeg::product_count).sum();
        let total_weight_kg: f64 = legs.iter().map(ShipmentLeg::total_weight_kg).sum();
        let average_cost_per_km = if total_km == 0 {
            None
        } else {
            Some(total_cost / total_km as f64)
        };

        Self {
            total_cost,
            total_km,
            truck_count: trucks.len(),
            total_product_count,
            total_weight_kg,
            average_cost_per_km,
            total_truck_price_sum,
            legs,
            trucks,
        }
    }

    /// Total allocation cost.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Sum of leg distances.
    pub fn total_km(&self) -> u64 {
        self.total_km
    }

    /// Number of trucks assigned.
    pub fn truck_count(&self) -> usize {
        self.truck_count
    }

    /// Sum of units over all legs.
    pub fn total_product_count(&self) -> u64 {
        self.total_product_count
    }

    /// Sum of kilograms over all legs.
    pub fn total_weight_kg(&self) -> f64 {
        self.total_weight_kg
    }

    /// `total_cost / total_km`.
    ///
    /// Fails with [`FreightError::DivisionUndefined`] when no kilometer was
    /// traveled.
    pub fn average_cost_per_km(&self) -> FreightResult<f64> {
        self.average_cost_per_km.ok_or(FreightError::DivisionUndefined)
    }

    /// Sum of the per-km prices of every assigned truck.
    pub fn total_truck_price_sum(&self) -> f64 {
        self.total_truck_price_sum
    }

    /// Legs in route order.
    pub fn legs(&self) -> &[ShipmentLeg] {
        &self.legs
    }

    /// Trucks in assignment order.
    pub fn trucks(&self) -> &TruckAssignment {
        &self.trucks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TruckCategory;

    #[test]
    fn test_totals_follow_legs() {
        let legs = vec![
            ShipmentLeg::new("A", "B", 40, 2, 20.0),
            ShipmentLeg::new("B", "C", 60, 5, 80.0),
        ];
        let trucks = TruckAssignment::from(vec![TruckCategory::Small]);
        let r = TransportRecord::new(legs, 487.0, trucks, 4.87);
        assert_eq!(r.total_km(), 100);
        assert_eq!(r.total_product_count(), 7);
        assert!((r.total_weight_kg() - 100.0).abs() < 1e-10);
        assert_eq!(r.truck_count(), 1);
        assert_eq!(r.legs().len(), 2);
        assert!((r.average_cost_per_km().expect("km > 0") - 4.87).abs() < 1e-10);
    }

    #[test]
    fn test_zero_km_average_is_undefined() {
        let r = TransportRecord::new(Vec::new(), 0.0, TruckAssignment::new(), 0.0);
        assert_eq!(r.total_km(), 0);
        assert_eq!(r.truck_count(), 0);
        assert!(matches!(
            r.average_cost_per_km(),
            Err(FreightError::DivisionUndefined)
        ));
    }

    #[test]
    fn test_serde_roundtrip_keeps_undefined_average() {
        let r = TransportRecord::new(
            vec![ShipmentLeg::new("A", "A", 0, 1, 1.0)],
            4.87,
            TruckAssignment::from(vec![TruckCategory::Small]),
            4.87,
        );
        let json = serde_json::to_string(&r).expect("serialize");
        let back: TransportRecord = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(r, back);
        assert!(back.average_cost_per_km().is_err());
    }
}
