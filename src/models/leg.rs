//! Shipment leg type.

use serde::{Deserialize, Serialize};

/// One origin→destination segment of a multi-stop shipment.
///
/// Counts and weights describe what is delivered at the destination.
///
/// # Examples
///
/// ```
/// use u_freight::models::ShipmentLeg;
///
/// let leg = ShipmentLeg::new("A", "B", 100, 5, 500.0);
/// assert_eq!(leg.origin_city(), "A");
/// assert_eq!(leg.distance_km(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentLeg {
    origin_city: String,
    destination_city: String,
    distance_km: u32,
    product_count: u64,
    total_weight_kg: f64,
}

impl ShipmentLeg {
    /// Creates a leg.
    pub fn new(
        origin_city: impl Into<String>,
        destination_city: impl Into<String>,
        distance_km: u32,
        product_count: u64,
        total_weight_kg: f64,
    ) -> Self {
        Self {
            origin_city: origin_city.into(),
            destination_city: destination_city.into(),
            distance_km,
            product_count,
            total_weight_kg,
        }
    }

    /// City the leg departs from.
    pub fn origin_city(&self) -> &str {
        &self.origin_city
    }

    /// City the leg arrives at.
    pub fn destination_city(&self) -> &str {
        &self.destination_city
    }

    /// Leg length in kilometers.
    pub fn distance_km(&self) -> u32 {
        self.distance_km
    }

    /// Units delivered at the destination.
    pub fn product_count(&self) -> u64 {
        self.product_count
    }

    /// Kilograms delivered at the destination.
    pub fn total_weight_kg(&self) -> f64 {
        self.total_weight_kg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leg_accessors() {
        let leg = ShipmentLeg::new("RECIFE", "NATAL", 297, 12, 730.5);
        assert_eq!(leg.origin_city(), "RECIFE");
        assert_eq!(leg.destination_city(), "NATAL");
        assert_eq!(leg.distance_km(), 297);
        assert_eq!(leg.product_count(), 12);
        assert!((leg.total_weight_kg() - 730.5).abs() < 1e-10);
    }

    #[test]
    fn test_leg_equality() {
        let a = ShipmentLeg::new("A", "B", 1, 1, 1.0);
        let b = a.clone();
        assert_eq!(a, b);
    }
}
