//! Truck category price table.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::TruckCategory;

/// Rounds a monetary amount to 2 decimals, ties to even.
///
/// Every cost the crate reports goes through this function.
///
/// ```
/// use u_freight::pricing::round_currency;
///
/// assert_eq!(round_currency(12.345_1), 12.35);
/// assert_eq!(round_currency(0.125), 0.12);
/// assert_eq!(round_currency(0.375), 0.38);
/// ```
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round_ties_even() / 100.0
}

/// Price per kilometer for each truck category.
///
/// # Examples
///
/// ```
/// use u_freight::models::TruckCategory;
/// use u_freight::pricing::PricingTable;
///
/// let prices = PricingTable::default();
/// assert_eq!(prices.price_per_km(TruckCategory::Large), 27.44);
/// assert_eq!(prices.price_per_km_for_label("medium"), 11.92);
/// assert_eq!(prices.price_per_km_for_label("bicycle"), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingTable {
    small: f64,
    medium: f64,
    large: f64,
}

impl PricingTable {
    /// Creates a table with explicit prices.
    pub fn new(small: f64, medium: f64, large: f64) -> Self {
        Self {
            small,
            medium,
            large,
        }
    }

    /// Price per km of one truck of `category`.
    pub fn price_per_km(&self, category: TruckCategory) -> f64 {
        match category {
            TruckCategory::Small => self.small,
            TruckCategory::Medium => self.medium,
            TruckCategory::Large => self.large,
        }
    }

    /// Price per km for a category label.
    ///
    /// An unrecognized label prices at `0.0` instead of failing.
    pub fn price_per_km_for_label(&self, label: &str) -> f64 {
        match label.parse::<TruckCategory>() {
            Ok(category) => self.price_per_km(category),
            Err(_) => {
                warn!(label, "unknown truck category, pricing at 0");
                0.0
            }
        }
    }

    /// Rounded cost of driving one truck of `category` for `distance_km`.
    pub fn trip_cost(&self, category: TruckCategory, distance_km: f64) -> f64 {
        round_currency(distance_km * self.price_per_km(category))
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        Self::new(4.87, 11.92, 27.44)
    }
}
