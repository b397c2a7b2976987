//! Greedy tiered truck allocation.
//!
//! Covers a shipment's total weight with trucks chosen one at a time from
//! the remaining weight's tier:
//!
//! | remaining (t) | truck  | weight taken |
//! |---------------|--------|--------------|
//! | > 8           | large  | 10 000 kg    |
//! | (2, 8]        | medium | 4 000 kg     |
//! | (1, 2]        | small  | 1 000 kg     |
//! | ≤ 1           | small  | everything   |
//!
//! Every truck drives the whole distance. Tiers are never mixed to find a
//! cheaper combination.
//!
//! # Complexity
//!
//! O(w / 1000) iterations for a weight of `w` kilograms.

use tracing::debug;

use crate::error::{FreightError, FreightResult};
use crate::models::{TruckAssignment, TruckCategory};
use crate::pricing::{round_currency, PricingTable};

const KG_PER_TON: f64 = 1_000.0;
const LARGE_ABOVE_TONS: f64 = 8.0;
const MEDIUM_ABOVE_TONS: f64 = 2.0;
const SINGLE_SMALL_UP_TO_TONS: f64 = 1.0;

/// Outcome of one allocation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    /// Cost of driving every truck the full distance, rounded to cents.
    pub cost: f64,
    /// Trucks in the order they were chosen.
    pub trucks: TruckAssignment,
}

/// Assigns trucks to a total weight with the tiered greedy rule.
///
/// Each call starts from an empty truck list.
///
/// # Examples
///
/// ```
/// use u_freight::allocation::TruckAllocator;
/// use u_freight::models::TruckCategory;
/// use u_freight::pricing::PricingTable;
///
/// let allocator = TruckAllocator::new(PricingTable::default());
/// let a = allocator.allocate(4_000.0, 100.0).unwrap();
/// assert_eq!(a.trucks.as_slice(), &[TruckCategory::Medium]);
/// assert_eq!(a.cost, 1192.0);
///
/// let none = allocator.allocate(0.0, 100.0).unwrap();
/// assert!(none.trucks.is_empty());
/// assert_eq!(none.cost, 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TruckAllocator {
    pricing: PricingTable,
}

impl TruckAllocator {
    /// Creates an allocator pricing trucks with `pricing`.
    pub fn new(pricing: PricingTable) -> Self {
        Self { pricing }
    }

    /// Price table used for costs.
    pub fn pricing(&self) -> &PricingTable {
        &self.pricing
    }

    /// Chooses trucks for `total_weight_kg` and prices them over
    /// `distance_km`.
    ///
    /// A weight of zero or less yields no trucks and zero cost. Fails with
    /// [`FreightError::InvalidQuantity`] for a non-finite weight, or a
    /// negative or non-finite distance.
    pub fn allocate(&self, total_weight_kg: f64, distance_km: f64) -> FreightResult<Allocation> {
        if !total_weight_kg.is_finite() {
            return Err(FreightError::InvalidQuantity {
                field: "total_weight_kg",
                value: total_weight_kg,
            });
        }
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(FreightError::InvalidQuantity {
                field: "distance_km",
                value: distance_km,
            });
        }

        let mut trucks = TruckAssignment::new();
        let mut total_cost = 0.0;
        let mut remaining_kg = total_weight_kg;

        while remaining_kg > 0.0 {
            let tons = remaining_kg / KG_PER_TON;
            let category = tier_for(tons);

            if tons <= SINGLE_SMALL_UP_TO_TONS {
                remaining_kg = 0.0;
            } else {
                remaining_kg -= category.capacity_kg();
            }

            trucks.push(category);
            total_cost += distance_km * self.pricing.price_per_km(category);
        }

        debug!(
            total_weight_kg,
            distance_km,
            trucks = trucks.len(),
            "allocated trucks"
        );

        Ok(Allocation {
            cost: round_currency(total_cost),
            trucks,
        })
    }

    /// Sum of the per-km prices of `trucks`, rounded to cents.
    ///
    /// Independent of distance.
    pub fn price_per_km_sum(&self, trucks: &TruckAssignment) -> f64 {
        round_currency(trucks.iter().map(|c| self.pricing.price_per_km(c)).sum())
    }
}

fn tier_for(tons: f64) -> TruckCategory {
    if tons > LARGE_ABOVE_TONS {
        TruckCategory::Large
    } else if tons > MEDIUM_ABOVE_TONS {
        TruckCategory::Medium
    } else {
        TruckCategory::Small
    }
}
