//! Truck allocation for a shipment's total weight.
//!
//! - [`TruckAllocator`] — tiered greedy assignment (small/medium/large), O(w)

mod greedy;

pub use greedy::{Allocation, TruckAllocator};
