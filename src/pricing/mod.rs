//! Per-kilometer truck prices and currency rounding.

mod table;

pub use table::{round_currency, PricingTable};
