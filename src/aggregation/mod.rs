//! Multi-leg shipment costing.
//!
//! - [`TransportAggregator`] — legs through the distance matrix, one truck
//!   allocation per shipment, optional append to the statistics history

mod aggregator;

pub use aggregator::TransportAggregator;
