//! Domain model types for freight costing.
//!
//! Provides the core abstractions: truck categories and assignments,
//! catalog products and per-stop manifests, shipment legs, and the
//! finalized transport record.

mod leg;
mod product;
mod record;
mod truck;

pub use leg::ShipmentLeg;
pub use product::{Product, ProductLine, Stop};
pub use record::TransportRecord;
pub use truck::{TruckAssignment, TruckCategory};
