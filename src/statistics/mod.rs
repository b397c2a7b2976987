//! Transport history and per-route cost statistics.

mod store;
mod view;

pub use store::{StatisticsStore, HISTORY_KEY};
pub use view::{RouteCost, StatisticsView};
