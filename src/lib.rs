//! # u-freight
//!
//! Freight costing library: inter-city distance tables, greedy truck
//! allocation, multi-leg transport aggregation, and running statistics over
//! every costed transport.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (TruckCategory, Stop, ShipmentLeg, TransportRecord)
//! - [`distance`] — Named-city kilometer matrix and its table parser
//! - [`pricing`] — Per-km truck prices and currency rounding
//! - [`allocation`] — Tiered greedy truck allocation
//! - [`aggregation`] — Multi-leg shipment costing
//! - [`statistics`] — Transport history with per-route cost breakdown
//! - [`cache`] — Key-value store contract with sliding/absolute expiry
//! - [`source`] — Distance table sources (semicolon CSV files)
//! - [`catalog`] — Seeded product catalog
//! - [`config`] — TOML configuration
//! - [`service`] — Façade tying everything together

pub mod aggregation;
pub mod allocation;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod distance;
pub mod error;
pub mod models;
pub mod pricing;
pub mod service;
pub mod source;
pub mod statistics;

pub use error::{FreightError, FreightResult};
