//! Inter-city distance tables.
//!
//! Provides a dense kilometer matrix addressed by city name, parsed from the
//! semicolon-delimited table format.

mod matrix;

pub use matrix::DistanceMatrix;
