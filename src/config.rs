//! Engine configuration loaded from TOML.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cache::CacheExpiry;
use crate::error::FreightResult;
use crate::pricing::PricingTable;

/// Cache expiry settings, in seconds. `0` disables a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub sliding_expiry_secs: u64,
    pub absolute_expiry_secs: u64,
}

impl CacheConfig {
    /// Expiry policy for cache writes.
    pub fn expiry(&self) -> CacheExpiry {
        CacheExpiry::from_secs(self.sliding_expiry_secs, self.absolute_expiry_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            sliding_expiry_secs: 60,
            absolute_expiry_secs: 3600,
        }
    }
}

/// Top-level configuration. Every field has a default.
///
/// ```
/// use u_freight::config::EngineConfig;
/// use u_freight::models::TruckCategory;
///
/// let config = EngineConfig::from_toml_str(r#"
///     distance_table = "data/distances.csv"
///
///     [pricing]
///     large = 30.0
/// "#).unwrap();
/// assert_eq!(config.cache.sliding_expiry_secs, 60);
/// assert_eq!(config.pricing.price_per_km(TruckCategory::Large), 30.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Semicolon-delimited distance file.
    pub distance_table: Option<PathBuf>,
    pub cache: CacheConfig,
    pub pricing: PricingTable,
}

impl EngineConfig {
    /// Parses TOML text.
    pub fn from_toml_str(text: &str) -> FreightResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> FreightResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
