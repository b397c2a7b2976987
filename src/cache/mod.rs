//! Key-value caching with sliding and absolute expiry.
//!
//! - [`KeyValueStore`] — the storage contract the engine depends on
//! - [`MemoryStore`] — mutex-guarded in-process implementation
//! - [`get_json`] / [`set_json`] / [`update_json`] — typed access through `serde_json`

mod memory;
mod store;

pub use memory::MemoryStore;
pub use store::{
    get_json, set_json, update_json, CacheExpiry, KeyValueStore, DEFAULT_ABSOLUTE_EXPIRY,
    DEFAULT_SLIDING_EXPIRY,
};
