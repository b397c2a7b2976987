//! Seeded product catalog.

use std::sync::Arc;

use tracing::info;

use crate::cache::{get_json, set_json, CacheExpiry, KeyValueStore};
use crate::error::FreightResult;
use crate::models::Product;

/// Cache key the catalog is stored under.
pub const PRODUCTS_KEY: &str = "products";

/// The products seeded into an empty catalog.
pub fn default_products() -> Vec<Product> {
    vec![
        Product::new(1, "Celular", 0.5),
        Product::new(2, "Geladeira", 60.0),
        Product::new(3, "Freezer", 100.0),
        Product::new(4, "Lavadora de roupas", 120.0),
    ]
}

/// Product reference data kept in a [`KeyValueStore`].
///
/// When the cache holds no catalog (first access, or after expiry) the
/// seed list is written back and returned.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_freight::cache::{CacheExpiry, MemoryStore};
/// use u_freight::catalog::ProductCatalog;
///
/// let catalog = ProductCatalog::new(Arc::new(MemoryStore::new()), CacheExpiry::default());
/// let products = catalog.products().unwrap();
/// assert_eq!(products.len(), 4);
/// assert_eq!(catalog.find(3).unwrap().unwrap().name, "Freezer");
/// ```
pub struct ProductCatalog {
    backend: Arc<dyn KeyValueStore>,
    expiry: CacheExpiry,
    seed: Vec<Product>,
}

impl ProductCatalog {
    /// Creates a catalog seeded with [`default_products`].
    pub fn new(backend: Arc<dyn KeyValueStore>, expiry: CacheExpiry) -> Self {
        Self::with_seed(backend, expiry, default_products())
    }

    /// Creates a catalog seeded with `seed`.
    pub fn with_seed(
        backend: Arc<dyn KeyValueStore>,
        expiry: CacheExpiry,
        seed: Vec<Product>,
    ) -> Self {
        Self {
            backend,
            expiry,
            seed,
        }
    }

    /// Every product, seeding the cache first if it has none.
    pub fn products(&self) -> FreightResult<Vec<Product>> {
        if let Some(products) = get_json(self.backend.as_ref(), PRODUCTS_KEY)? {
            return Ok(products);
        }
        set_json(self.backend.as_ref(), PRODUCTS_KEY, &self.seed, self.expiry)?;
        info!(products = self.seed.len(), "product catalog seeded");
        Ok(self.seed.clone())
    }

    /// The product with `id`, if cataloged.
    pub fn find(&self, id: u32) -> FreightResult<Option<Product>> {
        Ok(self.products()?.into_iter().find(|p| p.id == id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;

    #[test]
    fn test_seeds_defaults_once() {
        let backend = Arc::new(MemoryStore::new());
        let catalog = ProductCatalog::new(backend.clone(), CacheExpiry::NEVER);
        assert!(backend.is_empty());
        let first = catalog.products().expect("seeded");
        assert_eq!(first, default_products());
        assert_eq!(backend.len(), 1);
        assert_eq!(catalog.products().expect("cached"), first);
    }

    #[test]
    fn test_existing_catalog_is_not_overwritten() {
        let backend: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let custom = vec![Product::new(9, "Fogao", 45.0)];
        set_json(backend.as_ref(), PRODUCTS_KEY, &custom, CacheExpiry::NEVER).expect("stored");
        let catalog = ProductCatalog::new(backend, CacheExpiry::NEVER);
        assert_eq!(catalog.products().expect("cached"), custom);
    }

    #[test]
    fn test_find() {
        let catalog = ProductCatalog::new(Arc::new(MemoryStore::new()), CacheExpiry::NEVER);
        let celular = catalog.find(1).expect("readable").expect("present");
        assert_eq!(celular.weight_kg, 0.5);
        assert!(catalog.find(99).expect("readable").is_none());
    }

    #[test]
    fn test_custom_seed() {
        let seed = vec![Product::new(7, "Pallet", 25.0)];
        let catalog = ProductCatalog::with_seed(
            Arc::new(MemoryStore::new()),
            CacheExpiry::NEVER,
            seed.clone(),
        );
        assert_eq!(catalog.products().expect("seeded"), seed);
    }
}
