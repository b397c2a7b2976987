//! Catalog products, manifest lines and route stops.

use serde::{Deserialize, Serialize};

use crate::error::{FreightError, FreightResult};

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog ID.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Unit weight in kilograms.
    pub weight_kg: f64,
}

impl Product {
    /// Creates a catalog entry.
    pub fn new(id: u32, name: impl Into<String>, weight_kg: f64) -> Self {
        Self {
            id,
            name: name.into(),
            weight_kg,
        }
    }
}

/// One line of a stop's manifest: a product and how many units go there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductLine {
    /// Product ID.
    pub id: u32,
    /// Product name.
    pub name: String,
    /// Units delivered.
    pub quantity: u32,
    /// Unit weight in kilograms.
    pub weight_kg: f64,
}

impl ProductLine {
    /// Creates a manifest line.
    pub fn new(id: u32, name: impl Into<String>, quantity: u32, weight_kg: f64) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            weight_kg,
        }
    }

    /// Creates a manifest line for `quantity` units of a catalog product.
    pub fn of(product: &Product, quantity: u32) -> Self {
        Self::new(product.id, product.name.clone(), quantity, product.weight_kg)
    }

    /// `quantity × weight_kg`.
    pub fn total_weight_kg(&self) -> f64 {
        f64::from(self.quantity) * self.weight_kg
    }

    /// Rejects negative or non-finite unit weights.
    pub fn validate(&self) -> FreightResult<()> {
        if !self.weight_kg.is_finite() || self.weight_kg < 0.0 {
            return Err(FreightError::InvalidQuantity {
                field: "weight_kg",
                value: self.weight_kg,
            });
        }
        Ok(())
    }
}

/// A city on a shipment route and the products delivered there.
///
/// # Examples
///
/// ```
/// use u_freight::models::{ProductLine, Stop};
///
/// let stop = Stop::new("RECIFE")
///     .with_product(ProductLine::new(2, "Geladeira", 3, 60.0))
///     .with_product(ProductLine::new(1, "Celular", 10, 0.5));
/// assert_eq!(stop.product_count(), 13);
/// assert!((stop.total_weight_kg() - 185.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// City name as it appears in the distance table.
    pub city: String,
    /// Manifest delivered at this city.
    #[serde(default)]
    pub products: Vec<ProductLine>,
}

impl Stop {
    /// Creates a stop with an empty manifest.
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            products: Vec::new(),
        }
    }

    /// Adds a manifest line.
    pub fn with_product(mut self, line: ProductLine) -> Self {
        self.products.push(line);
        self
    }

    /// Units delivered at this stop.
    pub fn product_count(&self) -> u64 {
        self.products.iter().map(|p| u64::from(p.quantity)).sum()
    }

    /// Kilograms delivered at this stop.
    pub fn total_weight_kg(&self) -> f64 {
        self.products.iter().map(ProductLine::total_weight_kg).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_weight() {
        let line = ProductLine::new(3, "Freezer", 4, 100.0);
        assert!((line.total_weight_kg() - 400.0).abs() < 1e-10);
        assert!(line.validate().is_ok());
    }

    #[test]
    fn test_line_of_catalog_product() {
        let p = Product::new(4, "Lavadora de roupas", 120.0);
        let line = ProductLine::of(&p, 2);
        assert_eq!(line.id, 4);
        assert_eq!(line.name, "Lavadora de roupas");
        assert!((line.total_weight_kg() - 240.0).abs() < 1e-10);
    }

    #[test]
    fn test_line_rejects_bad_weight() {
        assert!(ProductLine::new(1, "x", 1, -1.0).validate().is_err());
        assert!(ProductLine::new(1, "x", 1, f64::NAN).validate().is_err());
        assert!(ProductLine::new(1, "x", 1, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn test_empty_stop() {
        let stop = Stop::new("NATAL");
        assert_eq!(stop.product_count(), 0);
        assert_eq!(stop.total_weight_kg(), 0.0);
    }

    #[test]
    fn test_stop_deserializes_without_products() {
        let stop: Stop = serde_json::from_str(r#"{"city":"BELEM"}"#).expect("valid");
        assert_eq!(stop.city, "BELEM");
        assert!(stop.products.is_empty());
    }
}
