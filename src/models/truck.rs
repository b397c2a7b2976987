//! Truck categories and per-shipment truck assignments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FreightError;

/// A truck size category.
///
/// Each category carries a fixed capacity; the per-km price lives in
/// [`PricingTable`](crate::pricing::PricingTable).
///
/// # Examples
///
/// ```
/// use u_freight::models::TruckCategory;
///
/// let t: TruckCategory = "medium".parse().unwrap();
/// assert_eq!(t, TruckCategory::Medium);
/// assert_eq!(t.capacity_kg(), 4_000.0);
/// assert_eq!(t.to_string(), "medium");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruckCategory {
    /// Up to 1 t.
    Small,
    /// Up to 4 t.
    Medium,
    /// Up to 10 t.
    Large,
}

impl TruckCategory {
    /// Every category, smallest first.
    pub const ALL: [TruckCategory; 3] = [Self::Small, Self::Medium, Self::Large];

    /// Lowercase label used on the wire.
    pub fn label(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    /// Load one truck of this category takes off the remaining weight.
    pub fn capacity_kg(self) -> f64 {
        match self {
            Self::Small => 1_000.0,
            Self::Medium => 4_000.0,
            Self::Large => 10_000.0,
        }
    }
}

impl fmt::Display for TruckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TruckCategory {
    type Err = FreightError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| FreightError::UnknownTruckCategory(s.to_string()))
    }
}

/// The ordered trucks chosen by one allocation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TruckAssignment(Vec<TruckCategory>);

impl TruckAssignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends one truck.
    pub fn push(&mut self, category: TruckCategory) {
        self.0.push(category);
    }

    /// Number of trucks.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no truck was assigned.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Trucks in assignment order.
    pub fn as_slice(&self) -> &[TruckCategory] {
        &self.0
    }

    /// Iterates the trucks in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = TruckCategory> + '_ {
        self.0.iter().copied()
    }

    /// Number of trucks of the given category.
    pub fn count(&self, category: TruckCategory) -> usize {
        self.0.iter().filter(|&&c| c == category).count()
    }

    /// Wire labels in assignment order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.0.iter().map(|c| c.label()).collect()
    }
}

impl From<Vec<TruckCategory>> for TruckAssignment {
    fn from(trucks: Vec<TruckCategory>) -> Self {
        Self(trucks)
    }
}
