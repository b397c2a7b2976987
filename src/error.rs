//! Error type shared by every freight operation.

use thiserror::Error;

/// Result alias for freight operations.
pub type FreightResult<T> = Result<T, FreightError>;

/// Errors raised by the costing engine and its collaborators.
#[derive(Debug, Error)]
pub enum FreightError {
    /// A city name is not present in the distance table header.
    #[error("city not found in distance table: {0}")]
    CityNotFound(String),

    /// Average cost per km requested for a transport with zero kilometers.
    #[error("average cost per km is undefined for a transport of 0 km")]
    DivisionUndefined,

    /// The distance table text could not be parsed.
    #[error("malformed distance table at line {line}: {reason}")]
    MalformedTable {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A numeric input was negative, NaN or infinite.
    #[error("invalid {field}: {value}")]
    InvalidQuantity {
        /// Name of the offending input.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A shipment was submitted without any stop.
    #[error("shipment has no stops")]
    EmptyShipment,

    /// A label does not name a truck category.
    #[error("unknown truck category: {0}")]
    UnknownTruckCategory(String),

    /// A required configuration setting is absent.
    #[error("missing configuration setting: {0}")]
    MissingSetting(&'static str),

    /// Reading a distance table or configuration file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A cached payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The TOML configuration is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),
}

impl FreightError {
    /// Returns `true` for errors caused by caller input rather than by a
    /// collaborator (file system, cache payloads, configuration).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            FreightError::CityNotFound(_)
                | FreightError::DivisionUndefined
                | FreightError::InvalidQuantity { .. }
                | FreightError::EmptyShipment
                | FreightError::UnknownTruckCategory(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_city_not_found() {
        let e = FreightError::CityNotFound("ATLANTIS".into());
        assert_eq!(e.to_string(), "city not found in distance table: ATLANTIS");
    }

    #[test]
    fn test_input_error_classification() {
        assert!(FreightError::EmptyShipment.is_input_error());
        assert!(FreightError::DivisionUndefined.is_input_error());
        let io = FreightError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "x"));
        assert!(!io.is_input_error());
    }
}
