use crate::utils::error::{CatalogError, Result};
use rust_decimal::Decimal;
use std::fmt;

/// Closed price interval `[min, max]`. Construction guarantees `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: Decimal,
    max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Result<Self> {
        if min > max {
            tracing::error!("Invalid price range: {} > {}", min, max);
            return Err(CatalogError::invalid_argument(
                "Minimum price cannot be greater than maximum price",
            ));
        }
        Ok(Self { min, max })
    }

    /// Builds a range from bounds that may be missing, e.g. optional CLI flags.
    pub fn from_bounds(min: Option<Decimal>, max: Option<Decimal>) -> Result<Self> {
        match (min, max) {
            (Some(min), Some(max)) => Self::new(min, max),
            _ => {
                tracing::error!("Attempted to filter by a price range with a missing bound");
                Err(CatalogError::invalid_argument(
                    "Price range values cannot be absent",
                ))
            }
        }
    }

    pub fn min(&self) -> Decimal {
        self.min
    }

    pub fn max(&self) -> Decimal {
        self.max
    }

    pub fn contains(&self, price: Decimal) -> bool {
        self.min <= price && price <= self.max
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}
