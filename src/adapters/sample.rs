use crate::domain::model::{Listing, PropertyType};
use crate::domain::ports::ListingSource;
use crate::utils::error::Result;
use rust_decimal::Decimal;

/// The three demo listings loaded when no other source is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleListings;

impl ListingSource for SampleListings {
    fn load(&self) -> Result<Vec<Listing>> {
        Ok(vec![
            Listing::new(
                "1",
                "123 Main St",
                PropertyType::House,
                Decimal::from(500_000),
                2000.0,
                4,
                3,
                true,
            ),
            Listing::new(
                "2",
                "456 Oak Ave",
                PropertyType::Apartment,
                Decimal::from(250_000),
                1200.0,
                2,
                2,
                true,
            ),
            Listing::new(
                "3",
                "789 Pine Rd",
                PropertyType::Condo,
                Decimal::from(350_000),
                1500.0,
                3,
                2,
                false,
            ),
        ])
    }

    fn describe(&self) -> String {
        "sample listings".to_string()
    }
}
