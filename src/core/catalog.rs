use crate::core::price_range::PriceRange;
use crate::domain::model::{Listing, PropertyType};
use crate::domain::ports::ListingSource;
use crate::utils::error::{CatalogError, Result};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How [`Catalog::average_price`] combines prices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum AveragingMode {
    /// Average the prices as `f64` and convert the mean back to a decimal.
    #[default]
    Float,
    /// Sum and divide as exact decimals.
    Exact,
}

/// In-memory, insertion-ordered collection of listings.
///
/// Every read hands back owned copies, so callers never hold a view into the
/// catalog's own storage.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    listings: Vec<Listing>,
    averaging: AveragingMode,
}

impl Catalog {
    pub fn new() -> Self {
        tracing::info!("Creating empty catalog");
        Self::default()
    }

    pub fn from_listings(listings: Vec<Listing>) -> Self {
        tracing::info!("Creating catalog with {} listings", listings.len());
        Self {
            listings,
            averaging: AveragingMode::default(),
        }
    }

    pub fn with_averaging(mut self, averaging: AveragingMode) -> Self {
        self.averaging = averaging;
        self
    }

    pub fn averaging(&self) -> AveragingMode {
        self.averaging
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn add(&mut self, listing: Listing) {
        tracing::info!("Adding listing with id: {}", listing.id);
        self.listings.push(listing);
    }

    /// Adds a listing the caller may not have; `None` is rejected.
    pub fn try_add(&mut self, listing: Option<Listing>) -> Result<()> {
        match listing {
            Some(listing) => {
                self.add(listing);
                Ok(())
            }
            None => {
                tracing::error!("Attempted to add an absent listing");
                Err(CatalogError::invalid_argument("Listing cannot be absent"))
            }
        }
    }

    /// Appends everything `source` produces. Nothing is added if loading fails.
    pub fn extend_from<S: ListingSource + ?Sized>(&mut self, source: &S) -> Result<usize> {
        let listings = source.load()?;
        let count = listings.len();
        tracing::info!("Loaded {} listings from {}", count, source.describe());
        self.listings.extend(listings);
        Ok(count)
    }

    pub fn all(&self) -> Vec<Listing> {
        tracing::debug!("Getting all listings, count: {}", self.listings.len());
        self.listings.clone()
    }

    pub fn available(&self) -> Vec<Listing> {
        let available = self.filtered(|l| l.available);
        tracing::debug!("Found {} available listings", available.len());
        available
    }

    pub fn by_type(&self, property_type: PropertyType) -> Vec<Listing> {
        let filtered = self.filtered(|l| l.property_type == property_type);
        tracing::debug!("Found {} listings of type {}", filtered.len(), property_type);
        filtered
    }

    pub fn by_price_range(&self, min: Decimal, max: Decimal) -> Result<Vec<Listing>> {
        let range = PriceRange::new(min, max)?;
        Ok(self.by_range(&range))
    }

    pub fn by_range(&self, range: &PriceRange) -> Vec<Listing> {
        let filtered = self.filtered(|l| range.contains(l.price));
        tracing::debug!("Found {} listings in price range {}", filtered.len(), range);
        filtered
    }

    /// Negative counts are accepted and match nothing.
    pub fn by_bedroom_count(&self, bedrooms: i64) -> Vec<Listing> {
        let filtered = self.filtered(|l| i64::from(l.bedrooms) == bedrooms);
        tracing::debug!("Found {} listings with {} bedrooms", filtered.len(), bedrooms);
        filtered
    }

    pub fn count_by_type(&self, property_type: PropertyType) -> usize {
        let count = self
            .listings
            .iter()
            .filter(|l| l.property_type == property_type)
            .count();
        tracing::debug!("Counted {} listings of type {}", count, property_type);
        count
    }

    /// Mean price, or exactly zero for an empty catalog.
    pub fn average_price(&self) -> Decimal {
        if self.listings.is_empty() {
            tracing::debug!("No listings found, average price is zero");
            return Decimal::ZERO;
        }

        let average = match self.averaging {
            AveragingMode::Float => self.float_mean().or_else(|| self.exact_mean()),
            AveragingMode::Exact => self.exact_mean().or_else(|| self.float_mean()),
        };

        match average {
            Some(average) => {
                tracing::debug!("Average price calculated: {}", average);
                average
            }
            None => {
                tracing::warn!("Average price is not representable, returning zero");
                Decimal::ZERO
            }
        }
    }

    /// First listing holding the highest price, `None` when empty.
    pub fn most_expensive(&self) -> Option<Listing> {
        let mut iter = self.listings.iter();
        let first = iter.next()?;
        let most_expensive = iter.fold(first, |best, l| {
            if l.price > best.price {
                l
            } else {
                best
            }
        });
        tracing::debug!("Most expensive listing id: {}", most_expensive.id);
        Some(most_expensive.clone())
    }

    fn filtered<F>(&self, predicate: F) -> Vec<Listing>
    where
        F: Fn(&Listing) -> bool,
    {
        self.listings.iter().filter(|&l| predicate(l)).cloned().collect()
    }

    fn float_mean(&self) -> Option<Decimal> {
        let sum = self
            .listings
            .iter()
            .try_fold(0.0_f64, |acc, l| Some(acc + l.price.to_f64()?))?;
        Decimal::from_f64(sum / self.listings.len() as f64)
    }

    /// Exact sum divided by the count; falls back to a running mean when the
    /// sum would pass `Decimal::MAX`.
    fn exact_mean(&self) -> Option<Decimal> {
        let sum = self
            .listings
            .iter()
            .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.price));

        match sum {
            Some(sum) => sum
                .checked_div(Decimal::from(self.listings.len()))
                .map(|mean| mean.normalize()),
            None => self.running_mean(),
        }
    }

    // Stays within [min price, max price], so it cannot overflow for
    // non-negative prices.
    fn running_mean(&self) -> Option<Decimal> {
        self.listings
            .iter()
            .zip(1u64..)
            .try_fold(Decimal::ZERO, |mean, (l, k)| {
                let step = l.price.checked_sub(mean)?.checked_div(Decimal::from(k))?;
                Some(mean.checked_add(step).unwrap_or(l.price.max(mean)))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::RoundingStrategy;
    use rust_decimal_macros::dec;

    fn house() -> Listing {
        Listing::new(
            "1",
            "123 Main St",
            PropertyType::House,
            dec!(500000),
            2000.0,
            4,
            3,
            true,
        )
    }

    fn apartment() -> Listing {
        Listing::new(
            "2",
            "456 Oak Ave",
            PropertyType::Apartment,
            dec!(250000),
            1200.0,
            2,
            2,
            true,
        )
    }

    fn condo() -> Listing {
        Listing::new(
            "3",
            "789 Pine Rd",
            PropertyType::Condo,
            dec!(350000),
            1500.0,
            3,
            2,
            false,
        )
    }

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add(house());
        catalog.add(apartment());
        catalog.add(condo());
        catalog
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_all_preserves_insertion_order() {
        let catalog = sample_catalog();
        assert_eq!(ids(&catalog.all()), vec!["1", "2", "3"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_all_returns_independent_copy() {
        let catalog = sample_catalog();
        let mut copy = catalog.all();
        copy.clear();
        let mut again = catalog.all();
        again[0].price = dec!(1);

        let fresh = catalog.all();
        assert_eq!(fresh.len(), 3);
        assert_eq!(fresh[0].price, dec!(500000));
    }

    #[test]
    fn test_available() {
        let catalog = sample_catalog();
        assert_eq!(catalog.available(), vec![house(), apartment()]);
    }

    #[test]
    fn test_by_type() {
        let catalog = sample_catalog();
        assert_eq!(catalog.by_type(PropertyType::House), vec![house()]);
        assert!(catalog.by_type(PropertyType::Townhouse).is_empty());
    }

    #[test]
    fn test_by_price_range() {
        let catalog = sample_catalog();
        let affordable = catalog.by_price_range(dec!(200000), dec!(400000)).unwrap();
        assert_eq!(affordable, vec![apartment(), condo()]);

        let exact = catalog.by_price_range(dec!(500000), dec!(500000)).unwrap();
        assert_eq!(exact, vec![house()]);
    }

    #[test]
    fn test_by_price_range_with_inverted_bounds() {
        let catalog = sample_catalog();
        let err = catalog
            .by_price_range(dec!(200000), dec!(100000))
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_by_bedroom_count() {
        let catalog = sample_catalog();
        assert_eq!(catalog.by_bedroom_count(3), vec![condo()]);
        assert!(catalog.by_bedroom_count(5).is_empty());
        assert!(catalog.by_bedroom_count(-1).is_empty());
    }

    #[test]
    fn test_average_price_float_mode() {
        let catalog = sample_catalog();
        let average = catalog
            .average_price()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(average, dec!(366666.67));
    }

    #[test]
    fn test_average_price_exact_mode() {
        let catalog = sample_catalog().with_averaging(AveragingMode::Exact);
        let average = catalog.average_price();
        assert_eq!(
            average.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            dec!(366666.67)
        );

        let mut even = Catalog::new().with_averaging(AveragingMode::Exact);
        even.add(Listing::new(
            "a",
            "x",
            PropertyType::Condo,
            dec!(0.10),
            1.0,
            1,
            1,
            true,
        ));
        even.add(Listing::new(
            "b",
            "y",
            PropertyType::Condo,
            dec!(0.20),
            1.0,
            1,
            1,
            true,
        ));
        assert_eq!(even.average_price(), dec!(0.15));
    }

    #[test]
    fn test_average_price_near_decimal_max() {
        let mut catalog = Catalog::new();
        for id in ["a", "b"] {
            catalog.add(Listing::new(
                id,
                "1 Vault Rd",
                PropertyType::House,
                Decimal::MAX,
                1.0,
                1,
                1,
                true,
            ));
        }
        assert_eq!(catalog.average_price(), Decimal::MAX);

        let exact = catalog.clone().with_averaging(AveragingMode::Exact);
        assert_eq!(exact.average_price(), Decimal::MAX);

        catalog.add(Listing::new(
            "c",
            "2 Vault Rd",
            PropertyType::House,
            Decimal::ZERO,
            1.0,
            1,
            1,
            true,
        ));
        let average = catalog
            .with_averaging(AveragingMode::Exact)
            .average_price();
        let expected = Decimal::MAX / Decimal::from(3) * Decimal::from(2);
        assert!((average - expected).abs() <= Decimal::ONE);
    }

    #[test]
    fn test_average_price_empty_is_zero() {
        assert_eq!(Catalog::new().average_price(), Decimal::ZERO);
        assert_eq!(
            Catalog::new().with_averaging(AveragingMode::Exact).average_price(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_most_expensive() {
        let catalog = sample_catalog();
        let most_expensive = catalog.most_expensive().unwrap();
        assert_eq!(most_expensive, house());
        assert_eq!(most_expensive.price, dec!(500000));
        assert!(Catalog::new().most_expensive().is_none());
    }

    #[test]
    fn test_most_expensive_keeps_first_on_tie() {
        let mut catalog = sample_catalog();
        catalog.add(Listing::new(
            "4",
            "1 Tie Ln",
            PropertyType::Townhouse,
            dec!(500000.00),
            900.0,
            2,
            1,
            true,
        ));
        assert_eq!(catalog.most_expensive().unwrap().id, "1");
    }

    #[test]
    fn test_count_by_type_matches_by_type() {
        let catalog = sample_catalog();
        for property_type in PropertyType::ALL {
            assert_eq!(
                catalog.count_by_type(property_type),
                catalog.by_type(property_type).len()
            );
        }
        assert_eq!(catalog.count_by_type(PropertyType::Condo), 1);
    }

    #[test]
    fn test_try_add_rejects_absent_listing() {
        let mut catalog = Catalog::new();
        assert!(catalog.try_add(None).unwrap_err().is_invalid_argument());
        assert!(catalog.is_empty());

        catalog.try_add(Some(house())).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_duplicate_ids_are_accepted() {
        let mut catalog = Catalog::new();
        catalog.add(house());
        catalog.add(house());
        assert_eq!(catalog.len(), 2);
    }

    struct FailingSource;

    impl ListingSource for FailingSource {
        fn load(&self) -> Result<Vec<Listing>> {
            Err(CatalogError::MissingFieldError {
                field: "id".to_string(),
            })
        }

        fn describe(&self) -> String {
            "failing source".to_string()
        }
    }

    #[test]
    fn test_extend_from_failing_source_adds_nothing() {
        let mut catalog = sample_catalog();
        assert!(catalog.extend_from(&FailingSource).is_err());
        assert_eq!(catalog.len(), 3);
    }
}
