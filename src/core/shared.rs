use crate::core::catalog::Catalog;
use crate::core::price_range::PriceRange;
use crate::domain::model::{Listing, PropertyType};
use crate::domain::ports::ListingSource;
use crate::utils::error::Result;
use rust_decimal::Decimal;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable, thread-safe handle to a [`Catalog`].
///
/// Each call holds the lock for the whole scan, so results are consistent
/// snapshots even while other threads are adding.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<Mutex<Catalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(Mutex::new(catalog)),
        }
    }

    // A panic mid-read cannot leave the Vec half-written, so poisoning is ignored.
    fn lock(&self) -> MutexGuard<'_, Catalog> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, listing: Listing) {
        self.lock().add(listing);
    }

    pub fn try_add(&self, listing: Option<Listing>) -> Result<()> {
        self.lock().try_add(listing)
    }

    pub fn extend_from<S: ListingSource + ?Sized>(&self, source: &S) -> Result<usize> {
        self.lock().extend_from(source)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn all(&self) -> Vec<Listing> {
        self.lock().all()
    }

    pub fn available(&self) -> Vec<Listing> {
        self.lock().available()
    }

    pub fn by_type(&self, property_type: PropertyType) -> Vec<Listing> {
        self.lock().by_type(property_type)
    }

    pub fn by_price_range(&self, min: Decimal, max: Decimal) -> Result<Vec<Listing>> {
        self.lock().by_price_range(min, max)
    }

    pub fn by_range(&self, range: &PriceRange) -> Vec<Listing> {
        self.lock().by_range(range)
    }

    pub fn by_bedroom_count(&self, bedrooms: i64) -> Vec<Listing> {
        self.lock().by_bedroom_count(bedrooms)
    }

    pub fn average_price(&self) -> Decimal {
        self.lock().average_price()
    }

    pub fn most_expensive(&self) -> Option<Listing> {
        self.lock().most_expensive()
    }

    pub fn count_by_type(&self, property_type: PropertyType) -> usize {
        self.lock().count_by_type(property_type)
    }

    /// Copy of the current catalog state.
    pub fn snapshot(&self) -> Catalog {
        self.lock().clone()
    }
}
