pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{CsvListingSource, SampleListings};
pub use crate::config::toml_config::CatalogConfig;
pub use crate::core::{
    catalog::{AveragingMode, Catalog},
    price_range::PriceRange,
    shared::SharedCatalog,
    summary::CatalogSummary,
};
pub use crate::domain::model::{Listing, ListingRecord, PropertyType};
pub use crate::domain::ports::ListingSource;
pub use crate::utils::error::{CatalogError, Result};
