pub mod catalog;
pub mod price_range;
pub mod shared;
pub mod summary;

pub use crate::domain::model::{Listing, ListingRecord, PropertyType};
pub use crate::domain::ports::ListingSource;
pub use crate::utils::error::Result;
