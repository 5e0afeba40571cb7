use crate::domain::model::Listing;
use crate::utils::error::Result;

/// Anything that can produce listings to load into a catalog.
pub trait ListingSource {
    fn load(&self) -> Result<Vec<Listing>>;

    /// Short label used in log lines.
    fn describe(&self) -> String;
}
