// Adapters layer: concrete listing sources.

pub mod csv_source;
pub mod sample;

pub use csv_source::CsvListingSource;
pub use sample::SampleListings;
