use crate::domain::model::{Listing, ListingRecord};
use crate::domain::ports::ListingSource;
use crate::utils::error::Result;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Reads listings from a headed CSV file.
///
/// Expected columns: `id,address,type,price,area,bedrooms,bathrooms,available`.
/// Empty optional cells fall back to the record defaults.
#[derive(Debug, Clone)]
pub struct CsvListingSource {
    path: PathBuf,
}

impl CsvListingSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_from<R: Read>(reader: R) -> Result<Vec<Listing>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut listings = Vec::new();
        for (i, row) in csv_reader.deserialize::<ListingRecord>().enumerate() {
            // Row numbers count the header line as line 1.
            let record = row?;
            listings.push(record.into_listing(&format!("row {}", i + 2))?);
        }
        Ok(listings)
    }
}

impl ListingSource for CsvListingSource {
    fn load(&self) -> Result<Vec<Listing>> {
        let file = std::fs::File::open(&self.path)?;
        Self::read_from(file)
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path().display())
    }
}
