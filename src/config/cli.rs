use crate::core::catalog::AveragingMode;
use crate::core::price_range::PriceRange;
use crate::domain::model::PropertyType;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extensions, validate_path, Validate};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "realty-catalog")]
#[command(about = "Query an in-memory catalog of real-estate listings")]
pub struct CliConfig {
    /// TOML catalog file with [catalog] settings and [[listings]]
    #[arg(long)]
    pub catalog: Option<String>,

    /// CSV file of listings (id,address,type,price,area,bedrooms,bathrooms,available)
    #[arg(long)]
    pub listings_csv: Option<String>,

    /// Override the averaging mode from the catalog file
    #[arg(long, value_enum)]
    pub averaging: Option<AveragingMode>,

    /// List listings of this property type
    #[arg(long = "type")]
    pub property_type: Option<String>,

    /// Lower price bound, requires --max-price
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Upper price bound, requires --min-price
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// List listings with exactly this many bedrooms
    #[arg(long, allow_negative_numbers = true)]
    pub bedrooms: Option<i64>,

    /// Print the summary as JSON on stdout
    #[arg(long)]
    pub json: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn has_source(&self) -> bool {
        self.catalog.is_some() || self.listings_csv.is_some()
    }

    pub fn property_type(&self) -> Result<Option<PropertyType>> {
        self.property_type
            .as_deref()
            .map(str::parse::<PropertyType>)
            .transpose()
    }

    /// `None` when neither bound was given; a lone bound is an invalid argument.
    pub fn price_range(&self) -> Result<Option<PriceRange>> {
        if self.min_price.is_none() && self.max_price.is_none() {
            return Ok(None);
        }
        PriceRange::from_bounds(self.min_price, self.max_price).map(Some)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(catalog) = &self.catalog {
            validate_path("catalog", catalog)?;
            validate_file_extensions("catalog", std::slice::from_ref(catalog), &["toml"])?;
        }
        if let Some(csv) = &self.listings_csv {
            validate_path("listings_csv", csv)?;
            validate_file_extensions("listings_csv", std::slice::from_ref(csv), &["csv"])?;
        }
        self.property_type()?;
        self.price_range()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(args: &[&str]) -> CliConfig {
        CliConfig::try_parse_from(std::iter::once("realty-catalog").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]);
        assert!(!config.has_source());
        assert_eq!(config.log_format, LogFormat::Compact);
        assert_eq!(config.price_range().unwrap(), None);
        assert_eq!(config.property_type().unwrap(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_filters_parse() {
        let config = parse(&[
            "--type",
            "condo",
            "--min-price",
            "200000",
            "--max-price",
            "400000.50",
            "--bedrooms",
            "-1",
            "--averaging",
            "exact",
        ]);
        assert_eq!(config.property_type().unwrap(), Some(PropertyType::Condo));
        let range = config.price_range().unwrap().unwrap();
        assert_eq!(range.max(), dec!(400000.50));
        assert_eq!(config.bedrooms, Some(-1));
        assert_eq!(config.averaging, Some(AveragingMode::Exact));
    }

    #[test]
    fn test_lone_price_bound_is_invalid_argument() {
        let config = parse(&["--max-price", "100000"]);
        assert!(config.price_range().unwrap_err().is_invalid_argument());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_source_extensions_are_checked() {
        assert!(parse(&["--catalog", "catalog.toml"]).validate().is_ok());
        assert!(parse(&["--catalog", "catalog.json"]).validate().is_err());
        assert!(parse(&["--listings-csv", "listings.txt"]).validate().is_err());
    }
}
