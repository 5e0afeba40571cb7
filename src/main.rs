use clap::Parser;
use realty_catalog::config::LogFormat;
use realty_catalog::utils::{logger, validation::Validate};
use realty_catalog::{
    Catalog, CatalogConfig, CatalogSummary, CliConfig, CsvListingSource, Listing, Result,
    SampleListings,
};

fn main() {
    let config = CliConfig::parse();

    match config.log_format {
        LogFormat::Compact => logger::init_cli_logger(config.verbose),
        LogFormat::Json => logger::init_json_logger(config.verbose),
    }

    tracing::info!("Starting realty-catalog");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&config) {
        tracing::error!("realty-catalog failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    tracing::info!("realty-catalog finished successfully");
}

fn run(config: &CliConfig) -> Result<()> {
    let catalog = build_catalog(config)?;

    let summary = CatalogSummary::from_catalog(&catalog);
    summary.log();

    if let Some(property_type) = config.property_type()? {
        log_listings(&format!("{} listings", property_type), &catalog.by_type(property_type));
    }
    if let Some(range) = config.price_range()? {
        log_listings(&format!("Listings priced {}", range), &catalog.by_range(&range));
    }
    if let Some(bedrooms) = config.bedrooms {
        log_listings(
            &format!("Listings with {} bedrooms", bedrooms),
            &catalog.by_bedroom_count(bedrooms),
        );
    }

    if config.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}

fn build_catalog(config: &CliConfig) -> Result<Catalog> {
    let mut catalog = match &config.catalog {
        Some(path) => {
            tracing::info!("Loading catalog from: {}", path);
            let catalog_config = CatalogConfig::from_file(path)?;
            catalog_config.validate()?;
            catalog_config.build_catalog()?
        }
        None => Catalog::new(),
    };

    if let Some(path) = &config.listings_csv {
        catalog.extend_from(&CsvListingSource::new(path))?;
    }

    if !config.has_source() {
        catalog.extend_from(&SampleListings)?;
    }

    if let Some(averaging) = config.averaging {
        catalog = catalog.with_averaging(averaging);
    }

    Ok(catalog)
}

fn log_listings(label: &str, listings: &[Listing]) {
    tracing::info!("{}: {}", label, listings.len());
    for listing in listings {
        tracing::info!("  {}", listing);
    }
}
