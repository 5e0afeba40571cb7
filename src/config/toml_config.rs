use crate::core::catalog::{AveragingMode, Catalog};
use crate::domain::model::{Listing, ListingRecord};
use crate::domain::ports::ListingSource;
use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Catalog file: `[catalog]` settings plus any number of `[[listings]]`.
///
/// Listing prices may be written as TOML strings (`price = "500000.10"`),
/// which are read exactly, or as TOML numbers (`price = 500000`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub listings: Vec<ListingRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    pub name: String,
    pub description: Option<String>,
    pub averaging: Option<AveragingMode>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

impl CatalogConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CatalogError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn averaging(&self) -> AveragingMode {
        self.catalog.averaging.unwrap_or_default()
    }

    /// Converts every listing record, failing on the first bad one.
    pub fn listings(&self) -> Result<Vec<Listing>> {
        self.listings
            .iter()
            .enumerate()
            .map(|(i, record)| record.clone().into_listing(&format!("listings[{}]", i)))
            .collect()
    }

    pub fn build_catalog(&self) -> Result<Catalog> {
        tracing::info!(
            "Building catalog '{}'{}",
            self.catalog.name,
            self.catalog
                .description
                .as_deref()
                .map(|d| format!(": {}", d))
                .unwrap_or_default()
        );
        Ok(Catalog::from_listings(self.listings()?).with_averaging(self.averaging()))
    }
}

impl ListingSource for CatalogConfig {
    fn load(&self) -> Result<Vec<Listing>> {
        self.listings()
    }

    fn describe(&self) -> String {
        format!("catalog config '{}'", self.catalog.name)
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("catalog.name", &self.catalog.name)?;
        self.listings().map(|_| ())
    }
}
