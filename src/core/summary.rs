use crate::core::catalog::Catalog;
use crate::domain::model::PropertyType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate statistics of a catalog at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub total: usize,
    pub available: usize,
    pub by_type: BTreeMap<PropertyType, usize>,
    pub average_price: Decimal,
    pub most_expensive_id: Option<String>,
}

impl CatalogSummary {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let by_type = PropertyType::ALL
            .into_iter()
            .map(|t| (t, catalog.count_by_type(t)))
            .collect();

        Self {
            total: catalog.len(),
            available: catalog.available().len(),
            by_type,
            average_price: catalog.average_price(),
            most_expensive_id: catalog.most_expensive().map(|l| l.id),
        }
    }

    pub fn log(&self) {
        tracing::info!("Total listings: {}", self.total);
        tracing::info!("Available listings: {}", self.available);
        for (property_type, count) in &self.by_type {
            tracing::info!("{} listings: {}", property_type, count);
        }
        tracing::info!("Average price: {}", self.average_price);
        tracing::info!(
            "Most expensive listing ID: {}",
            self.most_expensive_id.as_deref().unwrap_or("none")
        );
    }
}
