use crate::utils::error::{CatalogError, Result};
use crate::utils::validation::validate_required_field;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Closed set of property categories a listing can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    Apartment,
    House,
    Condo,
    Townhouse,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Condo,
        PropertyType::Townhouse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Apartment => "APARTMENT",
            PropertyType::House => "HOUSE",
            PropertyType::Condo => "CONDO",
            PropertyType::Townhouse => "TOWNHOUSE",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if name.is_empty() {
            tracing::error!("Attempted to use an empty property type");
            return Err(CatalogError::invalid_argument("Property type cannot be empty"));
        }

        PropertyType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                tracing::error!("Unknown property type: {}", name);
                CatalogError::invalid_argument(format!(
                    "Unknown property type '{}'. Valid types: apartment, house, condo, townhouse",
                    name
                ))
            })
    }
}

/// A single real-estate record. Identity is the `id` alone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub address: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub price: Decimal,
    pub area: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub available: bool,
}

impl Listing {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        property_type: PropertyType,
        price: Decimal,
        area: f64,
        bedrooms: u32,
        bathrooms: u32,
        available: bool,
    ) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            property_type,
            price,
            area,
            bedrooms,
            bathrooms,
            available,
        }
    }
}

impl PartialEq for Listing {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Listing {}

impl Hash for Listing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Listing{{id='{}', address='{}', type={}, price={}, area={}, \
             bedrooms={}, bathrooms={}, available={}}}",
            self.id,
            self.address,
            self.property_type,
            self.price,
            self.area,
            self.bedrooms,
            self.bathrooms,
            self.available
        )
    }
}

/// Loosely typed listing as read from a config file or CSV row.
///
/// Prices stay textual until conversion so they are parsed as exact decimals.
/// Numeric prices (TOML `price = 500000`) are accepted and kept as their text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "type", alias = "property_type")]
    pub property_type: Option<String>,
    #[serde(default, deserialize_with = "price_text::deserialize")]
    pub price: Option<String>,
    pub area: Option<f64>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub available: Option<bool>,
}

impl ListingRecord {
    /// Converts into a [`Listing`], prefixing field names in errors with `context`.
    pub fn into_listing(self, context: &str) -> Result<Listing> {
        let field = |name: &str| format!("{}.{}", context, name);

        let id = validate_required_field(&field("id"), &self.id)?.clone();
        let address = validate_required_field(&field("address"), &self.address)?.clone();
        let type_name = validate_required_field(&field("type"), &self.property_type)?;
        let property_type: PropertyType = type_name.parse()?;

        let price_text = validate_required_field(&field("price"), &self.price)?;
        let price = Decimal::from_str(price_text.trim()).map_err(|e| {
            CatalogError::InvalidConfigValueError {
                field: field("price"),
                value: price_text.clone(),
                reason: format!("Not a decimal number: {}", e),
            }
        })?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(CatalogError::InvalidConfigValueError {
                field: field("price"),
                value: price_text.clone(),
                reason: "Price cannot be negative".to_string(),
            });
        }

        let area = self.area.unwrap_or(0.0);
        if !area.is_finite() || area < 0.0 {
            return Err(CatalogError::InvalidConfigValueError {
                field: field("area"),
                value: area.to_string(),
                reason: "Area must be a finite, non-negative number".to_string(),
            });
        }

        Ok(Listing {
            id,
            address,
            property_type,
            price,
            area,
            bedrooms: self.bedrooms.unwrap_or(0),
            bathrooms: self.bathrooms.unwrap_or(0),
            available: self.available.unwrap_or(false),
        })
    }
}

mod price_text {
    use serde::de::{self, Deserializer, Visitor};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionalPrice)
    }

    struct OptionalPrice;

    impl<'de> Visitor<'de> for OptionalPrice {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an optional price")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            // Asking for a string lets CSV hand over the raw cell text;
            // self-describing formats still report numbers as numbers.
            deserializer.deserialize_string(PriceText).map(Some)
        }
    }

    struct PriceText;

    impl<'de> Visitor<'de> for PriceText {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a price as a string or number")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(v.to_string())
        }
    }
}

impl TryFrom<ListingRecord> for Listing {
    type Error = CatalogError;

    fn try_from(record: ListingRecord) -> Result<Self> {
        record.into_listing("listing")
    }
}
