//! Data models for catalog products.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

/// A battery or charger listed in the catalog.
///
/// Field names follow the catalog file (camelCase). Keys this type does not
/// model are kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique URL key
    pub slug: String,
    /// Display name
    pub name: String,
    /// Long description
    #[serde(default)]
    pub description: String,
    /// One-line description for listing cards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    /// Category facet (e.g. "Car Batteries")
    pub category: String,
    /// Brand facet
    pub brand: String,
    /// Capacity facet (e.g. "50Ah - 100Ah")
    #[serde(default)]
    pub capacity: String,
    /// Price, currency-agnostic
    pub price: f64,
    /// Average rating (0.0 - 5.0)
    #[serde(default)]
    pub rating: f64,
    /// Listing timestamp, used for "newest" ordering. Unreadable values load as `None`.
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Free-text search tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Units in stock
    #[serde(default)]
    pub stock: u32,
    /// Primary image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// SEO title override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_title: Option<String>,
    /// SEO description override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    /// Hand-written schema.org block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<Value>,
    /// Unmodelled catalog keys
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Creates a product with the required fields and empty optionals.
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        brand: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            description: String::new(),
            short_description: None,
            category: category.into(),
            brand: brand.into(),
            capacity: String::new(),
            price,
            rating: 0.0,
            created_at: None,
            tags: Vec::new(),
            stock: 0,
            image: None,
            meta_title: None,
            meta_description: None,
            structured_data: None,
            extra: Map::new(),
        }
    }

    /// Returns true if at least one unit is in stock.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Accepts RFC 3339, offset-less date-times (read as UTC), plain dates, and
/// epoch milliseconds. Anything else becomes `None`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(value.and_then(|value| {
        let parsed = parse_timestamp(&value);
        if parsed.is_none() {
            warn!("Ignoring unreadable createdAt: {}", value);
        }
        parsed
    }))
}

fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => {
            let s = s.trim();

            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.with_timezone(&Utc));
            }

            for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
                if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
                    return Some(naive.and_utc());
                }
            }

            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        }
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    }
}
