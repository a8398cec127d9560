use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::framework::Keyed;

/// One property entry as served by `property/home/:type` and `property/searchproperty`.
///
/// Every field except `id` may be missing or `null` on the wire. Room counts and
/// area are display strings; the API sometimes sends them as numbers, so both are
/// accepted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "WireListing")]
pub struct ListingRecord {
    pub id: String,
    /// Image URIs. The first one is the cover.
    pub img: Vec<String>,
    pub starting_bid: Option<f64>,
    pub area: Option<String>,
    pub bedroom: Option<String>,
    pub bathroom: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "isHot")]
    pub is_hot: bool,
    pub description: Option<String>,
}

/// The record as the API sends it. Mongo-backed responses may carry `_id`, `id`
/// or both.
#[derive(Deserialize)]
struct WireListing {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, rename = "_id")]
    object_id: Option<String>,
    #[serde(default)]
    img: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_number")]
    starting_bid: Option<f64>,
    #[serde(default, deserialize_with = "display_text")]
    area: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    bedroom: Option<String>,
    #[serde(default, deserialize_with = "display_text")]
    bathroom: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
    #[serde(default, rename = "isHot")]
    is_hot: Option<bool>,
    #[serde(default)]
    description: Option<String>,
}

impl From<WireListing> for ListingRecord {
    fn from(wire: WireListing) -> Self {
        let id = wire
            .id
            .filter(|id| !id.is_empty())
            .or(wire.object_id)
            .unwrap_or_default();

        Self {
            id,
            img: wire.img.unwrap_or_default(),
            starting_bid: wire.starting_bid,
            area: wire.area,
            bedroom: wire.bedroom,
            bathroom: wire.bathroom,
            city: wire.city,
            country: wire.country,
            is_hot: wire.is_hot.unwrap_or_default(),
            description: wire.description,
        }
    }
}

impl ListingRecord {
    /// Creates a record with only an identifier set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.img.first().map(String::as_str)
    }

    /// "City, Country", skipping whichever part is missing.
    pub fn location(&self) -> String {
        [self.city.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Keyed for ListingRecord {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Buy or rent. Used as the last path segment of `property/home/:type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionMode {
    #[default]
    Buy,
    Rent,
}

impl TransactionMode {
    pub fn as_path(&self) -> &'static str {
        match self {
            TransactionMode::Buy => "buy",
            TransactionMode::Rent => "rent",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            TransactionMode::Buy => TransactionMode::Rent,
            TransactionMode::Rent => TransactionMode::Buy,
        }
    }
}

impl fmt::Display for TransactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown transaction mode: {0} (expected buy or rent)")]
pub struct ParseModeError(String);

impl FromStr for TransactionMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TransactionMode::Buy),
            "rent" => Ok(TransactionMode::Rent),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// What the home view is showing and what the search box holds.
///
/// Only `mode` drives the list fetch. `city` is the search input and is sent
/// on explicit submission only.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryFilter {
    pub mode: TransactionMode,
    pub city: Option<String>,
}

impl QueryFilter {
    pub fn new(mode: TransactionMode) -> Self {
        Self { mode, city: None }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// The city to search for, or `None` when the input is blank (no filter).
    pub fn search_city(&self) -> Option<&str> {
        normalize_city(self.city.as_deref())
    }
}

pub(crate) fn normalize_city(city: Option<&str>) -> Option<&str> {
    city.map(str::trim).filter(|c| !c.is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

fn display_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Int(n) => n.to_string(),
        TextOrNumber::Float(n) => n.to_string(),
    }))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrNumber>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        TextOrNumber::Text(s) => s.trim().replace(',', "").parse().ok(),
        TextOrNumber::Int(n) => Some(n as f64),
        TextOrNumber::Float(n) => Some(n),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "id": "r1", "img": ["u1", "u2"], "starting_bid": 100,
            "area": "4000 sq ft", "bedroom": "2", "bathroom": 3,
            "city": "X", "country": "Y", "isHot": true, "description": "d"
        }"#;
        let record: ListingRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, "r1");
        assert_eq!(record.cover_image(), Some("u1"));
        assert_eq!(record.starting_bid, Some(100.0));
        assert_eq!(record.bedroom.as_deref(), Some("2"));
        assert_eq!(record.bathroom.as_deref(), Some("3"));
        assert!(record.is_hot);
        assert_eq!(record.location(), "X, Y");
    }

    #[test]
    fn test_deserialize_partial_record() {
        let record: ListingRecord = serde_json::from_str(r#"{"_id": "abc"}"#).unwrap();

        assert_eq!(record.id, "abc");
        assert!(record.img.is_empty());
        assert_eq!(record.cover_image(), None);
        assert_eq!(record.starting_bid, None);
        assert!(!record.is_hot);
        assert_eq!(record.location(), "");
    }

    #[test]
    fn test_null_fields_read_as_missing() {
        let json = r#"{
            "_id": "a", "img": null, "isHot": null, "starting_bid": null,
            "bedroom": null, "city": null
        }"#;
        let record: ListingRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, "a");
        assert!(record.img.is_empty());
        assert!(!record.is_hot);
        assert_eq!(record.starting_bid, None);
        assert_eq!(record.bedroom, None);
        assert_eq!(record.city, None);
    }

    #[test]
    fn test_both_id_keys_prefer_id() {
        let record: ListingRecord =
            serde_json::from_str(r#"{"_id": "mongo", "id": "virtual", "city": "X"}"#).unwrap();
        assert_eq!(record.id, "virtual");

        let record: ListingRecord =
            serde_json::from_str(r#"{"_id": "mongo", "id": ""}"#).unwrap();
        assert_eq!(record.id, "mongo");
    }

    #[test]
    fn test_serialized_record_reads_back() {
        let mut record = ListingRecord::new("r1");
        record.img = vec!["u1".to_string()];
        record.is_hot = true;
        record.area = Some("4000 sq ft".to_string());

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(serde_json::from_str::<ListingRecord>(&json).unwrap(), record);
    }

    #[test]
    fn test_price_as_string() {
        let record: ListingRecord =
            serde_json::from_str(r#"{"id": "a", "starting_bid": "1,250"}"#).unwrap();
        assert_eq!(record.starting_bid, Some(1250.0));

        let record: ListingRecord =
            serde_json::from_str(r#"{"id": "a", "starting_bid": "call us"}"#).unwrap();
        assert_eq!(record.starting_bid, None);
    }

    #[test]
    fn test_transaction_mode_parse() {
        assert_eq!("buy".parse::<TransactionMode>(), Ok(TransactionMode::Buy));
        assert_eq!(" Rent ".parse::<TransactionMode>(), Ok(TransactionMode::Rent));
        assert!("lease".parse::<TransactionMode>().is_err());
        assert_eq!(TransactionMode::Buy.toggled(), TransactionMode::Rent);
    }

    #[test]
    fn test_search_city_blank_means_no_filter() {
        assert_eq!(QueryFilter::default().search_city(), None);
        assert_eq!(QueryFilter::default().with_city("   ").search_city(), None);
        assert_eq!(
            QueryFilter::default().with_city(" Austin ").search_city(),
            Some("Austin")
        );
    }
}
