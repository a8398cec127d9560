use serde::{Deserialize, Serialize};

use crate::model::ListingRecord;

/// Parameters handed to the detail view when a card is selected.
///
/// Field names match [`ListingRecord`]'s wire names so the bag serializes the
/// same way on both sides of the navigation boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailParams {
    pub id: String,
    /// Cover image only.
    pub img: Option<String>,
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

impl From<&ListingRecord> for DetailParams {
    fn from(record: &ListingRecord) -> Self {
        Self {
            id: record.id.clone(),
            img: record.cover_image().map(str::to_string),
            starting_bid: record.starting_bid,
            area: record.area.clone(),
            bedroom: record.bedroom.clone(),
            bathroom: record.bathroom.clone(),
            city: record.city.clone(),
            country: record.country.clone(),
            is_hot: record.is_hot,
            description: record.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ListingRecord {
        ListingRecord {
            id: "r1".into(),
            img: vec!["u1".into(), "u2".into()],
            starting_bid: Some(100.0),
            area: Some("4000 sq ft".into()),
            bedroom: Some("2".into()),
            bathroom: Some("3".into()),
            city: Some("X".into()),
            country: Some("Y".into()),
            is_hot: true,
            description: Some("d".into()),
        }
    }

    #[test]
    fn test_params_from_record() {
        let params = DetailParams::from(&sample());

        assert_eq!(params.id, "r1");
        assert_eq!(params.img.as_deref(), Some("u1"));
        assert_eq!(params.starting_bid, Some(100.0));
        assert_eq!(params.area.as_deref(), Some("4000 sq ft"));
        assert_eq!(params.bedroom.as_deref(), Some("2"));
        assert_eq!(params.bathroom.as_deref(), Some("3"));
        assert_eq!(params.city.as_deref(), Some("X"));
        assert_eq!(params.country.as_deref(), Some("Y"));
        assert!(params.is_hot);
        assert_eq!(params.description.as_deref(), Some("d"));
    }

    #[test]
    fn test_field_names_survive_the_boundary() {
        let params = DetailParams::from(&sample());
        let value = serde_json::to_value(&params).unwrap();

        for field in [
            "id",
            "img",
            "starting_bid",
            "area",
            "bedroom",
            "bathroom",
            "city",
            "country",
            "isHot",
            "description",
        ] {
            assert!(value.get(field).is_some(), "missing {field}");
        }

        let back: DetailParams = serde_json::from_value(value).unwrap();
        assert_eq!(back, params);
    }
}
