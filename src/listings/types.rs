//! Wire types for the listings search endpoint.

use crate::error::SearchResult;
use crate::format::parse_list_date;
use crate::models::{Address, AreaQuery, ListingRecord, ListingStatus};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Request body for one area
#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub limit: u32,
    pub offset: u32,
    pub postal_code: &'a str,
    pub status: &'a [ListingStatus],
    pub sort_fields: SortFields,
    pub list_price: PriceFilter,
    pub beds: MinFilter,
    pub baths: MinFilter,
    pub sqft: MinFilter,
}

#[derive(Debug, Serialize)]
pub struct SortFields {
    pub direction: &'static str,
    pub field: &'static str,
}

impl Default for SortFields {
    fn default() -> Self {
        Self {
            direction: "desc",
            field: "list_date",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PriceFilter {
    pub min: u64,
    /// Omitted when the user left the upper bound open
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct MinFilter {
    pub min: u32,
}

impl<'a> SearchRequest<'a> {
    pub fn for_query(query: &'a AreaQuery) -> Self {
        let filters = &query.filters;
        Self {
            limit: filters.results_per_area,
            offset: 0,
            postal_code: &query.area,
            status: &query.statuses,
            sort_fields: SortFields::default(),
            list_price: PriceFilter {
                min: filters.price.min,
                max: filters.price.upper_bound(),
            },
            beds: MinFilter { min: filters.min_beds },
            baths: MinFilter { min: filters.min_baths },
            sqft: MinFilter { min: filters.min_sqft },
        }
    }
}

// data
//  └── home_search
//       └── results[]
//            ├── location.address { line, city, state_code, postal_code }
//            ├── description { sqft, beds, baths }
//            └── href, list_price, price_reduced_amount,
//                last_sold_price, list_date, status
//
// The envelope is required. Every leaf may be absent, null or of the
// wrong type; such leaves fall back to their zero value.

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub data: ResponseData,
}

#[derive(Debug, Deserialize)]
pub struct ResponseData {
    pub home_search: HomeSearch,
}

#[derive(Debug, Deserialize)]
pub struct HomeSearch {
    pub results: Vec<RawListing>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawListing {
    #[serde(deserialize_with = "lenient")]
    pub location: RawLocation,
    #[serde(deserialize_with = "lenient")]
    pub description: RawDescription,
    #[serde(deserialize_with = "lenient")]
    pub href: String,
    #[serde(deserialize_with = "lenient_int")]
    pub list_price: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub price_reduced_amount: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub last_sold_price: i64,
    #[serde(deserialize_with = "lenient")]
    pub list_date: String,
    #[serde(deserialize_with = "lenient")]
    pub status: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawLocation {
    #[serde(deserialize_with = "lenient")]
    pub address: RawAddress,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawAddress {
    #[serde(deserialize_with = "lenient")]
    pub line: String,
    #[serde(deserialize_with = "lenient")]
    pub city: String,
    #[serde(deserialize_with = "lenient")]
    pub state_code: String,
    #[serde(deserialize_with = "lenient")]
    pub postal_code: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawDescription {
    #[serde(deserialize_with = "lenient_int")]
    pub sqft: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub beds: i64,
    #[serde(deserialize_with = "lenient_int")]
    pub baths: i64,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_json::from_value(value.clone()).unwrap_or_else(|err| {
        warn!(%value, error = %err, "Ignoring listing field of unexpected type");
        T::default()
    }))
}

/// Integers may arrive as floats (`2.5` baths) or numeric strings
fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Null => Some(0),
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        warn!(%value, "Ignoring non-numeric listing field");
        0
    }))
}

impl RawListing {
    /// Convert into a listing, parsing the list date
    pub fn into_record(self) -> SearchResult<ListingRecord> {
        let list_date = parse_list_date(&self.list_date)?;
        let RawAddress {
            line,
            city,
            state_code,
            postal_code,
        } = self.location.address;

        Ok(ListingRecord {
            address: Address {
                line,
                city,
                state_code,
                postal_code,
            },
            href: self.href,
            list_price: self.list_price,
            price_reduced_amount: self.price_reduced_amount,
            last_sold_price: self.last_sold_price,
            list_date,
            status: self.status,
            sqft: self.description.sqft,
            beds: self.description.beds,
            baths: self.description.baths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PriceRange, SearchCriteria, SearchFilters, TransactionIntent};
    use serde_json::json;

    fn query(intent: TransactionIntent, max: u64) -> AreaQuery {
        SearchCriteria {
            areas: vec!["75204".to_string()],
            filters: SearchFilters {
                price: PriceRange { min: 100_000, max },
                min_beds: 2,
                min_baths: 1,
                min_sqft: 800,
                intent,
                results_per_area: 5,
            },
        }
        .area_queries()
        .remove(0)
    }

    #[test]
    fn request_body_matches_api_schema() {
        let query = query(TransactionIntent::Buy, 500_000);
        let body = serde_json::to_value(SearchRequest::for_query(&query)).unwrap();

        assert_eq!(
            body,
            json!({
                "limit": 5,
                "offset": 0,
                "postal_code": "75204",
                "status": ["for_sale", "ready_to_build"],
                "sort_fields": { "direction": "desc", "field": "list_date" },
                "list_price": { "min": 100000, "max": 500000 },
                "beds": { "min": 2 },
                "baths": { "min": 1 },
                "sqft": { "min": 800 }
            })
        );
    }

    #[test]
    fn open_price_ceiling_omits_max() {
        let query = query(TransactionIntent::Rent, 0);
        let body = serde_json::to_value(SearchRequest::for_query(&query)).unwrap();

        assert_eq!(body["list_price"], json!({ "min": 100000 }));
        assert_eq!(body["status"], json!(["for_rent"]));
    }

    #[test]
    fn absent_and_null_leaves_become_zero_values() {
        let raw: RawListing = serde_json::from_value(json!({
            "location": null,
            "description": { "beds": 4, "baths": null },
            "list_price": null,
            "list_date": "2024-02-29T10:00:00Z"
        }))
        .unwrap();

        let record = raw.into_record().unwrap();
        assert_eq!(record.address, Address::default());
        assert_eq!(record.href, "");
        assert_eq!(record.list_price, 0);
        assert_eq!(record.beds, 4);
        assert_eq!(record.baths, 0);
        assert_eq!(record.sqft, 0);
        assert_eq!(record.status, "");
    }

    #[test]
    fn mistyped_leaves_become_zero_values() {
        let raw: RawListing = serde_json::from_value(json!({
            "location": { "address": { "line": "9 Elm St", "city": 42, "postal_code": ["75204"] } },
            "description": { "beds": "3", "baths": 2.5, "sqft": { "value": 900 } },
            "href": false,
            "list_price": 415000.0,
            "list_date": "2024-02-29T10:00:00Z",
            "status": "for_sale"
        }))
        .unwrap();

        let record = raw.into_record().unwrap();
        assert_eq!(record.address.line, "9 Elm St");
        assert_eq!(record.address.city, "");
        assert_eq!(record.address.postal_code, "");
        assert_eq!(record.href, "");
        assert_eq!(record.list_price, 415000);
        assert_eq!(record.beds, 3);
        assert_eq!(record.baths, 2);
        assert_eq!(record.sqft, 0);
        assert_eq!(record.status, "for_sale");
    }

    #[test]
    fn mistyped_nested_object_becomes_default() {
        let raw: RawListing = serde_json::from_value(json!({
            "location": "unknown",
            "description": [1, 2, 3],
            "list_date": "2024-02-29T10:00:00Z"
        }))
        .unwrap();

        let record = raw.into_record().unwrap();
        assert_eq!(record.address, Address::default());
        assert_eq!((record.beds, record.baths, record.sqft), (0, 0, 0));
    }

    #[test]
    fn envelope_is_required() {
        assert!(serde_json::from_str::<SearchResponse>(r#"{"data":{}}"#).is_err());
        assert!(serde_json::from_str::<SearchResponse>(r#"{"data":{"home_search":{"results":null}}}"#).is_err());
        assert!(serde_json::from_str::<SearchResponse>(r#"{"data":{"home_search":{"results":[]}}}"#).is_ok());
    }
}
