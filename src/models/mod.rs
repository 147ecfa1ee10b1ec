use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Whether the user wants to buy or rent
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransactionIntent {
    Buy,
    Rent,
}

impl TransactionIntent {
    /// Listing statuses the API should match for this intent
    pub fn statuses(self) -> Vec<ListingStatus> {
        match self {
            Self::Buy => vec![ListingStatus::ForSale, ListingStatus::ReadyToBuild],
            Self::Rent => vec![ListingStatus::ForRent],
        }
    }
}

/// Status filter values understood by the listings API
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    ForSale,
    ReadyToBuild,
    ForRent,
}

/// Price bounds. A `max` of zero means unbounded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PriceRange {
    pub min: u64,
    pub max: u64,
}

impl PriceRange {
    pub fn upper_bound(&self) -> Option<u64> {
        (self.max > 0).then_some(self.max)
    }
}

/// Filters shared by every area of one search
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchFilters {
    pub price: PriceRange,
    pub min_beds: u32,
    pub min_baths: u32,
    pub min_sqft: u32,
    pub intent: TransactionIntent,
    /// Listings requested per area
    pub results_per_area: u32,
}

/// One validated form submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchCriteria {
    pub areas: Vec<String>,
    pub filters: SearchFilters,
}

impl SearchCriteria {
    /// One query per area, in the order the areas were entered
    pub fn area_queries(&self) -> Vec<AreaQuery> {
        self.areas
            .iter()
            .map(|area| AreaQuery {
                area: area.clone(),
                filters: self.filters,
                statuses: self.filters.intent.statuses(),
            })
            .collect()
    }
}

/// Search criteria bound to a single area
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaQuery {
    pub area: String,
    pub filters: SearchFilters,
    pub statuses: Vec<ListingStatus>,
}

/// Postal address of a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Address {
    pub line: String,
    pub city: String,
    pub state_code: String,
    pub postal_code: String,
}

/// Core listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListingRecord {
    pub address: Address,
    pub href: String,
    pub list_price: i64,
    pub price_reduced_amount: i64,
    pub last_sold_price: i64,
    pub list_date: NaiveDate,
    pub status: String,
    pub sqft: i64,
    pub beds: i64,
    pub baths: i64,
}
