use crate::error::{SearchError, SearchResult};
use crate::models::{PriceRange, SearchCriteria, SearchFilters, TransactionIntent};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Form labels, in the order the fields are asked for
pub const FIELD_LABELS: [&str; 8] = [
    "Define your search area(s) Ex.(Dallas,Houston) or (75204,Austin)",
    "Minimum Price",
    "Maximum Price",
    "Bed Minimum",
    "Bath Minimum",
    "Square Footage Minimum",
    "Looking to Buy or Rent?",
    "Specify Number of Results to see per search area",
];

/// Raw field values as typed into the search form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchForm {
    pub areas: String,
    pub price_min: String,
    pub price_max: String,
    pub beds_min: String,
    pub baths_min: String,
    pub sqft_min: String,
    pub intent: String,
    pub results_per_area: String,
}

impl SearchForm {
    /// Field values in form order
    pub fn values(&self) -> [&str; 8] {
        [
            self.areas.as_str(),
            self.price_min.as_str(),
            self.price_max.as_str(),
            self.beds_min.as_str(),
            self.baths_min.as_str(),
            self.sqft_min.as_str(),
            self.intent.as_str(),
            self.results_per_area.as_str(),
        ]
    }

    /// Mutable field slots in form order
    pub fn fields_mut(&mut self) -> [&mut String; 8] {
        [
            &mut self.areas,
            &mut self.price_min,
            &mut self.price_max,
            &mut self.beds_min,
            &mut self.baths_min,
            &mut self.sqft_min,
            &mut self.intent,
            &mut self.results_per_area,
        ]
    }

    /// Echo of what the user asked for
    pub fn summary(&self) -> String {
        let mut out = String::from("Your specifications are...\n");
        for (label, value) in FIELD_LABELS.iter().zip(self.values()) {
            out.push_str(label);
            out.push_str(": ");
            out.push_str(value);
            out.push('\n');
        }
        out
    }

    /// Validate the form into search criteria
    pub fn to_criteria(&self) -> SearchResult<SearchCriteria> {
        let areas = parse_areas(&self.areas)?;

        let price = PriceRange {
            min: parse_number("minimum price", &self.price_min)?,
            max: parse_number("maximum price", &self.price_max)?,
        };
        if let Some(max) = price.upper_bound() {
            if price.min > max {
                return Err(SearchError::invalid(
                    "maximum price",
                    format!("{} is below the minimum price {}", max, price.min),
                ));
            }
        }

        let filters = SearchFilters {
            price,
            min_beds: parse_number("bed minimum", &self.beds_min)?,
            min_baths: parse_number("bath minimum", &self.baths_min)?,
            min_sqft: parse_number("square footage minimum", &self.sqft_min)?,
            intent: parse_intent(&self.intent),
            results_per_area: parse_number("number of results", &self.results_per_area)?,
        };
        if filters.results_per_area == 0 {
            return Err(SearchError::invalid("number of results", "must be at least 1"));
        }

        Ok(SearchCriteria { areas, filters })
    }
}

/// Split the comma separated area field, dropping blanks and repeats
pub fn parse_areas(raw: &str) -> SearchResult<Vec<String>> {
    let mut areas: Vec<String> = Vec::new();
    for area in raw.split(',').map(str::trim).filter(|a| !a.is_empty()) {
        if !areas.iter().any(|seen| seen == area) {
            areas.push(area.to_string());
        }
    }

    if areas.is_empty() {
        return Err(SearchError::invalid(
            "search area",
            "enter at least one city or postal code",
        ));
    }
    Ok(areas)
}

/// Anything but "buy" (any case) is a rental search
pub fn parse_intent(raw: &str) -> TransactionIntent {
    if raw.trim().eq_ignore_ascii_case("buy") {
        TransactionIntent::Buy
    } else {
        TransactionIntent::Rent
    }
}

fn parse_number<T: FromStr>(field: &'static str, raw: &str) -> SearchResult<T> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(SearchError::invalid(field, "a value is required"));
    }
    raw.parse().map_err(|_| match raw.parse::<i64>() {
        Ok(n) if n < 0 => SearchError::invalid(field, format!("must not be negative, got {}", n)),
        _ => SearchError::invalid(field, format!("expected a whole number, got {:?}", raw)),
    })
}
