use crate::config::{Config, DatePolicy};
use crate::error::{SearchError, SearchResult};
use crate::listings::traits::ListingSource;
use crate::listings::types::{SearchRequest, SearchResponse};
use crate::models::{AreaQuery, ListingRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "X-RapidAPI-Key";
const API_HOST_HEADER: &str = "X-RapidAPI-Host";

/// Longest slice of an error body kept in a `FetchFailed` message
const BODY_EXCERPT_CHARS: usize = 200;

/// Client for the realtor listings search API
pub struct RealtorClient {
    client: Client,
    endpoint: String,
    api_key: String,
    api_host: String,
    date_policy: DatePolicy,
}

impl RealtorClient {
    /// Create a new client from runtime settings
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => {
                warn!("No API key configured, the listings API will reject every request");
                String::new()
            }
        };

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
            api_host: config.api_host.clone(),
            date_policy: config.date_policy,
        })
    }
}

#[async_trait]
impl ListingSource for RealtorClient {
    async fn fetch(&self, query: &AreaQuery) -> SearchResult<Vec<ListingRecord>> {
        let body = SearchRequest::for_query(query);

        debug!(endpoint = %self.endpoint, area = %query.area, "Posting listings search");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header(API_HOST_HEADER, self.api_host.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| SearchError::FetchFailed(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| SearchError::FetchFailed(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            warn!(area = %query.area, %status, "Listings API returned an error status");
            let excerpt: String = text.chars().take(BODY_EXCERPT_CHARS).collect();
            return Err(SearchError::FetchFailed(format!(
                "listings API returned {}: {}",
                status, excerpt
            )));
        }

        debug!(area = %query.area, bytes = text.len(), "Downloaded listings response");

        let listings = parse_listings(&text, self.date_policy)?;
        info!(area = %query.area, count = listings.len(), "Parsed listings");
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "realtor"
    }
}

/// Parse a search response body, keeping the API's listing order
pub fn parse_listings(body: &str, date_policy: DatePolicy) -> SearchResult<Vec<ListingRecord>> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let results = response.data.home_search.results;

    let mut listings = Vec::with_capacity(results.len());
    for (idx, raw) in results.into_iter().enumerate() {
        match raw.into_record() {
            Ok(listing) => listings.push(listing),
            Err(err) if date_policy == DatePolicy::Skip => {
                warn!(index = idx, error = %err, "Skipping listing with unusable list date");
            }
            Err(err) => return Err(err),
        }
    }

    Ok(listings)
}
