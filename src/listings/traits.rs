use crate::error::SearchResult;
use crate::models::{AreaQuery, ListingRecord};
use async_trait::async_trait;

/// Common trait for listing backends
/// The fan-out coordinator only talks to this, so tests can swap in a fake source
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one page of listings for a single area
    async fn fetch(&self, query: &AreaQuery) -> SearchResult<Vec<ListingRecord>>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;
}
