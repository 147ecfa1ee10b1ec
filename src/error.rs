//! Typed errors for a house search.
//!
//! `InvalidInput` is raised before any network call is made. The remaining
//! variants are scoped to a single search area and never abort the others.

use thiserror::Error;

/// Errors that can occur while building or running a search.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A form field could not be turned into search criteria
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The HTTP exchange with the listings API failed
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// The response body was not a listings result set
    #[error("could not parse listings response: {0}")]
    ParseFailed(#[from] serde_json::Error),

    /// A listing carried a list date that is not RFC 3339
    #[error("could not format list date {value:?}: {source}")]
    DateFormatFailed {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The search was interrupted before this area finished
    #[error("search cancelled")]
    Cancelled,
}

impl SearchError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True when the user can fix the problem by editing the form.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}

pub type SearchResult<T> = std::result::Result<T, SearchError>;
