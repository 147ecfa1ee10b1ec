//! House Hunt
//!
//! Multi-area property search against the realtor listings API.
//!
//! ## Architecture
//! - `search::builder` turns raw form values into validated criteria.
//! - `listings` fetches and parses one area's listings.
//! - `format` renders a listing as a text block.
//! - `search::fanout` runs every area concurrently and aggregates the text.

pub mod config;
pub mod error;
pub mod format;
pub mod listings;
pub mod models;
pub mod search;

pub use error::{SearchError, SearchResult};
