//! Search orchestration
//!
//! This module turns a submitted form into one query per area and runs
//! those queries concurrently against a listing source.
//!
//! ## Components
//! - **Builder**: validates raw form values into `SearchCriteria`.
//! - **Fan-out**: spawns one task per area, collects formatted listings over
//!   a shared channel, and closes the aggregate once every area has finished.

pub mod builder;
pub mod fanout;


pub use builder::{SearchForm, FIELD_LABELS};
pub use fanout::{AggregatedResult, AreaFailure, SearchCoordinator};
