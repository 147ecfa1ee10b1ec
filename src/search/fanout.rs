use crate::error::{SearchError, SearchResult};
use crate::format::format_listing;
use crate::listings::ListingSource;
use crate::models::{AreaQuery, SearchCriteria};
use crate::search::builder::SearchForm;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn, Instrument};

/// An area that contributed no listings because its search failed
#[derive(Debug)]
pub struct AreaFailure {
    pub area: String,
    pub error: SearchError,
}

/// Everything collected from one multi-area search
#[derive(Debug, Default)]
pub struct AggregatedResult {
    /// Formatted listings, in arrival order
    pub blocks: Vec<String>,
    pub failures: Vec<AreaFailure>,
    /// Areas whose task ran to the end, successfully or not
    pub areas_completed: usize,
}

impl AggregatedResult {
    /// Text shown to the user: listings first, then one notice per failed area
    pub fn render(&self) -> String {
        if self.blocks.is_empty() && self.failures.is_empty() {
            return "No listings matched your search.\n".to_string();
        }

        let mut out = self.blocks.join("\n");
        for failure in &self.failures {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("Search in {} failed: {}\n", failure.area, failure.error));
        }
        out
    }
}

/// What an area task reports back to the collector
enum AreaEvent {
    Listing(String),
    Failed(AreaFailure),
    Finished { area: String },
}

/// Runs one listing search per area concurrently and merges the output
#[derive(Clone)]
pub struct SearchCoordinator {
    source: Arc<dyn ListingSource>,
}

impl SearchCoordinator {
    pub fn new(source: Arc<dyn ListingSource>) -> Self {
        Self { source }
    }

    /// Validate a form and run the search. Invalid input returns before any
    /// request is sent.
    pub async fn submit(
        &self,
        form: &SearchForm,
        cancel: CancellationToken,
    ) -> SearchResult<AggregatedResult> {
        let criteria = form.to_criteria()?;
        Ok(self.run_with_cancel(&criteria, cancel).await)
    }

    /// Run a search and return the text to show the user
    pub async fn run_search(&self, criteria: &SearchCriteria) -> String {
        self.run(criteria).await.render()
    }

    pub async fn run(&self, criteria: &SearchCriteria) -> AggregatedResult {
        self.run_with_cancel(criteria, CancellationToken::new()).await
    }

    /// Search every area and wait for all of them.
    ///
    /// Cancelling the token makes in-flight areas finish with
    /// `SearchError::Cancelled`; the call still returns only once every
    /// area task is done.
    pub async fn run_with_cancel(
        &self,
        criteria: &SearchCriteria,
        cancel: CancellationToken,
    ) -> AggregatedResult {
        let queries = criteria.area_queries();
        let mut pending: Vec<String> = queries.iter().map(|q| q.area.clone()).collect();

        info!(
            source = self.source.source_name(),
            areas = queries.len(),
            "Starting search"
        );

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = JoinSet::new();

        for query in queries {
            let span = info_span!("area", area = %query.area);
            tasks.spawn(
                search_area(Arc::clone(&self.source), query, tx.clone(), cancel.clone())
                    .instrument(span),
            );
        }
        // The channel closes once the last task drops its sender
        drop(tx);

        let mut result = AggregatedResult::default();
        while let Some(event) = rx.recv().await {
            match event {
                AreaEvent::Listing(block) => result.blocks.push(block),
                AreaEvent::Failed(failure) => result.failures.push(failure),
                AreaEvent::Finished { area } => {
                    if let Some(pos) = pending.iter().position(|p| *p == area) {
                        pending.remove(pos);
                    }
                    result.areas_completed += 1;
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(err) = joined {
                error!(error = %err, "Area task stopped before finishing");
            }
        }

        for area in pending {
            result.failures.push(AreaFailure {
                area,
                error: SearchError::FetchFailed("search task stopped unexpectedly".to_string()),
            });
        }

        info!(
            listings = result.blocks.len(),
            failed_areas = result.failures.len(),
            completed_areas = result.areas_completed,
            "Search finished"
        );

        result
    }
}

async fn search_area(
    source: Arc<dyn ListingSource>,
    query: AreaQuery,
    tx: UnboundedSender<AreaEvent>,
    cancel: CancellationToken,
) {
    let outcome = tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SearchError::Cancelled),
        fetched = source.fetch(&query) => fetched,
    };

    // Sends cannot fail: the collector holds the receiver until every sender is gone
    match outcome {
        Ok(listings) => {
            debug!(count = listings.len(), "Formatting listings");
            for listing in &listings {
                let _ = tx.send(AreaEvent::Listing(format_listing(listing)));
            }
        }
        Err(error) => {
            warn!(error = %error, "Area search failed");
            let _ = tx.send(AreaEvent::Failed(AreaFailure {
                area: query.area.clone(),
                error,
            }));
        }
    }

    let _ = tx.send(AreaEvent::Finished { area: query.area });
}
