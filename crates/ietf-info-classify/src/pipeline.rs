//! The run: fetch the index once, then classify every candidate concurrently.

use std::collections::{BTreeMap, BTreeSet};
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use ietf_info_core::{
    Category, ClassificationResult, DocumentRecord, FilterCriteria, ResultSnapshot,
};
use ietf_info_fetch::{Fetcher, LookupClient, LookupError};
use ietf_info_index::{IndexError, IndexOptions};
use thiserror::Error;
use tracing::info;

use crate::classifier::{Classifier, DocumentLookups, DocumentOutcome};

/// Errors that end the run before any document is classified.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("could not fetch the RFC index: {0}")]
    IndexFetch(#[source] LookupError),
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error("invalid name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub index: IndexOptions,
    /// Upper bound on documents being looked up at once. `None` launches
    /// every candidate together.
    pub max_in_flight: Option<NonZeroUsize>,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub results: ResultSnapshot,
    /// Candidates for which no lookup mentioned the name.
    pub not_found: BTreeSet<u32>,
    pub candidates: usize,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn entries(&self, category: Category) -> Option<&BTreeMap<u32, String>> {
        self.results.get(&category)
    }

    pub fn count(&self, category: Category) -> usize {
        self.entries(category).map_or(0, BTreeMap::len)
    }
}

/// Run the whole attribution pass.
///
/// Only the index fetch can fail the run. Per-document lookup failures are
/// logged and treated as missing data for that document alone.
pub async fn run<F: Fetcher>(
    client: &LookupClient<F>,
    options: &RunOptions,
    criteria: &FilterCriteria,
) -> Result<RunReport, PipelineError> {
    let start = Instant::now();
    let classifier = Classifier::new(criteria)?;

    let html = client
        .fetch_index()
        .await
        .map_err(PipelineError::IndexFetch)?;
    let records = ietf_info_index::load_index(&html, &options.index, criteria)?;
    let candidates = records.len();

    let limit = options
        .max_in_flight
        .map_or(candidates.max(1), NonZeroUsize::get);
    info!(candidates, limit, "classifying candidates");

    let result = ClassificationResult::new();
    let outcomes: Vec<(u32, DocumentOutcome)> = stream::iter(records)
        .map(|record| check_document(client, &classifier, record, &result))
        .buffer_unordered(limit)
        .collect()
        .await;

    let not_found = outcomes
        .into_iter()
        .filter(|(_, outcome)| *outcome == DocumentOutcome::NotFound)
        .map(|(number, _)| number)
        .collect();

    let elapsed = start.elapsed();
    info!(candidates, elapsed_secs = elapsed.as_secs_f64(), "run complete");
    Ok(RunReport {
        results: result.snapshot(),
        not_found,
        candidates,
        elapsed,
    })
}

/// Look up and classify one document. Never fails; lookup errors are
/// carried into the classifier.
async fn check_document<F: Fetcher>(
    client: &LookupClient<F>,
    classifier: &Classifier,
    record: DocumentRecord,
    result: &ClassificationResult,
) -> (u32, DocumentOutcome) {
    let number = record.number();
    let metadata = client.metadata(number).await;
    let acknowledgments = if classifier.acknowledgments_enabled() {
        Some(client.acknowledgments(number).await)
    } else {
        None
    };
    let ballot = client.ballot(number).await;

    let lookups = DocumentLookups {
        metadata,
        acknowledgments,
        ballot,
    };
    (number, classifier.classify(&record, &lookups, result))
}
