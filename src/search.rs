//! Search dispatch: one short-lived worker thread per catalog request.
//!
//! Requests may overlap freely, exactly like the live search box they
//! serve; ordering is resolved at the controller, which discards any
//! outcome older than the last one it applied.

use std::sync::mpsc::Sender;
use std::thread;

use crate::app::SearchJob;
use crate::catalog::{CatalogClient, Track};

/// What a finished search reports back to the event loop.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Sequence number of the job that produced this outcome.
    pub seq: u64,
    pub query: String,
    /// Empty both for "no results" and for a failed request.
    pub tracks: Vec<Track>,
}

/// Run `job` on its own thread, reporting the outcome over `results`.
///
/// The receiver side may already be gone during shutdown; the send result
/// is intentionally ignored.
pub fn dispatch(client: &CatalogClient, job: SearchJob, results: &Sender<SearchOutcome>) {
    let client = client.clone();
    let results = results.clone();

    thread::spawn(move || {
        tracing::debug!(seq = job.seq, query = %job.query, "search dispatched");
        let tracks = client.search(&job.query);
        let _ = results.send(SearchOutcome {
            seq: job.seq,
            query: job.query,
            tracks,
        });
    });
}
