//! Search outcomes and superseded-query detection.
//!
//! The engine distinguishes three results a renderer must tell apart: the collection is not
//! available yet, no filter is active (show everything), or a filter produced matches (which
//! may be none at all).

use std::sync::atomic::{AtomicU64, Ordering};

use pomona_query::Query;

use crate::{matcher::evaluate, record::Record};

/// The effective filter of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// No active filter; the caller shows the whole collection.
    All,
    /// Records must satisfy this query.
    Query(Query),
}

/// Result of running a [`Filter`] against an optional snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<'a> {
    /// The collection has not been resolved yet; nothing to show.
    Pending,
    /// No filter was active: every record, in collection order.
    Unfiltered(&'a [Record]),
    /// Records matching the active query, in collection order.
    Matches(Vec<&'a Record>),
}

impl<'a> SearchOutcome<'a> {
    /// Returns the records to display, empty while pending.
    pub fn records(&self) -> Vec<&'a Record> {
        match self {
            Self::Pending => Vec::new(),
            Self::Unfiltered(records) => records.iter().collect(),
            Self::Matches(matches) => matches.clone(),
        }
    }

    /// Returns true if a filter ran and selected nothing.
    pub fn is_no_match(&self) -> bool {
        matches!(self, Self::Matches(m) if m.is_empty())
    }
}

/// Runs `filter` against `snapshot`, or reports [`SearchOutcome::Pending`] without one.
pub fn search<'a>(snapshot: Option<&'a [Record]>, filter: &Filter) -> SearchOutcome<'a> {
    let Some(records) = snapshot else {
        return SearchOutcome::Pending;
    };
    match filter {
        Filter::All => SearchOutcome::Unfiltered(records),
        Filter::Query(query) => SearchOutcome::Matches(evaluate(records, query)),
    }
}

/// Identifies one submitted query text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Submission sequence number.
    generation: u64,
    /// The submitted text.
    text: String,
}

impl Ticket {
    /// The text this ticket was issued for.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Tracks the most recently submitted query so stale results can be dropped.
///
/// There is no cancellation: an older evaluation runs to completion, and the caller checks
/// its ticket before rendering.
#[derive(Debug, Default)]
pub struct QueryGuard {
    /// Generation of the latest submission.
    latest: AtomicU64,
}

impl QueryGuard {
    /// Creates a guard with no submissions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new submission, superseding every earlier ticket.
    pub fn submit(&self, text: impl Into<String>) -> Ticket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket {
            generation,
            text: text.into(),
        }
    }

    /// Returns true if no newer submission has been made since `ticket`.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.generation
    }
}
