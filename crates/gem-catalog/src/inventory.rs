//! Inventory snapshot store.
//!
//! Holds the last successfully loaded catalog and the load state. Each fetch
//! is issued a ticket; only the newest ticket may publish, so a slow earlier
//! fetch cannot overwrite a later one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stone::Stone;
use crate::tag::Tag;

/// Normalized result of one fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPayload {
    pub stones: Vec<Stone>,
    pub tags: Vec<Tag>,
}

impl CatalogPayload {
    pub fn new(stones: Vec<Stone>, tags: Vec<Tag>) -> Self {
        Self { stones, tags }
    }
}

/// An immutable, cheaply cloned view of loaded data.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub stones: Arc<[Stone]>,
    pub tags: Arc<[Tag]>,
    /// Ticket number of the fetch that produced this snapshot.
    pub generation: u64,
    pub fetched_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }
}

/// What the browse screen should show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Ready,
    /// Loaded, but the catalog has no stones.
    Empty,
    /// The last fetch failed. Earlier data is still available.
    Failed(String),
}

impl LoadState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Ready => "ready",
            LoadState::Empty => "empty",
            LoadState::Failed(_) => "failed",
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

/// Proof of a started fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Last-writer-wins catalog store.
#[derive(Debug)]
pub struct Inventory {
    snapshot: Option<CatalogSnapshot>,
    state: LoadState,
    issued: u64,
    pending: Option<u64>,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new()
    }
}

impl Inventory {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            state: LoadState::Loading,
            issued: 0,
            pending: None,
        }
    }

    /// Start a fetch. Any fetch still in flight becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.pending = Some(self.issued);
        self.state = LoadState::Loading;
        tracing::debug!(ticket = self.issued, "catalog fetch started");
        FetchTicket(self.issued)
    }

    /// Publish the outcome of a fetch.
    ///
    /// Returns `false` and changes nothing when the ticket is not the newest
    /// outstanding one. A failure keeps the previous snapshot.
    pub fn complete(&mut self, ticket: FetchTicket, outcome: Result<CatalogPayload, String>) -> bool {
        if self.pending != Some(ticket.0) {
            tracing::debug!(ticket = ticket.0, "discarding stale catalog fetch");
            return false;
        }
        self.pending = None;

        match outcome {
            Ok(payload) => {
                let snapshot = CatalogSnapshot {
                    stones: payload.stones.into(),
                    tags: payload.tags.into(),
                    generation: ticket.0,
                    fetched_at: Utc::now(),
                };
                self.state = if snapshot.is_empty() {
                    LoadState::Empty
                } else {
                    LoadState::Ready
                };
                tracing::info!(
                    stones = snapshot.stones.len(),
                    tags = snapshot.tags.len(),
                    generation = snapshot.generation,
                    "catalog loaded"
                );
                self.snapshot = Some(snapshot);
            }
            Err(message) => {
                tracing::warn!(ticket = ticket.0, error = %message, "catalog fetch failed");
                self.state = LoadState::Failed(message);
            }
        }
        true
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// The last successfully loaded data, if any.
    pub fn snapshot(&self) -> Option<&CatalogSnapshot> {
        self.snapshot.as_ref()
    }

    /// Stones of the current snapshot, empty when nothing has loaded.
    pub fn stones(&self) -> Arc<[Stone]> {
        self.snapshot
            .as_ref()
            .map(|s| Arc::clone(&s.stones))
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    pub fn tags(&self) -> Arc<[Tag]> {
        self.snapshot
            .as_ref()
            .map(|s| Arc::clone(&s.tags))
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    /// Whether a fetch is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.pending.is_some()
    }
}
