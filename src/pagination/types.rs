//! Pagination types and traits

use crate::error::{Error, Result};
use crate::types::Photo;
use async_trait::async_trait;
use std::sync::Arc;

/// Capability that fetches one bounded page of photos
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch up to `limit` photos starting at `offset`
    async fn fetch_page(&self, offset: u64, limit: u32) -> Result<Vec<Photo>>;
}

/// Offset cursor with a fixed page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    /// Number of items retrieved so far in this session
    pub offset: u64,
    /// Requested page size
    pub limit: u32,
}

impl PageCursor {
    /// Create a cursor at offset zero
    pub fn new(limit: u32) -> Self {
        Self { offset: 0, limit }
    }

    /// Advance by the number of items actually received
    pub fn advance(&mut self, received: usize) {
        self.offset += received as u64;
    }

    /// Whether a page of `received` items means more may follow
    pub fn is_full_page(&self, received: usize) -> bool {
        received == self.limit as usize
    }
}

/// What a single `load_more()` call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page was appended and more may follow
    Applied {
        /// Items returned by the fetch
        received: usize,
    },
    /// A short page was appended; the collection is exhausted
    Exhausted {
        /// Items returned by the fetch
        received: usize,
    },
    /// The fetch failed and the error was recorded
    Failed,
    /// Nothing was issued: a fetch is in flight or the collection is exhausted
    Skipped,
    /// The fetch completed after a reset and its result was discarded
    Stale,
}

impl LoadOutcome {
    /// Whether a fetch was actually issued by this call
    pub fn issued_fetch(&self) -> bool {
        !matches!(self, Self::Skipped)
    }
}

/// Point-in-time view of an engine's observable state
#[derive(Debug, Clone)]
pub struct EngineSnapshot {
    /// Loaded sequence in arrival order
    pub photos: Arc<Vec<Photo>>,
    /// Next fetch offset
    pub offset: u64,
    /// Whether more pages may be available
    pub has_more: bool,
    /// Whether a fetch is outstanding
    pub loading: bool,
    /// Most recent fetch error
    pub error: Option<Arc<Error>>,
}

impl EngineSnapshot {
    /// State of a freshly reset engine
    pub fn initial() -> Self {
        Self {
            photos: Arc::new(Vec::new()),
            offset: 0,
            has_more: true,
            loading: false,
            error: None,
        }
    }
}
