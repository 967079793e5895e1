//! Pagination engine implementation

use super::types::{EngineSnapshot, LoadOutcome, PageCursor, PageFetcher};
use crate::error::{Error, Result};
use crate::types::{Photo, PhotoId};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

#[derive(Debug)]
struct EngineState {
    photos: Arc<Vec<Photo>>,
    seen: HashSet<PhotoId>,
    cursor: PageCursor,
    has_more: bool,
    in_flight: bool,
    error: Option<Arc<Error>>,
    /// Bumped by every reset; fetches tagged with an older value are stale
    generation: u64,
    requests_issued: u64,
    /// Failed fetches over the engine's lifetime, never reset
    errors_recorded: u64,
}

impl EngineState {
    fn new(page_size: u32) -> Self {
        Self {
            photos: Arc::new(Vec::new()),
            seen: HashSet::new(),
            cursor: PageCursor::new(page_size),
            has_more: true,
            in_flight: false,
            error: None,
            generation: 0,
            requests_issued: 0,
            errors_recorded: 0,
        }
    }

    fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            photos: Arc::clone(&self.photos),
            offset: self.cursor.offset,
            has_more: self.has_more,
            loading: self.in_flight,
            error: self.error.clone(),
        }
    }

    /// Append in arrival order, returning how many ids were already loaded
    fn append(&mut self, items: Vec<Photo>) -> usize {
        let photos = Arc::make_mut(&mut self.photos);
        let mut duplicates = 0;
        for photo in items {
            if self.seen.insert(photo.id.clone()) {
                photos.push(photo);
            } else {
                duplicates += 1;
            }
        }
        duplicates
    }
}

/// Incremental loader for one independent photo listing
pub struct PaginationEngine {
    fetcher: Arc<dyn PageFetcher>,
    state: Mutex<EngineState>,
    updates: watch::Sender<EngineSnapshot>,
}

impl PaginationEngine {
    /// Create an engine fetching `page_size` photos per request
    pub fn new(fetcher: Arc<dyn PageFetcher>, page_size: u32) -> Result<Self> {
        if page_size == 0 {
            return Err(Error::invalid_config("page size must be at least 1"));
        }

        let (updates, _) = watch::channel(EngineSnapshot::initial());
        Ok(Self {
            fetcher,
            state: Mutex::new(EngineState::new(page_size)),
            updates,
        })
    }

    /// Clear all loaded state without touching the network
    ///
    /// Safe while a fetch is outstanding: that fetch's result is discarded
    /// when it lands.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        let page_size = state.cursor.limit;
        let generation = state.generation + 1;
        let requests_issued = state.requests_issued;
        let errors_recorded = state.errors_recorded;
        *state = EngineState {
            generation,
            requests_issued,
            errors_recorded,
            ..EngineState::new(page_size)
        };
        debug!(generation, "Pagination reset");
        self.publish(&state);
    }

    /// Fetch the next page, unless one is in flight or the collection is
    /// exhausted
    pub async fn load_more(&self) -> LoadOutcome {
        let (generation, cursor) = {
            let mut state = self.state.lock();
            if state.in_flight || !state.has_more {
                return LoadOutcome::Skipped;
            }
            state.in_flight = true;
            state.error = None;
            state.requests_issued += 1;
            self.publish(&state);
            (state.generation, state.cursor)
        };

        let mut guard = InFlightGuard {
            engine: self,
            generation,
            armed: true,
        };

        debug!(
            offset = cursor.offset,
            limit = cursor.limit,
            generation,
            "Requesting page"
        );
        let result = self.fetcher.fetch_page(cursor.offset, cursor.limit).await;
        guard.armed = false;

        let mut state = self.state.lock();
        if state.generation != generation {
            warn!(
                generation,
                current = state.generation,
                "Discarding page fetched before reset"
            );
            return LoadOutcome::Stale;
        }

        state.in_flight = false;
        let outcome = match result {
            Ok(items) => {
                let received = items.len();
                let duplicates = state.append(items);
                if duplicates > 0 {
                    warn!(duplicates, "Skipped photos already present in listing");
                }
                state.cursor.advance(received);
                state.has_more = state.cursor.is_full_page(received);
                debug!(
                    received,
                    offset = state.cursor.offset,
                    has_more = state.has_more,
                    "Page applied"
                );
                if state.has_more {
                    LoadOutcome::Applied { received }
                } else {
                    LoadOutcome::Exhausted { received }
                }
            }
            Err(e) => {
                warn!(error = %e, offset = cursor.offset, "Page fetch failed");
                state.error = Some(Arc::new(e));
                state.errors_recorded += 1;
                LoadOutcome::Failed
            }
        };

        self.publish(&state);
        outcome
    }

    /// Current loaded sequence
    pub fn photos(&self) -> Arc<Vec<Photo>> {
        Arc::clone(&self.state.lock().photos)
    }

    /// Next fetch offset
    pub fn offset(&self) -> u64 {
        self.state.lock().cursor.offset
    }

    /// Requested page size
    pub fn page_size(&self) -> u32 {
        self.state.lock().cursor.limit
    }

    /// Whether more pages may be available
    pub fn has_more(&self) -> bool {
        self.state.lock().has_more
    }

    /// Whether a fetch is outstanding
    pub fn loading(&self) -> bool {
        self.state.lock().in_flight
    }

    /// Most recent fetch error, if any
    pub fn error(&self) -> Option<Arc<Error>> {
        self.state.lock().error.clone()
    }

    /// Number of resets performed so far
    pub fn generation(&self) -> u64 {
        self.state.lock().generation
    }

    /// Total fetches issued over the engine's lifetime
    pub fn requests_issued(&self) -> u64 {
        self.state.lock().requests_issued
    }

    /// Total failed fetches over the engine's lifetime
    ///
    /// Unlike [`error`](Self::error) this never goes back down, so an error
    /// cleared by a later load is still visible here.
    pub fn errors_recorded(&self) -> u64 {
        self.state.lock().errors_recorded
    }

    /// Snapshot of all observable state
    pub fn snapshot(&self) -> EngineSnapshot {
        self.state.lock().snapshot()
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.updates.subscribe()
    }

    fn publish(&self, state: &EngineState) {
        self.updates.send_replace(state.snapshot());
    }
}

impl std::fmt::Debug for PaginationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginationEngine")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

/// Releases the in-flight latch if a `load_more` future is dropped mid-fetch
struct InFlightGuard<'a> {
    engine: &'a PaginationEngine,
    generation: u64,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut state = self.engine.state.lock();
        if state.generation == self.generation && state.in_flight {
            debug!(generation = self.generation, "Page request abandoned");
            state.in_flight = false;
            self.engine.publish(&state);
        }
    }
}
