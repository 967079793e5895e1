//! Error-pause policy for automatic loading

use crate::pagination::{LoadOutcome, PaginationEngine};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// View-level preconditions for automatic continuation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContinuationGate {
    /// The view owning this listing is the one currently shown
    pub view_active: bool,
    /// An authenticated session exists
    pub session_present: bool,
}

impl ContinuationGate {
    /// Both preconditions hold
    pub fn open() -> Self {
        Self {
            view_active: true,
            session_present: true,
        }
    }

    fn is_open(self) -> bool {
        self.view_active && self.session_present
    }
}

/// Automatic `load_more()` driver with a sticky pause on error
///
/// Once the engine records an error, automatic continuation stays disabled,
/// even if the error is later cleared, until [`AutoLoader::retry_after_error`].
/// Errors from loads issued directly on the shared engine count too.
#[derive(Debug)]
pub struct AutoLoader {
    engine: Arc<PaginationEngine>,
    paused: AtomicBool,
    /// Engine error count as of construction or the last retry
    errors_acknowledged: AtomicU64,
}

impl AutoLoader {
    /// Wrap an engine
    pub fn new(engine: Arc<PaginationEngine>) -> Self {
        let errors_acknowledged = AtomicU64::new(engine.errors_recorded());
        Self {
            engine,
            paused: AtomicBool::new(false),
            errors_acknowledged,
        }
    }

    /// The wrapped engine
    pub fn engine(&self) -> &Arc<PaginationEngine> {
        &self.engine
    }

    /// Whether automatic continuation is paused
    ///
    /// Latches the pause if the engine reports an error now or has recorded
    /// one since construction or the last retry.
    pub fn is_paused(&self) -> bool {
        if self.paused.load(Ordering::SeqCst) {
            return true;
        }

        let error = self.engine.error();
        let unacknowledged =
            self.engine.errors_recorded() > self.errors_acknowledged.load(Ordering::SeqCst);
        if error.is_none() && !unacknowledged {
            return false;
        }

        if !self.paused.swap(true, Ordering::SeqCst) {
            match error {
                Some(error) => warn!(error = %error, "Automatic loading paused after error"),
                None => warn!("Automatic loading paused after an earlier error"),
            }
        }
        true
    }

    /// Whether a viewport trigger should issue a fetch right now
    pub fn should_continue(&self, gate: ContinuationGate) -> bool {
        let paused = self.is_paused();
        gate.is_open()
            && !paused
            && self.engine.has_more()
            && !self.engine.loading()
            && self.engine.error().is_none()
    }

    /// Handle one sentinel entry
    ///
    /// Returns the load outcome, or `None` when the trigger was suppressed.
    pub async fn on_viewport_enter(&self, gate: ContinuationGate) -> Option<LoadOutcome> {
        if !self.should_continue(gate) {
            debug!(?gate, paused = self.is_paused(), "Viewport trigger suppressed");
            return None;
        }

        Some(self.engine.load_more().await)
    }

    /// User-initiated retry: unpause, reset, then fetch page one exactly once
    pub async fn retry_after_error(&self) -> LoadOutcome {
        self.errors_acknowledged
            .store(self.engine.errors_recorded(), Ordering::SeqCst);
        self.paused.store(false, Ordering::SeqCst);
        info!("Retrying listing from the first page");
        self.engine.reset();
        self.engine.load_more().await
    }

    /// Consume sentinel ticks until the channel closes
    ///
    /// `gate` is evaluated per tick. Returns the number of fetches issued.
    pub async fn drive<G>(&self, mut ticks: mpsc::UnboundedReceiver<()>, gate: G) -> usize
    where
        G: Fn() -> ContinuationGate,
    {
        let mut issued = 0;
        while ticks.recv().await.is_some() {
            if let Some(outcome) = self.on_viewport_enter(gate()).await {
                if outcome.issued_fetch() {
                    issued += 1;
                }
            }
        }
        issued
    }
}
