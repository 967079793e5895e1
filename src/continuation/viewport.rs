//! Viewport visibility capability

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::trace;

/// Pre-visibility margin, in pixels, at which the sentinel counts as visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TriggerMargin(pub u32);

/// Callback invoked each time the sentinel enters the viewport
pub type EnterCallback = Box<dyn FnMut() + Send>;

/// Host capability: observe a marker element's visibility
pub trait ViewportObserver: Send + Sync {
    /// Invoke `on_enter` on every entry until the returned handle is dropped
    fn observe(&self, margin: TriggerMargin, on_enter: EnterCallback) -> Observation;
}

/// Active observation; observing stops when this is dropped
#[must_use = "observation stops as soon as the handle is dropped"]
pub struct Observation {
    stop: Option<Box<dyn FnOnce() + Send>>,
}

impl Observation {
    /// Wrap the host's stop-observing action
    pub fn new(stop: impl FnOnce() + Send + 'static) -> Self {
        Self {
            stop: Some(Box::new(stop)),
        }
    }

    /// Stop observing now
    pub fn stop(mut self) {
        self.run_stop();
    }

    fn run_stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for Observation {
    fn drop(&mut self) {
        self.run_stop();
    }
}

impl std::fmt::Debug for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observation")
            .field("active", &self.stop.is_some())
            .finish()
    }
}

struct Registration {
    id: u64,
    margin: TriggerMargin,
    on_enter: EnterCallback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Registration>,
}

/// In-process viewport driven explicitly by the caller
///
/// Used by the CLI to step through pages and by tests to simulate scrolling.
/// Callbacks run with the registry locked and must not call back into the
/// viewport.
#[derive(Clone, Default)]
pub struct ManualViewport {
    registry: Arc<Mutex<Registry>>,
}

impl ManualViewport {
    /// Create a viewport with no observers
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the sentinel as visible to every observer
    ///
    /// Returns how many callbacks ran.
    pub fn enter(&self) -> usize {
        self.fire(|_| true)
    }

    /// Report the sentinel `distance_px` below the visible edge
    ///
    /// Only observers whose margin covers that distance are triggered.
    pub fn approach(&self, distance_px: u32) -> usize {
        self.fire(|margin| margin.0 >= distance_px)
    }

    /// Number of active observations
    pub fn observer_count(&self) -> usize {
        self.registry.lock().entries.len()
    }

    fn fire(&self, covers: impl Fn(TriggerMargin) -> bool) -> usize {
        let mut registry = self.registry.lock();
        let mut fired = 0;
        for entry in registry.entries.iter_mut().filter(|e| covers(e.margin)) {
            trace!(observer = entry.id, "Sentinel entered viewport");
            (entry.on_enter)();
            fired += 1;
        }
        fired
    }
}

impl ViewportObserver for ManualViewport {
    fn observe(&self, margin: TriggerMargin, on_enter: EnterCallback) -> Observation {
        let id = {
            let mut registry = self.registry.lock();
            let id = registry.next_id;
            registry.next_id += 1;
            registry.entries.push(Registration {
                id,
                margin,
                on_enter,
            });
            id
        };

        let registry = Arc::clone(&self.registry);
        Observation::new(move || {
            registry.lock().entries.retain(|entry| entry.id != id);
        })
    }
}

impl std::fmt::Debug for ManualViewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualViewport")
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Observe a sentinel and deliver each entry as a channel tick
///
/// The channel closes once the returned [`Observation`] is dropped.
pub fn sentinel_channel(
    observer: &dyn ViewportObserver,
    margin: TriggerMargin,
) -> (Observation, mpsc::UnboundedReceiver<()>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let observation = observer.observe(
        margin,
        Box::new(move || {
            // The receiver side may already be gone during teardown
            let _ = tx.send(());
        }),
    );
    (observation, rx)
}
