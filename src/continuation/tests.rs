//! Tests for the continuation module

use super::*;
use crate::error::{Error, Result};
use crate::pagination::{LoadOutcome, PageFetcher, PaginationEngine};
use crate::types::{photo_ids, Photo, PhotoId};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

struct FlakyFetcher {
    total: usize,
    calls: AtomicUsize,
    fail: AtomicBool,
}

impl FlakyFetcher {
    fn new(total: usize) -> Arc<Self> {
        Arc::new(Self {
            total,
            calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl PageFetcher for FlakyFetcher {
    async fn fetch_page(&self, offset: u64, limit: u32) -> Result<Vec<Photo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::request_failed(401, "expired"));
        }
        Ok((offset as usize..self.total)
            .take(limit as usize)
            .map(|i| Photo::new(format!("p{i}"), "", "", ""))
            .collect())
    }
}

fn loader(fetcher: Arc<FlakyFetcher>, page_size: u32) -> AutoLoader {
    AutoLoader::new(Arc::new(PaginationEngine::new(fetcher, page_size).unwrap()))
}

// ============================================================================
// Gate Tests
// ============================================================================

#[tokio::test]
async fn test_closed_gate_suppresses() {
    let fetcher = FlakyFetcher::new(10);
    let auto = loader(fetcher.clone(), 2);

    let inactive = ContinuationGate {
        view_active: false,
        session_present: true,
    };
    let signed_out = ContinuationGate {
        view_active: true,
        session_present: false,
    };

    assert!(auto.on_viewport_enter(inactive).await.is_none());
    assert!(auto.on_viewport_enter(signed_out).await.is_none());
    assert!(auto.on_viewport_enter(ContinuationGate::default()).await.is_none());
    assert_eq!(fetcher.calls(), 0);

    assert_eq!(
        auto.on_viewport_enter(ContinuationGate::open()).await,
        Some(LoadOutcome::Applied { received: 2 })
    );
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_exhausted_listing_suppresses() {
    let fetcher = FlakyFetcher::new(1);
    let auto = loader(fetcher.clone(), 2);

    auto.on_viewport_enter(ContinuationGate::open()).await;
    assert!(!auto.should_continue(ContinuationGate::open()));
    assert!(auto.on_viewport_enter(ContinuationGate::open()).await.is_none());
    assert_eq!(fetcher.calls(), 1);
}

// ============================================================================
// Sticky Pause Tests
// ============================================================================

#[tokio::test]
async fn test_error_pauses_automatic_loading() {
    let fetcher = FlakyFetcher::new(10);
    let auto = loader(fetcher.clone(), 2);
    fetcher.set_failing(true);

    assert_eq!(
        auto.on_viewport_enter(ContinuationGate::open()).await,
        Some(LoadOutcome::Failed)
    );
    assert!(auto.is_paused());

    for _ in 0..5 {
        assert!(auto.on_viewport_enter(ContinuationGate::open()).await.is_none());
    }
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn test_pause_survives_error_clearing() {
    let fetcher = FlakyFetcher::new(10);
    let auto = loader(fetcher.clone(), 2);
    fetcher.set_failing(true);
    auto.on_viewport_enter(ContinuationGate::open()).await;

    // A manual load elsewhere succeeds and clears the engine error
    fetcher.set_failing(false);
    assert_eq!(
        auto.engine().load_more().await,
        LoadOutcome::Applied { received: 2 }
    );
    assert!(auto.engine().error().is_none());

    assert!(auto.is_paused());
    assert!(!auto.should_continue(ContinuationGate::open()));
    assert!(auto.on_viewport_enter(ContinuationGate::open()).await.is_none());
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_direct_engine_error_pauses_even_after_clearing() {
    let fetcher = FlakyFetcher::new(10);
    let auto = loader(fetcher.clone(), 2);

    // Both loads bypass the loader: the error is recorded then cleared
    // before any viewport trigger runs.
    fetcher.set_failing(true);
    assert_eq!(auto.engine().load_more().await, LoadOutcome::Failed);
    fetcher.set_failing(false);
    assert_eq!(
        auto.engine().load_more().await,
        LoadOutcome::Applied { received: 2 }
    );
    assert!(auto.engine().error().is_none());

    assert!(auto.is_paused());
    assert!(!auto.should_continue(ContinuationGate::open()));
    assert!(auto.on_viewport_enter(ContinuationGate::open()).await.is_none());
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_errors_before_wrapping_do_not_pause() {
    let fetcher = FlakyFetcher::new(10);
    let engine = Arc::new(PaginationEngine::new(fetcher.clone(), 2).unwrap());
    fetcher.set_failing(true);
    engine.load_more().await;
    fetcher.set_failing(false);
    engine.load_more().await;

    let auto = AutoLoader::new(engine);
    assert!(!auto.is_paused());
    assert_eq!(
        auto.on_viewport_enter(ContinuationGate::open()).await,
        Some(LoadOutcome::Applied { received: 2 })
    );
}

// ============================================================================
// Retry Tests
// ============================================================================

#[tokio::test]
async fn test_retry_restarts_from_first_page() {
    let fetcher = FlakyFetcher::new(5);
    let auto = loader(fetcher.clone(), 2);

    auto.on_viewport_enter(ContinuationGate::open()).await;
    auto.on_viewport_enter(ContinuationGate::open()).await;
    fetcher.set_failing(true);
    auto.on_viewport_enter(ContinuationGate::open()).await;
    assert!(auto.is_paused());
    assert_eq!(auto.engine().offset(), 4);

    fetcher.set_failing(false);
    let outcome = auto.retry_after_error().await;

    assert_eq!(outcome, LoadOutcome::Applied { received: 2 });
    assert!(!auto.is_paused());
    assert_eq!(auto.engine().offset(), 2);
    assert_eq!(
        photo_ids(&auto.engine().photos()),
        vec![PhotoId::new("p0"), PhotoId::new("p1")]
    );
    assert!(auto.should_continue(ContinuationGate::open()));
}

#[tokio::test]
async fn test_failed_retry_stays_paused() {
    let fetcher = FlakyFetcher::new(5);
    let auto = loader(fetcher.clone(), 2);
    fetcher.set_failing(true);
    auto.on_viewport_enter(ContinuationGate::open()).await;

    assert_eq!(auto.retry_after_error().await, LoadOutcome::Failed);
    assert!(auto.is_paused());
    assert_eq!(fetcher.calls(), 2);
}

// ============================================================================
// Viewport Tests
// ============================================================================

#[test]
fn test_manual_viewport_observation_lifecycle() {
    let viewport = ManualViewport::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&hits);
    let observation = viewport.observe(
        TriggerMargin(200),
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }),
    );
    assert_eq!(viewport.observer_count(), 1);

    assert_eq!(viewport.enter(), 1);
    assert_eq!(viewport.approach(150), 1);
    assert_eq!(viewport.approach(500), 0);
    assert_eq!(hits.load(Ordering::SeqCst), 2);

    drop(observation);
    assert_eq!(viewport.observer_count(), 0);
    assert_eq!(viewport.enter(), 0);
}

#[test]
fn test_observation_stop_is_idempotent_with_drop() {
    let viewport = ManualViewport::new();
    let observation = viewport.observe(TriggerMargin::default(), Box::new(|| {}));
    observation.stop();
    assert_eq!(viewport.observer_count(), 0);
}

#[tokio::test]
async fn test_drive_loads_until_exhausted() {
    let fetcher = FlakyFetcher::new(5);
    let auto = loader(fetcher.clone(), 2);
    let viewport = ManualViewport::new();
    let (observation, ticks) = sentinel_channel(&viewport, TriggerMargin(400));

    // Sentinel stays visible: far more triggers than pages
    for _ in 0..10 {
        viewport.enter();
    }
    drop(observation);

    let issued = auto.drive(ticks, ContinuationGate::open).await;
    assert_eq!(issued, 3);
    assert_eq!(fetcher.calls(), 3);
    assert_eq!(auto.engine().photos().len(), 5);
    assert!(!auto.engine().has_more());
}

#[tokio::test]
async fn test_drive_stops_fetching_after_error() {
    let fetcher = FlakyFetcher::new(50);
    let auto = loader(fetcher.clone(), 2);
    let viewport = ManualViewport::new();
    let (observation, ticks) = sentinel_channel(&viewport, TriggerMargin(400));
    fetcher.set_failing(true);

    for _ in 0..20 {
        viewport.enter();
    }
    drop(observation);

    let issued = auto.drive(ticks, ContinuationGate::open).await;
    assert_eq!(issued, 1);
    assert_eq!(fetcher.calls(), 1);
    assert!(auto.is_paused());
}
