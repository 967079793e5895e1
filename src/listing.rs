//! Photo listing view
//!
//! [`PhotoListing`] ties one paginated listing to its selection state and to
//! the URL builder used for its media. Each view (main grid, person page)
//! owns its own instance, so paging or selecting in one never touches another.

use crate::auth::CredentialSource;
use crate::continuation::{AutoLoader, ContinuationGate};
use crate::error::{Error, Result};
use crate::pagination::{EngineSnapshot, LoadOutcome, PageFetcher, PaginationEngine};
use crate::selection::{Modifiers, SelectionAction, SelectionEngine};
use crate::signing::AuthenticatedUrlBuilder;
use crate::types::{photo_ids, Photo, PhotoId};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;
use url::Url;

/// One listing with its selection and media URL signing
pub struct PhotoListing {
    auto: AutoLoader,
    selection: Mutex<SelectionEngine>,
    urls: AuthenticatedUrlBuilder,
    credentials: Arc<dyn CredentialSource>,
}

impl PhotoListing {
    /// Create a listing over `fetcher`
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        page_size: u32,
        urls: AuthenticatedUrlBuilder,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self> {
        let engine = Arc::new(PaginationEngine::new(fetcher, page_size)?);
        Ok(Self {
            auto: AutoLoader::new(engine),
            selection: Mutex::new(SelectionEngine::new()),
            urls,
            credentials,
        })
    }

    // ------------------------------------------------------------------------
    // Observables
    // ------------------------------------------------------------------------

    /// Photos accumulated so far, in listing order
    pub fn photos(&self) -> Arc<Vec<Photo>> {
        self.engine().photos()
    }

    /// Whether the service may have more photos
    pub fn has_more(&self) -> bool {
        self.engine().has_more()
    }

    /// Whether a page fetch is pending
    pub fn loading(&self) -> bool {
        self.engine().loading()
    }

    /// Most recent fetch error
    pub fn error(&self) -> Option<Arc<Error>> {
        self.engine().error()
    }

    /// Selected photo ids
    pub fn selected_ids(&self) -> HashSet<PhotoId> {
        self.selection.lock().selected_ids().clone()
    }

    /// Selected photo ids in listing order
    pub fn selected_in_order(&self) -> Vec<PhotoId> {
        let visible = photo_ids(&self.photos());
        self.selection.lock().selected_in_order(&visible)
    }

    /// Whether the view shows bulk-action presentation
    pub fn select_mode(&self) -> bool {
        self.selection.lock().select_mode()
    }

    /// Whether automatic loading is paused after an error
    pub fn is_paused(&self) -> bool {
        self.auto.is_paused()
    }

    /// Current pagination state
    pub fn snapshot(&self) -> EngineSnapshot {
        self.engine().snapshot()
    }

    /// Subscribe to pagination state changes
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.engine().subscribe()
    }

    /// Underlying pagination engine
    pub fn engine(&self) -> &Arc<PaginationEngine> {
        self.auto.engine()
    }

    // ------------------------------------------------------------------------
    // Pagination
    // ------------------------------------------------------------------------

    /// Discard photos and selection and start over from the first page
    pub fn reset(&self) {
        self.selection.lock().clear();
        self.engine().reset();
    }

    /// Fetch the next page
    pub async fn load_more(&self) -> LoadOutcome {
        self.engine().load_more().await
    }

    /// Handle the sentinel entering the trigger region
    pub async fn on_viewport_enter(&self, gate: ContinuationGate) -> Option<LoadOutcome> {
        self.auto.on_viewport_enter(gate).await
    }

    /// User-initiated retry from the first page
    pub async fn retry_after_error(&self) -> LoadOutcome {
        self.selection.lock().clear();
        self.auto.retry_after_error().await
    }

    /// Automatic loading driver for this listing
    pub fn auto_loader(&self) -> &AutoLoader {
        &self.auto
    }

    // ------------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------------

    /// Apply one activation of `id` against the current photos
    pub fn toggle(&self, id: PhotoId, modifiers: Modifiers) -> SelectionAction {
        let visible = photo_ids(&self.photos());
        self.selection.lock().toggle(id, modifiers, &visible)
    }

    /// Empty the selection
    pub fn clear(&self) {
        self.selection.lock().clear();
    }

    /// Select every loaded photo
    pub fn select_all(&self) {
        let visible = photo_ids(&self.photos());
        debug!(count = visible.len(), "Selecting all loaded photos");
        self.selection.lock().select_all(&visible);
    }

    // ------------------------------------------------------------------------
    // Media URLs
    // ------------------------------------------------------------------------

    /// Authenticated URL for a media path using the current credential
    pub async fn build_authenticated_url(&self, path_or_url: &str) -> Result<Url> {
        self.urls
            .build_with(path_or_url, self.credentials.as_ref())
            .await
    }

    /// URL builder used for this listing's media
    pub fn url_builder(&self) -> &AuthenticatedUrlBuilder {
        &self.urls
    }
}

impl std::fmt::Debug for PhotoListing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoListing")
            .field("auto", &self.auto)
            .field("selected", &self.selection.lock().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{SessionCredentials, StaticCredential};
    use crate::signing::{FixedCacheBuster, UrlBuilderConfig};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Numbered {
        total: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageFetcher for Numbered {
        async fn fetch_page(&self, offset: u64, limit: u32) -> Result<Vec<Photo>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((offset as usize..self.total)
                .take(limit as usize)
                .map(|i| Photo::new(format!("p{i}"), "", format!("/media/{i}/thumb"), ""))
                .collect())
        }
    }

    fn urls() -> AuthenticatedUrlBuilder {
        AuthenticatedUrlBuilder::with_cache_buster(
            UrlBuilderConfig::with_api_base("https://api.example.com"),
            Arc::new(FixedCacheBuster("1".into())),
        )
        .unwrap()
    }

    fn listing(total: usize, credentials: Arc<dyn CredentialSource>) -> PhotoListing {
        let fetcher = Arc::new(Numbered {
            total,
            calls: AtomicUsize::new(0),
        });
        PhotoListing::new(fetcher, 2, urls(), credentials).unwrap()
    }

    fn ids(raw: &[&str]) -> Vec<PhotoId> {
        raw.iter().map(|id| PhotoId::new(*id)).collect()
    }

    #[tokio::test]
    async fn test_range_selection_over_loaded_photos() {
        let listing = listing(5, Arc::new(StaticCredential::new("t")));
        listing.load_more().await;
        listing.load_more().await;

        listing.toggle(PhotoId::new("p0"), Modifiers::NONE);
        listing.toggle(PhotoId::new("p2"), Modifiers::RANGE);

        assert_eq!(listing.selected_in_order(), ids(&["p0", "p1", "p2"]));
        assert!(listing.select_mode());
    }

    #[tokio::test]
    async fn test_select_all_and_clear() {
        let listing = listing(3, Arc::new(StaticCredential::new("t")));
        listing.load_more().await;

        listing.select_all();
        assert_eq!(listing.selected_ids().len(), 2);

        listing.clear();
        assert!(listing.selected_ids().is_empty());
        assert!(!listing.select_mode());
    }

    #[tokio::test]
    async fn test_reset_clears_photos_and_selection() {
        let listing = listing(5, Arc::new(StaticCredential::new("t")));
        listing.load_more().await;
        listing.toggle(PhotoId::new("p1"), Modifiers::NONE);

        listing.reset();

        assert!(listing.photos().is_empty());
        assert!(listing.has_more());
        assert!(!listing.select_mode());
        assert!(listing.selected_ids().is_empty());
    }

    #[tokio::test]
    async fn test_viewport_entry_respects_gate() {
        let listing = listing(5, Arc::new(StaticCredential::new("t")));
        let closed = ContinuationGate {
            view_active: false,
            session_present: true,
        };

        assert!(listing.on_viewport_enter(closed).await.is_none());
        assert_eq!(
            listing.on_viewport_enter(ContinuationGate::open()).await,
            Some(LoadOutcome::Applied { received: 2 })
        );
        assert_eq!(listing.photos().len(), 2);
    }

    #[tokio::test]
    async fn test_authenticated_url_uses_current_session() {
        let session = SessionCredentials::new();
        let listing = listing(1, Arc::new(session.clone()));

        let err = listing
            .build_authenticated_url("/media/1/thumb")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));

        session.sign_in("abc", None);
        let url = listing
            .build_authenticated_url("/media/1/thumb")
            .await
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/media/1/thumb?token=abc&_ts=1"
        );
    }
}
