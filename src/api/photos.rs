//! Photo listing endpoints

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::pagination::PageFetcher;
use crate::types::Photo;
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Default path of the main photo listing
pub const DEFAULT_PHOTOS_PATH: &str = "/photos";

/// Default path template of a per-person listing
pub const DEFAULT_PERSON_PHOTOS_PATH: &str = "/people/{id}/photos";

/// Which independent listing to page through
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListingScope {
    /// The main photo grid
    All,
    /// Photos in which one person appears
    Person(String),
}

/// Listing response body
///
/// Accepts a bare array or an object wrapping the array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PageBody {
    /// `[ {...}, ... ]`
    List(Vec<Photo>),
    /// `{ "items": [ ... ] }` or `{ "photos": [ ... ] }`
    Wrapped {
        /// Page items
        #[serde(alias = "photos")]
        items: Vec<Photo>,
    },
}

impl PageBody {
    /// Unwrap into the page items
    pub fn into_items(self) -> Vec<Photo> {
        match self {
            Self::List(items) | Self::Wrapped { items } => items,
        }
    }
}

/// Client for the photo service listing endpoints
#[derive(Debug, Clone)]
pub struct PhotoApi {
    http: Arc<HttpClient>,
    photos_path: String,
    person_photos_path: String,
}

impl PhotoApi {
    /// Create an API client using the default endpoint paths
    pub fn new(http: Arc<HttpClient>) -> Self {
        Self::with_paths(http, DEFAULT_PHOTOS_PATH, DEFAULT_PERSON_PHOTOS_PATH)
    }

    /// Create an API client with custom endpoint paths
    ///
    /// `person_photos_path` must contain an `{id}` placeholder.
    pub fn with_paths(
        http: Arc<HttpClient>,
        photos_path: impl Into<String>,
        person_photos_path: impl Into<String>,
    ) -> Self {
        Self {
            http,
            photos_path: photos_path.into(),
            person_photos_path: person_photos_path.into(),
        }
    }

    /// Endpoint path for a listing scope
    pub fn listing_path(&self, scope: &ListingScope) -> Result<String> {
        match scope {
            ListingScope::All => Ok(self.photos_path.clone()),
            ListingScope::Person(id) => {
                if !self.person_photos_path.contains("{id}") {
                    return Err(Error::invalid_config(format!(
                        "person photos path '{}' has no {{id}} placeholder",
                        self.person_photos_path
                    )));
                }
                // Form encoding leaves only '+' to fix up for a path segment
                let encoded: String = url::form_urlencoded::byte_serialize(id.as_bytes())
                    .collect::<String>()
                    .replace('+', "%20");
                Ok(self.person_photos_path.replace("{id}", &encoded))
            }
        }
    }

    /// Fetch one page of a listing
    pub async fn fetch_page(
        &self,
        scope: &ListingScope,
        offset: u64,
        limit: u32,
    ) -> Result<Vec<Photo>> {
        let path = self.listing_path(scope)?;
        let query = [("offset", offset.to_string()), ("limit", limit.to_string())];
        let body: PageBody = self.http.get_json(&path, &query).await?;
        let items = body.into_items();
        debug!(?scope, offset, limit, received = items.len(), "Fetched photo page");
        Ok(items)
    }

    /// A page fetcher bound to one listing scope
    pub fn listing(&self, scope: ListingScope) -> PhotoListingFetcher {
        PhotoListingFetcher {
            api: self.clone(),
            scope,
        }
    }
}

/// [`PageFetcher`] for one listing scope
#[derive(Debug, Clone)]
pub struct PhotoListingFetcher {
    api: PhotoApi,
    scope: ListingScope,
}

impl PhotoListingFetcher {
    /// The scope this fetcher pages through
    pub fn scope(&self) -> &ListingScope {
        &self.scope
    }
}

#[async_trait]
impl PageFetcher for PhotoListingFetcher {
    async fn fetch_page(&self, offset: u64, limit: u32) -> Result<Vec<Photo>> {
        self.api.fetch_page(&self.scope, offset, limit).await
    }
}
