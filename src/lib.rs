// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Photogrid
//!
//! Client-side core of a photo-gallery browser: incremental loading of a
//! remote photo collection, an error-pause policy for automatic loading,
//! multi/range selection, and authenticated media URLs.
//!
//! ## Features
//!
//! - **Infinite Scroll Pagination**: Offset/limit paging with an in-flight guard and stale-result discard
//! - **Error Pause**: Automatic loading stops after a failure until the user retries
//! - **Selection**: Plain, multi (Ctrl/Cmd) and range (Shift) activation over the visible order
//! - **Signed Media URLs**: Token and cache-busting query parameters for media the client cannot send headers for
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use photogrid::api::{ListingScope, PhotoApi};
//! use photogrid::auth::StaticCredential;
//! use photogrid::http::{HttpClient, HttpClientConfig};
//! use photogrid::signing::{AuthenticatedUrlBuilder, UrlBuilderConfig};
//! use photogrid::{PhotoListing, Result};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let credentials = Arc::new(StaticCredential::new("token"));
//!     let http = HttpClient::new(
//!         HttpClientConfig::builder().base_url("https://api.example.com").build(),
//!         credentials.clone(),
//!     )?;
//!     let api = PhotoApi::new(Arc::new(http));
//!     let urls = AuthenticatedUrlBuilder::new(UrlBuilderConfig::with_api_base(
//!         "https://api.example.com",
//!     ))?;
//!
//!     let listing = PhotoListing::new(Arc::new(api.listing(ListingScope::All)), 50, urls, credentials)?;
//!     listing.load_more().await;
//!     for photo in listing.photos().iter() {
//!         println!("{}", listing.build_authenticated_url(&photo.thumbnail_url).await?);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         PhotoListing                            │
//! │  photos  has_more  loading  error  selected_ids  select_mode    │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴──┬───────────────┬───────────────┐
//! │ Continuation │   Pagination     │   Selection   │   Signing     │
//! ├──────────────┼──────────────────┼───────────────┼───────────────┤
//! │ Viewport     │ Cursor           │ Plain         │ Token param   │
//! │ Gate         │ In-flight guard  │ Multi         │ Cache bust    │
//! │ Sticky pause │ Generation       │ Range         │ Dev proxy     │
//! └──────────────┴────────┬─────────┴───────────────┴───────────────┘
//!                         │
//! ┌───────────────────────┴─────────────────────────────────────────┐
//! │  API (listing endpoints)  →  HTTP (bearer, retry, rate limit)   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Credential sources
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Photo service listing endpoints
pub mod api;

/// Authenticated media URLs
pub mod signing;

/// Incremental pagination engine
pub mod pagination;

/// Viewport-triggered continuation and error pause
pub mod continuation;

/// Multi and range selection
pub mod selection;

/// Per-view listing with selection and signing
pub mod listing;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use config::ClientConfig;
pub use listing::PhotoListing;
pub use pagination::{LoadOutcome, PageFetcher, PaginationEngine};
pub use selection::{Modifiers, SelectionEngine};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
