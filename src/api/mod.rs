//! Photo service API module
//!
//! REST listing endpoints of the photo service, exposed as
//! [`PageFetcher`](crate::pagination::PageFetcher) implementations so each
//! listing can back its own pagination engine.

mod photos;

pub use photos::{
    ListingScope, PageBody, PhotoApi, PhotoListingFetcher, DEFAULT_PERSON_PHOTOS_PATH,
    DEFAULT_PHOTOS_PATH,
};

#[cfg(test)]
mod tests;
