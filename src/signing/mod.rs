//! Authenticated media URL module
//!
//! Browser image elements cannot send an `Authorization` header, so media
//! URLs carry the bearer token as a query parameter instead, together with a
//! cache-busting value that changes on every build.

mod builder;
mod cache_bust;

pub use builder::{AuthenticatedUrlBuilder, UrlBuilderConfig};
pub use cache_bust::{CacheBuster, CounterCacheBuster, FixedCacheBuster, MonotonicClockBuster};

#[cfg(test)]
mod tests;
