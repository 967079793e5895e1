//! HTTP transport module
//!
//! Provides the authenticated HTTP client used to talk to the photo service.
//!
//! # Features
//!
//! - **Bearer Authentication**: Token pulled from an injected credential source
//! - **Transport Retries**: Timeouts and gateway errors retried with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Error Mapping**: Non-success statuses surface as `RequestFailed`

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RateLimiterConfig};
