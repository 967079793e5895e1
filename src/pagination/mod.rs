//! Pagination module
//!
//! Incremental ("infinite") loading of the photo collection.
//!
//! # Overview
//!
//! A [`PaginationEngine`] owns the loaded sequence for one listing together
//! with its cursor, the has-more flag and an in-flight guard. Each
//! `load_more()` call issues at most one page request through an injected
//! [`PageFetcher`]; overlapping calls are no-ops, and results that land after
//! a `reset()` are discarded by generation.

mod engine;
mod types;

pub use engine::PaginationEngine;
pub use types::{EngineSnapshot, LoadOutcome, PageCursor, PageFetcher};
