//! Cache-busting value sources

use chrono::Utc;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};

/// Produces a value that differs between successive URL builds
pub trait CacheBuster: Send + Sync {
    /// Next cache-busting value
    fn next_value(&self) -> String;
}

/// Wall-clock milliseconds, bumped so that values strictly increase
#[derive(Debug, Default)]
pub struct MonotonicClockBuster {
    last: AtomicI64,
}

impl MonotonicClockBuster {
    /// Create a clock-backed cache buster
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBuster for MonotonicClockBuster {
    fn next_value(&self) -> String {
        let now = Utc::now().timestamp_millis();
        let mut prev = self.last.load(Ordering::Relaxed);
        loop {
            let next = now.max(prev + 1);
            match self
                .last
                .compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return next.to_string(),
                Err(actual) => prev = actual,
            }
        }
    }
}

/// Always returns the same value
#[derive(Debug, Clone)]
pub struct FixedCacheBuster(pub String);

impl CacheBuster for FixedCacheBuster {
    fn next_value(&self) -> String {
        self.0.clone()
    }
}

/// Deterministic incrementing counter
#[derive(Debug, Default)]
pub struct CounterCacheBuster {
    next: AtomicU64,
}

impl CounterCacheBuster {
    /// Start counting at `start`
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl CacheBuster for CounterCacheBuster {
    fn next_value(&self) -> String {
        self.next.fetch_add(1, Ordering::Relaxed).to_string()
    }
}
