//! Automatic continuation module
//!
//! Drives `load_more()` from viewport sentinel triggers and pauses that
//! automatic loading after the first fetch error until the user retries.
//!
//! # Overview
//!
//! - [`ViewportObserver`] abstracts the host's visibility-detection primitive
//! - [`sentinel_channel`] turns its callbacks into a stream of trigger ticks
//! - [`AutoLoader`] gates each tick and owns the sticky pause latch

mod policy;
mod viewport;

pub use policy::{AutoLoader, ContinuationGate};
pub use viewport::{
    sentinel_channel, EnterCallback, ManualViewport, Observation, TriggerMargin, ViewportObserver,
};

#[cfg(test)]
mod tests;
