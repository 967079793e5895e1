//! Photo multi-selection module
//!
//! Mouse-modifier selection over the currently visible photo ordering:
//! plain activation selects one photo, the multi modifier toggles one photo,
//! and the range modifier adds the contiguous run between the anchor and the
//! activated photo.

mod engine;
mod types;

pub use engine::SelectionEngine;
pub use types::{Modifiers, Platform, SelectionAction};
