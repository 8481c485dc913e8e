//! Request handlers for hotkey set operations.

mod hotkey_sets;
mod reorder;

pub use hotkey_sets::*;
pub use reorder::*;
