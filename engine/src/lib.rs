//! # Keyset Engine
//!
//! A deterministic ordering engine for hotkey sets.
//!
//! This crate provides the core logic for keeping a user-arranged list of
//! hotkey sets in sync with an authoritative store. It turns drag gestures into
//! full-list permutations, validates batch reorder requests, and tracks the
//! optimistic-commit lifecycle on the client side.
//!
//! ## Design Principles
//!
//! - **No IO**: Engine has no knowledge of files, network, or platform
//! - **Deterministic**: Same inputs always produce same outputs
//! - **Idempotent**: Every reorder renumbers the whole list, so retries are safe
//! - **Testable**: Pure logic, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Hotkey Sets
//!
//! A [`HotkeySet`] is a named collection of [`Hotkey`] definitions for one
//! application, carrying an integer `order`. Sorting by `order` (ties broken by
//! creation time, then id) gives the display sequence. Gaps are allowed.
//!
//! ### Permutations
//!
//! [`permutation::move_item`] performs the array move for a drag gesture and
//! [`permutation::renumber`] derives the `{id, order}` pairs for every entry.
//!
//! ### Validation
//!
//! [`validate_reorder`] checks the shape of an incoming batch before any record
//! is touched and reports the offending entry as a structured [`Error`].
//!
//! ### Reorder Lifecycle
//!
//! The [`ReorderEngine`] owns the locally displayed list and moves through
//! `Idle -> Dragging -> Committing -> {Confirmed | RolledBack} -> Idle`.
//!
//! ## Quick Start
//!
//! ```rust
//! use keyset_engine::{HotkeySet, ReorderEngine, Settlement};
//!
//! let sets = vec![
//!     HotkeySet::new("a", "Vim", "vim", 0, 1000),
//!     HotkeySet::new("b", "Shell", "zsh", 1, 1001),
//!     HotkeySet::new("c", "Browser", "firefox", 2, 1002),
//! ];
//! let mut engine = ReorderEngine::new(sets);
//!
//! // Drag "a" to the end of the list.
//! let batch = engine.commit_drop(0, 2).unwrap().unwrap();
//! assert_eq!(engine.ids(), vec!["b", "c", "a"]);
//! assert_eq!(batch.sets[2].id, "a");
//! assert_eq!(batch.sets[2].order, 2);
//!
//! // The server answers with its canonical list.
//! let canonical = engine.sets().to_vec();
//! let settlement = engine.confirm(canonical).unwrap();
//! assert_eq!(settlement, Settlement::Confirmed);
//! ```

pub mod error;
pub mod hotkey;
pub mod permutation;
pub mod reorder;
pub mod validate;

// Re-export main types at crate root
pub use error::Error;
pub use hotkey::{sort_canonical, Hotkey, HotkeySet, HotkeySetDraft};
pub use permutation::{move_item, renumber, OrderEntry, ReorderBatch};
pub use reorder::{FailureNotice, Phase, ReorderEngine, Settlement, REORDER_FAILED_MESSAGE};
pub use validate::validate_reorder;

/// Type aliases for clarity
pub type SetId = String;
pub type Order = i64;
pub type Timestamp = u64;
