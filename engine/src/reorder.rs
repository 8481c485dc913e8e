//! Client-side reorder lifecycle.
//!
//! The [`ReorderEngine`] owns the list the user sees. A drop applies the new
//! permutation immediately (optimistic) and hands back the batch to submit.
//! The caller then reports the outcome:
//!
//! - [`ReorderEngine::confirm`] adopts the server's canonical list verbatim.
//! - [`ReorderEngine::roll_back`] adopts the re-fetched authoritative list, or
//!   the last confirmed list when the re-fetch failed too.
//!
//! Only one commit may be in flight. Drops arriving while committing are
//! rejected with [`Error::ReorderInFlight`].

use crate::{error::Result, move_item, renumber, Error, HotkeySet, Order, ReorderBatch};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Message shown to the user when a reorder could not be persisted.
pub const REORDER_FAILED_MESSAGE: &str = "Failed to update hotkey set order";

/// Where a reorder currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// No pending reorder
    Idle,
    /// Gesture in progress, nothing persisted
    Dragging { source: usize },
    /// Optimistic order applied locally, request in flight
    Committing { batch: ReorderBatch },
}

/// User-facing failure notification for a rolled back reorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureNotice {
    pub message: String,
    /// Cause of the failure
    pub detail: String,
    /// Whether the local list was re-synchronized from the server.
    /// `false` means the last confirmed list is shown and may be stale.
    pub resynced: bool,
}

impl fmt::Display for FailureNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.detail)
    }
}

/// How a reorder ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// Gesture did not change the order; nothing was submitted
    Unchanged,
    /// Canonical list adopted
    Confirmed,
    /// Optimistic list discarded after a failure
    RolledBack(FailureNotice),
}

/// Tracks the displayed list and the state of the current reorder.
#[derive(Debug, Clone)]
pub struct ReorderEngine {
    /// What the user sees, possibly optimistic
    sets: Vec<HotkeySet>,
    /// Last list received from the server
    confirmed: Vec<HotkeySet>,
    phase: Phase,
    stale: bool,
}

impl ReorderEngine {
    /// Create an engine from a server list. The list is sorted canonically.
    pub fn new(mut sets: Vec<HotkeySet>) -> Self {
        crate::sort_canonical(&mut sets);
        Self {
            confirmed: sets.clone(),
            sets,
            phase: Phase::Idle,
            stale: false,
        }
    }

    /// The displayed list.
    pub fn sets(&self) -> &[HotkeySet] {
        &self.sets
    }

    /// Displayed ids in order.
    pub fn ids(&self) -> Vec<&str> {
        self.sets.iter().map(|set| set.id.as_str()).collect()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_committing(&self) -> bool {
        matches!(self.phase, Phase::Committing { .. })
    }

    /// True after a rollback whose re-fetch failed.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Replace the displayed list with a freshly fetched one.
    ///
    /// Not allowed while a commit is in flight; an active drag is abandoned.
    pub fn load(&mut self, mut sets: Vec<HotkeySet>) -> Result<()> {
        if self.is_committing() {
            return Err(Error::ReorderInFlight);
        }
        crate::sort_canonical(&mut sets);
        self.confirmed = sets.clone();
        self.sets = sets;
        self.phase = Phase::Idle;
        self.stale = false;
        Ok(())
    }

    /// Start a drag gesture on the item at `source`.
    pub fn begin_drag(&mut self, source: usize) -> Result<()> {
        if self.is_committing() {
            return Err(Error::ReorderInFlight);
        }
        if source < self.sets.len() {
            self.phase = Phase::Dragging { source };
        }
        Ok(())
    }

    /// Abandon the current gesture without persisting anything.
    pub fn cancel_drag(&mut self) {
        if matches!(self.phase, Phase::Dragging { .. }) {
            self.phase = Phase::Idle;
        }
    }

    /// Finish a gesture: move `source` to `destination`, renumber every set,
    /// apply the result locally and return the batch to submit.
    ///
    /// Returns `Ok(None)` for a no-op gesture (equal or out-of-range indices).
    pub fn commit_drop(
        &mut self,
        source: usize,
        destination: usize,
    ) -> Result<Option<ReorderBatch>> {
        if self.is_committing() {
            return Err(Error::ReorderInFlight);
        }
        self.phase = Phase::Idle;

        let Some(mut moved) = move_item(&self.sets, source, destination) else {
            return Ok(None);
        };

        let batch = ReorderBatch {
            sets: renumber(moved.iter().map(|set| set.id.clone())),
        };
        for (position, set) in moved.iter_mut().enumerate() {
            set.order = position as Order;
        }

        self.sets = moved;
        self.phase = Phase::Committing {
            batch: batch.clone(),
        };
        Ok(Some(batch))
    }

    /// Adopt the canonical list returned by a successful reorder.
    pub fn confirm(&mut self, canonical: Vec<HotkeySet>) -> Result<Settlement> {
        if !self.is_committing() {
            return Err(Error::NotCommitting);
        }
        self.confirmed = canonical.clone();
        self.sets = canonical;
        self.phase = Phase::Idle;
        self.stale = false;
        Ok(Settlement::Confirmed)
    }

    /// Discard the optimistic list after a failed reorder.
    ///
    /// `authoritative` is the re-fetched server list, or `None` when the
    /// re-fetch failed as well; the last confirmed list is shown then.
    pub fn roll_back(
        &mut self,
        authoritative: Option<Vec<HotkeySet>>,
        detail: impl Into<String>,
    ) -> Result<Settlement> {
        if !self.is_committing() {
            return Err(Error::NotCommitting);
        }

        let resynced = match authoritative {
            Some(mut sets) => {
                crate::sort_canonical(&mut sets);
                self.confirmed = sets.clone();
                self.sets = sets;
                true
            }
            None => {
                self.sets = self.confirmed.clone();
                false
            }
        };
        self.stale = !resynced;
        self.phase = Phase::Idle;

        Ok(Settlement::RolledBack(FailureNotice {
            message: REORDER_FAILED_MESSAGE.to_string(),
            detail: detail.into(),
            resynced,
        }))
    }
}
