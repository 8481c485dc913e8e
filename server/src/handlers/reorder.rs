//! Reorder handler - applies a full ordering across all hotkey sets.

use crate::error::{AppError, Result};
use crate::store::HotkeySetStore;
use keyset_engine::{validate_reorder, HotkeySet};
use serde_json::Value;

/// Message returned when a batch references unknown sets.
pub const SETS_NOT_FOUND: &str = "One or more hotkey sets not found";

/// Process a batch reorder request.
///
/// The body is validated before the store is touched. On success the whole
/// collection is re-read and returned in canonical order. A not-found result
/// may follow a partial write when the store applies batches non-atomically;
/// callers re-fetch before trusting their local order.
pub async fn handle_reorder(
    store: &dyn HotkeySetStore,
    payload: &Value,
) -> Result<Vec<HotkeySet>> {
    let batch = validate_reorder(payload)?;
    tracing::debug!(sets = batch.len(), "Received reorder request");

    let outcome = store
        .apply_order_batch(&batch.sets)
        .await
        .map_err(AppError::store("Error updating hotkey set order"))?;

    if !outcome.is_complete() {
        tracing::warn!(
            missing = ?outcome.missing,
            updated = outcome.updated,
            "Reorder referenced unknown hotkey sets"
        );
        return Err(AppError::NotFound(SETS_NOT_FOUND.to_string()));
    }

    let sets = store
        .list()
        .await
        .map_err(AppError::store("Error fetching hotkey sets"))?;

    tracing::debug!(sets = sets.len(), "Successfully updated sets order");
    Ok(sets)
}
