//! Single-record handlers for hotkey sets.

use crate::error::{AppError, Result};
use crate::store::HotkeySetStore;
use keyset_engine::{HotkeySet, HotkeySetDraft};

/// Message returned when a single lookup misses.
pub const SET_NOT_FOUND: &str = "Hotkey set not found";

/// Reject path ids that are not UUIDs before querying the store.
pub fn parse_set_id(id: &str) -> Result<&str> {
    uuid::Uuid::parse_str(id)
        .map(|_| id)
        .map_err(|_| AppError::BadRequest("Invalid ID format".to_string()))
}

/// All sets in canonical order.
pub async fn handle_list(store: &dyn HotkeySetStore) -> Result<Vec<HotkeySet>> {
    store
        .list()
        .await
        .map_err(AppError::store("Error fetching hotkey sets"))
}

pub async fn handle_get(store: &dyn HotkeySetStore, id: &str) -> Result<HotkeySet> {
    let id = parse_set_id(id)?;
    store
        .get(id)
        .await
        .map_err(AppError::store("Error fetching hotkey set"))?
        .ok_or_else(|| AppError::NotFound(SET_NOT_FOUND.to_string()))
}

/// Create a set at the end of the current order.
pub async fn handle_create(
    store: &dyn HotkeySetStore,
    draft: HotkeySetDraft,
) -> Result<HotkeySet> {
    draft.validate()?;

    let set = store
        .insert(draft)
        .await
        .map_err(AppError::store("Error creating hotkey set"))?;

    tracing::info!(id = %set.id, order = set.order, "Created hotkey set");
    Ok(set)
}

/// Replace the editable fields of a set. Never changes `order`.
pub async fn handle_update(
    store: &dyn HotkeySetStore,
    id: &str,
    draft: HotkeySetDraft,
) -> Result<HotkeySet> {
    let id = parse_set_id(id)?;
    draft.validate()?;

    store
        .update_fields(id, draft)
        .await
        .map_err(AppError::store("Error updating hotkey set"))?
        .ok_or_else(|| AppError::NotFound(SET_NOT_FOUND.to_string()))
}

/// Delete a set. Remaining sets keep their order values.
pub async fn handle_delete(store: &dyn HotkeySetStore, id: &str) -> Result<HotkeySet> {
    let id = parse_set_id(id)?;

    let deleted = store
        .delete(id)
        .await
        .map_err(AppError::store("Error deleting hotkey set"))?
        .ok_or_else(|| AppError::NotFound(SET_NOT_FOUND.to_string()))?;

    tracing::info!(id = %deleted.id, "Deleted hotkey set");
    Ok(deleted)
}
