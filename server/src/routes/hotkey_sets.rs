//! Hotkey set endpoint routes.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use keyset_engine::{HotkeySet, HotkeySetDraft};
use serde_json::Value;

use crate::error::Result;
use crate::handlers::{
    handle_create, handle_delete, handle_get, handle_list, handle_reorder, handle_update,
};
use crate::AppState;

/// Create hotkey set routes.
///
/// `/hotkey-sets/reorder` is a static segment and takes precedence over
/// `/hotkey-sets/{id}`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/hotkey-sets", get(list_handler).post(create_handler))
        .route("/hotkey-sets/reorder", put(reorder_handler))
        .route(
            "/hotkey-sets/{id}",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
}

/// PUT /hotkey-sets/reorder - Persist a full ordering.
async fn reorder_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<HotkeySet>>> {
    let Json(payload) = payload?;
    let sets = handle_reorder(state.store.as_ref(), &payload).await?;
    Ok(Json(sets))
}

/// GET /hotkey-sets - All sets in display order.
async fn list_handler(State(state): State<AppState>) -> Result<Json<Vec<HotkeySet>>> {
    let sets = handle_list(state.store.as_ref()).await?;
    Ok(Json(sets))
}

/// GET /hotkey-sets/{id}
async fn get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HotkeySet>> {
    let set = handle_get(state.store.as_ref(), &id).await?;
    Ok(Json(set))
}

/// POST /hotkey-sets - Create a set at the end of the list.
async fn create_handler(
    State(state): State<AppState>,
    draft: std::result::Result<Json<HotkeySetDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<HotkeySet>)> {
    let Json(draft) = draft?;
    let set = handle_create(state.store.as_ref(), draft).await?;
    Ok((StatusCode::CREATED, Json(set)))
}

/// PUT /hotkey-sets/{id} - Edit fields; `order` is ignored.
async fn update_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    draft: std::result::Result<Json<HotkeySetDraft>, JsonRejection>,
) -> Result<Json<HotkeySet>> {
    let Json(draft) = draft?;
    let set = handle_update(state.store.as_ref(), &id, draft).await?;
    Ok(Json(set))
}

/// DELETE /hotkey-sets/{id}
async fn delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HotkeySet>> {
    let set = handle_delete(state.store.as_ref(), &id).await?;
    Ok(Json(set))
}
