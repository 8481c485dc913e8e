//! Shared helpers for driving the router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use futures::future::BoxFuture;
use keyset_engine::{HotkeySet, HotkeySetDraft, Order};
use keyset_server::store::{HotkeySetStore, MemoryStore, StoreError, StoreResult};
use keyset_server::{build_router, AppState};
use serde_json::Value;
use tower::ServiceExt;

/// Router over the given store.
pub fn app_with(store: Arc<dyn HotkeySetStore>) -> Router {
    build_router(AppState::new(store))
}

/// Router over an empty in-memory store.
pub fn memory_app() -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (app_with(store.clone()), store)
}

/// Send a request and decode the JSON response body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    send_request(app, request).await
}

/// Send a raw request and decode the JSON response body.
pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

/// Create a set through the API and return it.
pub async fn create_set(app: &Router, name: &str, application: &str) -> HotkeySet {
    let (status, body) = send(
        app,
        Method::POST,
        "/hotkey-sets",
        Some(serde_json::json!({"name": name, "application": application})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    serde_json::from_value(body).unwrap()
}

/// Ids of a JSON array of sets.
pub fn set_ids(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|set| set["id"].as_str().unwrap().to_string())
        .collect()
}

/// Orders of a JSON array of sets.
pub fn orders(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|set| set["order"].as_i64().unwrap())
        .collect()
}

/// Store whose reads succeed but every write fails.
pub struct BrokenWrites {
    pub inner: MemoryStore,
}

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection reset by peer".into()))
}

impl HotkeySetStore for BrokenWrites {
    fn list(&self) -> BoxFuture<'_, StoreResult<Vec<HotkeySet>>> {
        self.inner.list()
    }

    fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        self.inner.get(id)
    }

    fn insert(&self, _draft: HotkeySetDraft) -> BoxFuture<'_, StoreResult<HotkeySet>> {
        Box::pin(async { unavailable() })
    }

    fn update_fields<'a>(
        &'a self,
        _id: &'a str,
        _draft: HotkeySetDraft,
    ) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        Box::pin(async { unavailable() })
    }

    fn set_order<'a>(
        &'a self,
        _id: &'a str,
        _order: Order,
    ) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        Box::pin(async { unavailable() })
    }

    fn delete<'a>(&'a self, _id: &'a str) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        Box::pin(async { unavailable() })
    }
}
