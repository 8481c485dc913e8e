//! Unified error handling for the server.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keyset_engine::Error as EngineError;
use serde::Serialize;
use serde_json::Value;

use crate::store::StoreError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] EngineError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StoreError,
    },
}

impl AppError {
    /// Wrap a store failure with the operation it interrupted.
    pub fn store(context: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Store { context, source }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Error response body.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponse {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid_set: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    received_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    received: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ErrorResponse {
    fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            ..Default::default()
        }
    }
}

fn validation_response(err: &EngineError) -> (StatusCode, ErrorResponse) {
    let mut body = ErrorResponse::new("validation", err.to_string());

    match err {
        EngineError::NotAnArray { received } => {
            body.received = Some(received.clone());
        }
        EngineError::InvalidEntry {
            index,
            field,
            received_value,
            entry,
        } => {
            body.invalid_set = Some(entry.clone());
            body.index = Some(*index);
            body.field = Some(*field);
            body.received_value = Some(received_value.clone());
        }
        EngineError::DuplicateId { index, id, entry } => {
            body.invalid_set = Some(entry.clone());
            body.index = Some(*index);
            body.field = Some("id");
            body.received_value = Some(Value::String(id.clone()));
        }
        EngineError::ReorderInFlight | EngineError::NotCommitting => {
            return (StatusCode::CONFLICT, ErrorResponse::new("conflict", err.to_string()));
        }
        EngineError::EmptyBatch | EngineError::MissingRequiredFields => {}
    }

    (StatusCode::BAD_REQUEST, body)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(e) => {
                tracing::debug!("Validation error: {}", e);
                validation_response(e)
            }
            AppError::BadRequest(msg) => {
                tracing::debug!("Bad request: {}", msg);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("validation", msg.clone()),
                )
            }
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("notFound", msg.clone()),
            ),
            AppError::Store {
                context,
                source: source @ StoreError::OrderExhausted(_),
            } => {
                tracing::warn!("{}: {}", context, source);
                let mut body = ErrorResponse::new("conflict", *context);
                body.error = Some(source.to_string());
                (StatusCode::CONFLICT, body)
            }
            AppError::Store { context, source } => {
                tracing::error!("{}: {:?}", context, source);
                let mut body = ErrorResponse::new("persistence", *context);
                body.error = Some(source.to_string());
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body_of(err: &EngineError) -> Value {
        serde_json::to_value(validation_response(err).1).unwrap()
    }

    #[test]
    fn invalid_entry_names_the_entry() {
        let err = EngineError::InvalidEntry {
            index: 2,
            field: "order",
            received_value: json!("first"),
            entry: json!({"id": "a", "order": "first"}),
        };

        assert_eq!(
            body_of(&err),
            json!({
                "kind": "validation",
                "message": "Invalid set format. Each set must have id and order properties.",
                "invalidSet": {"id": "a", "order": "first"},
                "index": 2,
                "field": "order",
                "receivedValue": "first"
            })
        );
    }

    #[test]
    fn empty_batch_has_message_only() {
        assert_eq!(
            body_of(&EngineError::EmptyBatch),
            json!({"kind": "validation", "message": "Empty sets array provided"})
        );
    }

    #[test]
    fn missing_field_value_is_null() {
        let err = EngineError::InvalidEntry {
            index: 0,
            field: "id",
            received_value: Value::Null,
            entry: json!({"order": 0}),
        };
        assert_eq!(body_of(&err).get("receivedValue"), Some(&Value::Null));
    }

    #[test]
    fn lifecycle_errors_are_conflicts() {
        let (status, _) = validation_response(&EngineError::ReorderInFlight);
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn store_error_keeps_context() {
        let err = AppError::store("Error fetching hotkey sets")(StoreError::Unavailable(
            "pool closed".into(),
        ));
        assert_eq!(
            err.to_string(),
            "Error fetching hotkey sets: store unavailable: pool closed"
        );

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn exhausted_order_is_a_conflict() {
        let err = AppError::store("Error creating hotkey set")(StoreError::OrderExhausted(
            i64::MAX,
        ));
        assert_eq!(err.into_response().status(), StatusCode::CONFLICT);
    }
}
