//! HTTP access to the Keyset server.

use futures::future::BoxFuture;
use keyset_engine::{HotkeySet, HotkeySetDraft, ReorderBatch};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Server operations a [`ReorderSession`](crate::ReorderSession) depends on.
pub trait HotkeyApi: Send + Sync {
    /// All hotkey sets in display order.
    fn list(&self) -> BoxFuture<'_, Result<Vec<HotkeySet>>>;

    /// Submit a full ordering; returns the canonical list on success.
    fn reorder<'a>(&'a self, batch: &'a ReorderBatch) -> BoxFuture<'a, Result<Vec<HotkeySet>>>;
}

/// reqwest-backed client for the hotkey set endpoints.
#[derive(Debug, Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_sets(&self) -> Result<Vec<HotkeySet>> {
        self.send(self.request(Method::GET, "/hotkey-sets")).await
    }

    pub async fn get_set(&self, id: &str) -> Result<HotkeySet> {
        self.send(self.request(Method::GET, &format!("/hotkey-sets/{id}")))
            .await
    }

    pub async fn create_set(&self, draft: &HotkeySetDraft) -> Result<HotkeySet> {
        self.send(self.request(Method::POST, "/hotkey-sets").json(draft))
            .await
    }

    /// Edit a set's fields. The server never changes `order` here.
    pub async fn update_set(&self, id: &str, draft: &HotkeySetDraft) -> Result<HotkeySet> {
        self.send(
            self.request(Method::PUT, &format!("/hotkey-sets/{id}"))
                .json(draft),
        )
        .await
    }

    pub async fn delete_set(&self, id: &str) -> Result<HotkeySet> {
        self.send(self.request(Method::DELETE, &format!("/hotkey-sets/{id}")))
            .await
    }

    pub async fn reorder_sets(&self, batch: &ReorderBatch) -> Result<Vec<HotkeySet>> {
        self.send(
            self.request(Method::PUT, "/hotkey-sets/reorder")
                .json(batch),
        )
        .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await.map_err(|err| self.classify(err))?;
        decode(response).await
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else if err.is_connect() {
            ClientError::ConnectionRefused(self.base_url.clone())
        } else {
            ClientError::Transport(err)
        }
    }
}

/// Decode a success body, or turn an error body into [`ClientError::Api`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body: Value = response.json().await.unwrap_or(Value::Null);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    let kind = body.get("kind").and_then(Value::as_str).map(str::to_string);

    tracing::debug!(status = status.as_u16(), %message, "Server returned an error");

    Err(ClientError::Api {
        status: status.as_u16(),
        kind,
        message,
    })
}

impl HotkeyApi for HttpApi {
    fn list(&self) -> BoxFuture<'_, Result<Vec<HotkeySet>>> {
        Box::pin(self.list_sets())
    }

    fn reorder<'a>(&'a self, batch: &'a ReorderBatch) -> BoxFuture<'a, Result<Vec<HotkeySet>>> {
        Box::pin(self.reorder_sets(batch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let api = HttpApi::new(&ClientConfig {
            base_url: "http://localhost:5000/".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000");
    }
}
