//! Optimistic reorder session over a [`HotkeyApi`].

use std::sync::Arc;

use keyset_engine::{FailureNotice, HotkeySet, Phase, ReorderBatch, ReorderEngine, Settlement};
use tokio::sync::{mpsc, Mutex};

use crate::api::HotkeyApi;
use crate::error::Result;

/// Drives a [`ReorderEngine`] against the server.
///
/// The engine lock is never held across a network call, so the displayed
/// list stays readable while a reorder is in flight. Cloning a session shares
/// the same engine.
pub struct ReorderSession<A> {
    inner: Arc<Shared<A>>,
}

struct Shared<A> {
    api: A,
    engine: Mutex<ReorderEngine>,
    notices: mpsc::UnboundedSender<FailureNotice>,
}

impl<A> Clone for ReorderSession<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: HotkeyApi + 'static> ReorderSession<A> {
    /// Create an empty session. Failure notices are sent to `notices`.
    pub fn new(api: A, notices: mpsc::UnboundedSender<FailureNotice>) -> Self {
        Self {
            inner: Arc::new(Shared {
                api,
                engine: Mutex::new(ReorderEngine::new(Vec::new())),
                notices,
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// Fetch the server list and display it.
    ///
    /// Fails with [`keyset_engine::Error::ReorderInFlight`] while a reorder is
    /// pending.
    pub async fn refresh(&self) -> Result<Vec<HotkeySet>> {
        let sets = self.inner.api.list().await?;
        let mut engine = self.inner.engine.lock().await;
        engine.load(sets)?;
        Ok(engine.sets().to_vec())
    }

    /// The list as the user currently sees it.
    pub async fn sets(&self) -> Vec<HotkeySet> {
        self.inner.engine.lock().await.sets().to_vec()
    }

    pub async fn phase(&self) -> Phase {
        self.inner.engine.lock().await.phase().clone()
    }

    /// Whether the displayed list may be out of date after a failed re-fetch.
    pub async fn is_stale(&self) -> bool {
        self.inner.engine.lock().await.is_stale()
    }

    pub async fn begin_drag(&self, source: usize) -> Result<()> {
        self.inner.engine.lock().await.begin_drag(source)?;
        Ok(())
    }

    pub async fn cancel_drag(&self) {
        self.inner.engine.lock().await.cancel_drag();
    }

    /// Move the set at `source` to `destination` and persist the new order.
    ///
    /// A no-op gesture settles as [`Settlement::Unchanged`] without a request.
    /// A failed submission is not an error here: the list is rolled back, one
    /// [`FailureNotice`] is sent, and [`Settlement::RolledBack`] is returned.
    ///
    /// The request and its settlement run on a spawned task. Dropping the
    /// returned future does not abandon the commit; the session still settles
    /// once the request finishes.
    pub async fn reorder(&self, source: usize, destination: usize) -> Result<Settlement> {
        let batch = self
            .inner
            .engine
            .lock()
            .await
            .commit_drop(source, destination)?;
        let Some(batch) = batch else {
            return Ok(Settlement::Unchanged);
        };

        tracing::debug!(sets = batch.len(), source, destination, "Submitting reorder");

        let shared = Arc::clone(&self.inner);
        tokio::spawn(async move { shared.settle(batch).await }).await?
    }
}

impl<A: HotkeyApi> Shared<A> {
    async fn settle(&self, batch: ReorderBatch) -> Result<Settlement> {
        match self.api.reorder(&batch).await {
            Ok(canonical) => {
                let settlement = self.engine.lock().await.confirm(canonical)?;
                tracing::info!(sets = batch.len(), "Reorder confirmed");
                Ok(settlement)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Reorder failed, re-fetching hotkey sets");

                let authoritative = match self.api.list().await {
                    Ok(sets) => Some(sets),
                    Err(fetch_err) => {
                        tracing::error!(
                            error = %fetch_err,
                            "Re-fetch failed, showing last confirmed order"
                        );
                        None
                    }
                };

                let settlement = self
                    .engine
                    .lock()
                    .await
                    .roll_back(authoritative, err.user_message())?;

                if let Settlement::RolledBack(notice) = &settlement {
                    if self.notices.send(notice.clone()).is_err() {
                        tracing::debug!("Failure notice dropped, no receiver");
                    }
                }
                Ok(settlement)
            }
        }
    }
}
