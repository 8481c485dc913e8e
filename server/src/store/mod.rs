//! Persistence for hotkey sets.
//!
//! [`HotkeySetStore`] is the record-store contract the handlers work against.
//! Two implementations ship with the server: [`PgStore`] over PostgreSQL and
//! [`MemoryStore`] for development and tests.

mod memory;
mod pool;
mod postgres;

pub use memory::*;
pub use pool::*;
pub use postgres::*;

use futures::future::{join_all, BoxFuture};
use keyset_engine::{HotkeySet, HotkeySetDraft, Order, OrderEntry, SetId, Timestamp};

/// Store-level failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The largest stored `order` leaves no room to append after it.
    #[error("no order value left after {0}")]
    OrderExhausted(Order),
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// What happened to a batch of order updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Number of records whose order was written
    pub updated: usize,
    /// Ids that did not resolve to a record
    pub missing: Vec<SetId>,
}

impl BatchOutcome {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Record store for hotkey sets.
///
/// `list` returns sets sorted by `order`, then creation time, then id.
/// Only `set_order` and `apply_order_batch` may change `order` after insert.
pub trait HotkeySetStore: Send + Sync + 'static {
    fn list(&self) -> BoxFuture<'_, StoreResult<Vec<HotkeySet>>>;

    fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>>;

    /// Insert a new set at `max(order) + 1`.
    fn insert(&self, draft: HotkeySetDraft) -> BoxFuture<'_, StoreResult<HotkeySet>>;

    /// Replace the editable fields of a set, leaving `order` untouched.
    fn update_fields<'a>(
        &'a self,
        id: &'a str,
        draft: HotkeySetDraft,
    ) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>>;

    /// Partial update of a single set's `order`.
    fn set_order<'a>(
        &'a self,
        id: &'a str,
        order: Order,
    ) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>>;

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>>;

    /// Write `order` for every entry of a batch.
    ///
    /// The default issues all `set_order` calls concurrently. It is not
    /// atomic: when some ids are missing, the updates for the others have
    /// already been written and stay written. Stores with transactions
    /// override this to apply all or nothing.
    fn apply_order_batch<'a>(
        &'a self,
        entries: &'a [OrderEntry],
    ) -> BoxFuture<'a, StoreResult<BatchOutcome>> {
        Box::pin(async move {
            let updates = entries
                .iter()
                .map(|entry| self.set_order(&entry.id, entry.order));
            let results = join_all(updates).await;

            let mut outcome = BatchOutcome::default();
            for (entry, result) in entries.iter().zip(results) {
                match result? {
                    Some(_) => outcome.updated += 1,
                    None => outcome.missing.push(entry.id.clone()),
                }
            }
            Ok(outcome)
        })
    }
}

/// Order for a set appended after `max`, or 0 for an empty store.
pub fn next_order(max: Option<Order>) -> StoreResult<Order> {
    match max {
        None => Ok(0),
        Some(max) => max.checked_add(1).ok_or(StoreError::OrderExhausted(max)),
    }
}

/// Current time in milliseconds since epoch.
pub fn now_millis() -> Timestamp {
    chrono::Utc::now().timestamp_millis().max(0) as Timestamp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_order_appends_or_reports_exhaustion() {
        assert_eq!(next_order(None).unwrap(), 0);
        assert_eq!(next_order(Some(-4)).unwrap(), -3);
        assert_eq!(next_order(Some(Order::MAX - 1)).unwrap(), Order::MAX);
        assert!(matches!(
            next_order(Some(Order::MAX)),
            Err(StoreError::OrderExhausted(Order::MAX))
        ));
    }
}
