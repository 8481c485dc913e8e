//! In-memory store, used when no database is configured and in tests.

use std::collections::HashMap;

use futures::future::BoxFuture;
use keyset_engine::{sort_canonical, HotkeySet, HotkeySetDraft, Order, SetId};
use tokio::sync::RwLock;

use super::{next_order, now_millis, HotkeySetStore, StoreResult};

/// Hotkey sets held in a map behind an async lock.
///
/// Batches use the default concurrent `apply_order_batch`, so a batch with an
/// unknown id leaves the other updates applied.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sets: RwLock<HashMap<SetId, HotkeySet>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given sets.
    pub fn with_sets(sets: impl IntoIterator<Item = HotkeySet>) -> Self {
        let sets = sets.into_iter().map(|set| (set.id.clone(), set)).collect();
        Self {
            sets: RwLock::new(sets),
        }
    }
}

impl HotkeySetStore for MemoryStore {
    fn list(&self) -> BoxFuture<'_, StoreResult<Vec<HotkeySet>>> {
        Box::pin(async move {
            let mut sets: Vec<_> = self.sets.read().await.values().cloned().collect();
            sort_canonical(&mut sets);
            Ok(sets)
        })
    }

    fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        Box::pin(async move { Ok(self.sets.read().await.get(id).cloned()) })
    }

    fn insert(&self, draft: HotkeySetDraft) -> BoxFuture<'_, StoreResult<HotkeySet>> {
        Box::pin(async move {
            let mut sets = self.sets.write().await;
            let order = next_order(sets.values().map(|set| set.order).max())?;

            let set = HotkeySet::from_draft(
                uuid::Uuid::new_v4().to_string(),
                draft,
                order,
                now_millis(),
            );
            sets.insert(set.id.clone(), set.clone());

            Ok(set)
        })
    }

    fn update_fields<'a>(
        &'a self,
        id: &'a str,
        draft: HotkeySetDraft,
    ) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        Box::pin(async move {
            let mut sets = self.sets.write().await;
            Ok(sets.get_mut(id).map(|set| {
                set.apply_draft(draft, now_millis());
                set.clone()
            }))
        })
    }

    fn set_order<'a>(
        &'a self,
        id: &'a str,
        order: Order,
    ) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        Box::pin(async move {
            let mut sets = self.sets.write().await;
            Ok(sets.get_mut(id).map(|set| {
                set.reposition(order, now_millis());
                set.clone()
            }))
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        Box::pin(async move { Ok(self.sets.write().await.remove(id)) })
    }
}
