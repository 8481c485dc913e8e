//! PostgreSQL store for the hotkey_sets table.

use std::collections::HashSet;

use futures::future::BoxFuture;
use keyset_engine::{Hotkey, HotkeySet, HotkeySetDraft, Order, OrderEntry, SetId};
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use super::{next_order, now_millis, BatchOutcome, HotkeySetStore, StoreResult};

/// A stored hotkey set row from the database.
#[derive(Debug)]
pub struct StoredHotkeySet {
    pub id: String,
    pub name: String,
    pub application: String,
    pub description: Option<String>,
    pub hotkeys: Json<Vec<Hotkey>>,
    pub sort_order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for StoredHotkeySet {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(StoredHotkeySet {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            application: row.try_get("application")?,
            description: row.try_get("description")?,
            hotkeys: row.try_get("hotkeys")?,
            sort_order: row.try_get("sort_order")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl StoredHotkeySet {
    /// Convert database row to an engine HotkeySet.
    pub fn into_hotkey_set(self) -> HotkeySet {
        HotkeySet {
            id: self.id,
            name: self.name,
            application: self.application,
            description: self.description,
            hotkeys: self.hotkeys.0,
            order: self.sort_order,
            created_at: self.created_at as u64,
            updated_at: self.updated_at as u64,
        }
    }
}

/// Store backed by a PostgreSQL pool.
///
/// Batches run inside a single transaction and are rolled back when any id
/// is missing, so a 404 never leaves a partial reorder behind.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl HotkeySetStore for PgStore {
    fn list(&self) -> BoxFuture<'_, StoreResult<Vec<HotkeySet>>> {
        Box::pin(async move {
            let rows = sqlx::query_as::<_, StoredHotkeySet>(
                r#"
                SELECT id, name, application, description, hotkeys,
                       sort_order, created_at, updated_at
                FROM hotkey_sets
                ORDER BY sort_order ASC, created_at ASC, id ASC
                "#,
            )
            .fetch_all(&self.pool)
            .await?;

            Ok(rows
                .into_iter()
                .map(StoredHotkeySet::into_hotkey_set)
                .collect())
        })
    }

    fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, StoredHotkeySet>(
                r#"
                SELECT id, name, application, description, hotkeys,
                       sort_order, created_at, updated_at
                FROM hotkey_sets
                WHERE id = $1
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.map(StoredHotkeySet::into_hotkey_set))
        })
    }

    fn insert(&self, draft: HotkeySetDraft) -> BoxFuture<'_, StoreResult<HotkeySet>> {
        Box::pin(async move {
            let id = uuid::Uuid::new_v4().to_string();
            let now = now_millis() as i64;

            let mut tx = self.pool.begin().await?;

            let (max,): (Option<i64>,) =
                sqlx::query_as("SELECT MAX(sort_order) FROM hotkey_sets")
                    .fetch_one(&mut *tx)
                    .await?;
            let order = next_order(max)?;

            let row = sqlx::query_as::<_, StoredHotkeySet>(
                r#"
                INSERT INTO hotkey_sets (
                    id, name, application, description, hotkeys,
                    sort_order, created_at, updated_at
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
                RETURNING id, name, application, description, hotkeys,
                          sort_order, created_at, updated_at
                "#,
            )
            .bind(&id)
            .bind(&draft.name)
            .bind(&draft.application)
            .bind(&draft.description)
            .bind(Json(&draft.hotkeys))
            .bind(order)
            .bind(now)
            .fetch_one(&mut *tx)
            .await?;

            tx.commit().await?;
            Ok(row.into_hotkey_set())
        })
    }

    fn update_fields<'a>(
        &'a self,
        id: &'a str,
        draft: HotkeySetDraft,
    ) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, StoredHotkeySet>(
                r#"
                UPDATE hotkey_sets SET
                    name = $2,
                    application = $3,
                    description = $4,
                    hotkeys = $5,
                    updated_at = $6
                WHERE id = $1
                RETURNING id, name, application, description, hotkeys,
                          sort_order, created_at, updated_at
                "#,
            )
            .bind(id)
            .bind(&draft.name)
            .bind(&draft.application)
            .bind(&draft.description)
            .bind(Json(&draft.hotkeys))
            .bind(now_millis() as i64)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.map(StoredHotkeySet::into_hotkey_set))
        })
    }

    fn set_order<'a>(
        &'a self,
        id: &'a str,
        order: Order,
    ) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, StoredHotkeySet>(
                r#"
                UPDATE hotkey_sets SET sort_order = $2, updated_at = $3
                WHERE id = $1
                RETURNING id, name, application, description, hotkeys,
                          sort_order, created_at, updated_at
                "#,
            )
            .bind(id)
            .bind(order)
            .bind(now_millis() as i64)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.map(StoredHotkeySet::into_hotkey_set))
        })
    }

    fn delete<'a>(&'a self, id: &'a str) -> BoxFuture<'a, StoreResult<Option<HotkeySet>>> {
        Box::pin(async move {
            let row = sqlx::query_as::<_, StoredHotkeySet>(
                r#"
                DELETE FROM hotkey_sets
                WHERE id = $1
                RETURNING id, name, application, description, hotkeys,
                          sort_order, created_at, updated_at
                "#,
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.map(StoredHotkeySet::into_hotkey_set))
        })
    }

    fn apply_order_batch<'a>(
        &'a self,
        entries: &'a [OrderEntry],
    ) -> BoxFuture<'a, StoreResult<BatchOutcome>> {
        Box::pin(async move {
            let ids: Vec<SetId> = entries.iter().map(|e| e.id.clone()).collect();
            let orders: Vec<i64> = entries.iter().map(|e| e.order).collect();

            let mut tx = self.pool.begin().await?;

            let updated: Vec<(String,)> = sqlx::query_as(
                r#"
                UPDATE hotkey_sets AS s
                SET sort_order = b.sort_order, updated_at = $3
                FROM UNNEST($1::text[], $2::bigint[]) AS b(id, sort_order)
                WHERE s.id = b.id
                RETURNING s.id
                "#,
            )
            .bind(&ids[..])
            .bind(&orders[..])
            .bind(now_millis() as i64)
            .fetch_all(&mut *tx)
            .await?;

            let found: HashSet<&str> = updated.iter().map(|(id,)| id.as_str()).collect();
            let missing: Vec<SetId> = ids
                .iter()
                .filter(|id| !found.contains(id.as_str()))
                .cloned()
                .collect();

            if missing.is_empty() {
                tx.commit().await?;
                Ok(BatchOutcome {
                    updated: updated.len(),
                    missing,
                })
            } else {
                tx.rollback().await?;
                tracing::debug!(missing = missing.len(), "rolled back reorder batch");
                Ok(BatchOutcome {
                    updated: 0,
                    missing,
                })
            }
        })
    }
}
