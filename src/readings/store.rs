use sqlx::PgPool;
use tracing::debug;

use crate::db::models::Reading;

/// Read-only access to the append-only `readings` table.
///
/// Rows are written by the external ingestion process; this store never
/// inserts, updates or deletes.
#[derive(Debug, Clone)]
pub struct ReadingStore {
    pool: PgPool,
}

impl ReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The reading with the highest `id`, if any row exists.
    pub async fn latest(&self) -> Result<Option<Reading>, sqlx::Error> {
        sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, temperature, humidity, recorded_at, relay_status
            FROM readings
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
    }

    /// Every reading in insertion order. Full table scan.
    pub async fn history(&self) -> Result<Vec<Reading>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, temperature, humidity, recorded_at, relay_status
            FROM readings
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded reading history");
        Ok(rows)
    }

    /// The newest reading taken while the relay was on. Readings sharing the
    /// newest timestamp resolve to the highest `id`.
    pub async fn last_relay_on(&self) -> Result<Option<Reading>, sqlx::Error> {
        sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, temperature, humidity, recorded_at, relay_status
            FROM readings
            WHERE relay_status = 'ON'
            ORDER BY recorded_at DESC, id DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await
    }
}
