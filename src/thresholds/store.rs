use sqlx::PgPool;
use tracing::info;

use crate::db::models::{Threshold, UpdateOutcome};

/// Access to the per-user `thresholds` table. Rows are provisioned
/// externally; this store only reads and overwrites them.
#[derive(Debug, Clone)]
pub struct ThresholdStore {
    pool: PgPool,
}

impl ThresholdStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, user_id: i64) -> Result<Option<Threshold>, sqlx::Error> {
        sqlx::query_as::<_, Threshold>(
            r#"
            SELECT user_id, temperature_threshold, humidity_threshold
            FROM thresholds
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Overwrite both thresholds for `user_id` in one statement.
    ///
    /// Postgres counts matched rows rather than changed ones, so the
    /// `IS DISTINCT FROM` guard makes an identical resubmission report
    /// [`UpdateOutcome::NoChange`], same as an unknown user.
    pub async fn update(
        &self,
        user_id: i64,
        temperature_threshold: f64,
        humidity_threshold: f64,
    ) -> Result<UpdateOutcome, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE thresholds
            SET temperature_threshold = $1,
                humidity_threshold    = $2
            WHERE user_id = $3
              AND (temperature_threshold IS DISTINCT FROM $1
                   OR humidity_threshold IS DISTINCT FROM $2)
            "#,
        )
        .bind(temperature_threshold)
        .bind(humidity_threshold)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        let outcome = UpdateOutcome::from_rows_affected(result.rows_affected());
        info!(
            user_id,
            temperature_threshold,
            humidity_threshold,
            outcome = outcome.as_str(),
            "Threshold update applied"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::PgPool;

    use super::*;

    async fn insert_threshold(pool: &PgPool, user_id: i64, temp: f64, hum: f64) {
        sqlx::query(
            "INSERT INTO thresholds (user_id, temperature_threshold, humidity_threshold) \
             VALUES ($1, $2, $3)",
        )
        .bind(user_id)
        .bind(temp)
        .bind(hum)
        .execute(pool)
        .await
        .unwrap();
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn update_changes_only_target_row(pool: PgPool) {
        insert_threshold(&pool, 1, 26.0, 70.0).await;
        insert_threshold(&pool, 2, 26.0, 70.0).await;
        let store = ThresholdStore::new(pool);

        let outcome = store.update(1, 28.5, 65.0).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::Success);

        let one = store.get(1).await.unwrap().unwrap();
        assert_eq!((one.temperature_threshold, one.humidity_threshold), (28.5, 65.0));
        let two = store.get(2).await.unwrap().unwrap();
        assert_eq!((two.temperature_threshold, two.humidity_threshold), (26.0, 70.0));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn changing_one_field_is_success(pool: PgPool) {
        insert_threshold(&pool, 3, 26.0, 70.0).await;
        let store = ThresholdStore::new(pool);

        assert_eq!(store.update(3, 26.0, 71.0).await.unwrap(), UpdateOutcome::Success);
        assert_eq!(store.update(3, 26.0, 71.0).await.unwrap(), UpdateOutcome::NoChange);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn missing_user_is_no_change(pool: PgPool) {
        let store = ThresholdStore::new(pool);
        assert_eq!(store.update(404, 30.0, 60.0).await.unwrap(), UpdateOutcome::NoChange);
        assert!(store.get(404).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn concurrent_updates_to_different_users_do_not_interfere(pool: PgPool) {
        for user_id in 1..=8 {
            insert_threshold(&pool, user_id, 26.0, 70.0).await;
        }
        let store = ThresholdStore::new(pool);

        let mut tasks = Vec::new();
        for user_id in 1..=8_i64 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .update(user_id, 20.0 + user_id as f64, 50.0 + user_id as f64)
                    .await
            }));
        }
        for task in tasks {
            assert_eq!(task.await.unwrap().unwrap(), UpdateOutcome::Success);
        }

        for user_id in 1..=8_i64 {
            let t = store.get(user_id).await.unwrap().unwrap();
            assert_eq!(t.temperature_threshold, 20.0 + user_id as f64);
            assert_eq!(t.humidity_threshold, 50.0 + user_id as f64);
        }
    }
}
