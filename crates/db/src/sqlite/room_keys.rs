//! SQLite-Implementierung des RoomKeyRepository

use chrono::Utc;

use crate::repository::{DbResult, RoomKeyRepository};
use crate::sqlite::pool::SqliteDb;

impl RoomKeyRepository for SqliteDb {
    async fn get(&self, storage_key: &str) -> DbResult<Option<String>> {
        let wert: Option<String> =
            sqlx::query_scalar("SELECT exported_key FROM room_keys WHERE storage_key = ?")
                .bind(storage_key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(wert)
    }

    async fn put(&self, storage_key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO room_keys (storage_key, exported_key, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(storage_key) DO UPDATE SET
                exported_key = excluded.exported_key,
                updated_at = excluded.updated_at",
        )
        .bind(storage_key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await?;
        tracing::debug!(storage_key, "Raum-Schluessel gespeichert");
        Ok(())
    }

    async fn put_if_absent(&self, storage_key: &str, value: &str) -> DbResult<String> {
        let now = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await?;

        let eingefuegt = sqlx::query(
            "INSERT INTO room_keys (storage_key, exported_key, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(storage_key) DO NOTHING",
        )
        .bind(storage_key)
        .bind(value)
        .bind(&now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let gespeichert: String =
            sqlx::query_scalar("SELECT exported_key FROM room_keys WHERE storage_key = ?")
                .bind(storage_key)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        if eingefuegt > 0 {
            tracing::debug!(storage_key, "Raum-Schluessel neu angelegt");
        }
        Ok(gespeichert)
    }

    async fn exists(&self, storage_key: &str) -> DbResult<bool> {
        let anzahl: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM room_keys WHERE storage_key = ?")
                .bind(storage_key)
                .fetch_one(&self.pool)
                .await?;
        Ok(anzahl > 0)
    }

    async fn delete(&self, storage_key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM room_keys WHERE storage_key = ?")
            .bind(storage_key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_keys(&self) -> DbResult<Vec<String>> {
        let keys: Vec<String> =
            sqlx::query_scalar("SELECT storage_key FROM room_keys ORDER BY storage_key")
                .fetch_all(&self.pool)
                .await?;
        Ok(keys)
    }
}
