use english_core::model::{LessonId, LessonProgressRecord, Score, upsert_record};

use super::SqliteRepository;
use super::kv_repo::{read_value, write_value};
use crate::ledger::{LEDGER_KEY, decode_ledger, encode_ledger};
use crate::repository::{ProgressLedger, StorageError};

fn conn_err(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl ProgressLedger for SqliteRepository {
    async fn read_all(&self) -> Vec<LessonProgressRecord> {
        match self.get_value(LEDGER_KEY).await {
            Ok(raw) => decode_ledger(raw.as_deref()),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read progress ledger, treating as empty");
                Vec::new()
            }
        }
    }

    async fn upsert(
        &self,
        lesson_id: LessonId,
        score: Score,
        time_spent_secs: u64,
    ) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn_err)?;

        // Take the write lock before reading so concurrent upserts queue up
        // instead of failing on commit.
        sqlx::query("UPDATE kv_store SET updated_at = updated_at WHERE key = ?1")
            .bind(LEDGER_KEY)
            .execute(&mut *tx)
            .await
            .map_err(conn_err)?;

        let raw = read_value(&mut tx, LEDGER_KEY).await.map_err(conn_err)?;
        let mut records = decode_ledger(raw.as_deref());
        upsert_record(&mut records, lesson_id, score, time_spent_secs);
        let encoded = encode_ledger(&records)?;
        write_value(&mut tx, LEDGER_KEY, &encoded)
            .await
            .map_err(conn_err)?;

        tx.commit().await.map_err(conn_err)?;
        tracing::debug!(
            lesson_id = %lesson_id,
            score = score.value(),
            time_spent_secs,
            entries = records.len(),
            "ledger upserted"
        );
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.remove_value(LEDGER_KEY).await?;
        tracing::debug!("ledger cleared");
        Ok(())
    }
}
