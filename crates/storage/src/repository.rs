use async_trait::async_trait;
use english_core::model::{LessonId, LessonProgressRecord, Score, upsert_record};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::ledger::{decode_ledger, encode_ledger};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persisted list of lesson completions that have not reached the backend.
///
/// At most one record per lesson. Implementations must make `upsert` atomic
/// with respect to other calls on the same ledger.
#[async_trait]
pub trait ProgressLedger: Send + Sync {
    /// All records in insertion order.
    ///
    /// Never fails: a missing, unreadable or corrupt ledger reads as empty.
    async fn read_all(&self) -> Vec<LessonProgressRecord>;

    /// Record a completion. An existing record keeps the higher score and
    /// takes the new time spent; otherwise a record is appended.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the ledger cannot be written.
    async fn upsert(
        &self,
        lesson_id: LessonId,
        score: Score,
        time_spent_secs: u64,
    ) -> Result<(), StorageError>;

    /// Drop every record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the ledger cannot be removed.
    async fn clear(&self) -> Result<(), StorageError>;
}

/// Ledger held in process memory, stored in its encoded form so reads go
/// through the same decoding as persisted ledgers.
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    raw: Arc<Mutex<Option<String>>>,
}

impl InMemoryLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary stored value, e.g. one left by an older client.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Arc::new(Mutex::new(Some(raw.into()))),
        }
    }

    /// The stored value, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn raw(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .raw
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

#[async_trait]
impl ProgressLedger for InMemoryLedger {
    async fn read_all(&self) -> Vec<LessonProgressRecord> {
        match self.raw.lock() {
            Ok(guard) => decode_ledger(guard.as_deref()),
            Err(err) => {
                tracing::warn!(error = %err, "ledger lock poisoned, treating as empty");
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
        let mut guard = self
            .raw
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut records = decode_ledger(guard.as_deref());
        upsert_record(&mut records, lesson_id, score, time_spent_secs);
        *guard = Some(encode_ledger(&records)?);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        let mut guard = self
            .raw
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}

/// Storage handles behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub ledger: Arc<dyn ProgressLedger>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let ledger: Arc<dyn ProgressLedger> = Arc::new(InMemoryLedger::new());
        Self { ledger }
    }
}
