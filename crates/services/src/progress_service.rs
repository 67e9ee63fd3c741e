use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use english_core::model::{
    LessonId, LessonProgressRecord, LessonTitles, Scene, Score, ServerProgressRecord,
    lesson_title_index,
};
use english_core::stats::{HistoryTotals, history_totals};
use english_core::{Clock, LessonCompletion, MergedEntry, MergedProgress, ProgressSource, merge};
use storage::repository::ProgressLedger;

use crate::api::{CompletionRequest, LearningBackend};
use crate::error::SyncError;

/// Scene title shown for lessons the catalog does not know about.
pub const UNSYNCED_SCENE_TITLE: &str = "(not synced)";

/// Where a finished lesson ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The backend accepted the completion.
    Synced,
    /// The backend was unavailable; the completion went to the local ledger.
    SavedLocally,
}

/// One row of the progress history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub lesson_id: LessonId,
    pub lesson_title: String,
    pub scene_title: String,
    pub completed_at: DateTime<Utc>,
    pub score: Score,
    pub time_spent_secs: u64,
    pub source: ProgressSource,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressHistory {
    pub entries: Vec<HistoryEntry>,
    pub totals: HistoryTotals,
}

/// Result of pushing the local ledger to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub uploaded: usize,
}

/// Progress reads and writes across the backend and the local ledger.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    backend: Arc<dyn LearningBackend>,
    ledger: Arc<dyn ProgressLedger>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        backend: Arc<dyn LearningBackend>,
        ledger: Arc<dyn ProgressLedger>,
    ) -> Self {
        Self {
            clock,
            backend,
            ledger,
        }
    }

    /// Server progress, or nothing when the backend is unavailable.
    pub async fn server_progress_or_empty(&self) -> Vec<ServerProgressRecord> {
        match self.backend.my_progress().await {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load server progress, using local only");
                Vec::new()
            }
        }
    }

    /// Server progress reconciled with the local ledger.
    pub async fn load_merged(&self) -> MergedProgress {
        let server = self.server_progress_or_empty().await;
        let local = self.ledger.read_all().await;
        merge(&server, &local)
    }

    /// Report a finished lesson. Falls back to the local ledger when the
    /// backend rejects or cannot be reached; never fails.
    pub async fn record_completion(&self, completion: &LessonCompletion) -> CompletionOutcome {
        let request = CompletionRequest {
            lesson_id: completion.lesson_id,
            score: completion.score,
            time_spent: completion.time_spent_secs,
        };
        match self.backend.complete_lesson(&request).await {
            Ok(()) => {
                tracing::info!(lesson_id = %completion.lesson_id, score = completion.score.value(), "lesson completion synced");
                CompletionOutcome::Synced
            }
            Err(err) => {
                tracing::warn!(
                    lesson_id = %completion.lesson_id,
                    error = %err,
                    "backend rejected completion, saving locally"
                );
                if let Err(store_err) = self
                    .ledger
                    .upsert(
                        completion.lesson_id,
                        completion.score,
                        completion.time_spent_secs,
                    )
                    .await
                {
                    tracing::error!(
                        lesson_id = %completion.lesson_id,
                        error = %store_err,
                        "failed to save completion locally"
                    );
                }
                CompletionOutcome::SavedLocally
            }
        }
    }

    /// Upload every ledger record in order. The first failure stops the sweep
    /// and leaves the ledger untouched; a full sweep clears it.
    ///
    /// # Errors
    ///
    /// Returns `SyncError::Upload` when a record is rejected and
    /// `SyncError::Storage` when the ledger cannot be cleared.
    pub async fn sync_local_to_server(&self) -> Result<SyncReport, SyncError> {
        let records = self.ledger.read_all().await;
        if records.is_empty() {
            tracing::debug!("ledger empty, nothing to sync");
            return Ok(SyncReport { uploaded: 0 });
        }

        let total = records.len();
        for (uploaded, record) in records.iter().enumerate() {
            let request = CompletionRequest {
                lesson_id: record.lesson_id,
                score: record.score,
                time_spent: record.time_spent_secs,
            };
            if let Err(source) = self.backend.complete_lesson(&request).await {
                tracing::warn!(
                    lesson_id = %record.lesson_id,
                    uploaded,
                    total,
                    error = %source,
                    "sync aborted, keeping local progress"
                );
                return Err(SyncError::Upload {
                    lesson_id: record.lesson_id.value(),
                    uploaded,
                    total,
                    source,
                });
            }
        }

        self.ledger.clear().await?;
        tracing::info!(uploaded = total, "local progress synced");
        Ok(SyncReport { uploaded: total })
    }

    /// Merged progress annotated with lesson and scene titles.
    pub async fn history(&self) -> ProgressHistory {
        let server = self.server_progress_or_empty().await;
        let scenes = match self.backend.list_scenes().await {
            Ok(scenes) => scenes,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load scenes for history titles");
                Vec::new()
            }
        };
        let local = self.ledger.read_all().await;
        build_history(&server, &scenes, &local, self.clock.now())
    }
}

/// Assemble the history view from already loaded inputs.
///
/// Titles come from server metadata, then the catalog, then fallbacks.
/// Entries without a server timestamp are stamped with `loaded_at`.
#[must_use]
pub fn build_history(
    server: &[ServerProgressRecord],
    scenes: &[Scene],
    local: &[LessonProgressRecord],
    loaded_at: DateTime<Utc>,
) -> ProgressHistory {
    let merged = merge(server, local);
    let totals = history_totals(merged.entries());
    let index = lesson_title_index(scenes);
    let entries = merged
        .into_entries()
        .into_iter()
        .map(|entry| annotate(entry, &index, loaded_at))
        .collect();
    ProgressHistory { entries, totals }
}

fn annotate(
    entry: MergedEntry,
    index: &HashMap<LessonId, LessonTitles>,
    loaded_at: DateTime<Utc>,
) -> HistoryEntry {
    let known = index.get(&entry.lesson_id);
    let lesson_title = non_blank(entry.meta.lesson_title)
        .or_else(|| known.map(|t| t.lesson_title.clone()))
        .unwrap_or_else(|| format!("Lesson #{}", entry.lesson_id));
    let scene_title = non_blank(entry.meta.scene_title)
        .or_else(|| known.map(|t| t.scene_title.clone()))
        .unwrap_or_else(|| UNSYNCED_SCENE_TITLE.to_string());
    HistoryEntry {
        lesson_id: entry.lesson_id,
        lesson_title,
        scene_title,
        completed_at: entry.meta.completed_at.unwrap_or(loaded_at),
        score: entry.score,
        time_spent_secs: entry.time_spent_secs,
        source: entry.source,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
