//! Merging server progress with the local ledger.
//!
//! The merge is keyed by lesson id. Server rows go in first, then local rows:
//! a local row for a lesson the server already knows keeps the higher of the
//! two scores but always replaces the time spent. Score and time therefore
//! follow different rules; callers rely on that exact behavior.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::model::{LessonId, LessonProgressRecord, Score, ServerProgressRecord};

/// Where a merged entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSource {
    Server,
    Local,
    Both,
}

impl ProgressSource {
    /// True when the backend has not seen this entry yet.
    #[must_use]
    pub fn is_local_only(self) -> bool {
        matches!(self, ProgressSource::Local)
    }
}

/// Display metadata carried over from the server row, when there is one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressMeta {
    pub server_id: Option<u64>,
    pub lesson_title: Option<String>,
    pub scene_title: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

/// Best-known progress for a single lesson.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedEntry {
    pub lesson_id: LessonId,
    pub score: Score,
    pub time_spent_secs: u64,
    pub source: ProgressSource,
    pub meta: ProgressMeta,
}

/// Reconciled progress: at most one entry per lesson.
///
/// Entries keep first-insertion order, so server rows come first in server
/// order, followed by local-only rows in ledger order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedProgress {
    entries: Vec<MergedEntry>,
    index: HashMap<LessonId, usize>,
}

impl MergedProgress {
    #[must_use]
    pub fn entries(&self) -> &[MergedEntry] {
        &self.entries
    }

    #[must_use]
    pub fn into_entries(self) -> Vec<MergedEntry> {
        self.entries
    }

    #[must_use]
    pub fn get(&self, lesson_id: LessonId) -> Option<&MergedEntry> {
        self.index.get(&lesson_id).map(|&i| &self.entries[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, lesson_id: LessonId) -> bool {
        self.index.contains_key(&lesson_id)
    }

    /// Score for a lesson, `0` when there is no progress yet.
    #[must_use]
    pub fn score_for(&self, lesson_id: LessonId) -> Score {
        self.get(lesson_id).map_or(Score::ZERO, |entry| entry.score)
    }

    fn upsert_server(&mut self, row: &ServerProgressRecord) {
        let entry = MergedEntry {
            lesson_id: row.lesson,
            score: row.score,
            time_spent_secs: row.time_spent,
            source: ProgressSource::Server,
            meta: ProgressMeta {
                server_id: row.id,
                lesson_title: row.lesson_title.clone(),
                scene_title: row.scene_title.clone(),
                completed_at: row.completed_at,
            },
        };
        // A repeated server row replaces the earlier one but keeps its position.
        match self.index.get(&row.lesson) {
            Some(&i) => self.entries[i] = entry,
            None => self.push(entry),
        }
    }

    fn upsert_local(&mut self, record: &LessonProgressRecord) {
        match self.index.get(&record.lesson_id) {
            Some(&i) => {
                let current = &mut self.entries[i];
                current.score = current.score.max(record.score);
                current.time_spent_secs = record.time_spent_secs;
                if current.source == ProgressSource::Server {
                    current.source = ProgressSource::Both;
                }
            }
            None => self.push(MergedEntry {
                lesson_id: record.lesson_id,
                score: record.score,
                time_spent_secs: record.time_spent_secs,
                source: ProgressSource::Local,
                meta: ProgressMeta::default(),
            }),
        }
    }

    fn push(&mut self, entry: MergedEntry) {
        self.index.insert(entry.lesson_id, self.entries.len());
        self.entries.push(entry);
    }
}

/// Merge server rows with local ledger records.
#[must_use]
pub fn merge(server: &[ServerProgressRecord], local: &[LessonProgressRecord]) -> MergedProgress {
    let mut merged = MergedProgress::default();
    for row in server {
        merged.upsert_server(row);
    }
    for record in local {
        merged.upsert_local(record);
    }
    merged
}
