use services::{HistoryEntry, ProgressHistory};

use crate::vm::time_fmt::{format_datetime, format_duration};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRowVm {
    pub lesson_id: u64,
    pub lesson_title: String,
    pub scene_title: String,
    pub completed_at_str: String,
    pub score: u8,
    pub time_str: String,
    pub local_only: bool,
}

impl From<&HistoryEntry> for HistoryRowVm {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            lesson_id: entry.lesson_id.value(),
            lesson_title: entry.lesson_title.clone(),
            scene_title: entry.scene_title.clone(),
            completed_at_str: format_datetime(entry.completed_at),
            score: entry.score.value(),
            time_str: format_duration(entry.time_spent_secs),
            local_only: entry.source.is_local_only(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryVm {
    pub completed_lessons: usize,
    pub average_score: u32,
    pub total_time_str: String,
    pub rows: Vec<HistoryRowVm>,
}

impl HistoryVm {
    #[must_use]
    pub fn has_local_only(&self) -> bool {
        self.rows.iter().any(|row| row.local_only)
    }
}

#[must_use]
pub fn map_history(history: &ProgressHistory) -> HistoryVm {
    HistoryVm {
        completed_lessons: history.totals.completed_lessons,
        average_score: history.totals.average_score,
        total_time_str: format_duration(history.totals.total_time_secs),
        rows: history.entries.iter().map(HistoryRowVm::from).collect(),
    }
}
