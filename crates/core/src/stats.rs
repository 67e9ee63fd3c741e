//! Derived numbers shown next to scenes and in the progress history.

use crate::model::{LessonId, Scene};
use crate::reconcile::{MergedEntry, MergedProgress};

/// `round(100 * part / whole)`, rounding halves up. `0` when `whole` is `0`.
#[must_use]
pub fn round_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    let part = part as u128;
    let whole = whole as u128;
    let rounded = (200 * part + whole) / (2 * whole);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Completion of the lessons in one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneProgress {
    pub done: usize,
    pub total: usize,
    pub percent: u32,
}

impl SceneProgress {
    #[must_use]
    pub fn from_counts(done: usize, total: usize) -> Self {
        Self {
            done,
            total,
            percent: round_percent(done, total),
        }
    }
}

/// Count scene lessons that have any merged progress.
#[must_use]
pub fn scene_progress(scene: &Scene, progress: &MergedProgress) -> SceneProgress {
    let done = scene
        .lessons
        .iter()
        .filter(|lesson| progress.contains(lesson.id))
        .count();
    SceneProgress::from_counts(done, scene.lessons.len())
}

/// Aggregates shown on top of the progress history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryTotals {
    pub completed_lessons: usize,
    pub average_score: u32,
    pub total_time_secs: u64,
}

#[must_use]
pub fn history_totals(entries: &[MergedEntry]) -> HistoryTotals {
    if entries.is_empty() {
        return HistoryTotals::default();
    }
    let score_sum: usize = entries
        .iter()
        .map(|entry| usize::from(entry.score.value().min(100)))
        .sum();
    HistoryTotals {
        completed_lessons: entries.len(),
        average_score: round_ratio(score_sum, entries.len()).min(100),
        total_time_secs: entries
            .iter()
            .map(|entry| entry.time_spent_secs)
            .fold(0_u64, u64::saturating_add),
    }
}

/// Lessons of `scene` that already show full marks.
#[must_use]
pub fn fully_completed_lessons(scene: &Scene, progress: &MergedProgress) -> Vec<LessonId> {
    scene
        .lessons
        .iter()
        .filter(|lesson| progress.score_for(lesson.id).is_full())
        .map(|lesson| lesson.id)
        .collect()
}

fn round_ratio(sum: usize, count: usize) -> u32 {
    if count == 0 {
        return 0;
    }
    let sum = sum as u128;
    let count = count as u128;
    u32::try_from((2 * sum + count) / (2 * count)).unwrap_or(u32::MAX)
}
