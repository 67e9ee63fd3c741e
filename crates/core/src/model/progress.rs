use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::ids::LessonId;

//
// ─── SCORE ─────────────────────────────────────────────────────────────────────
//

/// Lesson score in percent. Always within `0..=100`.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    pub const ZERO: Score = Score(0);
    pub const MAX: Score = Score(100);

    /// Build a score, clamping anything outside `0..=100`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        // Clamp keeps the value in u8 range.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Self(value.clamp(0, 100) as u8)
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        self.0 >= 100
    }
}

impl From<i64> for Score {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score({})", self.0)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// Per-lesson completion fact as kept in the local ledger.
///
/// Serialized as `{lesson, score, time_spent}` so the persisted shape matches
/// what older clients wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonProgressRecord {
    #[serde(rename = "lesson")]
    pub lesson_id: LessonId,
    pub score: Score,
    #[serde(rename = "time_spent")]
    pub time_spent_secs: u64,
}

impl LessonProgressRecord {
    #[must_use]
    pub fn new(lesson_id: LessonId, score: Score, time_spent_secs: u64) -> Self {
        Self {
            lesson_id,
            score,
            time_spent_secs,
        }
    }
}

/// Progress row returned by `GET /api/progress/my_progress/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerProgressRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub lesson: LessonId,
    #[serde(default)]
    pub lesson_title: Option<String>,
    #[serde(default)]
    pub scene_title: Option<String>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub score: Score,
    #[serde(default)]
    pub time_spent: u64,
}

impl ServerProgressRecord {
    /// The merge-relevant part of the row.
    #[must_use]
    pub fn as_record(&self) -> LessonProgressRecord {
        LessonProgressRecord::new(self.lesson, self.score, self.time_spent)
    }
}

/// Insert or update a ledger entry in place.
///
/// An existing entry keeps the higher score and always takes the new time
/// spent, even when it is smaller. Unknown lessons are appended.
pub fn upsert_record(
    records: &mut Vec<LessonProgressRecord>,
    lesson_id: LessonId,
    score: Score,
    time_spent_secs: u64,
) {
    match records.iter_mut().find(|r| r.lesson_id == lesson_id) {
        Some(existing) => {
            existing.score = existing.score.max(score);
            existing.time_spent_secs = time_spent_secs;
        }
        None => records.push(LessonProgressRecord::new(lesson_id, score, time_spent_secs)),
    }
}
