mod catalog;
mod ids;
mod progress;

pub use catalog::{
    Dialogue, Lesson, LessonSummary, LessonTitles, Phrase, Scene, lesson_title_index,
};
pub use ids::{DialogueId, LessonId, ParseIdError, PhraseId, SceneId};
pub use progress::{LessonProgressRecord, Score, ServerProgressRecord, upsert_record};
