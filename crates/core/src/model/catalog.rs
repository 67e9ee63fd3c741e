use serde::{Deserialize, Serialize};

use crate::model::ids::{DialogueId, LessonId, PhraseId, SceneId};

//
// ─── CONTENT ───────────────────────────────────────────────────────────────────
//

/// A single English phrase with its Japanese translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub id: PhraseId,
    pub text_en: String,
    pub text_ja: String,
    #[serde(default)]
    pub note: String,
}

impl Phrase {
    /// Returns the note when it carries any text.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        let note = self.note.trim();
        (!note.is_empty()).then_some(note)
    }
}

/// One line of a scripted dialogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialogue {
    pub id: DialogueId,
    pub speaker: String,
    pub line_en: String,
    pub line_ja: String,
    #[serde(default)]
    pub order: u32,
}

//
// ─── LESSONS ───────────────────────────────────────────────────────────────────
//

/// Lesson as embedded in a scene payload (no phrases or dialogues).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonSummary {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub scene: Option<SceneId>,
}

/// Full lesson payload returned by the lesson detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub scene: SceneId,
    #[serde(default, deserialize_with = "present_or_empty")]
    pub lesson_phrases: Vec<Phrase>,
    #[serde(default, deserialize_with = "present_or_empty")]
    pub lesson_dialogues: Vec<Dialogue>,
}

impl Lesson {
    #[must_use]
    pub fn phrases(&self) -> &[Phrase] {
        &self.lesson_phrases
    }

    /// Dialogue lines in display order.
    #[must_use]
    pub fn dialogues_in_order(&self) -> Vec<&Dialogue> {
        let mut lines: Vec<&Dialogue> = self.lesson_dialogues.iter().collect();
        lines.sort_by_key(|line| line.order);
        lines
    }
}

//
// ─── SCENES ────────────────────────────────────────────────────────────────────
//

/// Top-level grouping of phrases, dialogues and lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: SceneId,
    pub title: String,
    #[serde(default, deserialize_with = "present_or_empty")]
    pub phrases: Vec<Phrase>,
    #[serde(default, deserialize_with = "present_or_empty")]
    pub dialogues: Vec<Dialogue>,
    #[serde(default, deserialize_with = "present_or_empty")]
    pub lessons: Vec<LessonSummary>,
}

impl Scene {
    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }
}

/// Lesson and scene titles for one lesson id, used to label progress rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonTitles {
    pub lesson_title: String,
    pub scene_title: String,
}

/// Build a lesson id -> titles lookup from a scene catalog.
#[must_use]
pub fn lesson_title_index(
    scenes: &[Scene],
) -> std::collections::HashMap<LessonId, LessonTitles> {
    let mut index = std::collections::HashMap::new();
    for scene in scenes {
        for lesson in &scene.lessons {
            index.insert(
                lesson.id,
                LessonTitles {
                    lesson_title: lesson.title.clone(),
                    scene_title: scene.title.clone(),
                },
            );
        }
    }
    index
}

// `null` from the backend is treated the same as a missing array.
fn present_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
