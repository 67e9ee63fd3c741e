use english_core::model::{Lesson, Scene};
use english_core::{LessonSession, LessonStep, SessionStepError};

use crate::vm::scene_vm::PhraseVm;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DialogueLineVm {
    pub id: u64,
    pub speaker: String,
    pub line_en: String,
    pub line_ja: String,
}

/// Static lesson content.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub scene_id: u64,
    pub scene_title: String,
    pub phrases: Vec<PhraseVm>,
    pub dialogues: Vec<DialogueLineVm>,
}

impl LessonVm {
    #[must_use]
    pub fn new(lesson: &Lesson, scene: &Scene) -> Self {
        Self {
            id: lesson.id.value(),
            title: lesson.title.clone(),
            description: lesson.description.clone(),
            scene_id: scene.id.value(),
            scene_title: scene.title.clone(),
            phrases: lesson
                .phrases()
                .iter()
                .map(|phrase| PhraseVm {
                    id: phrase.id.value(),
                    text_en: phrase.text_en.clone(),
                    text_ja: phrase.text_ja.clone(),
                    note: phrase.note().map(ToString::to_string),
                })
                .collect(),
            dialogues: lesson
                .dialogues_in_order()
                .into_iter()
                .map(|line| DialogueLineVm {
                    id: line.id.value(),
                    speaker: line.speaker.clone(),
                    line_en: line.line_en.clone(),
                    line_ja: line.line_ja.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepperItemVm {
    pub step: LessonStep,
    pub number: usize,
    pub label: &'static str,
    pub active: bool,
    pub completed: bool,
}

#[must_use]
pub fn stepper(session: &LessonSession) -> Vec<StepperItemVm> {
    LessonStep::ALL
        .iter()
        .map(|&step| StepperItemVm {
            step,
            number: step.index() + 1,
            label: step.label(),
            active: !session.is_completed() && session.current_step() == step,
            completed: session.is_step_completed(step),
        })
        .collect()
}

/// Button and progress state under the step content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LessonControlsVm {
    pub can_back: bool,
    pub can_next: bool,
    pub can_complete: bool,
    pub progress_percent: u8,
}

impl LessonControlsVm {
    #[must_use]
    pub fn from_session(session: &LessonSession, saving: bool) -> Self {
        let open = !session.is_completed() && !saving;
        Self {
            can_back: open && session.can_go_back(),
            can_next: open && session.current_step() != LessonStep::Summary,
            can_complete: open && session.can_complete(),
            progress_percent: session.progress_percent(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LessonIntent {
    Next,
    Back,
}

/// Apply a navigation intent; an invalid one leaves the session unchanged.
///
/// # Errors
///
/// Returns `SessionStepError` for transitions the session rejects.
pub fn apply_intent(
    session: &mut LessonSession,
    intent: LessonIntent,
) -> Result<LessonStep, SessionStepError> {
    match intent {
        LessonIntent::Next => session.next(),
        LessonIntent::Back => session.back(),
    }
}
