use english_core::model::{LessonSummary, Scene};
use english_core::stats::{SceneProgress, scene_progress};
use english_core::{MergedProgress, Pager};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneCardVm {
    pub id: u64,
    pub title: String,
    pub lesson_count: usize,
    pub done: usize,
    pub percent: u32,
}

impl SceneCardVm {
    #[must_use]
    pub fn from_scene(scene: &Scene, progress: &MergedProgress) -> Self {
        let SceneProgress {
            done,
            total,
            percent,
        } = scene_progress(scene, progress);
        Self {
            id: scene.id.value(),
            title: scene.title.clone(),
            lesson_count: total,
            done,
            percent,
        }
    }

    #[must_use]
    pub fn progress_label(&self) -> String {
        format!("{}/{} lessons · {}%", self.done, self.lesson_count, self.percent)
    }
}

#[must_use]
pub fn map_scene_cards(scenes: &[Scene], progress: &MergedProgress) -> Vec<SceneCardVm> {
    scenes
        .iter()
        .map(|scene| SceneCardVm::from_scene(scene, progress))
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonRowVm {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub score: Option<u8>,
    pub completed: bool,
}

impl LessonRowVm {
    fn from_summary(lesson: &LessonSummary, progress: &MergedProgress) -> Self {
        let score = progress.get(lesson.id).map(|entry| entry.score);
        Self {
            id: lesson.id.value(),
            title: lesson.title.clone(),
            description: lesson.description.clone(),
            score: score.map(|s| s.value()),
            completed: score.is_some_and(|s| s.is_full()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhraseVm {
    pub id: u64,
    pub text_en: String,
    pub text_ja: String,
    pub note: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SceneDetailVm {
    pub id: u64,
    pub title: String,
    pub progress: SceneProgress,
    pub phrases: Vec<PhraseVm>,
    pub lessons: Vec<LessonRowVm>,
}

impl SceneDetailVm {
    #[must_use]
    pub fn from_scene(scene: &Scene, progress: &MergedProgress) -> Self {
        Self {
            id: scene.id.value(),
            title: scene.title.clone(),
            progress: scene_progress(scene, progress),
            phrases: scene
                .phrases
                .iter()
                .map(|phrase| PhraseVm {
                    id: phrase.id.value(),
                    text_en: phrase.text_en.clone(),
                    text_ja: phrase.text_ja.clone(),
                    note: phrase.note().map(ToString::to_string),
                })
                .collect(),
            lessons: scene
                .lessons
                .iter()
                .map(|lesson| LessonRowVm::from_summary(lesson, progress))
                .collect(),
        }
    }

    /// Pager over the lesson list positioned on `page`.
    #[must_use]
    pub fn pager(&self, page: usize) -> Pager {
        Pager::for_lessons(self.lessons.len()).with_page(page)
    }

    #[must_use]
    pub fn lessons_on(&self, pager: &Pager) -> &[LessonRowVm] {
        pager.slice(&self.lessons)
    }
}
