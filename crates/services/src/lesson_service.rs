use std::sync::Arc;

use english_core::model::{Lesson, LessonId, Scene};
use english_core::{Clock, LessonCompletion, LessonSession};

use crate::catalog_service::CatalogService;
use crate::error::LessonServiceError;
use crate::progress_service::{CompletionOutcome, ProgressService};

/// A lesson ready to be studied.
#[derive(Debug, Clone)]
pub struct OpenedLesson {
    pub lesson: Lesson,
    pub scene: Scene,
    pub session: LessonSession,
}

/// Drives a lesson session from opening to completion.
#[derive(Clone)]
pub struct LessonService {
    clock: Clock,
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
}

impl LessonService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Arc<CatalogService>, progress: Arc<ProgressService>) -> Self {
        Self {
            clock,
            catalog,
            progress,
        }
    }

    /// Start timing a session now.
    #[must_use]
    pub fn start(&self, lesson_id: LessonId) -> LessonSession {
        LessonSession::start(lesson_id, self.clock.now())
    }

    /// Load the lesson and its scene, then start a session.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Catalog` if either fetch fails.
    pub async fn open(&self, lesson_id: LessonId) -> Result<OpenedLesson, LessonServiceError> {
        let (lesson, scene) = self.catalog.lesson_with_scene(lesson_id).await?;
        Ok(OpenedLesson {
            session: self.start(lesson.id),
            lesson,
            scene,
        })
    }

    /// Finish the session and report the result.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::Step` when the session is not on its
    /// summary step. Reporting itself never fails.
    pub async fn complete(
        &self,
        session: &mut LessonSession,
    ) -> Result<(LessonCompletion, CompletionOutcome), LessonServiceError> {
        let completion = session.complete(self.clock.now())?;
        let outcome = self.progress.record_completion(&completion).await;
        Ok((completion, outcome))
    }
}
