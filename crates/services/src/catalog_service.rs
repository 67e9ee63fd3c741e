use std::sync::Arc;

use english_core::model::{Lesson, LessonId, Scene, SceneId};

use crate::api::LearningBackend;
use crate::error::{ApiError, CatalogError};

/// Read-only access to scenes and lessons.
#[derive(Clone)]
pub struct CatalogService {
    backend: Arc<dyn LearningBackend>,
}

impl CatalogService {
    #[must_use]
    pub fn new(backend: Arc<dyn LearningBackend>) -> Self {
        Self { backend }
    }

    /// All scenes.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Api` if the backend cannot be reached.
    pub async fn list_scenes(&self) -> Result<Vec<Scene>, CatalogError> {
        Ok(self.backend.list_scenes().await?)
    }

    /// All scenes, or an empty list when the backend is unavailable.
    pub async fn list_scenes_or_empty(&self) -> Vec<Scene> {
        match self.backend.list_scenes().await {
            Ok(scenes) => scenes,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load scenes, showing none");
                Vec::new()
            }
        }
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for unknown scenes and
    /// `CatalogError::Api` for other backend failures.
    pub async fn scene(&self, id: SceneId) -> Result<Scene, CatalogError> {
        self.backend
            .get_scene(id)
            .await
            .map_err(|err| not_found_or(err, "scene", id.value()))
    }

    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` for unknown lessons and
    /// `CatalogError::Api` for other backend failures.
    pub async fn lesson(&self, id: LessonId) -> Result<Lesson, CatalogError> {
        self.backend
            .get_lesson(id)
            .await
            .map_err(|err| not_found_or(err, "lesson", id.value()))
    }

    /// A lesson together with the scene it belongs to.
    ///
    /// # Errors
    ///
    /// Fails if either the lesson or its scene cannot be loaded.
    pub async fn lesson_with_scene(&self, id: LessonId) -> Result<(Lesson, Scene), CatalogError> {
        let lesson = self.lesson(id).await?;
        let scene = self.scene(lesson.scene).await?;
        Ok((lesson, scene))
    }
}

fn not_found_or(err: ApiError, kind: &'static str, id: u64) -> CatalogError {
    if err.is_not_found() {
        CatalogError::NotFound { kind, id }
    } else {
        CatalogError::Api(err)
    }
}
