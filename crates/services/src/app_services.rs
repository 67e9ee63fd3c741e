use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::api::{ApiConfig, HttpBackend, LearningBackend};
use crate::catalog_service::CatalogService;
use crate::chat::{ChatClient, EchoChatClient};
use crate::error::AppServicesError;
use crate::lesson_service::LessonService;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one backend and one ledger.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
    lessons: Arc<LessonService>,
    chat: Arc<dyn ChatClient>,
}

impl AppServices {
    /// Build services backed by the HTTP backend and a `SQLite` ledger.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        api: ApiConfig,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        tracing::debug!(base_url = %api.base_url(), "using learning backend");
        let backend: Arc<dyn LearningBackend> = Arc::new(HttpBackend::new(api));
        Ok(Self::from_parts(
            clock,
            backend,
            &storage,
            Arc::new(EchoChatClient::default()),
        ))
    }

    /// Wire services from already built collaborators.
    #[must_use]
    pub fn from_parts(
        clock: Clock,
        backend: Arc<dyn LearningBackend>,
        storage: &Storage,
        chat: Arc<dyn ChatClient>,
    ) -> Self {
        let catalog = Arc::new(CatalogService::new(Arc::clone(&backend)));
        let progress = Arc::new(ProgressService::new(
            clock,
            backend,
            Arc::clone(&storage.ledger),
        ));
        let lessons = Arc::new(LessonService::new(
            clock,
            Arc::clone(&catalog),
            Arc::clone(&progress),
        ));
        Self {
            catalog,
            progress,
            lessons,
            chat,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn chat(&self) -> Arc<dyn ChatClient> {
        Arc::clone(&self.chat)
    }
}
