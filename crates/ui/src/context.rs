use std::sync::Arc;

use services::{CatalogService, ChatClient, LessonService, ProgressService};

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<CatalogService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn lessons(&self) -> Arc<LessonService>;
    fn chat(&self) -> Arc<dyn ChatClient>;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
    lessons: Arc<LessonService>,
    chat: Arc<dyn ChatClient>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            progress: app.progress(),
            lessons: app.lessons(),
            chat: app.chat(),
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

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
