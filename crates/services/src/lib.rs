#![forbid(unsafe_code)]

pub mod api;
pub mod app_services;
pub mod catalog_service;
pub mod chat;
pub mod error;
pub mod lesson_service;
pub mod progress_service;

pub use english_core::Clock;

pub use api::{ApiConfig, CompletionRequest, HttpBackend, LearningBackend};
pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use chat::{ChatClient, ChatMessage, ChatRole, EchoChatClient};
pub use error::{ApiError, AppServicesError, CatalogError, LessonServiceError, SyncError};
pub use lesson_service::{LessonService, OpenedLesson};
pub use progress_service::{
    CompletionOutcome, HistoryEntry, ProgressHistory, ProgressService, SyncReport,
};
