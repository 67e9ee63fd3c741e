#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use english_core::model::{Lesson, LessonId, Scene, SceneId, ServerProgressRecord};
use reqwest::StatusCode;
use services::{ApiError, CompletionRequest, LearningBackend};

/// In-process backend with switchable failures.
#[derive(Default)]
pub struct FakeBackend {
    pub scenes: Vec<Scene>,
    pub lessons: Vec<Lesson>,
    pub progress: Vec<ServerProgressRecord>,
    pub reads_fail: AtomicBool,
    /// Number of completions accepted before every further one is rejected.
    pub accept_completions: Mutex<Option<usize>>,
    pub posted: Mutex<Vec<CompletionRequest>>,
}

impl FakeBackend {
    pub fn with_catalog() -> Self {
        let scenes: Vec<Scene> = serde_json::from_str(
            r#"[
                {"id": 1, "title": "Daily stand-up", "lessons": [
                    {"id": 10, "title": "Giving a status update"},
                    {"id": 11, "title": "Raising a blocker"}
                ]},
                {"id": 2, "title": "Code review", "lessons": [
                    {"id": 20, "title": "Asking for changes"}
                ]}
            ]"#,
        )
        .unwrap();
        let lessons: Vec<Lesson> = serde_json::from_str(
            r#"[{
                "id": 10,
                "title": "Giving a status update",
                "description": "Report progress clearly.",
                "scene": 1,
                "lesson_phrases": [
                    {"id": 100, "text_en": "I'm on track.", "text_ja": "順調です。"}
                ],
                "lesson_dialogues": [
                    {"id": 200, "speaker": "Lead", "line_en": "Any blockers?", "line_ja": "ブロッカーは？", "order": 1}
                ]
            }]"#,
        )
        .unwrap();
        Self {
            scenes,
            lessons,
            ..Self::default()
        }
    }

    pub fn fail_reads(&self) {
        self.reads_fail.store(true, Ordering::SeqCst);
    }

    pub fn reject_completions(&self) {
        self.accept_after(0);
    }

    pub fn accept_after(&self, accepted: usize) {
        *self.accept_completions.lock().unwrap() = Some(accepted);
    }

    pub fn posted(&self) -> Vec<CompletionRequest> {
        self.posted.lock().unwrap().clone()
    }

    fn check_reads(&self) -> Result<(), ApiError> {
        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(ApiError::HttpStatus(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(())
    }
}

#[async_trait]
impl LearningBackend for FakeBackend {
    async fn list_scenes(&self) -> Result<Vec<Scene>, ApiError> {
        self.check_reads()?;
        Ok(self.scenes.clone())
    }

    async fn get_scene(&self, id: SceneId) -> Result<Scene, ApiError> {
        self.check_reads()?;
        self.scenes
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(ApiError::HttpStatus(StatusCode::NOT_FOUND))
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Lesson, ApiError> {
        self.check_reads()?;
        self.lessons
            .iter()
            .find(|l| l.id == id)
            .cloned()
            .ok_or(ApiError::HttpStatus(StatusCode::NOT_FOUND))
    }

    async fn my_progress(&self) -> Result<Vec<ServerProgressRecord>, ApiError> {
        self.check_reads()?;
        Ok(self.progress.clone())
    }

    async fn complete_lesson(&self, request: &CompletionRequest) -> Result<(), ApiError> {
        let mut posted = self.posted.lock().unwrap();
        if let Some(limit) = *self.accept_completions.lock().unwrap() {
            if posted.len() >= limit {
                return Err(ApiError::HttpStatus(StatusCode::INTERNAL_SERVER_ERROR));
            }
        }
        posted.push(*request);
        Ok(())
    }
}
