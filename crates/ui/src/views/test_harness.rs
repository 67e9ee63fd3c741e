use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use english_core::model::{Lesson, LessonId, Scene, SceneId, ServerProgressRecord};
use english_core::time::fixed_now;
use reqwest::StatusCode;
use services::{
    ApiError, AppServices, CatalogService, ChatClient, Clock, CompletionRequest, EchoChatClient,
    LearningBackend, LessonService, ProgressService,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::{LessonView, ProgressHistoryView, SceneDetailView, ScenesView};

/// Catalog served from memory; unknown ids answer 404.
#[derive(Default)]
pub struct StaticBackend {
    scenes: Vec<Scene>,
    lessons: Vec<Lesson>,
    offline: bool,
}

impl StaticBackend {
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    fn reachable(&self) -> Result<(), ApiError> {
        if self.offline {
            return Err(ApiError::HttpStatus(StatusCode::SERVICE_UNAVAILABLE));
        }
        Ok(())
    }
}

pub fn sample_backend() -> StaticBackend {
    let lessons = (1..=7)
        .map(|n| format!(r#"{{"id": {}, "title": "Lesson {n}"}}"#, 100 + n))
        .collect::<Vec<_>>()
        .join(",");
    let scenes = format!(
        r#"[
            {{"id": 1, "title": "Daily stand-up",
              "phrases": [{{"id": 5, "text_en": "I'm blocked on review.", "text_ja": "レビュー待ちです。"}}],
              "lessons": [{lessons}]}},
            {{"id": 2, "title": "Incident call", "lessons": []}}
        ]"#
    );
    let scenes: Vec<Scene> = serde_json::from_str(&scenes).unwrap();
    let lessons: Vec<Lesson> = serde_json::from_str(
        r#"[{
            "id": 101,
            "title": "Lesson 1",
            "description": "Give a short status update.",
            "scene": 1,
            "lesson_phrases": [
                {"id": 7, "text_en": "Yesterday I finished the migration.", "text_ja": "昨日移行を終えました。"}
            ],
            "lesson_dialogues": [
                {"id": 9, "speaker": "Lead", "line_en": "How is it going?", "line_ja": "進捗は？", "order": 1}
            ]
        }]"#,
    )
    .unwrap();
    StaticBackend {
        scenes,
        lessons,
        offline: false,
    }
}

#[async_trait]
impl LearningBackend for StaticBackend {
    async fn list_scenes(&self) -> Result<Vec<Scene>, ApiError> {
        self.reachable()?;
        Ok(self.scenes.clone())
    }

    async fn get_scene(&self, id: SceneId) -> Result<Scene, ApiError> {
        self.reachable()?;
        self.scenes
            .iter()
            .find(|scene| scene.id == id)
            .cloned()
            .ok_or(ApiError::HttpStatus(StatusCode::NOT_FOUND))
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Lesson, ApiError> {
        self.reachable()?;
        self.lessons
            .iter()
            .find(|lesson| lesson.id == id)
            .cloned()
            .ok_or(ApiError::HttpStatus(StatusCode::NOT_FOUND))
    }

    async fn my_progress(&self) -> Result<Vec<ServerProgressRecord>, ApiError> {
        self.reachable()?;
        Ok(Vec::new())
    }

    async fn complete_lesson(&self, _request: &CompletionRequest) -> Result<(), ApiError> {
        Err(ApiError::HttpStatus(StatusCode::SERVICE_UNAVAILABLE))
    }
}

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<CatalogService> {
        self.services.catalog()
    }

    fn progress(&self) -> Arc<ProgressService> {
        self.services.progress()
    }

    fn lessons(&self) -> Arc<LessonService> {
        self.services.lessons()
    }

    fn chat(&self) -> Arc<dyn ChatClient> {
        self.services.chat()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Scenes,
    SceneDetail(u64),
    Lesson(u64),
    Progress,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Scenes => rsx! { ScenesView {} },
        ViewKind::SceneDetail(scene_id) => rsx! { SceneDetailView { scene_id } },
        ViewKind::Lesson(lesson_id) => rsx! { LessonView { lesson_id } },
        ViewKind::Progress => rsx! { ProgressHistoryView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        for _ in 0..4 {
            let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, backend: StaticBackend) -> ViewHarness {
    setup_view_harness_with_storage(view, backend, Storage::in_memory())
}

pub fn setup_view_harness_with_storage(
    view: ViewKind,
    backend: StaticBackend,
    storage: Storage,
) -> ViewHarness {
    let backend: Arc<dyn LearningBackend> = Arc::new(backend);
    let services = AppServices::from_parts(
        Clock::fixed(fixed_now()),
        backend,
        &storage,
        Arc::new(EchoChatClient::new(Duration::ZERO)),
    );
    let app = Arc::new(TestApp { services });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom, storage }
}
