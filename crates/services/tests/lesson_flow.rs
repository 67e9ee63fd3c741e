mod support;

use std::sync::Arc;

use chrono::Duration;
use english_core::model::{LessonId, Score};
use english_core::time::fixed_now;
use english_core::{Clock, LessonSession, LessonStep, SessionStepError};
use services::{AppServices, CatalogError, CompletionOutcome, EchoChatClient, LessonServiceError};
use storage::repository::{ProgressLedger, Storage};

use support::FakeBackend;

fn app(backend: FakeBackend, storage: &Storage) -> AppServices {
    AppServices::from_parts(
        Clock::fixed(fixed_now()),
        Arc::new(backend),
        storage,
        Arc::new(EchoChatClient::default()),
    )
}

#[tokio::test]
async fn opening_a_lesson_loads_its_scene() {
    let storage = Storage::in_memory();
    let services = app(FakeBackend::with_catalog(), &storage);

    let opened = services.lessons().open(LessonId::new(10)).await.unwrap();

    assert_eq!(opened.lesson.title, "Giving a status update");
    assert_eq!(opened.scene.title, "Daily stand-up");
    assert_eq!(opened.session.current_step(), LessonStep::Overview);
    assert_eq!(opened.session.started_at(), fixed_now());
}

#[tokio::test]
async fn unknown_lesson_is_not_found() {
    let storage = Storage::in_memory();
    let services = app(FakeBackend::with_catalog(), &storage);

    let err = services.lessons().open(LessonId::new(404)).await.unwrap_err();
    assert!(matches!(
        err,
        LessonServiceError::Catalog(CatalogError::NotFound { kind: "lesson", id: 404 })
    ));
}

#[tokio::test]
async fn full_walkthrough_saves_locally_when_offline() {
    let backend = FakeBackend::with_catalog();
    backend.reject_completions();
    let storage = Storage::in_memory();
    let services = app(backend, &storage);

    let mut session = LessonSession::start(LessonId::new(10), fixed_now() - Duration::seconds(90));
    session.next().unwrap();
    session.next().unwrap();
    session.next().unwrap();

    let (completion, outcome) = services.lessons().complete(&mut session).await.unwrap();

    assert_eq!(outcome, CompletionOutcome::SavedLocally);
    assert_eq!(completion.score, Score::MAX);
    assert_eq!(completion.time_spent_secs, 90);
    assert!(session.is_completed());

    let merged = services.progress().load_merged().await;
    assert_eq!(merged.score_for(LessonId::new(10)), Score::MAX);
}

#[tokio::test]
async fn completing_before_the_summary_is_rejected() {
    let storage = Storage::in_memory();
    let services = app(FakeBackend::with_catalog(), &storage);
    let mut session = services.lessons().start(LessonId::new(10));

    let err = services.lessons().complete(&mut session).await.unwrap_err();

    assert!(matches!(
        err,
        LessonServiceError::Step(SessionStepError::NotAtSummary)
    ));
    assert_eq!(session.current_step(), LessonStep::Overview);
    assert!(storage.ledger.read_all().await.is_empty());
}

#[tokio::test]
async fn scene_list_degrades_to_empty() {
    let backend = FakeBackend::with_catalog();
    backend.fail_reads();
    let storage = Storage::in_memory();
    let services = app(backend, &storage);

    assert!(services.catalog().list_scenes_or_empty().await.is_empty());
    assert!(services.catalog().list_scenes().await.is_err());
}
