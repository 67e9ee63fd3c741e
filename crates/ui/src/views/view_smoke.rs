use english_core::model::{LessonId, Score};
use storage::repository::{ProgressLedger, Storage};

use super::test_harness::{
    StaticBackend, ViewKind, sample_backend, setup_view_harness, setup_view_harness_with_storage,
};

async fn storage_with_completion(lesson: u64, score: i64, time_spent_secs: u64) -> Storage {
    let storage = Storage::in_memory();
    storage
        .ledger
        .upsert(LessonId::new(lesson), Score::clamped(score), time_spent_secs)
        .await
        .expect("seed ledger");
    storage
}

#[tokio::test(flavor = "current_thread")]
async fn scenes_view_smoke_renders_progress_per_scene() {
    let storage = storage_with_completion(101, 100, 60).await;
    let mut harness = setup_view_harness_with_storage(ViewKind::Scenes, sample_backend(), storage);

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Daily stand-up"), "missing scene in {html}");
    assert!(html.contains("lessons · 14%"), "missing progress in {html}");
    assert!(html.contains("lessons · 0%"), "missing empty scene in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn scenes_view_smoke_offline_shows_empty_list() {
    let mut harness = setup_view_harness(ViewKind::Scenes, StaticBackend::offline());

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No scenes yet."), "missing empty state in {html}");
    assert!(!html.contains("class=\"error\""), "unexpected error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn scene_detail_smoke_pages_lessons() {
    let mut harness = setup_view_harness(ViewKind::SceneDetail(1), sample_backend());

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Page 1 of 2"), "missing pager in {html}");
    assert!(html.contains("Lesson 5"), "missing first page row in {html}");
    assert!(!html.contains("Lesson 6"), "second page leaked into {html}");
    assert!(html.contains("Key phrases"), "missing phrases in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn scene_detail_smoke_marks_completed_lessons() {
    let storage = storage_with_completion(101, 100, 60).await;
    let mut harness =
        setup_view_harness_with_storage(ViewKind::SceneDetail(1), sample_backend(), storage);

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Completed"), "missing badge in {html}");
    assert!(html.contains("Review"), "missing review button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn scene_detail_smoke_unknown_scene_shows_error() {
    let mut harness = setup_view_harness(ViewKind::SceneDetail(99), sample_backend());

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("find that page"), "missing not found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_starts_on_overview() {
    let mut harness = setup_view_harness(ViewKind::Lesson(101), sample_backend());

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Give a short status update."), "missing description in {html}");
    assert!(html.contains("Back to Daily stand-up"), "missing back link in {html}");
    assert!(html.contains("Progress: 0%"), "missing progress in {html}");
    assert!(html.contains("1 key phrases"), "missing overview in {html}");
    assert!(html.contains("lesson-next"), "missing next button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn lesson_view_smoke_unknown_lesson_shows_error() {
    let mut harness = setup_view_harness(ViewKind::Lesson(555), sample_backend());

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("find that page"), "missing not found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_renders_local_rows() {
    let storage = storage_with_completion(101, 75, 125).await;
    let mut harness = setup_view_harness_with_storage(ViewKind::Progress, sample_backend(), storage);

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Lesson 1"), "missing lesson title in {html}");
    assert!(html.contains("Daily stand-up"), "missing scene title in {html}");
    assert!(html.contains("2m 5s"), "missing duration in {html}");
    assert!(html.contains("Sync now"), "missing sync button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn progress_view_smoke_empty_history() {
    let mut harness = setup_view_harness(ViewKind::Progress, StaticBackend::offline());

    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No completed lessons yet."), "missing empty state in {html}");
    assert!(!html.contains("Sync now"), "unexpected sync button in {html}");
}
