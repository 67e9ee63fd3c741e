use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{HistoryRowVm, HistoryVm, map_history};

#[component]
pub fn ProgressHistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let sync_progress = ctx.progress();
    let mut syncing = use_signal(|| false);
    let mut sync_status = use_signal(|| None::<String>);

    let mut resource = use_resource(move || {
        let progress = progress.clone();
        async move {
            let history = progress.history().await;
            Ok::<_, ViewError>(map_history(&history))
        }
    });
    let state = view_state_from_resource(resource);

    let sync_now = move |_: Event<MouseData>| {
        if syncing() {
            return;
        }
        let progress = sync_progress.clone();
        syncing.set(true);
        spawn(async move {
            let status = match progress.sync_local_to_server().await {
                Ok(report) if report.uploaded == 0 => "Nothing to sync.".to_string(),
                Ok(report) => format!("Synced {} lesson(s).", report.uploaded),
                Err(err) => {
                    tracing::warn!(error = %err, "manual sync failed");
                    "Sync failed. Your progress is still saved on this device.".to_string()
                }
            };
            sync_status.set(Some(status));
            syncing.set(false);
            resource.restart();
        });
    };

    rsx! {
        div { class: "page",
            h2 { "Learning history" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    Totals { vm: vm.clone() }
                    if vm.rows.is_empty() {
                        p { "No completed lessons yet." }
                        Link { to: Route::Scenes {}, "Browse scenes" }
                    } else {
                        table { class: "history-table",
                            thead {
                                tr {
                                    th { "Lesson" }
                                    th { "Scene" }
                                    th { "Completed" }
                                    th { "Score" }
                                    th { "Time" }
                                }
                            }
                            tbody {
                                for row in vm.rows.iter().cloned() {
                                    HistoryRow { key: "{row.lesson_id}", row }
                                }
                            }
                        }
                    }
                    if vm.has_local_only() {
                        div { class: "sync-bar",
                            span { class: "muted", "Some progress is only saved on this device." }
                            button {
                                id: "sync-now",
                                disabled: syncing(),
                                onclick: sync_now,
                                if syncing() { "Syncing..." } else { "Sync now" }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }

            if let Some(status) = sync_status() {
                p { class: "notice", "{status}" }
            }
        }
    }
}

#[component]
fn Totals(vm: HistoryVm) -> Element {
    rsx! {
        section { class: "totals",
            div { class: "stat",
                span { class: "stat-value", "{vm.completed_lessons}" }
                span { class: "stat-label", "Lessons completed" }
            }
            div { class: "stat",
                span { class: "stat-value", "{vm.average_score}" }
                span { class: "stat-label", "Average score" }
            }
            div { class: "stat",
                span { class: "stat-value", "{vm.total_time_str}" }
                span { class: "stat-label", "Time spent" }
            }
        }
    }
}

#[component]
fn HistoryRow(row: HistoryRowVm) -> Element {
    rsx! {
        tr {
            td {
                Link { to: Route::Lesson { lesson_id: row.lesson_id }, "{row.lesson_title}" }
                if row.local_only {
                    span { class: "badge local", "Local" }
                }
            }
            td { "{row.scene_title}" }
            td { "{row.completed_at_str}" }
            td { "{row.score}" }
            td { "{row.time_str}" }
        }
    }
}
