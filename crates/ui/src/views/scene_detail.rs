use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use english_core::model::SceneId;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LessonRowVm, SceneDetailVm};

#[component]
pub fn SceneDetailView(scene_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let progress = ctx.progress();
    let mut page = use_signal(|| 1_usize);

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        let progress = progress.clone();
        async move {
            let scene = catalog.scene(SceneId::new(scene_id)).await?;
            let merged = progress.load_merged().await;
            Ok::<_, ViewError>(SceneDetailVm::from_scene(&scene, &merged))
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            Link { class: "back-link", to: Route::Scenes {}, "← All scenes" }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => {
                    // Out-of-range pages fall back to the first page.
                    let pager = vm.pager(page());
                    let rows = vm.lessons_on(&pager).to_vec();
                    let total_pages = pager.total_pages();
                    let current = pager.page();
                    rsx! {
                        h2 { "{vm.title}" }
                        div { class: "progress-bar",
                            div { class: "progress-fill", style: "width: {vm.progress.percent}%" }
                        }
                        p { class: "muted",
                            "{vm.progress.done}/{vm.progress.total} lessons completed · {vm.progress.percent}%"
                        }

                        if !vm.phrases.is_empty() {
                            section { class: "card",
                                h3 { "Key phrases" }
                                ul { class: "phrase-list",
                                    for phrase in vm.phrases.iter().cloned() {
                                        li { key: "{phrase.id}",
                                            p { class: "phrase-en", "{phrase.text_en}" }
                                            p { class: "phrase-ja", "{phrase.text_ja}" }
                                        }
                                    }
                                }
                            }
                        }

                        section { class: "card",
                            h3 { "Lessons" }
                            if rows.is_empty() {
                                p { "No lessons in this scene yet." }
                            } else {
                                ul { class: "lesson-list",
                                    for row in rows {
                                        LessonRow { key: "{row.id}", row }
                                    }
                                }
                            }
                            if pager.has_multiple_pages() {
                                div { class: "pager",
                                    button {
                                        disabled: current <= 1,
                                        onclick: move |_| page.set(current.saturating_sub(1).max(1)),
                                        "Previous"
                                    }
                                    span { "Page {current} of {total_pages}" }
                                    button {
                                        disabled: current >= total_pages,
                                        onclick: move |_| page.set((current + 1).min(total_pages)),
                                        "Next"
                                    }
                                }
                            }
                        }
                    }
                }
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn LessonRow(row: LessonRowVm) -> Element {
    let navigator = use_navigator();
    let lesson_id = row.id;
    rsx! {
        li { class: "lesson-row",
            div { class: "lesson-text",
                h4 { "{row.title}" }
                if !row.description.is_empty() {
                    p { class: "muted", "{row.description}" }
                }
            }
            div { class: "lesson-meta",
                if let Some(score) = row.score {
                    span { class: "score", "{score}%" }
                }
                if row.completed {
                    span { class: "badge badge-done", "Completed" }
                }
                button {
                    class: "primary",
                    onclick: move |_| {
                        navigator.push(Route::Lesson { lesson_id });
                    },
                    if row.score.is_some() { "Review" } else { "Start" }
                }
            }
        }
    }
}
