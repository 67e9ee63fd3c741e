use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{SceneCardVm, map_scene_cards};

#[component]
pub fn ScenesView() -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let progress = ctx.progress();

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        let progress = progress.clone();
        async move {
            // A failed scene request shows an empty list rather than an error.
            let scenes = catalog.list_scenes_or_empty().await;
            let merged = progress.load_merged().await;
            Ok::<_, ViewError>(map_scene_cards(&scenes, &merged))
        }
    });
    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "page",
            h2 { "Scenes" }
            p { class: "muted", "Pick a workplace scene to practise." }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(cards) => rsx! {
                    if cards.is_empty() {
                        p { "No scenes yet." }
                    } else {
                        ul { class: "scene-grid",
                            for card in cards {
                                SceneCard { key: "{card.id}", card }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn SceneCard(card: SceneCardVm) -> Element {
    let label = card.progress_label();
    rsx! {
        li { class: "scene-card",
            Link { class: "scene-link", to: Route::SceneDetail { scene_id: card.id },
                h3 { "{card.title}" }
            }
            div { class: "progress-bar",
                div { class: "progress-fill", style: "width: {card.percent}%" }
            }
            p { class: "muted", "{label}" }
        }
    }
}
