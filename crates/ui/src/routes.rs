use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::views::{LessonView, ProgressHistoryView, SceneDetailView, ScenesView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", ScenesView)] Scenes {},
        #[route("/scene/:scene_id", SceneDetailView)] SceneDetail { scene_id: u64 },
        #[route("/lesson/:lesson_id", LessonView)] Lesson { lesson_id: u64 },
        #[route("/progress", ProgressHistoryView)] Progress {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "Engineer English" }
                nav {
                    Link { to: Route::Scenes {}, "Scenes" }
                    Link { to: Route::Progress {}, "My progress" }
                }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
