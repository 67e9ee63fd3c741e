use std::time::Duration;

use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use english_core::{LessonSession, LessonStep};
use english_core::model::LessonId;
use services::CompletionOutcome;

use super::scripts::{CANCEL_SPEECH_SCRIPT, speak_script};
use super::steps::{DialogueStep, OverviewStep, PhrasesStep, SummaryStep};
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{LessonControlsVm, LessonIntent, LessonVm, StepperItemVm, apply_intent, stepper};

/// Pause between a successful completion and the jump to the history.
const REDIRECT_DELAY: Duration = Duration::from_millis(1200);

#[derive(Clone, Debug, PartialEq)]
struct LessonData {
    vm: LessonVm,
    session: LessonSession,
}

#[component]
pub fn LessonView(lesson_id: u64) -> Element {
    let ctx = use_context::<AppContext>();
    let lessons = ctx.lessons();

    let resource = use_resource(move || {
        let lessons = lessons.clone();
        async move {
            let opened = lessons.open(LessonId::new(lesson_id)).await?;
            Ok::<_, ViewError>(LessonData {
                vm: LessonVm::new(&opened.lesson, &opened.scene),
                session: opened.session,
            })
        }
    });
    let state = view_state_from_resource(resource);

    use_drop(|| {
        let _ = eval(CANCEL_SPEECH_SCRIPT);
    });

    rsx! {
        div { class: "page",
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(data) => rsx! {
                    LessonBody { vm: data.vm, session: data.session }
                },
                ViewState::Error(err) => rsx! {
                    Link { class: "back-link", to: Route::Scenes {}, "← All scenes" }
                    p { class: "error", "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn LessonBody(vm: LessonVm, session: LessonSession) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let lessons = ctx.lessons();

    let mut session = use_signal(move || session);
    let mut saving = use_signal(|| false);
    let mut outcome = use_signal(|| None::<CompletionOutcome>);
    let mut speaking = use_signal(|| None::<String>);

    let dispatch = use_callback(move |intent: LessonIntent| {
        let mut next = session();
        if let Err(err) = apply_intent(&mut next, intent) {
            tracing::debug!(?intent, error = %err, "ignored lesson step");
            return;
        }
        session.set(next);
    });

    let complete = use_callback(move |()| {
        if saving() {
            return;
        }
        let lessons = lessons.clone();
        saving.set(true);
        spawn(async move {
            let mut current = session();
            match lessons.complete(&mut current).await {
                Ok((completion, result)) => {
                    tracing::info!(
                        lesson_id = %completion.lesson_id,
                        score = completion.score.value(),
                        ?result,
                        "lesson completed"
                    );
                    session.set(current);
                    outcome.set(Some(result));
                    saving.set(false);
                    tokio::time::sleep(REDIRECT_DELAY).await;
                    navigator.push(Route::Progress {});
                }
                Err(err) => {
                    tracing::warn!(error = %err, "lesson completion rejected");
                    saving.set(false);
                }
            }
        });
    });

    let speak = use_callback(move |(key, text): (String, String)| {
        speaking.set(Some(key.clone()));
        let mut playback = eval(&speak_script(&text, &key));
        spawn(async move {
            let finished = playback.recv::<String>().await.ok();
            if finished.is_none() || speaking.peek().as_deref() == finished.as_deref() {
                speaking.set(None);
            }
        });
    });

    let stop = use_callback(move |()| {
        let _ = eval(CANCEL_SPEECH_SCRIPT);
        speaking.set(None);
    });

    let current = session();
    let controls = LessonControlsVm::from_session(&current, saving());
    let steps = stepper(&current);
    let step = current.current_step();
    let completion = current.completion().copied();
    let speaking_key = speaking();
    let notice = outcome().map(|result| match result {
        CompletionOutcome::Synced => "Lesson completed! Your progress was saved.",
        CompletionOutcome::SavedLocally => {
            "Lesson completed! Progress saved on this device and will sync later."
        }
    });

    rsx! {
        Link { class: "back-link", to: Route::SceneDetail { scene_id: vm.scene_id }, "← Back to {vm.scene_title}" }

        section { class: "lesson-header",
            h2 { "{vm.title}" }
            if !vm.description.is_empty() {
                p { class: "muted", "{vm.description}" }
            }
        }

        div { class: "lesson-progress",
            span { class: "muted", "Progress: {controls.progress_percent}%" }
            div { class: "progress-bar",
                div { class: "progress-fill", style: "width: {controls.progress_percent}%" }
            }
        }

        ol { class: "stepper",
            for item in steps {
                li {
                    key: "{item.number}",
                    class: step_class(&item),
                    span { class: "step-number", "{item.number}" }
                    span { class: "step-label", "{item.label}" }
                }
            }
        }

        section { class: "card step-body",
            match step {
                LessonStep::Overview => rsx! {
                    OverviewStep { vm: vm.clone() }
                },
                LessonStep::Phrases => rsx! {
                    PhrasesStep {
                        phrases: vm.phrases.clone(),
                        speaking: speaking_key.clone(),
                        on_speak: speak,
                        on_stop: stop,
                    }
                },
                LessonStep::Dialogue => rsx! {
                    DialogueStep {
                        lines: vm.dialogues.clone(),
                        speaking: speaking_key.clone(),
                        on_speak: speak,
                        on_stop: stop,
                    }
                },
                LessonStep::Summary => rsx! {
                    SummaryStep { vm: vm.clone(), completion }
                },
            }
        }

        div { class: "lesson-controls",
            button {
                id: "lesson-back",
                disabled: !controls.can_back,
                onclick: move |_| dispatch.call(LessonIntent::Back),
                "Back"
            }
            if controls.can_next {
                button {
                    id: "lesson-next",
                    class: "primary",
                    onclick: move |_| dispatch.call(LessonIntent::Next),
                    "Next"
                }
            } else if !current.is_completed() {
                button {
                    id: "lesson-complete",
                    class: "primary",
                    disabled: !controls.can_complete,
                    onclick: move |_| complete.call(()),
                    if saving() { "Saving..." } else { "Complete lesson" }
                }
            }
        }

        if let Some(text) = notice {
            div { class: "notice", "{text}" }
        }
    }
}

fn step_class(item: &StepperItemVm) -> &'static str {
    if item.active {
        "step active"
    } else if item.completed {
        "step done"
    } else {
        "step"
    }
}
