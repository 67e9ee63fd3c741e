use dioxus::prelude::*;

use english_core::LessonCompletion;

use crate::vm::{DialogueLineVm, LessonVm, PhraseVm, format_duration};

#[component]
pub fn OverviewStep(vm: LessonVm) -> Element {
    rsx! {
        h3 { "Overview" }
        p { "Scene: {vm.scene_title}" }
        ul { class: "overview-stats",
            li { "{vm.phrases.len()} key phrases" }
            li { "{vm.dialogues.len()} dialogue lines" }
        }
        p { class: "muted", "Work through the phrases, then practise them in the dialogue." }
    }
}

#[component]
pub fn PhrasesStep(
    phrases: Vec<PhraseVm>,
    speaking: Option<String>,
    on_speak: EventHandler<(String, String)>,
    on_stop: EventHandler<()>,
) -> Element {
    rsx! {
        h3 { "Key phrases" }
        if phrases.is_empty() {
            p { class: "muted", "This lesson has no phrases." }
        }
        ul { class: "phrase-list",
            for phrase in phrases {
                li { key: "{phrase.id}",
                    p { class: "phrase-en", "{phrase.text_en}" }
                    p { class: "phrase-ja", "{phrase.text_ja}" }
                    if let Some(note) = phrase.note.clone() {
                        p { class: "phrase-note", "{note}" }
                    }
                    SpeakButton {
                        speech_key: format!("phrase-{}", phrase.id),
                        text: phrase.text_en.clone(),
                        speaking: speaking.clone(),
                        on_speak,
                        on_stop,
                    }
                }
            }
        }
    }
}

#[component]
pub fn DialogueStep(
    lines: Vec<DialogueLineVm>,
    speaking: Option<String>,
    on_speak: EventHandler<(String, String)>,
    on_stop: EventHandler<()>,
) -> Element {
    rsx! {
        h3 { "Dialogue" }
        if lines.is_empty() {
            p { class: "muted", "This lesson has no dialogue." }
        }
        ol { class: "dialogue",
            for line in lines {
                li { key: "{line.id}",
                    span { class: "speaker", "{line.speaker}" }
                    p { class: "line-en", "{line.line_en}" }
                    p { class: "line-ja", "{line.line_ja}" }
                    SpeakButton {
                        speech_key: format!("dialogue-{}", line.id),
                        text: line.line_en.clone(),
                        speaking: speaking.clone(),
                        on_speak,
                        on_stop,
                    }
                }
            }
        }
    }
}

#[component]
pub fn SummaryStep(vm: LessonVm, completion: Option<LessonCompletion>) -> Element {
    rsx! {
        h3 { "Summary" }
        if let Some(done) = completion {
            p { "Score: {done.score}" }
            p { "Time spent: {format_duration(done.time_spent_secs)}" }
        } else {
            p { "You reviewed {vm.phrases.len()} phrases and {vm.dialogues.len()} dialogue lines." }
            p { class: "muted", "Complete the lesson to record your progress." }
        }
    }
}

#[component]
fn SpeakButton(
    speech_key: String,
    text: String,
    speaking: Option<String>,
    on_speak: EventHandler<(String, String)>,
    on_stop: EventHandler<()>,
) -> Element {
    let active = speaking.as_deref() == Some(speech_key.as_str());
    rsx! {
        if active {
            button { class: "speak active", onclick: move |_| on_stop.call(()), "Stop" }
        } else {
            button {
                class: "speak",
                onclick: move |_| on_speak.call((speech_key.clone(), text.clone())),
                "Listen"
            }
        }
    }
}
