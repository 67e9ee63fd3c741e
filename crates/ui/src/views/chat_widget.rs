use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::ChatVm;

/// Floating practice chat available on every page.
#[component]
pub fn ChatWidget() -> Element {
    let ctx = use_context::<AppContext>();
    let chat = ctx.chat();
    let mut open = use_signal(|| false);
    let mut vm = use_signal(ChatVm::default);

    let mut send = move || {
        let Some(history) = vm.write().begin_send() else {
            return;
        };
        let chat = chat.clone();
        spawn(async move {
            let reply = chat.send(&history).await.map_err(|err| {
                tracing::warn!(error = %err, "chat reply failed");
                err.to_string()
            });
            vm.write().finish_send(reply);
        });
    };

    let state = vm();

    rsx! {
        div { class: "chat-widget",
            if open() {
                div { class: "chat-panel",
                    div { class: "chat-header",
                        span { "Practice chat" }
                        button { class: "chat-close", onclick: move |_| open.set(false), "×" }
                    }
                    ul { class: "chat-messages",
                        for message in state.messages {
                            li { key: "{message.id}", class: "chat-message {message.role}",
                                "{message.content}"
                            }
                        }
                        if state.busy {
                            li { class: "chat-message pending", "..." }
                        }
                    }
                    form {
                        class: "chat-input",
                        onsubmit: move |evt| {
                            evt.prevent_default();
                            send();
                        },
                        input {
                            value: "{state.input}",
                            placeholder: "Type a message",
                            disabled: state.busy,
                            oninput: move |evt| vm.write().input = evt.value(),
                        }
                        button { r#type: "submit", disabled: state.busy, "Send" }
                    }
                }
            } else {
                button { class: "chat-toggle", onclick: move |_| open.set(true), "Chat" }
            }
        }
    }
}
