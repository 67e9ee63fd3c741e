//! Webview speech synthesis.

pub(super) const CANCEL_SPEECH_SCRIPT: &str = r"(function() {
    try { if (window.speechSynthesis) window.speechSynthesis.cancel(); } catch (e) {}
})();";

pub(super) const SPEECH_RATE: f32 = 1.5;

/// Speak `text` with the most natural English voice available.
///
/// Any utterance already playing is cancelled first. When playback ends the
/// script sends `key` back through the eval channel.
pub(super) fn speak_script(text: &str, key: &str) -> String {
    let text = js_string(text);
    let key = js_string(key);
    format!(
        r#"(function() {{
                    const synth = window.speechSynthesis;
                    if (!synth) {{
                        dioxus.send({key});
                        return;
                    }}
                    synth.cancel();
                    const voices = synth.getVoices() || [];
                    const byName = (kw) => voices.find((v) => (v.name || "").toLowerCase().includes(kw));
                    const byLang = (pref) => voices.find((v) => (v.lang || "").toLowerCase().startsWith(pref));
                    const voice = byName("natural") || byName("neural") || byName("online")
                        || byLang("en-us") || byLang("en-gb") || byLang("en");
                    const u = new SpeechSynthesisUtterance({text});
                    if (voice) u.voice = voice;
                    u.lang = (voice && voice.lang) || "en-US";
                    u.rate = {rate};
                    u.pitch = 1.0;
                    const done = () => dioxus.send({key});
                    u.onend = done;
                    u.onerror = done;
                    synth.speak(u);
                }})();"#,
        text = text,
        key = key,
        rate = SPEECH_RATE,
    )
}

fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "\"\"".to_string())
}
