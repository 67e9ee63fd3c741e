mod chat_vm;
mod history_vm;
mod lesson_vm;
mod scene_vm;
mod time_fmt;

pub use chat_vm::{CHAT_GREETING, ChatVm};
pub use history_vm::{HistoryRowVm, HistoryVm, map_history};
pub use lesson_vm::{
    DialogueLineVm, LessonControlsVm, LessonIntent, LessonVm, StepperItemVm, apply_intent,
    stepper,
};
pub use scene_vm::{LessonRowVm, PhraseVm, SceneCardVm, SceneDetailVm, map_scene_cards};
pub use time_fmt::{format_datetime, format_duration};
