mod chat_widget;
mod lesson;
mod progress_history;
mod scene_detail;
mod scenes;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use chat_widget::ChatWidget;
pub use lesson::LessonView;
pub use progress_history::ProgressHistoryView;
pub use scene_detail::SceneDetailView;
pub use scenes::ScenesView;
pub use state::{ViewError, ViewState, view_state_from_resource};
