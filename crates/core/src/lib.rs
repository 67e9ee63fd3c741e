#![forbid(unsafe_code)]

pub mod error;
pub mod lesson_session;
pub mod model;
pub mod paging;
pub mod reconcile;
pub mod stats;
pub mod time;

pub use error::Error;
pub use lesson_session::{LessonCompletion, LessonSession, LessonStep, SessionStepError};
pub use paging::{LESSON_PAGE_SIZE, Pager};
pub use reconcile::{MergedEntry, MergedProgress, ProgressMeta, ProgressSource, merge};
pub use time::Clock;
