mod scripts;
mod steps;
mod view;

pub use view::LessonView;
