use thiserror::Error;

use crate::lesson_session::SessionStepError;
use crate::model::ParseIdError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    SessionStep(#[from] SessionStepError),
    #[error(transparent)]
    ParseId(#[from] ParseIdError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LessonId;

    #[test]
    fn wraps_domain_errors() {
        let parse = "lesson-1".parse::<LessonId>().unwrap_err();
        assert!(matches!(Error::from(parse), Error::ParseId(_)));
        assert!(matches!(
            Error::from(SessionStepError::AlreadyCompleted),
            Error::SessionStep(_)
        ));
    }
}
