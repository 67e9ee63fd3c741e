use dioxus::prelude::*;
use services::{CatalogError, LessonServiceError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NotFound,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::NotFound => "We couldn't find that page.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&CatalogError> for ViewError {
    fn from(err: &CatalogError) -> Self {
        match err {
            CatalogError::NotFound { .. } => ViewError::NotFound,
            _ => ViewError::Unknown,
        }
    }
}

impl From<CatalogError> for ViewError {
    fn from(err: CatalogError) -> Self {
        tracing::warn!(error = %err, "catalog request failed");
        ViewError::from(&err)
    }
}

impl From<LessonServiceError> for ViewError {
    fn from(err: LessonServiceError) -> Self {
        tracing::warn!(error = %err, "lesson request failed");
        match &err {
            LessonServiceError::Catalog(catalog) => ViewError::from(catalog),
            _ => ViewError::Unknown,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(*err),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}
