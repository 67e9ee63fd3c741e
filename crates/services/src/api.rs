use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use english_core::model::{Lesson, LessonId, Scene, SceneId, Score, ServerProgressRecord};

use crate::error::ApiError;

pub const API_BASE_URL_ENV: &str = "EE_API_BASE_URL";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Where the learning backend lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
}

impl ApiConfig {
    /// Parse and validate a base URL. Only `http` and `https` are accepted.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` when the URL cannot be used as a base.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let invalid = |reason: String| ApiError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let mut url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("url cannot be a base".into()));
        }
        // Joining relative endpoints keeps any path prefix only with a trailing slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);
        Ok(Self { base_url: url })
    }

    /// Resolve the base URL: explicit value first, then `EE_API_BASE_URL`,
    /// then the local development default.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` when the chosen URL is invalid.
    pub fn resolve(explicit: Option<&str>) -> Result<Self, ApiError> {
        match explicit {
            Some(url) => Self::new(url),
            None => Self::from_env(),
        }
    }

    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` when `EE_API_BASE_URL` is invalid.
    pub fn from_env() -> Result<Self, ApiError> {
        match env::var(API_BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(&url),
            _ => Self::new(DEFAULT_API_BASE_URL),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Absolute URL of a backend path such as `api/scenes/`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidBaseUrl` if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Body of `POST /api/progress/complete_lesson/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    pub lesson_id: LessonId,
    pub score: Score,
    pub time_spent: u64,
}

/// Remote learning content and progress.
#[async_trait]
pub trait LearningBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    async fn list_scenes(&self) -> Result<Vec<Scene>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    async fn get_scene(&self, id: SceneId) -> Result<Scene, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    async fn get_lesson(&self, id: LessonId) -> Result<Lesson, ApiError>;

    /// Progress rows the backend already knows about.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or error statuses.
    async fn my_progress(&self) -> Result<Vec<ServerProgressRecord>, ApiError>;

    /// # Errors
    ///
    /// Returns `ApiError` on transport failures or when the status is 400 or above.
    async fn complete_lesson(&self, request: &CompletionRequest) -> Result<(), ApiError>;
}

/// `LearningBackend` over HTTP/JSON.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    config: ApiConfig,
}

impl HttpBackend {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.config.endpoint(path)?;
        tracing::debug!(%url, "GET");
        let response = self.client.get(url).send().await?;
        let response = check_status(response)?;
        Ok(response.json().await?)
    }
}

fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.as_u16() >= 400 {
        return Err(ApiError::HttpStatus(status));
    }
    Ok(response)
}

#[async_trait]
impl LearningBackend for HttpBackend {
    async fn list_scenes(&self) -> Result<Vec<Scene>, ApiError> {
        self.get_json("api/scenes/").await
    }

    async fn get_scene(&self, id: SceneId) -> Result<Scene, ApiError> {
        self.get_json(&format!("api/scenes/{id}/")).await
    }

    async fn get_lesson(&self, id: LessonId) -> Result<Lesson, ApiError> {
        self.get_json(&format!("api/lessons/{id}/")).await
    }

    async fn my_progress(&self) -> Result<Vec<ServerProgressRecord>, ApiError> {
        self.get_json("api/progress/my_progress/").await
    }

    async fn complete_lesson(&self, request: &CompletionRequest) -> Result<(), ApiError> {
        let url = self.config.endpoint("api/progress/complete_lesson/")?;
        tracing::debug!(%url, lesson_id = %request.lesson_id, "POST");
        let response = self.client.post(url).json(request).send().await?;
        check_status(response)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_under_the_base() {
        let config = ApiConfig::new("http://localhost:8000").unwrap();
        assert_eq!(
            config.endpoint("api/scenes/").unwrap().as_str(),
            "http://localhost:8000/api/scenes/"
        );
        assert_eq!(config, ApiConfig::new(DEFAULT_API_BASE_URL).unwrap());
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let config = ApiConfig::new("https://example.com/backend").unwrap();
        assert_eq!(
            config.endpoint("/api/lessons/7/").unwrap().as_str(),
            "https://example.com/backend/api/lessons/7/"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            ApiConfig::new("not a url"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ApiConfig::new("ftp://example.com"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            ApiConfig::new("mailto:someone@example.com"),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn explicit_url_wins_over_environment() {
        let config = ApiConfig::resolve(Some("http://10.0.0.2:9000/")).unwrap();
        assert_eq!(config.base_url().as_str(), "http://10.0.0.2:9000/");
    }

    #[test]
    fn completion_body_uses_backend_field_names() {
        let body = CompletionRequest {
            lesson_id: LessonId::new(3),
            score: Score::clamped(75),
            time_spent: 42,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"lesson_id":3,"score":75,"time_spent":42}"#
        );
    }
}
