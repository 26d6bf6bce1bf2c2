//! HTTP client for the Vibe Check backend
//!
//! Wraps `reqwest` with the backend's endpoint layout, a cookie jar for the
//! login session, and exponential-backoff retries for idempotent reads.

use reqwest::cookie::Jar;
use reqwest::{header, Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, error, info, instrument, warn};
use url::Url;
use vibecheck_common::{
    ClassGroup, ClassId, Emotion, EventRecord, EventType, IssuedCode, Result, VibeCheckError,
};
use vibecheck_config::ApiConfig;

/// Body of the code release endpoints.
#[derive(Debug, Serialize)]
struct ReleaseRequest<'a> {
    #[serde(rename = "nomeTurma")]
    class_name: &'a str,
}

/// Backend API client with a shared cookie jar
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    max_retries: usize,
}

impl ApiClient {
    /// Create a client from the API configuration section
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            VibeCheckError::config_with_source(
                format!("Invalid API base URL '{}'", config.base_url),
                e,
            )
        })?;
        if base_url.cannot_be_a_base() {
            return Err(VibeCheckError::config(format!(
                "API base URL '{base_url}' cannot carry a path"
            )));
        }

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = &config.session_cookie {
            jar.add_cookie_str(cookie, &base_url);
            debug!("Loaded session cookie for {}", base_url);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .cookie_provider(jar)
            .build()
            .map_err(|e| VibeCheckError::network_with_source("Failed to create HTTP client", e))?;

        Ok(Self {
            client,
            base_url,
            max_retries: config.max_retries,
        })
    }

    /// Create a client for `base_url` with default timeout and retries
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(&ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        })
    }

    /// The backend base URL
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| VibeCheckError::config("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments.iter().copied());
        Ok(url)
    }

    /// Send a request once, mapping non-success statuses to API errors
    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("Request failed: {}", e);
            VibeCheckError::from(e)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!("Request successful: {}", status);
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_client_error() {
            error!("Client error: {}", status);
        } else {
            warn!("Server error: {}", status);
        }

        let message = if body.trim().is_empty() {
            format!("Backend returned {status}")
        } else {
            format!("Backend returned {status}: {}", body.trim())
        };
        Err(VibeCheckError::api_with_status(message, status.as_u16()))
    }

    /// GET with retries on network failures and 5xx responses
    #[instrument(skip(self, query), fields(url = %url))]
    async fn get_json<T>(&self, url: Url, query: &[(&str, &str)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let retry_strategy = ExponentialBackoff::from_millis(2)
            .factor(50)
            .max_delay(Duration::from_secs(5))
            .take(self.max_retries);

        let response = RetryIf::start(
            retry_strategy,
            || async { Self::send(self.client.get(url.clone()).query(query)).await },
            VibeCheckError::is_retryable,
        )
        .await?;

        Self::parse_json(response).await
    }

    async fn parse_json<T>(response: Response) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = response
            .text()
            .await
            .map_err(|e| VibeCheckError::network_with_source("Failed to read response body", e))?;

        debug!("Response body: {}", text);
        Ok(serde_json::from_str(&text)?)
    }

    /// Address of the backend's login entry point (Google redirect)
    pub fn login_url(&self) -> Result<Url> {
        self.endpoint(&["login"])
    }

    /// End the backend session
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        let url = self.endpoint(&["logout"])?;
        Self::send(self.client.post(url)).await?;
        info!("Logged out");
        Ok(())
    }

    /// Every recorded check-in/check-out answer visible to the logged-in teacher
    #[instrument(skip(self))]
    pub async fn dashboard_records(&self) -> Result<Vec<EventRecord>> {
        let url = self.endpoint(&["api", "codigo", "dashboard"])?;
        let records: Vec<EventRecord> = self.get_json(url, &[]).await?;
        info!("Fetched {} dashboard records", records.len());
        Ok(records)
    }

    /// Classes of the logged-in teacher, without the backend's placeholder rows
    #[instrument(skip(self))]
    pub async fn classes(&self) -> Result<Vec<ClassGroup>> {
        let url = self.endpoint(&["api", "codigo", "turmas"])?;
        let all: Vec<ClassGroup> = self.get_json(url, &[]).await?;
        let total = all.len();

        let classes: Vec<ClassGroup> = all.into_iter().filter(|c| !c.is_placeholder()).collect();
        debug!("Dropped {} placeholder classes", total - classes.len());
        info!("Fetched {} classes", classes.len());
        Ok(classes)
    }

    /// Open a check-in or check-out window for `class_name`, returning the code
    #[instrument(skip(self))]
    pub async fn release_code(&self, event_type: EventType, class_name: &str) -> Result<String> {
        let url = self.endpoint(&["api", "codigo", event_type.release_path()])?;
        let request = self.client.post(url).json(&ReleaseRequest { class_name });

        let issued: IssuedCode = Self::parse_json(Self::send(request).await?).await?;
        info!("Released {} code for class {}", event_type, class_name);
        Ok(issued.code)
    }

    /// Rename a class. The new name is sent as the raw request body.
    #[instrument(skip(self))]
    pub async fn rename_class(&self, id: ClassId, name: &str) -> Result<()> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "turmas", id.as_str()])?;
        let request = self
            .client
            .put(url)
            .header(header::CONTENT_TYPE, "application/json")
            .body(name.to_string());

        Self::send(request).await?;
        info!("Renamed class {} to {}", id, name);
        Ok(())
    }

    /// Delete a class
    #[instrument(skip(self))]
    pub async fn delete_class(&self, id: ClassId) -> Result<()> {
        let id = id.to_string();
        let url = self.endpoint(&["api", "turmas", id.as_str()])?;

        Self::send(self.client.delete(url)).await?;
        info!("Deleted class {}", id);
        Ok(())
    }

    /// Ask the backend whether a student access code is currently valid
    #[instrument(skip(self))]
    pub async fn verify_code(&self, code: &str) -> Result<bool> {
        let url = self.endpoint(&["api", "registro", "verificar-codigo"])?;
        self.get_json(url, &[("codigo", code)]).await
    }

    /// Record a student's emotion against an access code
    #[instrument(skip(self))]
    pub async fn register_emotion(&self, code: &str, emotion: Emotion) -> Result<()> {
        let url = self.endpoint(&["api", "registro", "registrar"])?;
        let emotion_code = emotion.code().to_string();
        let request = self
            .client
            .post(url)
            .query(&[("codigo", code), ("emocao", emotion_code.as_str())]);

        Self::send(request).await?;
        info!("Registered emotion {}", emotion);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_building() {
        let client = ApiClient::with_base_url("http://localhost:8080").unwrap();

        assert_eq!(
            client.login_url().unwrap().as_str(),
            "http://localhost:8080/login"
        );
        assert_eq!(
            client.endpoint(&["api", "turmas", "7"]).unwrap().as_str(),
            "http://localhost:8080/api/turmas/7"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = ApiClient::with_base_url("https://school.example.com/vibe/").unwrap();

        assert_eq!(
            client
                .endpoint(&["api", "codigo", "dashboard"])
                .unwrap()
                .as_str(),
            "https://school.example.com/vibe/api/codigo/dashboard"
        );
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(ApiClient::with_base_url("not a url").is_err());
        assert!(ApiClient::with_base_url("mailto:teacher@example.com").is_err());
    }

    #[test]
    fn test_release_request_body() {
        let body = serde_json::to_string(&ReleaseRequest { class_name: "3A" }).unwrap();
        assert_eq!(body, r#"{"nomeTurma":"3A"}"#);
    }
}
