//! Backend operations the screen flows depend on.

use crate::api::ApiClient;
use async_trait::async_trait;
use vibecheck_common::{ClassGroup, ClassId, Emotion, EventRecord, EventType, Result};

/// The backend as seen by the flows.
///
/// [`ApiClient`] is the production implementation; tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Backend: Send + Sync {
    /// Raw dashboard records.
    async fn dashboard_records(&self) -> Result<Vec<EventRecord>>;

    /// Classes, placeholders removed.
    async fn classes(&self) -> Result<Vec<ClassGroup>>;

    /// Open a check-in/check-out window and return the issued code.
    async fn release_code(&self, event_type: EventType, class_name: &str) -> Result<String>;

    /// Rename a class.
    async fn rename_class(&self, id: ClassId, name: &str) -> Result<()>;

    /// Delete a class.
    async fn delete_class(&self, id: ClassId) -> Result<()>;

    /// Whether a student access code is valid.
    async fn verify_code(&self, code: &str) -> Result<bool>;

    /// Record an emotion against an access code.
    async fn register_emotion(&self, code: &str, emotion: Emotion) -> Result<()>;

    /// End the backend session.
    async fn logout(&self) -> Result<()>;
}

#[async_trait]
impl Backend for ApiClient {
    async fn dashboard_records(&self) -> Result<Vec<EventRecord>> {
        Self::dashboard_records(self).await
    }

    async fn classes(&self) -> Result<Vec<ClassGroup>> {
        Self::classes(self).await
    }

    async fn release_code(&self, event_type: EventType, class_name: &str) -> Result<String> {
        Self::release_code(self, event_type, class_name).await
    }

    async fn rename_class(&self, id: ClassId, name: &str) -> Result<()> {
        Self::rename_class(self, id, name).await
    }

    async fn delete_class(&self, id: ClassId) -> Result<()> {
        Self::delete_class(self, id).await
    }

    async fn verify_code(&self, code: &str) -> Result<bool> {
        Self::verify_code(self, code).await
    }

    async fn register_emotion(&self, code: &str, emotion: Emotion) -> Result<()> {
        Self::register_emotion(self, code, emotion).await
    }

    async fn logout(&self) -> Result<()> {
        Self::logout(self).await
    }
}
