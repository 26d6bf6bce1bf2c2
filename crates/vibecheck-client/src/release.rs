//! Releasing check-in/check-out codes for a class.

use crate::backend::Backend;
use tracing::{info, instrument, warn};
use vibecheck_common::{EventType, Result, VibeCheckError};

/// Rejection of a release without a class.
pub const MISSING_CLASS_MESSAGE: &str = "Por favor, selecione ou crie uma turma.";

/// Open a `event_type` window for `class_name` and return the code students enter.
#[instrument(skip(backend))]
pub async fn release_code<B>(backend: &B, event_type: EventType, class_name: &str) -> Result<String>
where
    B: Backend + ?Sized,
{
    let class_name = class_name.trim();
    if class_name.is_empty() {
        return Err(VibeCheckError::validation_field(MISSING_CLASS_MESSAGE, "turma"));
    }

    let code = backend
        .release_code(event_type, class_name)
        .await
        .map_err(|e| {
            warn!("Releasing {} code failed: {}", event_type, e);
            VibeCheckError::with_source(release_failed_message(event_type), e)
        })?;

    info!("Released {} code for {}", event_type, class_name);
    Ok(code)
}

/// User-facing message for a failed release.
pub fn release_failed_message(event_type: EventType) -> String {
    let kind = match event_type {
        EventType::Checkin => "check-in",
        EventType::Checkout => "check-out",
    };
    format!("Falha ao liberar {kind}. Tente novamente.")
}
