//! Student flow: access code entry, then emotion submission.

use crate::backend::Backend;
use crate::session::{SessionStore, CODE_SESSION_KEY};
use chrono::Duration;
use tracing::{info, instrument, warn};
use vibecheck_common::{Emotion, Result, VibeCheckError};
use vibecheck_config::defaults::DEFAULT_CODE_TTL_MINUTES;

/// Rejection of a blank access code.
pub const BLANK_CODE_MESSAGE: &str = "Por favor, informe um código válido.";
/// Rejection of a code the backend does not accept.
pub const INVALID_CODE_MESSAGE: &str = "Código inválido ou expirado.";
/// Emotion submitted without a verified code in the session.
pub const MISSING_CODE_MESSAGE: &str = "Código de avaliação não encontrado.";
/// Failure of the backend verification call.
pub const VERIFY_FAILED_MESSAGE: &str = "Erro ao verificar o código. Tente novamente.";
/// Failure of the backend registration call.
pub const REGISTER_FAILED_MESSAGE: &str = "Erro ao registrar emoção. Tente novamente.";

/// Student check-in/check-out.
pub struct StudentFlow<B, S> {
    backend: B,
    session: S,
    code_ttl: Duration,
}

impl<B: Backend, S: SessionStore> StudentFlow<B, S> {
    /// Flow keeping verified codes for [`DEFAULT_CODE_TTL_MINUTES`].
    pub fn new(backend: B, session: S) -> Self {
        Self {
            backend,
            session,
            code_ttl: Duration::minutes(i64::from(DEFAULT_CODE_TTL_MINUTES)),
        }
    }

    /// Override how long a verified code stays in the session.
    #[must_use]
    pub const fn with_code_ttl(mut self, code_ttl: Duration) -> Self {
        self.code_ttl = code_ttl;
        self
    }

    /// The session store in use.
    pub const fn session(&self) -> &S {
        &self.session
    }

    /// Verify `code` with the backend and remember it for submission.
    #[instrument(skip(self))]
    pub async fn enter_code(&self, code: &str) -> Result<()> {
        let code = code.trim();
        if code.is_empty() {
            return Err(VibeCheckError::validation_field(BLANK_CODE_MESSAGE, "codigo"));
        }

        let valid = self.backend.verify_code(code).await.map_err(|e| {
            warn!("Code verification failed: {}", e);
            VibeCheckError::with_source(VERIFY_FAILED_MESSAGE, e)
        })?;
        if !valid {
            return Err(VibeCheckError::validation_field(INVALID_CODE_MESSAGE, "codigo"));
        }

        self.session.set(CODE_SESSION_KEY, code, self.code_ttl)?;
        info!("Access code accepted");
        Ok(())
    }

    /// The verified code waiting for a submission, if any.
    pub fn current_code(&self) -> Result<Option<String>> {
        self.session.get(CODE_SESSION_KEY)
    }

    /// Register `emotion` against the verified code, then forget the code.
    #[instrument(skip(self))]
    pub async fn submit_emotion(&self, emotion: Emotion) -> Result<()> {
        let code = self
            .current_code()?
            .ok_or_else(|| VibeCheckError::validation_field(MISSING_CODE_MESSAGE, "codigo"))?;

        self.backend
            .register_emotion(&code, emotion)
            .await
            .map_err(|e| {
                warn!("Emotion registration failed: {}", e);
                VibeCheckError::with_source(REGISTER_FAILED_MESSAGE, e)
            })?;

        self.session.clear(CODE_SESSION_KEY)?;
        info!("Emotion {} registered", emotion);
        Ok(())
    }
}
