use std::future::Future;

use crate::error::InsightError;

/// The one capability the insight layer needs from a language-model service:
/// send a prompt, get text back.
pub trait GenerativeModel: Send + Sync {
    /// Whether the out-of-band credential is present.
    fn is_configured(&self) -> bool;

    /// Generates free-form text for `prompt`.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, InsightError>> + Send;
}

/// Fails with [`InsightError::Configuration`] when `model` has no credential.
pub(crate) fn ensure_configured<M: GenerativeModel>(model: &M) -> Result<(), InsightError> {
    if model.is_configured() {
        Ok(())
    } else {
        Err(InsightError::Configuration(
            "GEMINI_API_KEY is not set".to_string(),
        ))
    }
}
