//! HTTP client for the Gemini `generateContent` REST endpoint.
//!
//! Wraps `reqwest` with credential handling and typed envelope decoding.
//! Non-2xx responses and envelopes without text surface as
//! [`InsightError::Upstream`]; there is no retry at this layer.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use awardscout_core::AppConfig;

use crate::error::InsightError;
use crate::model::GenerativeModel;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Client for the Gemini API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests. A client built without an API key is
/// valid but reports `is_configured() == false` and never sends a request.
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
    endpoint: Url,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: Option<&str>,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, InsightError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`InsightError::Configuration`] if
    /// `base_url` or `model` do not form a valid URL.
    pub fn with_base_url(
        api_key: Option<&str>,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, InsightError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("awardscout/0.1 (award-insight)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let endpoint = Url::parse(&normalised)
            .and_then(|base| base.join(&format!("v1beta/models/{model}:generateContent")))
            .map_err(|e| {
                InsightError::Configuration(format!("invalid base URL '{base_url}': {e}"))
            })?;

        Ok(Self {
            client,
            api_key: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(ToOwned::to_owned),
            endpoint,
        })
    }

    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// Same as [`GeminiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, InsightError> {
        Self::with_base_url(
            config.gemini_api_key.as_deref(),
            &config.gemini_model,
            config.request_timeout_secs,
            &config.gemini_base_url,
        )
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn send(&self, api_key: &str, prompt: &str) -> Result<String, InsightError> {
        let request = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(InsightError::Upstream(describe_error(status.as_u16(), &body)));
        }

        let envelope: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            InsightError::Upstream(format!("unexpected generateContent response: {e}"))
        })?;
        extract_text(envelope)
    }
}

impl GenerativeModel for GeminiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(InsightError::Configuration(
                "GEMINI_API_KEY is not set".to_string(),
            ));
        };
        self.send(api_key, prompt).await
    }
}

fn describe_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("HTTP {status} {code}: {}", envelope.error.message),
            None => format!("HTTP {status}: {}", envelope.error.message),
        },
        Err(_) => format!("HTTP {status}"),
    }
}

/// Concatenates the text parts of the first candidate.
fn extract_text(envelope: GenerateResponse) -> Result<String, InsightError> {
    let block_reason = envelope
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason);

    let text: String = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        return Err(InsightError::Upstream(match block_reason {
            Some(reason) => format!("prompt blocked by service: {reason}"),
            None => "response contained no text".to_string(),
        }));
    }

    Ok(text)
}
