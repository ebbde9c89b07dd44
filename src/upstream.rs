//! Client for the external chat completion service that does the rewriting.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

use crate::models::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ErrorEnvelope};

const COMPLETIONS_PATH: &str = "/chat/completions";

// Generation parameters, tuned for varied phrasing rather than determinism
const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.8;
const PRESENCE_PENALTY: f32 = 0.2;
const FREQUENCY_PENALTY: f32 = 0.3;

pub const SYSTEM_PROMPT: &str = "You are an expert editor who rewrites AI-generated text so it \
reads as if a person wrote it. Paraphrase the text the user sends you: keep its meaning, facts \
and tone, vary sentence length and structure, use natural transitions and everyday word \
choices, and avoid repetitive or formulaic phrasing typical of AI writing. Respond with the \
rewritten text only, with no preamble, notes or commentary.";

/// Failures of the completion call, classified by the provider's error code.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UpstreamError {
    #[error("API quota exceeded. Please check your OpenAI account.")]
    QuotaExceeded,

    #[error("Invalid API key. Please check your configuration.")]
    InvalidApiKey,

    /// Anything unclassified; the detail is for logs only.
    #[error("Failed to humanize text. Please try again.")]
    Other(String),
}

impl UpstreamError {
    pub fn from_code(status: StatusCode, code: Option<&str>, message: Option<&str>) -> Self {
        match code {
            Some("insufficient_quota") => UpstreamError::QuotaExceeded,
            Some("invalid_api_key") => UpstreamError::InvalidApiKey,
            None if status == StatusCode::UNAUTHORIZED => UpstreamError::InvalidApiKey,
            _ => UpstreamError::Other(format!(
                "upstream returned {status}: {}",
                message.unwrap_or("no message")
            )),
        }
    }

    // Short label for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::QuotaExceeded => "quota_exceeded",
            UpstreamError::InvalidApiKey => "invalid_api_key",
            UpstreamError::Other(_) => "other",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Other(format!("upstream timed out: {e}"))
        } else {
            UpstreamError::Other(format!("request failed: {e}"))
        }
    }
}

/// Turns the caller's text into its humanized rewrite.
#[async_trait]
pub trait Rewriter: Send + Sync {
    async fn rewrite(&self, text: &str) -> Result<String, UpstreamError>;
}

// OpenAI-compatible chat completion client
pub struct OpenAiRewriter {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String, // base + COMPLETIONS_PATH
}

impl OpenAiRewriter {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let url = format!("{}{COMPLETIONS_PATH}", base_url.trim_end_matches('/'));
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            url,
        })
    }


    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Rewriter for OpenAiRewriter {
    async fn rewrite(&self, text: &str) -> Result<String, UpstreamError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
            presence_penalty: PRESENCE_PENALTY,
            frequency_penalty: FREQUENCY_PENALTY,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let envelope: ErrorEnvelope = serde_json::from_str(&body).unwrap_or_default();
            let error = envelope.error.unwrap_or_default();
            return Err(UpstreamError::from_code(
                status,
                error.code.as_deref(),
                error.message.as_deref(),
            ));
        }

        let body: ChatCompletionResponse = response.json().await?;
        Ok(body.into_text())
    }
}
