//! Completion service seam and its implementations.

pub mod gemini;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::Config;
use crate::credential::Credential;
use crate::extract::ExtractedText;
use crate::prompt::build_prompt;

pub use gemini::GeminiClient;

/// One request to the completion service.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub credential: Credential,
}

impl CompletionRequest {
    /// Build the tax review request for `document` with the configured model
    /// parameters.
    pub fn tax_review(config: &Config, document: &ExtractedText, credential: Credential) -> Self {
        Self {
            model: config.model.clone(),
            prompt: build_prompt(document.as_str()),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
            credential,
        }
    }
}

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("rate limited (429)")]
    RateLimited,
    #[error("completion service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
    #[error("completion service returned no text")]
    EmptyResponse,
    #[error("invalid response from completion service: {0}")]
    InvalidResponse(String),
}

/// A remote service that turns a prompt into free text.
pub trait CompletionClient: Send + Sync {
    /// Provider name used in logs (e.g. "Gemini").
    fn name(&self) -> &str;

    /// Send one completion request. Not retried.
    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send + 'a>>;
}
