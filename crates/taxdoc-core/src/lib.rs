use std::time::Duration;

use secrecy::SecretString;

pub mod backend;
pub mod completion;
pub mod config_file;
pub mod credential;
pub mod extract;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;
pub mod prompt;

// Re-export for convenience
pub use backend::{BackendError, PageText, PdfBackend};
pub use completion::{CompletionClient, CompletionError, CompletionRequest, GeminiClient};
pub use credential::Credential;
pub use extract::{ExtractedText, UNREADABLE_PLACEHOLDER, extract_text};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TEMPERATURE: f64 = 0.9;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_MAX_UPLOAD_MB: u32 = 25;

/// Environment variable holding the fallback API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
/// Environment variable overriding the listen address.
pub const BIND_ENV: &str = "TAXDOC_BIND";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Used when a request carries no API key of its own.
    pub google_api_key: Option<SecretString>,
    pub model: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub completion_base_url: String,
    /// `None` waits for the completion service indefinitely.
    pub completion_timeout: Option<Duration>,
    pub bind: String,
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            completion_base_url: completion::gemini::DEFAULT_BASE_URL.to_string(),
            completion_timeout: None,
            bind: DEFAULT_BIND.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB as usize * 1024 * 1024,
        }
    }
}

impl Config {
    /// Build a config from an on-disk file, filling gaps with defaults.
    pub fn from_file(file: &config_file::ConfigFile) -> Self {
        let defaults = Self::default();
        let api_keys = file.api_keys.clone().unwrap_or_default();
        let completion = file.completion.clone().unwrap_or_default();
        let server = file.server.clone().unwrap_or_default();

        Self {
            google_api_key: api_keys
                .google_api_key
                .filter(|k| !k.is_empty())
                .map(SecretString::from),
            model: completion.model.unwrap_or(defaults.model),
            temperature: completion.temperature.unwrap_or(defaults.temperature),
            max_output_tokens: completion
                .max_output_tokens
                .unwrap_or(defaults.max_output_tokens),
            completion_base_url: completion
                .base_url
                .unwrap_or(defaults.completion_base_url),
            completion_timeout: completion.timeout_secs.map(Duration::from_secs),
            bind: server.bind.unwrap_or(defaults.bind),
            max_upload_bytes: server
                .max_upload_mb
                .map(|mb| mb as usize * 1024 * 1024)
                .unwrap_or(defaults.max_upload_bytes),
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_env_lookup(|name| std::env::var(name).ok())
    }

    /// Apply overrides using `lookup` to read variables. Empty values are
    /// ignored.
    pub fn with_env_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.google_api_key = Some(SecretString::from(key));
        }
        if let Some(bind) = lookup(BIND_ENV).filter(|v| !v.is_empty()) {
            self.bind = bind;
        }
        self
    }
}
