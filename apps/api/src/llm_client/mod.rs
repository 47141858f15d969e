//! LLM Client: every outbound text-generation call goes through a
//! `GenerationProvider` defined in this module.
//!
//! ARCHITECTURAL RULE: the orchestrator in `generation::generator` only sees
//! the trait. Provider wire formats stay in the provider files.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;
pub mod huggingface;
pub mod openai;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use huggingface::HuggingFaceProvider;
pub use openai::OpenAiProvider;

/// Shared generation limits for all providers.
pub const MAX_OUTPUT_TOKENS: u32 = 200;
pub const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("provider returned empty content")]
    EmptyContent,

    #[error("{provider} timed out after {elapsed:?}")]
    Timeout { provider: String, elapsed: Duration },

    #[error("provider '{0}' has no credential configured")]
    NotConfigured(String),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        match self {
            ProviderError::Timeout { .. } => true,
            ProviderError::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// A remote text generator.
///
/// `try_generate` returns the raw English text; translation and fallback are
/// the orchestrator's job.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Short tag used in logs and the attempt log ("gemini", "huggingface", "openai").
    fn name(&self) -> &'static str;

    /// Deadline applied around each `try_generate` call.
    fn timeout(&self) -> Duration;

    async fn try_generate(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Builds the error for a non-2xx response, keeping the body as the message.
pub(crate) async fn api_error(response: reqwest::Response) -> ProviderError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    ProviderError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_variant_is_timeout() {
        let err = ProviderError::Timeout {
            provider: "gemini".to_string(),
            elapsed: Duration::from_secs(30),
        };
        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "gemini timed out after 30s");
    }

    #[test]
    fn test_other_variants_are_not_timeouts() {
        assert!(!ProviderError::EmptyContent.is_timeout());
        assert!(!ProviderError::NotConfigured("openai".to_string()).is_timeout());
        assert!(!ProviderError::Api {
            status: 500,
            message: "boom".to_string()
        }
        .is_timeout());
    }
}
