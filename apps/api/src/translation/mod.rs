//! English → Hindi translation with backend fallback.
//!
//! `Translator::translate_to_hindi` never fails. Backends are tried in
//! registration order (IndicTrans2, NLLB, Google); a backend without a
//! credential is never registered, and one that errors, returns nothing or
//! misses its deadline is skipped. When nothing succeeds the result is a fixed placeholder that
//! embeds the untranslated English prefix. The placeholder is NOT a
//! translation.

pub mod backends;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use backends::{GoogleTranslateBackend, HuggingFaceTranslationBackend};

const PLACEHOLDER_PREFIX: &str = "आज आपकी ज्योतिषीय अंतर्दृष्टि";
const PLACEHOLDER_CHARS: usize = 100;
const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationMethod {
    Auto,
    IndicTrans2,
    Nllb,
    Google,
    Stub,
}

impl FromStr for TranslationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(TranslationMethod::Auto),
            "indictrans2" => Ok(TranslationMethod::IndicTrans2),
            "nllb" => Ok(TranslationMethod::Nllb),
            "google" => Ok(TranslationMethod::Google),
            "stub" => Ok(TranslationMethod::Stub),
            other => Err(format!(
                "unknown translation method '{other}' (expected auto, indictrans2, nllb, google or stub)"
            )),
        }
    }
}

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("translation backend returned no text")]
    EmptyContent,
}

#[async_trait]
pub trait TranslationBackend: Send + Sync {
    fn name(&self) -> &'static str;
    fn method(&self) -> TranslationMethod;
    async fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

#[derive(Clone)]
pub struct Translator {
    enabled: bool,
    method: TranslationMethod,
    backends: Vec<Arc<dyn TranslationBackend>>,
    timeout: Duration,
}

impl Translator {
    pub fn new(enabled: bool, method: TranslationMethod) -> Self {
        Self {
            enabled,
            method,
            backends: Vec::new(),
            timeout: DEFAULT_BACKEND_TIMEOUT,
        }
    }

    /// Deadline applied to each backend call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_backend(mut self, backend: Arc<dyn TranslationBackend>) -> Self {
        self.backends.push(backend);
        self
    }

    pub async fn translate_to_hindi(&self, text: &str) -> String {
        if !self.enabled {
            return text.to_string();
        }
        if self.method == TranslationMethod::Stub {
            return placeholder_translation(text);
        }

        let candidates = self
            .backends
            .iter()
            .filter(|b| self.method == TranslationMethod::Auto || b.method() == self.method);

        for backend in candidates {
            match tokio::time::timeout(self.timeout, backend.translate(text)).await {
                Ok(Ok(translated)) if !translated.trim().is_empty() => {
                    debug!("Translated insight with {}", backend.name());
                    return translated;
                }
                Ok(Ok(_)) => warn!("{} translation returned empty text", backend.name()),
                Ok(Err(e)) => warn!("{} translation failed: {e}", backend.name()),
                Err(_) => warn!(
                    "{} translation timed out after {:?}",
                    backend.name(),
                    self.timeout
                ),
            }
        }

        info!("Falling back to placeholder translation");
        placeholder_translation(text)
    }
}

/// Fixed Hindi lead-in followed by the first 100 characters of the English text.
pub fn placeholder_translation(text: &str) -> String {
    let prefix: String = text.chars().take(PLACEHOLDER_CHARS).collect();
    format!("{PLACEHOLDER_PREFIX}: {prefix}...")
}
