//! Insight generation: prompt assembly, provider fallback and translation.
//!
//! Flow: traits + base prediction → optional context retrieval → prompt →
//!       providers in priority order → deterministic template → Hindi
//!       translation when requested.
//!
//! In auto mode `generate_insight` cannot fail: the template generator is the
//! last step of the cascade. Only specific mode surfaces provider errors.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::generation::mock;
use crate::generation::prompts::{build_prompt, PromptInput};
use crate::llm_client::{GenerationProvider, ProviderError};
use crate::models::insight::Language;
use crate::profiles::PersonalizationContext;
use crate::retrieval::ContextRetriever;
use crate::translation::Translator;
use crate::zodiac::{base_prediction, traits, ZodiacSign};

/// Snippets pulled from the context corpus per request.
const CONTEXT_SNIPPETS: usize = 2;

/// Provider names that are recognised even when no credential is configured.
const KNOWN_PROVIDERS: [&str; 3] = ["gemini", "huggingface", "openai"];

/// Attempt-log entry and provider tag for the template generator.
pub const MOCK_PROVIDER: &str = "mock";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderMode {
    /// Try every registered provider in order, then the template generator.
    Auto,
    /// Call exactly this provider; errors propagate.
    Specific(String),
}

#[derive(Debug, Clone)]
pub struct InsightRequest<'a> {
    pub name: &'a str,
    pub sign: ZodiacSign,
    pub birth_place: Option<&'a str>,
    pub language: Language,
    pub user_context: Option<&'a PersonalizationContext>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    pub text: String,
    /// Name of the provider that produced `text`, or "mock".
    pub provider: String,
    /// Every provider tried, in order. Timeouts are tagged "<name> (timeout)".
    pub attempts: Vec<String>,
}

pub struct InsightGenerator {
    providers: Vec<Arc<dyn GenerationProvider>>,
    mode: ProviderMode,
    translator: Translator,
    retriever: Option<ContextRetriever>,
}

// ────────────────────────────────────────────────────────────────────────────
// Generation pipeline
// ────────────────────────────────────────────────────────────────────────────

impl InsightGenerator {
    /// `providers` must already be in priority order and hold only providers
    /// with a credential.
    pub fn new(
        providers: Vec<Arc<dyn GenerationProvider>>,
        mode: ProviderMode,
        translator: Translator,
    ) -> Self {
        Self {
            providers,
            mode,
            translator,
            retriever: None,
        }
    }

    pub fn with_retriever(mut self, retriever: ContextRetriever) -> Self {
        self.retriever = Some(retriever);
        self
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub async fn generate_insight(
        &self,
        request: InsightRequest<'_>,
    ) -> Result<GenerationOutcome, ProviderError> {
        let sign_traits = traits(request.sign);
        let prediction = base_prediction(request.sign);

        let snippets = match &self.retriever {
            Some(retriever) => {
                retriever.retrieve_context(request.sign, sign_traits.traits, CONTEXT_SNIPPETS)
            }
            None => Vec::new(),
        };

        let prompt = build_prompt(&PromptInput {
            name: request.name,
            sign: request.sign,
            traits: sign_traits,
            birth_place: request.birth_place,
            base_prediction: &prediction,
            context_snippets: &snippets,
            user_context: request.user_context,
        });

        let mut attempts = Vec::new();

        match &self.mode {
            ProviderMode::Auto => {
                for provider in &self.providers {
                    let started = Instant::now();
                    match call_with_deadline(provider.as_ref(), &prompt).await {
                        Ok(text) => {
                            info!(
                                "{} generated insight in {:.2}s",
                                provider.name(),
                                started.elapsed().as_secs_f64()
                            );
                            attempts.push(provider.name().to_string());
                            let text = self.localize(text, request.language).await;
                            return Ok(GenerationOutcome {
                                text,
                                provider: provider.name().to_string(),
                                attempts,
                            });
                        }
                        Err(e) if e.is_timeout() => {
                            warn!(
                                "{} timed out after {:.2}s, trying next provider",
                                provider.name(),
                                started.elapsed().as_secs_f64()
                            );
                            attempts.push(format!("{} (timeout)", provider.name()));
                        }
                        Err(e) => {
                            warn!(
                                "{} failed after {:.2}s: {e}",
                                provider.name(),
                                started.elapsed().as_secs_f64()
                            );
                            attempts.push(provider.name().to_string());
                        }
                    }
                }

                if !self.providers.is_empty() {
                    warn!("All providers failed ({}), using template generator", attempts.join(", "));
                }
                Ok(self.fallback(&request, &prediction, attempts).await)
            }
            ProviderMode::Specific(name) => {
                let Some(provider) = self.providers.iter().find(|p| p.name() == name.as_str()) else {
                    if KNOWN_PROVIDERS.contains(&name.as_str()) {
                        return Err(ProviderError::NotConfigured(name.clone()));
                    }
                    debug!("Provider '{name}' is not an LLM provider, using template generator");
                    return Ok(self.fallback(&request, &prediction, attempts).await);
                };

                let started = Instant::now();
                let text = call_with_deadline(provider.as_ref(), &prompt).await?;
                info!(
                    "{} generated insight in {:.2}s",
                    provider.name(),
                    started.elapsed().as_secs_f64()
                );
                attempts.push(provider.name().to_string());
                let text = self.localize(text, request.language).await;
                Ok(GenerationOutcome {
                    text,
                    provider: provider.name().to_string(),
                    attempts,
                })
            }
        }
    }

    async fn fallback(
        &self,
        request: &InsightRequest<'_>,
        prediction: &str,
        mut attempts: Vec<String>,
    ) -> GenerationOutcome {
        let sign_traits = traits(request.sign);
        let text = mock::generate(request.name, request.sign, &sign_traits, prediction);
        attempts.push(MOCK_PROVIDER.to_string());
        GenerationOutcome {
            text: self.localize(text, request.language).await,
            provider: MOCK_PROVIDER.to_string(),
            attempts,
        }
    }

    async fn localize(&self, text: String, language: Language) -> String {
        match language {
            Language::En => text,
            Language::Hi => self.translator.translate_to_hindi(&text).await,
        }
    }
}

/// Runs one provider call under its deadline.
///
/// The in-flight request is dropped when the deadline fires. An error that
/// arrives once the deadline has been reached is reported as a timeout too.
async fn call_with_deadline(
    provider: &dyn GenerationProvider,
    prompt: &str,
) -> Result<String, ProviderError> {
    let limit = provider.timeout();
    let started = Instant::now();

    let timed_out = |elapsed: Duration| ProviderError::Timeout {
        provider: provider.name().to_string(),
        elapsed,
    };

    match tokio::time::timeout(limit, provider.try_generate(prompt)).await {
        Ok(Ok(text)) if text.trim().is_empty() => Err(ProviderError::EmptyContent),
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => {
            let elapsed = started.elapsed();
            if !e.is_timeout() && elapsed >= limit {
                Err(timed_out(elapsed))
            } else {
                Err(e)
            }
        }
        Err(_) => Err(timed_out(started.elapsed())),
    }
}
