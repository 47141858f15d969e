use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompts::GEMINI_SYSTEM;
use super::{api_error, GenerationProvider, ProviderError, MAX_OUTPUT_TOKENS, TEMPERATURE};

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Google Gemini `generateContent` (API-key auth).
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    timeout: Duration,
    base_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_string())
    }
}

impl GeminiProvider {
    pub fn new(client: Client, api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            client,
            api_key,
            model,
            timeout,
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn try_generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let full_prompt = format!("{GEMINI_SYSTEM}\n\n{prompt}");
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &full_prompt }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: MAX_OUTPUT_TOKENS,
                temperature: TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", self.api_key.as_str())])
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let parsed: GenerateContentResponse = response.json().await?;
        debug!("Gemini returned {} candidate(s)", parsed.candidates.len());
        parsed.text().ok_or(ProviderError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn provider(server: &MockServer) -> GeminiProvider {
        GeminiProvider::new(
            Client::new(),
            "gem-key".to_string(),
            "gemini-pro".to_string(),
            Duration::from_secs(5),
        )
        .with_base_url(server.uri())
    }

    #[tokio::test]
    async fn test_generate_content_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .and(query_param("key", "gem-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "maxOutputTokens": 200 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "  Ritika, lead with warmth today.  " }] }
                }]
            })))
            .mount(&server)
            .await;

        let text = provider(&server).try_generate("prompt").await.unwrap();
        assert_eq!(text, "Ritika, lead with warmth today.");
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = provider(&server).try_generate("prompt").await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyContent));
    }

    #[tokio::test]
    async fn test_error_status_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        match provider(&server).try_generate("prompt").await {
            Err(ProviderError::Api { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }
}
