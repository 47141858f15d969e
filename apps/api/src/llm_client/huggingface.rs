use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use super::prompts::HUGGINGFACE_PREAMBLE;
use super::{api_error, GenerationProvider, ProviderError, MAX_OUTPUT_TOKENS, TEMPERATURE};

const HUGGINGFACE_INFERENCE_URL: &str = "https://api-inference.huggingface.co";

/// HuggingFace Inference API text generation (bearer-token auth).
pub struct HuggingFaceProvider {
    client: Client,
    api_key: String,
    model: String,
    timeout: Duration,
    base_url: String,
}

impl HuggingFaceProvider {
    pub fn new(client: Client, api_key: String, model: String, timeout: Duration) -> Self {
        Self {
            client,
            api_key,
            model,
            timeout,
            base_url: HUGGINGFACE_INFERENCE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl GenerationProvider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn try_generate(&self, prompt: &str) -> Result<String, ProviderError> {
        let formatted_prompt = format!("{HUGGINGFACE_PREAMBLE}\n\n{prompt}");

        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&json!({
                "inputs": formatted_prompt,
                "parameters": {
                    "max_new_tokens": MAX_OUTPUT_TOKENS,
                    "temperature": TEMPERATURE,
                    "return_full_text": false
                }
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)?;
        let text = extract_generated_text(&value);

        // Some models echo the prompt despite return_full_text=false.
        let text = text.replace(&formatted_prompt, "");
        let text = text.trim();

        if text.is_empty() {
            return Err(ProviderError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

/// Accepts `[{"generated_text": ..}]`, `{"generated_text": ..}`, or anything
/// else (stringified).
fn extract_generated_text(value: &Value) -> String {
    let candidate = match value {
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => return String::new(),
        },
        other => other,
    };

    match candidate.get("generated_text").and_then(Value::as_str) {
        Some(text) => text.to_string(),
        None => match candidate {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}
