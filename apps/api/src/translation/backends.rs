//! Hosted translation backends.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{TranslationBackend, TranslationError, TranslationMethod};

const HUGGINGFACE_INFERENCE_URL: &str = "https://api-inference.huggingface.co";
const GOOGLE_TRANSLATE_URL: &str = "https://translation.googleapis.com";

pub const INDICTRANS2_MODEL: &str = "ai4bharat/indictrans2-en-indic-1B";
pub const NLLB_MODEL: &str = "facebook/nllb-200-distilled-600M";

// FLORES-200 codes shared by IndicTrans2 and NLLB.
const SOURCE_LANG: &str = "eng_Latn";
const TARGET_LANG: &str = "hin_Deva";

/// A translation model served by the HuggingFace Inference API.
pub struct HuggingFaceTranslationBackend {
    client: Client,
    api_key: String,
    model: &'static str,
    name: &'static str,
    method: TranslationMethod,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct HfTranslation {
    translation_text: String,
}

impl HuggingFaceTranslationBackend {
    pub fn indictrans2(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            model: INDICTRANS2_MODEL,
            name: "indictrans2",
            method: TranslationMethod::IndicTrans2,
            base_url: HUGGINGFACE_INFERENCE_URL.to_string(),
        }
    }

    pub fn nllb(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            model: NLLB_MODEL,
            name: "nllb",
            method: TranslationMethod::Nllb,
            base_url: HUGGINGFACE_INFERENCE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TranslationBackend for HuggingFaceTranslationBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn method(&self) -> TranslationMethod {
        self.method
    }

    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .bearer_auth(&self.api_key)
            .json(&json!({
                "inputs": text,
                "parameters": {
                    "src_lang": SOURCE_LANG,
                    "tgt_lang": TARGET_LANG
                }
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranslationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let translations: Vec<HfTranslation> = response.json().await?;
        translations
            .into_iter()
            .next()
            .map(|t| t.translation_text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or(TranslationError::EmptyContent)
    }
}

/// Google Cloud Translation v2 (API-key auth).
pub struct GoogleTranslateBackend {
    client: Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    data: GoogleData,
}

#[derive(Debug, Deserialize)]
struct GoogleData {
    translations: Vec<GoogleTranslation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleTranslation {
    translated_text: String,
}

impl GoogleTranslateBackend {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            base_url: GOOGLE_TRANSLATE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslateBackend {
    fn name(&self) -> &'static str {
        "google"
    }

    fn method(&self) -> TranslationMethod {
        TranslationMethod::Google
    }

    async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let response = self
            .client
            .post(format!("{}/language/translate/v2", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&json!({
                "q": text,
                "source": "en",
                "target": "hi",
                "format": "text"
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TranslationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GoogleResponse = response.json().await?;
        body.data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or(TranslationError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_huggingface_backend_parses_translation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/models/{NLLB_MODEL}")))
            .and(header("authorization", "Bearer hf-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "translation_text": " प्रिय रितिका " }])),
            )
            .mount(&server)
            .await;

        let backend = HuggingFaceTranslationBackend::nllb(Client::new(), "hf-key".to_string())
            .with_base_url(server.uri());

        assert_eq!(backend.translate("Dear Ritika").await.unwrap(), "प्रिय रितिका");
    }

    #[tokio::test]
    async fn test_huggingface_backend_surfaces_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
            .mount(&server)
            .await;

        let backend = HuggingFaceTranslationBackend::indictrans2(Client::new(), "k".to_string())
            .with_base_url(server.uri());

        match backend.translate("Hello").await {
            Err(TranslationError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "model loading");
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_google_backend_parses_translation() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/language/translate/v2"))
            .and(query_param("key", "g-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "translations": [{ "translatedText": "नमस्ते" }] }
            })))
            .mount(&server)
            .await;

        let backend =
            GoogleTranslateBackend::new(Client::new(), "g-key".to_string()).with_base_url(server.uri());

        assert_eq!(backend.translate("Hello").await.unwrap(), "नमस्ते");
    }

    #[tokio::test]
    async fn test_google_backend_empty_list_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "translations": [] } })),
            )
            .mount(&server)
            .await;

        let backend =
            GoogleTranslateBackend::new(Client::new(), "g-key".to_string()).with_base_url(server.uri());

        assert!(matches!(
            backend.translate("Hello").await,
            Err(TranslationError::EmptyContent)
        ));
    }
}
