use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::translation::TranslationMethod;

/// Application configuration loaded from environment variables.
/// Every setting has a default; startup fails only on malformed values.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,

    /// "auto" or a specific provider name ("gemini", "huggingface", "openai", "mock").
    pub llm_provider: String,
    pub auto_select_llm: bool,

    pub gemini: ProviderConfig,
    pub huggingface: ProviderConfig,
    pub openai: ProviderConfig,

    pub enable_cache: bool,
    pub cache_ttl: Duration,
    pub cache_backend: CacheBackend,
    pub redis_url: Option<String>,

    pub enable_translation: bool,
    pub translation_method: TranslationMethod,
    pub google_translate_api_key: Option<String>,
    /// Deadline for each translation backend call.
    pub translation_timeout: Duration,

    pub enable_vector_store: bool,
    pub enable_user_profiles: bool,
}

/// Credential, model and deadline for one generation provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheBackend {
    Memory,
    Redis,
}

impl FromStr for CacheBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(CacheBackend::Memory),
            "redis" => Ok(CacheBackend::Redis),
            other => bail!("unknown cache backend '{other}' (expected 'memory' or 'redis')"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let default_timeout = parse_env::<u64>("LLM_TIMEOUT", 30)?;

        let config = Config {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_provider: std::env::var("LLM_PROVIDER")
                .map(|p| p.trim().to_ascii_lowercase())
                .unwrap_or_else(|_| "auto".to_string()),
            auto_select_llm: parse_bool_env("AUTO_SELECT_LLM", true)?,
            gemini: ProviderConfig {
                api_key: optional_env("GEMINI_API_KEY"),
                model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-pro".to_string()),
                timeout: Duration::from_secs(parse_env("GEMINI_TIMEOUT", default_timeout)?),
            },
            huggingface: ProviderConfig {
                api_key: optional_env("HUGGINGFACE_API_KEY"),
                model: std::env::var("HUGGINGFACE_MODEL")
                    .unwrap_or_else(|_| "mistralai/Mistral-7B-Instruct-v0.1".to_string()),
                timeout: Duration::from_secs(parse_env("HUGGINGFACE_TIMEOUT", default_timeout)?),
            },
            openai: ProviderConfig {
                api_key: optional_env("OPENAI_API_KEY"),
                model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
                timeout: Duration::from_secs(parse_env("OPENAI_TIMEOUT", default_timeout)?),
            },
            enable_cache: parse_bool_env("ENABLE_CACHE", true)?,
            cache_ttl: Duration::from_secs(parse_env("CACHE_TTL", 3600)?),
            cache_backend: parse_env("CACHE_BACKEND", CacheBackend::Memory)?,
            redis_url: optional_env("REDIS_URL"),
            enable_translation: parse_bool_env("ENABLE_TRANSLATION", true)?,
            translation_method: parse_env("TRANSLATION_METHOD", TranslationMethod::Auto)?,
            google_translate_api_key: optional_env("GOOGLE_TRANSLATE_API_KEY"),
            translation_timeout: Duration::from_secs(parse_env(
                "TRANSLATION_TIMEOUT",
                default_timeout,
            )?),
            enable_vector_store: parse_bool_env("ENABLE_VECTOR_STORE", false)?,
            enable_user_profiles: parse_bool_env("ENABLE_USER_PROFILES", false)?,
        };

        if config.enable_cache
            && config.cache_backend == CacheBackend::Redis
            && config.redis_url.is_none()
        {
            bail!("CACHE_BACKEND=redis requires REDIS_URL to be set");
        }

        Ok(config)
    }

    /// Auto mode runs the provider cascade. It is on when the provider is
    /// "auto" or when AUTO_SELECT_LLM is set, whatever provider is named.
    pub fn auto_select(&self) -> bool {
        self.llm_provider == "auto" || self.auto_select_llm
    }
}

impl Default for Config {
    fn default() -> Self {
        let provider = |model: &str| ProviderConfig {
            api_key: None,
            model: model.to_string(),
            timeout: Duration::from_secs(30),
        };

        Config {
            host: "0.0.0.0".to_string(),
            port: 8000,
            rust_log: "info".to_string(),
            llm_provider: "auto".to_string(),
            auto_select_llm: true,
            gemini: provider("gemini-pro"),
            huggingface: provider("mistralai/Mistral-7B-Instruct-v0.1"),
            openai: provider("gpt-3.5-turbo"),
            enable_cache: true,
            cache_ttl: Duration::from_secs(3600),
            cache_backend: CacheBackend::Memory,
            redis_url: None,
            enable_translation: true,
            translation_method: TranslationMethod::Auto,
            google_translate_api_key: None,
            translation_timeout: Duration::from_secs(30),
            enable_vector_store: false,
            enable_user_profiles: false,
        }
    }
}

/// Returns `None` for unset or blank variables so empty keys in `.env` count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

fn parse_bool_env(key: &str, default: bool) -> Result<bool> {
    match optional_env(key) {
        Some(raw) => parse_bool(&raw)
            .with_context(|| format!("Environment variable '{key}' must be true or false")),
        None => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => bail!("'{other}' is not a boolean"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("True").unwrap());
        assert!(parse_bool("1").unwrap());
        assert!(!parse_bool("FALSE").unwrap());
        assert!(!parse_bool("off").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_cache_backend_from_str() {
        assert_eq!("memory".parse::<CacheBackend>().unwrap(), CacheBackend::Memory);
        assert_eq!(" Redis ".parse::<CacheBackend>().unwrap(), CacheBackend::Redis);
        assert!("sqlite".parse::<CacheBackend>().is_err());
    }

    #[test]
    fn test_default_config_is_auto_with_no_credentials() {
        let config = Config::default();
        assert!(config.auto_select());
        assert!(config.gemini.api_key.is_none());
        assert!(config.huggingface.api_key.is_none());
        assert!(config.openai.api_key.is_none());
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.translation_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_specific_provider_requires_auto_select_off() {
        let mut config = Config {
            llm_provider: "openai".to_string(),
            ..Config::default()
        };
        assert!(config.auto_select(), "AUTO_SELECT_LLM=true keeps the cascade on");

        config.auto_select_llm = false;
        assert!(!config.auto_select());
    }
}
