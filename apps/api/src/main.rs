mod cache;
mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod profiles;
mod retrieval;
mod routes;
mod state;
mod translation;
mod zodiac;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use reqwest::Client;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::{InMemoryInsightCache, InsightCache, RedisInsightCache};
use crate::config::{CacheBackend, Config};
use crate::generation::generator::{InsightGenerator, ProviderMode};
use crate::llm_client::{GeminiProvider, GenerationProvider, HuggingFaceProvider, OpenAiProvider};
use crate::profiles::InMemoryProfileStore;
use crate::retrieval::ContextRetriever;
use crate::routes::build_router;
use crate::state::AppState;
use crate::translation::{GoogleTranslateBackend, HuggingFaceTranslationBackend, Translator};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Astro Insight API v{}", env!("CARGO_PKG_VERSION"));

    let http = Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    // Initialize generation providers (priority order, credentialed only)
    let providers = build_providers(&config, &http);
    let mode = if config.auto_select() {
        ProviderMode::Auto
    } else {
        ProviderMode::Specific(config.llm_provider.clone())
    };

    let mut generator = InsightGenerator::new(providers, mode, build_translator(&config, &http));
    if config.enable_vector_store {
        generator = generator.with_retriever(ContextRetriever::default());
        info!("Context retrieval enabled");
    }
    info!(
        "Insight generator ready (mode: {}, providers: {:?})",
        if config.auto_select() { "auto" } else { config.llm_provider.as_str() },
        generator.provider_names()
    );

    // Initialize insight cache
    let cache = build_cache(&config)?;

    let state = AppState {
        config: config.clone(),
        generator: Arc::new(generator),
        cache,
        profiles: Arc::new(InMemoryProfileStore::new()),
    };
    if config.enable_user_profiles {
        info!("User profiles enabled");
    }

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", config.host, config.port))?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_providers(config: &Config, http: &Client) -> Vec<Arc<dyn GenerationProvider>> {
    let mut providers: Vec<Arc<dyn GenerationProvider>> = Vec::new();

    if let Some(key) = &config.gemini.api_key {
        providers.push(Arc::new(GeminiProvider::new(
            http.clone(),
            key.clone(),
            config.gemini.model.clone(),
            config.gemini.timeout,
        )));
    }
    if let Some(key) = &config.huggingface.api_key {
        providers.push(Arc::new(HuggingFaceProvider::new(
            http.clone(),
            key.clone(),
            config.huggingface.model.clone(),
            config.huggingface.timeout,
        )));
    }
    if let Some(key) = &config.openai.api_key {
        providers.push(Arc::new(OpenAiProvider::new(
            http.clone(),
            key.clone(),
            config.openai.model.clone(),
            config.openai.timeout,
        )));
    }

    providers
}

fn build_translator(config: &Config, http: &Client) -> Translator {
    let mut translator = Translator::new(config.enable_translation, config.translation_method)
        .with_timeout(config.translation_timeout);

    if let Some(key) = &config.huggingface.api_key {
        translator = translator
            .with_backend(Arc::new(HuggingFaceTranslationBackend::indictrans2(
                http.clone(),
                key.clone(),
            )))
            .with_backend(Arc::new(HuggingFaceTranslationBackend::nllb(
                http.clone(),
                key.clone(),
            )));
    }
    if let Some(key) = &config.google_translate_api_key {
        translator =
            translator.with_backend(Arc::new(GoogleTranslateBackend::new(http.clone(), key.clone())));
    }

    translator
}

fn build_cache(config: &Config) -> Result<Option<Arc<dyn InsightCache>>> {
    if !config.enable_cache {
        info!("Insight cache disabled");
        return Ok(None);
    }

    let cache: Arc<dyn InsightCache> = match config.cache_backend {
        CacheBackend::Memory => Arc::new(InMemoryInsightCache::new(config.cache_ttl)),
        CacheBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis cache backend")?;
            let client = redis::Client::open(url).context("Invalid REDIS_URL")?;
            info!("Redis cache client initialized");
            Arc::new(RedisInsightCache::new(client, config.cache_ttl))
        }
    };

    info!("Insight cache enabled (ttl: {:?})", config.cache_ttl);
    Ok(Some(cache))
}
