// Insight generation engine.
// Implements: prompt building, provider fallback, template generation, scoring.
// All provider calls go through llm_client; no HTTP in this module.

pub mod generator;
pub mod handlers;
pub mod mock;
pub mod prompts;
pub mod scoring;
