use std::sync::Arc;

use anyhow::Result;

use crate::audit::{AuditSink, TracingAuditSink};
use crate::config::{Config, GeneratorBackend};
use crate::generation::generator::{Generator, LlmGenerator, TemplateGenerator};
use crate::llm_client::LlmClient;
use crate::upload::extractor::{MockExtractor, TextExtractor};

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup; every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable document-to-text backend. Default: MockExtractor.
    pub extractor: Arc<dyn TextExtractor>,
    /// Pluggable decline text backend. Swap via GENERATOR_BACKEND.
    pub generator: Arc<dyn Generator>,
    /// Where audit records go. Default: structured log line.
    pub audit: Arc<dyn AuditSink>,
}

impl AppState {
    /// Wires the default collaborators and the configured generator backend.
    pub fn from_config(config: Config) -> Result<Self> {
        let generator: Arc<dyn Generator> = match config.generator_backend {
            GeneratorBackend::Template => Arc::new(TemplateGenerator::new(config.generation_delay)),
            GeneratorBackend::Llm => {
                let api_key = config.anthropic_api_key.clone().unwrap_or_default();
                Arc::new(LlmGenerator(LlmClient::new(api_key)?))
            }
        };

        Ok(AppState {
            config,
            extractor: Arc::new(MockExtractor),
            generator,
            audit: Arc::new(TracingAuditSink),
        })
    }
}
