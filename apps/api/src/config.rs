use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, ensure, Context, Result};

/// Which `Generator` implementation the service wires into `AppState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorBackend {
    /// Deterministic template text after a fixed delay.
    Template,
    /// Hosted LLM via `LlmClient`.
    Llm,
}

impl FromStr for GeneratorBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "template" => Ok(GeneratorBackend::Template),
            "llm" => Ok(GeneratorBackend::Llm),
            other => Err(anyhow!(
                "GENERATOR_BACKEND must be 'template' or 'llm', got '{other}'"
            )),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// The single front-end origin allowed through CORS.
    pub cors_origin: String,
    pub generator_backend: GeneratorBackend,
    pub anthropic_api_key: Option<String>,
    /// Artificial latency of the template generator.
    pub generation_delay: Duration,
    /// Upper bound on a single generator call.
    pub generation_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let generator_backend: GeneratorBackend =
            env_or("GENERATOR_BACKEND", "template").parse()?;
        let anthropic_api_key = std::env::var("ANTHROPIC_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        if generator_backend == GeneratorBackend::Llm && anthropic_api_key.is_none() {
            return Err(anyhow!(
                "ANTHROPIC_API_KEY must be set when GENERATOR_BACKEND=llm"
            ));
        }

        Ok(Config {
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:5173"),
            generator_backend,
            anthropic_api_key,
            generation_delay: Duration::from_millis(
                env_or("GENERATION_DELAY_MS", "2000")
                    .parse::<u64>()
                    .context("GENERATION_DELAY_MS must be a non-negative integer")?,
            ),
            generation_timeout: parse_timeout_secs(&env_or("GENERATION_TIMEOUT_SECS", "30"))?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            rust_log: "info".to_string(),
            cors_origin: "http://localhost:5173".to_string(),
            generator_backend: GeneratorBackend::Template,
            anthropic_api_key: None,
            generation_delay: Duration::from_millis(2000),
            generation_timeout: Duration::from_secs(30),
        }
    }
}

/// A zero timeout would fail every generation, so it is refused at startup.
fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("GENERATION_TIMEOUT_SECS must be a positive integer")?;
    ensure!(secs > 0, "GENERATION_TIMEOUT_SECS must be greater than 0");
    Ok(Duration::from_secs(secs))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
