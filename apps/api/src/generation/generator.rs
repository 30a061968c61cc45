//! Decline text generation — pluggable, trait-based producer of the internal
//! rationale and the external reply.
//!
//! Default: `TemplateGenerator` (deterministic text after a fixed delay that
//! stands in for provider latency).
//! Optional: `LlmGenerator` (hosted model via `LlmClient`).
//!
//! `AppState` holds an `Arc<dyn Generator>`, chosen at startup via config.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::generation::prompts::{
    fill_placeholders, EXTERNAL_REPLY_TEMPLATE, GENERATION_PROMPT_TEMPLATE, GENERATION_SYSTEM,
    INTERNAL_RATIONALE_TEMPLATE,
};
use crate::llm_client::prompts::GROUNDING_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::reason_code::ReasonCode;

// ────────────────────────────────────────────────────────────────────────────
// Output model (shared across all generator backends)
// ────────────────────────────────────────────────────────────────────────────

/// The two texts produced per call. Both are non-empty on success.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedText {
    pub internal_rationale: String,
    pub external_reply: String,
}

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("generator returned an empty {0}")]
    EmptyOutput(&'static str),
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap backends without touching the handler.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        proposal_text: &str,
        reason_code: ReasonCode,
        staff_note: &str,
    ) -> Result<GeneratedText, GeneratorError>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// TemplateGenerator — default
// ────────────────────────────────────────────────────────────────────────────

pub struct TemplateGenerator {
    delay: Duration,
}

impl TemplateGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Generator for TemplateGenerator {
    async fn generate(
        &self,
        _proposal_text: &str,
        reason_code: ReasonCode,
        staff_note: &str,
    ) -> Result<GeneratedText, GeneratorError> {
        tokio::time::sleep(self.delay).await;
        Ok(render_templates(reason_code, staff_note))
    }

    fn backend(&self) -> &'static str {
        "template"
    }
}

/// Fills both templates. The label is upper-cased in the internal text and
/// lower-cased in the external one.
pub fn render_templates(reason_code: ReasonCode, staff_note: &str) -> GeneratedText {
    let label = reason_code.label();

    let internal_rationale = fill_placeholders(
        INTERNAL_RATIONALE_TEMPLATE,
        &[
            ("reason_heading", &label.to_uppercase()),
            ("staff_note", staff_note),
        ],
    )
    .trim()
    .to_string();

    let external_reply = fill_placeholders(
        EXTERNAL_REPLY_TEMPLATE,
        &[("reason_phrase", &label.to_lowercase())],
    )
    .trim()
    .to_string();

    GeneratedText {
        internal_rationale,
        external_reply,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LlmGenerator — hosted model
// ────────────────────────────────────────────────────────────────────────────

/// Single-attempt generation through the shared `LlmClient`.
pub struct LlmGenerator(pub LlmClient);

#[async_trait]
impl Generator for LlmGenerator {
    async fn generate(
        &self,
        proposal_text: &str,
        reason_code: ReasonCode,
        staff_note: &str,
    ) -> Result<GeneratedText, GeneratorError> {
        let prompt = build_generation_prompt(proposal_text, reason_code, staff_note);
        let generated: GeneratedText = self.0.complete_json(&prompt, GENERATION_SYSTEM).await?;
        normalize_llm_output(generated, reason_code)
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

fn build_generation_prompt(proposal_text: &str, reason_code: ReasonCode, staff_note: &str) -> String {
    fill_placeholders(
        GENERATION_PROMPT_TEMPLATE,
        &[
            ("grounding_instruction", GROUNDING_INSTRUCTION),
            ("reason_label", reason_code.label()),
            ("staff_note", staff_note),
            ("proposal_text", proposal_text),
        ],
    )
}

/// Rejects empty fields and guarantees the internal rationale carries the
/// upper-cased reason heading.
fn normalize_llm_output(
    generated: GeneratedText,
    reason_code: ReasonCode,
) -> Result<GeneratedText, GeneratorError> {
    let internal = generated.internal_rationale.trim();
    let external = generated.external_reply.trim();

    if internal.is_empty() {
        return Err(GeneratorError::EmptyOutput("internal_rationale"));
    }
    if external.is_empty() {
        return Err(GeneratorError::EmptyOutput("external_reply"));
    }

    let heading = reason_code.label().to_uppercase();
    let internal_rationale = if internal.contains(&heading) {
        internal.to_string()
    } else {
        format!("{heading}\n\n{internal}")
    };

    Ok(GeneratedText {
        internal_rationale,
        external_reply: external.to_string(),
    })
}
