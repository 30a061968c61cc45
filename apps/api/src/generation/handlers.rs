//! Axum route handler for the Generation API.

use std::time::Duration;

use axum::{extract::State, Json};
use tokio::time::Instant;
use tracing::info;

use crate::audit::AuditSink;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::generation::generator::Generator;
use crate::models::audit::AuditLog;
use crate::models::generation::{GenerateRequest, GeneratedOutput};
use crate::models::user::CurrentUser;
use crate::state::AppState;

/// POST /generate
///
/// Produces the internal rationale and external reply, records an audit entry,
/// and reports how long the generator took.
pub async fn handle_generate(
    State(state): State<AppState>,
    user: CurrentUser,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<Json<GeneratedOutput>, AppError> {
    let output = run_generation(
        state.generator.as_ref(),
        state.audit.as_ref(),
        state.config.generation_timeout,
        &user,
        request,
    )
    .await?;
    Ok(Json(output))
}

/// Steps:
/// 1. start the clock
/// 2. generator.generate() bounded by `timeout`
/// 3. elapsed milliseconds, rounded down
/// 4. AuditLog with the 16-char proposal fingerprint
/// 5. audit.record()
pub async fn run_generation(
    generator: &dyn Generator,
    audit: &dyn AuditSink,
    timeout: Duration,
    user: &CurrentUser,
    request: GenerateRequest,
) -> Result<GeneratedOutput, AppError> {
    let start = Instant::now();

    let generated = tokio::time::timeout(
        timeout,
        generator.generate(&request.proposal_text, request.reason_code, &request.staff_note),
    )
    .await
    .map_err(|_| {
        AppError::Generation(format!(
            "{} generator timed out after {}ms",
            generator.backend(),
            timeout.as_millis()
        ))
    })?
    .map_err(|e| AppError::Generation(format!("{} generator failed: {e}", generator.backend())))?;

    let generation_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    let entry = AuditLog::new(
        &user.user_id,
        &request.proposal_text,
        request.reason_code,
        &generated.internal_rationale,
    );
    audit
        .record(entry)
        .await
        .map_err(|e| AppError::Generation(format!("audit record failed: {e:#}")))?;

    info!(
        "Generated decline for {} ({}, {}) in {}ms via {}",
        request.reason_code,
        user.user_id,
        user.role,
        generation_time_ms,
        generator.backend()
    );

    Ok(GeneratedOutput {
        internal_rationale: generated.internal_rationale,
        external_reply: generated.external_reply,
        generation_time_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::generator::{GeneratedText, GeneratorError, TemplateGenerator};
    use crate::hashing::audit_fingerprint;
    use crate::llm_client::LlmError;
    use crate::models::reason_code::ReasonCode;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingAuditSink {
        entries: Mutex<Vec<AuditLog>>,
    }

    #[async_trait]
    impl AuditSink for RecordingAuditSink {
        async fn record(&self, entry: AuditLog) -> anyhow::Result<()> {
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }
    }

    struct FailingAuditSink;

    #[async_trait]
    impl AuditSink for FailingAuditSink {
        async fn record(&self, _entry: AuditLog) -> anyhow::Result<()> {
            Err(anyhow!("audit table unavailable"))
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl Generator for FailingGenerator {
        async fn generate(
            &self,
            _proposal_text: &str,
            _reason_code: ReasonCode,
            _staff_note: &str,
        ) -> Result<GeneratedText, GeneratorError> {
            Err(GeneratorError::Llm(LlmError::EmptyContent))
        }

        fn backend(&self) -> &'static str {
            "failing"
        }
    }

    fn capital_request() -> GenerateRequest {
        GenerateRequest {
            reason_code: ReasonCode::Capital,
            staff_note: "see attached memo".to_string(),
            proposal_text: "We request $50,000 for renovation.".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_capital_scenario_produces_both_texts_and_timing() {
        let generator = TemplateGenerator::new(Duration::from_secs(2));
        let audit = RecordingAuditSink::default();

        let output = run_generation(
            &generator,
            &audit,
            Duration::from_secs(30),
            &CurrentUser::demo(),
            capital_request(),
        )
        .await
        .unwrap();

        assert!(output.internal_rationale.contains("CAPITAL"));
        assert!(output.internal_rationale.contains("see attached memo"));
        assert!(output.external_reply.contains("capital"));
        assert!(output
            .external_reply
            .contains("will not be able to provide funding"));
        assert!(output.generation_time_ms >= 2000);
    }

    #[tokio::test]
    async fn test_records_one_audit_entry_per_generation() {
        let generator = TemplateGenerator::new(Duration::ZERO);
        let audit = RecordingAuditSink::default();
        let request = capital_request();
        let expected_hash = audit_fingerprint(&request.proposal_text);

        let output = run_generation(
            &generator,
            &audit,
            Duration::from_secs(30),
            &CurrentUser::demo(),
            request,
        )
        .await
        .unwrap();

        let entries = audit.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user_id, "demo_user");
        assert_eq!(entries[0].proposal_hash, expected_hash);
        assert_eq!(entries[0].reason_code, ReasonCode::Capital);
        assert_eq!(entries[0].internal_rationale, output.internal_rationale);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_generator_times_out_without_audit() {
        let generator = TemplateGenerator::new(Duration::from_secs(60));
        let audit = RecordingAuditSink::default();

        let err = run_generation(
            &generator,
            &audit,
            Duration::from_secs(1),
            &CurrentUser::demo(),
            capital_request(),
        )
        .await
        .unwrap_err();

        match err {
            AppError::Generation(detail) => assert!(detail.contains("timed out")),
            other => panic!("expected generation error, got {other:?}"),
        }
        assert!(audit.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generator_failure_maps_to_generation_error() {
        let audit = RecordingAuditSink::default();

        let err = run_generation(
            &FailingGenerator,
            &audit,
            Duration::from_secs(30),
            &CurrentUser::demo(),
            capital_request(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::Generation(_)));
        assert!(audit.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_audit_failure_fails_the_request() {
        let generator = TemplateGenerator::new(Duration::ZERO);

        let err = run_generation(
            &generator,
            &FailingAuditSink,
            Duration::from_secs(30),
            &CurrentUser::demo(),
            capital_request(),
        )
        .await
        .unwrap_err();

        match err {
            AppError::Generation(detail) => assert!(detail.contains("audit table unavailable")),
            other => panic!("expected generation error, got {other:?}"),
        }
    }
}
