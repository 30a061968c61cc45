//! Audit trail for generations.
//!
//! `AppState` holds an `Arc<dyn AuditSink>`. The default sink writes a
//! structured `tracing` event on target `audit`; a durable store only needs to
//! implement `record`.

use async_trait::async_trait;
use tracing::info;

use crate::models::audit::AuditLog;

#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: AuditLog) -> anyhow::Result<()>;
}

/// Log-only sink. Never fails.
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, entry: AuditLog) -> anyhow::Result<()> {
        info!(
            target: "audit",
            timestamp = %entry.timestamp.to_rfc3339(),
            user_id = %entry.user_id,
            proposal_hash = %entry.proposal_hash,
            reason_code = %entry.reason_code,
            internal_rationale = %entry.internal_rationale,
            "Audit log"
        );
        Ok(())
    }
}
