use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::hashing::audit_fingerprint;
use crate::models::reason_code::ReasonCode;

/// One record per successful generation. Immutable once built.
#[derive(Debug, Clone, Serialize)]
pub struct AuditLog {
    pub timestamp: DateTime<Utc>,
    pub user_id: String,
    /// 16-char fingerprint of the proposal text, not the upload digest.
    pub proposal_hash: String,
    pub reason_code: ReasonCode,
    pub internal_rationale: String,
}

impl AuditLog {
    pub fn new(
        user_id: &str,
        proposal_text: &str,
        reason_code: ReasonCode,
        internal_rationale: &str,
    ) -> Self {
        AuditLog {
            timestamp: Utc::now(),
            user_id: user_id.to_string(),
            proposal_hash: audit_fingerprint(proposal_text),
            reason_code,
            internal_rationale: internal_rationale.to_string(),
        }
    }
}
