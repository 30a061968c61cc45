use serde::{Deserialize, Serialize};

use crate::models::reason_code::ReasonCode;

/// Request body for `POST /generate`. All fields required.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub reason_code: ReasonCode,
    pub staff_note: String,
    pub proposal_text: String,
}

/// Response body for `POST /generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedOutput {
    pub internal_rationale: String,
    pub external_reply: String,
    pub generation_time_ms: u64,
}
