// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Keeps generated correspondence tied to what the caller supplied.
pub const GROUNDING_INSTRUCTION: &str = "\
    CRITICAL: Use only facts present in the proposal excerpt and the staff note. \
    Do NOT invent dollar amounts, program names, dates or people. \
    If the staff note is empty or uninformative, do not speculate beyond the decline reason.";
