// Decline generation: internal rationale + external reply, timing, audit.
// All LLM calls go through llm_client — no direct provider calls here.

pub mod generator;
pub mod handlers;
pub mod prompts;
