// Text templates for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Internal rationale template.
/// Placeholders: {reason_heading}, {staff_note}
pub const INTERNAL_RATIONALE_TEMPLATE: &str = "{reason_heading}

Based on our review of the submitted proposal, we have determined that this request does not align with our current funding priorities. {staff_note}

The proposal requests funding for activities that fall outside our approved guidelines for this funding cycle. While the organization demonstrates good intentions, the specific program design and implementation approach do not meet our established criteria for impact and sustainability.

We appreciate the time and effort invested in preparing this submission and encourage the organization to consider revising their approach for future opportunities.";

/// External decline letter template.
/// Placeholders: {reason_phrase}
pub const EXTERNAL_REPLY_TEMPLATE: &str = "Thank you for your proposal submission to The New York Community Trust. We appreciate your organization's commitment to serving the community and the time you invested in preparing your application.

After careful review, we have determined that we will not be able to provide funding for this request at this time. {reason_phrase} proposals are not within our current funding priorities for this cycle.

We encourage you to review our funding guidelines on our website and consider applying for future opportunities that may be a better fit for your organization's work. We value your partnership in strengthening our community.";

/// System prompt for decline-letter generation.
pub const GENERATION_SYSTEM: &str = "You are a grants officer at The New York Community Trust \
    drafting decline correspondence. You write one concise internal rationale for the file \
    and one courteous external letter to the applicant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Generation prompt template.
/// Placeholders: {grounding_instruction}, {reason_label}, {staff_note}, {proposal_text}
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"{grounding_instruction}

DECLINE REASON: {reason_label}

STAFF NOTE (internal, may be referenced in the rationale, never quoted to the applicant):
{staff_note}

PROPOSAL EXCERPT:
{proposal_text}

Return a JSON object with this EXACT schema (no extra fields):
{
  "internal_rationale": "...",
  "external_reply": "..."
}

HARD RULES:
1. `internal_rationale` starts with the decline reason in UPPER CASE on its own line, then 2-3 short paragraphs
2. `internal_rationale` incorporates the staff note
3. `external_reply` names the decline reason in lower case and states clearly that the request will not be funded
4. `external_reply` thanks the applicant and encourages future applications where appropriate
5. Neither field may be empty"#;

/// Replaces each `{name}` in `template` with its value in one left-to-right
/// pass. Substituted text is never re-scanned, and braces that do not form a
/// known placeholder are copied through unchanged.
pub fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];
        let hit = tail.find('}').and_then(|close| {
            let name = &tail[..close];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (close, *value))
        });
        match hit {
            Some((close, value)) => {
                out.push_str(value);
                rest = &tail[close + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_placeholders_substitutes_known_names() {
        let out = fill_placeholders("{a} and {b}", &[("a", "one"), ("b", "two")]);
        assert_eq!(out, "one and two");
    }

    #[test]
    fn test_fill_placeholders_does_not_rescan_values() {
        let out = fill_placeholders("{a}|{b}", &[("a", "{b}"), ("b", "{a}")]);
        assert_eq!(out, "{b}|{a}");
    }

    #[test]
    fn test_fill_placeholders_keeps_unknown_and_literal_braces() {
        let out = fill_placeholders("{\n  \"x\": {y} {z", &[("y", "1")]);
        assert_eq!(out, "{\n  \"x\": 1 {z");
    }

    #[test]
    fn test_generation_template_keeps_its_json_schema_braces() {
        let out = fill_placeholders(GENERATION_PROMPT_TEMPLATE, &[]);
        assert!(out.contains("{\n  \"internal_rationale\": \"...\","));
    }
}
