//! Defensive JSON extraction from model replies.
//!
//! Models often wrap JSON in markdown fences or add a sentence around it.
//! [`extract_json_payload`] only normalizes text; schema checks happen in the
//! callers so they can be tested against fenced and unfenced replies alike.

use serde::de::DeserializeOwned;

const FENCE: &str = "```";

/// Return the JSON-looking part of a model reply.
///
/// 1. Trim whitespace.
/// 2. If a fenced block is present, take its body (dropping a language tag
///    such as `json`). A missing closing fence takes the rest of the text.
/// 3. If the result still does not start with `{` or `[`, slice from the
///    first opening bracket to the last closing one.
pub fn extract_json_payload(text: &str) -> &str {
    let trimmed = text.trim();
    let unfenced = strip_code_fence(trimmed);
    slice_to_brackets(unfenced)
}

/// Extract the payload and deserialize it.
pub fn parse_json_payload<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(extract_json_payload(text))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(start) = text.find(FENCE) else {
        return text;
    };
    let after = &text[start + FENCE.len()..];

    // Language tag runs to the end of the opening line
    let body = match after.find('\n') {
        Some(nl) if is_language_tag(&after[..nl]) => &after[nl + 1..],
        Some(_) => after,
        None => after
            .strip_prefix("json")
            .or_else(|| after.strip_prefix("JSON"))
            .unwrap_or(after),
    };

    match body.find(FENCE) {
        Some(end) => body[..end].trim(),
        None => body.trim(),
    }
}

fn is_language_tag(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn slice_to_brackets(text: &str) -> &str {
    if text.starts_with('{') || text.starts_with('[') {
        return text;
    }
    let start = text.find(['{', '[']);
    let end = text.rfind(['}', ']']);
    match (start, end) {
        (Some(s), Some(e)) if s < e => &text[s..=e],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfenced_passthrough() {
        assert_eq!(extract_json_payload("  [1, 2]\n"), "[1, 2]");
        assert_eq!(extract_json_payload("{}"), "{}");
    }

    #[test]
    fn test_json_fence() {
        assert_eq!(extract_json_payload("```json\n[{\"a\":1}]\n```"), "[{\"a\":1}]");
    }

    #[test]
    fn test_bare_fence() {
        assert_eq!(extract_json_payload("```\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_single_line_fence() {
        assert_eq!(extract_json_payload("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(extract_json_payload("```[1]```"), "[1]");
    }

    #[test]
    fn test_fence_with_surrounding_prose() {
        let reply = "Here is the result:\n```json\n[1, 2, 3]\n```\nLet me know if you need more.";
        assert_eq!(extract_json_payload(reply), "[1, 2, 3]");
    }

    #[test]
    fn test_unterminated_fence() {
        assert_eq!(extract_json_payload("```json\n{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_prose_without_fence() {
        assert_eq!(extract_json_payload("Sure! {\"a\": [1]} Hope that helps."), "{\"a\": [1]}");
    }

    #[test]
    fn test_garbage_is_returned_trimmed() {
        assert_eq!(extract_json_payload("  no json here "), "no json here");
    }

    #[test]
    fn test_parse_json_payload() {
        let parsed: Vec<u32> = parse_json_payload("```json\n[1, 2]\n```").unwrap();
        assert_eq!(parsed, vec![1, 2]);
        assert!(parse_json_payload::<Vec<u32>>("not json").is_err());
    }
}
