//! LLM prompts for classification and insight synthesis.
//!
//! Both prompts ask for JSON only; replies still go through
//! [`crate::pipeline::json::extract_json_payload`] because models add fences
//! regardless.

use crate::types::comment::CommentItem;
use crate::types::sentiment::{PartitionedItems, SentimentLabel};

/// Prompt for classifying a batch of comments.
pub const CLASSIFY_PROMPT: &str = r#"Classify the sentiment of each YouTube comment below.

Labels:
- positive: praise, agreement, gratitude, enjoyment, recommendation
- negative: complaints, criticism, disappointment, dislike
- neutral: questions, factual remarks, timestamps, anything else

Output a JSON array with one object per comment:
[
    {
        "commentId": "the ID shown in brackets",
        "sentiment": "positive" | "negative" | "neutral",
        "confidence": 0.0 to 1.0
    }
]

Use each ID exactly as given. Do not invent IDs.

Comments:
{comments}

Respond with JSON only. No explanation."#;

/// Prompt for summarizing every partition in one request.
pub const INSIGHT_PROMPT: &str = r#"Analyze these YouTube comments, grouped by sentiment.

For each group, provide:
- summary: 2-3 sentence overview of what commenters say
- keyPoints: 3-5 short key points
- insights: 2-3 sentences of takeaways for the video creator

Output JSON:
{
    "positive": { "summary": "...", "keyPoints": ["..."], "insights": "..." },
    "negative": { "summary": "...", "keyPoints": ["..."], "insights": "..." },
    "neutral": { "summary": "...", "keyPoints": ["..."], "insights": "..." }
}

If a group has no comments, say so in its summary and leave keyPoints empty.

{groups}

Respond with JSON only. No explanation."#;

/// Marker shown for an empty group.
const EMPTY_GROUP: &str = "(none)";

/// Format the classification prompt for one batch.
///
/// Each comment is one line: `N. [ID: <id>] <text>`, numbered from 1.
pub fn format_classify_prompt(batch: &[CommentItem]) -> String {
    let comments = batch
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. [ID: {}] {}", i + 1, item.id, item.single_line_text()))
        .collect::<Vec<_>>()
        .join("\n");

    CLASSIFY_PROMPT.replace("{comments}", &comments)
}

/// Format the insight prompt over all three partitions.
pub fn format_insight_prompt(partitions: &PartitionedItems) -> String {
    let groups = SentimentLabel::ALL
        .iter()
        .map(|&label| format_group(label, partitions.get(label)))
        .collect::<Vec<_>>()
        .join("\n\n");

    INSIGHT_PROMPT.replace("{groups}", &groups)
}

fn format_group(label: SentimentLabel, items: &[CommentItem]) -> String {
    let body = if items.is_empty() {
        EMPTY_GROUP.to_string()
    } else {
        items
            .iter()
            .map(|item| format!("- {}", item.single_line_text()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    format!("{} comments ({}):\n{}", title_case(label), items.len(), body)
}

fn title_case(label: SentimentLabel) -> &'static str {
    match label {
        SentimentLabel::Positive => "Positive",
        SentimentLabel::Negative => "Negative",
        SentimentLabel::Neutral => "Neutral",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: &str, text: &str) -> CommentItem {
        CommentItem::new(id, "author", text, 0, Utc::now())
    }

    #[test]
    fn test_classify_prompt_enumerates_ids() {
        let prompt = format_classify_prompt(&[item("a1", "love it"), item("b2", "two\nlines")]);

        assert!(prompt.contains("1. [ID: a1] love it"));
        assert!(prompt.contains("2. [ID: b2] two lines"));
        assert!(!prompt.contains("{comments}"));
    }

    #[test]
    fn test_comment_text_is_not_reinterpolated() {
        let prompt = format_classify_prompt(&[item("a1", "{comments}")]);
        assert!(prompt.contains("[ID: a1] {comments}"));
    }

    #[test]
    fn test_insight_prompt_lists_every_group() {
        let mut partitions = PartitionedItems::new();
        partitions.push(SentimentLabel::Positive, item("a", "great"));
        partitions.push(SentimentLabel::Positive, item("b", "superb"));

        let prompt = format_insight_prompt(&partitions);

        assert!(prompt.contains("Positive comments (2):\n- great\n- superb"));
        assert!(prompt.contains("Negative comments (0):\n(none)"));
        assert!(prompt.contains("Neutral comments (0):\n(none)"));
    }
}
