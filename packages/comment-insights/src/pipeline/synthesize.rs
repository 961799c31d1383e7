//! Insight synthesis over the three partitions.
//!
//! Synthesis never fails outward. A reply that is not a JSON object, or that
//! omits a label, yields [`InsightSet::failed`]; a reply with missing or
//! mistyped fields is repaired field by field.

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::pipeline::json::extract_json_payload;
use crate::pipeline::prompts::format_insight_prompt;
use crate::throttle::Throttle;
use crate::traits::ai::AI;
use crate::types::report::{
    InsightFields, InsightSet, InsightSource, MISSING_INSIGHT, MISSING_SUMMARY,
};
use crate::types::sentiment::{PartitionedItems, SentimentLabel};

/// Produces a summary, key points and an insight per sentiment label.
pub struct InsightSynthesizer<A: AI> {
    ai: A,
    throttle: Throttle,
}

impl<A: AI> InsightSynthesizer<A> {
    pub fn new(ai: A) -> Self {
        Self {
            ai,
            throttle: Throttle::unlimited(),
        }
    }

    /// Share a throttle with other callers of the same model.
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    /// Synthesize insights for every label. Always returns a full set.
    pub async fn synthesize(&self, partitions: &PartitionedItems) -> InsightSet {
        self.throttle.until_ready().await;

        let prompt = format_insight_prompt(partitions);
        let reply = match self.ai.complete(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Insight request failed, using fallback insights");
                return InsightSet::failed();
            }
        };

        let insights = parse_insight_response(&reply);
        if insights.is_degraded() {
            warn!(
                positive = ?insights.positive.source,
                negative = ?insights.negative.source,
                neutral = ?insights.neutral.source,
                "Insight reply was incomplete"
            );
        } else {
            info!("Synthesized insights");
        }
        insights
    }
}

/// Turn a model reply into a complete [`InsightSet`].
///
/// A reply that does not parse, or that lacks an object for any label, gives
/// [`InsightSet::failed`] for every label. Otherwise each label is repaired
/// independently:
/// - `summary` and `insights` (or `insight`) must be non-empty strings
/// - `keyPoints` (or `key_points`) must be an array; non-string entries are dropped
///
/// Anything missing is back-filled and the label is marked
/// [`InsightSource::Repaired`].
pub fn parse_insight_response(text: &str) -> InsightSet {
    let map = match serde_json::from_str::<Value>(extract_json_payload(text)) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            warn!("Insight reply is not a JSON object");
            return InsightSet::failed();
        }
        Err(e) => {
            warn!(error = %e, "Insight reply is not valid JSON");
            return InsightSet::failed();
        }
    };

    let label_object = |label: SentimentLabel| map.get(label.as_str()).and_then(Value::as_object);
    let (Some(positive), Some(negative), Some(neutral)) = (
        label_object(SentimentLabel::Positive),
        label_object(SentimentLabel::Negative),
        label_object(SentimentLabel::Neutral),
    ) else {
        let missing: Vec<&str> = SentimentLabel::ALL
            .into_iter()
            .filter(|label| label_object(*label).is_none())
            .map(|label| label.as_str())
            .collect();
        warn!(?missing, "Insight reply has no object for some labels");
        return InsightSet::failed();
    };

    InsightSet {
        positive: repair_fields(positive),
        negative: repair_fields(negative),
        neutral: repair_fields(neutral),
    }
}

fn repair_fields(obj: &Map<String, Value>) -> InsightFields {
    let mut repaired = false;

    let summary = non_empty_str(obj.get("summary")).unwrap_or_else(|| {
        repaired = true;
        MISSING_SUMMARY.to_string()
    });

    let key_points = match obj.get("keyPoints").or_else(|| obj.get("key_points")) {
        Some(Value::Array(points)) => points
            .iter()
            .filter_map(|p| non_empty_str(Some(p)))
            .collect(),
        _ => {
            repaired = true;
            Vec::new()
        }
    };

    let insight = non_empty_str(obj.get("insights").or_else(|| obj.get("insight")))
        .unwrap_or_else(|| {
            repaired = true;
            MISSING_INSIGHT.to_string()
        });

    InsightFields {
        summary,
        key_points,
        insight,
        source: if repaired {
            InsightSource::Repaired
        } else {
            InsightSource::Generated
        },
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::report::{FAILED_INSIGHT, FAILED_SUMMARY};

    const FULL: &str = r#"{
        "positive": {"summary": "Viewers love it.", "keyPoints": ["editing", "music"], "insights": "Keep going."},
        "negative": {"summary": "Audio is quiet.", "keyPoints": ["audio"], "insights": "Fix levels."},
        "neutral": {"summary": "Questions about gear.", "keyPoints": [], "insights": "Add a gear list."}
    }"#;

    #[test]
    fn test_complete_reply() {
        let set = parse_insight_response(FULL);

        assert_eq!(set.positive.summary, "Viewers love it.");
        assert_eq!(set.positive.key_points, vec!["editing", "music"]);
        assert_eq!(set.negative.insight, "Fix levels.");
        assert!(set.neutral.key_points.is_empty());
        assert!(!set.is_degraded());
    }

    #[test]
    fn test_missing_key_points_keeps_other_fields() {
        let reply = r#"{
            "positive": {"summary": "Good.", "insights": "More please."},
            "negative": {"summary": "Bad.", "keyPoints": ["x"], "insights": "Less."},
            "neutral": {"summary": "Meh.", "keyPoints": [], "insight": "Fine."}
        }"#;
        let set = parse_insight_response(reply);

        assert_eq!(set.positive.summary, "Good.");
        assert_eq!(set.positive.insight, "More please.");
        assert!(set.positive.key_points.is_empty());
        assert_eq!(set.positive.source, InsightSource::Repaired);
        assert_eq!(set.neutral.insight, "Fine.");
        assert_eq!(set.neutral.source, InsightSource::Generated);
    }

    #[test]
    fn test_wrong_types_are_back_filled() {
        let reply = r#"{
            "positive": {"summary": 42, "keyPoints": "not a list", "insights": ""},
            "negative": {"summary": "ok", "keyPoints": ["a", 3, "  ", "b"], "insights": "ok"},
            "neutral": {}
        }"#;
        let set = parse_insight_response(reply);

        assert_eq!(set.positive.summary, MISSING_SUMMARY);
        assert_eq!(set.positive.insight, MISSING_INSIGHT);
        assert!(set.positive.key_points.is_empty());
        assert_eq!(set.positive.source, InsightSource::Repaired);
        assert_eq!(set.negative.key_points, vec!["a", "b"]);
        assert_eq!(set.negative.source, InsightSource::Generated);
        assert_eq!(set.neutral.summary, MISSING_SUMMARY);
        assert_eq!(set.neutral.source, InsightSource::Repaired);
    }

    #[test]
    fn test_missing_label_object_fails_every_label() {
        let replies = [
            r#"{
                "positive": {"summary": "Good.", "keyPoints": [], "insights": "More."},
                "negative": {"summary": "Bad.", "keyPoints": [], "insights": "Less."}
            }"#,
            r#"{
                "positive": {"summary": "Good.", "keyPoints": [], "insights": "More."},
                "negative": {"summary": "Bad.", "keyPoints": [], "insights": "Less."},
                "neutral": "nothing to say"
            }"#,
        ];
        for reply in replies {
            let set = parse_insight_response(reply);
            for label in SentimentLabel::ALL {
                let fields = set.get(label);
                assert_eq!(fields.summary, FAILED_SUMMARY);
                assert_eq!(fields.insight, FAILED_INSIGHT);
                assert_eq!(fields.source, InsightSource::Fallback);
            }
        }
    }

    #[test]
    fn test_unparseable_reply_fails_every_label() {
        for reply in ["", "Sorry, I can't do that.", "[1, 2, 3]", "{\"positive\": "] {
            let set = parse_insight_response(reply);
            for label in SentimentLabel::ALL {
                let fields = set.get(label);
                assert_eq!(fields.summary, FAILED_SUMMARY);
                assert_eq!(fields.insight, FAILED_INSIGHT);
                assert!(fields.key_points.is_empty());
                assert_eq!(fields.source, InsightSource::Fallback);
            }
        }
    }

    #[test]
    fn test_fenced_reply() {
        let set = parse_insight_response(&format!("```json\n{FULL}\n```"));
        assert!(!set.is_degraded());
    }
}
