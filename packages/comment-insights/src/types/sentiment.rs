//! Sentiment labels, per-item results and the three-way partition.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::comment::CommentItem;

/// The three sentiment buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// All labels in report order.
    pub const ALL: [SentimentLabel; 3] = [
        SentimentLabel::Positive,
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLabel::Positive => "positive",
            SentimentLabel::Negative => "negative",
            SentimentLabel::Neutral => "neutral",
        }
    }

    /// Strict parse of the wire value. Anything else is not a label.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "positive" => Some(SentimentLabel::Positive),
            "negative" => Some(SentimentLabel::Negative),
            "neutral" => Some(SentimentLabel::Neutral),
            _ => None,
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentResult {
    pub comment_id: String,
    pub label: SentimentLabel,
    /// Always within `[0.0, 1.0]`.
    pub confidence: f64,
}

impl SentimentResult {
    /// Confidence used when the model does not report one.
    pub const DEFAULT_CONFIDENCE: f64 = 0.5;

    pub fn new(comment_id: impl Into<String>, label: SentimentLabel, confidence: f64) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            Self::DEFAULT_CONFIDENCE
        };
        Self {
            comment_id: comment_id.into(),
            label,
            confidence,
        }
    }
}

/// Every analyzed comment, assigned to exactly one label.
///
/// Items keep their input order within each bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionedItems {
    pub positive: Vec<CommentItem>,
    pub negative: Vec<CommentItem>,
    pub neutral: Vec<CommentItem>,
}

impl PartitionedItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: SentimentLabel) -> &[CommentItem] {
        match label {
            SentimentLabel::Positive => &self.positive,
            SentimentLabel::Negative => &self.negative,
            SentimentLabel::Neutral => &self.neutral,
        }
    }

    pub fn push(&mut self, label: SentimentLabel, item: CommentItem) {
        match label {
            SentimentLabel::Positive => self.positive.push(item),
            SentimentLabel::Negative => self.negative.push(item),
            SentimentLabel::Neutral => self.neutral.push(item),
        }
    }

    pub fn count(&self, label: SentimentLabel) -> usize {
        self.get(label).len()
    }

    /// Sum of all partition sizes.
    pub fn total(&self) -> usize {
        self.positive.len() + self.negative.len() + self.neutral.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
