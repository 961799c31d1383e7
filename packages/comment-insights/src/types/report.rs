//! Insight and report types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::sentiment::{PartitionedItems, SentimentLabel};

/// Placeholder when a category summary is missing or unusable.
pub const MISSING_SUMMARY: &str = "Summary unavailable for this category.";

/// Placeholder when a category insight is missing.
pub const MISSING_INSIGHT: &str = "Unable to generate insight.";

/// Summary used for every category when the whole reply is unusable.
pub const FAILED_SUMMARY: &str = "Analysis failed. Please try again.";

/// Insight used for every category when the whole reply is unusable.
pub const FAILED_INSIGHT: &str = "Please retry the analysis.";

/// Where a category's insight text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSource {
    /// Every field came from the model.
    Generated,
    /// Some fields were missing or invalid and were back-filled.
    Repaired,
    /// The reply was unusable; all fields are placeholders.
    Fallback,
}

/// Summary, key points and insight for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightFields {
    pub summary: String,
    pub key_points: Vec<String>,
    pub insight: String,
    pub source: InsightSource,
}

impl InsightFields {
    /// Placeholder content for an unusable reply.
    pub fn failed() -> Self {
        Self {
            summary: FAILED_SUMMARY.to_string(),
            key_points: Vec::new(),
            insight: FAILED_INSIGHT.to_string(),
            source: InsightSource::Fallback,
        }
    }
}

/// Insight for every label. Always fully populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSet {
    pub positive: InsightFields,
    pub negative: InsightFields,
    pub neutral: InsightFields,
}

impl InsightSet {
    /// Placeholder set used when synthesis fails outright.
    pub fn failed() -> Self {
        Self {
            positive: InsightFields::failed(),
            negative: InsightFields::failed(),
            neutral: InsightFields::failed(),
        }
    }

    pub fn get(&self, label: SentimentLabel) -> &InsightFields {
        match label {
            SentimentLabel::Positive => &self.positive,
            SentimentLabel::Negative => &self.negative,
            SentimentLabel::Neutral => &self.neutral,
        }
    }

    /// True when any category fell back to placeholder content.
    pub fn is_degraded(&self) -> bool {
        SentimentLabel::ALL
            .iter()
            .any(|l| self.get(*l).source != InsightSource::Generated)
    }
}

/// Report entry for one label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInsight {
    pub category: SentimentLabel,
    pub summary: String,
    pub key_points: Vec<String>,
    pub insight: String,
    pub source: InsightSource,
    pub count: usize,
    /// Share of all analyzed comments, in `[0, 100]`.
    pub percentage: f64,
}

/// Final result of one analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(rename = "categorizedComments")]
    pub partitions: PartitionedItems,
    /// Exactly one entry per label, in `SentimentLabel::ALL` order.
    pub insights: Vec<CategoryInsight>,
    pub total_count: usize,
    pub generated_at: DateTime<Utc>,
}

impl AnalysisReport {
    /// Assemble the report; counts and percentages are derived from `partitions`.
    pub fn assemble(partitions: PartitionedItems, insights: InsightSet) -> Self {
        let total_count = partitions.total();
        let insights = SentimentLabel::ALL
            .iter()
            .map(|&label| {
                let fields = insights.get(label).clone();
                let count = partitions.count(label);
                let percentage = if total_count == 0 {
                    0.0
                } else {
                    100.0 * count as f64 / total_count as f64
                };
                CategoryInsight {
                    category: label,
                    summary: fields.summary,
                    key_points: fields.key_points,
                    insight: fields.insight,
                    source: fields.source,
                    count,
                    percentage,
                }
            })
            .collect();

        Self {
            partitions,
            insights,
            total_count,
            generated_at: Utc::now(),
        }
    }

    pub fn insight(&self, label: SentimentLabel) -> Option<&CategoryInsight> {
        self.insights.iter().find(|i| i.category == label)
    }
}
