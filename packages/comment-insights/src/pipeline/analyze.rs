//! End-to-end analysis: classify, partition, synthesize, assemble.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::{AnalysisError, Result};
use crate::pipeline::classify::SentimentClassifier;
use crate::pipeline::synthesize::InsightSynthesizer;
use crate::throttle::Throttle;
use crate::traits::ai::AI;
use crate::types::comment::CommentItem;
use crate::types::config::ClassifierConfig;
use crate::types::report::AnalysisReport;
use crate::types::sentiment::{PartitionedItems, SentimentLabel, SentimentResult};

/// Runs one analysis request against a single model.
///
/// Classification and synthesis share one throttle so the configured spacing
/// holds across every request this orchestrator sends.
pub struct AnalysisOrchestrator<A: AI> {
    classifier: SentimentClassifier<A>,
    synthesizer: InsightSynthesizer<A>,
}

impl<A: AI + Clone> AnalysisOrchestrator<A> {
    pub fn new(ai: A) -> Self {
        Self::with_config(ai, ClassifierConfig::default())
    }

    pub fn with_config(ai: A, config: ClassifierConfig) -> Self {
        let throttle = Throttle::new(config.batch_interval);
        Self::with_throttle(ai, config, throttle)
    }

    /// Use an externally owned throttle, e.g. one shared with another
    /// pipeline calling the same model.
    pub fn with_throttle(ai: A, config: ClassifierConfig, throttle: Throttle) -> Self {
        Self {
            classifier: SentimentClassifier::with_config(ai.clone(), config)
                .with_throttle(throttle.clone()),
            synthesizer: InsightSynthesizer::new(ai).with_throttle(throttle),
        }
    }
}

impl<A: AI> AnalysisOrchestrator<A> {
    pub fn classifier(&self) -> &SentimentClassifier<A> {
        &self.classifier
    }

    /// Analyze `items` and build the report.
    ///
    /// Fails with [`AnalysisError::NoComments`] on empty input before any
    /// model call, and with the classifier's error if any batch fails.
    /// Synthesis problems only degrade the insight text.
    pub async fn analyze(&self, items: &[CommentItem]) -> Result<AnalysisReport> {
        if items.is_empty() {
            return Err(AnalysisError::NoComments);
        }

        info!(comments = items.len(), "Starting analysis");

        let results = self.classifier.classify(items).await?;
        let partitions = partition_items(items, &results);

        info!(
            positive = partitions.positive.len(),
            negative = partitions.negative.len(),
            neutral = partitions.neutral.len(),
            "Partitioned comments"
        );

        let insights = self.synthesizer.synthesize(&partitions).await;
        let report = AnalysisReport::assemble(partitions, insights);

        info!(total = report.total_count, "Analysis complete");
        Ok(report)
    }
}

/// Assign every item to exactly one label.
///
/// Items without a result default to neutral. Input order is kept within
/// each bucket.
pub fn partition_items(items: &[CommentItem], results: &[SentimentResult]) -> PartitionedItems {
    let mut labels: HashMap<&str, SentimentLabel> = HashMap::with_capacity(results.len());
    for result in results {
        labels.entry(result.comment_id.as_str()).or_insert(result.label);
    }

    let mut partitions = PartitionedItems::new();
    let mut defaulted = 0usize;
    for item in items {
        let label = labels.get(item.id.as_str()).copied().unwrap_or_else(|| {
            defaulted += 1;
            SentimentLabel::Neutral
        });
        partitions.push(label, item.clone());
    }

    if defaulted > 0 {
        debug!(defaulted, "Unclassified comments defaulted to neutral");
    }

    partitions
}
