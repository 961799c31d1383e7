//! Batched sentiment classification.
//!
//! Comments are classified in fixed-size batches, one completion request per
//! batch. A batch whose reply cannot be validated fails the whole call: a
//! half-classified input would silently skew the report.

use std::collections::HashSet;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{AnalysisError, Result};
use crate::pipeline::json::extract_json_payload;
use crate::pipeline::prompts::format_classify_prompt;
use crate::throttle::Throttle;
use crate::traits::ai::AI;
use crate::types::comment::CommentItem;
use crate::types::config::ClassifierConfig;
use crate::types::sentiment::{SentimentLabel, SentimentResult};

/// Assigns a sentiment label to every comment.
pub struct SentimentClassifier<A: AI> {
    ai: A,
    config: ClassifierConfig,
    throttle: Throttle,
}

impl<A: AI> SentimentClassifier<A> {
    /// Create a classifier with the default batching and throttling.
    pub fn new(ai: A) -> Self {
        Self::with_config(ai, ClassifierConfig::default())
    }

    pub fn with_config(ai: A, config: ClassifierConfig) -> Self {
        let throttle = Throttle::new(config.batch_interval);
        Self {
            ai,
            config,
            throttle,
        }
    }

    /// Share a throttle with other callers of the same model.
    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn throttle(&self) -> &Throttle {
        &self.throttle
    }

    /// Classify `items`.
    ///
    /// Returns at most one result per input id. Ids the model left out are
    /// simply absent; the caller decides how to treat them.
    pub async fn classify(&self, items: &[CommentItem]) -> Result<Vec<SentimentResult>> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let batch_size = self.config.batch_size.max(1);
        let batches: Vec<&[CommentItem]> = items.chunks(batch_size).collect();
        let total_batches = batches.len();

        info!(
            comments = items.len(),
            batches = total_batches,
            batch_size,
            "Classifying comments"
        );

        // buffered() keeps batch order even when several are in flight
        let batch_futures: Vec<_> = batches
            .into_iter()
            .enumerate()
            .map(|(index, batch)| self.classify_batch(index, total_batches, batch))
            .collect();
        let per_batch: Vec<Vec<SentimentResult>> = stream::iter(batch_futures)
            .buffered(self.config.max_concurrency.max(1))
            .try_collect()
            .await?;

        let results: Vec<SentimentResult> = per_batch.into_iter().flatten().collect();

        if results.len() < items.len() {
            debug!(
                missing = items.len() - results.len(),
                "Model omitted some comments"
            );
        }

        Ok(results)
    }

    async fn classify_batch(
        &self,
        index: usize,
        total: usize,
        batch: &[CommentItem],
    ) -> Result<Vec<SentimentResult>> {
        self.throttle.until_ready().await;

        debug!(batch = index + 1, total, size = batch.len(), "Classifying batch");

        let prompt = format_classify_prompt(batch);
        let reply = self.ai.complete(&prompt).await.map_err(|e| {
            warn!(batch = index, error = %e, "Classification request failed");
            AnalysisError::from(e)
        })?;

        parse_classification_response(&reply, batch).map_err(|reason| {
            warn!(batch = index, reason = %reason, "Unusable classification reply");
            AnalysisError::Parse {
                batch: index,
                reason,
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawClassification {
    #[serde(rename = "commentId", alias = "comment_id", alias = "id")]
    comment_id: String,

    #[serde(alias = "label")]
    sentiment: String,

    #[serde(default)]
    confidence: Option<Value>,
}

/// Validate a model reply against the batch it answers.
///
/// Accepts a bare array or an object wrapping it under `classifications` or
/// `results`. Every record must reference an id from `batch` and carry a
/// valid label; one bad record rejects the batch. Duplicate ids keep the
/// first occurrence.
pub fn parse_classification_response(
    text: &str,
    batch: &[CommentItem],
) -> std::result::Result<Vec<SentimentResult>, String> {
    let payload = extract_json_payload(text);
    let value: Value =
        serde_json::from_str(payload).map_err(|e| format!("reply is not valid JSON: {e}"))?;

    let records = match value {
        Value::Array(records) => records,
        Value::Object(mut map) => match map
            .remove("classifications")
            .or_else(|| map.remove("results"))
        {
            Some(Value::Array(records)) => records,
            _ => return Err("expected an array of classifications".to_string()),
        },
        _ => return Err("expected an array of classifications".to_string()),
    };

    let known: HashSet<&str> = batch.iter().map(|item| item.id.as_str()).collect();
    let mut seen: HashSet<String> = HashSet::new();
    let mut results = Vec::with_capacity(records.len());

    for (position, record) in records.into_iter().enumerate() {
        let raw: RawClassification = serde_json::from_value(record)
            .map_err(|e| format!("record {position} is malformed: {e}"))?;

        if !known.contains(raw.comment_id.as_str()) {
            return Err(format!("record {position} has unknown comment id"));
        }

        let label = SentimentLabel::parse(raw.sentiment.trim()).ok_or_else(|| {
            format!("record {position} has invalid sentiment {:?}", raw.sentiment)
        })?;

        if !seen.insert(raw.comment_id.clone()) {
            continue;
        }

        results.push(SentimentResult::new(
            raw.comment_id,
            label,
            confidence_value(raw.confidence.as_ref()),
        ));
    }

    Ok(results)
}

fn confidence_value(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.unwrap_or(SentimentResult::DEFAULT_CONFIDENCE)
}
