//! The analysis pipeline.
//!
//! - Ingest: paginated, capped comment fetching
//! - Classify: batched sentiment classification (fails loudly)
//! - Synthesize: per-label summaries (degrades to placeholders, never fails)
//! - Analyze: classify, partition, synthesize and assemble the report

pub mod analyze;
pub mod classify;
pub mod ingest;
pub mod json;
pub mod prompts;
pub mod synthesize;

pub use analyze::{partition_items, AnalysisOrchestrator};
pub use classify::{parse_classification_response, SentimentClassifier};
pub use ingest::{CommentIngestor, IngestOutcome};
pub use json::{extract_json_payload, parse_json_payload};
pub use prompts::{format_classify_prompt, format_insight_prompt, CLASSIFY_PROMPT, INSIGHT_PROMPT};
pub use synthesize::{parse_insight_response, InsightSynthesizer};
