//! Comment Sentiment Analysis Library
//!
//! Fetches a video's top-level comments, classifies each one as positive,
//! negative or neutral with a text-completion model, and summarizes every
//! group into a report.
//!
//! # Pipeline
//!
//! 1. Resolve a video id from a URL ([`resolve_video_id`])
//! 2. Page through comments up to the cap ([`CommentIngestor`])
//! 3. Classify in throttled batches ([`SentimentClassifier`])
//! 4. Summarize each group ([`InsightSynthesizer`])
//! 5. Assemble the report ([`AnalysisOrchestrator`])
//!
//! Classification fails loudly: one unusable batch fails the analysis.
//! Synthesis never fails: missing fields are back-filled with placeholders.
//!
//! # Usage
//!
//! ```rust,ignore
//! use comment_insights::{
//!     resolve_video_id, AnalysisOrchestrator, CommentIngestor, CommentOrder,
//!     GeminiAI, YouTubeCommentSource,
//! };
//!
//! let video_id = resolve_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap();
//! let comments = CommentIngestor::new(YouTubeCommentSource::from_env()?)
//!     .fetch(&video_id, CommentOrder::Time, 100)
//!     .await?;
//!
//! let report = AnalysisOrchestrator::new(GeminiAI::from_env()?)
//!     .analyze(&comments)
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams to the external services (AI, CommentSource)
//! - [`types`] - Comment, sentiment and report types
//! - [`pipeline`] - Ingest, classify, synthesize, analyze
//! - [`sources`] - CommentSource implementations (YouTube)
//! - [`ai`] - AI implementations (Gemini)
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod error;
pub mod pipeline;
pub mod sources;
pub mod testing;
pub mod throttle;
pub mod traits;
pub mod types;
pub mod video_id;

// Re-export core types at crate root
pub use error::{
    AnalysisError, CompletionError, CompletionResult, ErrorCode, IngestError, IngestResult,
    Result,
};
pub use throttle::Throttle;
pub use traits::{
    ai::AI,
    source::{CommentPage, CommentSource, PageRequest},
};
pub use types::{
    comment::{CommentItem, CommentOrder},
    config::{ClassifierConfig, MAX_COMMENTS, MAX_PAGE_SIZE},
    report::{AnalysisReport, CategoryInsight, InsightFields, InsightSet, InsightSource},
    sentiment::{PartitionedItems, SentimentLabel, SentimentResult},
};
pub use video_id::{resolve_video_id, VideoId};

// Re-export pipeline components
pub use pipeline::{
    extract_json_payload, parse_classification_response, parse_insight_response,
    partition_items, AnalysisOrchestrator, CommentIngestor, IngestOutcome, InsightSynthesizer,
    SentimentClassifier,
};

#[cfg(feature = "youtube")]
pub use sources::YouTubeCommentSource;

#[cfg(feature = "gemini")]
pub use ai::GeminiAI;

// Re-export testing utilities
pub use testing::{MockAI, MockCommentSource};
