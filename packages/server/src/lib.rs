// Comment Sentiment Analyzer - API Core
//
// HTTP surface over the comment-insights pipeline: fetch a video's comments,
// analyze their sentiment, report health.

pub mod config;
pub mod server;

pub use config::*;
