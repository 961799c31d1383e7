//! Sentiment analysis endpoint.
//!
//! POST /api/analyze
//!
//! Classifies the given comments and returns the full report.

use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use comment_insights::{AnalysisOrchestrator, AnalysisReport, CommentItem, MAX_COMMENTS};
use serde::Deserialize;

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub comments: Vec<CommentItem>,
}

pub async fn analyze_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let Json(request) = payload?;

    if request.comments.len() > MAX_COMMENTS {
        return Err(ApiError::validation(format!(
            "at most {MAX_COMMENTS} comments can be analyzed, got {}",
            request.comments.len()
        )));
    }

    // Request-scoped: the throttle is not shared with concurrent analyses.
    let orchestrator =
        AnalysisOrchestrator::with_config(state.ai.clone(), state.classifier.clone());
    let report = orchestrator.analyze(&request.comments).await?;

    Ok(Json(report))
}
