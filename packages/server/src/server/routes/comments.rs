//! Comment fetch endpoint.
//!
//! POST /api/comments
//!
//! Resolves the video id from a URL and returns up to 1000 top-level
//! comments.

use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use comment_insights::{
    resolve_video_id, CommentIngestor, CommentItem, CommentOrder, ErrorCode, MAX_PAGE_SIZE,
};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsRequest {
    pub video_url: String,
    #[serde(default)]
    pub order: CommentOrder,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

fn default_max_results() -> u32 {
    MAX_PAGE_SIZE
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentsResponse {
    pub video_id: String,
    pub comments: Vec<CommentItem>,
    pub total_count: usize,
    pub truncated: bool,
}

pub async fn comments_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<CommentsRequest>, JsonRejection>,
) -> Result<Json<CommentsResponse>, ApiError> {
    let Json(request) = payload?;

    if request.video_url.trim().is_empty() {
        return Err(ApiError::validation("videoUrl is required"));
    }

    let video_id = resolve_video_id(&request.video_url).ok_or_else(|| {
        ApiError::new(ErrorCode::InvalidUrl, "not a recognizable YouTube video URL")
    })?;

    let outcome = CommentIngestor::new(state.source.clone())
        .fetch_with_outcome(&video_id, request.order, request.max_results)
        .await?;

    Ok(Json(CommentsResponse {
        video_id: video_id.to_string(),
        total_count: outcome.items.len(),
        comments: outcome.items,
        truncated: outcome.truncated,
    }))
}
