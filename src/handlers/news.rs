//! Proxies for the news feed, quiz and legacy assistant backend.

use crate::backend::{BotRequest, EngagementRequest};
use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use std::sync::Arc;

/// GET /api/news
pub async fn list_news_handler(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    let posts = state.backend()?.fetch_posts().await?;
    Ok(Json(posts))
}

/// POST /api/news
pub async fn create_news_handler(
    State(state): State<Arc<AppState>>,
    Json(post): Json<Value>,
) -> Result<Json<Value>> {
    if !post.is_object() {
        return Err(AppError::ValidationError(
            "Post must be a JSON object".to_string(),
        ));
    }
    let created = state.backend()?.create_post(&post).await?;
    Ok(Json(created))
}

/// POST /api/news/:id/engagement
pub async fn engagement_handler(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
    Json(engagement): Json<EngagementRequest>,
) -> Result<StatusCode> {
    state.backend()?.post_engagement(&post_id, &engagement).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/news/:id/comments
pub async fn comments_handler(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
) -> Result<Json<Value>> {
    let comments = state.backend()?.fetch_comments(&post_id).await?;
    Ok(Json(comments))
}

/// POST /api/quiz/question
pub async fn quiz_question_handler(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    let question = state.backend()?.generate_quiz_question().await?;
    Ok(Json(question))
}

/// POST /api/bot - Legacy assistant, answered by the backend.
pub async fn bot_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<BotRequest>,
) -> Result<Json<Value>> {
    if request.message.trim().is_empty() {
        return Err(AppError::ValidationError(
            "Message cannot be empty".to_string(),
        ));
    }
    let reply = state.backend()?.chat_with_bot(&request).await?;
    Ok(Json(reply))
}
