pub mod chat;
pub mod health;
pub mod news;
pub mod upload;

pub use chat::{business_chat_handler, chat_handler, explore_chat_handler, learn_chat_handler};
pub use health::{health_handler, ready_handler};
pub use news::{
    bot_handler, comments_handler, create_news_handler, engagement_handler, list_news_handler,
    quiz_question_handler,
};
pub use upload::upload_handler;

use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Every API route, with state applied. Middleware and `/metrics` are added
/// by the binary.
pub fn router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        // Chat surfaces
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/learn", post(learn_chat_handler))
        .route("/api/chat/explore", post(explore_chat_handler))
        .route("/api/chat/business-development", post(business_chat_handler))
        // Knowledge uploads need a larger body limit than the default 2 MiB
        .route(
            "/api/knowledge/upload",
            post(upload_handler).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Backend proxies
        .route("/api/news", get(list_news_handler).post(create_news_handler))
        .route("/api/news/:id/engagement", post(engagement_handler))
        .route("/api/news/:id/comments", get(comments_handler))
        .route("/api/quiz/question", post(quiz_question_handler))
        .route("/api/bot", post(bot_handler))
        // Health endpoints
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .with_state(state)
}
