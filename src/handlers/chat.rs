use crate::chat::{ChatSurface, Message, Role, TurnEvent};
use crate::error::{AppError, Result};
use crate::state::AppState;
use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::{Stream, StreamExt};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// POST /api/chat - General knowledge-base assistant.
pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    stream_turn(state, ChatSurface::General, request)
}

/// POST /api/chat/learn
pub async fn learn_chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    stream_turn(state, ChatSurface::Learn, request)
}

/// POST /api/chat/explore
pub async fn explore_chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    stream_turn(state, ChatSurface::Explore, request)
}

/// POST /api/chat/business-development
pub async fn business_chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    stream_turn(state, ChatSurface::BusinessDevelopment, request)
}

fn validate(messages: &[Message]) -> Result<()> {
    match messages.last() {
        None => Err(AppError::ValidationError(
            "Messages list cannot be empty".to_string(),
        )),
        Some(last) if last.role != Role::User => Err(AppError::ValidationError(
            "The last message must come from the user".to_string(),
        )),
        Some(_) => Ok(()),
    }
}

/// Start the turn on its own task and adapt its events to SSE.
///
/// The response stream ends once the turn task finishes. Dropping the
/// response (client disconnect) closes the channel, which cancels the turn.
fn stream_turn(
    state: Arc<AppState>,
    surface: ChatSurface,
    request: ChatRequest,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    validate(&request.messages)?;

    let (tx, rx) = mpsc::channel::<TurnEvent>(state.config.stream_buffer.max(1));
    let cancel = CancellationToken::new();
    let orchestrator = Arc::clone(&state.orchestrator);
    let endpoints = Arc::clone(&state.endpoints);
    let history = request.messages;

    tokio::spawn(async move {
        let endpoint = endpoints.get(surface);
        let watcher = tx.clone();
        let run = orchestrator.run_turn(endpoint, history, tx, cancel.clone());
        tokio::pin!(run);

        let outcome = tokio::select! {
            outcome = &mut run => outcome,
            _ = watcher.closed() => {
                cancel.cancel();
                run.await
            }
        };

        tracing::debug!(
            surface = surface.as_str(),
            state = outcome.state.as_str(),
            messages = outcome.messages.len(),
            "Turn task finished"
        );
    });

    let events = ReceiverStream::new(rx).map(|event| {
        Ok::<_, Infallible>(
            Event::default()
                .event(event.name())
                .json_data(&event)
                .unwrap_or_else(|_| Event::default().event(event.name()).data("{}")),
        )
    });

    Ok(Sse::new(events).keep_alive(KeepAlive::default()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_trailing_user_message() {
        assert!(matches!(validate(&[]), Err(AppError::ValidationError(_))));
        assert!(validate(&[Message::user("hi")]).is_ok());
        assert!(matches!(
            validate(&[Message::user("hi"), Message::assistant("hello")]),
            Err(AppError::ValidationError(_))
        ));
    }
}
