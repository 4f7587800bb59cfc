//! Articulus - AskArko knowledge assistant API
//!
//! Tool-routed chat over the Articulus project knowledge base: four chat
//! surfaces, each a system prompt plus a registry of data tools, streamed to
//! the browser as server-sent events. The library exposes the components so
//! integration tests can drive the router with a scripted completion client.

pub mod backend;
pub mod chat;
pub mod completion;
pub mod config;
pub mod dataset;
pub mod error;
pub mod handlers;
pub mod state;
pub mod tools;

// Re-export key types for convenience
pub use backend::{BackendClient, BackendError};
pub use chat::{ChatEndpoints, ChatSurface, Message, Orchestrator, TurnEvent};
pub use completion::{CompletionClient, CompletionEvent, CompletionRequest, OpenAiClient};
pub use config::Config;
pub use error::{AppError, Result, UpstreamError};
pub use handlers::router;
pub use state::AppState;
