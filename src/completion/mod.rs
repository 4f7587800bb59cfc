//! Streaming chat-completion client abstraction.
//!
//! The orchestrator only sees [`CompletionClient`]; the OpenAI-compatible
//! HTTP implementation lives in [`openai`], and tests substitute scripted
//! clients.

pub mod assembler;
pub mod openai;
pub mod sse;

pub use assembler::ToolCallAssembler;
pub use openai::OpenAiClient;

use crate::chat::message::Message;
use crate::error::UpstreamError;
use async_trait::async_trait;
use futures::Stream;
use serde_json::Value;
use std::pin::Pin;

pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Incremental output of one completion request.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionEvent {
    TextDelta(String),
    /// First fragment of a tool call at stream position `index`.
    ToolCallStarted {
        index: usize,
        id: String,
        name: String,
    },
    /// Further argument text for the tool call at `index`.
    ToolCallDelta { index: usize, fragment: String },
    Finished { reason: Option<String> },
}

#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub messages: Vec<Message>,
    /// Function definitions in the completion API's wire format.
    pub tools: Vec<Value>,
}

pub type CompletionStream = BoxStream<'static, Result<CompletionEvent, UpstreamError>>;

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Open a streamed completion. Dropping the returned stream abandons
    /// the upstream request.
    async fn stream(&self, request: CompletionRequest) -> Result<CompletionStream, UpstreamError>;
}
