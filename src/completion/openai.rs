//! OpenAI-compatible `POST {base}/chat/completions` client with `stream: true`.

use crate::chat::message::{Message, Role};
use crate::completion::{sse, CompletionClient, CompletionEvent, CompletionRequest, CompletionStream};
use crate::error::UpstreamError;
use async_trait::async_trait;
use futures::{stream, StreamExt, TryStreamExt};
use serde_json::{json, Value};
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, UpstreamError> {
        // No overall timeout: the body is a long-lived stream bounded by the turn deadline.
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// Wire form of the conversation: system prompt first, then the history
/// with tool calls and tool results linked by id.
pub fn wire_messages(system: &str, messages: &[Message]) -> Vec<Value> {
    let mut out = Vec::with_capacity(messages.len() + 1);
    out.push(json!({ "role": "system", "content": system }));

    for message in messages {
        let content = message.content.as_text();
        let wire = match message.role {
            Role::User => json!({ "role": "user", "content": content }),
            Role::Assistant if message.tool_calls.is_empty() => {
                json!({ "role": "assistant", "content": content })
            }
            Role::Assistant => {
                let calls: Vec<Value> = message
                    .tool_calls
                    .iter()
                    .map(|call| {
                        let arguments = match &call.arguments {
                            Value::String(raw) => raw.clone(),
                            other => other.to_string(),
                        };
                        json!({
                            "id": call.id,
                            "type": "function",
                            "function": { "name": call.name, "arguments": arguments },
                        })
                    })
                    .collect();
                let content = if content.is_empty() {
                    Value::Null
                } else {
                    Value::String(content.into_owned())
                };
                json!({ "role": "assistant", "content": content, "tool_calls": calls })
            }
            Role::Tool => json!({
                "role": "tool",
                "tool_call_id": message.tool_call_id.as_deref().unwrap_or_default(),
                "content": content,
            }),
        };
        out.push(wire);
    }

    out
}

pub fn request_body(request: &CompletionRequest) -> Value {
    let mut body = json!({
        "model": request.model,
        "stream": true,
        "messages": wire_messages(&request.system, &request.messages),
    });
    if !request.tools.is_empty() {
        body["tools"] = Value::Array(request.tools.clone());
        body["tool_choice"] = json!("auto");
    }
    body
}

/// Events carried by one streamed chunk.
pub fn parse_chunk(chunk: &Value) -> Result<Vec<CompletionEvent>, UpstreamError> {
    if let Some(error) = chunk.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(UpstreamError::Protocol(message));
    }

    let mut events = Vec::new();
    let Some(choice) = chunk.pointer("/choices/0") else {
        return Ok(events);
    };

    if let Some(delta) = choice.get("delta") {
        if let Some(text) = delta.get("content").and_then(Value::as_str) {
            if !text.is_empty() {
                events.push(CompletionEvent::TextDelta(text.to_string()));
            }
        }

        for call in delta
            .get("tool_calls")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
        {
            let index = call.get("index").and_then(Value::as_u64).unwrap_or(0) as usize;
            let id = call.get("id").and_then(Value::as_str);
            let name = call.pointer("/function/name").and_then(Value::as_str);
            if let (Some(id), Some(name)) = (id, name) {
                events.push(CompletionEvent::ToolCallStarted {
                    index,
                    id: id.to_string(),
                    name: name.to_string(),
                });
            }
            if let Some(fragment) = call.pointer("/function/arguments").and_then(Value::as_str) {
                if !fragment.is_empty() {
                    events.push(CompletionEvent::ToolCallDelta {
                        index,
                        fragment: fragment.to_string(),
                    });
                }
            }
        }
    }

    if let Some(reason) = choice.get("finish_reason").and_then(Value::as_str) {
        events.push(CompletionEvent::Finished {
            reason: Some(reason.to_string()),
        });
    }

    Ok(events)
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn stream(&self, request: CompletionRequest) -> Result<CompletionStream, UpstreamError> {
        let body = request_body(&request);

        let mut req = self
            .http
            .post(self.endpoint())
            .header("accept", "text/event-stream")
            .json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes_stream().map_err(UpstreamError::from);
        let events = sse::decode(bytes).flat_map(|frame| {
            let batch: Vec<Result<CompletionEvent, UpstreamError>> =
                match frame.and_then(|chunk| parse_chunk(&chunk)) {
                    Ok(events) => events.into_iter().map(Ok).collect(),
                    Err(e) => vec![Err(e)],
                };
            stream::iter(batch)
        });

        Ok(Box::pin(events))
    }
}
