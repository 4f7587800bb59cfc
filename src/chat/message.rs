//! Conversation entities exchanged between the client, the orchestrator and
//! the completion API.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::borrow::Cow;

/// Who authored a message. The system prompt is not part of the client
/// history; each chat surface supplies its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Tool,
}

/// Message body: plain text, or any structured JSON payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Structured(Value),
}

impl MessageContent {
    /// Text form for upstream APIs that only accept strings.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            MessageContent::Text(text) => Cow::Borrowed(text),
            MessageContent::Structured(value) => Cow::Owned(value.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(text) => text.is_empty(),
            MessageContent::Structured(value) => value.is_null(),
        }
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        MessageContent::Text(String::new())
    }
}

/// One request from the model to run a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// Output of exactly one [`ToolInvocation`], matched by `tool_call_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub tool_call_id: String,
    pub name: String,
    pub content: Value,
    #[serde(default)]
    pub is_error: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: MessageContent,
    /// Tool calls requested by an assistant message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolInvocation>,
    /// The invocation a tool message answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: MessageContent::Text(text.into()),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }

    pub fn assistant_with_tool_calls(text: impl Into<String>, calls: Vec<ToolInvocation>) -> Self {
        Self {
            tool_calls: calls,
            ..Self::assistant(text)
        }
    }

    pub fn tool(result: &ToolResult) -> Self {
        Self {
            role: Role::Tool,
            content: MessageContent::Structured(result.content.clone()),
            tool_calls: Vec::new(),
            tool_call_id: Some(result.tool_call_id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_history_deserializes_text_and_structured_content() {
        let history: Vec<Message> = serde_json::from_value(json!([
            { "role": "user", "content": "What did the data team ship?" },
            { "role": "assistant", "content": "", "toolCalls": [
                { "id": "call_1", "name": "searchKnowledge", "arguments": { "query": "data" } }
            ]},
            { "role": "tool", "toolCallId": "call_1", "content": [{ "title": "Data Pipeline Optimization" }] }
        ]))
        .unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].content, MessageContent::Text("What did the data team ship?".into()));
        assert_eq!(history[1].tool_calls[0].name, "searchKnowledge");
        assert_eq!(history[2].tool_call_id.as_deref(), Some("call_1"));
        assert!(matches!(history[2].content, MessageContent::Structured(_)));
    }

    #[test]
    fn test_system_role_is_rejected() {
        let parsed = serde_json::from_value::<Message>(json!({ "role": "system", "content": "x" }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_tool_message_carries_result_id() {
        let result = ToolResult {
            tool_call_id: "call_9".into(),
            name: "suggestNextSteps".into(),
            content: json!([]),
            is_error: false,
        };
        let message = Message::tool(&result);

        assert_eq!(message.role, Role::Tool);
        assert_eq!(message.tool_call_id.as_deref(), Some("call_9"));
        assert_eq!(message.content.as_text(), "[]");
    }
}
