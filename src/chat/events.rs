use crate::chat::message::{ToolInvocation, ToolResult};
use serde::Serialize;

/// Message shown to the user when a turn cannot be completed.
pub const FALLBACK_MESSAGE: &str =
    "Sorry, I couldn't complete that request right now. Please try again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DoneReason {
    /// The model finished without requesting more tools.
    Stop,
    /// The model kept requesting tools past the per-turn limit.
    MaxToolRounds,
}

/// Everything a chat turn emits, in generation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    Text { delta: String },
    ToolCall(ToolInvocation),
    ToolResult(ToolResult),
    Error { message: String },
    Done { reason: DoneReason },
}

impl TurnEvent {
    /// SSE `event:` name.
    pub fn name(&self) -> &'static str {
        match self {
            TurnEvent::Text { .. } => "text",
            TurnEvent::ToolCall(_) => "tool_call",
            TurnEvent::ToolResult(_) => "tool_result",
            TurnEvent::Error { .. } => "error",
            TurnEvent::Done { .. } => "done",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_event_payloads() {
        let call = TurnEvent::ToolCall(ToolInvocation {
            id: "call_1".into(),
            name: "searchKnowledge".into(),
            arguments: json!({ "query": "spark" }),
        });
        assert_eq!(call.name(), "tool_call");
        assert_eq!(
            serde_json::to_value(&call).unwrap(),
            json!({ "type": "tool_call", "id": "call_1", "name": "searchKnowledge", "arguments": { "query": "spark" } })
        );

        let done = TurnEvent::Done {
            reason: DoneReason::MaxToolRounds,
        };
        assert_eq!(
            serde_json::to_value(&done).unwrap(),
            json!({ "type": "done", "reason": "max_tool_rounds" })
        );
    }
}
