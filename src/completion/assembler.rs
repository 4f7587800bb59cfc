use crate::chat::message::ToolInvocation;
use serde_json::Value;

struct PendingCall {
    index: usize,
    id: String,
    name: String,
    arguments: String,
}

/// Collects streamed tool-call events (start + argument fragments) into
/// complete [`ToolInvocation`]s.
///
/// Calls are keyed by the stream index because only the first fragment of a
/// call carries its id. Finalized calls keep the order in which they started.
#[derive(Default)]
pub struct ToolCallAssembler {
    calls: Vec<PendingCall>,
}

impl ToolCallAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn on_started(&mut self, index: usize, id: String, name: String) {
        if self.calls.iter().any(|c| c.index == index) {
            return;
        }
        self.calls.push(PendingCall {
            index,
            id,
            name,
            arguments: String::new(),
        });
    }

    pub fn on_partial(&mut self, index: usize, fragment: &str) {
        if let Some(call) = self.calls.iter_mut().find(|c| c.index == index) {
            call.arguments.push_str(fragment);
        }
    }

    /// Parse accumulated argument text. Empty text becomes `{}`; text that
    /// is not JSON is kept as a string so validation can reject it.
    pub fn finalize(self) -> Vec<ToolInvocation> {
        self.calls
            .into_iter()
            .map(|call| {
                let trimmed = call.arguments.trim();
                let arguments = if trimmed.is_empty() {
                    Value::Object(Default::default())
                } else {
                    serde_json::from_str(trimmed).unwrap_or(Value::String(call.arguments))
                };
                ToolInvocation {
                    id: call.id,
                    name: call.name,
                    arguments,
                }
            })
            .collect()
    }
}
