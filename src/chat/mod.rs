pub mod events;
pub mod message;
pub mod orchestrator;
pub mod surface;

pub use events::{DoneReason, TurnEvent};
pub use message::{Message, MessageContent, Role, ToolInvocation, ToolResult};
pub use orchestrator::{Orchestrator, TurnOutcome, TurnSettings, TurnState};
pub use surface::{ChatEndpoint, ChatEndpoints, ChatSurface};
