//! Drives one chat turn: completion stream, incremental tool-call assembly,
//! concurrent tool execution, and resumed generation.
//!
//! ```text
//! Receiving -> Generating -> ToolPending -> ToolExecuting -> Generating -> ... -> Done
//!                  |                             |
//!                  +--------> Failed / Cancelled <+
//! ```
//!
//! Events go out over an mpsc channel in generation order. The turn ends
//! `Cancelled` when its token fires or the receiver goes away; tool results
//! that arrive after that point are dropped instead of appended.

use crate::chat::events::{DoneReason, TurnEvent, FALLBACK_MESSAGE};
use crate::chat::message::{Message, ToolInvocation, ToolResult};
use crate::chat::surface::ChatEndpoint;
use crate::completion::{CompletionClient, CompletionEvent, CompletionRequest, ToolCallAssembler};
use crate::config::Config;
use crate::error::UpstreamError;
use crate::tools::registry::ToolError;
use futures::future::join_all;
use futures::StreamExt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Receiving,
    Generating,
    ToolPending,
    ToolExecuting,
    Done,
    Failed,
    Cancelled,
}

impl TurnState {
    pub fn as_str(self) -> &'static str {
        match self {
            TurnState::Receiving => "receiving",
            TurnState::Generating => "generating",
            TurnState::ToolPending => "tool_pending",
            TurnState::ToolExecuting => "tool_executing",
            TurnState::Done => "done",
            TurnState::Failed => "failed",
            TurnState::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TurnSettings {
    pub model: String,
    pub turn_timeout: Duration,
    /// Longest silence tolerated between upstream chunks.
    pub idle_timeout: Duration,
    pub tool_timeout: Duration,
    /// Tool execution rounds allowed before the turn is closed.
    pub max_tool_rounds: usize,
}

impl From<&Config> for TurnSettings {
    fn from(config: &Config) -> Self {
        Self {
            model: config.completion_model.clone(),
            turn_timeout: config.turn_timeout(),
            idle_timeout: config.stream_idle_timeout(),
            tool_timeout: config.tool_timeout(),
            max_tool_rounds: config.max_tool_rounds,
        }
    }
}

/// Final state of a turn and the conversation as it stood at the end.
#[derive(Debug)]
pub struct TurnOutcome {
    pub state: TurnState,
    pub messages: Vec<Message>,
    pub tool_rounds: usize,
}

enum Stop {
    Cancelled,
    Failed(UpstreamError),
}

impl From<UpstreamError> for Stop {
    fn from(err: UpstreamError) -> Self {
        Stop::Failed(err)
    }
}

struct Turn<'a> {
    endpoint: &'a ChatEndpoint,
    state: TurnState,
    messages: Vec<Message>,
    tool_rounds: usize,
    tx: mpsc::Sender<TurnEvent>,
    cancel: CancellationToken,
}

impl Turn<'_> {
    fn transition(&mut self, next: TurnState) {
        tracing::trace!(
            surface = self.endpoint.surface.as_str(),
            from = self.state.as_str(),
            to = next.as_str(),
            "Turn state"
        );
        self.state = next;
    }

    async fn emit(&self, event: TurnEvent) -> Result<(), Stop> {
        if self.cancel.is_cancelled() {
            return Err(Stop::Cancelled);
        }
        self.tx.send(event).await.map_err(|_| Stop::Cancelled)
    }
}

pub struct Orchestrator {
    client: Arc<dyn CompletionClient>,
    settings: TurnSettings,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn CompletionClient>, settings: TurnSettings) -> Self {
        Self { client, settings }
    }

    /// Run one turn over `history` and report how it ended.
    ///
    /// Upstream failures and the turn deadline end the turn with a single
    /// `error` event. Tool failures never do: the model receives an error
    /// payload in place of the result and generation continues.
    pub async fn run_turn(
        &self,
        endpoint: &ChatEndpoint,
        history: Vec<Message>,
        tx: mpsc::Sender<TurnEvent>,
        cancel: CancellationToken,
    ) -> TurnOutcome {
        let started = Instant::now();
        let surface = endpoint.surface.as_str();
        let mut turn = Turn {
            endpoint,
            state: TurnState::Receiving,
            messages: history,
            tool_rounds: 0,
            tx,
            cancel: cancel.clone(),
        };

        tracing::info!(surface, history = turn.messages.len(), "Chat turn started");

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(Stop::Cancelled),
            outcome = tokio::time::timeout(self.settings.turn_timeout, self.drive(&mut turn)) => {
                outcome.unwrap_or(Err(Stop::Failed(UpstreamError::Timeout)))
            }
        };

        match result {
            Ok(reason) => {
                turn.transition(TurnState::Done);
                tracing::info!(
                    surface,
                    tool_rounds = turn.tool_rounds,
                    reason = ?reason,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Chat turn completed"
                );
            }
            Err(Stop::Cancelled) => {
                turn.transition(TurnState::Cancelled);
                tracing::info!(surface, tool_rounds = turn.tool_rounds, "Chat turn cancelled by client");
            }
            Err(Stop::Failed(err)) => {
                turn.transition(TurnState::Failed);
                tracing::error!(surface, error = %err, "Chat turn failed");
                // Best effort: the client may already be gone.
                let _ = turn
                    .tx
                    .send(TurnEvent::Error {
                        message: FALLBACK_MESSAGE.to_string(),
                    })
                    .await;
            }
        }

        metrics::counter!("chat_turns_total", "surface" => surface, "outcome" => turn.state.as_str())
            .increment(1);
        metrics::histogram!("chat_turn_duration_ms", "surface" => surface)
            .record(started.elapsed().as_millis() as f64);

        TurnOutcome {
            state: turn.state,
            messages: turn.messages,
            tool_rounds: turn.tool_rounds,
        }
    }

    async fn drive(&self, turn: &mut Turn<'_>) -> Result<DoneReason, Stop> {
        loop {
            turn.transition(TurnState::Generating);
            let (text, calls) = self.generate(turn).await?;

            if calls.is_empty() {
                turn.messages.push(Message::assistant(text));
                turn.emit(TurnEvent::Done {
                    reason: DoneReason::Stop,
                })
                .await?;
                return Ok(DoneReason::Stop);
            }

            if turn.tool_rounds >= self.settings.max_tool_rounds {
                tracing::warn!(
                    surface = turn.endpoint.surface.as_str(),
                    limit = self.settings.max_tool_rounds,
                    "Tool round limit reached"
                );
                turn.messages.push(Message::assistant(text));
                turn.emit(TurnEvent::Done {
                    reason: DoneReason::MaxToolRounds,
                })
                .await?;
                return Ok(DoneReason::MaxToolRounds);
            }

            turn.tool_rounds += 1;
            turn.messages
                .push(Message::assistant_with_tool_calls(text, calls.clone()));
            for call in &calls {
                turn.emit(TurnEvent::ToolCall(call.clone())).await?;
            }

            turn.transition(TurnState::ToolExecuting);
            let results = tokio::select! {
                biased;
                _ = turn.cancel.cancelled() => return Err(Stop::Cancelled),
                results = join_all(calls.iter().map(|call| self.execute_tool(turn.endpoint, call))) => results,
            };
            if turn.cancel.is_cancelled() {
                return Err(Stop::Cancelled);
            }

            for result in results {
                turn.messages.push(Message::tool(&result));
                turn.emit(TurnEvent::ToolResult(result)).await?;
            }
        }
    }

    /// Stream one completion, forwarding text and assembling tool calls.
    async fn generate(&self, turn: &mut Turn<'_>) -> Result<(String, Vec<ToolInvocation>), Stop> {
        let request = CompletionRequest {
            model: self.settings.model.clone(),
            system: turn.endpoint.system_prompt.to_string(),
            messages: turn.messages.clone(),
            tools: turn.endpoint.router.function_definitions(),
        };

        let mut stream = self.client.stream(request).await?;
        let mut text = String::new();
        let mut assembler = ToolCallAssembler::new();

        loop {
            let event = match tokio::time::timeout(self.settings.idle_timeout, stream.next()).await {
                Ok(Some(event)) => event?,
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!(
                        idle_ms = self.settings.idle_timeout.as_millis() as u64,
                        "Completion stream stalled"
                    );
                    return Err(Stop::Failed(UpstreamError::Timeout));
                }
            };

            match event {
                CompletionEvent::TextDelta(delta) => {
                    text.push_str(&delta);
                    turn.emit(TurnEvent::Text { delta }).await?;
                }
                CompletionEvent::ToolCallStarted { index, id, name } => {
                    if turn.state != TurnState::ToolPending {
                        turn.transition(TurnState::ToolPending);
                    }
                    assembler.on_started(index, id, name);
                }
                CompletionEvent::ToolCallDelta { index, fragment } => {
                    assembler.on_partial(index, &fragment);
                }
                CompletionEvent::Finished { reason } => {
                    tracing::debug!(reason = ?reason, "Completion finished");
                }
            }
        }

        Ok((text, assembler.finalize()))
    }

    async fn execute_tool(&self, endpoint: &ChatEndpoint, call: &ToolInvocation) -> ToolResult {
        let invocation = endpoint.router.invoke(&call.name, &call.arguments);
        let outcome = match tokio::time::timeout(self.settings.tool_timeout, invocation).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(tool = %call.name, "Tool execution timed out");
                metrics::counter!("tool_errors_total", "kind" => "timeout").increment(1);
                Err(ToolError::Timeout(call.name.clone()))
            }
        };

        match outcome {
            Ok(content) => ToolResult {
                tool_call_id: call.id.clone(),
                name: call.name.clone(),
                content,
                is_error: false,
            },
            Err(err) => ToolResult {
                tool_call_id: call.id.clone(),
                name: call.name.clone(),
                content: err.to_payload(),
                is_error: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::message::Role;
    use crate::chat::surface::ChatSurface;
    use crate::completion::CompletionStream;
    use crate::tools::registry::{ToolName, ToolRegistry, Toolset};
    use crate::tools::schema::{InputSchema, ParamSpec, ToolSpecification, ValidatedArguments};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::{Barrier, Notify};

    type Script = Vec<Result<CompletionEvent, UpstreamError>>;

    /// Replays one script per completion request and records the requests.
    struct ScriptedClient {
        scripts: Mutex<VecDeque<Result<Script, UpstreamError>>>,
        requests: Mutex<Vec<CompletionRequest>>,
        /// Keep streams open after their script instead of ending them.
        stall: AtomicBool,
    }

    impl ScriptedClient {
        fn new(scripts: Vec<Result<Script, UpstreamError>>) -> Arc<Self> {
            Arc::new(Self {
                scripts: Mutex::new(scripts.into()),
                requests: Mutex::new(Vec::new()),
                stall: AtomicBool::new(false),
            })
        }

        fn stall_after_script(&self) {
            self.stall.store(true, Ordering::SeqCst);
        }

        fn requests(&self) -> Vec<CompletionRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn stream(&self, request: CompletionRequest) -> Result<CompletionStream, UpstreamError> {
            self.requests.lock().unwrap().push(request);
            let script = self
                .scripts
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(UpstreamError::Connection("script exhausted".into())))?;
            let events = futures::stream::iter(script);
            if self.stall.load(Ordering::SeqCst) {
                return Ok(Box::pin(events.chain(futures::stream::pending())));
            }
            Ok(Box::pin(events))
        }
    }

    fn text(delta: &str) -> Result<CompletionEvent, UpstreamError> {
        Ok(CompletionEvent::TextDelta(delta.into()))
    }

    fn finished(reason: &str) -> Result<CompletionEvent, UpstreamError> {
        Ok(CompletionEvent::Finished {
            reason: Some(reason.into()),
        })
    }

    fn call(index: usize, id: &str, name: &str, arguments: Value) -> Script {
        vec![
            Ok(CompletionEvent::ToolCallStarted {
                index,
                id: id.into(),
                name: name.into(),
            }),
            Ok(CompletionEvent::ToolCallDelta {
                index,
                fragment: arguments.to_string(),
            }),
        ]
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestTool {
        Lookup,
        Rendezvous,
        Block,
    }

    impl ToolName for TestTool {
        const ALL: &'static [Self] = &[TestTool::Lookup, TestTool::Rendezvous, TestTool::Block];

        fn as_str(self) -> &'static str {
            match self {
                TestTool::Lookup => "lookup",
                TestTool::Rendezvous => "rendezvous",
                TestTool::Block => "block",
            }
        }
    }

    struct TestToolset {
        handled: AtomicUsize,
        barrier: Barrier,
        blocked: Notify,
    }

    #[async_trait]
    impl Toolset for TestToolset {
        type Tool = TestTool;

        fn specification(&self, tool: TestTool) -> ToolSpecification {
            match tool {
                TestTool::Lookup => ToolSpecification::new(
                    tool.as_str(),
                    "Echo a number",
                    InputSchema::new()
                        .param(ParamSpec::number("n", "Value"))
                        .param(ParamSpec::enumeration("mode", "Mode", &["fast", "slow"]).with_default("fast")),
                ),
                TestTool::Rendezvous => ToolSpecification::new(
                    tool.as_str(),
                    "Wait for a partner",
                    InputSchema::new().param(ParamSpec::number("n", "Value")),
                ),
                TestTool::Block => ToolSpecification::new(tool.as_str(), "Never return", InputSchema::new()),
            }
        }

        async fn execute(&self, tool: TestTool, args: ValidatedArguments) -> Result<Value, ToolError> {
            self.handled.fetch_add(1, Ordering::SeqCst);
            match tool {
                TestTool::Lookup => Ok(json!({ "n": args.get("n").cloned().unwrap_or(Value::Null) })),
                TestTool::Rendezvous => {
                    self.barrier.wait().await;
                    Ok(json!({ "n": args.get("n").cloned().unwrap_or(Value::Null) }))
                }
                TestTool::Block => {
                    self.blocked.notify_one();
                    futures::future::pending::<()>().await;
                    Ok(Value::Null)
                }
            }
        }
    }

    struct Harness {
        registry: Arc<ToolRegistry<TestToolset>>,
        endpoint: ChatEndpoint,
    }

    fn harness() -> Harness {
        let registry = Arc::new(
            ToolRegistry::new(TestToolset {
                handled: AtomicUsize::new(0),
                barrier: Barrier::new(2),
                blocked: Notify::new(),
            })
            .unwrap(),
        );
        let endpoint = ChatEndpoint::new(ChatSurface::General, registry.clone());
        Harness { registry, endpoint }
    }

    fn settings(max_tool_rounds: usize) -> TurnSettings {
        TurnSettings {
            model: "test-model".into(),
            turn_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(2),
            tool_timeout: Duration::from_secs(1),
            max_tool_rounds,
        }
    }

    async fn run(
        client: Arc<ScriptedClient>,
        endpoint: &ChatEndpoint,
        max_tool_rounds: usize,
    ) -> (TurnOutcome, Vec<TurnEvent>) {
        let orchestrator = Orchestrator::new(client, settings(max_tool_rounds));
        let (tx, mut rx) = mpsc::channel(64);
        let outcome = orchestrator
            .run_turn(endpoint, vec![Message::user("hello")], tx, CancellationToken::new())
            .await;

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        (outcome, events)
    }

    fn names(events: &[TurnEvent]) -> Vec<&'static str> {
        events.iter().map(TurnEvent::name).collect()
    }

    fn tool_results(events: &[TurnEvent]) -> Vec<&ToolResult> {
        events
            .iter()
            .filter_map(|e| match e {
                TurnEvent::ToolResult(result) => Some(result),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_text_only_turn() {
        let h = harness();
        let client = ScriptedClient::new(vec![Ok(vec![text("Hi"), text(" there"), finished("stop")])]);

        let (outcome, events) = run(client.clone(), &h.endpoint, 5).await;

        assert_eq!(outcome.state, TurnState::Done);
        assert_eq!(names(&events), vec!["text", "text", "done"]);
        let last = outcome.messages.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content.as_text(), "Hi there");

        let requests = client.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "test-model");
        assert_eq!(requests[0].tools.len(), 3);
    }

    #[tokio::test]
    async fn test_tool_round_appends_call_then_result_then_resumes() {
        let h = harness();
        let mut first = call(0, "call_1", "lookup", json!({ "n": 7 }));
        first.push(finished("tool_calls"));
        let client = ScriptedClient::new(vec![Ok(first), Ok(vec![text("Seven."), finished("stop")])]);

        let (outcome, events) = run(client.clone(), &h.endpoint, 5).await;

        assert_eq!(outcome.state, TurnState::Done);
        assert_eq!(outcome.tool_rounds, 1);
        assert_eq!(names(&events), vec!["tool_call", "tool_result", "text", "done"]);
        assert_eq!(tool_results(&events)[0].content, json!({ "n": 7 }));

        let resumed = &client.requests()[1].messages;
        assert_eq!(resumed.len(), 3);
        assert_eq!(resumed[1].role, Role::Assistant);
        assert_eq!(resumed[1].tool_calls[0].id, "call_1");
        assert_eq!(resumed[2].role, Role::Tool);
        assert_eq!(resumed[2].tool_call_id.as_deref(), Some("call_1"));
    }

    #[tokio::test]
    async fn test_invalid_enum_never_reaches_tool_and_generation_continues() {
        let h = harness();
        let mut first = call(0, "call_1", "lookup", json!({ "n": 1, "mode": "extreme" }));
        first.push(finished("tool_calls"));
        let client = ScriptedClient::new(vec![Ok(first), Ok(vec![text("Sorry."), finished("stop")])]);

        let (outcome, events) = run(client, &h.endpoint, 5).await;

        assert_eq!(outcome.state, TurnState::Done);
        let result = tool_results(&events)[0];
        assert!(result.is_error);
        assert_eq!(result.content["error"], "validation_error");
        assert_eq!(h.registry.toolset().handled.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_tool_becomes_error_payload() {
        let h = harness();
        let mut first = call(0, "call_1", "deleteEverything", json!({}));
        first.push(finished("tool_calls"));
        let client = ScriptedClient::new(vec![Ok(first), Ok(vec![text("I can't do that."), finished("stop")])]);

        let (outcome, events) = run(client, &h.endpoint, 5).await;

        assert_eq!(outcome.state, TurnState::Done);
        let result = tool_results(&events)[0];
        assert_eq!(result.content["error"], "unknown_tool");
        assert_eq!(result.tool_call_id, "call_1");
    }

    #[tokio::test]
    async fn test_invocations_run_concurrently_and_keep_invocation_order() {
        let h = harness();
        // Each rendezvous call only returns once both are running.
        let mut first = call(0, "call_a", "rendezvous", json!({ "n": 1 }));
        first.extend(call(1, "call_b", "rendezvous", json!({ "n": 2 })));
        first.push(finished("tool_calls"));
        let client = ScriptedClient::new(vec![Ok(first), Ok(vec![text("Both."), finished("stop")])]);

        let (outcome, events) = run(client, &h.endpoint, 5).await;

        assert_eq!(outcome.state, TurnState::Done);
        let results = tool_results(&events);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| !r.is_error));
        assert_eq!(results[0].tool_call_id, "call_a");
        assert_eq!(results[1].tool_call_id, "call_b");

        let tool_ids: Vec<_> = outcome
            .messages
            .iter()
            .filter_map(|m| m.tool_call_id.as_deref())
            .collect();
        assert_eq!(tool_ids, vec!["call_a", "call_b"]);
    }

    #[tokio::test]
    async fn test_upstream_failure_ends_turn_with_error_event() {
        let h = harness();
        let client = ScriptedClient::new(vec![Err(UpstreamError::Status {
            status: 500,
            body: "boom".into(),
        })]);

        let (outcome, events) = run(client, &h.endpoint, 5).await;

        assert_eq!(outcome.state, TurnState::Failed);
        assert_eq!(
            events,
            vec![TurnEvent::Error {
                message: FALLBACK_MESSAGE.to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_mid_stream_failure_after_text() {
        let h = harness();
        let client = ScriptedClient::new(vec![Ok(vec![
            text("Partial"),
            Err(UpstreamError::Protocol("bad frame".into())),
        ])]);

        let (outcome, events) = run(client, &h.endpoint, 5).await;

        assert_eq!(outcome.state, TurnState::Failed);
        assert_eq!(names(&events), vec!["text", "error"]);
    }

    #[tokio::test]
    async fn test_stalled_stream_fails_on_idle_timeout() {
        let h = harness();
        let client = ScriptedClient::new(vec![Ok(vec![text("Partial")])]);
        client.stall_after_script();

        let orchestrator = Orchestrator::new(
            client,
            TurnSettings {
                idle_timeout: Duration::from_millis(50),
                turn_timeout: Duration::from_secs(30),
                ..settings(5)
            },
        );
        let (tx, mut rx) = mpsc::channel(64);
        let started = Instant::now();
        let outcome = orchestrator
            .run_turn(&h.endpoint, vec![Message::user("hello")], tx, CancellationToken::new())
            .await;

        assert_eq!(outcome.state, TurnState::Failed);
        assert!(started.elapsed() < Duration::from_secs(5));
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        assert_eq!(names(&events), vec!["text", "error"]);
    }

    #[tokio::test]
    async fn test_tool_round_limit_closes_turn() {
        let h = harness();
        let mut round = call(0, "call_1", "lookup", json!({ "n": 1 }));
        round.push(finished("tool_calls"));
        let mut again = call(0, "call_2", "lookup", json!({ "n": 2 }));
        again.push(finished("tool_calls"));
        let client = ScriptedClient::new(vec![Ok(round), Ok(again)]);

        let (outcome, events) = run(client, &h.endpoint, 1).await;

        assert_eq!(outcome.state, TurnState::Done);
        assert_eq!(outcome.tool_rounds, 1);
        assert_eq!(
            events.last(),
            Some(&TurnEvent::Done {
                reason: DoneReason::MaxToolRounds
            })
        );
    }

    #[tokio::test]
    async fn test_cancellation_stops_emission_and_drops_pending_results() {
        let h = Arc::new(harness());
        let mut first = call(0, "call_1", "block", json!({}));
        first.push(finished("tool_calls"));
        let client = ScriptedClient::new(vec![Ok(first), Ok(vec![text("never"), finished("stop")])]);

        let orchestrator = Orchestrator::new(client.clone(), settings(5));
        let (tx, mut rx) = mpsc::channel(64);
        let cancel = CancellationToken::new();

        let task = {
            let h = h.clone();
            let cancel = cancel.clone();
            tokio::spawn(async move {
                orchestrator
                    .run_turn(&h.endpoint, vec![Message::user("hello")], tx, cancel)
                    .await
            })
        };

        h.registry.toolset().blocked.notified().await;
        cancel.cancel();
        let outcome = task.await.unwrap();

        assert_eq!(outcome.state, TurnState::Cancelled);
        assert!(outcome.messages.iter().all(|m| m.role != Role::Tool));
        assert_eq!(client.requests().len(), 1);

        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        assert_eq!(names(&events), vec!["tool_call"]);
    }

    #[tokio::test]
    async fn test_dropped_receiver_cancels_turn() {
        let h = harness();
        let client = ScriptedClient::new(vec![Ok(vec![text("Hi"), finished("stop")])]);
        let orchestrator = Orchestrator::new(client, settings(5));
        let (tx, rx) = mpsc::channel(64);
        drop(rx);

        let outcome = orchestrator
            .run_turn(&h.endpoint, vec![Message::user("hello")], tx, CancellationToken::new())
            .await;

        assert_eq!(outcome.state, TurnState::Cancelled);
    }
}
