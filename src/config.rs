use std::env;
use std::time::Duration;

const DEFAULT_COMPLETION_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub shutdown_timeout_secs: u64,
    /// Base URL of the OpenAI-compatible completion API (without `/chat/completions`).
    pub completion_api_base: String,
    /// Bearer token for the completion API. Requests go out unauthenticated when unset.
    pub completion_api_key: Option<String>,
    /// Model identifier sent with every completion request.
    pub completion_model: String,
    /// Upper bound for one chat turn, from the first upstream request to the closing
    /// event. Streaming time counts against it.
    pub turn_timeout_secs: u64,
    /// Longest gap allowed between two chunks of an upstream completion stream.
    pub stream_idle_timeout_secs: u64,
    /// Upper bound for a single tool invocation.
    pub tool_timeout_secs: u64,
    /// Generate/execute rounds allowed per turn before the turn is closed.
    pub max_tool_rounds: usize,
    /// Capacity of the event channel between the orchestrator and the SSE response.
    pub stream_buffer: usize,
    /// Base URL of the news/quiz backend. Proxy routes answer 503 when unset.
    pub backend_base_url: Option<String>,
    pub backend_timeout_secs: u64,
    /// Body limit for the multipart upload route.
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// `COMPLETION_API_KEY` falls back to `OPENAI_API_KEY`, so an existing
    /// OpenAI environment works unchanged.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            shutdown_timeout_secs: env::var("SHUTDOWN_TIMEOUT")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            completion_api_base: env::var("COMPLETION_API_BASE")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_API_BASE.to_string()),
            completion_api_key: env::var("COMPLETION_API_KEY")
                .or_else(|_| env::var("OPENAI_API_KEY"))
                .ok()
                .filter(|key| !key.trim().is_empty()),
            completion_model: env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string()),
            turn_timeout_secs: env::var("TURN_TIMEOUT")
                .unwrap_or_else(|_| "120".to_string())
                .parse()?,
            stream_idle_timeout_secs: env::var("STREAM_IDLE_TIMEOUT")
                .unwrap_or_else(|_| "15".to_string())
                .parse()?,
            tool_timeout_secs: env::var("TOOL_TIMEOUT")
                .unwrap_or_else(|_| "10".to_string())
                .parse()?,
            max_tool_rounds: env::var("MAX_TOOL_ROUNDS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()?,
            stream_buffer: env::var("STREAM_BUFFER")
                .unwrap_or_else(|_| "64".to_string())
                .parse()?,
            backend_base_url: env::var("BACKEND_API_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            backend_timeout_secs: env::var("BACKEND_TIMEOUT")
                .unwrap_or_else(|_| "120".to_string())
                .parse()?,
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| (25 * 1024 * 1024).to_string())
                .parse()?,
        })
    }

    pub fn turn_timeout(&self) -> Duration {
        Duration::from_secs(self.turn_timeout_secs)
    }

    pub fn stream_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.stream_idle_timeout_secs)
    }

    pub fn tool_timeout(&self) -> Duration {
        Duration::from_secs(self.tool_timeout_secs)
    }

    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout_secs: 30,
            completion_api_base: DEFAULT_COMPLETION_API_BASE.to_string(),
            completion_api_key: None,
            completion_model: DEFAULT_COMPLETION_MODEL.to_string(),
            turn_timeout_secs: 120,
            stream_idle_timeout_secs: 15,
            tool_timeout_secs: 10,
            max_tool_rounds: 5,
            stream_buffer: 64,
            backend_base_url: None,
            backend_timeout_secs: 120,
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}
