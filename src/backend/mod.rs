//! Client for the external news, quiz and legacy assistant backend.
//!
//! Payloads pass through untouched; only the engagement and assistant
//! requests are typed because the proxy validates them first.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Backend resource not found: {0}")]
    NotFound(String),

    #[error("Backend server error (HTTP {status}): {body}")]
    Server { status: u16, body: String },

    #[error("Backend rejected the request (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("No response from backend: {0}")]
    Unavailable(String),

    #[error("Backend response could not be decoded: {0}")]
    Decode(String),

    #[error("Invalid post id: {0:?}")]
    InvalidId(String),
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            BackendError::Server { .. } | BackendError::Decode(_) => {
                AppError::UpstreamError(err.to_string())
            }
            BackendError::Unavailable(_) => AppError::ResourceError(err.to_string()),
            BackendError::Rejected { .. } | BackendError::InvalidId(_) => {
                AppError::ValidationError(err.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngagementAction {
    Like,
    Comment,
    Share,
}

/// `{action, ...payload}` as the backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngagementRequest {
    pub action: EngagementAction,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotTurn {
    pub role: BotRole,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BotRequest {
    pub message: String,
    #[serde(default)]
    pub chat_history: Vec<BotTurn>,
}

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn fetch_posts(&self) -> Result<Value, BackendError> {
        self.send("news", self.http.get(self.url("/news"))).await
    }

    pub async fn create_post(&self, post: &Value) -> Result<Value, BackendError> {
        self.send("post_news", self.http.post(self.url("/post_news")).json(post))
            .await
    }

    pub async fn post_engagement(
        &self,
        post_id: &str,
        engagement: &EngagementRequest,
    ) -> Result<(), BackendError> {
        let path = format!("/news/{}/engagement", path_segment(post_id)?);
        self.send("engagement", self.http.post(self.url(&path)).json(engagement))
            .await
            .map(|_| ())
    }

    pub async fn fetch_comments(&self, post_id: &str) -> Result<Value, BackendError> {
        let path = format!("/news/{}/comments", path_segment(post_id)?);
        self.send("comments", self.http.get(self.url(&path))).await
    }

    pub async fn generate_quiz_question(&self) -> Result<Value, BackendError> {
        self.send("quiz", self.http.post(self.url("/quiz/generate-question")))
            .await
    }

    pub async fn chat_with_bot(&self, request: &BotRequest) -> Result<Value, BackendError> {
        self.send("chat", self.http.post(self.url("/chat")).json(request))
            .await
    }

    /// Send, classify the outcome, and decode a JSON body. An empty body
    /// decodes to `null`.
    async fn send(
        &self,
        route: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<Value, BackendError> {
        let result = execute(route, request).await;

        match &result {
            Ok(_) => {
                metrics::counter!("backend_requests_total", "route" => route, "outcome" => "ok")
                    .increment(1);
            }
            Err(err) => {
                match err {
                    BackendError::NotFound(_) => tracing::error!(route, "Resource not found."),
                    BackendError::Server { status, .. } => {
                        tracing::error!(route, status, "Server error. Please try again later.")
                    }
                    BackendError::Unavailable(e) => {
                        tracing::error!(route, error = %e, "No response received from server.")
                    }
                    other => tracing::warn!(route, error = %other, "Backend request failed"),
                }
                metrics::counter!("backend_requests_total", "route" => route, "outcome" => "error")
                    .increment(1);
            }
        }

        result
    }
}

async fn execute(route: &'static str, request: reqwest::RequestBuilder) -> Result<Value, BackendError> {
    let response = request
        .header("accept", "application/json")
        .send()
        .await
        .map_err(|e| BackendError::Unavailable(e.to_string()))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| BackendError::Unavailable(e.to_string()))?;

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(BackendError::NotFound(route.to_string()));
    }
    if status.is_server_error() {
        return Err(BackendError::Server {
            status: status.as_u16(),
            body,
        });
    }
    if !status.is_success() {
        return Err(BackendError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| BackendError::Decode(e.to_string()))
}

/// Post ids are interpolated into backend paths, so only plain identifier
/// characters are accepted.
fn path_segment(id: &str) -> Result<&str, BackendError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(id)
    } else {
        Err(BackendError::InvalidId(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client(server: &mockito::ServerGuard) -> BackendClient {
        BackendClient::new(server.url(), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_posts_passes_body_through() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/news")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":"1","content":"Pulse session"}]"#)
            .create_async()
            .await;

        let posts = client(&server).fetch_posts().await.unwrap();

        mock.assert_async().await;
        assert_eq!(posts[0]["content"], "Pulse session");
    }

    #[tokio::test]
    async fn test_engagement_flattens_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/news/42/engagement")
            .match_body(Matcher::Json(json!({ "action": "comment", "comment": "Great talk" })))
            .with_status(204)
            .create_async()
            .await;

        let request: EngagementRequest =
            serde_json::from_value(json!({ "action": "comment", "comment": "Great talk" })).unwrap();
        client(&server).post_engagement("42", &request).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bot_request_shape() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat")
            .match_body(Matcher::Json(json!({
                "message": "When is the townhall?",
                "chat_history": [{ "role": "user", "content": "hi" }]
            })))
            .with_status(200)
            .with_body(r#"{"response":"July 30th"}"#)
            .create_async()
            .await;

        let reply = client(&server)
            .chat_with_bot(&BotRequest {
                message: "When is the townhall?".into(),
                chat_history: vec![BotTurn {
                    role: BotRole::User,
                    content: "hi".into(),
                }],
            })
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(reply["response"], "July 30th");
    }

    #[tokio::test]
    async fn test_status_classification() {
        let mut server = mockito::Server::new_async().await;
        let _missing = server
            .mock("GET", "/news/7/comments")
            .with_status(404)
            .create_async()
            .await;
        let _broken = server
            .mock("POST", "/quiz/generate-question")
            .with_status(503)
            .with_body("down")
            .create_async()
            .await;
        let backend = client(&server);

        let err = backend.fetch_comments("7").await.unwrap_err();
        assert!(matches!(err, BackendError::NotFound(_)));
        assert!(matches!(AppError::from(err), AppError::NotFoundError(_)));

        let err = backend.generate_quiz_question().await.unwrap_err();
        assert_eq!(
            err,
            BackendError::Server {
                status: 503,
                body: "down".into()
            }
        );
        assert!(matches!(AppError::from(err), AppError::UpstreamError(_)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_unavailable() {
        let backend = BackendClient::new("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let err = backend.fetch_posts().await.unwrap_err();
        assert!(matches!(err, BackendError::Unavailable(_)));
        assert!(matches!(AppError::from(err), AppError::ResourceError(_)));
    }

    #[test]
    fn test_path_segment_rejects_traversal() {
        assert!(path_segment("abc-123").is_ok());
        assert!(matches!(path_segment("../admin"), Err(BackendError::InvalidId(_))));
        assert!(path_segment("").is_err());
    }
}
