use crate::backend::BackendClient;
use crate::chat::{ChatEndpoints, Orchestrator, TurnSettings};
use crate::completion::{CompletionClient, OpenAiClient};
use crate::config::Config;
use crate::dataset::KnowledgeStore;
use crate::error::{AppError, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Application state shared across all request handlers.
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub endpoints: Arc<ChatEndpoints>,
    pub knowledge: Arc<KnowledgeStore>,
    /// `None` when no backend is configured; proxy routes answer 503.
    pub backend: Option<BackendClient>,
    /// Flag indicating the service is ready (registries built, clients configured)
    pub ready: AtomicBool,
    pub config: Arc<Config>,
}

impl AppState {
    /// Initialize application state against the configured completion API.
    pub fn new(config: Config) -> Result<Self> {
        let client = OpenAiClient::new(
            config.completion_api_base.clone(),
            config.completion_api_key.clone(),
        )
        .map_err(|e| AppError::InternalError(format!("Failed to build completion client: {}", e)))?;

        if config.completion_api_key.is_none() {
            tracing::warn!("No completion API key configured; requests go out unauthenticated");
        }

        Self::with_completion_client(config, Arc::new(client))
    }

    /// Initialize application state with an explicit completion client.
    pub fn with_completion_client(
        config: Config,
        client: Arc<dyn CompletionClient>,
    ) -> Result<Self> {
        let knowledge = Arc::new(KnowledgeStore::seeded());
        let endpoints = ChatEndpoints::build(Arc::clone(&knowledge))
            .map_err(|e| AppError::InternalError(format!("Failed to build tool registries: {}", e)))?;

        let backend = match &config.backend_base_url {
            Some(url) => {
                let client = BackendClient::new(url.clone(), config.backend_timeout()).map_err(|e| {
                    AppError::InternalError(format!("Failed to build backend client: {}", e))
                })?;
                tracing::info!(backend = %url, "Backend proxy enabled");
                Some(client)
            }
            None => {
                tracing::info!("BACKEND_API_BASE_URL not set; news and quiz routes disabled");
                None
            }
        };

        let orchestrator = Orchestrator::new(client, TurnSettings::from(&config));

        let state = Self {
            orchestrator: Arc::new(orchestrator),
            endpoints: Arc::new(endpoints),
            knowledge,
            backend,
            ready: AtomicBool::new(false),
            config: Arc::new(config),
        };

        state.ready.store(true, Ordering::SeqCst);

        Ok(state)
    }

    /// Check if the service is ready to handle requests.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    pub fn backend(&self) -> Result<&BackendClient> {
        self.backend
            .as_ref()
            .ok_or_else(|| AppError::ResourceError("Backend service is not configured".to_string()))
    }
}
