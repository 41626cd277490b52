//! Application state.

use std::sync::Arc;

use desk_store::{ApplicationRepository, JobRepository, StoreClient};

use crate::auth::TokenService;
use crate::config::ApiConfig;
use crate::services::EnrichmentService;

/// Shared application state. Repositories are injected here and passed to every
/// handler through the router; nothing in the service is a module-level
/// singleton.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub tokens: Arc<TokenService>,
    pub jobs: JobRepository,
    pub applications: ApplicationRepository,
    pub enricher: EnrichmentService,
}

impl AppState {
    /// Create new application state from the environment.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let store = StoreClient::from_env()?;
        let tokens = TokenService::from_env()?;
        Ok(Self::from_parts(config, store, tokens))
    }

    /// Assemble state from explicit parts. Tests use this to point the
    /// repositories at a stand-in Data API endpoint.
    pub fn from_parts(config: ApiConfig, store: StoreClient, tokens: TokenService) -> Self {
        let jobs = JobRepository::new(store.clone());
        let applications = ApplicationRepository::new(store);
        let enricher = EnrichmentService::new(jobs.clone());

        Self {
            config,
            tokens: Arc::new(tokens),
            jobs,
            applications,
            enricher,
        }
    }
}
