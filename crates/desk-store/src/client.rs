//! Data API client.
//!
//! Thin wrapper over the document database's HTTPS Data API: every operation is
//! a `POST {base}/action/{name}` carrying the data source, database, collection,
//! and the action arguments as JSON. Authentication is a static `api-key`
//! header. The client never pings the database at startup; connectivity
//! problems surface lazily on the first request that needs the store.

use std::time::{Duration, Instant};

use reqwest::{header, Client, StatusCode};
use serde_json::{json, Map, Value};
use tracing::{info_span, Instrument};

use crate::error::{StoreError, StoreResult};
use crate::metrics::record_request;
use crate::retry::RetryConfig;
use crate::retry::with_retry;
use crate::types::{self, InsertedId, UpdateReport};

/// Header carrying the Data API key.
const API_KEY_HEADER: &str = "api-key";

// =============================================================================
// Configuration
// =============================================================================

/// Data API client configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Data API base URL (up to and excluding `/action/...`)
    pub base_url: String,
    /// Data API key
    pub api_key: String,
    /// Cluster name
    pub data_source: String,
    /// Database name
    pub database: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
}

impl StoreConfig {
    /// Create config from environment variables.
    pub fn from_env() -> StoreResult<Self> {
        let base_url = std::env::var("DATA_API_URL")
            .map_err(|_| StoreError::request_failed("DATA_API_URL must be set to reach the database"))?
            .trim_end_matches('/')
            .to_string();

        let api_key = std::env::var("DATA_API_KEY")
            .map_err(|_| StoreError::auth_error("DATA_API_KEY must be set to reach the database"))?;
        if api_key.is_empty() {
            return Err(StoreError::auth_error("DATA_API_KEY cannot be empty"));
        }

        let connect_timeout_secs: u64 = std::env::var("STORE_CONNECT_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            base_url,
            api_key,
            data_source: std::env::var("DATA_SOURCE").unwrap_or_else(|_| "Cluster0".to_string()),
            database: std::env::var("DATA_API_DATABASE")
                .unwrap_or_else(|_| "dream_desk".to_string()),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            retry: RetryConfig::from_env(),
        })
    }
}

// =============================================================================
// Client
// =============================================================================

/// Data API client. Cheap to clone; all clones share the connection pool.
#[derive(Clone)]
pub struct StoreClient {
    http: Client,
    config: StoreConfig,
}

impl StoreClient {
    /// Create a new client.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("desk-store/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(StoreError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> StoreResult<Self> {
        Self::new(StoreConfig::from_env()?)
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Find all documents matching a filter.
    pub async fn find(&self, collection: &str, filter: Value) -> StoreResult<Vec<Value>> {
        let mut response = self
            .action("find", collection, json!({ "filter": filter }))
            .await?;

        match response.get_mut("documents").map(Value::take) {
            Some(Value::Array(docs)) => Ok(docs),
            _ => Err(StoreError::invalid_response(
                "find response missing documents array",
            )),
        }
    }

    /// Find a single document matching a filter.
    pub async fn find_one(&self, collection: &str, filter: Value) -> StoreResult<Option<Value>> {
        let mut response = self
            .action("findOne", collection, json!({ "filter": filter }))
            .await?;

        match response.get_mut("document").map(Value::take) {
            Some(Value::Null) => Ok(None),
            Some(doc) => Ok(Some(doc)),
            None => Err(StoreError::invalid_response(
                "findOne response missing document field",
            )),
        }
    }

    /// Insert a document verbatim.
    pub async fn insert_one(&self, collection: &str, document: Value) -> StoreResult<InsertedId> {
        let response = self
            .action("insertOne", collection, json!({ "document": document }))
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    /// Apply an update to the first document matching a filter.
    pub async fn update_one(
        &self,
        collection: &str,
        filter: Value,
        update: Value,
    ) -> StoreResult<UpdateReport> {
        let response = self
            .action(
                "updateOne",
                collection,
                json!({ "filter": filter, "update": update }),
            )
            .await?;
        Ok(serde_json::from_value(response)?)
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Run one named action against a collection, with retry, returning the
    /// normalized response body.
    async fn action(&self, action: &str, collection: &str, args: Value) -> StoreResult<Value> {
        let url = format!("{}/action/{}", self.config.base_url, action);

        let mut payload = Map::new();
        payload.insert("dataSource".into(), Value::String(self.config.data_source.clone()));
        payload.insert("database".into(), Value::String(self.config.database.clone()));
        payload.insert("collection".into(), Value::String(collection.to_string()));
        if let Value::Object(extra) = args {
            payload.extend(extra);
        }
        let payload = Value::Object(payload);

        self.execute_action(action, collection, async {
            with_retry(&self.config.retry, action, || self.send(&url, &payload)).await
        })
        .await
    }

    /// One HTTP attempt.
    async fn send(&self, url: &str, payload: &Value) -> StoreResult<Value> {
        let response = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        match status {
            StatusCode::OK | StatusCode::CREATED => {
                let body: Value = response.json().await?;
                Ok(types::normalize(body))
            }
            _ => Err(Self::handle_error_response(status, url, response).await),
        }
    }

    /// Wrap an action future with a tracing span and request metrics.
    async fn execute_action<T, F>(&self, action: &str, collection: &str, fut: F) -> StoreResult<T>
    where
        F: std::future::Future<Output = StoreResult<T>>,
    {
        let span = info_span!("store_request", action = %action, collection = %collection);

        let start = Instant::now();
        let result = fut.instrument(span).await;
        let latency_ms = start.elapsed().as_millis() as f64;

        let status = match &result {
            Ok(_) => 200,
            Err(e) => e.http_status().unwrap_or(500),
        };
        record_request(action, status, latency_ms);

        result
    }

    async fn handle_error_response(
        status: StatusCode,
        url: &str,
        response: reqwest::Response,
    ) -> StoreError {
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_ms = response
                .headers()
                .get(header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(|secs| secs * 1000)
                .unwrap_or(1000);
            return StoreError::RateLimited(retry_after_ms);
        }

        let body = response.text().await.unwrap_or_default();
        StoreError::from_http_status(status.as_u16(), format!("{} failed: {}", url, body))
    }
}

// =============================================================================
// Tests
// =============================================================================
