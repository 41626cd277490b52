//! Axum HTTP API server for the Dream Desk job board.
//!
//! This crate provides:
//! - The job and application endpoints
//! - Cookie-based token authentication
//! - CORS, request logging and security-header middleware
//! - Prometheus metrics

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use auth::{AuthUser, TokenService};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::EnrichmentService;
pub use state::AppState;
