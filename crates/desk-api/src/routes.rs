//! API routes.

use axum::middleware;
use axum::routing::{get, patch, post};
use axum::Router;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::applications::{
    create_application, list_applications, list_applications_for_job, update_application_status,
};
use crate::handlers::health::live;
use crate::handlers::jobs::{create_job, get_job, list_jobs};
use crate::handlers::session::{issue_session, logout};
use crate::metrics::metrics_middleware;
use crate::middleware::{cors_layer, request_id, request_logging, security_headers};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    let job_routes = Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/jobs/:id", get(get_job));

    let session_routes = Router::new()
        .route("/jwt", post(issue_session))
        .route("/logout", post(logout));

    let application_routes = Router::new()
        // Applicant's own listing; the only authenticated route
        .route("/jobs-application", get(list_applications))
        .route("/jobs-applications", post(create_application))
        .route("/jobs-applications/jobs/:job_id", get(list_applications_for_job))
        .route("/jobs-applications/:id", patch(update_application_status));

    // Metrics endpoint (if enabled)
    let metrics_routes = if let Some(handle) = metrics_handle {
        Router::new().route("/metrics", get(move || async move { handle.render() }))
    } else {
        Router::new()
    };

    Router::new()
        .route("/", get(live))
        .merge(job_routes)
        .merge(session_routes)
        .merge(application_routes)
        .merge(metrics_routes)
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(security_headers))
        .layer(middleware::from_fn(request_id))
        .layer(middleware::from_fn(request_logging))
        .layer(cors_layer(&state.config.cors_origins))
        .with_state(state)
}
