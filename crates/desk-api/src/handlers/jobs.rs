//! Job posting handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use desk_models::{Job, NewJob, ObjectId};
use desk_store::InsertedId;

use crate::error::ApiResult;
use crate::state::AppState;

/// Query parameters for the job listing endpoint.
#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    /// Restrict the listing to postings owned by this poster identity.
    pub email: Option<String>,
}

/// List job postings, optionally filtered by poster.
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobsQuery>,
) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.jobs.list(query.email.as_deref()).await?;
    Ok(Json(jobs))
}

/// Get a single job posting. Responds with `null` for a well-formed id that
/// matches nothing; malformed ids are a 400.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Option<Job>>> {
    let id: ObjectId = id.parse()?;
    Ok(Json(state.jobs.get(&id).await?))
}

/// Create a job posting.
pub async fn create_job(
    State(state): State<AppState>,
    Json(body): Json<NewJob>,
) -> ApiResult<Json<InsertedId>> {
    body.validate()?;
    Ok(Json(state.jobs.create(&body).await?))
}
