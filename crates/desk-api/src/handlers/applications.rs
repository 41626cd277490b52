//! Job application handlers.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use desk_models::{Application, NewApplication, ObjectId, StatusUpdate};
use desk_store::{InsertedId, UpdateReport};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Query parameters for the applicant listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ApplicantQuery {
    pub email: Option<String>,
}

/// List the authenticated applicant's applications, enriched with job details.
///
/// The claim in the token must match the requested identity exactly; anything
/// else, including an absent query value, is a 403. The 401 for a missing or
/// invalid token happens in the extractor, before this body runs.
pub async fn list_applications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ApplicantQuery>,
) -> ApiResult<Json<Vec<Application>>> {
    let requested = query.email.as_deref().unwrap_or_default();
    if user.email != requested {
        return Err(ApiError::forbidden("Forbidden access"));
    }

    let applications = state.applications.list_by_applicant(requested).await?;
    let applications = state.enricher.attach_job_details(applications).await?;
    Ok(Json(applications))
}

/// List all applications referencing a job. `job_id` is matched as a plain
/// string, so no id parsing happens here.
pub async fn list_applications_for_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> ApiResult<Json<Vec<Application>>> {
    Ok(Json(state.applications.list_by_job(&job_id).await?))
}

/// Submit a job application.
pub async fn create_application(
    State(state): State<AppState>,
    Json(body): Json<NewApplication>,
) -> ApiResult<Json<InsertedId>> {
    body.validate()?;
    Ok(Json(state.applications.create(&body).await?))
}

/// Update an application's status. An unknown id reports zero matches rather
/// than failing.
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> ApiResult<Json<UpdateReport>> {
    body.validate()?;
    let id: ObjectId = id.parse()?;
    Ok(Json(state.applications.update_status(&id, &body.status).await?))
}
