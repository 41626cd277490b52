//! Typed repository for job applications.

use serde_json::json;
use tracing::info;

use desk_models::{Application, NewApplication, ObjectId};

use crate::client::StoreClient;
use crate::error::StoreResult;
use crate::types::{self, InsertedId, UpdateReport};

/// Collection holding job applications. The casing is inherited from the
/// deployed database and must not be changed.
pub const APPLICATIONS_COLLECTION: &str = "jobs-Application";

/// Repository for job application documents.
#[derive(Clone)]
pub struct ApplicationRepository {
    client: StoreClient,
}

impl ApplicationRepository {
    /// Create a new application repository.
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// List all applications submitted by an applicant.
    pub async fn list_by_applicant(&self, email: &str) -> StoreResult<Vec<Application>> {
        let docs = self
            .client
            .find(APPLICATIONS_COLLECTION, json!({ "user_email": email }))
            .await?;
        docs.into_iter()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .collect()
    }

    /// List all applications referencing a job.
    ///
    /// `job_id` is stored and matched as a plain string field, not as the
    /// database's native identifier type.
    pub async fn list_by_job(&self, job_id: &str) -> StoreResult<Vec<Application>> {
        let docs = self
            .client
            .find(APPLICATIONS_COLLECTION, json!({ "job_id": job_id }))
            .await?;
        docs.into_iter()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .collect()
    }

    /// Insert a new application.
    pub async fn create(&self, application: &NewApplication) -> StoreResult<InsertedId> {
        let result = self
            .client
            .insert_one(APPLICATIONS_COLLECTION, serde_json::to_value(application)?)
            .await?;
        info!("Created job application: {}", result.inserted_id);
        Ok(result)
    }

    /// Set the `status` field of one application.
    ///
    /// An id that matches nothing reports `matched_count == 0` rather than
    /// failing; the caller decides what that means.
    pub async fn update_status(&self, id: &ObjectId, status: &str) -> StoreResult<UpdateReport> {
        self.client
            .update_one(
                APPLICATIONS_COLLECTION,
                json!({ "_id": types::oid(id) }),
                json!({ "$set": { "status": status } }),
            )
            .await
    }
}
