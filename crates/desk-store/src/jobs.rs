//! Typed repository for job postings.

use std::collections::HashMap;

use serde_json::json;
use tracing::info;

use desk_models::{Job, NewJob, ObjectId};

use crate::client::StoreClient;
use crate::error::StoreResult;
use crate::types::{self, InsertedId};

/// Collection holding job postings.
pub const JOBS_COLLECTION: &str = "jobs";

/// Repository for job posting documents.
#[derive(Clone)]
pub struct JobRepository {
    client: StoreClient,
}

impl JobRepository {
    /// Create a new job repository.
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// List all jobs, or only those posted by `poster_email`.
    ///
    /// No pagination; the full result set is materialized in storage order.
    pub async fn list(&self, poster_email: Option<&str>) -> StoreResult<Vec<Job>> {
        let filter = match poster_email {
            Some(email) => json!({ "hr_email": email }),
            None => json!({}),
        };

        let docs = self.client.find(JOBS_COLLECTION, filter).await?;
        docs.into_iter()
            .map(|doc| Ok(serde_json::from_value(doc)?))
            .collect()
    }

    /// Get a job by id. `None` when the id is well-formed but absent.
    pub async fn get(&self, id: &ObjectId) -> StoreResult<Option<Job>> {
        let doc = self
            .client
            .find_one(JOBS_COLLECTION, json!({ "_id": types::oid(id) }))
            .await?;

        match doc {
            Some(doc) => Ok(Some(serde_json::from_value(doc)?)),
            None => Ok(None),
        }
    }

    /// Insert a new job posting.
    pub async fn create(&self, job: &NewJob) -> StoreResult<InsertedId> {
        let result = self
            .client
            .insert_one(JOBS_COLLECTION, serde_json::to_value(job)?)
            .await?;
        info!("Created job posting: {}", result.inserted_id);
        Ok(result)
    }

    /// Fetch several jobs in one query, keyed by id.
    ///
    /// Ids that are not well-formed identifiers are skipped; they cannot match
    /// a stored document. An empty id set short-circuits without a query.
    pub async fn find_by_ids(&self, ids: &[String]) -> StoreResult<HashMap<String, Job>> {
        let oids: Vec<serde_json::Value> = ids
            .iter()
            .filter(|id| ObjectId::is_valid(id))
            .map(|id| json!({ "$oid": id }))
            .collect();

        if oids.is_empty() {
            return Ok(HashMap::new());
        }

        let docs = self
            .client
            .find(JOBS_COLLECTION, json!({ "_id": { "$in": oids } }))
            .await?;

        let mut jobs = HashMap::with_capacity(docs.len());
        for doc in docs {
            let job: Job = serde_json::from_value(doc)?;
            jobs.insert(job.id.clone(), job);
        }
        Ok(jobs)
    }
}
