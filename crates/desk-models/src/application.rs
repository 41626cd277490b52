//! Job application records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// A stored job application.
///
/// `job_id` is a plain-string back-reference to a job posting; no referential
/// integrity is enforced. `title` and `company` are not stored; the enricher
/// copies them from the referenced job before a response is sent, and they are
/// omitted from the JSON when the job no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    #[serde(rename = "_id")]
    pub id: String,

    pub job_id: String,

    /// Applicant identity.
    pub user_email: String,

    /// Open status string ("pending", "accepted", "rejected", ...); absent until
    /// a reviewer sets one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for submitting an application.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewApplication {
    #[validate(length(min = 1))]
    pub job_id: String,

    #[validate(email)]
    pub user_email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for the status update endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StatusUpdate {
    #[validate(length(min = 1))]
    pub status: String,
}
