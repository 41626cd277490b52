//! Job posting records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// A stored job posting.
///
/// The database is schema-less; beyond the fields the service cares about, a
/// posting may carry arbitrary attributes (salary range, location, description,
/// ...). Those round-trip through `extra` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Database-assigned identifier, serialized as an opaque hex string.
    #[serde(rename = "_id")]
    pub id: String,

    /// Poster identity. Immutable after creation.
    pub hr_email: String,

    pub title: String,

    pub company: String,

    /// Remaining posting attributes, stored verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for creating a job posting.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewJob {
    #[validate(email)]
    pub hr_email: String,

    #[validate(length(min = 1))]
    pub title: String,

    #[validate(length(min = 1))]
    pub company: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn job_round_trips_open_attributes() {
        let doc = json!({
            "_id": "674f1c2ab3d4e5f60718293a",
            "hr_email": "hr@acme.com",
            "title": "Engineer",
            "company": "Acme",
            "salary": "60k-80k",
            "requirements": ["rust", "sql"],
        });

        let job: Job = serde_json::from_value(doc.clone()).unwrap();
        assert_eq!(job.id, "674f1c2ab3d4e5f60718293a");
        assert_eq!(job.extra.get("salary"), Some(&json!("60k-80k")));

        let back = serde_json::to_value(&job).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn new_job_requires_valid_poster_email() {
        let body: NewJob = serde_json::from_value(json!({
            "hr_email": "not-an-email",
            "title": "Engineer",
            "company": "Acme",
        }))
        .unwrap();
        assert!(body.validate().is_err());
    }

    #[test]
    fn new_job_rejects_empty_title() {
        let body: NewJob = serde_json::from_value(json!({
            "hr_email": "hr@acme.com",
            "title": "",
            "company": "Acme",
        }))
        .unwrap();
        assert!(body.validate().is_err());
    }
}
