//! Application enrichment: attach job details to application records.

use desk_models::Application;
use desk_store::JobRepository;

use crate::error::ApiResult;

/// Copies `title` and `company` from referenced jobs onto applications before
/// they are serialized.
///
/// The referenced jobs are fetched in one batched query: distinct job ids, a
/// single `$in` lookup, then an in-memory map join. An application whose job no
/// longer exists (or whose `job_id` is not a well-formed identifier) passes
/// through untouched.
#[derive(Clone)]
pub struct EnrichmentService {
    jobs: JobRepository,
}

impl EnrichmentService {
    pub fn new(jobs: JobRepository) -> Self {
        Self { jobs }
    }

    /// Attach job details to each application that references a stored job.
    pub async fn attach_job_details(
        &self,
        mut applications: Vec<Application>,
    ) -> ApiResult<Vec<Application>> {
        if applications.is_empty() {
            return Ok(applications);
        }

        let mut ids: Vec<String> = applications
            .iter()
            .map(|application| application.job_id.clone())
            .collect();
        ids.sort();
        ids.dedup();

        let jobs = self.jobs.find_by_ids(&ids).await?;

        for application in &mut applications {
            if let Some(job) = jobs.get(&application.job_id) {
                application.title = Some(job.title.clone());
                application.company = Some(job.company.clone());
            }
        }

        Ok(applications)
    }
}
