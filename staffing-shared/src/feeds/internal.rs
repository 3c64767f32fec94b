/// The built-in catalogue as a feed

use async_trait::async_trait;

use super::{FeedError, FeedFilter, FeedJob, FeedSource, JobFeed};
use crate::demo::catalogue::{self, CatalogueJob};

pub const ID_PREFIX: &str = "internal_";

#[derive(Debug, Clone, Copy, Default)]
pub struct InternalFeed;

impl InternalFeed {
    pub fn listings(&self) -> impl Iterator<Item = FeedJob> {
        catalogue::all().iter().map(FeedJob::from)
    }

    /// Looks up an `internal_<n>` id
    pub fn find(&self, id: &str) -> Option<FeedJob> {
        id.strip_prefix(ID_PREFIX)
            .and_then(catalogue::find)
            .map(FeedJob::from)
    }
}

#[async_trait]
impl JobFeed for InternalFeed {
    fn source(&self) -> FeedSource {
        FeedSource::Internal
    }

    async fn search(&self, filter: &FeedFilter, limit: u32) -> Result<Vec<FeedJob>, FeedError> {
        Ok(self
            .listings()
            .filter(|job| job.matches(filter))
            .take(limit as usize)
            .collect())
    }
}

impl From<&CatalogueJob> for FeedJob {
    fn from(job: &CatalogueJob) -> Self {
        let location_type = if job.location.to_lowercase().contains("remote") {
            "remote"
        } else {
            "onsite"
        };

        FeedJob {
            id: format!("{}{}", ID_PREFIX, job.id),
            source: FeedSource::Internal,
            external_id: job.id.to_string(),
            title: job.title.to_string(),
            company: job.company.to_string(),
            location: job.location.to_string(),
            location_type: location_type.to_string(),
            employment_type: job.employment_type.to_string(),
            salary: Some(job.salary.to_string()),
            salary_min: None,
            salary_max: None,
            currency: "USD".to_string(),
            industry: job.industry.to_string(),
            description: job.description.to_string(),
            requirements: job.requirements.iter().map(|s| s.to_string()).collect(),
            benefits: job.benefits.iter().map(|s| s.to_string()).collect(),
            skills: Vec::new(),
            apply_url: format!("/jobs/{}/apply", job.id),
            company_logo: None,
            posted_date: job.posted_date.to_string(),
            expires_date: None,
            featured: job.featured,
        }
    }
}
