/// Arbeitnow job board API (no key required)
///
/// The board takes no search parameters; filters are applied locally to
/// the first page of listings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    employment_type, infer_industry, non_empty, FeedError, FeedFilter, FeedJob, FeedSource, JobFeed,
};

pub const DEFAULT_BASE_URL: &str = "https://www.arbeitnow.com/api/job-board-api";

#[derive(Debug, Clone)]
pub struct ArbeitnowFeed {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    data: Vec<ArbeitnowJob>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ArbeitnowJob {
    slug: String,
    company_name: String,
    title: String,
    description: String,
    remote: bool,
    url: String,
    tags: Vec<String>,
    job_types: Vec<String>,
    location: String,

    /// Unix seconds
    created_at: i64,
}

impl ArbeitnowFeed {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl JobFeed for ArbeitnowFeed {
    fn source(&self) -> FeedSource {
        FeedSource::Arbeitnow
    }

    async fn search(&self, filter: &FeedFilter, limit: u32) -> Result<Vec<FeedJob>, FeedError> {
        let response = self
            .client
            .get(&self.base_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[("page", "1")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let listing: Listing = response.json().await?;
        tracing::debug!(count = listing.data.len(), "Fetched Arbeitnow listings");

        Ok(listing
            .data
            .into_iter()
            .map(FeedJob::from)
            .filter(|job| job.matches(filter))
            .take(limit as usize)
            .collect())
    }
}

impl From<ArbeitnowJob> for FeedJob {
    fn from(job: ArbeitnowJob) -> Self {
        let remote = job.remote || job.location.to_lowercase().contains("remote");
        let industry = infer_industry(&format!("{} {}", job.tags.join(" "), job.title));
        let posted_date = DateTime::<Utc>::from_timestamp(job.created_at, 0)
            .map(|posted| posted.to_rfc3339())
            .unwrap_or_default();
        let location = non_empty(job.location).unwrap_or_else(|| {
            if remote { "Remote" } else { "Not Specified" }.to_string()
        });

        FeedJob {
            id: format!("arbeitnow_{}", job.slug),
            source: FeedSource::Arbeitnow,
            external_id: job.slug,
            title: job.title,
            company: non_empty(job.company_name).unwrap_or_else(|| "Company Not Listed".to_string()),
            location,
            location_type: if remote { "remote" } else { "onsite" }.to_string(),
            employment_type: employment_type(&job.job_types.join(" ")).to_string(),
            salary: None,
            salary_min: None,
            salary_max: None,
            currency: "USD".to_string(),
            industry: industry.to_string(),
            description: job.description,
            requirements: Vec::new(),
            benefits: Vec::new(),
            skills: job.tags,
            apply_url: job.url,
            company_logo: None,
            posted_date,
            expires_date: None,
            featured: false,
        }
    }
}
