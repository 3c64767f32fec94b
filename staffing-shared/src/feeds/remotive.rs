/// Remotive public API (no key required)

use async_trait::async_trait;
use serde::Deserialize;

use super::{employment_type, non_empty, FeedError, FeedFilter, FeedJob, FeedSource, JobFeed};

pub const DEFAULT_BASE_URL: &str = "https://remotive.com/api/remote-jobs";

const SKILL_KEYWORDS: &[&str] = &[
    "JavaScript",
    "Python",
    "React",
    "Node.js",
    "TypeScript",
    "AWS",
    "Docker",
    "Kubernetes",
    "SQL",
    "PostgreSQL",
    "MongoDB",
    "Git",
    "CI/CD",
    "Agile",
    "Scrum",
];

#[derive(Debug, Clone)]
pub struct RemotiveFeed {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct RemotiveJob {
    id: u64,
    url: String,
    title: String,
    company_name: String,
    company_logo: Option<String>,
    category: String,
    job_type: String,
    publication_date: String,
    candidate_required_location: String,
    salary: String,
    description: String,
}

impl RemotiveFeed {
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
impl JobFeed for RemotiveFeed {
    fn source(&self) -> FeedSource {
        FeedSource::Remotive
    }

    async fn search(&self, filter: &FeedFilter, limit: u32) -> Result<Vec<FeedJob>, FeedError> {
        let mut params = vec![("limit", limit.to_string())];
        if let Some(query) = &filter.query {
            params.push(("search", query.clone()));
        }
        if let Some(category) = filter.industry.as_deref().and_then(category_for) {
            params.push(("category", category.to_string()));
        }

        let response = self
            .client
            .get(&self.base_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let listing: Listing = response.json().await?;
        tracing::debug!(count = listing.jobs.len(), "Fetched Remotive listings");

        Ok(listing
            .jobs
            .into_iter()
            .map(FeedJob::from)
            .filter(|job| job.matches(filter))
            .take(limit as usize)
            .collect())
    }
}

fn industry_for(category: &str) -> &'static str {
    match category {
        "software-dev" | "product" | "data" | "devops" | "qa" => "Technology",
        "customer-support" => "Customer Service",
        "design" | "writing" => "Creative",
        "marketing" => "Marketing",
        "sales" => "Sales",
        "business" => "Business",
        "finance-legal" => "Finance",
        "hr" => "Human Resources",
        "all-others" => "Other",
        _ => "Technology",
    }
}

fn category_for(industry: &str) -> Option<&'static str> {
    match industry {
        "Technology" => Some("software-dev"),
        "Marketing" => Some("marketing"),
        "Sales" => Some("sales"),
        "Finance" => Some("finance-legal"),
        "Creative" => Some("design"),
        "Customer Service" => Some("customer-support"),
        "Human Resources" => Some("hr"),
        _ => None,
    }
}

/// First two numbers in a salary string, read as thousands
fn salary_bounds(salary: &str) -> (Option<i64>, Option<i64>) {
    let numbers: Vec<i64> = salary
        .split(|c: char| !c.is_ascii_digit())
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect();

    match numbers.as_slice() {
        [min, max, ..] => (Some(min * 1000), Some(max * 1000)),
        _ => (None, None),
    }
}

impl From<RemotiveJob> for FeedJob {
    fn from(job: RemotiveJob) -> Self {
        let (salary_min, salary_max) = salary_bounds(&job.salary);
        let description = job.description.to_lowercase();
        let skills = SKILL_KEYWORDS
            .iter()
            .filter(|skill| description.contains(&skill.to_lowercase()))
            .map(|skill| skill.to_string())
            .collect();

        FeedJob {
            id: format!("remotive_{}", job.id),
            source: FeedSource::Remotive,
            external_id: job.id.to_string(),
            title: job.title,
            company: non_empty(job.company_name).unwrap_or_else(|| "Company Not Listed".to_string()),
            location: non_empty(job.candidate_required_location)
                .unwrap_or_else(|| "Worldwide".to_string()),
            location_type: "remote".to_string(),
            employment_type: employment_type(&job.job_type).to_string(),
            salary: non_empty(job.salary),
            salary_min,
            salary_max,
            currency: "USD".to_string(),
            industry: industry_for(&job.category).to_string(),
            description: job.description,
            requirements: Vec::new(),
            benefits: Vec::new(),
            skills,
            apply_url: job.url,
            company_logo: job.company_logo.and_then(non_empty),
            posted_date: job.publication_date,
            expires_date: None,
            featured: false,
        }
    }
}
