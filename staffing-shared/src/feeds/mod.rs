/// Job feeds
///
/// Every source (the built-in catalogue, external boards) implements
/// [`JobFeed`] and maps its listings into [`FeedJob`]. The [`Aggregator`]
/// queries them concurrently, merges, de-duplicates, sorts and caches the
/// result.
///
/// Listing ids carry their source as a prefix (`internal_3`,
/// `remotive_1841`, `arbeitnow_rust-dev-berlin`, `joinrise_65f0`), which is
/// how a detail lookup finds its way back here.

pub mod aggregator;
pub mod arbeitnow;
pub mod internal;
pub mod joinrise;
pub mod remotive;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use aggregator::Aggregator;
pub use arbeitnow::ArbeitnowFeed;
pub use internal::InternalFeed;
pub use joinrise::JoinRiseFeed;
pub use remotive::RemotiveFeed;

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSource {
    Internal,
    Remotive,
    Arbeitnow,
    #[serde(rename = "joinrise")]
    JoinRise,
}

impl FeedSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedSource::Internal => "internal",
            FeedSource::Remotive => "remotive",
            FeedSource::Arbeitnow => "arbeitnow",
            FeedSource::JoinRise => "joinrise",
        }
    }
}

/// Industry keywords, checked in order; the first hit wins
const INDUSTRY_KEYWORDS: &[(&str, &[&str])] = &[
    ("Technology", &["software", "developer", "engineer", "devops", "data", "tech"]),
    ("Marketing", &["marketing", "seo", "content"]),
    ("Sales", &["sales", "business development"]),
    ("Finance", &["finance", "accounting", "financial", "banking"]),
    ("Creative", &["design", "ux", "ui", "creative"]),
    ("Human Resources", &["hr", "human resources", "recruiting"]),
    ("Customer Service", &["customer", "support"]),
    ("Healthcare", &["healthcare", "medical", "health", "life sciences"]),
    ("Legal", &["legal", "compliance"]),
    ("Consulting", &["consulting"]),
];

/// Industry for free text such as tags, titles or department names
pub(crate) fn infer_industry(text: &str) -> &'static str {
    let text = text.to_lowercase();
    INDUSTRY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map_or("Other", |(industry, _)| *industry)
}

/// Display employment type for a source's own label
pub(crate) fn employment_type(label: &str) -> &'static str {
    let label = label.to_lowercase();
    if label.contains("full") {
        "Full-time"
    } else if label.contains("part") {
        "Part-time"
    } else if label.contains("contract") || label.contains("freelance") {
        "Contract"
    } else if label.contains("intern") {
        "Internship"
    } else {
        "Full-time"
    }
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    Some(value).filter(|v| !v.trim().is_empty())
}

/// A listing from any source, in one shape
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedJob {
    pub id: String,
    pub source: FeedSource,
    pub external_id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub location_type: String,

    #[serde(rename = "type")]
    pub employment_type: String,

    pub salary: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub currency: String,
    pub industry: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub skills: Vec<String>,
    pub apply_url: String,
    pub company_logo: Option<String>,
    pub posted_date: String,
    pub expires_date: Option<String>,
    pub featured: bool,
}

impl FeedJob {
    pub fn is_remote(&self) -> bool {
        self.location_type == "remote"
    }

    /// Normalized title and company
    pub fn dedup_key(&self) -> String {
        format!(
            "{}_{}",
            self.title.trim().to_lowercase(),
            self.company.trim().to_lowercase()
        )
    }

    /// How many optional details are filled in
    pub fn completeness(&self) -> u8 {
        u8::from(self.salary.is_some())
            + u8::from(!self.requirements.is_empty())
            + u8::from(self.company_logo.is_some())
    }

    /// Case-insensitive text filters shared by sources that filter locally
    pub fn matches(&self, filter: &FeedFilter) -> bool {
        if let Some(query) = filter.query.as_deref() {
            let query = query.to_lowercase();
            if !(self.title.to_lowercase().contains(&query)
                || self.company.to_lowercase().contains(&query)
                || self.description.to_lowercase().contains(&query))
            {
                return false;
            }
        }
        if let Some(location) = filter.location.as_deref() {
            if !self.location.to_lowercase().contains(&location.to_lowercase()) {
                return false;
            }
        }
        if let Some(industry) = filter.industry.as_deref() {
            if !self.industry.eq_ignore_ascii_case(industry) {
                return false;
            }
        }
        if let Some(kind) = filter.employment_type.as_deref() {
            if !self.employment_type.eq_ignore_ascii_case(kind) {
                return false;
            }
        }
        !filter.remote || self.is_remote()
    }
}

/// Search filters; also the aggregator's cache key
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FeedFilter {
    pub query: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,
    pub employment_type: Option<String>,
    pub remote: bool,
}

/// Query string of the feed endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeedQuery {
    pub query: Option<String>,
    pub location: Option<String>,
    pub industry: Option<String>,

    #[serde(rename = "type")]
    pub employment_type: Option<String>,

    #[serde(default)]
    pub remote: bool,

    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl FeedQuery {
    /// Filters with blank values dropped
    pub fn filter(&self) -> FeedFilter {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        FeedFilter {
            query: present(&self.query),
            location: present(&self.location),
            industry: present(&self.industry),
            employment_type: present(&self.employment_type),
            remote: self.remote,
        }
    }

    /// 1-based page
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    pub jobs: Vec<FeedJob>,
    pub total: usize,
    pub page: u32,
    pub total_pages: u32,
    pub source: &'static str,
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("feed responded with status {0}")]
    Status(u16),
}

/// A source of job listings
#[async_trait]
pub trait JobFeed: Send + Sync {
    fn source(&self) -> FeedSource;

    /// Listings matching `filter`, at most `limit`
    async fn search(&self, filter: &FeedFilter, limit: u32) -> Result<Vec<FeedJob>, FeedError>;
}
