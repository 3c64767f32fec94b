/// JoinRise public jobs API (no key required)
///
/// Listings are worldwide; only US locations are kept. The API is asked for
/// more listings than needed to make up for that.

use async_trait::async_trait;
use serde::Deserialize;

use super::{
    employment_type, infer_industry, non_empty, FeedError, FeedFilter, FeedJob, FeedSource, JobFeed,
    MAX_PAGE_SIZE,
};

pub const DEFAULT_BASE_URL: &str = "https://api.joinrise.io/api/v1/jobs/public";

/// Listings requested per listing wanted
const OVERFETCH: u32 = 3;

const NON_US_MARKERS: &[&str] = &[
    "canada", "uk", "united kingdom", "germany", "france", "spain", "italy", "netherlands",
    "belgium", "australia", "india", "china", "japan", "brazil", "mexico", "argentina", "ireland",
    "sweden", "norway", "denmark", "finland", "poland", "czech", "austria", "switzerland",
    "portugal", "singapore", "hong kong", "south korea", "taiwan", "philippines", "indonesia",
    "thailand", "vietnam", "malaysia", "new zealand", "south africa", "nigeria", "kenya", "egypt",
    "israel", "uae", "dubai", "saudi", "pakistan", "bangladesh", "london", "toronto", "vancouver",
    "montreal", "sydney", "melbourne", "berlin", "paris", "amsterdam", "dublin", "mumbai",
    "bangalore", "delhi", "tokyo",
];

const US_MARKERS: &[&str] = &[
    "usa", "united states", ", us", "u.s.", "alabama", "alaska", "arizona", "arkansas",
    "california", "colorado", "connecticut", "delaware", "florida", "georgia", "hawaii", "idaho",
    "illinois", "indiana", "iowa", "kansas", "kentucky", "louisiana", "maine", "maryland",
    "massachusetts", "michigan", "minnesota", "mississippi", "missouri", "montana", "nebraska",
    "nevada", "new hampshire", "new jersey", "new mexico", "new york", "north carolina",
    "north dakota", "ohio", "oklahoma", "oregon", "pennsylvania", "rhode island",
    "south carolina", "south dakota", "tennessee", "texas", "utah", "vermont", "virginia",
    "washington", "west virginia", "wisconsin", "wyoming", ", al", ", ak", ", az", ", ar", ", ca",
    ", co", ", ct", ", de", ", fl", ", ga", ", hi", ", id", ", il", ", in", ", ia", ", ks", ", ky",
    ", la", ", me", ", md", ", ma", ", mi", ", mn", ", ms", ", mo", ", mt", ", ne", ", nv", ", nh",
    ", nj", ", nm", ", ny", ", nc", ", nd", ", oh", ", ok", ", or", ", pa", ", ri", ", sc", ", sd",
    ", tn", ", tx", ", ut", ", vt", ", va", ", wa", ", wv", ", wi", ", wy", "los angeles",
    "chicago", "houston", "phoenix", "philadelphia", "san antonio", "san diego", "dallas",
    "san jose", "austin", "jacksonville", "san francisco", "seattle", "denver", "boston",
    "nashville", "baltimore", "portland", "las vegas", "atlanta", "miami", "minneapolis", "detroit",
];

#[derive(Debug, Clone)]
pub struct JoinRiseFeed {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Listing {
    result: ListingResult,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ListingResult {
    jobs: Vec<JoinRiseJob>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct JoinRiseJob {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    #[serde(rename = "type")]
    kind: String,
    url: String,
    created_at: String,
    location_address: String,
    department: Option<String>,
    #[serde(rename = "skills_suggest")]
    skills_suggest: Option<Vec<String>>,
    description_breakdown: Breakdown,
    owner: Owner,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Breakdown {
    one_sentence_job_summary: Option<String>,
    keywords: Option<Vec<String>>,
    employment_type: Option<String>,
    work_model: Option<String>,
    salary_range_min_yearly: Option<i64>,
    salary_range_max_yearly: Option<i64>,
    skill_requirements: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct Owner {
    company_name: Option<String>,
    photo: Option<String>,
    sector: Option<String>,
}

impl JoinRiseFeed {
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
impl JobFeed for JoinRiseFeed {
    fn source(&self) -> FeedSource {
        FeedSource::JoinRise
    }

    async fn search(&self, filter: &FeedFilter, limit: u32) -> Result<Vec<FeedJob>, FeedError> {
        let fetch = limit.saturating_mul(OVERFETCH).min(MAX_PAGE_SIZE);
        let params = [
            ("page", "1".to_string()),
            ("limit", fetch.to_string()),
            ("sort", "desc".to_string()),
            ("sortedBy", "createdAt".to_string()),
        ];

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
        tracing::debug!(count = listing.result.jobs.len(), "Fetched JoinRise listings");

        Ok(listing
            .result
            .jobs
            .into_iter()
            .filter(|job| is_us_location(&job.location_address))
            .map(FeedJob::from)
            .filter(|job| job.matches(filter))
            .take(limit as usize)
            .collect())
    }
}

fn is_us_location(location: &str) -> bool {
    let location = location.trim().to_lowercase();
    if location.is_empty() || NON_US_MARKERS.iter().any(|marker| location.contains(marker)) {
        return false;
    }

    US_MARKERS.iter().any(|marker| location.contains(marker)) || location == "remote"
}

fn location_type(label: &str) -> &'static str {
    let label = label.to_lowercase();
    if label.contains("remote") {
        "remote"
    } else if label.contains("hybrid") {
        "hybrid"
    } else {
        "onsite"
    }
}

/// `1234567` as `1,234,567`
fn with_separators(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn salary_label(min: Option<i64>, max: Option<i64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) => Some(format!(
            "${} - ${}/year",
            with_separators(min),
            with_separators(max)
        )),
        (Some(min), None) => Some(format!("${}+/year", with_separators(min))),
        (None, Some(max)) => Some(format!("Up to ${}/year", with_separators(max))),
        (None, None) => None,
    }
}

impl From<JoinRiseJob> for FeedJob {
    fn from(job: JoinRiseJob) -> Self {
        let breakdown = job.description_breakdown;
        let owner = job.owner;

        let salary_min = breakdown.salary_range_min_yearly.filter(|v| *v > 0);
        let salary_max = breakdown.salary_range_max_yearly.filter(|v| *v > 0);

        let work_label = if job.kind.is_empty() {
            breakdown.work_model.clone().unwrap_or_default()
        } else {
            job.kind.clone()
        };
        let type_label = breakdown
            .employment_type
            .clone()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| work_label.clone());

        let industry = infer_industry(&format!(
            "{} {}",
            job.department.as_deref().unwrap_or_default(),
            owner.sector.as_deref().unwrap_or_default()
        ));

        FeedJob {
            id: format!("joinrise_{}", job.id),
            source: FeedSource::JoinRise,
            external_id: job.id,
            title: job.title,
            company: owner
                .company_name
                .and_then(non_empty)
                .unwrap_or_else(|| "Company Not Listed".to_string()),
            location: non_empty(job.location_address).unwrap_or_else(|| "United States".to_string()),
            location_type: location_type(&work_label).to_string(),
            employment_type: employment_type(&type_label).to_string(),
            salary: salary_label(salary_min, salary_max),
            salary_min,
            salary_max,
            currency: "USD".to_string(),
            industry: industry.to_string(),
            description: breakdown.one_sentence_job_summary.unwrap_or_default(),
            requirements: breakdown.skill_requirements,
            benefits: Vec::new(),
            skills: job.skills_suggest.or(breakdown.keywords).unwrap_or_default(),
            apply_url: job.url,
            company_logo: owner
                .photo
                .and_then(non_empty)
                .filter(|photo| !photo.contains("/avatar.jpg")),
            posted_date: job.created_at,
            expires_date: None,
            featured: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_us_locations() {
        assert!(is_us_location("Austin, TX"));
        assert!(is_us_location("New York, New York, United States"));
        assert!(is_us_location("Remote"));
        assert!(!is_us_location("London, UK"));
        assert!(!is_us_location("Toronto, Ontario"));
        assert!(!is_us_location(""));
    }

    #[test]
    fn test_salary_label() {
        assert_eq!(
            salary_label(Some(85_000), Some(120_000)).as_deref(),
            Some("$85,000 - $120,000/year")
        );
        assert_eq!(salary_label(Some(1_250_000), None).as_deref(), Some("$1,250,000+/year"));
        assert_eq!(salary_label(None, Some(900)).as_deref(), Some("Up to $900/year"));
        assert_eq!(salary_label(None, None), None);
    }

    #[test]
    fn test_maps_listing() {
        let raw: JoinRiseJob = serde_json::from_value(serde_json::json!({
            "_id": "65f0c2",
            "title": "Data Analyst",
            "type": "Hybrid",
            "url": "https://joinrise.co/jobs/65f0c2",
            "createdAt": "2025-01-09T10:00:00.000Z",
            "locationAddress": "Chicago, IL",
            "department": "Data",
            "descriptionBreakdown": {
                "oneSentenceJobSummary": "Own the weekly sales reporting.",
                "employmentType": "Contract",
                "salaryRangeMinYearly": 70000,
                "salaryRangeMaxYearly": 0,
                "skillRequirements": ["SQL"],
                "keywords": ["Tableau"]
            },
            "owner": { "companyName": "Acme Analytics", "photo": "https://cdn.example/avatar.jpg" }
        }))
        .unwrap();

        let job = FeedJob::from(raw);
        assert_eq!(job.id, "joinrise_65f0c2");
        assert_eq!(job.source, FeedSource::JoinRise);
        assert_eq!(job.location_type, "hybrid");
        assert_eq!(job.employment_type, "Contract");
        assert_eq!(job.industry, "Technology");
        assert_eq!(job.salary.as_deref(), Some("$70,000+/year"));
        assert_eq!(job.salary_max, None);
        assert_eq!(job.requirements, vec!["SQL"]);
        assert_eq!(job.skills, vec!["Tableau"]);
        assert_eq!(job.company_logo, None);
    }

    #[tokio::test]
    async fn test_unreachable_feed_is_an_error() {
        let feed = JoinRiseFeed::new("http://127.0.0.1:9/api").unwrap();
        let result = feed.search(&FeedFilter::default(), 10).await;
        assert!(matches!(result, Err(FeedError::Http(_))));
    }
}
