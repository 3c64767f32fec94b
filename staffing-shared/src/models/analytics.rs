/// Admin analytics
///
/// Only the four overview counts come from the database. Everything else
/// (trends, top lists, activity) is sample data, and a zero count keeps the
/// sample value.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use super::application::Application;
use super::company::Company;
use super::job::Job;
use super::profile::Profile;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_users: i64,
    pub active_jobs: i64,
    pub total_applications: i64,
    pub total_companies: i64,
    pub total_candidates: i64,
    pub total_placements: i64,
    pub total_revenue: i64,
}

/// Period-over-period change, in percent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Changes {
    pub users: f64,
    pub jobs: f64,
    pub applications: f64,
    pub companies: f64,
    pub placements: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyApplications {
    pub month: &'static str,
    pub applications: i64,
    pub placements: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopJob {
    pub title: &'static str,
    pub applications: i64,
    pub views: i64,
    pub conversion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopIndustry {
    pub name: &'static str,
    pub jobs: i64,
    pub applications: i64,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub job: Option<&'static str>,

    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminApplication {
    pub id: &'static str,
    pub candidate: &'static str,
    pub avatar: &'static str,
    pub job: &'static str,
    pub company: &'static str,
    pub applied_at: DateTime<Utc>,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
    pub avatar: &'static str,

    #[serde(rename = "type")]
    pub kind: &'static str,

    pub joined_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingActions {
    pub company_verifications: i64,
    pub job_reviews: i64,
    pub support_tickets: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub overview: Overview,
    pub changes: Changes,
    pub monthly_applications: Vec<MonthlyApplications>,
    pub top_jobs: Vec<TopJob>,
    pub top_industries: Vec<TopIndustry>,
    pub recent_activity: Vec<Activity>,
    pub recent_applications: Vec<AdminApplication>,
    pub new_users: Vec<NewUser>,
    pub pending_actions: PendingActions,
}

/// Live table counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticsCounts {
    pub users: i64,
    pub active_jobs: i64,
    pub applications: i64,
    pub companies: i64,
}

impl AnalyticsCounts {
    pub async fn load(pool: &PgPool) -> Result<Self, sqlx::Error> {
        let (users, active_jobs, applications, companies) = tokio::try_join!(
            Profile::count(pool),
            Job::count_active(pool),
            Application::count(pool),
            Company::count(pool),
        )?;

        Ok(Self {
            users,
            active_jobs,
            applications,
            companies,
        })
    }
}

impl Analytics {
    /// Overlays non-zero live counts on the overview
    pub fn with_counts(mut self, counts: AnalyticsCounts) -> Self {
        let overlay = |live: i64, sample: i64| if live > 0 { live } else { sample };

        self.overview.total_users = overlay(counts.users, self.overview.total_users);
        self.overview.active_jobs = overlay(counts.active_jobs, self.overview.active_jobs);
        self.overview.total_applications =
            overlay(counts.applications, self.overview.total_applications);
        self.overview.total_companies = overlay(counts.companies, self.overview.total_companies);
        self
    }
}
