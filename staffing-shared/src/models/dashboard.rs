/// Candidate dashboard: headline counts, recent applications and recommended jobs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use super::application::{Application, STATUS_INTERVIEWING};
use super::job::Job;
use super::profile::Profile;
use super::saved_job::SavedJob;
use crate::dates::format_posted_date;
use crate::demo::fixtures;

const RECENT_APPLICATIONS: i64 = 4;
const RECOMMENDED_JOBS: i64 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub applications: i64,
    pub saved_jobs: i64,
    pub profile_views: i64,
    pub interview_invites: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentApplication {
    pub id: String,
    pub job_title: String,
    pub company: String,
    pub location: String,

    /// Relative label such as `3 days ago`
    pub applied_date: String,

    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedJob {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: String,

    #[serde(rename = "type")]
    pub employment_type: String,

    /// Relative label such as `Yesterday`
    pub posted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent_applications: Vec<RecentApplication>,
    pub recommended_jobs: Vec<RecommendedJob>,
}

impl Dashboard {
    /// Builds the caller's dashboard from the database
    ///
    /// Empty application or job lists are filled with the sample entries so
    /// a new account still sees a populated page.
    pub async fn load(pool: &PgPool, user_id: &str, now: DateTime<Utc>) -> Result<Self, sqlx::Error> {
        let (applications, saved_jobs, profile_views, interview_invites, recent, jobs) = tokio::try_join!(
            Application::count_for_candidate(pool, user_id),
            SavedJob::count_for_user(pool, user_id),
            Profile::views(pool, user_id),
            Application::count_with_status(pool, user_id, STATUS_INTERVIEWING),
            Application::list_for_candidate(pool, user_id, Some(RECENT_APPLICATIONS)),
            Job::recent_active(pool, RECOMMENDED_JOBS),
        )?;

        let mut recent_applications: Vec<RecentApplication> = recent
            .into_iter()
            .map(|app| RecentApplication {
                id: app.id.to_string(),
                job_title: app.job_title.unwrap_or_else(|| "Unknown Position".to_string()),
                company: app.job_company.unwrap_or_else(|| "Unknown Company".to_string()),
                location: app.job_location.unwrap_or_else(|| "Unknown Location".to_string()),
                applied_date: format_posted_date(app.created_at, now),
                status: app.status,
            })
            .collect();
        if recent_applications.is_empty() {
            recent_applications = fixtures::recent_applications(now);
        }

        let mut recommended_jobs: Vec<RecommendedJob> = jobs
            .into_iter()
            .map(|job| RecommendedJob {
                id: job.id.to_string(),
                title: job.title,
                company: job.company.unwrap_or_else(|| "Unknown Company".to_string()),
                location: job.location,
                salary: job.salary_range.unwrap_or_else(|| "Competitive".to_string()),
                employment_type: job.employment_type,
                posted: format_posted_date(job.created_at, now),
            })
            .collect();
        if recommended_jobs.is_empty() {
            recommended_jobs = fixtures::recommended_jobs(now);
        }

        Ok(Self {
            stats: DashboardStats {
                applications,
                saved_jobs,
                profile_views,
                interview_invites,
            },
            recent_applications,
            recommended_jobs,
        })
    }
}
