/// Jobs a candidate bookmarked
///
/// Unique per `(user_id, job_id)`. Listing derives each entry's status from
/// the job's application deadline: past it is `expired`, within a week it is
/// `closing_soon`, otherwise the job's own status applies.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dates::{days_until, parse_timestamp};

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_CLOSING_SOON: &str = "closing_soon";
pub const STATUS_EXPIRED: &str = "expired";

/// Placeholder logo for jobs without one
pub const DEFAULT_LOGO: &str =
    "https://images.unsplash.com/photo-1549924231-f129b911e442?w=100&h=100&fit=crop";

const CLOSING_SOON_DAYS: i64 = 7;
const DEFAULT_DEADLINE_DAYS: i64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct SavedJob {
    pub id: Uuid,
    pub user_id: String,
    pub job_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveJobInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "Job ID is required"))]
    pub job_id: String,
}

/// Response to a save
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobReceipt {
    pub id: String,
    pub job_id: String,
    pub saved_at: DateTime<Utc>,
}

impl From<SavedJob> for SavedJobReceipt {
    fn from(row: SavedJob) -> Self {
        Self {
            id: row.id.to_string(),
            job_id: row.job_id,
            saved_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobDetails {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,

    #[serde(rename = "type")]
    pub employment_type: String,

    pub salary: String,
    pub logo: String,
    pub posted_at: DateTime<Utc>,
    pub deadline: DateTime<Utc>,

    /// active | closing_soon | expired, or the job's own status
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobEntry {
    pub id: String,
    pub job_id: String,
    pub saved_at: DateTime<Utc>,
    pub job: SavedJobDetails,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobStats {
    pub total: usize,
    pub active: usize,
    pub closing_soon: usize,
    pub expired: usize,
}

impl SavedJobStats {
    pub fn from_entries(entries: &[SavedJobEntry]) -> Self {
        let with_status = |status: &str| entries.iter().filter(|e| e.job.status == status).count();

        Self {
            total: entries.len(),
            active: with_status(STATUS_ACTIVE),
            closing_soon: with_status(STATUS_CLOSING_SOON),
            expired: with_status(STATUS_EXPIRED),
        }
    }
}

/// Status shown for a saved job given its deadline
pub fn deadline_status(deadline: DateTime<Utc>, now: DateTime<Utc>, job_status: &str) -> String {
    let days = days_until(deadline, now);

    if days < 0 {
        STATUS_EXPIRED.to_string()
    } else if days <= CLOSING_SOON_DAYS {
        STATUS_CLOSING_SOON.to_string()
    } else {
        job_status.to_string()
    }
}

/// Saved job joined with the stored job, if the id names one
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SavedJobRow {
    pub id: Uuid,
    pub job_id: String,
    pub created_at: DateTime<Utc>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub salary_range: Option<String>,
    pub job_created_at: Option<DateTime<Utc>>,
    pub application_deadline: Option<String>,
    pub job_status: Option<String>,
}

impl SavedJobRow {
    pub fn into_entry(self, now: DateTime<Utc>) -> SavedJobEntry {
        let deadline = self
            .application_deadline
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or_else(|| now + Duration::days(DEFAULT_DEADLINE_DAYS));
        let status = deadline_status(
            deadline,
            now,
            self.job_status.as_deref().unwrap_or(STATUS_ACTIVE),
        );

        SavedJobEntry {
            id: self.id.to_string(),
            job_id: self.job_id.clone(),
            saved_at: self.created_at,
            job: SavedJobDetails {
                id: self.job_id,
                title: self.title.unwrap_or_else(|| "Unknown Position".to_string()),
                company: self.company.unwrap_or_else(|| "Unknown Company".to_string()),
                location: self.location.unwrap_or_else(|| "Unknown Location".to_string()),
                employment_type: self.employment_type.unwrap_or_else(|| "Full-time".to_string()),
                salary: self.salary_range.unwrap_or_else(|| "Competitive".to_string()),
                logo: DEFAULT_LOGO.to_string(),
                posted_at: self.job_created_at.unwrap_or(self.created_at),
                deadline,
                status,
            },
        }
    }
}

impl SavedJob {
    /// The user's saved jobs, newest first
    pub async fn list_for_user(pool: &PgPool, user_id: &str) -> Result<Vec<SavedJobRow>, sqlx::Error> {
        sqlx::query_as::<_, SavedJobRow>(
            r#"
            SELECT s.id, s.job_id, s.created_at,
                   j.title, j.company, j.location, j.employment_type, j.salary_range,
                   j.created_at AS job_created_at, j.application_deadline, j.status AS job_status
            FROM saved_jobs s
            LEFT JOIN jobs j ON j.id::text = s.job_id
            WHERE s.user_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Saves a job; a repeat save fails with a unique violation
    pub async fn create(pool: &PgPool, user_id: &str, job_id: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, SavedJob>(
            r#"
            INSERT INTO saved_jobs (user_id, job_id)
            VALUES ($1, $2)
            RETURNING id, user_id, job_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_one(pool)
        .await
    }

    pub async fn find(pool: &PgPool, user_id: &str, job_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, SavedJob>(
            "SELECT id, user_id, job_id, created_at FROM saved_jobs WHERE user_id = $1 AND job_id = $2",
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_optional(pool)
        .await
    }

    /// Removes by saved-job id
    pub async fn delete_by_id(pool: &PgPool, user_id: &str, id: Uuid) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Removes by job id
    pub async fn delete_by_job(pool: &PgPool, user_id: &str, job_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE user_id = $1 AND job_id = $2")
            .bind(user_id)
            .bind(job_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn count_for_user(pool: &PgPool, user_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM saved_jobs WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
