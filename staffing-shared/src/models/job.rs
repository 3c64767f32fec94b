/// Employer-posted jobs
///
/// # Schema
///
/// ```sql
/// CREATE TABLE jobs (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     employer_id TEXT NOT NULL,
///     title TEXT NOT NULL,
///     company TEXT,
///     department TEXT,
///     location TEXT NOT NULL,
///     location_type TEXT NOT NULL DEFAULT 'onsite',
///     employment_type TEXT NOT NULL DEFAULT 'full-time',
///     salary_range TEXT,
///     show_salary BOOLEAN NOT NULL DEFAULT TRUE,
///     experience_level TEXT,
///     industry TEXT,
///     description TEXT NOT NULL DEFAULT '',
///     requirements TEXT NOT NULL DEFAULT '',
///     benefits TEXT,
///     skills TEXT[] NOT NULL DEFAULT '{}',
///     application_deadline TEXT,
///     start_date TEXT,
///     status TEXT NOT NULL DEFAULT 'active',   -- draft | active | paused | closed
///     featured BOOLEAN NOT NULL DEFAULT FALSE,
///     views INTEGER NOT NULL DEFAULT 0,
///     applications_count INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::validation::{
    employment_type, experience_level, location_type, one_of, salary_type, EMPLOYMENT_TYPES,
    EXPERIENCE_LEVELS, JOB_STATUSES, LOCATION_TYPES,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub employer_id: String,
    pub title: String,
    pub company: Option<String>,
    pub department: Option<String>,
    pub location: String,
    pub location_type: String,

    #[serde(rename = "type")]
    pub employment_type: String,

    pub salary_range: Option<String>,
    pub show_salary: bool,
    pub experience_level: Option<String>,
    pub industry: Option<String>,
    pub description: String,
    pub requirements: String,
    pub benefits: Option<String>,
    pub skills: Vec<String>,
    pub application_deadline: Option<String>,
    pub start_date: Option<String>,

    /// draft | active | paused | closed
    pub status: String,

    pub featured: bool,
    pub views: i32,
    pub applications_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of a job posting
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct JobInput {
    #[serde(default)]
    #[validate(length(min = 5, message = "Job title must be at least 5 characters"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 2, message = "Department is required"))]
    pub department: String,

    #[serde(default)]
    #[validate(length(min = 3, message = "Location is required"))]
    pub location: String,

    #[serde(default)]
    #[validate(custom(function = "location_type"))]
    pub location_type: String,

    #[serde(default)]
    #[validate(custom(function = "employment_type"))]
    pub r#type: String,

    #[serde(default)]
    pub salary_min: String,

    #[serde(default)]
    pub salary_max: String,

    #[serde(default)]
    #[validate(custom(function = "salary_type"))]
    pub salary_type: String,

    #[serde(default)]
    pub show_salary: bool,

    #[serde(default)]
    #[validate(custom(function = "experience_level"))]
    pub experience_level: String,

    #[serde(default)]
    #[validate(length(min = 100, message = "Description must be at least 100 characters"))]
    pub description: String,

    #[serde(default)]
    #[validate(length(min = 50, message = "Requirements must be at least 50 characters"))]
    pub requirements: String,

    #[serde(default)]
    pub benefits: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "At least one skill is required"))]
    pub skills: Vec<String>,

    #[serde(default)]
    pub application_deadline: String,

    #[serde(default)]
    pub start_date: String,
}

impl JobInput {
    /// `$min - $max/period`, or `None` when neither bound is given
    pub fn salary_range(&self) -> Option<String> {
        if self.salary_min.is_empty() && self.salary_max.is_empty() {
            return None;
        }

        let bound = |value: &str| {
            if value.is_empty() {
                "0".to_string()
            } else {
                value.to_string()
            }
        };

        Some(format!(
            "${} - ${}/{}",
            bound(&self.salary_min),
            bound(&self.salary_max),
            self.salary_type
        ))
    }
}

/// Partial update of a job; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobChanges {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_salary: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
}

impl Validate for JobChanges {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let checks: [(&'static str, &Option<String>, &[&str]); 4] = [
            ("location_type", &self.location_type, LOCATION_TYPES),
            ("type", &self.employment_type, EMPLOYMENT_TYPES),
            ("experience_level", &self.experience_level, EXPERIENCE_LEVELS),
            ("status", &self.status, JOB_STATUSES),
        ];

        for (field, value, allowed) in checks {
            if let Some(value) = value {
                if let Err(e) = one_of(value, allowed) {
                    errors.add(field, e);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A posting in the employer's own job list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerJob {
    pub id: String,
    pub title: String,
    pub department: String,
    pub location: String,

    #[serde(rename = "type")]
    pub employment_type: String,

    pub salary: String,
    pub applications: i32,
    pub views: i32,
    pub posted_at: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,

    pub status: String,
    pub description: String,
}

impl From<Job> for EmployerJob {
    fn from(job: Job) -> Self {
        Self {
            id: job.id.to_string(),
            title: job.title,
            department: job.department.unwrap_or_else(|| "General".to_string()),
            location: job.location,
            employment_type: job.employment_type,
            salary: job.salary_range.unwrap_or_else(|| "Competitive".to_string()),
            applications: job.applications_count,
            views: job.views,
            posted_at: job.created_at.to_rfc3339(),
            expires_at: job.application_deadline,
            status: job.status,
            description: job.description,
        }
    }
}

/// Count of the employer's postings per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PostingStats {
    pub total: usize,
    pub active: usize,
    pub paused: usize,
    pub closed: usize,
    pub draft: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployerJobs {
    pub jobs: Vec<EmployerJob>,
    pub stats: PostingStats,
}

impl From<Vec<EmployerJob>> for EmployerJobs {
    fn from(jobs: Vec<EmployerJob>) -> Self {
        let mut stats = PostingStats {
            total: jobs.len(),
            ..PostingStats::default()
        };
        for job in &jobs {
            match job.status.as_str() {
                "active" => stats.active += 1,
                "paused" => stats.paused += 1,
                "closed" => stats.closed += 1,
                "draft" => stats.draft += 1,
                _ => {}
            }
        }
        Self { jobs, stats }
    }
}

/// List filters; `None` means "any"
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub employer_id: Option<String>,
    pub status: Option<String>,
    pub featured_only: bool,
}

const COLUMNS: &str = "id, employer_id, title, company, department, location, location_type, \
     employment_type, salary_range, show_salary, experience_level, industry, description, \
     requirements, benefits, skills, application_deadline, start_date, status, featured, views, \
     applications_count, created_at, updated_at";

impl Job {
    /// Lists jobs newest first, returning the page and the total match count
    pub async fn list(
        pool: &PgPool,
        filter: &JobFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Self>, i64), sqlx::Error> {
        const WHERE: &str = "($1::text IS NULL OR employer_id = $1) \
             AND ($2::text IS NULL OR status = $2) \
             AND (NOT $3 OR featured)";

        let sql = format!(
            "SELECT {} FROM jobs WHERE {} ORDER BY created_at DESC LIMIT $4 OFFSET $5",
            COLUMNS, WHERE
        );
        let jobs = sqlx::query_as::<_, Job>(&sql)
            .bind(&filter.employer_id)
            .bind(&filter.status)
            .bind(filter.featured_only)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let count_sql = format!("SELECT COUNT(*) FROM jobs WHERE {}", WHERE);
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(&filter.employer_id)
            .bind(&filter.status)
            .bind(filter.featured_only)
            .fetch_one(pool)
            .await?;

        Ok((jobs, total))
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {} FROM jobs WHERE id = $1", COLUMNS);

        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Inserts an active, unfeatured posting owned by `employer_id`
    pub async fn create(
        pool: &PgPool,
        employer_id: &str,
        data: &JobInput,
    ) -> Result<Self, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO jobs (
                employer_id, title, department, location, location_type, employment_type,
                salary_range, show_salary, experience_level, description, requirements,
                benefits, skills, application_deadline, start_date, status, featured
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                NULLIF($12, ''), $13, NULLIF($14, ''), NULLIF($15, ''), 'active', FALSE
            )
            RETURNING {}
            "#,
            COLUMNS
        );

        sqlx::query_as::<_, Job>(&sql)
            .bind(employer_id)
            .bind(&data.title)
            .bind(&data.department)
            .bind(&data.location)
            .bind(&data.location_type)
            .bind(&data.r#type)
            .bind(data.salary_range())
            .bind(data.show_salary)
            .bind(&data.experience_level)
            .bind(&data.description)
            .bind(&data.requirements)
            .bind(&data.benefits)
            .bind(&data.skills)
            .bind(&data.application_deadline)
            .bind(&data.start_date)
            .fetch_one(pool)
            .await
    }

    /// Applies `changes`, returning the updated row or `None` if the job is gone
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        changes: &JobChanges,
    ) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!(
            r#"
            UPDATE jobs SET
                title = COALESCE($2, title),
                company = COALESCE($3, company),
                department = COALESCE($4, department),
                location = COALESCE($5, location),
                location_type = COALESCE($6, location_type),
                employment_type = COALESCE($7, employment_type),
                salary_range = COALESCE($8, salary_range),
                show_salary = COALESCE($9, show_salary),
                experience_level = COALESCE($10, experience_level),
                industry = COALESCE($11, industry),
                description = COALESCE($12, description),
                requirements = COALESCE($13, requirements),
                benefits = COALESCE($14, benefits),
                skills = COALESCE($15, skills),
                application_deadline = COALESCE($16, application_deadline),
                start_date = COALESCE($17, start_date),
                status = COALESCE($18, status),
                featured = COALESCE($19, featured),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            COLUMNS
        );

        sqlx::query_as::<_, Job>(&sql)
            .bind(id)
            .bind(&changes.title)
            .bind(&changes.company)
            .bind(&changes.department)
            .bind(&changes.location)
            .bind(&changes.location_type)
            .bind(&changes.employment_type)
            .bind(&changes.salary_range)
            .bind(changes.show_salary)
            .bind(&changes.experience_level)
            .bind(&changes.industry)
            .bind(&changes.description)
            .bind(&changes.requirements)
            .bind(&changes.benefits)
            .bind(&changes.skills)
            .bind(&changes.application_deadline)
            .bind(&changes.start_date)
            .bind(&changes.status)
            .bind(changes.featured)
            .fetch_optional(pool)
            .await
    }

    /// Deletes a job, returning whether a row was removed
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Newest active jobs
    pub async fn recent_active(pool: &PgPool, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE status = 'active' ORDER BY created_at DESC LIMIT $1",
            COLUMNS
        );

        sqlx::query_as::<_, Job>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Every posting owned by `employer_id`, newest first
    pub async fn list_for_employer(pool: &PgPool, employer_id: &str) -> Result<Vec<Self>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE employer_id = $1 ORDER BY created_at DESC",
            COLUMNS
        );

        sqlx::query_as::<_, Job>(&sql)
            .bind(employer_id)
            .fetch_all(pool)
            .await
    }

    pub async fn count_active(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs WHERE status = 'active'")
            .fetch_one(pool)
            .await
    }
}
