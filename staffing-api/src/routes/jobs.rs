/// Job postings and the aggregated job feed
///
/// # Endpoints
///
/// - `GET /api/jobs` - List postings (public)
/// - `POST /api/jobs` - Post a job (employer)
/// - `PATCH /api/jobs` - Update a posting (owner)
/// - `DELETE /api/jobs?jobId=` - Delete a posting (owner)
/// - `GET /api/jobs/feed` - Aggregated feed across sources (public)
/// - `GET /api/jobs/:id` - Job detail (public)
///
/// Without a database the list is served from the built-in catalogue and
/// writes answer with an echo of the request.

use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use staffing_shared::auth::authorization::{require_employer, require_ownership};
use staffing_shared::auth::middleware::AuthContext;
use staffing_shared::db::source::Source;
use staffing_shared::demo::{catalogue, synthetic_id};
use staffing_shared::demo::catalogue::CatalogueJob;
use staffing_shared::feeds::{FeedJob, FeedPage, FeedQuery};
use staffing_shared::models::job::{Job, JobChanges, JobFilter, JobInput};
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::app::AppState;
use crate::envelope::{Envelope, Pagination};
use crate::error::{ApiError, ApiResult};
use crate::extract::ValidatedJson;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListQuery {
    pub employer_id: Option<String>,
    pub status: Option<String>,
    pub featured: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Stored postings or catalogue listings
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum JobList {
    Stored(Vec<Job>),
    Catalogue(Vec<&'static CatalogueJob>),
}

/// A job detail from whichever place knows the id
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum JobDetail {
    Stored(Job),
    Feed(FeedJob),
    Catalogue(&'static CatalogueJob),
}

/// Echo of a posting that was not stored
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsavedJob {
    pub id: String,

    #[serde(flatten)]
    pub input: JobInput,

    pub employer_id: String,
    pub status: &'static str,
    pub featured: bool,
    pub views: i32,
    pub applications_count: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PostedJob {
    Stored(Job),
    Unsaved(UnsavedJob),
}

/// Body of `PATCH /api/jobs`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobUpdate {
    #[serde(default)]
    pub job_id: String,

    #[serde(flatten)]
    pub changes: JobChanges,
}

impl Validate for JobUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.changes.validate()
    }
}

/// Echo of an update that was not stored
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsavedJobUpdate {
    pub id: String,

    #[serde(flatten)]
    pub changes: JobChanges,

    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UpdatedJob {
    Stored(Job),
    Unsaved(UnsavedJobUpdate),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobIdQuery {
    pub job_id: Option<String>,
}

/// List jobs
///
/// # Endpoint
///
/// ```text
/// GET /api/jobs?employerId=&status=&featured=true&limit=50&offset=0
/// ```
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> ApiResult<Envelope<JobList>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = query.offset.unwrap_or(0).max(0);
    let featured_only = query.featured.as_deref() == Some("true");

    let filter = JobFilter {
        employer_id: query.employer_id,
        status: query.status,
        featured_only,
    };

    let sourced = state
        .source
        .with_fallback(
            "jobs",
            |pool| async move {
                let (jobs, total) = Job::list(&pool, &filter, limit, offset).await?;
                Ok((JobList::Stored(jobs), total))
            },
            || catalogue_page(featured_only, limit, offset),
        )
        .await;

    let (jobs, total) = sourced.value;
    Ok(Envelope::ok(jobs)
        .with_source(sourced.source)
        .with_pagination(Pagination::new(total, limit, offset).with_has_more()))
}

fn catalogue_page(featured_only: bool, limit: i64, offset: i64) -> (JobList, i64) {
    let matching: Vec<&'static CatalogueJob> = catalogue::all()
        .iter()
        .filter(|job| !featured_only || job.featured)
        .collect();
    let total = matching.len() as i64;

    let page = matching
        .into_iter()
        .skip(offset as usize)
        .take(limit as usize)
        .collect();

    (JobList::Catalogue(page), total)
}

/// Post a job
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: No session
/// - `403 Forbidden`: Caller is not an employer
pub async fn create_job(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(input): ValidatedJson<JobInput>,
) -> ApiResult<Envelope<PostedJob>> {
    require_employer(&auth, &state.source)?;

    if let Some(pool) = state.source.pool() {
        match Job::create(pool, &auth.user_id, &input).await {
            Ok(job) => {
                tracing::info!(job_id = %job.id, employer_id = %auth.user_id, "Job posted");
                return Ok(Envelope::ok(PostedJob::Stored(job))
                    .created()
                    .with_message("Job posted successfully")
                    .with_source(Source::Database));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to store job, answering with an echo");
            }
        }
    }

    let now = Utc::now();
    let echo = UnsavedJob {
        id: synthetic_id("job", now),
        input,
        employer_id: auth.user_id,
        status: "active",
        featured: false,
        views: 0,
        applications_count: 0,
        created_at: now,
    };

    Ok(Envelope::ok(PostedJob::Unsaved(echo))
        .created()
        .with_message("Job posted successfully")
        .with_source(Source::Demo))
}

/// Update a job
///
/// # Errors
///
/// - `400 Bad Request`: Missing `jobId` or invalid field values
/// - `404 Not Found`: No such job (live only)
/// - `403 Forbidden`: Caller does not own the job (live only)
pub async fn update_job(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(update): ValidatedJson<JobUpdate>,
) -> ApiResult<Envelope<UpdatedJob>> {
    if update.job_id.trim().is_empty() {
        return Err(ApiError::bad_request("Job ID is required"));
    }

    if let Some(pool) = state.source.pool() {
        let id = Uuid::parse_str(&update.job_id).map_err(|_| ApiError::not_found("Job not found"))?;

        match Job::find_by_id(pool, id).await {
            Ok(None) => return Err(ApiError::not_found("Job not found")),
            Ok(Some(existing)) => {
                require_ownership(&auth, &existing.employer_id, "update", "job")?;

                match Job::update(pool, id, &update.changes).await {
                    Ok(Some(job)) => {
                        return Ok(Envelope::ok(UpdatedJob::Stored(job))
                            .with_message("Job updated successfully")
                            .with_source(Source::Database));
                    }
                    Ok(None) => return Err(ApiError::not_found("Job not found")),
                    Err(e) => tracing::warn!(job_id = %id, error = %e, "Failed to update job"),
                }
            }
            Err(e) => tracing::warn!(job_id = %id, error = %e, "Failed to load job for update"),
        }
    }

    let echo = UnsavedJobUpdate {
        id: update.job_id,
        changes: update.changes,
        updated_at: Utc::now(),
    };

    Ok(Envelope::ok(UpdatedJob::Unsaved(echo))
        .with_message("Job updated successfully")
        .with_source(Source::Demo))
}

/// Delete a job
pub async fn delete_job(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<JobIdQuery>,
) -> ApiResult<Envelope<()>> {
    let job_id = query
        .job_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Job ID is required"))?;

    if let Some(pool) = state.source.pool() {
        let id = Uuid::parse_str(&job_id).map_err(|_| ApiError::not_found("Job not found"))?;

        match Job::find_by_id(pool, id).await {
            Ok(None) => return Err(ApiError::not_found("Job not found")),
            Ok(Some(existing)) => {
                require_ownership(&auth, &existing.employer_id, "delete", "job")?;

                match Job::delete(pool, id).await {
                    Ok(_) => {
                        tracing::info!(job_id = %id, "Job deleted");
                        return Ok(Envelope::message("Job deleted successfully")
                            .with_source(Source::Database));
                    }
                    Err(e) => tracing::warn!(job_id = %id, error = %e, "Failed to delete job"),
                }
            }
            Err(e) => tracing::warn!(job_id = %id, error = %e, "Failed to load job for delete"),
        }
    }

    Ok(Envelope::message("Job deleted successfully").with_source(Source::Demo))
}

/// Aggregated job feed
///
/// # Endpoint
///
/// ```text
/// GET /api/jobs/feed?query=rust&location=&industry=&type=&remote=true&page=1&limit=50
/// ```
pub async fn job_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Envelope<FeedPage>> {
    let page = state.feeds.search(&query).await;
    Ok(Envelope::ok(page))
}

/// Job detail
///
/// Ids with an underscore that are not UUIDs (`internal_3`, `remotive_1841`)
/// belong to the feed. UUIDs are looked up in the jobs table when live;
/// anything else is a catalogue id.
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Envelope<JobDetail>> {
    let uuid = Uuid::parse_str(&id).ok();

    if uuid.is_none() && id.contains('_') {
        return state
            .feeds
            .find(&id)
            .await
            .map(|job| Envelope::ok(JobDetail::Feed(job)))
            .ok_or_else(|| ApiError::not_found("Job not found"));
    }

    if let (Some(uuid), Some(pool)) = (uuid, state.source.pool()) {
        match Job::find_by_id(pool, uuid).await {
            Ok(Some(job)) => {
                return Ok(Envelope::ok(JobDetail::Stored(job)).with_source(Source::Database));
            }
            Ok(None) => return Err(ApiError::not_found("Job not found")),
            Err(e) => tracing::warn!(job_id = %uuid, error = %e, "Failed to load job"),
        }
    }

    catalogue::find(&id)
        .map(|job| Envelope::ok(JobDetail::Catalogue(job)).with_source(Source::Demo))
        .ok_or_else(|| ApiError::not_found("Job not found"))
}
