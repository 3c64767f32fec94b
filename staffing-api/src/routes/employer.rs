/// Employer workspace
///
/// # Endpoints
///
/// - `GET /api/employer/jobs` - The caller's postings with per-status counts
/// - `GET /api/employer/applications?jobId=` - Applications to the caller's jobs
/// - `PATCH /api/employer/applications` - Review an application (status, rating, notes)
///
/// Admins may review any application; employers only those made to their own jobs.

use axum::extract::{Query, State};
use chrono::Utc;
use serde::Deserialize;
use staffing_shared::auth::authorization::{require_employer, require_ownership};
use staffing_shared::auth::middleware::AuthContext;
use staffing_shared::db::source::Source;
use staffing_shared::demo::fixtures;
use staffing_shared::models::application::{
    Application, ApplicationReview, EmployerApplication, EmployerApplications,
};
use staffing_shared::models::job::{EmployerJob, EmployerJobs, Job};
use uuid::Uuid;

use super::applications::announce_status;
use crate::app::AppState;
use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult};
use crate::extract::ValidatedJson;

const REVIEWED: &str = "Application updated successfully";

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationsQuery {
    pub job_id: Option<String>,
}

/// # Errors
///
/// - `401 Unauthorized`: No session
/// - `403 Forbidden`: Caller is not an employer
pub async fn list_employer_jobs(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Envelope<EmployerJobs>> {
    require_employer(&auth, &state.source)?;

    let employer_id = auth.user_id;
    let sourced = state
        .source
        .with_fallback(
            "employer jobs",
            |pool| async move {
                let jobs = Job::list_for_employer(&pool, &employer_id).await?;
                Ok(EmployerJobs::from(
                    jobs.into_iter().map(EmployerJob::from).collect::<Vec<_>>(),
                ))
            },
            || fixtures::employer_jobs(Utc::now()),
        )
        .await;

    Ok(Envelope::sourced(sourced))
}

/// # Errors
///
/// - `401 Unauthorized`: No session
/// - `403 Forbidden`: Caller is not an employer
pub async fn list_employer_applications(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<ApplicationsQuery>,
) -> ApiResult<Envelope<EmployerApplications>> {
    require_employer(&auth, &state.source)?;

    let job_id = query.job_id.filter(|id| !id.trim().is_empty());
    let demo_job_id = job_id.clone();
    let employer_id = auth.user_id;

    let sourced = state
        .source
        .with_fallback(
            "employer applications",
            |pool| async move {
                let rows = Application::list_for_employer(&pool, &employer_id, job_id.as_deref()).await?;
                Ok(EmployerApplications::from(
                    rows.into_iter()
                        .map(EmployerApplication::from)
                        .collect::<Vec<_>>(),
                ))
            },
            || fixtures::employer_applications(Utc::now(), demo_job_id.as_deref()),
        )
        .await;

    Ok(Envelope::sourced(sourced))
}

/// Review an application
///
/// Without a database the review is acknowledged but not stored.
///
/// # Errors
///
/// - `400 Bad Request`: Missing `applicationId`, unknown status or rating outside 0..=5
/// - `401 Unauthorized`: No session
/// - `403 Forbidden`: Caller is not an employer, or the job is not theirs (live only)
/// - `404 Not Found`: No stored application with that id (live only)
pub async fn review_application(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(review): ValidatedJson<ApplicationReview>,
) -> ApiResult<Envelope<()>> {
    require_employer(&auth, &state.source)?;

    let application_id = review.application_id.trim();
    if application_id.is_empty() {
        return Err(ApiError::bad_request("Application ID is required"));
    }

    let Some(pool) = state.source.pool() else {
        return Ok(Envelope::message(REVIEWED).with_source(Source::Demo));
    };

    let id = Uuid::parse_str(application_id)
        .map_err(|_| ApiError::not_found("Application not found"))?;

    let target = match Application::review_target(pool, id).await {
        Ok(Some(target)) => target,
        Ok(None) => return Err(ApiError::not_found("Application not found")),
        Err(e) => {
            tracing::warn!(application_id = %id, error = %e, "Failed to load application for review");
            return Ok(Envelope::message(REVIEWED).with_source(Source::Demo));
        }
    };

    if !auth.is_admin() {
        let owner = target.employer_id.as_deref().unwrap_or_default();
        require_ownership(&auth, owner, "update", "application")?;
    }

    match Application::review(pool, id, &review).await {
        Ok(Some(application)) => {
            tracing::info!(
                application_id = %id,
                reviewer = %auth.user_id,
                status = %application.status,
                "Application reviewed"
            );
            if application.status != target.status {
                announce_status(&state, pool, &application).await;
            }
            Ok(Envelope::message(REVIEWED).with_source(Source::Database))
        }
        Ok(None) => Err(ApiError::not_found("Application not found")),
        Err(e) => {
            tracing::warn!(application_id = %id, error = %e, "Failed to store application review");
            Ok(Envelope::message(REVIEWED).with_source(Source::Demo))
        }
    }
}
