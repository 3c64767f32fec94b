/// Saved jobs
///
/// # Endpoints
///
/// - `GET /api/saved-jobs` - Saved jobs with deadline stats
/// - `POST /api/saved-jobs` - Save a job (`{"jobId": "..."}`)
/// - `DELETE /api/saved-jobs?id=` or `?jobId=` - Remove a saved job
/// - `HEAD /api/saved-jobs?jobId=` - Whether a job is saved (`X-Saved` header)

use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use staffing_shared::auth::middleware::AuthContext;
use staffing_shared::db::source::{is_unique_violation, Source};
use staffing_shared::demo::{fixtures, synthetic_id};
use staffing_shared::models::saved_job::{
    SaveJobInput, SavedJob, SavedJobEntry, SavedJobReceipt, SavedJobStats,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult};
use crate::extract::ValidatedJson;

const X_SAVED: HeaderName = HeaderName::from_static("x-saved");
const X_SAVED_ID: HeaderName = HeaderName::from_static("x-saved-id");

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJobQuery {
    pub id: Option<String>,
    pub job_id: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Saved jobs, newest first
pub async fn list_saved_jobs(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Envelope<Vec<SavedJobEntry>>> {
    let now = Utc::now();

    let sourced = state
        .source
        .with_fallback(
            "saved jobs",
            |pool| async move {
                let rows = SavedJob::list_for_user(&pool, &auth.user_id).await?;
                Ok(rows.into_iter().map(|row| row.into_entry(now)).collect::<Vec<_>>())
            },
            || fixtures::saved_jobs(now),
        )
        .await;

    let stats = SavedJobStats::from_entries(&sourced.value);
    Ok(Envelope::sourced(sourced).with_stats(stats))
}

/// Save a job
///
/// # Errors
///
/// - `400 Bad Request`: Missing `jobId`, or the job is already saved
pub async fn save_job(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(input): ValidatedJson<SaveJobInput>,
) -> ApiResult<Envelope<SavedJobReceipt>> {
    if let Some(pool) = state.source.pool() {
        match SavedJob::create(pool, &auth.user_id, &input.job_id).await {
            Ok(saved) => {
                return Ok(Envelope::ok(SavedJobReceipt::from(saved))
                    .with_message("Job saved successfully")
                    .with_source(Source::Database));
            }
            Err(e) if is_unique_violation(&e) => {
                return Err(ApiError::bad_request("Job already saved"));
            }
            Err(e) => tracing::warn!(job_id = %input.job_id, error = %e, "Failed to save job"),
        }
    }

    let now = Utc::now();
    let receipt = SavedJobReceipt {
        id: synthetic_id("saved", now),
        job_id: input.job_id,
        saved_at: now,
    };

    Ok(Envelope::ok(receipt)
        .with_message("Job saved successfully")
        .with_source(Source::Demo))
}

/// Remove a saved job by its own id or by the job's id
pub async fn remove_saved_job(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<SavedJobQuery>,
) -> ApiResult<Envelope<()>> {
    let id = present(query.id);
    let job_id = present(query.job_id);
    if id.is_none() && job_id.is_none() {
        return Err(ApiError::bad_request("Saved job ID or job ID is required"));
    }

    let mut source = Source::Demo;
    if let Some(pool) = state.source.pool() {
        let result = match (&id, &job_id) {
            (Some(id), _) => match Uuid::parse_str(id) {
                Ok(id) => Some(SavedJob::delete_by_id(pool, &auth.user_id, id).await),
                Err(_) => None,
            },
            (None, Some(job_id)) => Some(SavedJob::delete_by_job(pool, &auth.user_id, job_id).await),
            (None, None) => None,
        };

        match result {
            Some(Ok(removed)) => {
                tracing::debug!(user_id = %auth.user_id, removed, "Removed saved job");
                source = Source::Database;
            }
            Some(Err(e)) => tracing::warn!(error = %e, "Failed to remove saved job"),
            None => {}
        }
    }

    Ok(Envelope::message("Job removed from saved jobs").with_source(source))
}

/// Whether the caller saved a job
///
/// Answers with headers only: `X-Saved: true` plus `X-Saved-Id` (200), or
/// `X-Saved: false` with 401, 400 or 404.
pub async fn check_saved_job(
    State(state): State<AppState>,
    auth: Option<AuthContext>,
    Query(query): Query<SavedJobQuery>,
) -> Response {
    let not_saved = |status: StatusCode| {
        let mut headers = HeaderMap::new();
        headers.insert(X_SAVED, HeaderValue::from_static("false"));
        (status, headers).into_response()
    };

    let Some(auth) = auth else {
        return not_saved(StatusCode::UNAUTHORIZED);
    };
    let Some(job_id) = present(query.job_id) else {
        return not_saved(StatusCode::BAD_REQUEST);
    };
    let Some(pool) = state.source.pool() else {
        return not_saved(StatusCode::NOT_FOUND);
    };

    match SavedJob::find(pool, &auth.user_id, &job_id).await {
        Ok(Some(saved)) => {
            let mut headers = HeaderMap::new();
            headers.insert(X_SAVED, HeaderValue::from_static("true"));
            if let Ok(id) = HeaderValue::from_str(&saved.id.to_string()) {
                headers.insert(X_SAVED_ID, id);
            }
            (StatusCode::OK, headers).into_response()
        }
        Ok(None) => not_saved(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::warn!(job_id = %job_id, error = %e, "Failed to check saved job");
            not_saved(StatusCode::NOT_FOUND)
        }
    }
}
