/// Employer talent requests
///
/// # Endpoints
///
/// - `POST /api/talent-requests` - Submit a staffing request (public)
/// - `GET /api/talent-requests?status=&limit=&offset=` - List requests (admin)

use axum::extract::{Query, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use staffing_shared::auth::authorization::require_admin;
use staffing_shared::auth::middleware::AuthContext;
use staffing_shared::db::source::Source;
use staffing_shared::email::templates::{self, TalentRequestSummary};
use staffing_shared::models::talent_request::{
    TalentRequest, TalentRequestInput, UnsavedTalentRequest,
};

use crate::app::AppState;
use crate::envelope::{Envelope, Pagination};
use crate::error::ApiResult;
use crate::extract::ValidatedJson;

const DEFAULT_LIMIT: i64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct TalentRequestQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SubmittedRequest {
    Stored(TalentRequest),
    Unsaved(UnsavedTalentRequest),
}

/// Submit a talent request
///
/// The site inbox is emailed whether or not the request was stored.
pub async fn submit_talent_request(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<TalentRequestInput>,
) -> ApiResult<Envelope<SubmittedRequest>> {
    state.send_email(
        templates::talent_request(
            &state.config.api.app_url,
            TalentRequestSummary {
                company_name: &input.company_name,
                contact_name: &input.contact_name,
                email: &input.email,
                phone: &input.phone,
                position_title: &input.position_title,
                number_of_positions: input.number_of_positions,
                location: &input.location,
                hiring_timeline: &input.hiring_timeline,
            },
        )
        .to(&state.config.email.inbox),
    );

    if let Some(pool) = state.source.pool() {
        match TalentRequest::create(pool, &input).await {
            Ok(request) => {
                tracing::info!(
                    request_id = %request.id,
                    company = %request.company_name,
                    "Talent request submitted"
                );
                return Ok(Envelope::ok(SubmittedRequest::Stored(request))
                    .with_message("Talent request submitted successfully")
                    .with_source(Source::Database));
            }
            Err(e) => tracing::warn!(error = %e, "Failed to store talent request"),
        }
    }

    Ok(
        Envelope::ok(SubmittedRequest::Unsaved(UnsavedTalentRequest::new(input, Utc::now())))
            .with_message("Talent request submitted successfully")
            .with_source(Source::Demo),
    )
}

/// List talent requests, newest first
///
/// # Errors
///
/// - `403 Forbidden`: Caller is not an administrator
pub async fn list_talent_requests(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<TalentRequestQuery>,
) -> ApiResult<Envelope<Vec<TalentRequest>>> {
    require_admin(&auth, &state.source)?;

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 100);
    let offset = query.offset.unwrap_or(0).max(0);
    let status = query.status.filter(|s| !s.is_empty());

    let sourced = state
        .source
        .with_fallback(
            "talent requests",
            |pool| async move { TalentRequest::list(&pool, status.as_deref(), limit, offset).await },
            || (Vec::new(), 0),
        )
        .await;

    let (requests, total) = sourced.value;
    Ok(Envelope::ok(requests)
        .with_source(sourced.source)
        .with_pagination(Pagination::new(total, limit, offset)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query: TalentRequestQuery = serde_json::from_str("{}").unwrap();
        assert!(query.status.is_none());
        assert!(query.limit.is_none());
    }
}
