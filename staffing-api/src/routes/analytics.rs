/// Admin analytics
///
/// `GET /api/admin/analytics` - Platform overview for administrators. The
/// sample report is always the base; live table counts replace its overview
/// numbers when a database is reachable.

use axum::extract::State;
use chrono::Utc;
use staffing_shared::auth::authorization::require_admin;
use staffing_shared::auth::middleware::AuthContext;
use staffing_shared::db::source::Source;
use staffing_shared::demo::fixtures;
use staffing_shared::models::analytics::{Analytics, AnalyticsCounts};

use crate::app::AppState;
use crate::envelope::Envelope;
use crate::error::ApiResult;

/// # Errors
///
/// - `401 Unauthorized`: No session
/// - `403 Forbidden`: Caller is not an administrator
pub async fn get_analytics(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Envelope<Analytics>> {
    require_admin(&auth, &state.source)?;

    let report = fixtures::analytics(Utc::now());

    let Some(pool) = state.source.pool() else {
        return Ok(Envelope::ok(report).with_source(Source::Demo));
    };

    match AnalyticsCounts::load(pool).await {
        Ok(counts) => Ok(Envelope::ok(report.with_counts(counts)).with_source(Source::Database)),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load analytics counts, using sample report");
            Ok(Envelope::ok(report).with_source(Source::Demo))
        }
    }
}
