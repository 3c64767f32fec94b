/// Candidate dashboard
///
/// `GET /api/dashboard` - Application counts, recent applications and
/// recommended jobs for the caller.

use axum::extract::State;
use chrono::Utc;
use staffing_shared::auth::middleware::AuthContext;
use staffing_shared::demo::fixtures;
use staffing_shared::models::dashboard::Dashboard;

use crate::app::AppState;
use crate::envelope::Envelope;
use crate::error::ApiResult;

pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Envelope<Dashboard>> {
    let now = Utc::now();

    let sourced = state
        .source
        .with_fallback(
            "dashboard",
            |pool| async move { Dashboard::load(&pool, &auth.user_id, now).await },
            || fixtures::dashboard(now),
        )
        .await;

    Ok(Envelope::sourced(sourced))
}
