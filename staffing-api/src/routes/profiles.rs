/// Candidate profiles
///
/// # Endpoints
///
/// - `GET /api/profiles` - The caller's profile
/// - `PUT /api/profiles` - Create or replace the caller's profile

use axum::extract::State;
use staffing_shared::auth::middleware::AuthContext;
use staffing_shared::db::source::Source;
use staffing_shared::demo::fixtures;
use staffing_shared::models::profile::{Profile, ProfileDocument, ProfileInput};

use crate::app::AppState;
use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::extract::ValidatedJson;

/// The caller's profile
///
/// Callers without a stored profile get the sample profile.
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Envelope<ProfileDocument>> {
    let user_id = auth.user_id.clone();
    let sourced = state
        .source
        .with_fallback(
            "profile",
            |pool| async move { Profile::find_by_user(&pool, &user_id).await },
            || None,
        )
        .await;

    Ok(match sourced.value {
        Some(row) => Envelope::ok(ProfileDocument::from(row)).with_source(sourced.source),
        None => Envelope::ok(fixtures::profile(&auth.user_id)).with_source(Source::Demo),
    })
}

/// Create or replace the caller's profile
///
/// Last write wins. Without a database the request is echoed back under a
/// `demo_<user>` id.
pub async fn put_profile(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(input): ValidatedJson<ProfileInput>,
) -> ApiResult<Envelope<ProfileDocument>> {
    if let Some(pool) = state.source.pool() {
        match Profile::upsert(pool, &auth.user_id, &input).await {
            Ok(row) => {
                tracing::info!(user_id = %auth.user_id, "Profile saved");
                return Ok(Envelope::ok(ProfileDocument::from(row))
                    .with_message("Profile updated successfully")
                    .with_source(Source::Database));
            }
            Err(e) => tracing::warn!(user_id = %auth.user_id, error = %e, "Failed to save profile"),
        }
    }

    Ok(Envelope::ok(ProfileDocument::unsaved(&auth.user_id, input))
        .with_message("Profile updated successfully")
        .with_source(Source::Demo))
}
