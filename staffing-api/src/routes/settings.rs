/// Account settings
///
/// # Endpoints
///
/// - `GET /api/settings` - The caller's settings
/// - `PUT /api/settings` - Create or replace the caller's settings
///
/// Omitted settings fields are stored with their defaults.

use axum::extract::State;
use staffing_shared::auth::middleware::AuthContext;
use staffing_shared::db::source::Source;
use staffing_shared::demo::fixtures;
use staffing_shared::models::settings::{UserSettings, SettingsDocument, SettingsInput};

use crate::app::AppState;
use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::extract::ValidatedJson;

/// The caller's settings
///
/// Callers without a stored settings get the sample settings.
pub async fn get_settings(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Envelope<SettingsDocument>> {
    let user_id = auth.user_id.clone();
    let sourced = state
        .source
        .with_fallback(
            "settings",
            |pool| async move { UserSettings::find_by_user(&pool, &user_id).await },
            || None,
        )
        .await;

    Ok(match sourced.value {
        Some(row) => Envelope::ok(SettingsDocument::from(row)).with_source(sourced.source),
        None => Envelope::ok(fixtures::settings(&auth.user_id)).with_source(Source::Demo),
    })
}

/// Create or replace the caller's settings
///
/// Last write wins. Without a database the request is echoed back under a
/// `demo_<user>` id.
pub async fn put_settings(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(input): ValidatedJson<SettingsInput>,
) -> ApiResult<Envelope<SettingsDocument>> {
    if let Some(pool) = state.source.pool() {
        match UserSettings::upsert(pool, &auth.user_id, &input).await {
            Ok(row) => {
                tracing::info!(user_id = %auth.user_id, "Settings saved");
                return Ok(Envelope::ok(SettingsDocument::from(row))
                    .with_message("Settings updated successfully")
                    .with_source(Source::Database));
            }
            Err(e) => tracing::warn!(user_id = %auth.user_id, error = %e, "Failed to save settings"),
        }
    }

    Ok(Envelope::ok(SettingsDocument::unsaved(&auth.user_id, input))
        .with_message("Settings updated successfully")
        .with_source(Source::Demo))
}
