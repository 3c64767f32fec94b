/// Job applications
///
/// # Endpoints
///
/// - `GET /api/applications` - The caller's applications
/// - `POST /api/applications` - Submit an application
/// - `PATCH /api/applications` - Change an application's status
///
/// Submissions email a confirmation to the candidate and a notice to the
/// site inbox. Status changes notify the candidate in-app and by email.

use axum::extract::State;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use staffing_shared::auth::middleware::AuthContext;
use staffing_shared::db::source::Source;
use staffing_shared::demo::{fixtures, synthetic_id};
use staffing_shared::email::templates;
use staffing_shared::models::application::{Application, ApplicationInput, ApplicationSummary};
use staffing_shared::models::notification::NewNotification;
use uuid::Uuid;
use validator::Validate;

use super::notifications::notify;
use crate::app::AppState;
use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult};
use crate::extract::ValidatedJson;

const NOTIFICATION_KIND: &str = "application_update";
const APPLICATIONS_LINK: &str = "/dashboard/applications";

/// Job title and company shown in the confirmation email until applications carry them
const CONFIRMATION_JOB_TITLE: &str = "Your Applied Position";
const CONFIRMATION_COMPANY: &str = "Humanly Staffing Partner";

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    #[serde(default)]
    pub application_id: String,

    #[serde(default)]
    pub status: String,
}

/// Echo of a status change that was not stored
#[derive(Debug, Serialize)]
pub struct UnsavedStatus {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UpdatedApplication {
    Stored(Application),
    Unsaved(UnsavedStatus),
}

/// The caller's applications, newest first
pub async fn list_applications(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Envelope<Vec<ApplicationSummary>>> {
    let sourced = state
        .source
        .with_fallback(
            "applications",
            |pool| async move {
                let rows = Application::list_for_candidate(&pool, &auth.user_id, None).await?;
                Ok(rows.into_iter().map(ApplicationSummary::from).collect())
            },
            fixtures::application_summaries,
        )
        .await;

    Ok(Envelope::sourced(sourced))
}

/// Submit an application
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "message": "Application submitted successfully",
///   "applicationId": "..."
/// }
/// ```
pub async fn submit_application(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(input): ValidatedJson<ApplicationInput>,
) -> ApiResult<Envelope<()>> {
    let now = Utc::now();
    let mut source = Source::Demo;
    let mut application_id = None;

    if let Some(pool) = state.source.pool() {
        match Application::create(pool, &auth.user_id, &input).await {
            Ok(application) => {
                tracing::info!(
                    application_id = %application.id,
                    job_id = %application.job_id,
                    "Application submitted"
                );
                notify(
                    pool,
                    NewNotification {
                        user_id: &auth.user_id,
                        kind: NOTIFICATION_KIND,
                        title: "Application Submitted",
                        message: "Your application has been submitted successfully.".to_string(),
                        link: Some(APPLICATIONS_LINK),
                    },
                )
                .await;
                source = Source::Database;
                application_id = Some(application.id.to_string());
            }
            Err(e) => tracing::warn!(error = %e, "Failed to store application, answering with an echo"),
        }
    }

    let application_id = application_id.unwrap_or_else(|| synthetic_id("app", now));
    let app_url = &state.config.api.app_url;

    state.send_email(
        templates::application_confirmation(
            app_url,
            &input.first_name,
            CONFIRMATION_JOB_TITLE,
            CONFIRMATION_COMPANY,
        )
        .to(&input.email),
    );
    state.send_email(
        templates::new_application_admin(
            app_url,
            &format!("{} {}", input.first_name, input.last_name),
            &input.email,
            "Job Application",
            &application_id,
            now,
        )
        .to(&state.config.email.inbox),
    );

    Ok(Envelope::message("Application submitted successfully")
        .with_application_id(application_id)
        .with_source(source)
        .created())
}

/// Change an application's status
///
/// Any non-empty status is accepted. Without a database, or for ids that are
/// not UUIDs, the change is echoed back.
///
/// # Errors
///
/// - `400 Bad Request`: Missing `applicationId` or `status`
/// - `404 Not Found`: No stored application with that id
pub async fn update_application_status(
    State(state): State<AppState>,
    _auth: AuthContext,
    ValidatedJson(update): ValidatedJson<StatusUpdate>,
) -> ApiResult<Envelope<UpdatedApplication>> {
    let application_id = update.application_id.trim();
    let status = update.status.trim();
    if application_id.is_empty() || status.is_empty() {
        return Err(ApiError::bad_request("Application ID and status are required"));
    }

    if let (Some(pool), Ok(id)) = (state.source.pool(), Uuid::parse_str(application_id)) {
        match Application::update_status(pool, id, status).await {
            Ok(Some(application)) => {
                tracing::info!(application_id = %id, status = %status, "Application status changed");
                announce_status(&state, pool, &application).await;
                return Ok(Envelope::ok(UpdatedApplication::Stored(application))
                    .with_source(Source::Database));
            }
            Ok(None) => return Err(ApiError::not_found("Application not found")),
            Err(e) => tracing::warn!(application_id = %id, error = %e, "Failed to update application"),
        }
    }

    Ok(Envelope::ok(UpdatedApplication::Unsaved(UnsavedStatus {
        id: application_id.to_string(),
        status: status.to_string(),
    }))
    .with_source(Source::Demo))
}

/// In-app notification plus an email when the application recorded an address
pub(crate) async fn announce_status(state: &AppState, pool: &sqlx::PgPool, application: &Application) {
    notify(
        pool,
        NewNotification {
            user_id: &application.candidate_id,
            kind: NOTIFICATION_KIND,
            title: "Application Status Updated",
            message: format!(
                "Your application status has been updated to: {}",
                application.status
            ),
            link: Some(APPLICATIONS_LINK),
        },
    )
    .await;

    let answer = |key: &str| {
        application
            .answers
            .get(key)
            .and_then(|v| v.as_str())
            .filter(|v| !v.is_empty())
    };

    if let Some(email) = answer("email") {
        let first_name = answer("firstName").unwrap_or("there");
        state.send_email(
            templates::application_status_change(
                &state.config.api.app_url,
                first_name,
                &application.status,
            )
            .to(email),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_update_defaults_missing_fields() {
        let update: StatusUpdate = serde_json::from_str(r#"{"status":"reviewing"}"#).unwrap();
        assert!(update.application_id.is_empty());
        assert_eq!(update.status, "reviewing");
    }

    #[test]
    fn test_unsaved_status_shape() {
        let value = serde_json::to_value(UpdatedApplication::Unsaved(UnsavedStatus {
            id: "app_1".to_string(),
            status: "interviewing".to_string(),
        }))
        .unwrap();
        assert_eq!(value, serde_json::json!({"id": "app_1", "status": "interviewing"}));
    }
}
