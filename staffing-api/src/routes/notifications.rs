/// In-app notifications
///
/// # Endpoints
///
/// - `GET /api/notifications` - Latest notifications with the unread count
/// - `PATCH /api/notifications` - `{"action": "markRead", "notificationId": "..."}`
///   or `{"action": "markAllRead"}`
/// - `DELETE /api/notifications?id=` - Delete one notification

use axum::extract::{Query, State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use staffing_shared::auth::middleware::AuthContext;
use staffing_shared::db::source::Source;
use staffing_shared::demo::fixtures;
use staffing_shared::models::notification::{
    unread_count, NewNotification, Notification, NotificationView, LIST_LIMIT,
};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::envelope::Envelope;
use crate::error::{ApiError, ApiResult};
use crate::extract::ValidatedJson;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    pub notifications: Vec<NotificationView>,
    pub unread_count: usize,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NotificationAction {
    #[serde(default)]
    pub action: String,

    pub notification_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationIdQuery {
    pub id: Option<String>,
}

/// Inserts a notification, logging instead of failing
pub(crate) async fn notify(pool: &PgPool, notification: NewNotification<'_>) {
    let user_id = notification.user_id.to_string();
    if let Err(e) = Notification::create(pool, notification).await {
        tracing::warn!(user_id = %user_id, error = %e, "Failed to create notification");
    }
}

/// Latest notifications for the caller
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Envelope<NotificationFeed>> {
    let user_id = auth.user_id;
    let demo_user = user_id.clone();

    let sourced = state
        .source
        .with_fallback(
            "notifications",
            |pool| async move {
                let rows = Notification::list_for_user(&pool, &user_id, LIST_LIMIT).await?;
                Ok(rows.into_iter().map(NotificationView::from).collect::<Vec<_>>())
            },
            || fixtures::notifications(&demo_user, Utc::now()),
        )
        .await;

    Ok(Envelope::sourced(sourced.map(|notifications| NotificationFeed {
        unread_count: unread_count(&notifications),
        notifications,
    })))
}

/// Mark one or all notifications read
///
/// # Errors
///
/// - `400 Bad Request`: Unknown action, or `markRead` without `notificationId`
pub async fn update_notifications(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(body): ValidatedJson<NotificationAction>,
) -> ApiResult<Envelope<()>> {
    match body.action.as_str() {
        "markRead" => {
            let id = body
                .notification_id
                .filter(|id| !id.trim().is_empty())
                .ok_or_else(|| ApiError::bad_request("Notification ID required"))?;

            let source = match (state.source.pool(), Uuid::parse_str(&id)) {
                (Some(pool), Ok(id)) => match Notification::mark_read(pool, id, &auth.user_id).await {
                    Ok(_) => Source::Database,
                    Err(e) => {
                        tracing::warn!(notification_id = %id, error = %e, "Failed to mark notification read");
                        Source::Demo
                    }
                },
                _ => Source::Demo,
            };

            Ok(Envelope::message("Notification marked as read").with_source(source))
        }
        "markAllRead" => {
            let source = match state.source.pool() {
                Some(pool) => match Notification::mark_all_read(pool, &auth.user_id).await {
                    Ok(count) => {
                        tracing::debug!(user_id = %auth.user_id, count, "Marked notifications read");
                        Source::Database
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to mark notifications read");
                        Source::Demo
                    }
                },
                None => Source::Demo,
            };

            Ok(Envelope::message("All notifications marked as read").with_source(source))
        }
        _ => Err(ApiError::bad_request("Invalid action")),
    }
}

/// Delete a notification
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<NotificationIdQuery>,
) -> ApiResult<Envelope<()>> {
    let id = query
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Notification ID required"))?;

    let source = match (state.source.pool(), Uuid::parse_str(&id)) {
        (Some(pool), Ok(id)) => match Notification::delete(pool, id, &auth.user_id).await {
            Ok(_) => Source::Database,
            Err(e) => {
                tracing::warn!(notification_id = %id, error = %e, "Failed to delete notification");
                Source::Demo
            }
        },
        _ => Source::Demo,
    };

    Ok(Envelope::message("Notification deleted").with_source(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_shape() {
        let notifications = fixtures::notifications("user_1", Utc::now());
        let feed = NotificationFeed {
            unread_count: unread_count(&notifications),
            notifications,
        };

        let value = serde_json::to_value(&feed).unwrap();
        assert!(value["notifications"].is_array());
        assert_eq!(value["unreadCount"], feed.unread_count);
    }

    #[test]
    fn test_action_body() {
        let body: NotificationAction =
            serde_json::from_str(r#"{"action":"markRead","notificationId":"1"}"#).unwrap();
        assert_eq!(body.action, "markRead");
        assert_eq!(body.notification_id.as_deref(), Some("1"));

        let body: NotificationAction = serde_json::from_str("{}").unwrap();
        assert!(body.action.is_empty());
    }
}
