/// In-app notifications
///
/// Rows are created as side effects of other writes (application submitted,
/// status changed). The owning user may mark them read or delete them; every
/// mutation is scoped by `user_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Default page size for the notification list
pub const LIST_LIMIT: i64 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: String,

    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,

    pub title: String,
    pub message: String,
    pub read: bool,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A notification as listed to its owner
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: String,
    pub user_id: String,

    #[serde(rename = "type")]
    pub kind: String,

    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub link: Option<String>,
}

impl From<Notification> for NotificationView {
    fn from(row: Notification) -> Self {
        Self {
            id: row.id.to_string(),
            user_id: row.user_id,
            kind: row.kind,
            title: row.title,
            message: row.message,
            read: row.read,
            created_at: row.created_at,
            link: row.link,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewNotification<'a> {
    pub user_id: &'a str,
    pub kind: &'a str,
    pub title: &'a str,
    pub message: String,
    pub link: Option<&'a str>,
}

impl Notification {
    pub async fn create(pool: &PgPool, data: NewNotification<'_>) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (user_id, type, title, message, link, read)
            VALUES ($1, $2, $3, $4, $5, FALSE)
            RETURNING id, user_id, type, title, message, read, link, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.kind)
        .bind(data.title)
        .bind(data.message)
        .bind(data.link)
        .fetch_one(pool)
        .await
    }

    /// The user's notifications, newest first
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Notification>(
            r#"
            SELECT id, user_id, type, title, message, read, link, created_at
            FROM notifications
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Marks one of the user's notifications read; returns rows affected
    pub async fn mark_read(pool: &PgPool, id: Uuid, user_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE notifications SET read = TRUE WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn mark_all_read(pool: &PgPool, user_id: &str) -> Result<u64, sqlx::Error> {
        let result =
            sqlx::query("UPDATE notifications SET read = TRUE WHERE user_id = $1 AND NOT read")
                .bind(user_id)
                .execute(pool)
                .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: &str) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}

/// Number of unread entries in `notifications`
pub fn unread_count(notifications: &[NotificationView]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(id: &str, read: bool) -> NotificationView {
        NotificationView {
            id: id.to_string(),
            user_id: "user_1".to_string(),
            kind: "job".to_string(),
            title: "Job Posted".to_string(),
            message: "Your job is live".to_string(),
            read,
            created_at: Utc::now(),
            link: None,
        }
    }

    #[test]
    fn test_unread_count() {
        let list = vec![view("1", false), view("2", true), view("3", false)];
        assert_eq!(unread_count(&list), 2);
        assert_eq!(unread_count(&[]), 0);
    }

    #[test]
    fn test_view_serializes_type() {
        let value = serde_json::to_value(view("1", false)).unwrap();
        assert_eq!(value["type"], "job");
        assert_eq!(value["userId"], "user_1");
        assert!(value.get("kind").is_none());
    }
}
