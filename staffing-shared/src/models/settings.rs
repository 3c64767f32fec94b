/// Per-user account settings
///
/// Every field of a settings write is optional; omitted fields take the
/// defaults below when stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::validation::{one_of, PROFILE_VISIBILITY, RESUME_VISIBILITY};

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
pub const DEFAULT_DATE_FORMAT: &str = "mdy";
pub const DEFAULT_JOB_DURATION_DAYS: i32 = 30;

/// Email notification toggles (candidate and employer keys share one document)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_status_updates: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_job_recommendations: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_job_digest: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interview_reminders: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_emails: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_applications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_status_changes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_expiration_reminders: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly_summary_reports: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform_updates: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    /// public | employers | private
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_visibility: Option<String>,

    /// applied | all | none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_visibility: Option<String>,
}

/// Settings document as sent and returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_job_duration: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<NotificationPreferences>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy: Option<PrivacySettings>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_factor_enabled: Option<bool>,
}

impl Validate for SettingsInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(privacy) = &self.privacy {
            if let Some(value) = &privacy.profile_visibility {
                if let Err(e) = one_of(value, PROFILE_VISIBILITY) {
                    errors.add("privacy", e);
                }
            }
            if let Some(value) = &privacy.resume_visibility {
                if let Err(e) = one_of(value, RESUME_VISIBILITY) {
                    errors.add("privacy", e);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsDocument {
    pub id: String,

    #[serde(flatten)]
    pub settings: SettingsInput,
}

impl SettingsDocument {
    pub fn unsaved(user_id: &str, settings: SettingsInput) -> Self {
        Self {
            id: format!("demo_{}", user_id),
            settings,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserSettings {
    pub id: Uuid,
    pub clerk_user_id: String,
    pub language: String,
    pub timezone: String,
    pub date_format: String,
    pub default_job_duration: i32,
    pub notifications: Json<NotificationPreferences>,
    pub privacy: Json<PrivacySettings>,
    pub two_factor_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserSettings> for SettingsDocument {
    fn from(row: UserSettings) -> Self {
        Self {
            id: row.id.to_string(),
            settings: SettingsInput {
                language: Some(row.language),
                timezone: Some(row.timezone),
                date_format: Some(row.date_format),
                default_job_duration: Some(row.default_job_duration),
                notifications: Some(row.notifications.0),
                privacy: Some(row.privacy.0),
                two_factor_enabled: Some(row.two_factor_enabled),
            },
        }
    }
}

impl UserSettings {
    pub async fn find_by_user(pool: &PgPool, user_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, UserSettings>(
            r#"
            SELECT id, clerk_user_id, language, timezone, date_format, default_job_duration,
                   notifications, privacy, two_factor_enabled, created_at, updated_at
            FROM user_settings
            WHERE clerk_user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Inserts or replaces the caller's settings, filling omitted fields with defaults
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        data: &SettingsInput,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, UserSettings>(
            r#"
            INSERT INTO user_settings (
                clerk_user_id, language, timezone, date_format, default_job_duration,
                notifications, privacy, two_factor_enabled
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (clerk_user_id) DO UPDATE SET
                language = EXCLUDED.language,
                timezone = EXCLUDED.timezone,
                date_format = EXCLUDED.date_format,
                default_job_duration = EXCLUDED.default_job_duration,
                notifications = EXCLUDED.notifications,
                privacy = EXCLUDED.privacy,
                two_factor_enabled = EXCLUDED.two_factor_enabled,
                updated_at = NOW()
            RETURNING id, clerk_user_id, language, timezone, date_format, default_job_duration,
                      notifications, privacy, two_factor_enabled, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(data.language.as_deref().unwrap_or(DEFAULT_LANGUAGE))
        .bind(data.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE))
        .bind(data.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT))
        .bind(data.default_job_duration.unwrap_or(DEFAULT_JOB_DURATION_DAYS))
        .bind(Json(data.notifications.clone().unwrap_or_default()))
        .bind(Json(data.privacy.clone().unwrap_or_default()))
        .bind(data.two_factor_enabled.unwrap_or(false))
        .fetch_one(pool)
        .await
    }
}
