/// Candidate profiles
///
/// One row per identity-provider user, upserted on `clerk_user_id`. The row
/// also carries the caller's role and a profile view counter.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE profiles (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     clerk_user_id TEXT NOT NULL UNIQUE,
///     role TEXT NOT NULL DEFAULT 'candidate',
///     first_name TEXT NOT NULL DEFAULT '',
///     last_name TEXT NOT NULL DEFAULT '',
///     email TEXT NOT NULL DEFAULT '',
///     phone TEXT, location TEXT, headline TEXT, about TEXT,
///     linkedin TEXT, portfolio TEXT, avatar_url TEXT, resume_url TEXT,
///     experience JSONB NOT NULL DEFAULT '[]',
///     education JSONB NOT NULL DEFAULT '[]',
///     skills TEXT[] NOT NULL DEFAULT '{}',
///     profile_views INTEGER NOT NULL DEFAULT 0,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::validation::url_or_empty;

/// A work history entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    #[validate(length(min = 2))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 2))]
    pub company: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub start_date: String,

    /// `None` while `current` is true
    #[serde(default)]
    pub end_date: Option<String>,

    #[serde(default)]
    pub current: bool,

    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    #[validate(length(min = 2))]
    pub degree: String,

    #[serde(default)]
    #[validate(length(min = 2))]
    pub school: String,

    #[serde(default)]
    pub year: String,
}

/// Profile document as sent and returned by the API
///
/// Optional text fields use the empty string for "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    #[serde(default)]
    #[validate(length(min = 2, message = "First name is required"))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 2, message = "Last name is required"))]
    pub last_name: String,

    #[serde(default)]
    #[validate(email(message = "Valid email is required"))]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub headline: String,

    #[serde(default)]
    pub about: String,

    #[serde(default)]
    #[validate(custom(function = "url_or_empty"))]
    pub linkedin: String,

    #[serde(default)]
    #[validate(custom(function = "url_or_empty"))]
    pub portfolio: String,

    #[serde(default)]
    pub avatar_url: String,

    #[serde(default)]
    pub resume_url: String,

    #[serde(default)]
    #[validate(nested)]
    pub experience: Vec<Experience>,

    #[serde(default)]
    #[validate(nested)]
    pub education: Vec<Education>,

    #[serde(default)]
    pub skills: Vec<String>,
}

/// Profile response: the document plus its id
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileDocument {
    pub id: String,

    #[serde(flatten)]
    pub profile: ProfileInput,
}

impl ProfileDocument {
    /// Echo of a write that was not persisted
    pub fn unsaved(user_id: &str, profile: ProfileInput) -> Self {
        Self {
            id: format!("demo_{}", user_id),
            profile,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Profile {
    pub id: Uuid,
    pub clerk_user_id: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub linkedin: Option<String>,
    pub portfolio: Option<String>,
    pub avatar_url: Option<String>,
    pub resume_url: Option<String>,
    pub experience: Json<Vec<Experience>>,
    pub education: Json<Vec<Education>>,
    pub skills: Vec<String>,
    pub profile_views: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileDocument {
    fn from(row: Profile) -> Self {
        Self {
            id: row.id.to_string(),
            profile: ProfileInput {
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                phone: row.phone.unwrap_or_default(),
                location: row.location.unwrap_or_default(),
                headline: row.headline.unwrap_or_default(),
                about: row.about.unwrap_or_default(),
                linkedin: row.linkedin.unwrap_or_default(),
                portfolio: row.portfolio.unwrap_or_default(),
                avatar_url: row.avatar_url.unwrap_or_default(),
                resume_url: row.resume_url.unwrap_or_default(),
                experience: row.experience.0,
                education: row.education.0,
                skills: row.skills,
            },
        }
    }
}

const COLUMNS: &str = "id, clerk_user_id, role, first_name, last_name, email, phone, location, \
     headline, about, linkedin, portfolio, avatar_url, resume_url, experience, education, \
     skills, profile_views, created_at, updated_at";

impl Profile {
    pub async fn find_by_user(pool: &PgPool, user_id: &str) -> Result<Option<Self>, sqlx::Error> {
        let sql = format!("SELECT {} FROM profiles WHERE clerk_user_id = $1", COLUMNS);

        sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Inserts or replaces the caller's profile
    ///
    /// Empty optional strings are stored as NULL. Role and view count are
    /// left untouched on conflict.
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        data: &ProfileInput,
    ) -> Result<Self, sqlx::Error> {
        let sql = format!(
            r#"
            INSERT INTO profiles (
                clerk_user_id, first_name, last_name, email, phone, location, headline,
                about, linkedin, portfolio, avatar_url, resume_url, experience, education, skills
            )
            VALUES (
                $1, $2, $3, $4, NULLIF($5, ''), NULLIF($6, ''), NULLIF($7, ''),
                NULLIF($8, ''), NULLIF($9, ''), NULLIF($10, ''), NULLIF($11, ''), NULLIF($12, ''),
                $13, $14, $15
            )
            ON CONFLICT (clerk_user_id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                email = EXCLUDED.email,
                phone = EXCLUDED.phone,
                location = EXCLUDED.location,
                headline = EXCLUDED.headline,
                about = EXCLUDED.about,
                linkedin = EXCLUDED.linkedin,
                portfolio = EXCLUDED.portfolio,
                avatar_url = EXCLUDED.avatar_url,
                resume_url = EXCLUDED.resume_url,
                experience = EXCLUDED.experience,
                education = EXCLUDED.education,
                skills = EXCLUDED.skills,
                updated_at = NOW()
            RETURNING {}
            "#,
            COLUMNS
        );

        sqlx::query_as::<_, Profile>(&sql)
            .bind(user_id)
            .bind(&data.first_name)
            .bind(&data.last_name)
            .bind(&data.email)
            .bind(&data.phone)
            .bind(&data.location)
            .bind(&data.headline)
            .bind(&data.about)
            .bind(&data.linkedin)
            .bind(&data.portfolio)
            .bind(&data.avatar_url)
            .bind(&data.resume_url)
            .bind(Json(&data.experience))
            .bind(Json(&data.education))
            .bind(&data.skills)
            .fetch_one(pool)
            .await
    }

    /// The caller's `role` column, if they have a profile
    pub async fn find_role(pool: &PgPool, user_id: &str) -> Result<Option<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT role FROM profiles WHERE clerk_user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// View counter for the caller's profile (0 without a profile)
    pub async fn views(pool: &PgPool, user_id: &str) -> Result<i64, sqlx::Error> {
        let views = sqlx::query_scalar::<_, i32>(
            "SELECT profile_views FROM profiles WHERE clerk_user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(views.map(i64::from).unwrap_or(0))
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> ProfileInput {
        ProfileInput {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_profile() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_short_names_and_bad_email() {
        let profile = ProfileInput {
            first_name: "A".to_string(),
            email: "not-an-email".to_string(),
            ..valid()
        };
        let errors = profile.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("first_name"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("last_name"));
    }

    #[test]
    fn test_links_may_be_empty_but_not_malformed() {
        let mut profile = valid();
        profile.linkedin = String::new();
        assert!(profile.validate().is_ok());

        profile.portfolio = "my site".to_string();
        assert!(profile.validate().unwrap_err().field_errors().contains_key("portfolio"));
    }

    #[test]
    fn test_nested_experience_is_validated() {
        let mut profile = valid();
        profile.experience.push(Experience {
            title: "X".to_string(),
            company: "Acme".to_string(),
            ..Default::default()
        });
        let errors = profile.validate().unwrap_err();
        assert!(errors.errors().contains_key("experience"));
    }

    #[test]
    fn test_document_flattens_profile() {
        let doc = ProfileDocument::unsaved("user_1", valid());
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["id"], "demo_user_1");
        assert_eq!(value["firstName"], "Ada");
        assert_eq!(value["experience"], json!([]));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let profile: ProfileInput = serde_json::from_value(json!({ "firstName": "Ada" })).unwrap();
        assert_eq!(profile.last_name, "");
        assert!(profile.skills.is_empty());
    }
}
