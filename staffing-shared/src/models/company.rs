/// Employer company profiles, one per identity-provider user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::validation::url_or_empty;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default)]
    pub linkedin: String,

    #[serde(default)]
    pub twitter: String,

    #[serde(default)]
    pub instagram: String,
}

/// Company document as sent and returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInput {
    #[serde(default)]
    #[validate(length(min = 2, message = "Company name is required"))]
    pub name: String,

    #[serde(default)]
    pub tagline: String,

    #[serde(default)]
    #[validate(custom(function = "url_or_empty"))]
    pub website: String,

    #[serde(default)]
    pub industry: String,

    #[serde(default)]
    pub size: String,

    #[serde(default)]
    pub founded: String,

    #[serde(default)]
    pub headquarters: String,

    #[serde(default)]
    pub locations: Vec<String>,

    #[serde(default)]
    pub about: String,

    #[serde(default)]
    pub culture: String,

    #[serde(default)]
    pub benefits: Vec<String>,

    #[serde(default)]
    pub social_links: SocialLinks,

    #[serde(default)]
    pub logo_url: String,

    #[serde(default)]
    pub banner_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDocument {
    pub id: String,

    #[serde(flatten)]
    pub company: CompanyInput,
}

impl CompanyDocument {
    pub fn unsaved(user_id: &str, company: CompanyInput) -> Self {
        Self {
            id: format!("demo_{}", user_id),
            company,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Company {
    pub id: Uuid,
    pub clerk_user_id: String,
    pub name: String,
    pub tagline: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub founded: Option<String>,
    pub headquarters: Option<String>,
    pub locations: Vec<String>,
    pub about: Option<String>,
    pub culture: Option<String>,
    pub benefits: Vec<String>,
    pub social_links: Json<SocialLinks>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Company> for CompanyDocument {
    fn from(row: Company) -> Self {
        Self {
            id: row.id.to_string(),
            company: CompanyInput {
                name: row.name,
                tagline: row.tagline.unwrap_or_default(),
                website: row.website.unwrap_or_default(),
                industry: row.industry.unwrap_or_default(),
                size: row.size.unwrap_or_default(),
                founded: row.founded.unwrap_or_default(),
                headquarters: row.headquarters.unwrap_or_default(),
                locations: row.locations,
                about: row.about.unwrap_or_default(),
                culture: row.culture.unwrap_or_default(),
                benefits: row.benefits,
                social_links: row.social_links.0,
                logo_url: row.logo_url.unwrap_or_default(),
                banner_url: row.banner_url.unwrap_or_default(),
            },
        }
    }
}

impl Company {
    pub async fn find_by_user(pool: &PgPool, user_id: &str) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Company>(
            r#"
            SELECT id, clerk_user_id, name, tagline, website, industry, size, founded,
                   headquarters, locations, about, culture, benefits, social_links,
                   logo_url, banner_url, created_at, updated_at
            FROM companies
            WHERE clerk_user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Inserts or replaces the caller's company (last write wins)
    pub async fn upsert(
        pool: &PgPool,
        user_id: &str,
        data: &CompanyInput,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (
                clerk_user_id, name, tagline, website, industry, size, founded, headquarters,
                locations, about, culture, benefits, social_links, logo_url, banner_url
            )
            VALUES (
                $1, $2, NULLIF($3, ''), NULLIF($4, ''), NULLIF($5, ''), NULLIF($6, ''),
                NULLIF($7, ''), NULLIF($8, ''), $9, NULLIF($10, ''), NULLIF($11, ''), $12, $13,
                NULLIF($14, ''), NULLIF($15, '')
            )
            ON CONFLICT (clerk_user_id) DO UPDATE SET
                name = EXCLUDED.name,
                tagline = EXCLUDED.tagline,
                website = EXCLUDED.website,
                industry = EXCLUDED.industry,
                size = EXCLUDED.size,
                founded = EXCLUDED.founded,
                headquarters = EXCLUDED.headquarters,
                locations = EXCLUDED.locations,
                about = EXCLUDED.about,
                culture = EXCLUDED.culture,
                benefits = EXCLUDED.benefits,
                social_links = EXCLUDED.social_links,
                logo_url = EXCLUDED.logo_url,
                banner_url = EXCLUDED.banner_url,
                updated_at = NOW()
            RETURNING id, clerk_user_id, name, tagline, website, industry, size, founded,
                      headquarters, locations, about, culture, benefits, social_links,
                      logo_url, banner_url, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&data.name)
        .bind(&data.tagline)
        .bind(&data.website)
        .bind(&data.industry)
        .bind(&data.size)
        .bind(&data.founded)
        .bind(&data.headquarters)
        .bind(&data.locations)
        .bind(&data.about)
        .bind(&data.culture)
        .bind(&data.benefits)
        .bind(Json(&data.social_links))
        .bind(&data.logo_url)
        .bind(&data.banner_url)
        .fetch_one(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM companies")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_name_required() {
        let company: CompanyInput = serde_json::from_value(json!({ "tagline": "We hire" })).unwrap();
        let errors = company.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_website_must_be_url_or_empty() {
        let mut company = CompanyInput {
            name: "Acme".to_string(),
            ..Default::default()
        };
        assert!(company.validate().is_ok());

        company.website = "acme".to_string();
        assert!(company.validate().is_err());

        company.website = "https://acme.example".to_string();
        assert!(company.validate().is_ok());
    }

    #[test]
    fn test_social_links_round_trip_camel_case() {
        let company: CompanyInput = serde_json::from_value(json!({
            "name": "Acme",
            "socialLinks": { "linkedin": "https://linkedin.com/company/acme" },
            "logoUrl": "https://cdn.example/logo.png"
        }))
        .unwrap();
        assert_eq!(company.social_links.twitter, "");

        let doc = serde_json::to_value(CompanyDocument::unsaved("user_9", company)).unwrap();
        assert_eq!(doc["id"], "demo_user_9");
        assert_eq!(doc["logoUrl"], "https://cdn.example/logo.png");
        assert_eq!(doc["socialLinks"]["linkedin"], "https://linkedin.com/company/acme");
    }
}
