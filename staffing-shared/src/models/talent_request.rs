/// Staffing requests submitted by prospective employers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub const STATUS_PENDING: &str = "pending";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TalentRequest {
    pub id: Uuid,
    pub company_name: String,
    pub industry: String,
    pub contact_name: String,
    pub contact_title: String,
    pub email: String,
    pub phone: String,
    pub position_title: String,
    pub number_of_positions: i32,
    pub employment_type: String,
    pub location: String,
    pub salary_range: Option<String>,
    pub hiring_timeline: String,
    pub job_description: String,
    pub additional_notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TalentRequestInput {
    #[serde(default)]
    #[validate(length(min = 2, message = "Company name is required"))]
    pub company_name: String,

    #[serde(default)]
    #[validate(length(min = 2, message = "Industry is required"))]
    pub industry: String,

    #[serde(default)]
    #[validate(length(min = 2, message = "Contact name is required"))]
    pub contact_name: String,

    #[serde(default)]
    #[validate(length(min = 2, message = "Job title is required"))]
    pub contact_title: String,

    #[serde(default)]
    #[validate(email(message = "Valid email is required"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 10, message = "Valid phone number is required"))]
    pub phone: String,

    #[serde(default)]
    #[validate(length(min = 2, message = "Position title is required"))]
    pub position_title: String,

    #[serde(default)]
    #[validate(range(min = 1, message = "At least 1 position required"))]
    pub number_of_positions: i32,

    #[serde(default)]
    #[validate(length(min = 2, message = "Employment type is required"))]
    pub employment_type: String,

    #[serde(default)]
    #[validate(length(min = 2, message = "Location is required"))]
    pub location: String,

    #[serde(default)]
    pub salary_range: String,

    #[serde(default)]
    #[validate(length(min = 2, message = "Hiring timeline is required"))]
    pub hiring_timeline: String,

    #[serde(default)]
    #[validate(length(min = 50, message = "Job description must be at least 50 characters"))]
    pub job_description: String,

    #[serde(default)]
    pub additional_notes: String,
}

/// Echo of a request that was not persisted
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsavedTalentRequest {
    pub id: String,

    #[serde(flatten)]
    pub request: TalentRequestInput,

    pub status: &'static str,
    pub created_at: DateTime<Utc>,
}

impl UnsavedTalentRequest {
    pub fn new(request: TalentRequestInput, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("demo_{}", now.timestamp_millis()),
            request,
            status: STATUS_PENDING,
            created_at: now,
        }
    }
}

impl TalentRequest {
    pub async fn create(pool: &PgPool, data: &TalentRequestInput) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, TalentRequest>(
            r#"
            INSERT INTO talent_requests (
                company_name, industry, contact_name, contact_title, email, phone,
                position_title, number_of_positions, employment_type, location, salary_range,
                hiring_timeline, job_description, additional_notes, status
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NULLIF($11, ''), $12, $13,
                NULLIF($14, ''), $15
            )
            RETURNING id, company_name, industry, contact_name, contact_title, email, phone,
                      position_title, number_of_positions, employment_type, location,
                      salary_range, hiring_timeline, job_description, additional_notes,
                      status, created_at
            "#,
        )
        .bind(&data.company_name)
        .bind(&data.industry)
        .bind(&data.contact_name)
        .bind(&data.contact_title)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(&data.position_title)
        .bind(data.number_of_positions)
        .bind(&data.employment_type)
        .bind(&data.location)
        .bind(&data.salary_range)
        .bind(&data.hiring_timeline)
        .bind(&data.job_description)
        .bind(&data.additional_notes)
        .bind(STATUS_PENDING)
        .fetch_one(pool)
        .await
    }

    /// Lists requests newest first with the total match count
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<Self>, i64), sqlx::Error> {
        let requests = sqlx::query_as::<_, TalentRequest>(
            r#"
            SELECT id, company_name, industry, contact_name, contact_title, email, phone,
                   position_title, number_of_positions, employment_type, location,
                   salary_range, hiring_timeline, job_description, additional_notes,
                   status, created_at
            FROM talent_requests
            WHERE ($1::text IS NULL OR status = $1)
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(status)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM talent_requests WHERE ($1::text IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(pool)
        .await?;

        Ok((requests, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn valid() -> serde_json::Value {
        json!({
            "companyName": "Acme Logistics",
            "industry": "Logistics",
            "contactName": "Pat Doe",
            "contactTitle": "HR Director",
            "email": "pat@acme.example",
            "phone": "555-987-6543",
            "positionTitle": "Forklift Operator",
            "numberOfPositions": 4,
            "employmentType": "Full-time",
            "location": "Atlanta, GA",
            "hiringTimeline": "Within 30 days",
            "jobDescription": "Operate forklifts safely across two warehouse shifts with rotating weekends."
        })
    }

    #[test]
    fn test_valid_request() {
        let input: TalentRequestInput = serde_json::from_value(valid()).unwrap();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_positions_must_be_positive() {
        let mut body = valid();
        body["numberOfPositions"] = json!(0);
        let input: TalentRequestInput = serde_json::from_value(body).unwrap();

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        let positions = fields["number_of_positions"];
        assert_eq!(
            positions[0].message.as_deref(),
            Some("At least 1 position required")
        );
    }

    #[test]
    fn test_missing_positions_counts_as_zero() {
        let mut body = valid();
        body.as_object_mut().unwrap().remove("numberOfPositions");
        let input: TalentRequestInput = serde_json::from_value(body).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_unsaved_echo() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let input: TalentRequestInput = serde_json::from_value(valid()).unwrap();
        let echo = serde_json::to_value(UnsavedTalentRequest::new(input, now)).unwrap();

        assert_eq!(echo["id"], format!("demo_{}", now.timestamp_millis()));
        assert_eq!(echo["status"], "pending");
        assert_eq!(echo["companyName"], "Acme Logistics");
        assert_eq!(echo["numberOfPositions"], 4);
    }
}
