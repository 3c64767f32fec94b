/// Job applications
///
/// Created on submission with status `pending`. Status changes are free-form:
/// any non-empty string is stored as given.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::validation::{one_of, url_or_empty, REVIEW_STATUSES};

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_INTERVIEWING: &str = "interviewing";

pub const MAX_RATING: i16 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Uuid,
    pub job_id: String,
    pub candidate_id: String,
    pub status: String,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub answers: Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInput {
    #[serde(default)]
    #[validate(length(min = 1, message = "Job ID is required"))]
    pub job_id: String,

    #[serde(default)]
    #[validate(length(min = 2))]
    pub first_name: String,

    #[serde(default)]
    #[validate(length(min = 2))]
    pub last_name: String,

    #[serde(default)]
    #[validate(email)]
    pub email: String,

    #[serde(default)]
    #[validate(length(min = 10))]
    pub phone: String,

    #[serde(default)]
    #[validate(custom(function = "url_or_empty"))]
    pub linkedin: String,

    #[serde(default)]
    #[validate(custom(function = "url_or_empty"))]
    pub portfolio: String,

    #[serde(default)]
    #[validate(length(min = 2))]
    pub current_title: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub years_experience: String,

    #[serde(default)]
    #[validate(length(min = 50))]
    pub cover_letter: String,

    #[serde(default)]
    #[validate(length(min = 20))]
    pub why_interested: String,

    #[serde(default)]
    pub salary: String,

    #[serde(default)]
    #[validate(length(min = 1))]
    pub start_date: String,

    #[serde(default)]
    pub referral: String,

    #[serde(default)]
    pub resume_url: String,
}

/// Form answers kept alongside the application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAnswers {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub portfolio: String,
    pub current_title: String,
    pub years_experience: String,
    pub why_interested: String,
    pub salary: String,
    pub start_date: String,
    pub referral: String,
}

impl From<&ApplicationInput> for ApplicationAnswers {
    fn from(input: &ApplicationInput) -> Self {
        Self {
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            linkedin: input.linkedin.clone(),
            portfolio: input.portfolio.clone(),
            current_title: input.current_title.clone(),
            years_experience: input.years_experience.clone(),
            why_interested: input.why_interested.clone(),
            salary: input.salary.clone(),
            start_date: input.start_date.clone(),
            referral: input.referral.clone(),
        }
    }
}

/// Title, company and location of the applied-for job
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobBrief {
    pub title: String,
    pub company: String,
    pub location: String,
}

/// An application in the candidate's list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub id: String,
    pub job_id: String,
    pub status: String,
    pub created_at: String,
    pub job: Option<JobBrief>,
}

/// Application joined with its job (when the job id names a stored job)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApplicationWithJob {
    pub id: Uuid,
    pub job_id: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub job_title: Option<String>,
    pub job_company: Option<String>,
    pub job_location: Option<String>,
}

impl From<ApplicationWithJob> for ApplicationSummary {
    fn from(row: ApplicationWithJob) -> Self {
        let job = row.job_title.map(|title| JobBrief {
            title,
            company: row.job_company.unwrap_or_default(),
            location: row.job_location.unwrap_or_default(),
        });

        Self {
            id: row.id.to_string(),
            job_id: row.job_id,
            status: row.status,
            created_at: row.created_at.to_rfc3339(),
            job,
        }
    }
}

/// Employer review of one application; absent fields keep their stored value
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationReview {
    #[serde(default)]
    pub application_id: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub rating: Option<i16>,

    #[serde(default)]
    pub notes: Option<String>,
}

impl Validate for ApplicationReview {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(status) = &self.status {
            if let Err(e) = one_of(status, REVIEW_STATUSES) {
                errors.add("status", e);
            }
        }

        if let Some(rating) = self.rating {
            if !(0..=MAX_RATING).contains(&rating) {
                let mut err = ValidationError::new("range");
                err.message = Some("Rating must be between 0 and 5".into());
                errors.add("rating", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Candidate details shown to the reviewing employer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateCard {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub current_title: String,
    pub experience: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobCard {
    pub id: String,
    pub title: String,
    pub department: String,
}

/// An application to one of the employer's jobs
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerApplication {
    pub id: String,
    pub candidate: CandidateCard,
    pub job: JobCard,
    pub applied_at: String,
    pub status: String,
    pub rating: i16,
    pub notes: String,
    pub cover_letter: String,
    pub resume_url: String,
}

/// Count per review status; stored `pending` counts as `new`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReviewStats {
    pub total: usize,
    pub new: usize,
    pub reviewing: usize,
    pub shortlisted: usize,
    pub interviewed: usize,
    pub offered: usize,
    pub hired: usize,
    pub rejected: usize,
}

impl ReviewStats {
    pub fn tally(applications: &[EmployerApplication]) -> Self {
        let mut stats = Self {
            total: applications.len(),
            ..Self::default()
        };

        for application in applications {
            match application.status.as_str() {
                "new" | STATUS_PENDING => stats.new += 1,
                "reviewing" => stats.reviewing += 1,
                "shortlisted" => stats.shortlisted += 1,
                "interviewed" | STATUS_INTERVIEWING => stats.interviewed += 1,
                "offered" => stats.offered += 1,
                "hired" => stats.hired += 1,
                "rejected" => stats.rejected += 1,
                _ => {}
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployerApplications {
    pub applications: Vec<EmployerApplication>,
    pub stats: ReviewStats,
}

impl From<Vec<EmployerApplication>> for EmployerApplications {
    fn from(applications: Vec<EmployerApplication>) -> Self {
        let stats = ReviewStats::tally(&applications);
        Self {
            applications,
            stats,
        }
    }
}

/// Application joined with the employer's job it was made to
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployerApplicationRow {
    pub id: Uuid,
    pub job_id: String,
    pub status: String,
    pub rating: i16,
    pub notes: String,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    pub answers: Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub job_title: String,
    pub job_department: Option<String>,
}

impl From<EmployerApplicationRow> for EmployerApplication {
    fn from(row: EmployerApplicationRow) -> Self {
        let answer = |key: &str| {
            row.answers
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let name = [answer("firstName"), answer("lastName")]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ");

        let candidate = CandidateCard {
            name: if name.is_empty() { "Unknown".to_string() } else { name },
            email: answer("email").unwrap_or_default(),
            phone: answer("phone").unwrap_or_default(),
            current_title: answer("currentTitle").unwrap_or_else(|| "Unknown".to_string()),
            experience: format!("{} years", answer("yearsExperience").unwrap_or_else(|| "0".to_string())),
            linkedin: answer("linkedin"),
            portfolio: answer("portfolio"),
        };

        Self {
            id: row.id.to_string(),
            candidate,
            job: JobCard {
                id: row.job_id,
                title: row.job_title,
                department: row.job_department.unwrap_or_else(|| "General".to_string()),
            },
            applied_at: row.created_at.to_rfc3339(),
            status: row.status,
            rating: row.rating,
            notes: row.notes,
            cover_letter: row.cover_letter.unwrap_or_default(),
            resume_url: row.resume_url.unwrap_or_default(),
        }
    }
}

/// Who may review an application: the employer of the job it was made to
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct ReviewTarget {
    pub id: Uuid,
    pub status: String,

    /// `None` when the job is not a stored posting
    pub employer_id: Option<String>,
}

impl Application {
    /// Stores a submission as `pending`
    pub async fn create(
        pool: &PgPool,
        candidate_id: &str,
        data: &ApplicationInput,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (job_id, candidate_id, status, cover_letter, resume_url, answers)
            VALUES ($1, $2, $3, $4, NULLIF($5, ''), $6)
            RETURNING id, job_id, candidate_id, status, cover_letter, resume_url, answers,
                      created_at, updated_at
            "#,
        )
        .bind(&data.job_id)
        .bind(candidate_id)
        .bind(STATUS_PENDING)
        .bind(&data.cover_letter)
        .bind(&data.resume_url)
        .bind(Json(ApplicationAnswers::from(data)))
        .fetch_one(pool)
        .await
    }

    /// The candidate's applications, newest first, with job details when known
    pub async fn list_for_candidate(
        pool: &PgPool,
        candidate_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<ApplicationWithJob>, sqlx::Error> {
        sqlx::query_as::<_, ApplicationWithJob>(
            r#"
            SELECT a.id, a.job_id, a.status, a.created_at,
                   j.title AS job_title, j.company AS job_company, j.location AS job_location
            FROM applications a
            LEFT JOIN jobs j ON j.id::text = a.job_id
            WHERE a.candidate_id = $1
            ORDER BY a.created_at DESC
            LIMIT $2
            "#,
        )
        .bind(candidate_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Sets the status, returning the updated row or `None` if no such application
    pub async fn update_status(
        pool: &PgPool,
        id: Uuid,
        status: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, job_id, candidate_id, status, cover_letter, resume_url, answers,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
    }

    /// Applications to jobs posted by `employer_id`, newest first
    pub async fn list_for_employer(
        pool: &PgPool,
        employer_id: &str,
        job_id: Option<&str>,
    ) -> Result<Vec<EmployerApplicationRow>, sqlx::Error> {
        sqlx::query_as::<_, EmployerApplicationRow>(
            r#"
            SELECT a.id, a.job_id, a.status, a.rating, a.notes, a.cover_letter, a.resume_url,
                   a.answers, a.created_at,
                   j.title AS job_title, j.department AS job_department
            FROM applications a
            JOIN jobs j ON j.id::text = a.job_id
            WHERE j.employer_id = $1
              AND ($2::text IS NULL OR a.job_id = $2)
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(employer_id)
        .bind(job_id)
        .fetch_all(pool)
        .await
    }

    /// The application and the employer of its job, or `None` if no such application
    pub async fn review_target(pool: &PgPool, id: Uuid) -> Result<Option<ReviewTarget>, sqlx::Error> {
        sqlx::query_as::<_, ReviewTarget>(
            r#"
            SELECT a.id, a.status, j.employer_id
            FROM applications a
            LEFT JOIN jobs j ON j.id::text = a.job_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Applies an employer review, returning the updated row
    pub async fn review(
        pool: &PgPool,
        id: Uuid,
        review: &ApplicationReview,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = COALESCE($2, status),
                rating = COALESCE($3, rating),
                notes = COALESCE($4, notes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, job_id, candidate_id, status, cover_letter, resume_url, answers,
                      created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&review.status)
        .bind(review.rating)
        .bind(&review.notes)
        .fetch_optional(pool)
        .await
    }

    pub async fn count_for_candidate(pool: &PgPool, candidate_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications WHERE candidate_id = $1")
            .bind(candidate_id)
            .fetch_one(pool)
            .await
    }

    pub async fn count_with_status(
        pool: &PgPool,
        candidate_id: &str,
        status: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM applications WHERE candidate_id = $1 AND status = $2",
        )
        .bind(candidate_id)
        .bind(status)
        .fetch_one(pool)
        .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM applications")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_form() -> serde_json::Value {
        json!({
            "jobId": "internal_1",
            "firstName": "Grace",
            "lastName": "Hopper",
            "email": "grace@example.com",
            "phone": "555-123-4567",
            "currentTitle": "Engineer",
            "yearsExperience": "10",
            "coverLetter": "I have spent a decade building compilers and would love to join.",
            "whyInterested": "The mission resonates with me.",
            "startDate": "2025-03-01"
        })
    }

    #[test]
    fn test_valid_application() {
        let input: ApplicationInput = serde_json::from_value(valid_form()).unwrap();
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_short_cover_letter() {
        let mut form = valid_form();
        form["coverLetter"] = json!("Hire me!!!");
        let input: ApplicationInput = serde_json::from_value(form).unwrap();

        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert!(fields.contains_key("cover_letter"));
    }

    #[test]
    fn test_missing_fields_fail_their_own_rules() {
        let input: ApplicationInput = serde_json::from_value(json!({})).unwrap();
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("job_id"));
        assert!(fields.contains_key("email"));
        assert!(!fields.contains_key("linkedin"));
        assert!(!fields.contains_key("salary"));
    }

    #[test]
    fn test_answers_carry_form_fields() {
        let input: ApplicationInput = serde_json::from_value(valid_form()).unwrap();
        let answers = serde_json::to_value(ApplicationAnswers::from(&input)).unwrap();
        assert_eq!(answers["currentTitle"], "Engineer");
        assert_eq!(answers["linkedin"], "");
        assert!(answers.get("coverLetter").is_none());
    }

    #[test]
    fn test_summary_from_row_without_job() {
        let row = ApplicationWithJob {
            id: Uuid::nil(),
            job_id: "remotive_42".to_string(),
            status: "pending".to_string(),
            created_at: Utc::now(),
            job_title: None,
            job_company: None,
            job_location: None,
        };
        let summary = ApplicationSummary::from(row);
        assert_eq!(summary.job, None);
        assert_eq!(summary.job_id, "remotive_42");
    }

    fn employer_row(answers: serde_json::Value) -> EmployerApplicationRow {
        EmployerApplicationRow {
            id: Uuid::nil(),
            job_id: "7f1c".to_string(),
            status: "pending".to_string(),
            rating: 0,
            notes: String::new(),
            cover_letter: None,
            resume_url: None,
            answers: Json(answers),
            created_at: Utc::now(),
            job_title: "Forklift Operator".to_string(),
            job_department: None,
        }
    }

    #[test]
    fn test_employer_application_from_answers() {
        let input: ApplicationInput = serde_json::from_value(valid_form()).unwrap();
        let answers = serde_json::to_value(ApplicationAnswers::from(&input)).unwrap();
        let application = EmployerApplication::from(employer_row(answers));

        assert_eq!(application.candidate.name, "Grace Hopper");
        assert_eq!(application.candidate.experience, "10 years");
        assert_eq!(application.candidate.linkedin, None);
        assert_eq!(application.job.department, "General");
        assert_eq!(application.cover_letter, "");
    }

    #[test]
    fn test_employer_application_without_answers() {
        let application = EmployerApplication::from(employer_row(json!({})));
        assert_eq!(application.candidate.name, "Unknown");
        assert_eq!(application.candidate.current_title, "Unknown");
        assert_eq!(application.candidate.experience, "0 years");
    }

    #[test]
    fn test_review_validation() {
        let review: ApplicationReview =
            serde_json::from_value(json!({"applicationId": "a", "status": "shortlisted", "rating": 5}))
                .unwrap();
        assert!(review.validate().is_ok());

        let review: ApplicationReview =
            serde_json::from_value(json!({"applicationId": "a", "status": "ghosted", "rating": 6}))
                .unwrap();
        let errors = review.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("status"));
        assert_eq!(
            fields["rating"][0].message.as_deref(),
            Some("Rating must be between 0 and 5")
        );

        let review: ApplicationReview = serde_json::from_value(json!({"rating": -1})).unwrap();
        assert!(review.validate().is_err());
    }

    #[test]
    fn test_review_stats_tally() {
        let mut pending = EmployerApplication::from(employer_row(json!({})));
        let mut hired = pending.clone();
        hired.status = "hired".to_string();
        let mut odd = pending.clone();
        odd.status = "archived".to_string();
        pending.status = STATUS_PENDING.to_string();

        let stats = ReviewStats::tally(&[pending, hired, odd]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.new, 1);
        assert_eq!(stats.hired, 1);
        assert_eq!(stats.rejected, 0);
    }
}
