/// Database models for the staffing API
///
/// Each model is a `sqlx::FromRow` struct with associated async query
/// functions. Request schemas that feed a model (`*Input`) live beside it.
///
/// # Models
///
/// - `job`: Employer-posted jobs
/// - `application`: Job applications and their status
/// - `profile`: Candidate profiles (also carries the caller's role)
/// - `company`: Employer company profiles
/// - `settings`: Per-user account settings
/// - `notification`: In-app notifications
/// - `saved_job`: Bookmarked jobs
/// - `talent_request`: Employer staffing requests
/// - `dashboard`: Candidate dashboard view
/// - `analytics`: Admin analytics view
///
/// # Example
///
/// ```no_run
/// use staffing_shared::models::profile::Profile;
/// use sqlx::PgPool;
///
/// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
/// if let Some(profile) = Profile::find_by_user(&pool, "user_2abc").await? {
///     println!("{} {}", profile.first_name, profile.last_name);
/// }
/// # Ok(())
/// # }
/// ```

pub mod analytics;
pub mod application;
pub mod company;
pub mod dashboard;
pub mod job;
pub mod notification;
pub mod profile;
pub mod saved_job;
pub mod settings;
pub mod talent_request;
