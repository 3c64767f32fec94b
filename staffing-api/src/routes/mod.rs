/// API route handlers
///
/// One module per resource:
///
/// - `health`: Service health
/// - `jobs`: Job postings, job detail and the aggregated feed
/// - `applications`: Submitting and reviewing applications
/// - `profiles`, `companies`, `settings`: Per-user documents
/// - `notifications`: In-app notifications
/// - `saved_jobs`: Bookmarked jobs
/// - `dashboard`: Candidate dashboard
/// - `analytics`: Admin analytics
/// - `employer`: Employer postings and application review
/// - `talent_requests`: Employer staffing requests
/// - `contact`: Public contact form
/// - `webhooks`: Auth provider user events

pub mod analytics;
pub mod applications;
pub mod companies;
pub mod contact;
pub mod dashboard;
pub mod employer;
pub mod health;
pub mod jobs;
pub mod notifications;
pub mod profiles;
pub mod saved_jobs;
pub mod settings;
pub mod talent_requests;
pub mod webhooks;
