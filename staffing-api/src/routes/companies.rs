/// Employer company profiles
///
/// # Endpoints
///
/// - `GET /api/companies` - The caller's company
/// - `PUT /api/companies` - Create or replace the caller's company

use axum::extract::State;
use staffing_shared::auth::middleware::AuthContext;
use staffing_shared::db::source::Source;
use staffing_shared::demo::fixtures;
use staffing_shared::models::company::{Company, CompanyDocument, CompanyInput};

use crate::app::AppState;
use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::extract::ValidatedJson;

/// The caller's company
///
/// Callers without a stored company get the sample company.
pub async fn get_company(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Envelope<CompanyDocument>> {
    let user_id = auth.user_id.clone();
    let sourced = state
        .source
        .with_fallback(
            "company",
            |pool| async move { Company::find_by_user(&pool, &user_id).await },
            || None,
        )
        .await;

    Ok(match sourced.value {
        Some(row) => Envelope::ok(CompanyDocument::from(row)).with_source(sourced.source),
        None => Envelope::ok(fixtures::company(&auth.user_id)).with_source(Source::Demo),
    })
}

/// Create or replace the caller's company
///
/// Last write wins. Without a database the request is echoed back under a
/// `demo_<user>` id.
pub async fn put_company(
    State(state): State<AppState>,
    auth: AuthContext,
    ValidatedJson(input): ValidatedJson<CompanyInput>,
) -> ApiResult<Envelope<CompanyDocument>> {
    if let Some(pool) = state.source.pool() {
        match Company::upsert(pool, &auth.user_id, &input).await {
            Ok(row) => {
                tracing::info!(user_id = %auth.user_id, "Company saved");
                return Ok(Envelope::ok(CompanyDocument::from(row))
                    .with_message("Company profile updated successfully")
                    .with_source(Source::Database));
            }
            Err(e) => tracing::warn!(user_id = %auth.user_id, error = %e, "Failed to save company"),
        }
    }

    Ok(Envelope::ok(CompanyDocument::unsaved(&auth.user_id, input))
        .with_message("Company profile updated successfully")
        .with_source(Source::Demo))
}
