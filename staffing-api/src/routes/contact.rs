/// Public contact form
///
/// `POST /api/contact` - Validates the submission and forwards it to the site
/// inbox. Nothing is stored.

use axum::extract::State;
use serde::Deserialize;
use staffing_shared::email::templates;
use staffing_shared::validation::contact_type;
use validator::Validate;

use crate::app::AppState;
use crate::envelope::Envelope;
use crate::error::ApiResult;
use crate::extract::ValidatedJson;

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactInput {
    #[serde(default)]
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    #[validate(length(min = 5, message = "Subject must be at least 5 characters"))]
    pub subject: String,

    #[serde(default)]
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,

    #[serde(default)]
    #[validate(custom(function = "contact_type"))]
    pub r#type: Option<String>,
}

pub async fn submit_contact(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ContactInput>,
) -> ApiResult<Envelope<()>> {
    tracing::info!(
        email = %input.email,
        kind = input.r#type.as_deref().unwrap_or("general"),
        company = input.company.as_deref().unwrap_or(""),
        "Contact form submitted"
    );

    state.send_email(
        templates::contact_form(
            &input.name,
            &input.email,
            input.phone.as_deref().unwrap_or(""),
            &input.subject,
            &input.message,
        )
        .to(&state.config.email.inbox),
    );

    Ok(Envelope::message("Message sent successfully"))
}
