/// Auth provider webhooks
///
/// `POST /api/webhooks/clerk` - Signed user lifecycle events. Deliveries are
/// verified against the `svix-*` headers and logged; nothing is stored.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use staffing_shared::auth::webhook::{WebhookEvent, WebhookHeaders};

use crate::app::AppState;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

/// # Errors
///
/// - `400 Bad Request`: Missing `svix-*` headers, no configured secret, or a
///   signature that does not verify
pub async fn clerk_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<WebhookAck>> {
    let headers = WebhookHeaders::from_headers(&headers)
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let Some(verifier) = state.webhooks.as_ref() else {
        tracing::warn!("Webhook received but no signing secret is configured");
        return Err(ApiError::bad_request("Webhook verification failed"));
    };

    let event = verifier.verify(&headers, &body).map_err(|e| {
        tracing::warn!(error = %e, "Webhook verification failed");
        ApiError::bad_request("Webhook verification failed")
    })?;

    log_event(&event);

    Ok(Json(WebhookAck { received: true }))
}

fn log_event(event: &WebhookEvent) {
    let user_id = event.subject_id().unwrap_or("unknown");

    match event.event_type.as_str() {
        "user.created" => tracing::info!(
            user_id,
            email = event.primary_email().unwrap_or(""),
            "User created"
        ),
        "user.updated" => tracing::info!(user_id, "User updated"),
        "user.deleted" => tracing::info!(user_id, "User deleted"),
        other => tracing::info!(event_type = other, "Unhandled webhook event"),
    }
}
