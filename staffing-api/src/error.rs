/// Error handling for the API server
///
/// Every handler returns [`ApiResult`]. An [`ApiError`] renders as the
/// failure envelope `{"success": false, "error": "...", "details"?: [...]}`
/// with the matching status code.
///
/// Database failures never reach this type: the data source falls back to
/// demo data before a handler sees them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use staffing_shared::auth::authorization::AuthzError;
use staffing_shared::auth::middleware::AuthError;
use staffing_shared::validation::{message_for, wire_name};
use validator::{ValidationErrors, ValidationErrorsKind};

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400
    #[error("{0}")]
    BadRequest(String),

    /// 400 with per-field details
    #[error("Validation failed: {}", field_list(.0))]
    Validation(Vec<ValidationErrorDetail>),

    /// 401
    #[error("Authentication required")]
    Unauthorized,

    /// 403
    #[error("{0}")]
    Forbidden(String),

    /// 404
    #[error("{0}")]
    NotFound(String),

    /// 500; the message is logged, never returned
    #[error("Internal server error")]
    Internal(String),
}

/// One failed field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Wire name of the field, with list indices for nested entries (`experience[0].title`)
    pub field: String,

    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<ValidationErrorDetail>>,
}

fn field_list(details: &[ValidationErrorDetail]) -> String {
    let mut fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
    fields.dedup();
    fields.join(", ")
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();

        let details = match self {
            ApiError::Validation(details) => {
                tracing::debug!(fields = %field_list(&details), "Request validation failed");
                Some(details)
            }
            ApiError::Internal(message) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", message);
                None
            }
            _ => None,
        };

        let body = Json(ErrorBody {
            success: false,
            error,
            details,
        });

        (status, body).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut details = Vec::new();
        collect_details(&errors, "", &mut details);
        details.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::Validation(details)
    }
}

fn collect_details(errors: &ValidationErrors, prefix: &str, out: &mut Vec<ValidationErrorDetail>) {
    for (field, kind) in errors.errors() {
        let path = format!("{}{}", prefix, wire_name(field));
        match kind {
            ValidationErrorsKind::Field(failures) => {
                out.extend(failures.iter().map(|failure| ValidationErrorDetail {
                    field: path.clone(),
                    message: message_for(failure),
                }));
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_details(nested, &format!("{}.", path), out);
            }
            ValidationErrorsKind::List(entries) => {
                for (index, nested) in entries {
                    collect_details(nested, &format!("{}[{}].", path, index), out);
                }
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(_: AuthError) -> Self {
        ApiError::Unauthorized
    }
}

impl From<AuthzError> for ApiError {
    fn from(err: AuthzError) -> Self {
        ApiError::Forbidden(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{Validate, ValidationError};

    #[derive(Debug, Validate)]
    struct Entry {
        #[validate(length(min = 2, message = "Title is required"))]
        title: String,
    }

    #[derive(Debug, Validate)]
    struct Form {
        #[validate(length(min = 50))]
        cover_letter: String,

        #[validate(email)]
        email: String,

        #[validate(nested)]
        entries: Vec<Entry>,
    }

    #[test]
    fn test_validation_details() {
        let form = Form {
            cover_letter: "too short".to_string(),
            email: "not-an-email".to_string(),
            entries: vec![
                Entry {
                    title: "Engineer".to_string(),
                },
                Entry {
                    title: "x".to_string(),
                },
            ],
        };

        let err = ApiError::from(form.validate().unwrap_err());
        let ApiError::Validation(details) = &err else {
            panic!("expected validation error");
        };

        let fields: Vec<_> = details.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["coverLetter", "email", "entries[1].title"]);
        assert_eq!(details[0].message, "Must be at least 50 characters");
        assert_eq!(details[2].message, "Title is required");
        assert_eq!(
            err.to_string(),
            "Validation failed: coverLetter, email, entries[1].title"
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::not_found("Job not found").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::from(AuthzError::AdminRequired).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).to_string(),
            "Internal server error"
        );
    }

    #[test]
    fn test_custom_error_message() {
        let mut errors = ValidationErrors::new();
        let mut failure = ValidationError::new("invalid_enum");
        failure.message = Some("Expected one of: a, b".into());
        errors.add("location_type", failure);

        let ApiError::Validation(details) = ApiError::from(errors) else {
            panic!("expected validation error");
        };
        assert_eq!(details[0].field, "locationType");
        assert_eq!(details[0].message, "Expected one of: a, b");
    }
}
