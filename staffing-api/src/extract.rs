/// Request extractors

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::{ApiError, ValidationErrorDetail};

/// JSON body that has passed its `Validate` rules
///
/// Place it last in a handler's arguments so the caller's identity is
/// checked before the body is read.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate()?;
        Ok(Self(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(e) => ApiError::Validation(vec![ValidationErrorDetail {
            field: "body".to_string(),
            message: e.body_text(),
        }]),
        other => ApiError::BadRequest(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::header};
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Contact {
        #[validate(length(min = 2))]
        name: String,
    }

    fn request(body: &str) -> Request {
        Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_valid_body() {
        let ValidatedJson(contact) = ValidatedJson::<Contact>::from_request(request(r#"{"name":"Ada"}"#), &())
            .await
            .unwrap();
        assert_eq!(contact.name, "Ada");
    }

    #[tokio::test]
    async fn test_rule_failure() {
        let err = ValidatedJson::<Contact>::from_request(request(r#"{"name":"A"}"#), &())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: name");
    }

    #[tokio::test]
    async fn test_wrong_shape_is_a_validation_failure() {
        let err = ValidatedJson::<Contact>::from_request(request(r#"{"name":42}"#), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let err = ValidatedJson::<Contact>::from_request(request("{"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
