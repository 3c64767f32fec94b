/// Caller identity for authenticated requests
///
/// The API's auth layer verifies the bearer token, resolves the caller's role
/// and inserts an [`AuthContext`] into the request extensions. Handlers take
/// `AuthContext` as an extractor; if the layer did not run (or rejected the
/// request) extraction fails with 401.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Role stored on the caller's profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Candidate,
    Employer,
    Admin,
}

impl UserRole {
    /// Parses the `profiles.role` column, defaulting to candidate
    pub fn from_profile(role: Option<&str>) -> Self {
        match role.map(str::trim) {
            Some("admin") => UserRole::Admin,
            Some("employer") => UserRole::Employer,
            _ => UserRole::Candidate,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Candidate => "candidate",
            UserRole::Employer => "employer",
            UserRole::Admin => "admin",
        }
    }
}

/// Authenticated caller
///
/// # Example
///
/// ```no_run
/// use staffing_shared::auth::middleware::AuthContext;
///
/// async fn handler(auth: AuthContext) -> String {
///     format!("Hello, {}", auth.user_id)
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Identity-provider user id
    pub user_id: String,

    /// Role resolved from the caller's profile
    pub role: UserRole,

    /// Provider session id, when the token carries one
    pub session_id: Option<String>,
}

impl AuthContext {
    pub fn new(user_id: impl Into<String>, role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            role,
            session_id: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_employer(&self) -> bool {
        self.role == UserRole::Employer
    }
}

/// Why a request could not be authenticated
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header
    #[error("Authentication required")]
    MissingCredentials,

    /// Authorization header is not `Bearer <token>`
    #[error("Expected Bearer token")]
    InvalidFormat,

    /// Token failed verification
    #[error("Invalid session: {0}")]
    InvalidToken(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "error": "Authentication required",
        }));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

/// Extracts the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .ok_or(AuthError::InvalidFormat)?;

    if token.is_empty() {
        return Err(AuthError::InvalidFormat);
    }

    Ok(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or(AuthError::MissingCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_role_from_profile() {
        assert_eq!(UserRole::from_profile(Some("admin")), UserRole::Admin);
        assert_eq!(UserRole::from_profile(Some("employer")), UserRole::Employer);
        assert_eq!(UserRole::from_profile(Some("candidate")), UserRole::Candidate);
        assert_eq!(UserRole::from_profile(Some("superuser")), UserRole::Candidate);
        assert_eq!(UserRole::from_profile(None), UserRole::Candidate);
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::Employer).unwrap(), "\"employer\"");
        assert_eq!(UserRole::Admin.as_str(), "admin");
    }

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert!(matches!(bearer_token(&headers), Err(AuthError::MissingCredentials)));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert!(matches!(bearer_token(&headers), Err(AuthError::InvalidFormat)));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(matches!(bearer_token(&headers), Err(AuthError::InvalidFormat)));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_auth_error_is_401() {
        let response = AuthError::InvalidToken("bad".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_context_roles() {
        let ctx = AuthContext::new("user_1", UserRole::Admin);
        assert!(ctx.is_admin());
        assert!(!ctx.is_employer());
        assert!(ctx.session_id.is_none());
    }
}
