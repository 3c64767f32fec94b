/// Common test utilities for integration tests
///
/// Builds the full router in demo mode (no database, log-only email, no
/// external feeds) with auth configured for HS256 test tokens.

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use staffing_api::app::{build_router, AppState};
use staffing_api::config::Config;
use staffing_shared::auth::session::{create_session_token, SessionClaims};
use tower::ServiceExt;

pub const SESSION_SECRET: &str = "integration-test-session-secret";

// base64("integration-webhook-key")
pub const WEBHOOK_SECRET: &str = "whsec_aW50ZWdyYXRpb24td2ViaG9vay1rZXk=";

/// Demo-mode app plus a signed-in caller
pub struct TestContext {
    pub app: Router,
    pub user_id: String,
    pub token: String,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_vars(&[])
    }

    /// Overrides (or, with an empty value, unsets) configuration variables
    pub fn with_vars(overrides: &[(&str, &str)]) -> Self {
        let config = test_config(overrides);
        let state = AppState::from_config(config).expect("test state");
        let user_id = "user_integration".to_string();
        let token = token_for(&user_id);

        Self {
            app: build_router(state),
            user_id,
            token,
        }
    }

    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Sends a request as the signed-in caller
    pub async fn send(&self, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
        self.request(method, uri, body, Some(&self.auth_header())).await
    }

    /// Sends a request with no session
    pub async fn send_anonymous(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response {
        self.request(method, uri, body, None).await
    }

    async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
        authorization: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(authorization) = authorization {
            builder = builder.header("authorization", authorization);
        }

        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.app.clone().oneshot(request).await.unwrap()
    }
}

pub fn test_config(overrides: &[(&str, &str)]) -> Config {
    let mut vars = vec![
        ("CLERK_PUBLISHABLE_KEY", "pk_test_integration"),
        ("SESSION_SECRET", SESSION_SECRET),
        ("CLERK_WEBHOOK_SECRET", WEBHOOK_SECRET),
        ("JOB_FEEDS_EXTERNAL", "false"),
        ("EMAIL_INBOX", "inbox@example.com"),
    ];
    for (key, value) in overrides {
        vars.retain(|(k, _)| k != key);
        vars.push((*key, *value));
    }

    Config::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.to_string())
    })
    .expect("test config")
}

pub fn token_for(user_id: &str) -> String {
    create_session_token(&SessionClaims::new(user_id), SESSION_SECRET).expect("test token")
}

/// Reads a JSON body
pub async fn json_body(response: Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!("Expected JSON body: {} ({})", e, String::from_utf8_lossy(&body))
    })
}

/// Asserts the status, printing the body on mismatch
pub async fn expect_status(response: Response, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let body = json_body(response).await;
    assert_eq!(status, expected, "unexpected status, body: {}", body);
    body
}
