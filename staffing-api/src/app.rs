/// Application state and router builder
///
/// This module defines the shared application state and builds the Axum
/// router with every route and the middleware stack.
///
/// # Example
///
/// ```no_run
/// use staffing_api::{app::{build_router, AppState}, config::Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::from_config(config)?;
/// let app = build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use staffing_shared::{
    auth::{
        authorization::resolve_role,
        middleware::{bearer_token, AuthContext},
        session::SessionVerifier,
        webhook::WebhookVerifier,
    },
    db::source::DataSource,
    email::{self, Email, Mailer},
    feeds::{Aggregator, ArbeitnowFeed, JobFeed, JoinRiseFeed, RemotiveFeed},
};
use std::{sync::Arc, time::Instant};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Live database or demo data
    pub source: DataSource,

    pub config: Arc<Config>,

    /// `None` when auth is not configured; every session is then rejected
    pub sessions: Option<SessionVerifier>,

    pub webhooks: Option<WebhookVerifier>,

    pub mailer: Arc<dyn Mailer>,

    pub feeds: Arc<Aggregator>,

    pub started_at: Instant,
}

impl AppState {
    /// Builds the collaborators named by `config`
    ///
    /// Never connects to the database; the pool is lazy.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let source = DataSource::from_config(&config.database)?;
        let sessions = config.auth.session_verifier()?;
        let webhooks = config.auth.webhook_verifier()?;
        let mailer = email::from_settings(&config.email)?;

        let feeds = if config.feeds.external_enabled {
            let external: Vec<Arc<dyn JobFeed>> = vec![
                Arc::new(RemotiveFeed::new(config.feeds.remotive_url.clone())?),
                Arc::new(ArbeitnowFeed::new(config.feeds.arbeitnow_url.clone())?),
                Arc::new(JoinRiseFeed::new(config.feeds.joinrise_url.clone())?),
            ];
            Aggregator::new(external)
        } else {
            Aggregator::internal_only()
        };

        Ok(Self {
            source,
            config: Arc::new(config),
            sessions,
            webhooks,
            mailer,
            feeds: Arc::new(feeds),
            started_at: Instant::now(),
        })
    }

    /// Sends `email` in the background; failures are only logged
    pub fn send_email(&self, email: Email) {
        email::spawn_send(self.mailer.clone(), email);
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /api
/// ├── GET                 /health
/// ├── GET POST PATCH DEL  /jobs
/// ├── GET                 /jobs/feed
/// ├── GET                 /jobs/:id
/// ├── GET POST PATCH      /applications
/// ├── GET PUT             /profiles, /companies, /settings
/// ├── GET PATCH DEL       /notifications
/// ├── GET                 /dashboard
/// ├── GET                 /admin/analytics
/// ├── GET                 /employer/jobs
/// ├── GET PATCH           /employer/applications
/// ├── GET POST DEL HEAD   /saved-jobs
/// ├── GET POST            /talent-requests
/// ├── POST                /contact
/// └── POST                /webhooks/clerk
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Session (resolves the caller; handlers decide whether one is required)
/// 2. Logging (tower-http TraceLayer)
/// 3. CORS (tower-http CorsLayer)
/// 4. Security headers
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let api_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/jobs",
            get(routes::jobs::list_jobs)
                .post(routes::jobs::create_job)
                .patch(routes::jobs::update_job)
                .delete(routes::jobs::delete_job),
        )
        .route("/jobs/feed", get(routes::jobs::job_feed))
        .route("/jobs/:id", get(routes::jobs::get_job))
        .route(
            "/applications",
            get(routes::applications::list_applications)
                .post(routes::applications::submit_application)
                .patch(routes::applications::update_application_status),
        )
        .route(
            "/profiles",
            get(routes::profiles::get_profile).put(routes::profiles::put_profile),
        )
        .route(
            "/companies",
            get(routes::companies::get_company).put(routes::companies::put_company),
        )
        .route(
            "/settings",
            get(routes::settings::get_settings).put(routes::settings::put_settings),
        )
        .route(
            "/notifications",
            get(routes::notifications::list_notifications)
                .patch(routes::notifications::update_notifications)
                .delete(routes::notifications::delete_notification),
        )
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/admin/analytics", get(routes::analytics::get_analytics))
        .route("/employer/jobs", get(routes::employer::list_employer_jobs))
        .route(
            "/employer/applications",
            get(routes::employer::list_employer_applications)
                .patch(routes::employer::review_application),
        )
        .route(
            "/saved-jobs",
            get(routes::saved_jobs::list_saved_jobs)
                .post(routes::saved_jobs::save_job)
                .delete(routes::saved_jobs::remove_saved_job)
                .head(routes::saved_jobs::check_saved_job),
        )
        .route(
            "/talent-requests",
            get(routes::talent_requests::list_talent_requests)
                .post(routes::talent_requests::submit_talent_request),
        )
        .route("/contact", post(routes::contact::submit_contact))
        .route("/webhooks/clerk", post(routes::webhooks::clerk_webhook))
        .fallback(|| async { ApiError::not_found("Not found") })
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_layer,
        ));

    let cors = if state.config.api.cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::HEAD,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .expose_headers([
                HeaderName::from_static("x-saved"),
                HeaderName::from_static("x-saved-id"),
            ])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Session layer
///
/// Verifies the bearer token when one is present and injects the caller's
/// `AuthContext` into request extensions. Never rejects: protected handlers
/// take `AuthContext` and answer 401 when it is missing.
async fn session_layer(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(verifier) = state.sessions.as_ref() {
        if let Ok(token) = bearer_token(req.headers()) {
            match verifier.verify(token) {
                Ok(claims) => {
                    let role = resolve_role(&state.source, &claims.sub).await;
                    req.extensions_mut().insert(AuthContext {
                        user_id: claims.sub,
                        role,
                        session_id: claims.sid,
                    });
                }
                Err(e) => tracing::debug!(error = %e, "Rejected session token"),
            }
        }
    }

    next.run(req).await
}
