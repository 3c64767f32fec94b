/// Integration tests for the staffing API
///
/// Every test drives the full router in demo mode:
/// - Caller identity and role checks
/// - Validation failures and their field details
/// - Demo data and echoes when no database is configured
/// - Webhook signatures and the health report

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use chrono::Utc;
use common::{expect_status, json_body, TestContext, WEBHOOK_SECRET};
use serde_json::json;
use staffing_api::app::AppState;
use staffing_shared::auth::session::{create_session_token, SessionClaims};
use staffing_shared::auth::webhook::WebhookVerifier;
use staffing_shared::feeds::FeedSource;
use tower::ServiceExt;

fn valid_application() -> serde_json::Value {
    json!({
        "jobId": "1",
        "firstName": "Casey",
        "lastName": "Rivera",
        "email": "casey@example.com",
        "phone": "555-010-0199",
        "currentTitle": "Warehouse Associate",
        "yearsExperience": "3-5",
        "coverLetter": "I have spent four years running inbound logistics for a regional distributor.",
        "whyInterested": "Your team's focus on safety stands out.",
        "startDate": "2024-09-01"
    })
}

fn valid_job() -> serde_json::Value {
    json!({
        "title": "Forklift Operator",
        "department": "Operations",
        "location": "Columbus, OH",
        "locationType": "onsite",
        "type": "full-time",
        "salaryMin": "40000",
        "salaryMax": "52000",
        "salaryType": "year",
        "showSalary": true,
        "experienceLevel": "entry",
        "description": "Operate sit-down and stand-up forklifts to move inbound and outbound freight safely across a busy distribution floor.",
        "requirements": "Current forklift certification and one year of warehouse experience.",
        "skills": ["Forklift", "Inventory"]
    })
}

fn valid_talent_request() -> serde_json::Value {
    json!({
        "companyName": "Acme Logistics",
        "industry": "Logistics",
        "contactName": "Pat Doe",
        "contactTitle": "HR Director",
        "email": "pat@acme.example",
        "phone": "555-010-0100",
        "positionTitle": "Picker/Packer",
        "numberOfPositions": 4,
        "employmentType": "temporary",
        "location": "Dayton, OH",
        "hiringTimeline": "Within 2 weeks",
        "jobDescription": "Seasonal pickers for a high-volume e-commerce fulfilment centre, day shift."
    })
}

fn has_field_error(body: &serde_json::Value, field: &str) -> bool {
    body["details"]
        .as_array()
        .is_some_and(|details| details.iter().any(|d| d["field"] == field))
}

/// Protected endpoints answer 401 before looking at the body
#[tokio::test]
async fn test_authentication_required() {
    let ctx = TestContext::new();

    let protected = [
        (Method::GET, "/api/applications"),
        (Method::GET, "/api/profiles"),
        (Method::GET, "/api/companies"),
        (Method::GET, "/api/settings"),
        (Method::GET, "/api/notifications"),
        (Method::GET, "/api/dashboard"),
        (Method::GET, "/api/saved-jobs"),
        (Method::GET, "/api/admin/analytics"),
        (Method::GET, "/api/talent-requests"),
    ];
    for (method, uri) in protected {
        let response = ctx.send_anonymous(method.clone(), uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
    }

    // Invalid body, still 401
    let response = ctx
        .send_anonymous(Method::POST, "/api/applications", Some(json!({"coverLetter": "too short"})))
        .await;
    let body = expect_status(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Authentication required");

    let writes = [
        (Method::PUT, "/api/settings", json!({"theme": 42})),
        (Method::PUT, "/api/profiles", json!({"email": "not-an-email"})),
        (Method::PUT, "/api/companies", json!({"website": 7})),
        (Method::PATCH, "/api/notifications", json!({"action": "explode"})),
        (Method::PATCH, "/api/applications", json!({})),
        (Method::POST, "/api/jobs", json!({"title": ""})),
        (Method::PATCH, "/api/jobs", json!({})),
        (Method::POST, "/api/saved-jobs", json!({})),
        (Method::PATCH, "/api/employer/applications", json!({})),
    ];
    for (method, uri, body) in writes {
        let response = ctx.send_anonymous(method.clone(), uri, Some(body)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{} {}", method, uri);
    }

    let deletes = [
        "/api/jobs?jobId=x",
        "/api/saved-jobs?jobId=x",
        "/api/notifications?id=x",
    ];
    for uri in deletes {
        let response = ctx.send_anonymous(Method::DELETE, uri, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "DELETE {}", uri);
    }
}

#[tokio::test]
async fn test_invalid_and_expired_tokens_rejected() {
    let ctx = TestContext::new();

    let expired = create_session_token(
        &SessionClaims::with_expiration(&ctx.user_id, -3600),
        common::SESSION_SECRET,
    )
    .unwrap();
    let forged = create_session_token(&SessionClaims::new(&ctx.user_id), "some-other-secret").unwrap();

    for token in [expired, forged, "not-a-jwt".to_string()] {
        let request = Request::builder()
            .uri("/api/dashboard")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = ctx.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

/// Without auth configured every session is rejected
#[tokio::test]
async fn test_sessions_rejected_when_auth_unconfigured() {
    let ctx = TestContext::with_vars(&[("CLERK_PUBLISHABLE_KEY", "")]);

    let response = ctx.send(Method::GET, "/api/dashboard", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// A short cover letter fails with a `coverLetter` field error
#[tokio::test]
async fn test_application_cover_letter_validation() {
    let ctx = TestContext::new();

    let mut application = valid_application();
    application["coverLetter"] = json!("Too short.");

    let response = ctx.send(Method::POST, "/api/applications", Some(application)).await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;

    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("coverLetter"));
    assert!(has_field_error(&body, "coverLetter"));
}

#[tokio::test]
async fn test_application_submitted_without_database() {
    let ctx = TestContext::new();

    let response = ctx
        .send(Method::POST, "/api/applications", Some(valid_application()))
        .await;
    let body = expect_status(response, StatusCode::CREATED).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Application submitted successfully");
    assert_eq!(body["source"], "demo");
    assert!(body["applicationId"].as_str().unwrap().starts_with("app_"));
}

#[tokio::test]
async fn test_application_status_update() {
    let ctx = TestContext::new();

    let response = ctx
        .send(Method::PATCH, "/api/applications", Some(json!({"status": "reviewing"})))
        .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "Application ID and status are required");

    let response = ctx
        .send(
            Method::PATCH,
            "/api/applications",
            Some(json!({"applicationId": "app_1", "status": "interviewing"})),
        )
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"], json!({"id": "app_1", "status": "interviewing"}));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let ctx = TestContext::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = ctx.app.clone().oneshot(request).await.unwrap();
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["success"], false);
}

/// Demo dashboard carries the fixed stats
#[tokio::test]
async fn test_dashboard_demo_stats() {
    let ctx = TestContext::new();

    let response = ctx.send(Method::GET, "/api/dashboard", None).await;
    let body = expect_status(response, StatusCode::OK).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["source"], "demo");
    assert_eq!(
        body["data"]["stats"],
        json!({"applications": 12, "savedJobs": 8, "profileViews": 47, "interviewInvites": 3})
    );
    assert!(body["data"]["recentApplications"].is_array());
    assert!(body["data"]["recommendedJobs"].is_array());
}

/// Demo listings are stable across calls
#[tokio::test]
async fn test_demo_listings_are_deterministic() {
    let ctx = TestContext::new();

    for uri in ["/api/dashboard", "/api/applications", "/api/notifications", "/api/saved-jobs"] {
        let first = json_body(ctx.send(Method::GET, uri, None).await).await;
        let second = json_body(ctx.send(Method::GET, uri, None).await).await;
        assert_eq!(first, second, "{} changed between calls", uri);
    }
}

#[tokio::test]
async fn test_notifications_actions() {
    let ctx = TestContext::new();

    let response = ctx.send(Method::GET, "/api/notifications", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    let notifications = body["data"]["notifications"].as_array().unwrap();
    let unread = notifications.iter().filter(|n| n["read"] == false).count();
    assert_eq!(body["data"]["unreadCount"], unread);

    let response = ctx
        .send(Method::PATCH, "/api/notifications", Some(json!({"action": "markAllRead"})))
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "All notifications marked as read");

    let response = ctx
        .send(
            Method::PATCH,
            "/api/notifications",
            Some(json!({"action": "markRead", "notificationId": "1"})),
        )
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Notification marked as read");

    let response = ctx
        .send(Method::PATCH, "/api/notifications", Some(json!({"action": "markRead"})))
        .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "Notification ID required");

    let response = ctx
        .send(Method::PATCH, "/api/notifications", Some(json!({"action": "archive"})))
        .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "Invalid action");

    let response = ctx.send(Method::DELETE, "/api/notifications", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx.send(Method::DELETE, "/api/notifications?id=1", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Notification deleted");
}

/// Repeating an upsert returns the same document
#[tokio::test]
async fn test_settings_upsert_is_idempotent() {
    let ctx = TestContext::new();
    let settings = json!({
        "language": "es",
        "timezone": "America/Chicago",
        "privacy": {"profileVisibility": "employers"}
    });

    let first = expect_status(
        ctx.send(Method::PUT, "/api/settings", Some(settings.clone())).await,
        StatusCode::OK,
    )
    .await;
    let second = expect_status(
        ctx.send(Method::PUT, "/api/settings", Some(settings)).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(first, second);
    assert_eq!(first["message"], "Settings updated successfully");
    assert_eq!(first["data"]["language"], "es");
    assert_eq!(first["data"]["id"], format!("demo_{}", ctx.user_id));

    let response = ctx
        .send(
            Method::PUT,
            "/api/settings",
            Some(json!({"privacy": {"profileVisibility": "everyone"}})),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_profile_round_trip_without_database() {
    let ctx = TestContext::new();

    let response = ctx.send(Method::GET, "/api/profiles", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["source"], "demo");
    assert_eq!(body["data"]["id"], format!("demo_{}", ctx.user_id));

    let profile = json!({
        "firstName": "Casey",
        "lastName": "Rivera",
        "email": "casey@example.com",
        "linkedin": "https://www.linkedin.com/in/casey"
    });
    let response = ctx.send(Method::PUT, "/api/profiles", Some(profile)).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["data"]["firstName"], "Casey");

    let response = ctx
        .send(
            Method::PUT,
            "/api/profiles",
            Some(json!({"firstName": "Casey", "lastName": "Rivera", "email": "not-an-email"})),
        )
        .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert!(has_field_error(&body, "email"));
}

#[tokio::test]
async fn test_company_defaults_without_database() {
    let ctx = TestContext::new();

    let response = ctx.send(Method::GET, "/api/companies", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["source"], "demo");
    assert_eq!(body["data"]["id"], format!("demo_{}", ctx.user_id));
}

#[tokio::test]
async fn test_jobs_list_from_catalogue() {
    let ctx = TestContext::new();

    let response = ctx.send_anonymous(Method::GET, "/api/jobs?limit=5", None).await;
    let body = expect_status(response, StatusCode::OK).await;

    assert_eq!(body["source"], "demo");
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["pagination"]["limit"], 5);
    assert_eq!(body["pagination"]["offset"], 0);
    assert_eq!(body["pagination"]["hasMore"], true);
}

#[tokio::test]
async fn test_jobs_list_clamps_paging() {
    let ctx = TestContext::new();

    let response = ctx
        .send_anonymous(Method::GET, "/api/jobs?limit=9223372036854775807&offset=1", None)
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["pagination"]["limit"], 100);
    assert_eq!(body["pagination"]["hasMore"], false);

    let response = ctx
        .send_anonymous(Method::GET, "/api/jobs?limit=0&offset=9223372036854775807", None)
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["pagination"]["limit"], 1);
    assert!(body["data"].as_array().unwrap().is_empty());
    assert_eq!(body["pagination"]["hasMore"], false);
}

#[tokio::test]
async fn test_job_create_and_validation() {
    let ctx = TestContext::new();

    let response = ctx.send(Method::POST, "/api/jobs", Some(valid_job())).await;
    let body = expect_status(response, StatusCode::CREATED).await;
    assert_eq!(body["message"], "Job posted successfully");
    assert!(body["data"]["id"].as_str().unwrap().starts_with("job_"));
    assert_eq!(body["data"]["employerId"], ctx.user_id);
    assert_eq!(body["data"]["status"], "active");

    let mut job = valid_job();
    job["locationType"] = json!("moon");
    job["description"] = json!("Too short");
    let response = ctx.send(Method::POST, "/api/jobs", Some(job)).await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert!(has_field_error(&body, "locationType"));
    assert!(has_field_error(&body, "description"));

    let response = ctx.send_anonymous(Method::POST, "/api/jobs", Some(valid_job())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_job_update_and_delete_without_database() {
    let ctx = TestContext::new();

    let response = ctx
        .send(Method::PATCH, "/api/jobs", Some(json!({"title": "Shift Lead"})))
        .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "Job ID is required");

    let response = ctx
        .send(Method::PATCH, "/api/jobs", Some(json!({"jobId": "1", "title": "Shift Lead"})))
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Job updated successfully");

    let response = ctx.send(Method::DELETE, "/api/jobs?jobId=1", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Job deleted successfully");
}

/// Ids with an underscore resolve through the feed
#[tokio::test]
async fn test_job_detail_routes_feed_ids_to_aggregator() {
    let ctx = TestContext::new();

    let response = ctx.send_anonymous(Method::GET, "/api/jobs/internal_1", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"]["id"], "internal_1");

    // External feeds are disabled, so the aggregator knows nothing about it
    let response = ctx.send_anonymous(Method::GET, "/api/jobs/remotive_1841", None).await;
    let body = expect_status(response, StatusCode::NOT_FOUND).await;
    assert_eq!(body["error"], "Job not found");

    let response = ctx.send_anonymous(Method::GET, "/api/jobs/1", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"]["id"], "1");
    assert_eq!(body["source"], "demo");
}

#[tokio::test]
async fn test_job_feed_internal_only() {
    let ctx = TestContext::new();

    let response = ctx.send_anonymous(Method::GET, "/api/jobs/feed?limit=3", None).await;
    let body = expect_status(response, StatusCode::OK).await;

    let jobs = body["data"]["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 3);
    assert!(jobs
        .iter()
        .all(|job| job["id"].as_str().unwrap().starts_with("internal_")));
    assert_eq!(body["data"]["page"], 1);
}

#[tokio::test]
async fn test_external_feeds_are_wired() {
    let state = AppState::from_config(common::test_config(&[("JOB_FEEDS_EXTERNAL", "true")])).unwrap();
    assert_eq!(
        state.feeds.sources(),
        vec![
            FeedSource::Internal,
            FeedSource::Remotive,
            FeedSource::Arbeitnow,
            FeedSource::JoinRise,
        ]
    );

    let state = AppState::from_config(common::test_config(&[])).unwrap();
    assert_eq!(state.feeds.sources(), vec![FeedSource::Internal]);
}

#[tokio::test]
async fn test_saved_jobs_without_database() {
    let ctx = TestContext::new();

    let response = ctx.send(Method::GET, "/api/saved-jobs", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    let saved = body["data"].as_array().unwrap();
    assert_eq!(body["stats"]["total"], saved.len());

    let response = ctx.send(Method::POST, "/api/saved-jobs", Some(json!({"jobId": "3"}))).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Job saved successfully");
    assert!(body["data"]["id"].as_str().unwrap().starts_with("saved_"));

    let response = ctx.send(Method::DELETE, "/api/saved-jobs", None).await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "Saved job ID or job ID is required");

    let response = ctx.send(Method::DELETE, "/api/saved-jobs?jobId=3", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Job removed from saved jobs");
}

#[tokio::test]
async fn test_saved_job_check_headers() {
    let ctx = TestContext::new();

    let response = ctx.send_anonymous(Method::HEAD, "/api/saved-jobs?jobId=3", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.headers().get("x-saved").unwrap(), "false");

    let response = ctx.send(Method::HEAD, "/api/saved-jobs", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = ctx.send(Method::HEAD, "/api/saved-jobs?jobId=3", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers().get("x-saved").unwrap(), "false");
}

#[tokio::test]
async fn test_talent_requests() {
    let ctx = TestContext::new();

    let response = ctx
        .send_anonymous(Method::POST, "/api/talent-requests", Some(valid_talent_request()))
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Talent request submitted successfully");
    assert!(body["data"]["id"].as_str().unwrap().starts_with("demo_"));
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["companyName"], "Acme Logistics");

    let mut request = valid_talent_request();
    request["numberOfPositions"] = json!(0);
    let response = ctx
        .send_anonymous(Method::POST, "/api/talent-requests", Some(request))
        .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert!(has_field_error(&body, "numberOfPositions"));

    // Every caller passes role checks in demo mode
    let response = ctx.send(Method::GET, "/api/talent-requests", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"], json!({"total": 0, "limit": 50, "offset": 0}));
}

#[tokio::test]
async fn test_admin_analytics_demo_report() {
    let ctx = TestContext::new();

    let response = ctx.send(Method::GET, "/api/admin/analytics", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["source"], "demo");
    assert!(body["data"]["overview"]["totalUsers"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_employer_jobs_demo_listing() {
    let ctx = TestContext::new();

    let response = ctx.send(Method::GET, "/api/employer/jobs", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["source"], "demo");
    assert_eq!(body["data"]["jobs"].as_array().unwrap().len(), 5);
    assert_eq!(
        body["data"]["stats"],
        json!({"total": 5, "active": 3, "paused": 1, "closed": 1, "draft": 0})
    );
    assert_eq!(body["data"]["jobs"][0]["type"], "Full-time");

    let response = ctx.send_anonymous(Method::GET, "/api/employer/jobs", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_employer_application_review() {
    let ctx = TestContext::new();

    let response = ctx.send(Method::GET, "/api/employer/applications", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["source"], "demo");
    assert_eq!(body["data"]["stats"]["total"], 5);
    assert_eq!(body["data"]["stats"]["shortlisted"], 1);

    let response = ctx
        .send(Method::GET, "/api/employer/applications?jobId=2", None)
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    let applications = body["data"]["applications"].as_array().unwrap();
    assert_eq!(applications.len(), 2);
    assert!(applications.iter().all(|a| a["job"]["id"] == "2"));
    assert_eq!(applications[0]["candidate"]["name"], "Michael Chen");
    assert_eq!(body["data"]["stats"]["total"], 2);

    let response = ctx
        .send(Method::PATCH, "/api/employer/applications", Some(json!({"status": "hired"})))
        .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "Application ID is required");

    let response = ctx
        .send(
            Method::PATCH,
            "/api/employer/applications",
            Some(json!({"applicationId": "3", "status": "ghosted", "rating": 9})),
        )
        .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert!(has_field_error(&body, "status"));
    assert!(has_field_error(&body, "rating"));

    let response = ctx
        .send(
            Method::PATCH,
            "/api/employer/applications",
            Some(json!({"applicationId": "3", "status": "offered", "rating": 5, "notes": "Send the offer"})),
        )
        .await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["message"], "Application updated successfully");
    assert_eq!(body["source"], "demo");
}

#[tokio::test]
async fn test_contact_form() {
    let ctx = TestContext::new();

    let form = json!({
        "name": "Jordan",
        "email": "jordan@example.com",
        "subject": "Hiring help",
        "message": "We need three forklift operators next month.",
        "type": "employer"
    });
    let response = ctx.send_anonymous(Method::POST, "/api/contact", Some(form)).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body, json!({"success": true, "message": "Message sent successfully"}));

    let response = ctx
        .send_anonymous(
            Method::POST,
            "/api/contact",
            Some(json!({"name": "Jordan", "email": "jordan@example.com", "subject": "Hi", "message": "Need staff now."})),
        )
        .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert!(has_field_error(&body, "subject"));
}

async fn deliver_webhook(ctx: &TestContext, body: &str, signature: Option<&str>) -> axum::response::Response {
    let timestamp = Utc::now().timestamp();
    let signature = match signature {
        Some(signature) => signature.to_string(),
        None => WebhookVerifier::new(WEBHOOK_SECRET)
            .unwrap()
            .sign("msg_1", timestamp, body.as_bytes())
            .unwrap(),
    };

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/webhooks/clerk")
        .header("svix-id", "msg_1")
        .header("svix-timestamp", timestamp.to_string())
        .header("svix-signature", signature)
        .body(Body::from(body.to_string()))
        .unwrap();

    ctx.app.clone().oneshot(request).await.unwrap()
}

#[tokio::test]
async fn test_webhook_signature_verification() {
    let ctx = TestContext::new();
    let event = r#"{"type":"user.created","data":{"id":"user_9","email_addresses":[{"email_address":"new@example.com"}]}}"#;

    let response = deliver_webhook(&ctx, event, None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body, json!({"received": true}));

    let unhandled = r#"{"type":"session.created","data":{}}"#;
    let response = deliver_webhook(&ctx, unhandled, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = deliver_webhook(&ctx, event, Some("v1,AAAA")).await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "Webhook verification failed");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/webhooks/clerk")
        .body(Body::from(event))
        .unwrap();
    let response = ctx.app.clone().oneshot(request).await.unwrap();
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["error"], "Missing svix headers");
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/webhooks/clerk")
        .header("svix-id", "msg_1")
        .header("svix-timestamp", i64::MIN.to_string())
        .header("svix-signature", "v1,AAAA")
        .body(Body::from(event))
        .unwrap();
    let response = ctx.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_report() {
    let ctx = TestContext::new();

    let response = ctx.send_anonymous(Method::GET, "/api/health", None).await;
    let body = expect_status(response, StatusCode::OK).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"], "not_configured");
    assert_eq!(body["services"]["auth"], "configured");
    assert!(body["version"].is_string());
    assert!(body["uptime"].is_u64());

    let ctx = TestContext::with_vars(&[("CLERK_PUBLISHABLE_KEY", "pk_test_placeholder")]);
    let response = ctx.send_anonymous(Method::GET, "/api/health", None).await;
    let body = expect_status(response, StatusCode::SERVICE_UNAVAILABLE).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["services"]["auth"], "not_configured");
}

#[tokio::test]
async fn test_unknown_route_and_security_headers() {
    let ctx = TestContext::new();

    let response = ctx.send_anonymous(Method::GET, "/api/nope", None).await;
    assert_eq!(response.headers().get("x-content-type-options").unwrap(), "nosniff");
    let body = expect_status(response, StatusCode::NOT_FOUND).await;
    assert_eq!(body, json!({"success": false, "error": "Not found"}));
}
