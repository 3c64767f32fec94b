/// Success envelope shared by every endpoint
///
/// ```json
/// { "success": true, "data": {...}, "message": "...", "source": "demo" }
/// ```
///
/// Optional members are omitted when unset.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use staffing_shared::db::source::{Source, Sourced};
use staffing_shared::models::saved_job::SavedJobStats;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(skip)]
    status: StatusCode,

    success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<Source>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pagination: Option<Pagination>,

    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<SavedJobStats>,

    #[serde(skip_serializing_if = "Option::is_none")]
    application_id: Option<String>,
}

/// Offset pagination; `hasMore` only on listings that report it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

impl Pagination {
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: None,
        }
    }

    pub fn with_has_more(mut self) -> Self {
        self.has_more = Some(self.offset.saturating_add(self.limit) < self.total);
        self
    }
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK,
            success: true,
            data: Some(data),
            message: None,
            source: None,
            pagination: None,
            stats: None,
            application_id: None,
        }
    }

    /// Data tagged with where it came from
    pub fn sourced(sourced: Sourced<T>) -> Self {
        Self::ok(sourced.value).with_source(sourced.source)
    }

    pub fn created(mut self) -> Self {
        self.status = StatusCode::CREATED;
        self
    }

    pub fn with_message(mut self, message: &'static str) -> Self {
        self.message = Some(message);
        self
    }

    pub fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }

    pub fn with_stats(mut self, stats: SavedJobStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_application_id(mut self, id: impl Into<String>) -> Self {
        self.application_id = Some(id.into());
        self
    }
}

impl Envelope<()> {
    /// Success with only a message
    pub fn message(message: &'static str) -> Self {
        Self {
            data: None,
            ..Self::ok(())
        }
        .with_message(message)
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_only_set_members() {
        let envelope = Envelope::ok(vec![1, 2])
            .with_source(Source::Demo)
            .with_pagination(Pagination::new(12, 10, 0).with_has_more());

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "success": true,
                "data": [1, 2],
                "source": "demo",
                "pagination": { "total": 12, "limit": 10, "offset": 0, "hasMore": true }
            })
        );
    }

    #[test]
    fn test_has_more_saturates() {
        let pagination = Pagination::new(10, i64::MAX, 1).with_has_more();
        assert_eq!(pagination.has_more, Some(false));

        let pagination = Pagination::new(i64::MAX, 10, i64::MAX - 5).with_has_more();
        assert_eq!(pagination.has_more, Some(false));
    }

    #[test]
    fn test_message_only() {
        let envelope = Envelope::message("Notification deleted");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "success": true, "message": "Notification deleted" })
        );
    }

    #[test]
    fn test_created_status() {
        let response = Envelope::ok("x").created().into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(Envelope::ok("x").into_response().status(), StatusCode::OK);
    }

    #[test]
    fn test_has_more() {
        assert_eq!(Pagination::new(10, 5, 5).with_has_more().has_more, Some(false));
        assert_eq!(Pagination::new(10, 5, 4).with_has_more().has_more, Some(true));
    }
}
