/// Identity-provider webhook signature verification
///
/// Webhooks are delivered svix-style. Each request carries `svix-id`,
/// `svix-timestamp` and `svix-signature` headers. The signature header is a
/// space-separated list of `v1,<base64>` entries, each an HMAC-SHA256 over
/// `"{id}.{timestamp}.{body}"` keyed with the base64 secret that follows the
/// `whsec_` prefix. A delivery is accepted when any entry matches and the
/// timestamp is within [`TIMESTAMP_TOLERANCE_SECS`] of now.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SECRET_PREFIX: &str = "whsec_";
pub const TIMESTAMP_TOLERANCE_SECS: i64 = 5 * 60;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("Missing svix headers")]
    MissingHeaders,

    #[error("Webhook secret is not valid base64")]
    InvalidSecret,

    #[error("Invalid webhook timestamp")]
    InvalidTimestamp,

    #[error("Webhook timestamp outside tolerance")]
    TimestampOutOfTolerance,

    #[error("No matching signature found")]
    InvalidSignature,

    #[error("Invalid webhook payload: {0}")]
    InvalidPayload(String),
}

/// The three svix headers of a delivery
#[derive(Debug, Clone, Copy)]
pub struct WebhookHeaders<'a> {
    pub id: &'a str,
    pub timestamp: &'a str,
    pub signature: &'a str,
}

impl<'a> WebhookHeaders<'a> {
    /// Reads the svix headers, failing if any is absent or empty
    pub fn from_headers(headers: &'a axum::http::HeaderMap) -> Result<Self, WebhookError> {
        let get = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .ok_or(WebhookError::MissingHeaders)
        };

        Ok(Self {
            id: get("svix-id")?,
            timestamp: get("svix-timestamp")?,
            signature: get("svix-signature")?,
        })
    }
}

/// A verified event
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,

    #[serde(default)]
    pub data: serde_json::Value,
}

impl WebhookEvent {
    /// `data.id`, the user id for `user.*` events
    pub fn subject_id(&self) -> Option<&str> {
        self.data.get("id").and_then(|v| v.as_str())
    }

    /// First entry of `data.email_addresses`
    pub fn primary_email(&self) -> Option<&str> {
        self.data
            .get("email_addresses")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("email_address"))
            .and_then(|v| v.as_str())
    }
}

#[derive(Clone)]
pub struct WebhookVerifier {
    key: Vec<u8>,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier").finish_non_exhaustive()
    }
}

impl WebhookVerifier {
    /// Builds a verifier from a `whsec_<base64>` secret (the prefix is optional)
    pub fn new(secret: &str) -> Result<Self, WebhookError> {
        let encoded = secret.strip_prefix(SECRET_PREFIX).unwrap_or(secret);
        let key = STANDARD
            .decode(encoded)
            .map_err(|_| WebhookError::InvalidSecret)?;
        Ok(Self { key })
    }

    /// Verifies a delivery against the current time and parses the event
    pub fn verify(
        &self,
        headers: &WebhookHeaders<'_>,
        body: &[u8],
    ) -> Result<WebhookEvent, WebhookError> {
        self.verify_at(headers, body, Utc::now().timestamp())
    }

    /// Verifies a delivery as of `now` (Unix seconds)
    pub fn verify_at(
        &self,
        headers: &WebhookHeaders<'_>,
        body: &[u8],
        now: i64,
    ) -> Result<WebhookEvent, WebhookError> {
        let timestamp: i64 = headers
            .timestamp
            .trim()
            .parse()
            .map_err(|_| WebhookError::InvalidTimestamp)?;

        let skew = now
            .checked_sub(timestamp)
            .map(i64::unsigned_abs)
            .ok_or(WebhookError::TimestampOutOfTolerance)?;
        if skew > TIMESTAMP_TOLERANCE_SECS.unsigned_abs() {
            return Err(WebhookError::TimestampOutOfTolerance);
        }

        let matched = headers
            .signature
            .split_whitespace()
            .filter_map(|entry| entry.split_once(','))
            .filter(|(version, _)| *version == "v1")
            .filter_map(|(_, sig)| STANDARD.decode(sig).ok())
            .any(|sig| {
                self.mac(headers.id, timestamp, body)
                    .map(|mac| mac.verify_slice(&sig).is_ok())
                    .unwrap_or(false)
            });

        if !matched {
            return Err(WebhookError::InvalidSignature);
        }

        serde_json::from_slice(body).map_err(|e| WebhookError::InvalidPayload(e.to_string()))
    }

    /// Produces a `v1,<base64>` signature entry for a delivery
    pub fn sign(&self, msg_id: &str, timestamp: i64, body: &[u8]) -> Result<String, WebhookError> {
        let mac = self.mac(msg_id, timestamp, body)?;
        Ok(format!("v1,{}", STANDARD.encode(mac.finalize().into_bytes())))
    }

    fn mac(&self, msg_id: &str, timestamp: i64, body: &[u8]) -> Result<HmacSha256, WebhookError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).map_err(|_| WebhookError::InvalidSecret)?;
        mac.update(format!("{}.{}.", msg_id, timestamp).as_bytes());
        mac.update(body);
        Ok(mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // base64("test-webhook-key")
    const SECRET: &str = "whsec_dGVzdC13ZWJob29rLWtleQ==";
    const BODY: &[u8] = br#"{"type":"user.created","data":{"id":"user_1","email_addresses":[{"email_address":"a@b.co"}]}}"#;

    fn headers<'a>(ts: &'a str, sig: &'a str) -> WebhookHeaders<'a> {
        WebhookHeaders {
            id: "msg_1",
            timestamp: ts,
            signature: sig,
        }
    }

    #[test]
    fn test_valid_signature() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let now = 1_700_000_000;
        let sig = verifier.sign("msg_1", now, BODY).unwrap();

        let event = verifier
            .verify_at(&headers("1700000000", &sig), BODY, now + 10)
            .unwrap();
        assert_eq!(event.event_type, "user.created");
        assert_eq!(event.subject_id(), Some("user_1"));
        assert_eq!(event.primary_email(), Some("a@b.co"));
    }

    #[test]
    fn test_any_listed_signature_matches() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let now = 1_700_000_000;
        let good = verifier.sign("msg_1", now, BODY).unwrap();
        let list = format!("v1,AAAA {}", good);

        assert!(verifier.verify_at(&headers("1700000000", &list), BODY, now).is_ok());
    }

    #[test]
    fn test_tampered_body_rejected() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let now = 1_700_000_000;
        let sig = verifier.sign("msg_1", now, BODY).unwrap();

        let result = verifier.verify_at(&headers("1700000000", &sig), b"{\"type\":\"user.deleted\"}", now);
        assert_eq!(result.unwrap_err(), WebhookError::InvalidSignature);
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let then = 1_700_000_000;
        let sig = verifier.sign("msg_1", then, BODY).unwrap();

        let result = verifier.verify_at(&headers("1700000000", &sig), BODY, then + TIMESTAMP_TOLERANCE_SECS + 1);
        assert_eq!(result.unwrap_err(), WebhookError::TimestampOutOfTolerance);
    }

    #[test]
    fn test_extreme_timestamp_rejected() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let min = i64::MIN.to_string();
        let max = i64::MAX.to_string();

        let result = verifier.verify_at(&headers(&min, "v1,AAAA"), BODY, 1_700_000_000);
        assert_eq!(result.unwrap_err(), WebhookError::TimestampOutOfTolerance);

        let result = verifier.verify_at(&headers(&max, "v1,AAAA"), BODY, -1_700_000_000);
        assert_eq!(result.unwrap_err(), WebhookError::TimestampOutOfTolerance);
    }

    #[test]
    fn test_bad_timestamp() {
        let verifier = WebhookVerifier::new(SECRET).unwrap();
        let result = verifier.verify_at(&headers("yesterday", "v1,AAAA"), BODY, 0);
        assert_eq!(result.unwrap_err(), WebhookError::InvalidTimestamp);
    }

    #[test]
    fn test_invalid_secret() {
        assert_eq!(
            WebhookVerifier::new("whsec_***not base64***").unwrap_err(),
            WebhookError::InvalidSecret
        );
    }

    #[test]
    fn test_headers_required() {
        let mut map = axum::http::HeaderMap::new();
        map.insert("svix-id", "msg_1".parse().unwrap());
        map.insert("svix-timestamp", "1700000000".parse().unwrap());
        assert_eq!(
            WebhookHeaders::from_headers(&map).unwrap_err(),
            WebhookError::MissingHeaders
        );

        map.insert("svix-signature", "v1,AAAA".parse().unwrap());
        assert!(WebhookHeaders::from_headers(&map).is_ok());
    }
}
