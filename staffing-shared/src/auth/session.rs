/// Session token verification
///
/// The identity provider issues short-lived session JWTs whose `sub` claim is
/// the caller's user id (for example `user_2abc...`). Production deployments
/// verify them with the provider's RS256 public key; development and tests use
/// an HS256 shared secret.
///
/// # Example
///
/// ```no_run
/// use staffing_shared::auth::session::{create_session_token, SessionClaims, SessionVerifier};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let claims = SessionClaims::new("user_123");
/// let token = create_session_token(&claims, "dev-secret")?;
///
/// let verifier = SessionVerifier::from_secret("dev-secret");
/// let verified = verifier.verify(&token)?;
/// assert_eq!(verified.sub, "user_123");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

/// Default lifetime of tokens minted by [`create_session_token`] callers
pub const DEFAULT_SESSION_TTL_SECS: i64 = 3600;

/// Errors produced while minting or verifying session tokens
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Token creation failed
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature or claim validation failed
    #[error("Token validation failed: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token is not a well-formed JWT
    #[error("Invalid token format")]
    InvalidFormat,

    /// Verification key could not be parsed
    #[error("Invalid verification key: {0}")]
    InvalidKey(String),
}

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// User id assigned by the identity provider
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Not before (Unix timestamp)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Issuer (the provider's frontend API URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,

    /// Provider session id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

impl SessionClaims {
    /// Claims for `user_id` valid for [`DEFAULT_SESSION_TTL_SECS`]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self::with_expiration(user_id, DEFAULT_SESSION_TTL_SECS)
    }

    /// Claims for `user_id` expiring `expires_in_secs` from now (negative values produce expired claims)
    pub fn with_expiration(user_id: impl Into<String>, expires_in_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.into(),
            exp: (now + Duration::seconds(expires_in_secs)).timestamp(),
            iat: now.timestamp(),
            nbf: None,
            iss: None,
            sid: None,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// Verifies session tokens against a fixed key
#[derive(Clone)]
pub struct SessionVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for SessionVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionVerifier")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl SessionVerifier {
    /// Verifier for RS256 tokens using the provider's PEM-encoded public key
    pub fn from_rsa_pem(pem: &str) -> Result<Self, JwtError> {
        let key = DecodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| JwtError::InvalidKey(e.to_string()))?;
        Ok(Self::with_key(key, Algorithm::RS256))
    }

    /// Verifier for HS256 tokens signed with a shared secret
    pub fn from_secret(secret: &str) -> Self {
        Self::with_key(DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
    }

    fn with_key(key: DecodingKey, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation.validate_nbf = true;
        Self { key, validation }
    }

    /// Only accept tokens issued by `issuer`
    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.validation.set_issuer(&[issuer]);
        self
    }

    /// Verifies signature, expiry and required claims
    pub fn verify(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let data = decode::<SessionClaims>(token, &self.key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => JwtError::InvalidFormat,
                _ => JwtError::ValidationError(e.to_string()),
            }
        })?;

        if data.claims.sub.is_empty() {
            return Err(JwtError::ValidationError("empty subject".to_string()));
        }

        Ok(data.claims)
    }
}

/// Signs `claims` with an HS256 shared secret
pub fn create_session_token(claims: &SessionClaims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::CreateError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-session-secret";

    #[test]
    fn test_claims_new() {
        let claims = SessionClaims::new("user_abc");
        assert_eq!(claims.sub, "user_abc");
        assert!(claims.exp > claims.iat);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_create_and_verify() {
        let claims = SessionClaims::new("user_abc");
        let token = create_session_token(&claims, SECRET).unwrap();

        let verified = SessionVerifier::from_secret(SECRET).verify(&token).unwrap();
        assert_eq!(verified, claims);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_session_token(&SessionClaims::new("user_abc"), SECRET).unwrap();
        let result = SessionVerifier::from_secret("other-secret").verify(&token);
        assert!(matches!(result, Err(JwtError::ValidationError(_))));
    }

    #[test]
    fn test_expired_token() {
        let claims = SessionClaims::with_expiration("user_abc", -3600);
        assert!(claims.is_expired());

        let token = create_session_token(&claims, SECRET).unwrap();
        let result = SessionVerifier::from_secret(SECRET).verify(&token);
        assert!(matches!(result, Err(JwtError::Expired)));
    }

    #[test]
    fn test_malformed_token() {
        let result = SessionVerifier::from_secret(SECRET).verify("not-a-jwt");
        assert!(matches!(result, Err(JwtError::InvalidFormat)));
    }

    #[test]
    fn test_empty_subject_rejected() {
        let token = create_session_token(&SessionClaims::new(""), SECRET).unwrap();
        assert!(SessionVerifier::from_secret(SECRET).verify(&token).is_err());
    }

    #[test]
    fn test_issuer_enforced() {
        let mut claims = SessionClaims::new("user_abc");
        claims.iss = Some("https://clerk.other.dev".to_string());
        let token = create_session_token(&claims, SECRET).unwrap();

        let verifier = SessionVerifier::from_secret(SECRET).with_issuer("https://clerk.example.dev");
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_invalid_pem() {
        let result = SessionVerifier::from_rsa_pem("-----BEGIN PUBLIC KEY-----\nnope\n-----END PUBLIC KEY-----");
        assert!(matches!(result, Err(JwtError::InvalidKey(_))));
    }

    #[test]
    fn test_secret_verifier_uses_hs256() {
        let verifier = SessionVerifier::from_secret(SECRET);
        assert_eq!(verifier.validation.algorithms, vec![Algorithm::HS256]);
    }
}
