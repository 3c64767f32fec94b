/// Configuration management for the API server
///
/// Loads configuration from environment variables (and a `.env` file when
/// present) into a typed [`Config`].
///
/// # Environment Variables
///
/// - `API_HOST` / `API_PORT`: bind address (default `0.0.0.0:8080`)
/// - `CORS_ORIGINS`: comma-separated origins, `*` for any (default `*`)
/// - `ENVIRONMENT`: `production` enables HSTS
/// - `APP_URL`: public site URL used in email links
/// - `DATABASE_URL`: PostgreSQL connection string; unset or placeholder means demo mode
/// - `DATABASE_MAX_CONNECTIONS`, `DATABASE_ACQUIRE_TIMEOUT_SECS`
/// - `CLERK_PUBLISHABLE_KEY`: `pk_...`; auth is off without it
/// - `CLERK_JWT_KEY`: PEM public key for RS256 session tokens
/// - `SESSION_SECRET`: HS256 secret, used when no PEM key is set
/// - `CLERK_ISSUER`: expected `iss` claim (optional)
/// - `CLERK_WEBHOOK_SECRET`: `whsec_...` secret for user events
/// - `RESEND_API_KEY`, `SMTP_HOST`, `SMTP_PORT`, `SMTP_USER`, `SMTP_PASSWORD`,
///   `EMAIL_FROM`, `EMAIL_INBOX`: outbound email
/// - `JOB_FEEDS_EXTERNAL`: `false` limits the feed to the built-in catalogue
/// - `REMOTIVE_API_URL`, `ARBEITNOW_API_URL`, `JOINRISE_API_URL`: overrides for the
///   external board endpoints
///
/// # Example
///
/// ```no_run
/// use staffing_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;

use anyhow::Context;
use staffing_shared::auth::session::SessionVerifier;
use staffing_shared::auth::webhook::WebhookVerifier;
use staffing_shared::db::pool::DatabaseConfig;
use staffing_shared::email::{
    EmailSettings, SmtpSettings, DEFAULT_FROM_ADDRESS, DEFAULT_SMTP_HOST, DEFAULT_SMTP_PORT,
};
use staffing_shared::email::templates::DEFAULT_APP_URL;
use staffing_shared::feeds::arbeitnow::DEFAULT_BASE_URL as ARBEITNOW_BASE_URL;
use staffing_shared::feeds::joinrise::DEFAULT_BASE_URL as JOINRISE_BASE_URL;
use staffing_shared::feeds::remotive::DEFAULT_BASE_URL as REMOTIVE_BASE_URL;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub email: EmailSettings,
    pub feeds: FeedsConfig,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,

    /// Production mode (enables HSTS)
    pub production: bool,

    /// Public site URL, without a trailing slash
    pub app_url: String,
}

/// Identity provider settings
#[derive(Debug, Clone, Default)]
pub struct AuthConfig {
    pub publishable_key: Option<String>,

    /// PEM-encoded RS256 public key
    pub jwt_public_key: Option<String>,

    /// HS256 shared secret
    pub session_secret: Option<String>,

    pub issuer: Option<String>,
    pub webhook_secret: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FeedsConfig {
    /// Whether external job boards are queried
    pub external_enabled: bool,

    pub remotive_url: String,
    pub arbeitnow_url: String,
    pub joinrise_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: vec!["*".to_string()],
            production: false,
            app_url: DEFAULT_APP_URL.to_string(),
        }
    }
}

impl Default for FeedsConfig {
    fn default() -> Self {
        Self {
            external_enabled: true,
            remotive_url: REMOTIVE_BASE_URL.to_string(),
            arbeitnow_url: ARBEITNOW_BASE_URL.to_string(),
            joinrise_url: JOINRISE_BASE_URL.to_string(),
        }
    }
}

impl AuthConfig {
    /// Whether the publishable key is present and not a template value
    pub fn is_configured(&self) -> bool {
        self.publishable_key
            .as_deref()
            .is_some_and(|key| key.starts_with("pk_") && !key.contains("placeholder"))
    }

    /// Session verifier, or `None` when auth is off
    ///
    /// A PEM key takes precedence over the shared secret.
    pub fn session_verifier(&self) -> anyhow::Result<Option<SessionVerifier>> {
        if !self.is_configured() {
            return Ok(None);
        }

        let verifier = match (&self.jwt_public_key, &self.session_secret) {
            (Some(pem), _) => SessionVerifier::from_rsa_pem(pem).context("CLERK_JWT_KEY")?,
            (None, Some(secret)) => SessionVerifier::from_secret(secret),
            (None, None) => {
                tracing::warn!("Publishable key set but no CLERK_JWT_KEY or SESSION_SECRET; sessions cannot be verified");
                return Ok(None);
            }
        };

        Ok(Some(match &self.issuer {
            Some(issuer) => verifier.with_issuer(issuer),
            None => verifier,
        }))
    }

    pub fn webhook_verifier(&self) -> anyhow::Result<Option<WebhookVerifier>> {
        self.webhook_secret
            .as_deref()
            .map(|secret| WebhookVerifier::new(secret).context("CLERK_WEBHOOK_SECRET"))
            .transpose()
    }
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric or boolean variable cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration from an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_defaults = ApiConfig::default();
        let api = ApiConfig {
            host: var("API_HOST").unwrap_or(api_defaults.host),
            port: parse(&var, "API_PORT")?.unwrap_or(api_defaults.port),
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or(api_defaults.cors_origins),
            production: var("ENVIRONMENT").is_some_and(|e| e.eq_ignore_ascii_case("production")),
            app_url: var("APP_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(api_defaults.app_url),
        };

        let db_defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: var("DATABASE_URL").unwrap_or_default(),
            max_connections: parse(&var, "DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(db_defaults.max_connections),
            acquire_timeout_seconds: parse(&var, "DATABASE_ACQUIRE_TIMEOUT_SECS")?
                .unwrap_or(db_defaults.acquire_timeout_seconds),
            ..db_defaults
        };

        let auth = AuthConfig {
            publishable_key: var("CLERK_PUBLISHABLE_KEY"),
            jwt_public_key: var("CLERK_JWT_KEY").map(|pem| pem.replace("\\n", "\n")),
            session_secret: var("SESSION_SECRET"),
            issuer: var("CLERK_ISSUER"),
            webhook_secret: var("CLERK_WEBHOOK_SECRET"),
        };

        let from_address = var("EMAIL_FROM").unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string());
        let smtp = match (var("SMTP_USER"), var("SMTP_PASSWORD")) {
            (Some(username), Some(password)) => Some(SmtpSettings {
                host: var("SMTP_HOST").unwrap_or_else(|| DEFAULT_SMTP_HOST.to_string()),
                port: parse(&var, "SMTP_PORT")?.unwrap_or(DEFAULT_SMTP_PORT),
                username,
                password,
            }),
            _ => None,
        };
        let email = EmailSettings {
            inbox: var("EMAIL_INBOX").unwrap_or_else(|| from_address.clone()),
            from_address,
            resend_api_key: var("RESEND_API_KEY"),
            smtp,
        };

        let feed_defaults = FeedsConfig::default();
        let feeds = FeedsConfig {
            external_enabled: parse(&var, "JOB_FEEDS_EXTERNAL")?
                .unwrap_or(feed_defaults.external_enabled),
            remotive_url: var("REMOTIVE_API_URL").unwrap_or(feed_defaults.remotive_url),
            arbeitnow_url: var("ARBEITNOW_API_URL").unwrap_or(feed_defaults.arbeitnow_url),
            joinrise_url: var("JOINRISE_API_URL").unwrap_or(feed_defaults.joinrise_url),
        };

        Ok(Self {
            api,
            database,
            auth,
            email,
            feeds,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse<T>(var: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    var(key)
        .map(|value| {
            value
                .parse::<T>()
                .with_context(|| format!("{} has an invalid value: {}", key, value))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use staffing_shared::email::Provider;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.api.cors_origins, vec!["*"]);
        assert!(!config.api.production);
        assert_eq!(config.api.app_url, DEFAULT_APP_URL);
        assert!(config.database.url.is_empty());
        assert!(!config.auth.is_configured());
        assert_eq!(config.email.provider(), Provider::Log);
        assert!(config.feeds.external_enabled);
        assert_eq!(config.feeds.arbeitnow_url, ARBEITNOW_BASE_URL);
        assert_eq!(config.feeds.joinrise_url, JOINRISE_BASE_URL);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "3000"),
            ("CORS_ORIGINS", "https://a.example, https://b.example"),
            ("ENVIRONMENT", "production"),
            ("APP_URL", "https://staging.example/"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("SMTP_USER", "mailer@example.com"),
            ("SMTP_PASSWORD", "hunter2"),
            ("JOB_FEEDS_EXTERNAL", "false"),
            ("JOINRISE_API_URL", "http://127.0.0.1:9/jobs"),
        ])
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:3000");
        assert_eq!(config.api.cors_origins.len(), 2);
        assert!(config.api.production);
        assert_eq!(config.api.app_url, "https://staging.example");
        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.email.provider(), Provider::Smtp);
        assert_eq!(config.email.smtp.as_ref().unwrap().port, DEFAULT_SMTP_PORT);
        assert!(!config.feeds.external_enabled);
        assert_eq!(config.feeds.joinrise_url, "http://127.0.0.1:9/jobs");
        assert_eq!(config.feeds.remotive_url, REMOTIVE_BASE_URL);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = config_from(&[("API_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("API_PORT"));
    }

    #[test]
    fn test_auth_toggle() {
        let mut auth = AuthConfig {
            session_secret: Some("test-secret".to_string()),
            ..Default::default()
        };
        assert!(auth.session_verifier().unwrap().is_none());

        auth.publishable_key = Some("pk_test_placeholder".to_string());
        assert!(!auth.is_configured());

        auth.publishable_key = Some("sk_live_abc".to_string());
        assert!(!auth.is_configured());

        auth.publishable_key = Some("pk_test_Y2xlcmsuZXhhbXBsZS5jb20k".to_string());
        assert!(auth.is_configured());
        assert!(auth.session_verifier().unwrap().is_some());

        auth.session_secret = None;
        assert!(auth.session_verifier().unwrap().is_none());
    }

    #[test]
    fn test_bad_webhook_secret_is_an_error() {
        let auth = AuthConfig {
            webhook_secret: Some("whsec_***not base64***".to_string()),
            ..Default::default()
        };
        assert!(auth.webhook_verifier().is_err());
        assert!(AuthConfig::default().webhook_verifier().unwrap().is_none());
    }
}
