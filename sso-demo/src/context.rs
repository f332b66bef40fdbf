use anyhow::{Context, Result};
use std::env;
use workos_http_client::apis::configuration::{Configuration, DEFAULT_BASE_PATH};

use crate::session::{SessionConfig, SessionStore};
use crate::templates::Templates;

/// Upper bound for `SESSION_MAX_AGE_SECONDS`: ten years
const MAX_SESSION_AGE_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;

/// WorkOS application parameters
#[derive(Clone, Debug)]
pub struct WorkosConfig {
    /// Secret API key; also the client secret for the SSO code exchange
    pub api_key: String,
    pub client_id: String,
    /// Organization whose SAML connection is used for `login_method=saml`
    pub organization_id: String,
    pub redirect_uri: String,
    pub api_url: String,
}

/// Typed application settings, read once at startup
#[derive(Clone, Debug)]
pub struct Settings {
    /// Application profile name (e.g., "dev", "prod")
    pub profile: String,
    pub bind_addr: String,
    pub workos: WorkosConfig,
    pub session: SessionConfig,
    /// Sessions go to Redis when set, otherwise they are kept in memory
    pub redis_url: Option<String>,
}

impl Settings {
    /// Load settings from the process environment, after reading `.env` if present
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| var(key).with_context(|| format!("{} must be set", key));

        let profile = var("PROFILE").unwrap_or_else(|| "dev".to_string());

        let organization_id = var("WORKOS_ORGANIZATION_ID").unwrap_or_else(|| {
            tracing::warn!("WORKOS_ORGANIZATION_ID not set, SAML login will be unavailable");
            String::new()
        });

        let workos = WorkosConfig {
            api_key: required("WORKOS_API_KEY")?,
            client_id: required("WORKOS_CLIENT_ID")?,
            organization_id,
            redirect_uri: var("WORKOS_REDIRECT_URI")
                .unwrap_or_else(|| "http://localhost:8000/callback".to_string()),
            api_url: var("WORKOS_API_URL").unwrap_or_else(|| DEFAULT_BASE_PATH.to_string()),
        };

        let defaults = SessionConfig::default();
        let session = SessionConfig {
            cookie_name: var("SESSION_COOKIE_NAME").unwrap_or(defaults.cookie_name),
            cookie_domain: var("SESSION_COOKIE_DOMAIN"),
            secure: match var("SESSION_COOKIE_SECURE") {
                Some(v) => parse_bool(&v).context("SESSION_COOKIE_SECURE must be true or false")?,
                None => defaults.secure,
            },
            http_only: defaults.http_only,
            same_site: defaults.same_site,
            max_age_seconds: match var("SESSION_MAX_AGE_SECONDS") {
                Some(v) => v
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .filter(|secs| (1..=MAX_SESSION_AGE_SECONDS).contains(secs))
                    .with_context(|| {
                        format!(
                            "SESSION_MAX_AGE_SECONDS must be between 1 and {}",
                            MAX_SESSION_AGE_SECONDS
                        )
                    })?,
                None => defaults.max_age_seconds,
            },
            cookie_signing_secret: required("SESSION_SECRET")?,
        };

        Ok(Self {
            profile,
            bind_addr: var("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8000".to_string()),
            workos,
            session,
            redis_url: var("REDIS_URL"),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Application context that holds shared resources
#[derive(Clone)]
pub struct Ctx {
    pub profile: String,
    /// WorkOS HTTP client configuration
    pub workos: Configuration,
    pub sso: WorkosConfig,
    pub session_config: SessionConfig,
    pub sessions: SessionStore,
    pub templates: Templates,
}

impl Ctx {
    pub async fn from_settings(settings: Settings) -> Result<Self> {
        tracing::info!("Starting application with profile: {}", settings.profile);

        let workos = init_workos_config(&settings.workos);

        let sessions = match &settings.redis_url {
            Some(redis_url) => {
                tracing::info!("Connecting to Redis session store");
                SessionStore::redis(redis_url)
                    .await
                    .context("Failed to initialize Redis session store")?
            }
            None => {
                tracing::info!("REDIS_URL not set, keeping sessions in memory");
                SessionStore::memory()
            }
        };

        let templates = Templates::new().context("Failed to register templates")?;

        Ok(Self {
            profile: settings.profile,
            workos,
            sso: settings.workos,
            session_config: settings.session,
            sessions,
            templates,
        })
    }
}

/// Initialize the WorkOS HTTP client configuration
fn init_workos_config(config: &WorkosConfig) -> Configuration {
    tracing::info!("WorkOS HTTP client configured for {}", config.api_url);

    let mut workos = Configuration::with_api_key(config.api_key.clone());
    workos.base_path = config.api_url.clone();
    workos
}
