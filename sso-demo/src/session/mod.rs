//! Per-request server-side sessions.
//!
//! A signed cookie carries only the session id; [`SessionData`] lives in a
//! [`SessionStore`]. Handlers take a [`Session`] extractor, mutate
//! `session.data` and call [`Session::save`].

pub mod cookie;
pub mod store;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use tower_cookies::Cookies;
use workos_http_client::models::ProfileAndToken;

use crate::context::Ctx;
use crate::error::AppError;
pub use store::SessionStore;

// ============================================================================
// Session Configuration
// ============================================================================

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,

    /// Cookie domain (e.g., ".example.com" for subdomain sharing)
    pub cookie_domain: Option<String>,

    pub secure: bool,

    pub http_only: bool,

    /// Must not be `Strict`: the identity provider redirects back to
    /// `/callback` cross-site and the cookie has to come along.
    pub same_site: SameSitePolicy,

    pub max_age_seconds: i64,

    pub cookie_signing_secret: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSitePolicy {
    Strict,
    Lax,
    None,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "sso_demo_session".to_string(),
            cookie_domain: None,
            secure: true,
            http_only: true,
            same_site: SameSitePolicy::Lax,
            max_age_seconds: 86400,
            cookie_signing_secret: String::new(),
        }
    }
}

// ============================================================================
// Session Data
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub is_logged_in: bool,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Result of the last successful code exchange
    #[serde(default)]
    pub profile: Option<ProfileAndToken>,
    /// `state` sent with the pending authorization request
    #[serde(default)]
    pub oauth_state: Option<String>,
}

impl SessionData {
    pub fn log_in(&mut self, profile: ProfileAndToken) {
        self.first_name = profile.profile.first_name.clone();
        self.last_name = profile.profile.last_name.clone();
        self.profile = Some(profile);
        self.is_logged_in = true;
        self.oauth_state = None;
    }

    pub fn clear_login(&mut self) {
        self.is_logged_in = false;
        self.first_name = None;
        self.last_name = None;
        self.profile = None;
    }
}

// ============================================================================
// Session Extractor
// ============================================================================

pub struct Session {
    id: Option<String>,
    pub data: SessionData,
    cookies: Cookies,
    store: SessionStore,
    config: SessionConfig,
}

impl Session {
    /// Resolve the session referenced by the request's cookie. A missing,
    /// forged or expired cookie yields a fresh, unsaved session.
    pub async fn load(ctx: &Ctx, cookies: Cookies) -> Result<Self, AppError> {
        let config = ctx.session_config.clone();

        let id = cookies.get(&config.cookie_name).and_then(|c| {
            match cookie::verify_and_extract_session_id(c.value(), &config.cookie_signing_secret) {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!("Ignoring session cookie: {}", e);
                    None
                }
            }
        });

        let (id, data) = match id {
            Some(id) => match ctx.sessions.load(&id).await? {
                Some(data) => (Some(id), data),
                None => {
                    tracing::debug!("Session {} not found or expired", id);
                    (None, SessionData::default())
                }
            },
            None => (None, SessionData::default()),
        };

        Ok(Self {
            id,
            data,
            cookies,
            store: ctx.sessions.clone(),
            config,
        })
    }

    /// Whether this session already exists in the store.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Persist `data`, allocating an id and issuing the cookie if needed.
    pub async fn save(&mut self) -> Result<(), AppError> {
        let id = match &self.id {
            Some(id) => id.clone(),
            None => {
                let id = cookie::generate_session_id();
                self.id = Some(id.clone());
                id
            }
        };

        self.store
            .store(&id, &self.data, self.config.max_age_seconds)
            .await?;

        let value = cookie::create_signed_cookie_value(&id, &self.config.cookie_signing_secret)?;
        self.cookies
            .add(cookie::build_session_cookie(&self.config, value));

        Ok(())
    }

    /// Drop the current id so the next [`Session::save`] issues a new one.
    /// Called when the privilege level changes (login).
    pub async fn cycle_id(&mut self) -> Result<(), AppError> {
        if let Some(old) = self.id.take() {
            self.store.remove(&old).await?;
        }
        Ok(())
    }
}

impl<S> FromRequestParts<S> for Session
where
    Ctx: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = Ctx::from_ref(state);
        let cookies = Cookies::from_request_parts(parts, state)
            .await
            .map_err(|_| {
                AppError::InternalError("Session cookies are not available".to_string())
            })?;

        Session::load(&ctx, cookies).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workos_http_client::models::Profile;

    fn profile() -> ProfileAndToken {
        ProfileAndToken {
            access_token: "token".to_string(),
            profile: Profile {
                id: "prof_1".to_string(),
                idp_id: None,
                organization_id: None,
                connection_id: None,
                connection_type: Some("GoogleOAuth".to_string()),
                email: "todd@foo-corp.com".to_string(),
                first_name: Some("Todd".to_string()),
                last_name: Some("Rundgren".to_string()),
                raw_attributes: serde_json::Value::Null,
            },
        }
    }

    #[test]
    fn test_log_in_sets_fields() {
        let mut data = SessionData {
            oauth_state: Some("state".to_string()),
            ..SessionData::default()
        };
        data.log_in(profile());

        assert!(data.is_logged_in);
        assert_eq!(data.first_name.as_deref(), Some("Todd"));
        assert_eq!(data.last_name.as_deref(), Some("Rundgren"));
        assert!(data.profile.is_some());
        assert!(data.oauth_state.is_none());
    }

    #[test]
    fn test_clear_login() {
        let mut data = SessionData::default();
        data.log_in(profile());
        data.clear_login();

        assert!(!data.is_logged_in);
        assert!(data.first_name.is_none());
        assert!(data.last_name.is_none());
        assert!(data.profile.is_none());
    }

    #[test]
    fn test_session_data_tolerates_missing_fields() {
        let data: SessionData = serde_json::from_str("{}").unwrap();
        assert!(!data.is_logged_in);
    }
}
