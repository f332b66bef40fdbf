use reqwest::Method;
use serde::{Deserialize, Serialize};
use url::Url;

use super::configuration::Configuration;
use super::{Error, execute};
use crate::models;

/// Parameters for [`get_authorization_url`]. One of `provider`,
/// `organization` or `connection` selects how the user authenticates.
#[derive(Clone, Debug, Default)]
pub struct GetAuthorizationUrlParams {
    pub client_id: String,
    pub redirect_uri: String,
    /// OAuth provider, e.g. `GoogleOAuth`, `MicrosoftOAuth`, `GitHubOAuth`
    pub provider: Option<String>,
    /// Organization id; the organization's SAML/OIDC connection is used
    pub organization: Option<String>,
    pub connection: Option<String>,
    pub state: Option<String>,
    pub domain_hint: Option<String>,
    pub login_hint: Option<String>,
}

#[derive(Clone, Debug)]
pub struct GetProfileAndTokenParams {
    pub client_id: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GetAuthorizationUrlError {
    UnknownValue(serde_json::Value),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GetProfileAndTokenError {
    Status4XX(models::ApiErrorBody),
    UnknownValue(serde_json::Value),
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Builds the URL the browser is sent to in order to start an SSO login.
/// Performs no network I/O.
pub fn get_authorization_url(
    configuration: &Configuration,
    params: &GetAuthorizationUrlParams,
) -> Result<Url, Error<GetAuthorizationUrlError>> {
    let provider = non_empty(&params.provider);
    let organization = non_empty(&params.organization);
    let connection = non_empty(&params.connection);

    if provider.is_none() && organization.is_none() && connection.is_none() {
        return Err(Error::Incomplete(
            "need to specify either a 'connection', 'organization', or 'provider'".to_string(),
        ));
    }
    if params.client_id.is_empty() {
        return Err(Error::Incomplete("'client_id' is required".to_string()));
    }

    let mut url = Url::parse(&configuration.endpoint("sso/authorize"))?;
    {
        let mut query = url.query_pairs_mut();
        query.append_pair("client_id", &params.client_id);
        if let Some(connection) = connection {
            query.append_pair("connection", connection);
        }
        if let Some(organization) = organization {
            query.append_pair("organization", organization);
        }
        if let Some(provider) = provider {
            query.append_pair("provider", provider);
        }
        query.append_pair("redirect_uri", &params.redirect_uri);
        query.append_pair("response_type", "code");
        if let Some(state) = non_empty(&params.state) {
            query.append_pair("state", state);
        }
        if let Some(domain_hint) = non_empty(&params.domain_hint) {
            query.append_pair("domain_hint", domain_hint);
        }
        if let Some(login_hint) = non_empty(&params.login_hint) {
            query.append_pair("login_hint", login_hint);
        }
    }
    Ok(url)
}

/// Exchanges an authorization code for the authenticated user's profile.
/// The configured API key is sent as the client secret.
pub async fn get_profile_and_token(
    configuration: &Configuration,
    params: GetProfileAndTokenParams,
) -> Result<models::ProfileAndToken, Error<GetProfileAndTokenError>> {
    let client_secret = configuration
        .bearer_access_token
        .as_deref()
        .ok_or_else(|| {
            Error::<GetProfileAndTokenError>::Incomplete(
                "an API key is required to exchange a code".to_string(),
            )
        })?;

    let form = [
        ("client_id", params.client_id.as_str()),
        ("client_secret", client_secret),
        ("grant_type", "authorization_code"),
        ("code", params.code.as_str()),
    ];

    let req_builder = configuration.request(Method::POST, "sso/token").form(&form);
    execute(req_builder).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> GetAuthorizationUrlParams {
        GetAuthorizationUrlParams {
            client_id: "client_123".to_string(),
            redirect_uri: "http://localhost:8000/callback".to_string(),
            ..Default::default()
        }
    }

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_provider_url() {
        let config = Configuration::new();
        let url = get_authorization_url(
            &config,
            &GetAuthorizationUrlParams {
                provider: Some("GoogleOAuth".to_string()),
                state: Some("xyz".to_string()),
                ..params()
            },
        )
        .unwrap();

        assert_eq!(url.path(), "/sso/authorize");
        assert_eq!(query_value(&url, "provider").as_deref(), Some("GoogleOAuth"));
        assert_eq!(query_value(&url, "client_id").as_deref(), Some("client_123"));
        assert_eq!(query_value(&url, "response_type").as_deref(), Some("code"));
        assert_eq!(query_value(&url, "state").as_deref(), Some("xyz"));
        assert_eq!(
            query_value(&url, "redirect_uri").as_deref(),
            Some("http://localhost:8000/callback")
        );
        assert!(query_value(&url, "organization").is_none());
    }

    #[test]
    fn test_organization_url() {
        let config = Configuration::new();
        let url = get_authorization_url(
            &config,
            &GetAuthorizationUrlParams {
                organization: Some("org_123".to_string()),
                ..params()
            },
        )
        .unwrap();

        assert_eq!(query_value(&url, "organization").as_deref(), Some("org_123"));
        assert!(query_value(&url, "provider").is_none());
        assert!(query_value(&url, "state").is_none());
    }

    #[test]
    fn test_missing_selector_is_incomplete() {
        let config = Configuration::new();
        let result = get_authorization_url(
            &config,
            &GetAuthorizationUrlParams {
                organization: Some(String::new()),
                ..params()
            },
        );
        assert!(matches!(result, Err(Error::Incomplete(_))));
    }

    #[test]
    fn test_missing_client_id_is_incomplete() {
        let config = Configuration::new();
        let result = get_authorization_url(
            &config,
            &GetAuthorizationUrlParams {
                client_id: String::new(),
                provider: Some("GitHubOAuth".to_string()),
                ..params()
            },
        );
        assert!(matches!(result, Err(Error::Incomplete(_))));
    }

    #[test]
    fn test_custom_base_path() {
        let mut config = Configuration::new();
        config.base_path = "http://127.0.0.1:4010/".to_string();
        let url = get_authorization_url(
            &config,
            &GetAuthorizationUrlParams {
                provider: Some("GitHubOAuth".to_string()),
                ..params()
            },
        )
        .unwrap();
        assert!(url.as_str().starts_with("http://127.0.0.1:4010/sso/authorize?"));
    }
}
