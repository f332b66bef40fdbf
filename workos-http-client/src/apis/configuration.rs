use url::Url;

pub const DEFAULT_BASE_PATH: &str = "https://api.workos.com";

#[derive(Debug, Clone)]
pub struct Configuration {
    pub base_path: String,
    pub user_agent: Option<String>,
    pub client: reqwest::Client,
    /// API key, sent as a bearer token and used as the SSO client secret
    pub bearer_access_token: Option<String>,
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn with_api_key(api_key: impl Into<String>) -> Configuration {
        Configuration {
            bearer_access_token: Some(api_key.into()),
            ..Default::default()
        }
    }

    /// Joins `path` onto the base path, tolerating a trailing slash on either side.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_path.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Endpoint for `path` with `segment` appended as one percent-encoded
    /// path segment, so ids containing `/`, `?` or spaces reach the API intact.
    pub(crate) fn endpoint_with_segment(
        &self,
        path: &str,
        segment: &str,
    ) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.endpoint(path))?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    pub(crate) fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> reqwest::RequestBuilder {
        self.request_url(method, self.endpoint(path))
    }

    pub(crate) fn request_url<U: reqwest::IntoUrl>(
        &self,
        method: reqwest::Method,
        url: U,
    ) -> reqwest::RequestBuilder {
        let mut req_builder = self.client.request(method, url);

        if let Some(ref user_agent) = self.user_agent {
            req_builder = req_builder.header(reqwest::header::USER_AGENT, user_agent.clone());
        }
        if let Some(ref token) = self.bearer_access_token {
            req_builder = req_builder.bearer_auth(token.to_owned());
        }
        req_builder
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            base_path: DEFAULT_BASE_PATH.to_owned(),
            user_agent: Some(concat!("workos-http-client/", env!("CARGO_PKG_VERSION")).to_owned()),
            client: reqwest::Client::new(),
            bearer_access_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_with_segment_encodes_as_path() {
        let mut config = Configuration::new();
        config.base_path = "http://localhost:9000/".to_string();

        let url = config
            .endpoint_with_segment("directories", "directory 1")
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/directories/directory%201");

        let url = config
            .endpoint_with_segment("directories", "a+b/c?d")
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/directories/a+b%2Fc%3Fd");
    }

    #[test]
    fn test_endpoint_joins_slashes() {
        let mut config = Configuration::new();
        config.base_path = "http://localhost:9000/".to_string();
        assert_eq!(
            config.endpoint("/directories"),
            "http://localhost:9000/directories"
        );
        config.base_path = "http://localhost:9000".to_string();
        assert_eq!(
            config.endpoint("directories"),
            "http://localhost:9000/directories"
        );
    }

    #[test]
    fn test_with_api_key_keeps_default_base_path() {
        let config = Configuration::with_api_key("sk_test");
        assert_eq!(config.base_path, DEFAULT_BASE_PATH);
        assert_eq!(config.bearer_access_token.as_deref(), Some("sk_test"));
    }
}
