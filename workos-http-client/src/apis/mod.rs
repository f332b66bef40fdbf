use std::error;
use std::fmt;

use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct ResponseContent<T> {
    pub status: reqwest::StatusCode,
    pub content: String,
    pub entity: Option<T>,
}

#[derive(Debug)]
pub enum Error<T> {
    Reqwest(reqwest::Error),
    Serde(serde_json::Error),
    Io(std::io::Error),
    Url(url::ParseError),
    /// The call was missing arguments it needs; nothing was sent.
    Incomplete(String),
    ResponseError(ResponseContent<T>),
}

impl<T> Error<T> {
    /// HTTP status of an error response, if the API answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::ResponseError(e) => Some(e.status),
            Error::Reqwest(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(reqwest::StatusCode::NOT_FOUND)
    }
}

impl<T> fmt::Display for Error<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (module, e) = match self {
            Error::Reqwest(e) => ("reqwest", e.to_string()),
            Error::Serde(e) => ("serde", e.to_string()),
            Error::Io(e) => ("IO", e.to_string()),
            Error::Url(e) => ("url", e.to_string()),
            Error::Incomplete(e) => ("arguments", e.to_string()),
            Error::ResponseError(e) => ("response", format!("status code {}", e.status)),
        };
        write!(f, "error in {}: {}", module, e)
    }
}

impl<T: fmt::Debug> error::Error for Error<T> {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(match self {
            Error::Reqwest(e) => e,
            Error::Serde(e) => e,
            Error::Io(e) => e,
            Error::Url(e) => e,
            Error::Incomplete(_) => return None,
            Error::ResponseError(_) => return None,
        })
    }
}

impl<T> From<reqwest::Error> for Error<T> {
    fn from(e: reqwest::Error) -> Self {
        Error::Reqwest(e)
    }
}

impl<T> From<serde_json::Error> for Error<T> {
    fn from(e: serde_json::Error) -> Self {
        Error::Serde(e)
    }
}

impl<T> From<std::io::Error> for Error<T> {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl<T> From<url::ParseError> for Error<T> {
    fn from(e: url::ParseError) -> Self {
        Error::Url(e)
    }
}

/// Sends `req` and decodes a 2xx body as `R`; anything else becomes a
/// [`Error::ResponseError`] carrying the raw body and, when it parses, `E`.
pub(crate) async fn execute<R, E>(req: reqwest::RequestBuilder) -> Result<R, Error<E>>
where
    R: DeserializeOwned,
    E: DeserializeOwned,
{
    let resp = req.send().await?;
    let status = resp.status();
    let content = resp.text().await?;

    if !status.is_client_error() && !status.is_server_error() {
        serde_json::from_str(&content).map_err(Error::from)
    } else {
        let entity: Option<E> = serde_json::from_str(&content).ok();
        Err(Error::ResponseError(ResponseContent {
            status,
            content,
            entity,
        }))
    }
}

pub mod configuration;
pub mod directory_sync_api;
pub mod sso_api;
