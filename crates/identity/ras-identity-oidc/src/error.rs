//! OIDC client error types.

use reqwest::StatusCode;
use thiserror::Error;

pub type OidcResult<T> = Result<T, OidcError>;

#[derive(Debug, Error)]
pub enum OidcError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("URL parsing error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Missing authorization code")]
    MissingAuthorizationCode,

    /// The authorization server redirected back with `error=...` instead of a code.
    #[error("Authorization denied: {error}")]
    AuthorizationDenied {
        error: String,
        description: Option<String>,
    },

    /// The token endpoint answered with a non-success status. `body` has
    /// already been read to completion.
    #[error("Token endpoint returned {status}")]
    TokenEndpointError { status: StatusCode, body: TokenErrorBody },

    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),
}

/// Body of a failed token response, as it came off the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenErrorBody {
    Json(serde_json::Value),
    Text(String),
}

impl TokenErrorBody {
    pub(crate) fn from_text(text: String) -> Self {
        match serde_json::from_str(&text) {
            Ok(value) => Self::Json(value),
            Err(_) => Self::Text(text),
        }
    }
}
