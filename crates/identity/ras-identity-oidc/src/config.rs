//! OIDC client configuration.

use crate::error::{OidcError, OidcResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Client registration and authorization server coordinates.
///
/// Every field has a serde default so the struct can be filled in layers
/// (file, then environment); call [`OidcClientConfig::validate`] once all
/// layers are applied.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OidcClientConfig {
    /// Authorization server origin, e.g. `https://auth.pingone.com`
    pub auth_base_url: String,
    /// Tenant segment placed between the base URL and `/as/...`
    pub environment_id: String,
    pub client_id: String,
    pub client_secret: String,
    /// Public origin of this application, used to derive the redirect URI
    pub app_base_url: String,
    /// Path of the callback route, appended to `app_base_url`
    pub redirect_path: String,
    /// Space separated scope string sent on the authorize request
    pub scope: String,
    pub grant_type: String,
    pub response_type: String,
    /// Whole-request timeout for the token exchange
    pub http_timeout_seconds: u64,
}

impl Default for OidcClientConfig {
    fn default() -> Self {
        Self {
            auth_base_url: String::new(),
            environment_id: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            app_base_url: String::new(),
            redirect_path: "/callback".to_string(),
            scope: "openid".to_string(),
            grant_type: "authorization_code".to_string(),
            response_type: "code".to_string(),
            http_timeout_seconds: 30,
        }
    }
}

impl fmt::Debug for OidcClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OidcClientConfig")
            .field("auth_base_url", &self.auth_base_url)
            .field("environment_id", &self.environment_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("app_base_url", &self.app_base_url)
            .field("redirect_path", &self.redirect_path)
            .field("scope", &self.scope)
            .field("grant_type", &self.grant_type)
            .field("response_type", &self.response_type)
            .field("http_timeout_seconds", &self.http_timeout_seconds)
            .finish()
    }
}

impl OidcClientConfig {
    pub fn new(
        auth_base_url: impl Into<String>,
        environment_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        app_base_url: impl Into<String>,
    ) -> Self {
        Self {
            auth_base_url: auth_base_url.into(),
            environment_id: environment_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            app_base_url: app_base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    pub fn with_redirect_path(mut self, path: impl Into<String>) -> Self {
        self.redirect_path = path.into();
        self
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }

    /// `{auth_base_url}/{environment_id}/as/authorize`
    pub fn authorize_endpoint(&self) -> OidcResult<Url> {
        self.endpoint("authorize")
    }

    /// `{auth_base_url}/{environment_id}/as/token`
    pub fn token_endpoint(&self) -> OidcResult<Url> {
        self.endpoint("token")
    }

    /// The redirect URI registered with the authorization server. Both the
    /// authorize request and the token exchange must send this exact string.
    pub fn redirect_uri(&self) -> String {
        format!(
            "{}{}",
            self.app_base_url.trim_end_matches('/'),
            self.redirect_path
        )
    }

    fn endpoint(&self, leaf: &str) -> OidcResult<Url> {
        let raw = format!(
            "{}/{}/as/{}",
            self.auth_base_url.trim_end_matches('/'),
            self.environment_id.trim_matches('/'),
            leaf
        );
        Ok(Url::parse(&raw)?)
    }

    pub fn validate(&self) -> OidcResult<()> {
        let required = [
            ("auth_base_url", &self.auth_base_url),
            ("environment_id", &self.environment_id),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("app_base_url", &self.app_base_url),
            ("scope", &self.scope),
            ("grant_type", &self.grant_type),
            ("response_type", &self.response_type),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(OidcError::ConfigError(format!("{} must not be empty", name)));
            }
        }

        check_http_url("auth_base_url", &self.auth_base_url)?;
        check_http_url("app_base_url", &self.app_base_url)?;

        if !self.redirect_path.starts_with('/') {
            return Err(OidcError::ConfigError(format!(
                "redirect_path must start with '/', got '{}'",
                self.redirect_path
            )));
        }

        // Route captures, wildcards, query and fragment have no place in a
        // fixed callback path.
        if let Some(c) = self
            .redirect_path
            .chars()
            .find(|&c| matches!(c, '{' | '}' | '*' | ':' | '?' | '#') || c.is_whitespace())
        {
            return Err(OidcError::ConfigError(format!(
                "redirect_path contains invalid character '{}': '{}'",
                c, self.redirect_path
            )));
        }

        if self.http_timeout_seconds == 0 {
            return Err(OidcError::ConfigError(
                "http_timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn check_http_url(name: &str, value: &str) -> OidcResult<()> {
    let url = Url::parse(value)
        .map_err(|e| OidcError::ConfigError(format!("{} is not a valid URL: {}", name, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(OidcError::ConfigError(format!(
            "{} must use http or https, got '{}'",
            name, other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OidcClientConfig {
        OidcClientConfig::new(
            "https://auth.pingone.com",
            "env-123",
            "client-abc",
            "s3cret",
            "http://localhost:3000",
        )
    }

    #[test]
    fn test_defaults() {
        let config = OidcClientConfig::default();
        assert_eq!(config.scope, "openid");
        assert_eq!(config.grant_type, "authorization_code");
        assert_eq!(config.response_type, "code");
        assert_eq!(config.redirect_path, "/callback");
        assert_eq!(config.http_timeout_seconds, 30);
    }

    #[test]
    fn test_endpoints() {
        let config = sample();
        assert_eq!(
            config.authorize_endpoint().unwrap().as_str(),
            "https://auth.pingone.com/env-123/as/authorize"
        );
        assert_eq!(
            config.token_endpoint().unwrap().as_str(),
            "https://auth.pingone.com/env-123/as/token"
        );
    }

    #[test]
    fn test_trailing_slashes_are_collapsed() {
        let mut config = sample();
        config.auth_base_url = "https://auth.pingone.com/".to_string();
        config.app_base_url = "http://localhost:3000/".to_string();
        assert_eq!(
            config.token_endpoint().unwrap().as_str(),
            "https://auth.pingone.com/env-123/as/token"
        );
        assert_eq!(config.redirect_uri(), "http://localhost:3000/callback");
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut config = sample();
        config.client_secret = String::new();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("client_secret"));

        let err = OidcClientConfig::default().validate().unwrap_err();
        assert!(matches!(err, OidcError::ConfigError(_)));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let mut config = sample();
        config.auth_base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.app_base_url = "ftp://localhost".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_relative_redirect_path_and_zero_timeout() {
        assert!(sample().with_redirect_path("callback").validate().is_err());
        assert!(sample().with_http_timeout(0).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_route_syntax_in_redirect_path() {
        for path in ["/{code}", "/callback/{*rest}", "/*", "/:id", "/callback?x=1", "/a b"] {
            let err = sample().with_redirect_path(path).validate().unwrap_err();
            assert!(
                err.to_string().contains("invalid character"),
                "{} was accepted",
                path
            );
        }
        assert!(sample().with_redirect_path("/auth/return").validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }
}
