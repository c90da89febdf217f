//! Authorization request builder and token exchanger.

use crate::config::OidcClientConfig;
use crate::error::{OidcError, OidcResult, TokenErrorBody};
use crate::types::CallbackQuery;
use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// `Basic` credentials header value for a confidential client.
pub fn basic_authorization(client_id: &str, client_secret: &str) -> String {
    let credentials = format!("{}:{}", client_id, client_secret);
    format!("Basic {}", STANDARD.encode(credentials))
}

/// OIDC client for one registered application.
///
/// Endpoints and the redirect URI are resolved once in [`OidcClient::new`];
/// afterwards the client is read-only and cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct OidcClient {
    http_client: Client,
    config: OidcClientConfig,
    authorize_endpoint: Url,
    token_endpoint: Url,
    redirect_uri: String,
}

impl OidcClient {
    pub fn new(config: OidcClientConfig) -> OidcResult<Self> {
        config.validate()?;

        let authorize_endpoint = config.authorize_endpoint()?;
        let token_endpoint = config.token_endpoint()?;
        let redirect_uri = config.redirect_uri();

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_seconds))
            .build()?;

        Ok(Self {
            http_client,
            config,
            authorize_endpoint,
            token_endpoint,
            redirect_uri,
        })
    }

    pub fn config(&self) -> &OidcClientConfig {
        &self.config
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    /// Build the URL the user agent is sent to in order to authenticate.
    pub fn authorization_url(&self) -> Url {
        let mut url = self.authorize_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("client_id", &self.config.client_id)
            .append_pair("scope", &self.config.scope)
            .append_pair("response_type", &self.config.response_type);

        debug!(
            "Generated authorization URL for environment {}",
            self.config.environment_id
        );
        url
    }

    /// Handle the redirect back from the authorization server and exchange
    /// its code for tokens.
    pub async fn handle_callback(&self, query: CallbackQuery) -> OidcResult<serde_json::Value> {
        if let Some(error) = query.error {
            warn!(
                "Authorization server returned an error: {}: {}",
                error,
                query.error_description.as_deref().unwrap_or("No description")
            );
            return Err(OidcError::AuthorizationDenied {
                error,
                description: query.error_description,
            });
        }

        let Some(code) = query.code.filter(|code| !code.is_empty()) else {
            warn!("Callback received without an authorization code");
            return Err(OidcError::MissingAuthorizationCode);
        };

        self.exchange_code(&code).await
    }

    /// Exchange an authorization code for the token payload.
    ///
    /// The payload is returned as the authorization server sent it.
    pub async fn exchange_code(&self, code: &str) -> OidcResult<serde_json::Value> {
        let params = [
            ("grant_type", self.config.grant_type.as_str()),
            ("code", code),
            ("redirect_uri", self.redirect_uri.as_str()),
        ];

        let response = self
            .http_client
            .post(self.token_endpoint.clone())
            .header(
                AUTHORIZATION,
                basic_authorization(&self.config.client_id, &self.config.client_secret),
            )
            .header(ACCEPT, "application/json")
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Token request to {} failed: {}", self.token_endpoint, e);
                OidcError::HttpError(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("Failed to read token response body: {}", e);
            OidcError::HttpError(e)
        })?;

        if !status.is_success() {
            error!("Token exchange failed with status {}: {}", status, body);
            return Err(OidcError::TokenEndpointError {
                status,
                body: TokenErrorBody::from_text(body),
            });
        }

        let payload: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| OidcError::InvalidTokenResponse(e.to_string()))?;

        info!("Successfully exchanged authorization code for tokens");
        Ok(payload)
    }
}
