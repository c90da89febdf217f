//! Route handlers and the mapping from OIDC errors to HTTP responses.

use crate::pages;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use ras_identity_oidc::{CallbackQuery, OidcClient, OidcError, TokenErrorBody};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub oidc: Arc<OidcClient>,
}

impl AppState {
    pub fn new(oidc: OidcClient) -> Self {
        Self {
            oidc: Arc::new(oidc),
        }
    }
}

/// Handler for the root page - renders the login link
pub async fn index_handler(State(state): State<AppState>) -> Html<String> {
    let authorization_url = state.oidc.authorization_url();
    Html(pages::login_page(authorization_url.as_str()))
}

/// Handler for the redirect back from the authorization server
pub async fn callback_handler(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Result<Json<serde_json::Value>, CallbackError> {
    info!("Handling OIDC callback");
    let payload = state.oidc.handle_callback(query).await?;
    Ok(Json(payload))
}

/// Failure of the callback, rendered according to its cause.
#[derive(Debug)]
pub struct CallbackError(OidcError);

impl From<OidcError> for CallbackError {
    fn from(err: OidcError) -> Self {
        Self(err)
    }
}

impl IntoResponse for CallbackError {
    fn into_response(self) -> Response {
        match self.0 {
            OidcError::MissingAuthorizationCode => {
                (StatusCode::NOT_FOUND, Html(pages::missing_code_page())).into_response()
            }
            OidcError::AuthorizationDenied { error, description } => (
                StatusCode::BAD_REQUEST,
                Html(pages::authorization_denied_page(
                    &error,
                    description.as_deref(),
                )),
            )
                .into_response(),
            OidcError::TokenEndpointError { status, body } => match body {
                TokenErrorBody::Json(value) => (status, Json(value)).into_response(),
                TokenErrorBody::Text(text) => (status, text).into_response(),
            },
            OidcError::InvalidTokenResponse(message) => {
                error!("Token endpoint returned an unreadable payload: {}", message);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({
                        "error": "invalid_token_response",
                        "message": message,
                    })),
                )
                    .into_response()
            }
            OidcError::HttpError(err) => {
                error!("Token request failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "token_request_failed",
                        "message": err.to_string(),
                    })),
                )
                    .into_response()
            }
            other => {
                error!("OIDC callback failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": other.to_string(),
                    })),
                )
                    .into_response()
            }
        }
    }
}
