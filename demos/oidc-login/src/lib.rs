//! OIDC Authorization Code login demo
//!
//! Two routes: `/` renders a link to the authorization server, and the
//! callback route (default `/callback`) exchanges the returned code for tokens
//! and echoes the token payload as JSON.

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

pub mod config;
mod handlers;
mod pages;

pub use handlers::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let callback_path = state.oidc.config().redirect_path.clone();

    Router::new()
        .route("/", get(handlers::index_handler))
        .route(&callback_path, get(handlers::callback_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
