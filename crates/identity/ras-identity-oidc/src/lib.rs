//! OpenID Connect client for the OAuth2 Authorization Code flow.
//!
//! This crate covers the two client-side steps of the flow against an
//! authorization server addressed as `{auth_base_url}/{environment_id}/as/...`:
//! building the browser-facing authorize URL, and exchanging the returned
//! authorization code for tokens over the back channel. The token payload is
//! handed back as opaque JSON; nothing here parses or validates tokens.

mod client;
mod config;
mod error;
mod types;


pub use client::{OidcClient, basic_authorization};
pub use config::OidcClientConfig;
pub use error::{OidcError, OidcResult, TokenErrorBody};
pub use types::CallbackQuery;
