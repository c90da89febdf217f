//! OIDC protocol types.

use serde::Deserialize;

/// Query string of the redirect back from the authorization server.
///
/// All fields are optional on the wire: a successful redirect carries `code`,
/// a refused one carries `error` and usually `error_description`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackQuery {
    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }
}
