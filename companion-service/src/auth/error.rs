use super::scopes::ScopeSet;
use service_core::error::AppError;
use thiserror::Error;

/// Path the dashboard sends the operator to when consent must be redone.
pub const LOGIN_PATH: &str = "/api/auth/login";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User not authenticated")]
    Unauthenticated,

    #[error("Missing required scopes: {missing}")]
    InsufficientScope { missing: ScopeSet },

    #[error("Authorization code exchange failed: {0}")]
    AuthExchangeFailed(String),

    #[error("OAuth client is not configured: {0}")]
    ConfigurationError(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated => AppError::Unauthorized(anyhow::anyhow!(
                "User not authenticated. Sign in via {}",
                LOGIN_PATH
            )),
            AuthError::InsufficientScope { missing } => AppError::MissingScopes {
                missing: missing.to_vec(),
                hint: format!(
                    "Please re-authenticate via {} and grant the requested permissions.",
                    LOGIN_PATH
                ),
            },
            AuthError::AuthExchangeFailed(msg) => AppError::BadRequest(anyhow::anyhow!(
                "Authorization code exchange failed: {}",
                msg
            )),
            AuthError::ConfigurationError(msg) => AppError::ConfigError(anyhow::anyhow!(msg)),
        }
    }
}
