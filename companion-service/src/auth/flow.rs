//! Three-legged OAuth against Google: consent URL, code exchange, refresh.

use super::credential::Identity;
use super::error::AuthError;
use super::scopes::ScopeSet;
use crate::config::YouTubeConfig;
use chrono::{Duration, Utc};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::Deserialize;
use service_core::error::AppError;
use std::sync::Arc;

const TOKEN_TIMEOUT_SECS: u64 = 30;

/// Where to send the operator and what to ask for. Built per login, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: ScopeSet,
}

impl AuthorizationRequest {
    /// Render the consent URL. `prompt=consent` forces the screen so a
    /// narrowed grant can be widened; `include_granted_scopes` keeps what
    /// was granted before.
    pub fn to_url(&self, auth_url: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent&include_granted_scopes=true",
            auth_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(&self.redirect_uri),
            urlencoding::encode(&self.scopes.to_string()),
        )
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: Option<i64>,
    refresh_token: Option<String>,
    scope: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    error_description: Option<String>,
}

impl TokenResponse {
    /// A refresh reply may omit `scope` and `refresh_token`; those carry
    /// over from the identity being refreshed.
    fn into_identity(self, previous: Option<&Identity>) -> Identity {
        let scopes = match (self.scope.as_deref(), previous) {
            (Some(grant), _) => ScopeSet::parse(grant),
            (None, Some(prev)) => prev.scopes().clone(),
            (None, None) => ScopeSet::new(),
        };

        let mut identity = Identity::new(self.access_token, scopes);

        if let Some(expires_in) = self.expires_in {
            identity = identity.with_expiry(Utc::now() + Duration::seconds(expires_in));
        }

        let refresh_token = self
            .refresh_token
            .or_else(|| previous.and_then(|p| p.refresh_token().map(str::to_string)));
        if let Some(token) = refresh_token {
            identity = identity.with_refresh_token(token);
        }

        identity
    }
}

#[derive(Clone)]
pub struct AuthorizationFlow {
    config: YouTubeConfig,
    client: Client,
}

impl AuthorizationFlow {
    pub fn new(config: YouTubeConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(TOKEN_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                AppError::InternalError(anyhow::anyhow!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    pub fn authorization_request(&self) -> Result<AuthorizationRequest, AuthError> {
        Ok(AuthorizationRequest {
            client_id: self.client_id()?.to_string(),
            redirect_uri: self.redirect_uri()?.to_string(),
            scopes: ScopeSet::requested(),
        })
    }

    pub fn build_login_url(&self) -> Result<String, AuthError> {
        Ok(self.authorization_request()?.to_url(&self.config.auth_url))
    }

    /// Trade an authorization code for tokens. The result is not cached.
    pub async fn exchange_code(&self, code: &str) -> Result<Identity, AuthError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(AuthError::AuthExchangeFailed(
                "Missing authorization code".to_string(),
            ));
        }

        let client_id = self.client_id()?;
        let client_secret = self.client_secret()?;
        let redirect_uri = self.redirect_uri()?;

        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", redirect_uri),
        ];

        let token = self.request_token(&form).await?;
        Ok(token.into_identity(None))
    }

    pub async fn refresh(&self, identity: &Identity) -> Result<Identity, AuthError> {
        let refresh_token = identity.refresh_token().ok_or(AuthError::Unauthenticated)?;

        let form = [
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", self.client_id()?),
            ("client_secret", self.client_secret()?),
        ];

        let token = self.request_token(&form).await?;
        tracing::info!("Refreshed YouTube access token");
        Ok(token.into_identity(Some(identity)))
    }

    /// Hand back a usable identity, refreshing it first if it has expired.
    /// The flag is true when a refresh happened and the caller should re-cache.
    pub async fn ensure_fresh(
        &self,
        identity: Arc<Identity>,
    ) -> Result<(Arc<Identity>, bool), AuthError> {
        if !identity.is_expired() {
            return Ok((identity, false));
        }
        let refreshed = self.refresh(&identity).await?;
        Ok((Arc::new(refreshed), true))
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> Result<TokenResponse, AuthError> {
        let response = self
            .client
            .post(&self.config.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to reach Google token endpoint");
                AuthError::AuthExchangeFailed(format!("token endpoint unreachable: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => match err.error_description {
                    Some(description) => format!("{}: {}", err.error, description),
                    None => err.error,
                },
                Err(_) => format!("token endpoint returned {}", status),
            };
            tracing::error!(status = %status, reason = %reason, "Google token exchange error");
            return Err(AuthError::AuthExchangeFailed(reason));
        }

        response.json::<TokenResponse>().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Google token response");
            AuthError::AuthExchangeFailed("malformed token response".to_string())
        })
    }

    fn client_id(&self) -> Result<&str, AuthError> {
        self.config
            .client_id
            .as_deref()
            .ok_or_else(|| AuthError::ConfigurationError("YOUTUBE_CLIENT_ID is not set".to_string()))
    }

    fn client_secret(&self) -> Result<&str, AuthError> {
        self.config
            .client_secret
            .as_ref()
            .map(|s| s.expose_secret().as_str())
            .ok_or_else(|| {
                AuthError::ConfigurationError("YOUTUBE_CLIENT_SECRET is not set".to_string())
            })
    }

    fn redirect_uri(&self) -> Result<&str, AuthError> {
        self.config.redirect_uri.as_deref().ok_or_else(|| {
            AuthError::ConfigurationError("YOUTUBE_REDIRECT_URI is not set".to_string())
        })
    }
}
