use crate::auth::{AuthError, ScopeSet};
use crate::dtos::{AuthStatusResponse, CallbackParams, CallbackResponse, MessageResponse};
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    Json,
};
use service_core::error::AppError;

/// Send the browser to Google's consent screen.
pub async fn login(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let url = state.oauth.build_login_url()?;
    tracing::info!("Redirecting to Google consent screen");
    Ok(Redirect::to(&url))
}

/// Google redirects here with `?code=` once the operator has consented.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "Consent was not granted");
        return Err(AuthError::AuthExchangeFailed(error).into());
    }

    let identity = state
        .oauth
        .exchange_code(params.code.as_deref().unwrap_or_default())
        .await?;

    let granted = identity.scopes().to_vec();
    let missing = ScopeSet::requested().missing_from(identity.scopes());
    tracing::info!(granted = %identity.scopes(), missing = %missing, "YouTube OAuth successful");

    state.credentials.cache(identity);

    Ok(Json(CallbackResponse {
        message: "YouTube OAuth successful".to_string(),
        granted_scopes: granted,
    }))
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    state.credentials.clear();
    tracing::info!("Cleared cached YouTube credential");
    Json(MessageResponse::new("Logged out"))
}

pub async fn auth_status(State(state): State<AppState>) -> impl IntoResponse {
    let requested = ScopeSet::requested();

    let response = match state.credentials.current() {
        Ok(identity) => AuthStatusResponse {
            authenticated: true,
            granted_scopes: identity.scopes().to_vec(),
            missing_scopes: requested.missing_from(identity.scopes()).to_vec(),
            expires_at: identity.expires_at().map(|at| at.to_rfc3339()),
        },
        Err(_) => AuthStatusResponse {
            authenticated: false,
            granted_scopes: Vec::new(),
            missing_scopes: requested.to_vec(),
            expires_at: None,
        },
    };

    Json(response)
}
