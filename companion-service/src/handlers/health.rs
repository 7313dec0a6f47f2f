use crate::dtos::ConfigCheckResponse;
use crate::services::get_metrics;
use crate::startup::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.notes.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": "companion-service",
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": "companion-service",
                "error": e.to_string()
            })),
        ),
    }
}

pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.notes.health_check().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

pub async fn config_check(State(state): State<AppState>) -> impl IntoResponse {
    let config = &state.config;
    Json(ConfigCheckResponse {
        youtube_redirect: config.youtube.redirect_uri.clone(),
        youtube_client_id_set: config.youtube.client_id.is_some(),
        youtube_client_secret_set: config.youtube.client_secret.is_some(),
        youtube_video_id_set: config.youtube.video_id.is_some(),
        mongo_connection_set: !config.mongodb.uri.trim().is_empty(),
        groq_api_key_set: config.groq.api_key.is_some(),
    })
}
