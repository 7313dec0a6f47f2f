use super::{authorize, record_event};
use crate::auth::ScopeSet;
use crate::dtos::{MessageResponse, UpdateVideoRequest};
use crate::models::EventType;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;
use validator::Validate;

pub async fn video_details(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let identity = authorize(&state, &ScopeSet::new()).await?;
    let video_id = state.config.video_id()?;

    let details = state.platform.video_details(&identity, video_id).await?;
    Ok(Json(details))
}

pub async fn update_video(
    State(state): State<AppState>,
    Json(request): Json<UpdateVideoRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;

    let identity = authorize(&state, &ScopeSet::content_management()).await?;
    let video_id = state.config.video_id()?;

    state
        .platform
        .update_video(&identity, video_id, &request.title, &request.description)
        .await?;

    record_event(
        &state,
        EventType::VideoUpdated,
        json!({
            "videoId": video_id,
            "title": request.title,
            "description": request.description,
        }),
    )
    .await;

    Ok(Json(MessageResponse::new("Video updated successfully")))
}
