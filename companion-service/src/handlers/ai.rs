use super::authorize;
use crate::auth::ScopeSet;
use crate::startup::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use service_core::error::AppError;

/// Suggest alternative titles for the managed video, based on its live title.
pub async fn suggest_titles(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let identity = authorize(&state, &ScopeSet::new()).await?;
    let video_id = state.config.video_id()?;

    let details = state.platform.video_details(&identity, video_id).await?;
    let titles = state.suggester.suggest_titles(&details.title).await?;

    Ok(Json(titles))
}
