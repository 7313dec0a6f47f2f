use super::{authorize, record_event};
use crate::auth::ScopeSet;
use crate::dtos::{
    AddCommentRequest, CommentResponse, MessageResponse, ReplyCommentRequest, ReplyResponse,
};
use crate::models::EventType;
use crate::startup::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use service_core::error::AppError;
use validator::Validate;

pub async fn add_comment(
    State(state): State<AppState>,
    Json(request): Json<AddCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;

    let identity = authorize(&state, &ScopeSet::content_management()).await?;
    let video_id = state.config.video_id()?;

    let comment_id = state
        .platform
        .add_comment(&identity, video_id, &request.text)
        .await?;

    record_event(
        &state,
        EventType::CommentAdded,
        json!({ "videoId": video_id, "commentId": comment_id, "comment": request.text }),
    )
    .await;

    Ok(Json(CommentResponse {
        message: "Comment added".to_string(),
        comment_id,
    }))
}

pub async fn reply_to_comment(
    State(state): State<AppState>,
    Json(request): Json<ReplyCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;

    let identity = authorize(&state, &ScopeSet::content_management()).await?;

    let reply_id = state
        .platform
        .reply_to_comment(&identity, &request.parent_comment_id, &request.text)
        .await?;

    record_event(
        &state,
        EventType::CommentReplied,
        json!({
            "parentCommentId": request.parent_comment_id,
            "replyId": reply_id,
            "reply": request.text,
        }),
    )
    .await;

    Ok(Json(ReplyResponse {
        message: "Reply added".to_string(),
        reply_id,
    }))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let identity = authorize(&state, &ScopeSet::content_management()).await?;

    state.platform.delete_comment(&identity, &comment_id).await?;

    record_event(
        &state,
        EventType::CommentDeleted,
        json!({ "commentId": comment_id }),
    )
    .await;

    Ok(Json(MessageResponse::new("Comment deleted")))
}
