use super::record_event;
use crate::dtos::{CreateNoteRequest, NoteResponse, NoteSearchParams};
use crate::models::{EventType, Note};
use crate::services::NoteQuery;
use crate::startup::AppState;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use service_core::error::AppError;
use validator::Validate;

pub async fn create_note(
    State(state): State<AppState>,
    Json(request): Json<CreateNoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    request.validate()?;

    let video_id = state.config.video_id()?.to_string();
    let note = Note::new(video_id, request.content.trim().to_string(), request.tags);

    state.notes.insert(&note).await?;
    tracing::info!(note_id = %note.id, tags = note.tags.len(), "Note added");

    record_event(
        &state,
        EventType::NoteAdded,
        json!({ "noteId": note.id, "videoId": note.video_id }),
    )
    .await;

    Ok(Json(NoteResponse::from(note)))
}

/// Blank parameters are ignored rather than matching nothing.
pub async fn search_notes(
    State(state): State<AppState>,
    Query(params): Query<NoteSearchParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = NoteQuery {
        text: non_blank(params.text),
        tag: non_blank(params.tag),
        video_id: state.config.youtube.video_id.clone(),
    };

    let notes = state.notes.search(&query).await?;
    tracing::debug!(count = notes.len(), "Note search");

    Ok(Json(
        notes.into_iter().map(NoteResponse::from).collect::<Vec<_>>(),
    ))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
