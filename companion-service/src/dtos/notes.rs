use crate::models::Note;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateNoteRequest {
    #[validate(custom(function = "super::not_blank", message = "Note content is required"))]
    pub content: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "At most 20 tags per note"))]
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NoteSearchParams {
    pub text: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: String,
    pub video_id: String,
    pub content: String,
    pub tags: Vec<String>,
    pub created_at: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            video_id: note.video_id,
            content: note.content,
            tags: note.tags,
            created_at: note.created_at.to_rfc3339(),
        }
    }
}
