use crate::models::Note;
use async_trait::async_trait;
use service_core::error::AppError;

/// Filter for note search. Absent fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
    /// Case-insensitive literal substring of the content.
    pub text: Option<String>,
    /// Exact tag the note must carry.
    pub tag: Option<String>,
    pub video_id: Option<String>,
}

impl NoteQuery {
    pub fn matches(&self, note: &Note) -> bool {
        self.text
            .as_deref()
            .filter(|t| !t.is_empty())
            .map_or(true, |t| note.matches_text(t))
            && self
                .tag
                .as_deref()
                .filter(|t| !t.is_empty())
                .map_or(true, |t| note.has_tag(t))
            && self.video_id.as_deref().map_or(true, |v| note.video_id == v)
    }
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn insert(&self, note: &Note) -> Result<(), AppError>;

    /// Matching notes, newest first.
    async fn search(&self, query: &NoteQuery) -> Result<Vec<Note>, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}
