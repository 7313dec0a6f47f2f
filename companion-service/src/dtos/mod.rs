pub mod auth;
pub mod notes;
pub mod video;

pub use auth::{AuthStatusResponse, CallbackParams, CallbackResponse, ConfigCheckResponse};
pub use notes::{CreateNoteRequest, NoteResponse, NoteSearchParams};
pub use video::{
    AddCommentRequest, CommentResponse, MessageResponse, ReplyCommentRequest, ReplyResponse,
    UpdateVideoRequest,
};

use validator::ValidationError;

/// Rejects strings made only of whitespace.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
