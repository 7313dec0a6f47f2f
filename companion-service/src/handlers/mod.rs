pub mod ai;
pub mod auth;
pub mod comments;
pub mod health;
pub mod notes;
pub mod video;

pub use ai::suggest_titles;
pub use auth::{auth_status, callback, login, logout};
pub use comments::{add_comment, delete_comment, reply_to_comment};
pub use health::{config_check, health_check, metrics_endpoint, readiness_check};
pub use notes::{create_note, search_notes};
pub use video::{update_video, video_details};

use crate::auth::{Identity, ScopeSet};
use crate::models::EventType;
use crate::startup::AppState;
use service_core::error::AppError;
use std::sync::Arc;

/// Resolve the cached identity for a call that needs `required`.
///
/// The identity the gate approves is the one handed back. An expired token
/// is refreshed after the gate passes, and the refreshed identity is only
/// written back if no other login or logout replaced the slot meanwhile.
pub(crate) async fn authorize(
    state: &AppState,
    required: &ScopeSet,
) -> Result<Arc<Identity>, AppError> {
    let approved = state.scope_gate.require_scopes(required)?;

    let (identity, refreshed) = state.oauth.ensure_fresh(approved.clone()).await?;
    if refreshed
        && !state
            .credentials
            .replace_if_current(&approved, Identity::clone(&identity))
    {
        tracing::info!("Credential changed during token refresh; keeping the newer one cached");
    }
    Ok(identity)
}

/// Record an audit event. The mutation has already happened upstream, so a
/// failed write is logged and swallowed.
pub(crate) async fn record_event(state: &AppState, event_type: EventType, message: serde_json::Value) {
    if let Err(e) = state.events.record(event_type, message).await {
        tracing::warn!(event_type = %event_type, error = %e, "Failed to write event log entry");
    }
}
