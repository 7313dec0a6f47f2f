use crate::models::EventType;
use async_trait::async_trait;
use service_core::error::AppError;

/// Append-only audit trail of mutations made through the dashboard.
#[async_trait]
pub trait EventLog: Send + Sync {
    async fn record(
        &self,
        event_type: EventType,
        message: serde_json::Value,
    ) -> Result<(), AppError>;
}
