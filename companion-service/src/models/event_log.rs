use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// What happened to the managed video.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EventType {
    VideoUpdated,
    CommentAdded,
    CommentReplied,
    CommentDeleted,
    NoteAdded,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::VideoUpdated => "VideoUpdated",
            EventType::CommentAdded => "CommentAdded",
            EventType::CommentReplied => "CommentReplied",
            EventType::CommentDeleted => "CommentDeleted",
            EventType::NoteAdded => "NoteAdded",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Audit record written after each successful mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    #[serde(rename = "_id")]
    pub id: String,
    pub event_type: EventType,
    pub message: serde_json::Value,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl EventLogEntry {
    pub fn new(event_type: EventType, message: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_type,
            message,
            created_at: Utc::now(),
        }
    }
}
