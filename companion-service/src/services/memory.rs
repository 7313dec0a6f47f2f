//! In-process note and event stores, used when no MongoDB is wired in.

use super::events::EventLog;
use super::notes::{NoteQuery, NoteStore};
use crate::models::{EventLogEntry, EventType, Note};
use async_trait::async_trait;
use service_core::error::AppError;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryNoteStore {
    notes: RwLock<Vec<Note>>,
}

impl InMemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NoteStore for InMemoryNoteStore {
    async fn insert(&self, note: &Note) -> Result<(), AppError> {
        self.notes.write().await.push(note.clone());
        Ok(())
    }

    async fn search(&self, query: &NoteQuery) -> Result<Vec<Note>, AppError> {
        let mut found: Vec<Note> = self
            .notes
            .read()
            .await
            .iter()
            .filter(|n| query.matches(n))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryEventLog {
    entries: RwLock<Vec<EventLogEntry>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn entries(&self) -> Vec<EventLogEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn record(
        &self,
        event_type: EventType,
        message: serde_json::Value,
    ) -> Result<(), AppError> {
        self.entries
            .write()
            .await
            .push(EventLogEntry::new(event_type, message));
        Ok(())
    }
}
