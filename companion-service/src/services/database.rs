//! MongoDB persistence for notes and the event log.

use super::events::EventLog;
use super::notes::{NoteQuery, NoteStore};
use crate::models::{EventLogEntry, EventType, Note};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Document},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, Database, IndexModel,
};
use service_core::error::AppError;

const EVENT_LOGS_COLLECTION: &str = "event_logs";

#[derive(Clone)]
pub struct CompanionDb {
    client: MongoClient,
    db: Database,
    notes_collection: String,
}

impl CompanionDb {
    pub async fn connect(
        uri: &str,
        database: &str,
        notes_collection: &str,
    ) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self {
            client,
            db,
            notes_collection: notes_collection.to_string(),
        })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for companion-service");

        let notes = self.notes();
        for (keys, name) in [
            (doc! { "video_id": 1, "created_at": -1 }, "video_created_idx"),
            (doc! { "tags": 1 }, "tags_idx"),
        ] {
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build();

            notes.create_index(index, None).await.map_err(|e| {
                tracing::error!("Failed to create {} index: {}", name, e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        }

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_idx".to_string())
                    .build(),
            )
            .build();

        self.event_logs()
            .create_index(created_at_index, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create created_at index: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    pub fn notes(&self) -> Collection<Note> {
        self.db.collection(&self.notes_collection)
    }

    pub fn event_logs(&self) -> Collection<EventLogEntry> {
        self.db.collection(EVENT_LOGS_COLLECTION)
    }
}

/// Translate a note query into a Mongo filter. User text is escaped so it
/// matches literally.
pub fn note_filter(query: &NoteQuery) -> Document {
    let mut filter = doc! {};

    if let Some(video_id) = &query.video_id {
        filter.insert("video_id", video_id.as_str());
    }
    if let Some(text) = query.text.as_deref().filter(|t| !t.is_empty()) {
        filter.insert(
            "content",
            doc! { "$regex": regex::escape(text), "$options": "i" },
        );
    }
    if let Some(tag) = query.tag.as_deref().filter(|t| !t.is_empty()) {
        filter.insert("tags", tag);
    }

    filter
}

#[async_trait]
impl NoteStore for CompanionDb {
    async fn insert(&self, note: &Note) -> Result<(), AppError> {
        self.notes().insert_one(note, None).await.map_err(|e| {
            tracing::error!("Failed to insert note: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        Ok(())
    }

    async fn search(&self, query: &NoteQuery) -> Result<Vec<Note>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .notes()
            .find(note_filter(query), options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to query notes: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect notes: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }
}

#[async_trait]
impl EventLog for CompanionDb {
    async fn record(
        &self,
        event_type: EventType,
        message: serde_json::Value,
    ) -> Result<(), AppError> {
        let entry = EventLogEntry::new(event_type, message);
        self.event_logs()
            .insert_one(&entry, None)
            .await
            .map_err(|e| {
                tracing::error!("Failed to record {} event: {}", event_type, e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }
}
