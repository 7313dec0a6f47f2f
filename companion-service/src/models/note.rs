use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A free-form note the owner keeps about the managed video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: String,
    pub video_id: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub fn new(video_id: String, content: String, tags: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            video_id,
            content,
            tags: normalize_tags(tags),
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive substring match on the content.
    pub fn matches_text(&self, text: &str) -> bool {
        self.content.to_lowercase().contains(&text.to_lowercase())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Trim, drop blanks and duplicates, keep first-seen order.
fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !seen.iter().any(|t: &String| t == tag) {
            seen.push(tag.to_string());
        }
    }
    seen
}
