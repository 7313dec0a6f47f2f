use serde::{Deserialize, Serialize};

/// Title, description and public counters of a video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}
