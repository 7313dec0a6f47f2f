//! YouTube Data API v3 facade for the video and comment operations.
//!
//! Calls run with the caller's [`Identity`]; scope checks happen before
//! a call reaches this module. Nothing here retries.

use crate::auth::Identity;
use crate::models::VideoDetails;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use service_core::error::AppError;
use thiserror::Error;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("YouTube API error: {message}")]
    Upstream { message: String },
}

impl PlatformError {
    fn upstream(message: impl Into<String>) -> Self {
        PlatformError::Upstream {
            message: message.into(),
        }
    }
}

impl From<PlatformError> for AppError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::NotFound(msg) => AppError::NotFound(anyhow::anyhow!(msg)),
            PlatformError::Upstream { message } => AppError::BadGateway(message),
        }
    }
}

/// Operations the dashboard performs against the video platform.
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    async fn video_details(
        &self,
        identity: &Identity,
        video_id: &str,
    ) -> Result<VideoDetails, PlatformError>;

    /// Read-modify-write of the snippet; other snippet fields are preserved.
    async fn update_video(
        &self,
        identity: &Identity,
        video_id: &str,
        title: &str,
        description: &str,
    ) -> Result<(), PlatformError>;

    /// Start a new top-level comment thread. Returns the thread id.
    async fn add_comment(
        &self,
        identity: &Identity,
        video_id: &str,
        text: &str,
    ) -> Result<String, PlatformError>;

    /// Returns the reply's comment id.
    async fn reply_to_comment(
        &self,
        identity: &Identity,
        parent_id: &str,
        text: &str,
    ) -> Result<String, PlatformError>;

    async fn delete_comment(&self, identity: &Identity, comment_id: &str)
        -> Result<(), PlatformError>;
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    items: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct CreatedResource {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    message: String,
}

/// reqwest-backed client for `https://www.googleapis.com/youtube/v3`.
#[derive(Clone)]
pub struct YouTubeClient {
    client: Client,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                AppError::InternalError(anyhow::anyhow!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, PlatformError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "YouTube API request failed");
            PlatformError::upstream(format!("request failed: {}", e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GoogleErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| format!("YouTube API returned {}", status));

        tracing::warn!(status = %status, message = %message, "YouTube API error");

        if status == StatusCode::NOT_FOUND {
            Err(PlatformError::NotFound(message))
        } else {
            Err(PlatformError::upstream(message))
        }
    }

    async fn fetch_video(
        &self,
        identity: &Identity,
        video_id: &str,
        parts: &str,
    ) -> Result<Value, PlatformError> {
        let request = self
            .client
            .get(self.url("videos"))
            .bearer_auth(identity.bearer_token())
            .query(&[("part", parts), ("id", video_id)]);

        let list: ListResponse = self
            .send(request)
            .await?
            .json()
            .await
            .map_err(|e| PlatformError::upstream(format!("malformed videos response: {}", e)))?;

        list.items.into_iter().next().ok_or_else(|| {
            PlatformError::NotFound(format!("Video not found. VideoId used: {}", video_id))
        })
    }

    async fn created_id(response: Response) -> Result<String, PlatformError> {
        response
            .json::<CreatedResource>()
            .await
            .map(|r| r.id)
            .map_err(|e| PlatformError::upstream(format!("malformed insert response: {}", e)))
    }
}

/// Statistics arrive as decimal strings; absent or hidden counters read as 0.
fn counter(statistics: &Value, key: &str) -> u64 {
    match statistics.get(key) {
        Some(Value::String(s)) => s.parse().unwrap_or(0),
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        _ => 0,
    }
}

fn text_field(snippet: &Value, key: &str) -> String {
    snippet
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

#[async_trait]
impl VideoPlatform for YouTubeClient {
    async fn video_details(
        &self,
        identity: &Identity,
        video_id: &str,
    ) -> Result<VideoDetails, PlatformError> {
        let video = self.fetch_video(identity, video_id, "snippet,statistics").await?;
        let snippet = &video["snippet"];
        let statistics = &video["statistics"];

        Ok(VideoDetails {
            video_id: video_id.to_string(),
            title: text_field(snippet, "title"),
            description: text_field(snippet, "description"),
            view_count: counter(statistics, "viewCount"),
            like_count: counter(statistics, "likeCount"),
            comment_count: counter(statistics, "commentCount"),
        })
    }

    async fn update_video(
        &self,
        identity: &Identity,
        video_id: &str,
        title: &str,
        description: &str,
    ) -> Result<(), PlatformError> {
        let video = self.fetch_video(identity, video_id, "snippet").await?;

        let mut snippet = match video.get("snippet") {
            Some(Value::Object(map)) => map.clone(),
            _ => return Err(PlatformError::upstream("video has no snippet")),
        };
        snippet.insert("title".to_string(), Value::String(title.to_string()));
        snippet.insert(
            "description".to_string(),
            Value::String(description.to_string()),
        );

        let request = self
            .client
            .put(self.url("videos"))
            .bearer_auth(identity.bearer_token())
            .query(&[("part", "snippet")])
            .json(&json!({ "id": video_id, "snippet": snippet }));

        self.send(request).await?;
        tracing::info!(video_id = %video_id, "Updated video snippet");
        Ok(())
    }

    async fn add_comment(
        &self,
        identity: &Identity,
        video_id: &str,
        text: &str,
    ) -> Result<String, PlatformError> {
        let body = json!({
            "snippet": {
                "videoId": video_id,
                "topLevelComment": {
                    "snippet": { "textOriginal": text }
                }
            }
        });

        let request = self
            .client
            .post(self.url("commentThreads"))
            .bearer_auth(identity.bearer_token())
            .query(&[("part", "snippet")])
            .json(&body);

        Self::created_id(self.send(request).await?).await
    }

    async fn reply_to_comment(
        &self,
        identity: &Identity,
        parent_id: &str,
        text: &str,
    ) -> Result<String, PlatformError> {
        let body = json!({
            "snippet": {
                "parentId": parent_id,
                "textOriginal": text
            }
        });

        let request = self
            .client
            .post(self.url("comments"))
            .bearer_auth(identity.bearer_token())
            .query(&[("part", "snippet")])
            .json(&body);

        Self::created_id(self.send(request).await?).await
    }

    async fn delete_comment(
        &self,
        identity: &Identity,
        comment_id: &str,
    ) -> Result<(), PlatformError> {
        let request = self
            .client
            .delete(self.url("comments"))
            .bearer_auth(identity.bearer_token())
            .query(&[("id", comment_id)]);

        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::ScopeSet;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn identity() -> Identity {
        Identity::new("ya29.test", ScopeSet::requested())
    }

    #[tokio::test]
    async fn test_video_details_parses_string_counters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .and(query_param("id", "vid-1"))
            .and(query_param("part", "snippet,statistics"))
            .and(header("authorization", "Bearer ya29.test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": "vid-1",
                    "snippet": { "title": "My video", "description": "About it" },
                    "statistics": { "viewCount": "1200", "likeCount": "45" }
                }]
            })))
            .mount(&server)
            .await;

        let client = YouTubeClient::new(&server.uri()).unwrap();
        let details = client.video_details(&identity(), "vid-1").await.unwrap();

        assert_eq!(details.title, "My video");
        assert_eq!(details.description, "About it");
        assert_eq!(details.view_count, 1200);
        assert_eq!(details.like_count, 45);
        assert_eq!(details.comment_count, 0);
    }

    #[tokio::test]
    async fn test_empty_list_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;

        let client = YouTubeClient::new(&server.uri()).unwrap();
        assert!(matches!(
            client.video_details(&identity(), "gone").await,
            Err(PlatformError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_preserves_other_snippet_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": "vid-1",
                    "snippet": { "title": "Old", "description": "Old desc", "categoryId": "22" }
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/videos"))
            .and(query_param("part", "snippet"))
            .and(body_partial_json(json!({
                "id": "vid-1",
                "snippet": { "title": "New", "description": "New desc", "categoryId": "22" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "vid-1" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = YouTubeClient::new(&server.uri()).unwrap();
        client
            .update_video(&identity(), "vid-1", "New", "New desc")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_of_missing_video_never_puts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = YouTubeClient::new(&server.uri()).unwrap();
        assert!(matches!(
            client.update_video(&identity(), "gone", "t", "d").await,
            Err(PlatformError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_of_video_removed_after_fetch_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{ "id": "vid-1", "snippet": { "title": "Old", "description": "" } }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/videos"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": { "code": 404, "message": "Video not found" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = YouTubeClient::new(&server.uri()).unwrap();
        match client.update_video(&identity(), "vid-1", "New", "").await {
            Err(PlatformError::NotFound(message)) => assert_eq!(message, "Video not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_add_comment_returns_thread_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/commentThreads"))
            .and(body_partial_json(json!({
                "snippet": {
                    "videoId": "vid-1",
                    "topLevelComment": { "snippet": { "textOriginal": "Nice" } }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "thread-9" })))
            .mount(&server)
            .await;

        let client = YouTubeClient::new(&server.uri()).unwrap();
        let id = client.add_comment(&identity(), "vid-1", "Nice").await.unwrap();
        assert_eq!(id, "thread-9");
    }

    #[tokio::test]
    async fn test_upstream_error_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/comments"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": { "code": 403, "message": "Comments are disabled" }
            })))
            .mount(&server)
            .await;

        let client = YouTubeClient::new(&server.uri()).unwrap();
        match client.reply_to_comment(&identity(), "parent", "hi").await {
            Err(PlatformError::Upstream { message }) => {
                assert_eq!(message, "Comments are disabled");
            }
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_of_missing_comment_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/comments"))
            .and(query_param("id", "c-1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": { "code": 404, "message": "The comment could not be found" }
            })))
            .mount(&server)
            .await;

        let client = YouTubeClient::new(&server.uri()).unwrap();
        assert!(matches!(
            client.delete_comment(&identity(), "c-1").await,
            Err(PlatformError::NotFound(_))
        ));
    }
}
