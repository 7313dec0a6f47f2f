#![allow(dead_code)]

use companion_service::auth::{CredentialStore, Identity, ScopeSet};
use companion_service::config::{
    CompanionConfig, CorsConfig, GroqConfig, MongoConfig, YouTubeConfig,
};
use companion_service::services::{InMemoryEventLog, InMemoryNoteStore};
use companion_service::startup::{AppState, Application};
use secrecy::Secret;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_VIDEO_ID: &str = "dQw4w9WgXcQ";
pub const TEST_CLIENT_ID: &str = "test-client.apps.googleusercontent.com";
pub const TEST_REDIRECT_URI: &str = "http://localhost:8080/api/auth/callback";
pub const YOUTUBE_SCOPE: &str = "https://www.googleapis.com/auth/youtube";
pub const FORCE_SSL_SCOPE: &str = "https://www.googleapis.com/auth/youtube.force-ssl";

/// YouTube API path prefix on the Google mock server.
pub const API_PREFIX: &str = "/youtube/v3";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    /// Stands in for both the OAuth endpoints and the Data API.
    pub google: MockServer,
    pub groq: MockServer,
    pub credentials: CredentialStore,
    pub events: Arc<InMemoryEventLog>,
    pub client: reqwest::Client,
}

pub fn test_config(google: &MockServer, groq: &MockServer) -> CompanionConfig {
    CompanionConfig {
        common: service_core::config::Config {
            port: 0,
            log_level: "debug".to_string(),
            otlp_endpoint: None,
        },
        mongodb: MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "companion_test".to_string(),
            notes_collection: "notes".to_string(),
        },
        youtube: YouTubeConfig {
            client_id: Some(TEST_CLIENT_ID.to_string()),
            client_secret: Some(Secret::new("test-secret".to_string())),
            redirect_uri: Some(TEST_REDIRECT_URI.to_string()),
            video_id: Some(TEST_VIDEO_ID.to_string()),
            auth_url: format!("{}/o/oauth2/v2/auth", google.uri()),
            token_url: format!("{}/token", google.uri()),
            api_base_url: format!("{}{}", google.uri(), API_PREFIX),
        },
        groq: GroqConfig {
            api_key: Some(Secret::new("gsk-test".to_string())),
            model: "llama-3.1-8b-instant".to_string(),
            api_base_url: groq.uri(),
        },
        cors: CorsConfig {
            frontend_origin: "http://localhost:3000".to_string(),
        },
    }
}

impl TestApp {
    pub async fn spawn() -> Self {
        let google = MockServer::start().await;
        let groq = MockServer::start().await;
        let config = test_config(&google, &groq);
        Self::spawn_with_config(config, google, groq).await
    }

    pub async fn spawn_with_config(
        config: CompanionConfig,
        google: MockServer,
        groq: MockServer,
    ) -> Self {
        let events = Arc::new(InMemoryEventLog::new());
        let state = AppState::new(config, Arc::new(InMemoryNoteStore::new()), events.clone())
            .expect("Failed to wire application state");
        let credentials = state.credentials.clone();

        let app = Application::with_state(state)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        // Wait for the server by polling the health endpoint
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            google,
            groq,
            credentials,
            events,
            client,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Put an identity with the given grant straight into the store.
    pub fn sign_in(&self, grant: &str) {
        self.credentials
            .cache(Identity::new("ya29.cached", ScopeSet::parse(grant)));
    }

    /// Make the token endpoint accept `code` and grant `scope`.
    pub async fn mock_token_exchange(&self, code: &str, scope: &str) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains(format!("code={}", code)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "ya29.exchanged",
                "expires_in": 3599,
                "refresh_token": "1//refresh",
                "scope": scope,
                "token_type": "Bearer"
            })))
            .mount(&self.google)
            .await;
    }

    /// Mount a `videos.list` reply for the test video.
    pub async fn mock_video(&self, title: &str) {
        Mock::given(method("GET"))
            .and(path(format!("{}/videos", API_PREFIX)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "id": TEST_VIDEO_ID,
                    "snippet": {
                        "title": title,
                        "description": "A description",
                        "categoryId": "28"
                    },
                    "statistics": {
                        "viewCount": "1500",
                        "likeCount": "120",
                        "commentCount": "7"
                    }
                }]
            })))
            .mount(&self.google)
            .await;
    }

    /// Requests that reached the YouTube Data API with the given method.
    pub async fn youtube_requests(&self, http_method: &str) -> usize {
        self.google
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|r| {
                r.method.to_string() == http_method && r.url.path().starts_with(API_PREFIX)
            })
            .count()
    }
}
