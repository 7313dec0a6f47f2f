use crate::auth::{AuthorizationFlow, CredentialStore, ScopeGate};
use crate::config::CompanionConfig;
use crate::handlers;
use crate::services::providers::{GroqProvider, TextProvider};
use crate::services::{
    CompanionDb, EventLog, NoteStore, TitleSuggester, VideoPlatform, YouTubeClient,
};
use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware::from_fn,
    routing::{delete, get, post, put},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::metrics::metrics_middleware;
use service_core::middleware::security_headers::security_headers_middleware;
use service_core::middleware::tracing::{request_id_middleware, REQUEST_ID_HEADER};
use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub config: CompanionConfig,
    pub credentials: CredentialStore,
    pub oauth: Arc<AuthorizationFlow>,
    pub scope_gate: ScopeGate,
    pub platform: Arc<dyn VideoPlatform>,
    pub notes: Arc<dyn NoteStore>,
    pub events: Arc<dyn EventLog>,
    pub suggester: TitleSuggester,
}

impl AppState {
    /// Wire the Google-facing collaborators from configuration around the
    /// given stores. The credential store starts empty.
    pub fn new(
        config: CompanionConfig,
        notes: Arc<dyn NoteStore>,
        events: Arc<dyn EventLog>,
    ) -> Result<Self, AppError> {
        let credentials = CredentialStore::new();
        let oauth = Arc::new(AuthorizationFlow::new(config.youtube.clone())?);
        let platform: Arc<dyn VideoPlatform> =
            Arc::new(YouTubeClient::new(&config.youtube.api_base_url)?);
        let provider: Arc<dyn TextProvider> = Arc::new(GroqProvider::new(config.groq.clone())?);

        Ok(Self {
            scope_gate: ScopeGate::new(credentials.clone()),
            credentials,
            oauth,
            platform,
            notes,
            events,
            suggester: TitleSuggester::new(provider),
            config,
        })
    }
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors.frontend_origin);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics_endpoint))
        .route("/api/config-check", get(handlers::config_check))
        .route("/api/auth/login", get(handlers::login))
        .route("/api/auth/callback", get(handlers::callback))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/status", get(handlers::auth_status))
        .route("/api/video/details", get(handlers::video_details))
        .route("/api/video/update", put(handlers::update_video))
        .route("/api/video/comment", post(handlers::add_comment))
        .route("/api/video/comment/reply", post(handlers::reply_to_comment))
        .route(
            "/api/video/comment/:comment_id",
            delete(handlers::delete_comment),
        )
        .route("/api/notes", post(handlers::create_note))
        .route("/api/notes/search", get(handlers::search_notes))
        .route("/api/ai/suggest-titles", get(handlers::suggest_titles))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(cors)
        .with_state(state)
}

/// The dashboard frontend sends cookies, so origins, methods and headers
/// are listed explicitly instead of wildcarded.
fn cors_layer(frontend_origin: &str) -> CorsLayer {
    let origin = frontend_origin.parse::<HeaderValue>().unwrap_or_else(|e| {
        tracing::error!(
            "Invalid CORS origin '{}': {}. Falling back to http://localhost:3000",
            frontend_origin,
            e
        );
        HeaderValue::from_static("http://localhost:3000")
    });

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static(REQUEST_ID_HEADER),
        ])
}

pub struct Application {
    port: u16,
    server: Box<dyn std::future::Future<Output = std::io::Result<()>> + Send + Unpin>,
    state: AppState,
}

impl Application {
    pub async fn build(config: CompanionConfig) -> Result<Self, AppError> {
        let db = CompanionDb::connect(
            &config.mongodb.uri,
            &config.mongodb.database,
            &config.mongodb.notes_collection,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to MongoDB: {}", e);
            e
        })?;
        db.initialize_indexes().await.map_err(|e| {
            tracing::error!("Failed to initialize database indexes: {}", e);
            e
        })?;

        let db = Arc::new(db);
        let state = AppState::new(config, db.clone(), db)?;
        Self::with_state(state).await
    }

    /// Bind and serve an already-wired state. Port 0 picks a free port.
    pub async fn with_state(state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], state.config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind TCP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Listening on {}", port);

        let server = axum::serve(listener, router(state.clone()));

        Ok(Self {
            port,
            server: Box::new(server.into_future()),
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        self.server.await
    }
}
