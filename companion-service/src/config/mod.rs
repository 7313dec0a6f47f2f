use secrecy::Secret;
use serde::Deserialize;
use service_core::config::{self as core_config, get_env, is_production, optional_env};
use service_core::error::AppError;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_YOUTUBE_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_GROQ_API_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

#[derive(Debug, Clone, Deserialize)]
pub struct CompanionConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub mongodb: MongoConfig,
    pub youtube: YouTubeConfig,
    pub groq: GroqConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub notes_collection: String,
}

/// OAuth client registration and API endpoints for the managed video.
///
/// Client settings are optional at startup: the service still serves
/// notes and health without them, and the auth routes report a
/// configuration error until they are provided.
#[derive(Debug, Clone, Deserialize)]
pub struct YouTubeConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<Secret<String>>,
    pub redirect_uri: Option<String>,
    pub video_id: Option<String>,
    pub auth_url: String,
    pub token_url: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqConfig {
    pub api_key: Option<Secret<String>>,
    pub model: String,
    pub api_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    pub frontend_origin: String,
}

impl CompanionConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = is_production();

        Ok(CompanionConfig {
            common: common_config,
            mongodb: MongoConfig {
                uri: get_env("MONGODB_URI", None, is_prod)?,
                database: get_env("MONGODB_DATABASE", Some("youtube_companion"), is_prod)?,
                notes_collection: get_env("MONGODB_NOTES_COLLECTION", Some("notes"), is_prod)?,
            },
            youtube: YouTubeConfig {
                client_id: optional_env("YOUTUBE_CLIENT_ID"),
                client_secret: optional_env("YOUTUBE_CLIENT_SECRET").map(Secret::new),
                redirect_uri: optional_env("YOUTUBE_REDIRECT_URI"),
                video_id: optional_env("YOUTUBE_VIDEO_ID"),
                auth_url: get_env("YOUTUBE_AUTH_URL", Some(DEFAULT_AUTH_URL), false)?,
                token_url: get_env("YOUTUBE_TOKEN_URL", Some(DEFAULT_TOKEN_URL), false)?,
                api_base_url: get_env(
                    "YOUTUBE_API_BASE_URL",
                    Some(DEFAULT_YOUTUBE_API_BASE_URL),
                    false,
                )?,
            },
            groq: GroqConfig {
                api_key: optional_env("GROQ_API_KEY").map(Secret::new),
                model: get_env("GROQ_MODEL", Some(DEFAULT_GROQ_MODEL), is_prod)?,
                api_base_url: get_env(
                    "GROQ_API_BASE_URL",
                    Some(DEFAULT_GROQ_API_BASE_URL),
                    false,
                )?,
            },
            cors: CorsConfig {
                frontend_origin: get_env(
                    "FRONTEND_ORIGIN",
                    Some("http://localhost:3000"),
                    is_prod,
                )?,
            },
        })
    }

    /// The single video this dashboard manages.
    pub fn video_id(&self) -> Result<&str, AppError> {
        self.youtube.video_id.as_deref().ok_or_else(|| {
            AppError::ConfigError(anyhow::anyhow!("YOUTUBE_VIDEO_ID is not configured"))
        })
    }
}
