use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackResponse {
    pub message: String,
    pub granted_scopes: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    pub granted_scopes: Vec<String>,
    /// Requested scopes the current grant lacks.
    pub missing_scopes: Vec<String>,
    pub expires_at: Option<String>,
}

/// Which settings are present, without revealing any secret.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigCheckResponse {
    pub youtube_redirect: Option<String>,
    pub youtube_client_id_set: bool,
    pub youtube_client_secret_set: bool,
    pub youtube_video_id_set: bool,
    pub mongo_connection_set: bool,
    pub groq_api_key_set: bool,
}
