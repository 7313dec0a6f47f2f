use super::{GenerationParams, ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

/// Replays a canned completion and remembers the last prompt it saw.
pub struct MockTextProvider {
    reply: Option<String>,
    last_prompt: Mutex<Option<String>>,
}

impl MockTextProvider {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            last_prompt: Mutex::new(None),
        }
    }

    /// A provider that behaves as if no API key were configured.
    pub fn disabled() -> Self {
        Self {
            reply: None,
            last_prompt: Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn complete(
        &self,
        _system: &str,
        prompt: &str,
        _params: &GenerationParams,
    ) -> Result<String, ProviderError> {
        *self.last_prompt.lock().unwrap_or_else(|e| e.into_inner()) = Some(prompt.to_string());

        self.reply
            .clone()
            .ok_or_else(|| ProviderError::NotConfigured("Mock text provider not enabled".to_string()))
    }
}
