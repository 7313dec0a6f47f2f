use super::providers::{GenerationParams, ProviderError, TextProvider};
use std::sync::Arc;

pub const MAX_SUGGESTIONS: usize = 3;

const SYSTEM_PROMPT: &str = "You are an expert YouTube growth strategist.";
const TEMPERATURE: f32 = 0.8;

/// Turns the current title into a handful of alternatives.
#[derive(Clone)]
pub struct TitleSuggester {
    provider: Arc<dyn TextProvider>,
}

impl TitleSuggester {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    pub async fn suggest_titles(&self, current_title: &str) -> Result<Vec<String>, ProviderError> {
        let params = GenerationParams {
            temperature: Some(TEMPERATURE),
            ..Default::default()
        };

        let completion = self
            .provider
            .complete(SYSTEM_PROMPT, &build_prompt(current_title), &params)
            .await?;

        let titles = parse_titles(&completion);
        tracing::info!(count = titles.len(), "Generated title suggestions");
        Ok(titles)
    }
}

fn build_prompt(current_title: &str) -> String {
    format!(
        "Improve the following YouTube video title.\n\
         Return exactly {MAX_SUGGESTIONS} improved, catchy title suggestions.\n\
         One title per line. No numbering.\n\
         \n\
         Title: \"{current_title}\""
    )
}

/// One suggestion per non-blank line, capped at [`MAX_SUGGESTIONS`].
fn parse_titles(completion: &str) -> Vec<String> {
    completion
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect()
}
