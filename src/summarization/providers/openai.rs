//! OpenAI-compatible chat completions provider.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{ProviderFuture, SummaryProvider, build_client, check_status, non_empty};
use crate::summarization::config::{ProviderConfig, ProviderKind};
use crate::summarization::error::{ConfigError, ProviderError, ProviderResult};

/// Fixed system instruction.
const SYSTEM_PROMPT: &str = "You are a concise summarization assistant.";

/// Output token cap per summary.
const MAX_TOKENS: u32 = 256;

/// Low randomness keeps summaries close to the source.
const TEMPERATURE: f32 = 0.2;

/// Chat completions summary provider.
pub struct OpenAiProvider {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    model: String,
}

impl OpenAiProvider {
    /// Create a provider from config.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let client = build_client(config)?;
        let endpoint = Url::parse(&format!(
            "{}/v1/chat/completions",
            config.base_url.trim_end_matches('/')
        ))?;
        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    async fn complete(&self, text: &str, max_sentences: usize) -> ProviderResult<String> {
        let user_prompt = build_user_prompt(text, max_sentences);
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!("Requesting chat completion summary with model {}", self.model);

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let parsed: ChatCompletionResponse = response.json().await?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedResponse("no choices in response".to_string()))?
            .message
            .content
            .ok_or_else(|| ProviderError::MalformedResponse("choice has no content".to_string()))?;

        non_empty(&content)
    }
}

impl SummaryProvider for OpenAiProvider {
    fn summarize<'a>(
        &'a self,
        text: &'a str,
        max_sentences: usize,
    ) -> ProviderFuture<'a, ProviderResult<String>> {
        Box::pin(self.complete(text, max_sentences))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }
}

fn build_user_prompt(text: &str, max_sentences: usize) -> String {
    format!("Summarize the following text in {max_sentences} sentences:\n\n{text}")
}

// Chat completions request structures

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

// Chat completions response structures

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
