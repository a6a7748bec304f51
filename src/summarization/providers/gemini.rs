//! Google Generative Language (`generateContent`) provider.
//!
//! Sends a single-turn prompt and reads the first candidate back. A candidate
//! without text is reported as
//! [`ProviderError::EmptyContent`](crate::summarization::error::ProviderError::EmptyContent).

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{ProviderFuture, SummaryProvider, build_client, check_status, non_empty};
use crate::summarization::config::{ProviderConfig, ProviderKind};
use crate::summarization::error::{ConfigError, ProviderResult};

/// Gemini summary provider.
pub struct GeminiProvider {
    client: reqwest::Client,
    endpoint: Url,
    model: String,
}

impl GeminiProvider {
    /// Create a provider from config.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self, ConfigError> {
        let client = build_client(config)?;
        let endpoint = build_endpoint(&config.base_url, &config.model, &config.api_key)?;
        Ok(Self {
            client,
            endpoint,
            model: config.model.clone(),
        })
    }

    async fn generate(&self, text: &str, max_sentences: usize) -> ProviderResult<String> {
        let prompt = build_prompt(text, max_sentences);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![PartIn { text: &prompt }],
            }],
        };

        debug!("Requesting Gemini summary with model {}", self.model);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;
        let response = check_status(response).await?;
        let parsed: GenerateContentResponse = response.json().await?;

        non_empty(&extract_text(parsed))
    }
}

impl SummaryProvider for GeminiProvider {
    fn summarize<'a>(
        &'a self,
        text: &'a str,
        max_sentences: usize,
    ) -> ProviderFuture<'a, ProviderResult<String>> {
        Box::pin(self.generate(text, max_sentences))
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }
}

/// `{base}/v1beta/models/{model}:generateContent?key={api_key}`
fn build_endpoint(base_url: &str, model: &str, api_key: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(&format!(
        "{}/v1beta/models/{model}:generateContent",
        base_url.trim_end_matches('/')
    ))?;
    url.query_pairs_mut().append_pair("key", api_key);
    Ok(url)
}

fn build_prompt(text: &str, max_sentences: usize) -> String {
    format!("Summarize the following text into {max_sentences} sentences (concise, actionable):\n{text}")
}

/// Text of the first candidate, empty if there is none.
fn extract_text(response: GenerateContentResponse) -> String {
    let Some(content) = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
    else {
        return String::new();
    };

    match content {
        CandidateContent::Text(text) => text,
        CandidateContent::Parts { parts } => parts.into_iter().filter_map(|p| p.text).collect(),
    }
}

// Gemini API request structures

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<PartIn<'a>>,
}

#[derive(Debug, Serialize)]
struct PartIn<'a> {
    text: &'a str,
}

// Gemini API response structures

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

/// Older gateways return plain text, the current API returns parts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CandidateContent {
    Text(String),
    Parts {
        #[serde(default)]
        parts: Vec<PartOut>,
    },
}

#[derive(Debug, Deserialize)]
struct PartOut {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use serde_json::json;

    use super::*;
    use crate::summarization::error::ProviderError;
    use crate::summarization::providers::test_upstream;

    fn provider_for(base_url: &str) -> GeminiProvider {
        let config = ProviderConfig::new(ProviderKind::Gemini, "secret-key").with_base_url(base_url);
        GeminiProvider::new(&config).unwrap()
    }

    #[test]
    fn test_build_endpoint() {
        let url = build_endpoint("https://example.test/", "gemini-pro", "k&y").unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.test/v1beta/models/gemini-pro:generateContent?key=k%26y"
        );
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let config = ProviderConfig::new(ProviderKind::Gemini, "k").with_base_url("not a url");
        assert!(matches!(
            GeminiProvider::new(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_extract_text_shapes() {
        let plain: GenerateContentResponse =
            serde_json::from_value(json!({"candidates": [{"content": "Short."}]})).unwrap();
        assert_eq!(extract_text(plain), "Short.");

        let parts: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "One. "}, {"text": "Two."}], "role": "model"}}]
        }))
        .unwrap();
        assert_eq!(extract_text(parts), "One. Two.");

        let missing: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(extract_text(missing), "");
    }

    #[tokio::test]
    async fn test_sends_prompt_and_reads_first_candidate() {
        let captured = test_upstream::captured();
        let reply = json!({"candidates": [
            {"content": {"parts": [{"text": "  A short summary.  "}]}},
            {"content": {"parts": [{"text": "Ignored."}]}}
        ]});
        let base = test_upstream::spawn(test_upstream::recording(
            captured.clone(),
            StatusCode::OK,
            reply,
        ))
        .await;

        let summary = provider_for(&base).summarize("Some long text.", 2).await.unwrap();
        assert_eq!(summary, "A short summary.");

        let requests = captured.lock().unwrap().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].path_and_query,
            "/v1beta/models/gemini-pro:generateContent?key=secret-key"
        );
        assert_eq!(
            requests[0].body,
            json!({"contents": [{"parts": [{"text":
                "Summarize the following text into 2 sentences (concise, actionable):\nSome long text."
            }]}]})
        );
    }

    #[tokio::test]
    async fn test_empty_candidate_is_soft_failure() {
        let base = test_upstream::spawn(test_upstream::recording(
            test_upstream::captured(),
            StatusCode::OK,
            json!({"candidates": [{"content": "   "}]}),
        ))
        .await;

        let result = provider_for(&base).summarize("text", 3).await;
        assert!(matches!(result, Err(ProviderError::EmptyContent)));
    }

    #[tokio::test]
    async fn test_wrong_candidates_type_is_malformed() {
        let base = test_upstream::spawn(test_upstream::recording(
            test_upstream::captured(),
            StatusCode::OK,
            json!({"candidates": 5}),
        ))
        .await;

        let result = provider_for(&base).summarize("text", 3).await;
        assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let router = axum::Router::new().fallback(|| async { "<html>gateway page</html>" });
        let base = test_upstream::spawn(router).await;

        let result = provider_for(&base).summarize("text", 3).await;
        assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let base = test_upstream::spawn(test_upstream::recording(
            test_upstream::captured(),
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "boom"}),
        ))
        .await;

        let result = provider_for(&base).summarize("text", 3).await;
        assert!(matches!(result, Err(ProviderError::Status { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_timeout() {
        let router = axum::Router::new().fallback(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        });
        let base = test_upstream::spawn(router).await;
        let config = ProviderConfig::new(ProviderKind::Gemini, "k")
            .with_base_url(base)
            .with_timeout(Duration::from_millis(100));
        let provider = GeminiProvider::new(&config).unwrap();

        let result = provider.summarize("text", 3).await;
        assert!(matches!(result, Err(ProviderError::Timeout)));
    }
}
