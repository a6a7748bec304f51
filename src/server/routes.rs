//! HTTP route handlers for the summarizer API.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;

use crate::summarization::{SummarizeRequest, SummarizeResponse};

use super::error::ApiError;
use super::state::AppState;

/// Create the API router with all routes.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health_check))
        .route("/summarize", post(summarize))
        .with_state(state)
}

/// Liveness response.
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    /// Fixed status message.
    pub message: &'static str,
}

/// Liveness endpoint.
async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: "Summarizer alive",
    })
}

/// Health check endpoint.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "summarizer-service",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": state.summarizer.mode()
    }))
}

/// Handle summarization requests.
async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError> {
    let response = state.summarizer.summarize(request).await?;
    Ok(Json(response))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::summarization::providers::test_upstream;
    use crate::summarization::{ProviderConfig, ProviderKind, Summarizer, SummarizerConfig};

    fn fallback_router() -> Router {
        create_router(AppState::new(&SummarizerConfig::default()).unwrap())
    }

    fn router_with(provider: ProviderConfig) -> Router {
        let config = SummarizerConfig {
            provider: Some(provider),
            port: None,
        };
        create_router(AppState::new(&config).unwrap())
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    async fn post_summarize(router: Router, body: Value) -> (StatusCode, Value) {
        let request = Request::post("/summarize")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(router, request).await
    }

    #[tokio::test]
    async fn test_liveness() {
        let request = Request::get("/").body(Body::empty()).unwrap();
        let (status, body) = send(fallback_router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Summarizer alive"}));
    }

    #[tokio::test]
    async fn test_health_reports_mode() {
        let request = Request::get("/health").body(Body::empty()).unwrap();
        let (status, body) = send(fallback_router(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["provider"], "fallback");
    }

    #[tokio::test]
    async fn test_summarize_fallback() {
        let (status, body) = post_summarize(
            fallback_router(),
            json!({"text": "Hello world. This is great! Stop.", "max_sentences": 2, "source": "notes"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"summary": "Hello world. This is great!", "source": "notes"})
        );
    }

    #[tokio::test]
    async fn test_missing_source_echoed_as_null() {
        let (status, body) =
            post_summarize(fallback_router(), json!({"text": "no punctuation here"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"summary": "no punctuation here", "source": null}));
    }

    #[tokio::test]
    async fn test_long_unpunctuated_text_truncated() {
        let text = "x".repeat(250);
        let (status, body) = post_summarize(fallback_router(), json!({"text": text})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], format!("{}...", "x".repeat(200)));
    }

    #[tokio::test]
    async fn test_blank_text_is_bad_request() {
        for text in ["", "   \n"] {
            let (status, body) =
                post_summarize(fallback_router(), json!({"text": text, "source": "s"})).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(
                body,
                json!({"detail": "text must be provided in the request body"})
            );
        }
    }

    #[tokio::test]
    async fn test_schema_violations_rejected_by_extractor() {
        let (status, _) = post_summarize(fallback_router(), json!({"source": "s"})).await;
        assert!(status.is_client_error());

        let (status, _) =
            post_summarize(fallback_router(), json!({"text": "a", "max_sentences": 0})).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_provider_summary_returned() {
        let captured = test_upstream::captured();
        let base = test_upstream::spawn(test_upstream::recording(
            captured.clone(),
            StatusCode::OK,
            json!({"choices": [{"message": {"content": "Remote summary."}}]}),
        ))
        .await;

        let router = router_with(ProviderConfig::new(ProviderKind::OpenAi, "sk").with_base_url(base));
        let (status, body) =
            post_summarize(router, json!({"text": "Some text. More text.", "source": "doc"})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"summary": "Remote summary.", "source": "doc"}));
        assert_eq!(captured.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_provider_500_falls_back() {
        let base = test_upstream::spawn(test_upstream::recording(
            test_upstream::captured(),
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": "down"}),
        ))
        .await;

        let router = router_with(ProviderConfig::new(ProviderKind::Gemini, "g").with_base_url(base));
        let (status, body) = post_summarize(
            router,
            json!({"text": "First. Second. Third. Fourth.", "max_sentences": 3}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"summary": "First. Second. Third.", "source": null}));
    }

    #[tokio::test]
    async fn test_provider_timeout_falls_back() {
        let slow = Router::new().fallback(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        });
        let base = test_upstream::spawn(slow).await;

        let router = router_with(
            ProviderConfig::new(ProviderKind::OpenAi, "sk")
                .with_base_url(base)
                .with_timeout(Duration::from_millis(100)),
        );
        let (status, body) = post_summarize(router, json!({"text": "Only one. Two."})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "Only one. Two.");
    }

    #[tokio::test]
    async fn test_summarizer_injected_directly() {
        let state = AppState::with_summarizer(Summarizer::new(None).unwrap());
        let (status, body) =
            post_summarize(create_router(state), json!({"text": "A. B. C. D.", "max_sentences": 1})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"], "A.");
    }
}
