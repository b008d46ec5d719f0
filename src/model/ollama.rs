//! Ollama-backed summarization model.
//!
//! Issues `POST /api/generate` requests directly against the runtime with sampling disabled so
//! that a fixed model produces the same summary for the same input.

use super::{ModelError, ModelRequest, SummarizationModel};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Summarization model served by a local Ollama runtime.
pub struct OllamaModel {
    http: Client,
    base_url: String,
    model: String,
    display_name: String,
}

impl OllamaModel {
    /// Build a client for `model` hosted at `base_url`.
    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self, ModelError> {
        let http = Client::builder()
            .user_agent(concat!("rusty-sum/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|error| {
                ModelError::Unavailable(format!("failed to construct HTTP client: {error}"))
            })?;
        Ok(Self::with_client(http, base_url, model))
    }

    fn with_client(http: Client, base_url: String, model: String) -> Self {
        let display_name = format!("ollama/{model}");
        Self {
            http,
            base_url,
            model,
            display_name,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }
}

/// Build the generation prompt carrying the requested length bounds.
fn build_prompt(request: &ModelRequest) -> String {
    format!(
        "System: You write concise, faithful summaries. Do not add facts that are not in the text. \
         Write between {min} and {max} words as a single paragraph. Return only the summary.\n\n\
         Text:\n{text}",
        min = request.min_length,
        max = request.max_length,
        text = request.text,
    )
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    done: bool,
}

#[async_trait]
impl SummarizationModel for OllamaModel {
    async fn summarize(&self, request: ModelRequest) -> Result<String, ModelError> {
        let payload = json!({
            "model": self.model,
            "prompt": build_prompt(&request),
            "stream": false,
            "options": {
                "temperature": 0.0,
            }
        });

        tracing::debug!(
            model = %self.model,
            max_length = request.max_length,
            min_length = request.min_length,
            "Requesting summary from Ollama"
        );

        let response = self
            .http
            .post(self.endpoint())
            .json(&payload)
            .send()
            .await
            .map_err(|error| {
                ModelError::Unavailable(format!(
                    "failed to reach Ollama at {}: {error}",
                    self.base_url
                ))
            })?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ModelError::Unavailable(format!(
                "Ollama endpoint {} returned 404",
                self.endpoint()
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::GenerationFailed(format!(
                "Ollama returned {status}: {body}"
            )));
        }

        let body: OllamaResponse = response.json().await.map_err(|error| {
            ModelError::InvalidResponse(format!("failed to decode Ollama response: {error}"))
        })?;

        if !body.done {
            return Err(ModelError::InvalidResponse(
                "Ollama response incomplete (streaming not supported)".into(),
            ));
        }

        Ok(body.response.trim().to_string())
    }

    fn name(&self) -> &str {
        &self.display_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::POST, MockServer};

    fn test_model(base_url: String) -> OllamaModel {
        OllamaModel::with_client(
            Client::builder()
                .user_agent("rusty-sum-test")
                .build()
                .expect("client"),
            base_url,
            "llama".into(),
        )
    }

    #[test]
    fn prompt_carries_length_bounds() {
        let prompt = build_prompt(&ModelRequest::new("Body text.", 120, 30));
        assert!(prompt.contains("between 30 and 120 words"));
        assert!(prompt.ends_with("Body text."));
    }

    #[tokio::test]
    async fn ollama_model_handles_successful_response() {
        let server = MockServer::start_async().await;
        let model = test_model(server.base_url());

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/generate")
                    .body_contains("\"stream\":false")
                    .body_contains("\"model\":\"llama\"");
                then.status(200).json_body(json!({
                    "response": "  Summary text \n",
                    "done": true
                }));
            })
            .await;

        let summary = model
            .summarize(ModelRequest::new("Summarize me", 120, 30))
            .await
            .expect("summary");

        mock.assert_async().await;
        assert_eq!(summary, "Summary text");
    }

    #[tokio::test]
    async fn ollama_model_handles_error_status() {
        let server = MockServer::start_async().await;
        let model = test_model(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(500).body("boom");
            })
            .await;

        let error = model
            .summarize(ModelRequest::new("Summarize me", 120, 30))
            .await
            .expect_err("error response");

        assert!(
            matches!(error, ModelError::GenerationFailed(ref message) if message.contains("500")),
            "unexpected error: {error:?}"
        );
    }

    #[tokio::test]
    async fn ollama_model_reports_missing_endpoint() {
        let server = MockServer::start_async().await;
        let model = test_model(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(404);
            })
            .await;

        let error = model
            .summarize(ModelRequest::new("Summarize me", 120, 30))
            .await
            .expect_err("missing endpoint");

        assert!(matches!(error, ModelError::Unavailable(_)));
    }

    #[tokio::test]
    async fn ollama_model_rejects_incomplete_response() {
        let server = MockServer::start_async().await;
        let model = test_model(server.base_url());

        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/generate");
                then.status(200).json_body(json!({
                    "response": "partial",
                    "done": false
                }));
            })
            .await;

        let error = model
            .summarize(ModelRequest::new("Summarize me", 120, 30))
            .await
            .expect_err("incomplete response");

        assert!(matches!(error, ModelError::InvalidResponse(_)));
    }
}
