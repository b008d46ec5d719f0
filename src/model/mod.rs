//! Abstractions over the abstractive summarization model.
//!
//! The chunking summarizer treats the model as a black box `summarize(text, max, min) -> text`.
//! Providers implement [`SummarizationModel`]; the process builds exactly one instance at
//! startup with [`build_model`] and shares it behind an `Arc`.

mod extractive;
mod ollama;

pub use extractive::ExtractiveModel;
pub use ollama::OllamaModel;

use crate::config::{Config, SummarizationProvider};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced while invoking the summarization model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Provider could not be reached or is not serving the expected endpoint.
    #[error("Summarization provider unavailable: {0}")]
    Unavailable(String),
    /// Provider returned an error response.
    #[error("Failed to generate summary: {0}")]
    GenerationFailed(String),
    /// Provider response could not be parsed.
    #[error("Malformed provider response: {0}")]
    InvalidResponse(String),
}

/// A single model invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    /// Text to condense.
    pub text: String,
    /// Upper length bound for the generated summary, in words.
    pub max_length: usize,
    /// Lower length bound for the generated summary, in words.
    pub min_length: usize,
}

impl ModelRequest {
    /// Build a request for `text` bounded by the given lengths.
    pub fn new(text: impl Into<String>, max_length: usize, min_length: usize) -> Self {
        Self {
            text: text.into(),
            max_length,
            min_length,
        }
    }
}

/// Interface implemented by summarization backends.
///
/// Implementations must be deterministic for a fixed model (no sampling) and safe to call from
/// concurrent requests.
#[async_trait]
pub trait SummarizationModel: Send + Sync {
    /// Produce a summary for the request text.
    async fn summarize(&self, request: ModelRequest) -> Result<String, ModelError>;

    /// Human readable identifier reported by health endpoints and logs.
    fn name(&self) -> &str;
}

/// Build the summarization model selected by configuration.
pub fn build_model(config: &Config) -> Result<Arc<dyn SummarizationModel>, ModelError> {
    match config.summarization_provider {
        SummarizationProvider::Ollama => {
            tracing::info!(
                model = %config.summarization_model,
                url = %config.ollama_url,
                "Initializing Ollama summarization model"
            );
            let model = OllamaModel::new(
                config.ollama_url.clone(),
                config.summarization_model.clone(),
                std::time::Duration::from_secs(config.summarization_timeout_secs),
            )?;
            Ok(Arc::new(model))
        }
        SummarizationProvider::Extractive => {
            tracing::info!("Initializing extractive summarization model");
            Ok(Arc::new(ExtractiveModel::new()))
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording model double used by unit tests.

    use super::*;
    use tokio::sync::Mutex;

    type Reply = Box<dyn Fn(&ModelRequest, usize) -> String + Send + Sync>;

    /// Records every request and answers with a scripted reply, optionally failing one call.
    pub(crate) struct ScriptedModel {
        calls: Mutex<Vec<ModelRequest>>,
        reply: Reply,
        fail_on: Option<usize>,
    }

    impl ScriptedModel {
        /// Answer each call with `reply(request, call_index)`.
        pub(crate) fn replying(
            reply: impl Fn(&ModelRequest, usize) -> String + Send + Sync + 'static,
        ) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply: Box::new(reply),
                fail_on: None,
            }
        }

        /// Fail the call at zero-based position `call`; other calls echo a short summary.
        pub(crate) fn failing_on(call: usize) -> Self {
            Self {
                fail_on: Some(call),
                ..Self::replying(|_, index| format!("summary {index}"))
            }
        }

        pub(crate) async fn recorded_calls(&self) -> Vec<ModelRequest> {
            self.calls.lock().await.clone()
        }
    }

    #[async_trait]
    impl SummarizationModel for ScriptedModel {
        async fn summarize(&self, request: ModelRequest) -> Result<String, ModelError> {
            let mut calls = self.calls.lock().await;
            let index = calls.len();
            calls.push(request.clone());
            if self.fail_on == Some(index) {
                return Err(ModelError::GenerationFailed(format!("scripted failure on call {index}")));
            }
            Ok((self.reply)(&request, index))
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }
}
