//! Chunking summarizer: the core of the service.
//!
//! Short documents go to the model in one call. Longer ones are split into sentence-aligned
//! chunks under a word budget, each chunk is summarized in order, and the partial summaries are
//! joined with single spaces. When the joined text is itself over budget it is summarized once
//! more with wider length bounds. That pass runs at most once, so pathologically long inputs can
//! still produce a summary above the target length.

pub mod chunking;
mod types;

pub use chunking::{chunk_text, split_sentences, word_count};
pub use types::{
    ModelStage, SummarizeError, SummarizerSettings, SummaryLengths, SummaryOutcome, SummaryPath,
};

use crate::model::{ModelRequest, SummarizationModel};
use std::sync::Arc;

/// Summarizes arbitrarily long text through a fixed-window model.
///
/// Holds a shared handle to the model built at process start; the summarizer itself keeps no
/// state between calls, so one instance can serve concurrent requests.
#[derive(Clone)]
pub struct ChunkingSummarizer {
    model: Arc<dyn SummarizationModel>,
    settings: SummarizerSettings,
}

impl ChunkingSummarizer {
    /// Build a summarizer with default settings.
    pub fn new(model: Arc<dyn SummarizationModel>) -> Self {
        Self::with_settings(model, SummarizerSettings::default())
    }

    /// Build a summarizer with explicit settings.
    pub fn with_settings(model: Arc<dyn SummarizationModel>, settings: SummarizerSettings) -> Self {
        Self { model, settings }
    }

    /// Settings in effect.
    pub fn settings(&self) -> &SummarizerSettings {
        &self.settings
    }

    /// Identifier of the underlying model.
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Summarize `text`, chunking and recombining as needed.
    ///
    /// Chunks are processed strictly in order. The first model failure aborts the run; no
    /// partial summary is returned and nothing is retried.
    pub async fn summarize(&self, text: &str) -> Result<SummaryOutcome, SummarizeError> {
        let SummarizerSettings {
            max_chunk_words,
            chunk_lengths,
            final_lengths,
        } = self.settings;
        let input_words = word_count(text);

        if input_words <= max_chunk_words {
            tracing::debug!(input_words, "Summarizing in a single call");
            let summary = self
                .call_model(text, chunk_lengths)
                .await
                .map_err(|source| SummarizeError::Model {
                    stage: ModelStage::SingleShot,
                    source,
                })?;
            return Ok(SummaryOutcome {
                summary,
                path: SummaryPath::SingleShot,
                input_words,
                chunk_count: 1,
                model_calls: 1,
                recombined: false,
            });
        }

        let chunks = chunk_text(text, max_chunk_words);
        let total = chunks.len();
        tracing::debug!(input_words, chunks = total, max_chunk_words, "Chunked document");

        let mut partials = Vec::with_capacity(total);
        for (position, chunk) in chunks.iter().enumerate() {
            let partial = self
                .call_model(chunk, chunk_lengths)
                .await
                .map_err(|source| SummarizeError::Model {
                    stage: ModelStage::Chunk {
                        index: position + 1,
                        total,
                    },
                    source,
                })?;
            tracing::trace!(chunk = position + 1, total, "Chunk summarized");
            partials.push(partial);
        }

        let mut summary = partials.join(" ");
        let mut model_calls = total;
        let combined_words = word_count(&summary);
        let recombined = combined_words > max_chunk_words;
        if recombined {
            tracing::debug!(combined_words, "Partial summaries over budget; recombining");
            summary = self
                .call_model(&summary, final_lengths)
                .await
                .map_err(|source| SummarizeError::Model {
                    stage: ModelStage::Recombination,
                    source,
                })?;
            model_calls += 1;
        }

        Ok(SummaryOutcome {
            summary,
            path: SummaryPath::Chunked,
            input_words,
            chunk_count: total,
            model_calls,
            recombined,
        })
    }

    async fn call_model(
        &self,
        text: &str,
        lengths: SummaryLengths,
    ) -> Result<String, crate::model::ModelError> {
        let output = self
            .model
            .summarize(ModelRequest::new(
                text,
                lengths.max_length,
                lengths.min_length,
            ))
            .await?;
        Ok(output.trim().to_string())
    }
}
