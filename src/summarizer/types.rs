//! Settings, outcomes, and errors for the chunking summarizer.

use crate::config::DEFAULT_MAX_CHUNK_WORDS;
use crate::model::ModelError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Length bounds passed to a single model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryLengths {
    /// Upper bound for the generated summary.
    pub max_length: usize,
    /// Lower bound for the generated summary.
    pub min_length: usize,
}

impl SummaryLengths {
    /// Bounds applied to single-shot and per-chunk calls.
    pub const CHUNK: Self = Self {
        max_length: 120,
        min_length: 30,
    };
    /// Bounds applied to the recombination pass over joined partial summaries.
    pub const FINAL: Self = Self {
        max_length: 150,
        min_length: 50,
    };
}

/// Tunables for [`crate::summarizer::ChunkingSummarizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummarizerSettings {
    /// Word budget for one model call; also the recombination threshold.
    pub max_chunk_words: usize,
    /// Bounds for single-shot and per-chunk calls.
    pub chunk_lengths: SummaryLengths,
    /// Bounds for the recombination pass.
    pub final_lengths: SummaryLengths,
}

impl SummarizerSettings {
    /// Default lengths with a custom word budget.
    pub fn with_max_chunk_words(max_chunk_words: usize) -> Self {
        Self {
            max_chunk_words,
            ..Self::default()
        }
    }
}

impl Default for SummarizerSettings {
    fn default() -> Self {
        Self {
            max_chunk_words: DEFAULT_MAX_CHUNK_WORDS,
            chunk_lengths: SummaryLengths::CHUNK,
            final_lengths: SummaryLengths::FINAL,
        }
    }
}

/// Which branch of the algorithm produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryPath {
    /// The document fit the budget and was summarized with one call.
    SingleShot,
    /// The document was chunked and partial summaries were joined.
    Chunked,
}

/// Result of [`crate::summarizer::ChunkingSummarizer::summarize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryOutcome {
    /// Final summary with surrounding whitespace removed.
    pub summary: String,
    /// Branch taken.
    pub path: SummaryPath,
    /// Whitespace-delimited word count of the input.
    pub input_words: usize,
    /// Number of chunks summarized (1 on the single-shot path).
    pub chunk_count: usize,
    /// Number of model invocations issued.
    pub model_calls: usize,
    /// Whether the joined partial summaries were summarized once more.
    pub recombined: bool,
}

/// Model call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStage {
    /// The only call on the single-shot path.
    SingleShot,
    /// A per-chunk call; `index` is 1-based.
    Chunk {
        /// Position of the failing chunk.
        index: usize,
        /// Number of chunks in the document.
        total: usize,
    },
    /// The recombination pass.
    Recombination,
}

impl fmt::Display for ModelStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleShot => f.write_str("single-shot summary"),
            Self::Chunk { index, total } => write!(f, "chunk {index} of {total}"),
            Self::Recombination => f.write_str("recombination pass"),
        }
    }
}

/// Errors emitted by the chunking summarizer.
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// The model failed; summarization stops at the first failure.
    #[error("Summarization model failed on {stage}: {source}")]
    Model {
        /// Call that failed.
        stage: ModelStage,
        /// Underlying provider error.
        #[source]
        source: ModelError,
    },
}
