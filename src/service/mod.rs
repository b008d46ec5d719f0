//! Summary service: validation, PDF extraction, and chunked summarization.
//!
//! One [`SummaryService`] is constructed at process start and shared through an `Arc` by the
//! HTTP surface. It owns the summarizer (and through it the model), the PDF backend, and the
//! metrics registry.

mod input;
mod types;

pub use input::{DocumentKind, DocumentSource, SummaryInput, UploadedFile};
pub use types::{ErrorCategory, ServiceError, SummaryReport};

use crate::{
    config::Config,
    extract::{PdfExtractSource, PdfTextSource, extract_document},
    metrics::{MetricsSnapshot, SummaryMetrics},
    model::{ModelError, SummarizationModel, build_model},
    summarizer::{ChunkingSummarizer, SummarizerSettings},
};
use async_trait::async_trait;
use std::sync::Arc;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::Instrument;

/// Abstraction over the summary pipeline used by external surfaces (HTTP, CLI).
#[async_trait]
pub trait SummaryApi: Send + Sync {
    /// Validate the input, extract text when needed, and summarize it.
    async fn summarize(&self, input: SummaryInput) -> Result<SummaryReport, ServiceError>;

    /// Identifier of the model serving requests.
    fn model_name(&self) -> String;

    /// Retrieve the current metrics snapshot for diagnostics.
    fn metrics_snapshot(&self) -> MetricsSnapshot;
}

/// Coordinates validation, extraction, and summarization for a request.
pub struct SummaryService {
    summarizer: ChunkingSummarizer,
    pdf_source: Arc<dyn PdfTextSource>,
    metrics: Arc<SummaryMetrics>,
}

impl SummaryService {
    /// Build a service around an already constructed model.
    pub fn new(model: Arc<dyn SummarizationModel>, settings: SummarizerSettings) -> Self {
        Self {
            summarizer: ChunkingSummarizer::with_settings(model, settings),
            pdf_source: Arc::new(PdfExtractSource),
            metrics: Arc::new(SummaryMetrics::new()),
        }
    }

    /// Build the model selected by `config` and wrap it in a service.
    pub fn from_config(config: &Config) -> Result<Self, ModelError> {
        let model = build_model(config)?;
        let settings = SummarizerSettings::with_max_chunk_words(config.max_chunk_words);
        tracing::info!(
            model = model.name(),
            max_chunk_words = settings.max_chunk_words,
            "Summary service ready"
        );
        Ok(Self::new(model, settings))
    }

    /// Replace the PDF extraction backend.
    pub fn with_pdf_source(mut self, source: Arc<dyn PdfTextSource>) -> Self {
        self.pdf_source = source;
        self
    }

    /// Summarizer used by this service.
    pub fn summarizer(&self) -> &ChunkingSummarizer {
        &self.summarizer
    }

    async fn run(&self, source: DocumentSource) -> Result<SummaryReport, ServiceError> {
        let kind = source.kind();
        let document = match source {
            DocumentSource::Text(text) => text,
            DocumentSource::Pdf(file) => {
                tracing::info!(
                    file_name = %file.file_name,
                    bytes = file.bytes.len(),
                    "Extracting PDF upload"
                );
                extract_document(self.pdf_source.clone(), file.bytes).await?
            }
        };

        let outcome = self.summarizer.summarize(&document).await?;
        self.metrics.record_summary(&outcome);
        tracing::info!(
            source = ?kind,
            path = ?outcome.path,
            input_words = outcome.input_words,
            chunks = outcome.chunk_count,
            model_calls = outcome.model_calls,
            recombined = outcome.recombined,
            "Summary produced"
        );

        Ok(SummaryReport {
            request_id: String::new(),
            source: kind,
            outcome,
            generated_at: OffsetDateTime::now_utc()
                .format(&Rfc3339)
                .unwrap_or_default(),
        })
    }
}

#[async_trait]
impl SummaryApi for SummaryService {
    async fn summarize(&self, input: SummaryInput) -> Result<SummaryReport, ServiceError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("summarize", request_id = %request_id);

        let result = match input.into_source() {
            Ok(source) => self.run(source).instrument(span).await,
            Err(error) => Err(error),
        };

        match result {
            Ok(mut report) => {
                report.request_id = request_id;
                Ok(report)
            }
            Err(error) => {
                self.metrics.record_failure();
                tracing::warn!(
                    request_id = %request_id,
                    category = ?error.category(),
                    error = %error,
                    "Summary request failed"
                );
                Err(error)
            }
        }
    }

    fn model_name(&self) -> String {
        self.summarizer.model_name().to_string()
    }

    fn metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
