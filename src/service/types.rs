//! Error taxonomy and response types for the summary service.

use super::input::DocumentKind;
use crate::extract::ExtractError;
use crate::summarizer::{SummarizeError, SummaryOutcome};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced to callers of the summary service.
///
/// Every variant is terminal for the request; no partial summary accompanies an error.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Neither text nor a file was supplied.
    #[error("Please either paste some text or upload a PDF.")]
    InputMissing,
    /// Both text and a file were supplied.
    #[error("Please either paste some text or upload a PDF, not both.")]
    InputConflict,
    /// The uploaded file is not a PDF.
    #[error("Only PDF uploads are supported (received '{0}').")]
    UnsupportedFile(String),
    /// Extraction produced no text or failed outright.
    #[error(transparent)]
    Extraction(#[from] ExtractError),
    /// The model failed on some call.
    #[error("Error during summarization: {0}")]
    Summarization(#[from] SummarizeError),
}

/// Failure site reported alongside an error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Request rejected before any work was done.
    Validation,
    /// PDF text extraction.
    Extraction,
    /// Model invocation.
    Summarization,
}

impl ServiceError {
    /// Failure site for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputMissing | Self::InputConflict | Self::UnsupportedFile(_) => {
                ErrorCategory::Validation
            }
            Self::Extraction(_) => ErrorCategory::Extraction,
            Self::Summarization(_) => ErrorCategory::Summarization,
        }
    }
}

/// Successful result returned by [`crate::service::SummaryApi::summarize`].
#[derive(Debug, Clone)]
pub struct SummaryReport {
    /// Identifier attached to the request's log span.
    pub request_id: String,
    /// Kind of input the summary came from.
    pub source: DocumentKind,
    /// Summary and algorithm bookkeeping.
    pub outcome: SummaryOutcome,
    /// RFC3339 completion timestamp.
    pub generated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelError;
    use crate::summarizer::ModelStage;

    #[test]
    fn categories_follow_failure_site() {
        assert_eq!(ServiceError::InputMissing.category(), ErrorCategory::Validation);
        assert_eq!(
            ServiceError::from(ExtractError::Empty).category(),
            ErrorCategory::Extraction
        );
        let error = ServiceError::from(SummarizeError::Model {
            stage: ModelStage::Chunk { index: 2, total: 3 },
            source: ModelError::GenerationFailed("oom".into()),
        });
        assert_eq!(error.category(), ErrorCategory::Summarization);
        assert!(error.to_string().contains("chunk 2 of 3"));
        assert!(error.to_string().contains("oom"));
    }

    #[test]
    fn extraction_messages_are_user_facing() {
        let error = ServiceError::from(ExtractError::Failure("bad xref".into()));
        assert_eq!(error.to_string(), "Error extracting text from PDF: bad xref");
        assert_eq!(
            ServiceError::from(ExtractError::Empty).to_string(),
            "Could not extract any text from the uploaded PDF."
        );
    }
}
