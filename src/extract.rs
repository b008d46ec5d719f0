//! Text extraction for uploaded PDFs.
//!
//! The PDF parser is a black box returning one optional text per page. Pages are joined into a
//! single document, each page followed by a newline; pages without text contribute nothing.

use std::sync::Arc;
use thiserror::Error;

/// Errors raised while turning an upload into a document.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The PDF was parsed but no page yielded text.
    #[error("Could not extract any text from the uploaded PDF.")]
    Empty,
    /// The parser failed to read the file.
    #[error("Error extracting text from PDF: {0}")]
    Failure(String),
}

/// Page-level text extraction backend.
pub trait PdfTextSource: Send + Sync {
    /// Return the text of each page in order, `None` for pages without extractable text.
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<Option<String>>, ExtractError>;
}

/// [`PdfTextSource`] backed by the `pdf-extract` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfExtractSource;

impl PdfTextSource for PdfExtractSource {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<Option<String>>, ExtractError> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
            .map_err(|error| ExtractError::Failure(error.to_string()))?;
        Ok(pages
            .into_iter()
            .map(|page| if page.is_empty() { None } else { Some(page) })
            .collect())
    }
}

/// Concatenate page texts, appending a newline after every page that has text.
pub fn join_pages(pages: &[Option<String>]) -> String {
    let mut document = String::new();
    for page in pages.iter().flatten() {
        if page.is_empty() {
            continue;
        }
        document.push_str(page);
        document.push('\n');
    }
    document
}

/// Extract a document from PDF bytes.
///
/// Parsing runs on the blocking pool; a parser panic is reported as [`ExtractError::Failure`].
/// A document without any non-whitespace text is [`ExtractError::Empty`].
pub async fn extract_document(
    source: Arc<dyn PdfTextSource>,
    bytes: Vec<u8>,
) -> Result<String, ExtractError> {
    let byte_len = bytes.len();
    let pages = tokio::task::spawn_blocking(move || source.extract_pages(&bytes))
        .await
        .map_err(|error| {
            if error.is_panic() {
                ExtractError::Failure("PDF parser panicked while reading the file".into())
            } else {
                ExtractError::Failure(format!("PDF extraction task failed: {error}"))
            }
        })??;

    let document = join_pages(&pages);
    let text_pages = pages.iter().flatten().filter(|page| !page.is_empty()).count();
    tracing::debug!(
        bytes = byte_len,
        pages = pages.len(),
        text_pages,
        chars = document.len(),
        "Extracted PDF text"
    );

    if document.trim().is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(document)
}
