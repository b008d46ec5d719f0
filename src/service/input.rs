//! Request input validation.
//!
//! A request carries pasted text, an uploaded file, or (invalidly) both or neither. Validation
//! happens before any extraction or model call.

use super::types::ServiceError;

/// File received through an upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Client-supplied file name; only its suffix is inspected.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

/// Raw request input as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryInput {
    /// Pasted text, possibly blank.
    pub text: Option<String>,
    /// Uploaded file, possibly without a name when the form field was left empty.
    pub file: Option<UploadedFile>,
}

impl SummaryInput {
    /// Input consisting of pasted text only.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file: None,
        }
    }

    /// Input consisting of an uploaded file only.
    pub fn from_file(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            text: None,
            file: Some(UploadedFile {
                file_name: file_name.into(),
                bytes,
            }),
        }
    }

    /// Validate the input and decide where the document comes from.
    ///
    /// Exactly one of non-blank text or a named file must be present, and files must carry a
    /// `.pdf` suffix (ASCII case-insensitive). Pasted text is trimmed.
    pub fn into_source(self) -> Result<DocumentSource, ServiceError> {
        let text = self
            .text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty());
        let file = self.file.filter(|file| !file.file_name.trim().is_empty());

        match (text, file) {
            (None, None) => Err(ServiceError::InputMissing),
            (Some(_), Some(_)) => Err(ServiceError::InputConflict),
            (Some(text), None) => Ok(DocumentSource::Text(text)),
            (None, Some(file)) if is_pdf_name(&file.file_name) => Ok(DocumentSource::Pdf(file)),
            (None, Some(file)) => Err(ServiceError::UnsupportedFile(file.file_name)),
        }
    }
}

/// Validated origin of the document to summarize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Pasted text, already trimmed.
    Text(String),
    /// PDF upload awaiting extraction.
    Pdf(UploadedFile),
}

impl DocumentSource {
    /// Short label used in logs and responses.
    pub fn kind(&self) -> DocumentKind {
        match self {
            Self::Text(_) => DocumentKind::Text,
            Self::Pdf(_) => DocumentKind::Pdf,
        }
    }
}

/// Kind of input a summary was produced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Pasted text.
    Text,
    /// Uploaded PDF.
    Pdf,
}

fn is_pdf_name(file_name: &str) -> bool {
    let name = file_name.trim();
    name.len() > 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|suffix| suffix.eq_ignore_ascii_case(".pdf"))
}
