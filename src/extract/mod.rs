//! Plain-text extraction from binary resume documents.
//!
//! Dispatch is a closed two-variant choice on the declared media type:
//! PDF goes to the PDF decoder, DOC/DOCX to the office-document decoder.
//! Decoding is CPU-bound and runs on the blocking pool; no network I/O.
//! The pipeline treats every decode failure as one generic extraction
//! failure, so the error variants here exist for logs, not for routing.

mod office;
mod pdf;

use thiserror::Error;
use tokio::task;
use tracing::{debug, warn};

use crate::intake::SelectedFile;

/// Supported document formats (closed set; extend only if the accepted
/// media types change).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    /// Word documents. Only the OOXML container actually decodes; a
    /// legacy binary `.doc` fails inside the decoder like any other
    /// corrupt input.
    OfficeDocument,
}

impl DocumentFormat {
    /// Picks the decoder for a declared media type.
    #[must_use]
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "application/pdf" => Some(Self::Pdf),
            "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::OfficeDocument)
            }
            _ => None,
        }
    }
}

/// Errors from text extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The declared media type has no decoder (intake validation should
    /// have rejected it already).
    #[error("unsupported media type: {media_type}")]
    UnsupportedMediaType {
        /// The declared media type.
        media_type: String,
    },

    /// The PDF decoder rejected the content.
    #[error("failed to decode PDF content: {message}")]
    Pdf {
        /// Decoder-supplied failure description.
        message: String,
    },

    /// The office-document decoder rejected the content (bad container,
    /// missing or malformed document XML).
    #[error("failed to decode office document: {message}")]
    Office {
        /// Decoder-supplied failure description.
        message: String,
    },

    /// The blocking decode task failed (cancelled or panicked decoder).
    #[error("decoder task failed")]
    DecoderTask,
}

/// Extracts plain text from a selected resume file.
///
/// On success the text is human-readable content with no formatting
/// fidelity guarantee (tables and styles are not preserved).
///
/// # Errors
///
/// Returns [`ExtractError`] for unsupported media types and any decode
/// failure; callers report all of them as one generic outcome.
pub async fn extract_text(file: &SelectedFile) -> Result<String, ExtractError> {
    let Some(format) = DocumentFormat::from_media_type(&file.media_type) else {
        return Err(ExtractError::UnsupportedMediaType {
            media_type: file.media_type.clone(),
        });
    };

    debug!(name = %file.name, ?format, size = file.bytes.len(), "extracting resume text");

    let bytes = file.bytes.clone();
    let decoded = task::spawn_blocking(move || match format {
        DocumentFormat::Pdf => pdf::pdf_text(&bytes),
        DocumentFormat::OfficeDocument => office::office_text(&bytes),
    })
    .await
    .map_err(|error| {
        warn!(error = %error, "extraction worker did not complete");
        ExtractError::DecoderTask
    })??;

    Ok(decoded)
}
