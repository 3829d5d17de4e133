//! PDF text decoding via `pdf-extract`.

use super::ExtractError;

/// Decodes PDF bytes into plain text.
///
/// Runs on the blocking pool; `pdf-extract` walks the full page tree
/// before returning.
pub(super) fn pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|error| ExtractError::Pdf {
        message: error.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_text_rejects_non_pdf_bytes() {
        let result = pdf_text(b"plain text, no PDF header");
        assert!(matches!(result, Err(ExtractError::Pdf { .. })));
    }

    #[test]
    fn test_pdf_text_rejects_truncated_header() {
        let result = pdf_text(b"%PDF-1.7\n");
        assert!(result.is_err(), "header alone is not a document");
    }
}
