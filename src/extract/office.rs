//! Office-document (OOXML) text decoding.
//!
//! A `.docx` is a zip container; the body text lives in
//! `word/document.xml` as `<w:t>` runs grouped into `<w:p>` paragraphs.
//! The decoder walks that XML once, concatenating run text and emitting
//! a newline per paragraph. Anything that is not a readable OOXML
//! container (including legacy binary `.doc`) fails here.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use super::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

fn office_error(message: impl Into<String>) -> ExtractError {
    ExtractError::Office {
        message: message.into(),
    }
}

/// Decodes OOXML bytes into plain text (one line per paragraph).
pub(super) fn office_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|error| office_error(format!("not an OOXML container: {error}")))?;

    let mut document_xml = String::new();
    archive
        .by_name(DOCUMENT_PART)
        .map_err(|error| office_error(format!("missing {DOCUMENT_PART}: {error}")))?
        .read_to_string(&mut document_xml)
        .map_err(|error| office_error(format!("unreadable {DOCUMENT_PART}: {error}")))?;

    paragraph_text(&document_xml)
}

/// Collects `<w:t>` run text from the document XML, newline per `<w:p>`.
fn paragraph_text(document_xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(document_xml);
    let mut text = String::new();
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(element)) if element.local_name().as_ref() == b"t" => {
                in_run_text = true;
            }
            Ok(Event::End(element)) => match element.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(element)) => match element.local_name().as_ref() {
                b"tab" => text.push('\t'),
                b"br" | b"cr" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(run)) if in_run_text => {
                let unescaped = run
                    .unescape()
                    .map_err(|error| office_error(format!("malformed run text: {error}")))?;
                text.push_str(&unescaped);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => {
                return Err(office_error(format!("malformed document XML: {error}")));
            }
        }
    }

    Ok(text)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    use super::*;

    fn docx_with_document_xml(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        writer.start_file(DOCUMENT_PART, options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    fn document_xml(body: &str) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{body}</w:body></w:document>"
        )
    }

    #[test]
    fn test_office_text_extracts_paragraphs() {
        let xml = document_xml(
            "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Engineer, 10 years</w:t></w:r></w:p>",
        );
        let bytes = docx_with_document_xml(&xml);
        let text = office_text(&bytes).unwrap();
        assert_eq!(text, "Jane Doe\nEngineer, 10 years\n");
    }

    #[test]
    fn test_office_text_joins_split_runs_and_handles_tabs() {
        let xml = document_xml(
            "<w:p><w:r><w:t>Skills:</w:t></w:r><w:r><w:tab/><w:t>Rust &amp; SQL</w:t></w:r></w:p>",
        );
        let bytes = docx_with_document_xml(&xml);
        let text = office_text(&bytes).unwrap();
        assert_eq!(text, "Skills:\tRust & SQL\n");
    }

    #[test]
    fn test_office_text_ignores_non_run_text() {
        // Text outside <w:t> (e.g. field instructions) must not leak in.
        let xml = document_xml(
            "<w:p><w:r><w:instrText>PAGEREF _Toc1</w:instrText><w:t>Visible</w:t></w:r></w:p>",
        );
        let bytes = docx_with_document_xml(&xml);
        let text = office_text(&bytes).unwrap();
        assert_eq!(text, "Visible\n");
    }

    #[test]
    fn test_office_text_rejects_non_zip_bytes() {
        let result = office_text(b"this is not a zip container");
        assert!(matches!(result, Err(ExtractError::Office { .. })));
    }

    #[test]
    fn test_office_text_rejects_zip_without_document_part() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/other.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let result = office_text(&bytes);
        assert!(matches!(result, Err(ExtractError::Office { .. })));
    }

    #[test]
    fn test_office_text_rejects_malformed_document_xml() {
        let bytes = docx_with_document_xml("<w:document><w:body><w:p>");
        let result = office_text(&bytes);
        // Unclosed elements surface as EOF with no text rather than an
        // XML error in quick-xml's default mode; either way nothing
        // readable comes out.
        match result {
            Ok(text) => assert!(text.trim().is_empty()),
            Err(ExtractError::Office { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
}
