//! Shared test doubles and fixtures for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::sync::Mutex;
use std::time::Duration;

use applicant_core::{CandidateFile, Navigator, Notifier, ProgressObserver, Route, Severity};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Notifier that records every (message, severity) pair.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }

    pub fn last(&self) -> Option<(String, Severity)> {
        self.notices.lock().unwrap().last().cloned()
    }

    pub fn contains(&self, fragment: &str) -> bool {
        self.messages().iter().any(|m| m.contains(fragment))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity, _duration: Option<Duration>) {
        self.notices
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}

/// Navigator that records requested routes.
#[derive(Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }

    pub fn requested_sign_in(&self) -> bool {
        self.routes().contains(&Route::SignIn)
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}

/// Progress observer that records every emitted sample.
#[derive(Default)]
pub struct RecordingProgress {
    samples: Mutex<Vec<u8>>,
}

impl RecordingProgress {
    pub fn samples(&self) -> Vec<u8> {
        self.samples.lock().unwrap().clone()
    }
}

impl ProgressObserver for RecordingProgress {
    fn progress(&self, percent: u8) {
        self.samples.lock().unwrap().push(percent);
    }
}

/// Builds a minimal real OOXML (.docx) file whose body is one paragraph
/// per input line.
pub fn docx_bytes(text: &str) -> Vec<u8> {
    let paragraphs: String = text
        .lines()
        .map(|line| format!("<w:p><w:r><w:t>{line}</w:t></w:r></w:p>"))
        .collect();
    let document_xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
         <w:body>{paragraphs}</w:body></w:document>"
    );
    let content_types = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
         <Default Extension=\"xml\" ContentType=\"application/xml\"/>\
         <Override PartName=\"/word/document.xml\" \
         ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
         </Types>";

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(content_types.as_bytes()).unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document_xml.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

/// A valid DOCX candidate file carrying the given body text.
pub fn docx_file(name: &str, text: &str) -> CandidateFile {
    CandidateFile {
        name: name.to_string(),
        media_type:
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".to_string(),
        bytes: docx_bytes(text),
    }
}

/// A PDF-typed candidate file with garbage content (fails extraction).
pub fn broken_pdf_file(name: &str) -> CandidateFile {
    CandidateFile {
        name: name.to_string(),
        media_type: "application/pdf".to_string(),
        bytes: b"not a real pdf".to_vec(),
    }
}
