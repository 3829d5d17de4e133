//! Resume file intake: selection, media-type validation, notices.
//!
//! Holds at most one selected file. A new acceptance replaces the prior
//! selection wholesale; a rejection leaves it untouched and reports the
//! offending file name through the notifier instead of raising to the
//! caller's control flow.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::notify::Notifier;

/// Exact MIME strings accepted for upload: PDF, legacy DOC, OOXML DOCX.
pub const ACCEPTED_MEDIA_TYPES: [&str; 3] = [
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Returns true when `media_type` is on the upload allow-list.
#[must_use]
pub fn is_accepted_media_type(media_type: &str) -> bool {
    ACCEPTED_MEDIA_TYPES.contains(&media_type)
}

/// Maps a file extension to its allow-listed media type.
///
/// Picker-style selection outside a browser has no declared type, so the
/// CLI infers one from `.pdf`/`.doc`/`.docx`. Unknown extensions return
/// `None` and are rejected before any read.
#[must_use]
pub fn media_type_for_extension(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some(ACCEPTED_MEDIA_TYPES[0]),
        "doc" => Some(ACCEPTED_MEDIA_TYPES[1]),
        "docx" => Some(ACCEPTED_MEDIA_TYPES[2]),
        _ => None,
    }
}

/// Formats a byte count for display (1024-based units, two decimals).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let exponent = (bytes.ilog2() / 10).min(UNITS.len() as u32 - 1) as usize;
    let value = bytes as f64 / f64::from(1u32 << (10 * exponent as u32));
    // Trim trailing zeros the way "12.00" -> "12" reads better in a file row.
    let rendered = format!("{value:.2}");
    let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
    format!("{rendered} {}", UNITS[exponent])
}

/// A file offered for selection (picker or drop), not yet validated.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    /// Display name of the file.
    pub name: String,
    /// Declared media type, matched exactly against the allow-list.
    pub media_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

/// The validated selection held by [`FileIntake`].
///
/// Cloning snapshots the content, so an in-flight submission is immune to
/// a concurrent replacement.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }
}

impl From<CandidateFile> for SelectedFile {
    fn from(file: CandidateFile) -> Self {
        Self {
            name: file.name,
            media_type: file.media_type,
            bytes: file.bytes,
        }
    }
}

/// A candidate file was rejected because its media type is not accepted.
#[derive(Debug, Error)]
#[error("invalid file format: {name} ({media_type})")]
pub struct InvalidFormat {
    /// Name of the rejected file.
    pub name: String,
    /// The declared media type that failed the allow-list.
    pub media_type: String,
}

/// Holds at most one validated resume file at a time.
pub struct FileIntake {
    selected: Option<SelectedFile>,
    notifier: Arc<dyn Notifier>,
}

impl FileIntake {
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            selected: None,
            notifier,
        }
    }

    /// Offers a batch of files; only the first is considered (policy: the
    /// rest of a multi-file drop are silently discarded).
    pub fn offer(&mut self, files: Vec<CandidateFile>) {
        if let Some(first) = files.into_iter().next() {
            let _ = self.select(first);
        }
    }

    /// Validates and selects one file, replacing any prior selection.
    ///
    /// Rejection never touches the prior selection; it reports a warning
    /// notice naming the offending file and returns the rejection so
    /// callers that care (the CLI exit path) can observe it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFormat`] when the declared media type is not on
    /// the allow-list.
    pub fn select(&mut self, file: CandidateFile) -> Result<(), InvalidFormat> {
        if !is_accepted_media_type(&file.media_type) {
            debug!(
                name = %file.name,
                media_type = %file.media_type,
                "rejected file with unsupported media type"
            );
            self.notifier.warning(&format!(
                "Invalid file format: {}. Please upload PDF, DOC, or DOCX files only.",
                file.name
            ));
            return Err(InvalidFormat {
                name: file.name,
                media_type: file.media_type,
            });
        }

        debug!(name = %file.name, size = file.bytes.len(), "resume selected");
        self.selected = Some(file.into());
        self.notifier.success("Resume uploaded successfully");
        Ok(())
    }

    /// Removes the current selection (user-initiated), with a notice.
    pub fn clear(&mut self) {
        if self.selected.take().is_some() {
            self.notifier.success("Resume removed successfully");
        }
    }

    /// Removes and returns the current selection without a notice
    /// (used after a successful submission).
    pub fn take(&mut self) -> Option<SelectedFile> {
        self.selected.take()
    }

    /// The current selection, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }
}
