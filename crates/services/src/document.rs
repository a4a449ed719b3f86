use std::fs;
use std::path::Path;

use revise_core::model::SourceText;

use crate::error::DocumentError;

/// Largest document accepted for loading (10 MiB).
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Markdown,
}

impl DocumentKind {
    /// Kind for a file extension (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Unsupported` for anything but plain text or Markdown.
    pub fn from_extension(extension: &str) -> Result<Self, DocumentError> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(DocumentKind::PlainText),
            "md" | "markdown" => Ok(DocumentKind::Markdown),
            other => Err(DocumentError::Unsupported {
                extension: other.to_string(),
            }),
        }
    }
}

/// Study text loaded from a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub name: String,
    pub text: SourceText,
}

/// Read a plain-text study document.
///
/// # Errors
///
/// Returns `DocumentError` for unsupported extensions, files over
/// `MAX_DOCUMENT_BYTES`, non-UTF-8 content, blank content, or I/O failures.
pub fn load_document(path: &Path) -> Result<LoadedDocument, DocumentError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    DocumentKind::from_extension(extension)?;

    let bytes = fs::metadata(path)?.len();
    if bytes > MAX_DOCUMENT_BYTES {
        return Err(DocumentError::TooLarge {
            bytes,
            max: MAX_DOCUMENT_BYTES,
        });
    }

    let raw = fs::read(path)?;
    let content = String::from_utf8(raw).map_err(|_| DocumentError::NotUtf8)?;
    let text = SourceText::parse(content.trim_start_matches('\u{feff}'))?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    log::info!("loaded {name} ({bytes} bytes)");

    Ok(LoadedDocument { name, text })
}
