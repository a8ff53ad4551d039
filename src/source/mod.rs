//! Document → plain text.
//!
//! Supported inputs:
//! - `txt` / `md`: read as UTF-8 (lossy)
//! - `docx`: paragraphs of `word/document.xml`, one per line
//! - `pdf`: page text via `pdf-extract`

mod docx;
mod pdf;

use std::path::Path;

use thiserror::Error;
use tracing::debug;

pub use docx::extract_docx;
pub use pdf::extract_pdf;

pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "docx", "pdf"];

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("not a valid docx archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("malformed document xml: {0}")]
    Xml(String),
    #[error("pdf text extraction failed: {0}")]
    Pdf(String),
    #[error("docx archive has no {0}")]
    MissingPart(&'static str),
    #[error("unsupported file type: {0:?}")]
    Unsupported(String),
}

/// Lower-cased extension of `path`, empty when there is none.
fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

pub fn is_supported(path: &Path) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension(path).as_str())
}

/// Read `path` and return its text content, dispatching on the file extension.
pub fn extract_text(path: &Path) -> Result<String, SourceError> {
    let ext = extension(path);
    if !SUPPORTED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(SourceError::Unsupported(ext));
    }

    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let text = extract_bytes(&ext, &bytes)?;
    debug!(path = %path.display(), chars = text.chars().count(), "extracted text");
    Ok(text)
}

/// Same as [`extract_text`] for an in-memory upload whose type is known.
pub fn extract_bytes(ext: &str, bytes: &[u8]) -> Result<String, SourceError> {
    match ext {
        "txt" | "md" => Ok(String::from_utf8_lossy(bytes).into_owned()),
        "docx" => extract_docx(bytes),
        "pdf" => extract_pdf(bytes),
        other => Err(SourceError::Unsupported(other.to_string())),
    }
}
