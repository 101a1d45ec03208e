#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Decoding of uploaded FNOL documents into raw text.
//!
//! Plain text is read as UTF-8. PDFs are handed to `pdftotext` from
//! poppler-utils. Any other extension is rejected before extraction runs.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tracing::{debug, info};

pub type Result<T> = std::result::Result<T, DocumentError>;

/// Default program used to decode PDFs.
pub const DEFAULT_PDFTOTEXT: &str = "pdftotext";

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("File name cannot be empty")]
    MissingFileName,

    #[error("Unsupported file format: {0}. Only PDF and TXT files are supported.")]
    Unsupported(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} not installed (poppler-utils)")]
    PdfToolMissing { program: String },

    #[error("{program} failed (exit {code:?}): {stderr}")]
    PdfToolFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl DocumentError {
    /// Whether the upload itself was at fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::MissingFileName | Self::Unsupported(_))
    }
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Text,
    Pdf,
}

impl DocumentKind {
    /// Classify a file by its extension, case-insensitively.
    ///
    /// # Errors
    /// Returns an error for an empty name or an unsupported extension.
    pub fn from_file_name(name: &str) -> Result<Self> {
        if name.trim().is_empty() {
            return Err(DocumentError::MissingFileName);
        }

        let lower = name.to_lowercase();
        if lower.ends_with(".pdf") {
            Ok(Self::Pdf)
        } else if lower.ends_with(".txt") {
            Ok(Self::Text)
        } else {
            Err(DocumentError::Unsupported(name.to_string()))
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
        }
    }
}

/// Turns document files into raw text.
#[derive(Debug, Clone)]
pub struct DocumentDecoder {
    pdftotext: String,
}

impl Default for DocumentDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_PDFTOTEXT)
    }
}

impl DocumentDecoder {
    #[must_use]
    pub fn new(pdftotext: impl Into<String>) -> Self {
        Self {
            pdftotext: pdftotext.into(),
        }
    }

    /// Decode the file at `path` into text.
    ///
    /// # Errors
    /// Returns an error if the file type is unsupported, the file cannot be
    /// read, or PDF conversion fails.
    pub async fn decode(&self, path: &Path) -> Result<String> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or(DocumentError::MissingFileName)?;
        let kind = DocumentKind::from_file_name(&name)?;

        info!("Decoding {} document: {}", kind.as_str(), path.display());

        let text = match kind {
            DocumentKind::Text => read_text(path).await?,
            DocumentKind::Pdf => self.pdf_to_text(path).await?,
        };

        debug!(chars = text.len(), "Decoded document");
        Ok(text)
    }

    /// Run `pdftotext -enc UTF-8 <file> -` and capture stdout.
    async fn pdf_to_text(&self, path: &Path) -> Result<String> {
        // Surface unreadable files as I/O errors rather than tool failures.
        tokio::fs::metadata(path)
            .await
            .map_err(|source| DocumentError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        let output = tokio::process::Command::new(&self.pdftotext)
            .arg("-enc")
            .arg("UTF-8")
            .arg(path)
            .arg("-")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DocumentError::PdfToolMissing {
                        program: self.pdftotext.clone(),
                    }
                } else {
                    DocumentError::Io {
                        path: path.to_path_buf(),
                        source: e,
                    }
                }
            })?;

        if !output.status.success() {
            return Err(DocumentError::PdfToolFailed {
                program: self.pdftotext.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Read a text file; invalid UTF-8 sequences become U+FFFD.
async fn read_text(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_extension_is_case_insensitive() {
        assert_eq!(
            DocumentKind::from_file_name("claim.PDF").ok(),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_file_name("notes.Txt").ok(),
            Some(DocumentKind::Text)
        );
    }

    #[test]
    fn test_unsupported_and_empty_names_are_client_errors() {
        let unsupported = DocumentKind::from_file_name("claim.docx");
        assert!(matches!(unsupported, Err(DocumentError::Unsupported(ref n)) if n == "claim.docx"));
        assert!(unsupported.is_err_and(|e| e.is_client_error()));

        let empty = DocumentKind::from_file_name("  ");
        assert!(matches!(empty, Err(DocumentError::MissingFileName)));
    }

    #[test]
    fn test_tool_failures_are_not_client_errors() {
        let err = DocumentError::PdfToolMissing {
            program: DEFAULT_PDFTOTEXT.to_string(),
        };
        assert!(!err.is_client_error());
        assert_eq!(err.to_string(), "pdftotext not installed (poppler-utils)");
    }
}
