//! Integration tests for document decoding.
//!
//! These tests verify that:
//! - Text files decode as UTF-8, lossily
//! - Unsupported and missing files fail with the right error
//! - A missing PDF converter is reported distinctly

use std::path::PathBuf;

use fnol_document::{DocumentDecoder, DocumentError};

fn scratch_file(name: &str, contents: &[u8]) -> std::io::Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("fnol_doc_{}_{name}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(name);
    std::fs::write(&path, contents)?;
    Ok(path)
}

#[tokio::test]
async fn test_decode_text_file() -> Result<(), Box<dyn std::error::Error>> {
    let path = scratch_file("claim.txt", b"Policy Number: P-1\nLocation: Dock 4\n")?;
    let text = DocumentDecoder::default().decode(&path).await?;
    assert_eq!(text, "Policy Number: P-1\nLocation: Dock 4\n");
    Ok(())
}

#[tokio::test]
async fn test_invalid_utf8_is_replaced() -> Result<(), Box<dyn std::error::Error>> {
    let path = scratch_file("latin1.TXT", b"Claimant: Jos\xe9\n")?;
    let text = DocumentDecoder::default().decode(&path).await?;
    assert_eq!(text, "Claimant: Jos\u{fffd}\n");
    Ok(())
}

#[tokio::test]
async fn test_unsupported_extension_is_rejected() -> std::io::Result<()> {
    let path = scratch_file("claim.docx", b"irrelevant")?;
    let result = DocumentDecoder::default().decode(&path).await;
    assert!(matches!(result, Err(DocumentError::Unsupported(_))));
    Ok(())
}

#[tokio::test]
async fn test_path_without_file_name_is_rejected() {
    let result = DocumentDecoder::default().decode(std::path::Path::new("/")).await;
    assert!(matches!(result, Err(DocumentError::MissingFileName)));
}

#[tokio::test]
async fn test_missing_text_file_is_io_error() {
    let path = std::env::temp_dir().join("fnol_doc_does_not_exist.txt");
    let result = DocumentDecoder::default().decode(&path).await;
    assert!(matches!(result, Err(DocumentError::Io { .. })));
    assert!(result.is_err_and(|e| !e.is_client_error()));
}

#[tokio::test]
async fn test_missing_pdf_tool_is_reported() -> std::io::Result<()> {
    let path = scratch_file("claim.pdf", b"%PDF-1.4\n")?;
    let decoder = DocumentDecoder::new("fnol-test-no-such-pdftotext");
    let result = decoder.decode(&path).await;
    assert!(matches!(
        result,
        Err(DocumentError::PdfToolMissing { ref program }) if program == "fnol-test-no-such-pdftotext"
    ));
    Ok(())
}
