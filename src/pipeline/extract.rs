//! PDF text extraction.
//!
//! Parsing runs in `spawn_blocking`: `lopdf` decodes every content stream
//! synchronously and would otherwise stall a Tokio worker for the duration of
//! a large upload.
//!
//! A page whose text cannot be decoded contributes an empty string. Only a
//! document that cannot be parsed at all, or one with no readable text on any
//! page, is an error.

use crate::error::QuizError;
use lopdf::Document;
use tracing::{debug, info};

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Extract the text of every page, concatenated in page order.
pub async fn extract_text(bytes: Vec<u8>) -> Result<String, QuizError> {
    tokio::task::spawn_blocking(move || extract_text_blocking(&bytes))
        .await
        .map_err(|e| QuizError::Internal(format!("Extraction task panicked: {}", e)))?
}

/// Blocking implementation of text extraction.
pub fn extract_text_blocking(bytes: &[u8]) -> Result<String, QuizError> {
    if bytes.len() < PDF_MAGIC.len() || &bytes[..PDF_MAGIC.len()] != PDF_MAGIC {
        let head: Vec<u8> = bytes.iter().take(4).copied().collect();
        return Err(QuizError::Extraction(format!(
            "file is not a valid PDF (first bytes: {:?})",
            head
        )));
    }

    let document = Document::load_mem(bytes).map_err(|e| QuizError::Extraction(e.to_string()))?;

    let pages = document.get_pages();
    info!("PDF loaded: {} pages", pages.len());

    let mut text = String::new();
    for &page_num in pages.keys() {
        match document.extract_text(&[page_num]) {
            Ok(page_text) => {
                debug!("Page {}: {} chars", page_num, page_text.len());
                text.push_str(&page_text);
            }
            Err(e) => debug!("Page {}: no extractable text ({})", page_num, e),
        }
    }

    if text.trim().is_empty() {
        return Err(QuizError::Extraction("no readable text found".into()));
    }

    Ok(text)
}
