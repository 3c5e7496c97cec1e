//! Uploaded document text extraction. Failures never reach the caller.

use bytes::Bytes;
use tracing::{debug, warn};

/// Extracts plain text from an uploaded PDF.
///
/// Runs on the blocking pool. Parse errors, and panics inside the PDF parser,
/// both yield an empty string.
pub async fn extract_document_text(data: Bytes) -> String {
    if data.is_empty() {
        return String::new();
    }

    let size = data.len();
    let result = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem(&data).map_err(|e| e.to_string())
    })
    .await;

    match result {
        Ok(Ok(text)) => {
            debug!("Extracted {} chars from {} byte document", text.chars().count(), size);
            text
        }
        Ok(Err(e)) => {
            debug!("PDF text extraction failed, treating document as empty: {e}");
            String::new()
        }
        Err(e) => {
            warn!("PDF text extraction aborted, treating document as empty: {e}");
            String::new()
        }
    }
}
